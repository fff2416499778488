use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs;
use std::path::PathBuf;
use survival_map::config::DEFAULT_REGIONS;
use survival_map::data::generate::{generate, to_json};

/// Regenerate the bundled region dataset
#[derive(Parser, Debug)]
#[command(name = "gen-data", version)]
struct Args {
    /// Where to write the dataset
    #[arg(long, default_value = DEFAULT_REGIONS)]
    out: PathBuf,

    /// Print the table without writing
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let rows = generate();
    if !args.dry_run {
        let json = to_json(&rows).context("serializing dataset")?;
        if let Some(dir) = args.out.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        fs::write(&args.out, json + "\n").with_context(|| format!("writing {}", args.out.display()))?;
        info!("wrote {} provinces to {}", rows.len(), args.out.display());
    }

    println!("{:<6} {:>6} {:>7} {:>6} {:>3}  Verdict", "Region", "RealW", "Basket", "Index", "Lv");
    for row in &rows {
        println!(
            "{:<6} ¥{:>5.1} ¥{:>6.1} {:>6.2} {:>3}  {}",
            row.name, row.real_wage, row.basket_price, row.real_index, row.level, row.verdict
        );
    }
    Ok(())
}
