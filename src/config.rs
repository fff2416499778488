use crate::data::{LoadConfig, Source};
use clap::Parser;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_REGIONS: &str = "data/rpp_final.json";
pub const DEFAULT_BOUNDARIES: &str = "https://geo.datav.aliyun.com/areas_v3/bound/100000_full.json";

#[derive(Parser, Debug)]
#[command(
    name = "survival-map",
    version,
    about = "Terminal choropleth of regional real wages and survival costs"
)]
pub struct Cli {
    /// Region dataset: file path or http(s) URL
    #[arg(long, env = "SURVIVAL_MAP_REGIONS", default_value = DEFAULT_REGIONS)]
    pub regions: String,

    /// Boundary GeoJSON FeatureCollection: file path or http(s) URL
    #[arg(long, env = "SURVIVAL_MAP_BOUNDARIES", default_value = DEFAULT_BOUNDARIES)]
    pub boundaries: String,

    /// File holding the language preference
    #[arg(long, env = "SURVIVAL_MAP_LANGUAGE_FILE")]
    pub language_file: Option<PathBuf>,

    /// Log output; the terminal itself belongs to the UI
    #[arg(long, env = "SURVIVAL_MAP_LOG", default_value = "survival-map.log")]
    pub log_file: PathBuf,

    /// Network timeout for URL sources
    #[arg(long, default_value_t = 15)]
    pub timeout_secs: u64,
}

impl Cli {
    pub fn load_config(&self) -> LoadConfig {
        LoadConfig {
            regions: Source::parse(&self.regions),
            boundaries: Source::parse(&self.boundaries),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    /// Explicit path, else `$XDG_CONFIG_HOME/survival-map/language`, else a dotfile here
    pub fn language_path(&self) -> PathBuf {
        if let Some(path) = &self.language_file {
            return path.clone();
        }
        match env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
            Some(dir) => PathBuf::from(dir).join("survival-map").join("language"),
            None => PathBuf::from(".survival-map-language"),
        }
    }
}
