use criterion::{black_box, criterion_group, criterion_main, Criterion};
use survival_map::data::{BoundarySet, RegionShape};
use survival_map::map::{build_options, fit_square, silhouette_path, MapRenderer, Viewport};
use survival_map::model::{compute_breakdown, enrich_all, rank, RegionRecord};
use survival_map::names::{to_canonical_name, NAME_MAP};

fn regions() -> Vec<RegionRecord> {
    NAME_MAP
        .iter()
        .enumerate()
        .map(|(i, (short, _))| RegionRecord::new(short, 18.0 + i as f64 * 0.3, 14.0 + (i % 7) as f64, 1.2))
        .collect()
}

/// A jagged ring with `n` vertices around (lon, lat)
fn blob(lon: f64, lat: f64, n: usize) -> Vec<(f64, f64)> {
    let mut ring: Vec<(f64, f64)> = (0..n)
        .map(|i| {
            let a = i as f64 / n as f64 * std::f64::consts::TAU;
            let r = 2.0 + 0.4 * (a * 7.0).sin();
            (lon + r * a.cos(), lat + r * a.sin())
        })
        .collect();
    ring.push(ring[0]);
    ring
}

fn boundaries() -> BoundarySet {
    let shapes = NAME_MAP
        .iter()
        .enumerate()
        .map(|(i, (_, full))| {
            let lon = 78.0 + (i % 8) as f64 * 5.0;
            let lat = 20.0 + (i / 8) as f64 * 5.0;
            RegionShape::new(full.to_string(), vec![blob(lon, lat, 400)])
        })
        .collect();
    BoundarySet::new(shapes)
}

fn bench_pipeline(c: &mut Criterion) {
    let raw = regions();
    c.bench_function("enrich_and_rank", |b| {
        b.iter(|| {
            let enriched = enrich_all(black_box(&raw));
            rank(&enriched)
        })
    });

    let enriched = enrich_all(&raw);
    c.bench_function("compute_breakdown", |b| {
        b.iter(|| {
            for r in &enriched {
                black_box(compute_breakdown(r));
            }
        })
    });
}

fn bench_names(c: &mut Criterion) {
    let universe = boundaries().names();
    c.bench_function("canonical_names", |b| {
        b.iter(|| {
            for (short, _) in NAME_MAP {
                black_box(to_canonical_name(short, &universe));
            }
        })
    });
}

fn bench_silhouette(c: &mut Criterion) {
    let rings = vec![blob(110.0, 30.0, 4000), blob(115.0, 28.0, 800)];
    c.bench_function("fit_square", |b| b.iter(|| fit_square(black_box(&rings), 300.0, 280.0)));
    c.bench_function("silhouette_path", |b| b.iter(|| silhouette_path(black_box(&rings))));
}

fn bench_render(c: &mut Criterion) {
    let set = boundaries();
    let mut renderer = MapRenderer::new();
    renderer.set_boundaries(&set);
    let options = build_options(&enrich_all(&regions()), &set.names());

    let mut viewport = Viewport::china(320, 160);
    if let Some(bounds) = set.bounds() {
        viewport.fit(&bounds);
    }

    c.bench_function("render_choropleth", |b| {
        b.iter(|| renderer.render(160, 40, black_box(&viewport), &options, Some("四川省")))
    });
    c.bench_function("pick_region", |b| b.iter(|| renderer.pick(black_box(103.0), black_box(30.0))));
}

criterion_group!(benches, bench_pipeline, bench_names, bench_silhouette, bench_render);
criterion_main!(benches);
