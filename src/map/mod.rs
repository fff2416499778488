pub mod choropleth;
mod geometry;
pub mod projection;
mod renderer;
mod spatial;

pub use choropleth::{build_options, ChoroplethOptions, SeriesEntry, VisualMap};
pub use projection::{fit_square, silhouette_path, Viewport};
pub use renderer::{render_silhouette, DisplaySettings, MapLayers, MapRenderer};
pub use spatial::FeatureGrid;
