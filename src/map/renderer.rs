use crate::braille::BrailleCanvas;
use crate::data::{BoundarySet, RegionShape};
use crate::map::choropleth::ChoroplethOptions;
use crate::map::geometry::{draw_marker, draw_ring, fill_rings};
use crate::geo::LineString;
use crate::map::projection::{fit_square, Viewport, SILHOUETTE_INSET, SILHOUETTE_SIZE};
use crate::map::spatial::FeatureGrid;
use glam::DVec2;

/// Grid cell size in degrees for the click index
const GRID_CELL_DEGREES: f64 = 2.0;

/// Display settings for map layers
#[derive(Clone, Debug)]
pub struct DisplaySettings {
    /// Draw region borders; when off, borders are carved out of the fills instead
    pub show_outlines: bool,
    pub show_labels: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_outlines: true,
            show_labels: true,
        }
    }
}

/// Rendered canvases, one per color, back to front
pub struct MapLayers {
    /// Fills, one canvas per visual-map band
    pub bands: Vec<BrailleCanvas>,
    /// Fills of regions with no series entry
    pub unmatched: BrailleCanvas,
    pub outlines: BrailleCanvas,
    /// Outline and marker of the selected region
    pub highlight: BrailleCanvas,
    /// Text labels as (char_x, char_y, text)
    pub labels: Vec<(u16, u16, String)>,
}

/// Choropleth renderer over a loaded boundary set
pub struct MapRenderer {
    shapes: Vec<RegionShape>,
    grid: FeatureGrid,
    pub settings: DisplaySettings,
}

impl MapRenderer {
    pub fn new() -> Self {
        Self {
            shapes: Vec::new(),
            grid: FeatureGrid::new(GRID_CELL_DEGREES),
            settings: DisplaySettings::default(),
        }
    }

    /// Take the shapes of a boundary set and index them for picking
    pub fn set_boundaries(&mut self, boundaries: &BoundarySet) {
        self.shapes = boundaries.shapes().to_vec();
        self.grid = FeatureGrid::build(&self.shapes, GRID_CELL_DEGREES);
    }

    pub fn shapes(&self) -> &[RegionShape] {
        &self.shapes
    }

    /// Check if any boundary data is loaded
    pub fn has_data(&self) -> bool {
        !self.shapes.is_empty()
    }

    /// Region under a geographic point
    pub fn pick(&self, lon: f64, lat: f64) -> Option<&RegionShape> {
        self.grid
            .pick(&self.shapes, lon, lat)
            .and_then(|idx| self.shapes.get(idx))
    }

    /// Region under a canvas pixel
    pub fn pick_pixel(&self, viewport: &Viewport, px: i32, py: i32) -> Option<&RegionShape> {
        let (lon, lat) = viewport.unproject(px, py);
        self.pick(lon, lat)
    }

    /// Render every shape into per-color layers
    pub fn render(
        &self,
        width: usize,
        height: usize,
        viewport: &Viewport,
        options: &ChoroplethOptions,
        selected: Option<&str>,
    ) -> MapLayers {
        let band_count = options.visual_map.bands.max(1);
        let mut layers = MapLayers {
            bands: vec![BrailleCanvas::new(width, height); band_count],
            unmatched: BrailleCanvas::new(width, height),
            outlines: BrailleCanvas::new(width, height),
            highlight: BrailleCanvas::new(width, height),
            labels: Vec::new(),
        };

        for shape in &self.shapes {
            let Some(bounds) = shape.bounds else {
                continue;
            };
            let top_left = viewport.project(bounds.min_lon, bounds.max_lat);
            let bottom_right = viewport.project(bounds.max_lon, bounds.min_lat);
            if !viewport.line_might_be_visible(top_left, bottom_right) {
                continue;
            }

            let projected: Vec<Vec<(i32, i32)>> = shape
                .rings
                .iter()
                .map(|ring| ring.iter().map(|&(lon, lat)| viewport.project(lon, lat)).collect())
                .collect();

            let entry = options.by_canonical(&shape.name);
            let fill = match entry {
                Some(e) => &mut layers.bands[options.visual_map.band_for(e.value).min(band_count - 1)],
                None => &mut layers.unmatched,
            };
            fill_rings(fill, &projected);

            for ring in &projected {
                draw_ring(&mut layers.outlines, ring);
            }

            let (center_lon, center_lat) = bounds.center();
            let (cx, cy) = viewport.project(center_lon, center_lat);

            if selected == Some(shape.name.as_str()) {
                for ring in &projected {
                    draw_ring(&mut layers.highlight, ring);
                }
                draw_marker(&mut layers.highlight, cx, cy, 2);
            }

            if self.settings.show_labels && cx >= 0 && cy >= 0 {
                if let Some(e) = entry {
                    let char_x = (cx / 2) as u16;
                    let char_y = (cy / 4) as u16;
                    if (char_x as usize) < width && (char_y as usize) < height {
                        layers.labels.push((char_x, char_y, e.short_name.clone()));
                    }
                }
            }
        }

        if !self.settings.show_outlines {
            for band in &mut layers.bands {
                band.subtract(&layers.outlines);
            }
            layers.unmatched.subtract(&layers.outlines);
        }

        layers
    }

    /// Toggle region labels
    pub fn toggle_labels(&mut self) {
        self.settings.show_labels = !self.settings.show_labels;
    }

    /// Toggle border outlines
    pub fn toggle_outlines(&mut self) {
        self.settings.show_outlines = !self.settings.show_outlines;
    }
}

/// Fill and outline of one region's silhouette, centered in a
/// `width` x `height` character canvas. Fill dots under the outline are cleared.
pub fn render_silhouette(rings: &[LineString], width: usize, height: usize) -> (BrailleCanvas, BrailleCanvas) {
    let mut fill = BrailleCanvas::new(width, height);
    let mut outline = BrailleCanvas::new(width, height);
    let (pw, ph) = (fill.pixel_width() as f64, fill.pixel_height() as f64);
    let scale = (pw / SILHOUETTE_SIZE).min(ph / SILHOUETTE_SIZE);
    let offset = DVec2::new((pw - SILHOUETTE_SIZE * scale) / 2.0, (ph - SILHOUETTE_SIZE * scale) / 2.0);

    let projected: Vec<Vec<(i32, i32)>> = fit_square(rings, SILHOUETTE_SIZE, SILHOUETTE_INSET)
        .iter()
        .map(|ring| {
            ring.iter()
                .map(|&p| {
                    let q = p * scale + offset;
                    (q.x as i32, q.y as i32)
                })
                .collect()
        })
        .collect();

    fill_rings(&mut fill, &projected);
    for ring in &projected {
        draw_ring(&mut outline, ring);
    }
    fill.subtract(&outline);
    (fill, outline)
}

impl Default for MapRenderer {
    fn default() -> Self {
        Self::new()
    }
}
