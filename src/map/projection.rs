use crate::geo::{Bounds, LineString};
use glam::DVec2;
use std::f64::consts::PI;
use std::fmt::Write;

/// Side of the square silhouette viewport
pub const SILHOUETTE_SIZE: f64 = 300.0;
/// Side of the area the silhouette is scaled into, centered in the viewport
pub const SILHOUETTE_INSET: f64 = 280.0;

const MIN_ZOOM: f64 = 0.5;
const MAX_ZOOM: f64 = 60.0;

/// Web Mercator normalized y for a latitude
#[inline(always)]
fn mercator_y(lat: f64) -> f64 {
    let lat_rad = lat * PI / 180.0;
    (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0
}

/// Latitude for a Web Mercator normalized y
#[inline(always)]
fn inverse_mercator_y(y: f64) -> f64 {
    (PI * (1.0 - 2.0 * y)).sinh().atan() * 180.0 / PI
}

/// Viewport representing the visible map area and zoom level
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Center longitude (-180 to 180)
    pub center_lon: f64,
    /// Center latitude (-85 to 85)
    pub center_lat: f64,
    /// Zoom level (higher = more zoomed in)
    pub zoom: f64,
    /// Canvas pixel width
    pub width: usize,
    /// Canvas pixel height
    pub height: usize,
}

impl Viewport {
    pub fn new(center_lon: f64, center_lat: f64, zoom: f64, width: usize, height: usize) -> Self {
        Self {
            center_lon,
            center_lat,
            zoom,
            width,
            height,
        }
    }

    /// Default view over mainland China, used until the boundary set is known
    pub fn china(width: usize, height: usize) -> Self {
        Self::new(104.0, 36.0, 3.2, width, height)
    }

    /// Center on `bounds` and pick the zoom that fits it with a small margin
    pub fn fit(&mut self, bounds: &Bounds) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let (lon, _) = bounds.center();
        let top = mercator_y(bounds.max_lat);
        let bottom = mercator_y(bounds.min_lat);
        let dx = ((bounds.max_lon - bounds.min_lon) / 360.0).max(1e-6);
        let dy = (bottom - top).max(1e-6);
        let zoom_x = 1.0 / dx;
        let zoom_y = self.height as f64 / (self.width as f64 * dy);
        self.center_lon = lon;
        self.center_lat = inverse_mercator_y((top + bottom) / 2.0).clamp(-85.0, 85.0);
        self.zoom = (zoom_x.min(zoom_y) * 0.92).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Pan the viewport by pixel delta
    pub fn pan(&mut self, dx: i32, dy: i32) {
        let scale = 360.0 / (self.zoom * self.width.max(1) as f64);
        self.center_lon += dx as f64 * scale;
        self.center_lat -= dy as f64 * scale * 0.5; // Mercator distortion

        // Wrap longitude
        if self.center_lon > 180.0 {
            self.center_lon -= 360.0;
        } else if self.center_lon < -180.0 {
            self.center_lon += 360.0;
        }

        self.center_lat = self.center_lat.clamp(-85.0, 85.0);
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * 1.25).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / 1.25).max(MIN_ZOOM);
    }

    /// Zoom by factor keeping the point under (px, py) fixed
    pub fn zoom_at(&mut self, px: i32, py: i32, factor: f64) {
        let (lon, lat) = self.unproject(px, py);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let (new_px, new_py) = self.project(lon, lat);
        self.pan(new_px - px, new_py - py);
    }

    /// Unproject pixel coordinates back to geographic coordinates (lon, lat)
    pub fn unproject(&self, px: i32, py: i32) -> (f64, f64) {
        let scale = self.zoom * self.width as f64;

        let center_x = (self.center_lon + 180.0) / 360.0;
        let center_y = mercator_y(self.center_lat);

        let x = (px as f64 - self.width as f64 / 2.0) / scale + center_x;
        let y = (py as f64 - self.height as f64 / 2.0) / scale + center_y;

        (x * 360.0 - 180.0, inverse_mercator_y(y))
    }

    /// Project a geographic coordinate (lon, lat) to pixel coordinates
    pub fn project(&self, lon: f64, lat: f64) -> (i32, i32) {
        let x = (lon + 180.0) / 360.0;
        let y = mercator_y(lat);

        let center_x = (self.center_lon + 180.0) / 360.0;
        let center_y = mercator_y(self.center_lat);

        let scale = self.zoom * self.width as f64;

        let px = ((x - center_x) * scale + self.width as f64 / 2.0) as i32;
        let py = ((y - center_y) * scale + self.height as f64 / 2.0) as i32;

        (px, py)
    }

    /// Check if a line segment might be visible (rough bounding box check)
    pub fn line_might_be_visible(&self, p1: (i32, i32), p2: (i32, i32)) -> bool {
        let min_x = p1.0.min(p2.0);
        let max_x = p1.0.max(p2.0);
        let min_y = p1.1.min(p2.1);
        let max_y = p1.1.max(p2.1);

        max_x >= 0 && min_x < self.width as i32 && max_y >= 0 && min_y < self.height as i32
    }
}

/// Normalize rings into a `size` x `size` square: the joint bounding box is
/// scaled uniformly into an `inset` square, centered, with Y flipped so north
/// is up. Degenerate extents count as 1 so a point or line still projects.
pub fn fit_square(rings: &[LineString], size: f64, inset: f64) -> Vec<Vec<DVec2>> {
    let Some(bounds) = Bounds::of_rings(rings) else {
        return Vec::new();
    };

    let min = DVec2::new(bounds.min_lon, bounds.min_lat);
    let max = DVec2::new(bounds.max_lon, bounds.max_lat);
    let extent = max - min;
    let w = if extent.x == 0.0 { 1.0 } else { extent.x };
    let h = if extent.y == 0.0 { 1.0 } else { extent.y };
    let scale = (inset / w).min(inset / h);
    let offset = DVec2::new((size - w * scale) / 2.0, (size - h * scale) / 2.0);

    rings
        .iter()
        .map(|ring| {
            ring.iter()
                .map(|&(x, y)| DVec2::new(x - min.x, max.y - y) * scale + offset)
                .collect()
        })
        .collect()
}

/// SVG path data for a region outline in the fixed silhouette viewport.
/// One `M ... L ... Z` subpath per ring, coordinates to one decimal.
pub fn silhouette_path(rings: &[LineString]) -> String {
    let projected = fit_square(rings, SILHOUETTE_SIZE, SILHOUETTE_INSET);
    let mut path = String::new();
    for ring in projected.iter().filter(|r| !r.is_empty()) {
        if !path.is_empty() {
            path.push(' ');
        }
        for (i, p) in ring.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            if i > 0 {
                path.push(' ');
            }
            let _ = write!(path, "{}{:.1},{:.1}", cmd, p.x, p.y);
        }
        path.push_str(" Z");
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_center() {
        let vp = Viewport::new(0.0, 0.0, 1.0, 100, 100);
        let (x, y) = vp.project(0.0, 0.0);
        assert_eq!(x, 50);
        assert_eq!(y, 50);
    }

    #[test]
    fn test_pan() {
        let mut vp = Viewport::new(0.0, 0.0, 1.0, 100, 100);
        vp.pan(10, 0);
        assert!(vp.center_lon > 0.0);
    }

    #[test]
    fn test_unproject_inverts_project() {
        let vp = Viewport::china(400, 200);
        let (px, py) = vp.project(116.4, 39.9);
        let (lon, lat) = vp.unproject(px, py);
        assert!((lon - 116.4).abs() < 0.5);
        assert!((lat - 39.9).abs() < 0.5);
    }

    #[test]
    fn test_fit_keeps_bounds_on_screen() {
        let bounds = Bounds { min_lon: 73.5, min_lat: 18.0, max_lon: 135.0, max_lat: 53.5 };
        let mut vp = Viewport::china(300, 160);
        vp.fit(&bounds);
        for (lon, lat) in [(73.5, 18.0), (135.0, 53.5), (73.5, 53.5), (135.0, 18.0)] {
            let (px, py) = vp.project(lon, lat);
            assert!(px >= 0 && px <= 300, "x {px} for {lon},{lat}");
            assert!(py >= 0 && py <= 160, "y {py} for {lon},{lat}");
        }
    }

    #[test]
    fn test_fit_square_wide_shape() {
        let rings = vec![vec![(100.0, 30.0), (120.0, 30.0), (120.0, 40.0), (100.0, 30.0)]];
        let out = fit_square(&rings, 300.0, 280.0);
        // width 20 dominates: scale 14, height 10 * 14 = 140, vertical offset 80
        assert_eq!(out[0][0], DVec2::new(10.0, 220.0));
        assert_eq!(out[0][1], DVec2::new(290.0, 220.0));
        assert_eq!(out[0][2], DVec2::new(290.0, 80.0));
    }

    #[test]
    fn test_fit_square_degenerate_extent() {
        let rings = vec![vec![(5.0, 5.0), (5.0, 5.0)]];
        let out = fit_square(&rings, 300.0, 280.0);
        // both extents count as 1: scale 280, offsets (300 - 280) / 2
        assert_eq!(out[0][0], DVec2::new(10.0, 10.0));
    }

    #[test]
    fn test_silhouette_path_is_deterministic() {
        let rings = vec![
            vec![(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 0.0)],
            vec![(3.0, 3.0), (4.0, 3.0), (4.0, 4.0)],
        ];
        let a = silhouette_path(&rings);
        let b = silhouette_path(&rings);
        assert_eq!(a, b);
        assert!(a.starts_with("M10.0,290.0 L150.0,290.0 L150.0,220.0"));
        assert_eq!(a.matches('M').count(), 2);
        assert_eq!(a.matches(" Z").count(), 2);
        assert_eq!(silhouette_path(&[]), "");
    }

    #[test]
    fn test_silhouette_points_stay_in_viewport() {
        let rings = vec![vec![(73.5, 39.0), (96.0, 49.2), (80.0, 34.3), (73.5, 39.0)]];
        for ring in fit_square(&rings, SILHOUETTE_SIZE, SILHOUETTE_INSET) {
            for p in ring {
                assert!(p.x >= 10.0 - 1e-9 && p.x <= 290.0 + 1e-9);
                assert!(p.y >= 10.0 - 1e-9 && p.y <= 290.0 + 1e-9);
            }
        }
    }
}
