use crate::data::RegionShape;
use crate::geo::point_in_rings;
use std::collections::HashMap;

/// Spatial index for region shapes using conservative approximation.
/// Each shape's bounding box is indexed into every cell it overlaps,
/// guaranteeing no false negatives while allowing false positives
/// (eliminated by the point-in-polygon test in `pick`).
pub struct FeatureGrid {
    cells: HashMap<(i32, i32), Vec<usize>>,
    cell_size: f64,
}

impl FeatureGrid {
    pub fn new(cell_size: f64) -> Self {
        Self {
            cells: HashMap::new(),
            cell_size,
        }
    }

    #[inline(always)]
    fn to_cell(&self, lon: f64, lat: f64) -> (i32, i32) {
        let x = (lon / self.cell_size).floor() as i32;
        let y = (lat / self.cell_size).floor() as i32;
        (x, y)
    }

    /// Build from the shapes' bounding boxes; shapes without geometry are skipped
    pub fn build(shapes: &[RegionShape], cell_size: f64) -> Self {
        let mut grid = Self::new(cell_size);
        for (idx, shape) in shapes.iter().enumerate() {
            let Some(b) = shape.bounds else {
                continue;
            };
            let min_cell = grid.to_cell(b.min_lon, b.min_lat);
            let max_cell = grid.to_cell(b.max_lon, b.max_lat);
            for y in min_cell.1..=max_cell.1 {
                for x in min_cell.0..=max_cell.0 {
                    grid.cells.entry((x, y)).or_default().push(idx);
                }
            }
        }
        grid
    }

    /// Candidate shape indices for a point, in insertion order
    pub fn candidates(&self, lon: f64, lat: f64) -> &[usize] {
        self.cells
            .get(&self.to_cell(lon, lat))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Index of the first shape containing the point
    pub fn pick(&self, shapes: &[RegionShape], lon: f64, lat: f64) -> Option<usize> {
        self.candidates(lon, lat).iter().copied().find(|&idx| {
            shapes.get(idx).is_some_and(|s| {
                s.bounds.is_some_and(|b| b.contains(lon, lat)) && point_in_rings(lon, lat, &s.rings)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(name: &str, x0: f64, y0: f64, size: f64) -> RegionShape {
        RegionShape::new(
            name.to_string(),
            vec![vec![(x0, y0), (x0 + size, y0), (x0 + size, y0 + size), (x0, y0 + size), (x0, y0)]],
        )
    }

    #[test]
    fn test_pick() {
        let shapes = vec![
            square("a", 100.0, 30.0, 5.0),
            square("b", 105.0, 30.0, 5.0),
            RegionShape::new("empty".to_string(), Vec::new()),
        ];
        let grid = FeatureGrid::build(&shapes, 2.0);
        assert_eq!(grid.pick(&shapes, 101.0, 31.0), Some(0));
        assert_eq!(grid.pick(&shapes, 108.0, 34.0), Some(1));
        assert_eq!(grid.pick(&shapes, 90.0, 31.0), None);
    }

    #[test]
    fn test_bbox_hit_outside_polygon() {
        let triangle = RegionShape::new(
            "t".to_string(),
            vec![vec![(0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (0.0, 0.0)]],
        );
        let shapes = vec![triangle];
        let grid = FeatureGrid::build(&shapes, 5.0);
        assert_eq!(grid.pick(&shapes, 1.0, 1.0), Some(0));
        assert_eq!(grid.pick(&shapes, 9.0, 9.0), None);
    }
}
