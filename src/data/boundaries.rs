use crate::data::Source;
use crate::error::{LoadError, LoadResult};
use crate::geo::{Bounds, LineString};
use geojson::{GeoJson, Geometry, Value};
use log::info;
use rayon::prelude::*;
use std::time::Duration;

pub type Ring = LineString;

/// One named region from the boundary dataset
#[derive(Debug, Clone, PartialEq)]
pub struct RegionShape {
    /// Canonical name (`properties.name`)
    pub name: String,
    /// Every polygon ring, outer and inner, flattened
    pub rings: Vec<Ring>,
    pub bounds: Option<Bounds>,
}

impl RegionShape {
    pub fn new(name: String, rings: Vec<Ring>) -> Self {
        let bounds = Bounds::of_rings(&rings);
        Self { name, rings, bounds }
    }
}

/// All region shapes of a boundary dataset, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundarySet {
    shapes: Vec<RegionShape>,
}

impl BoundarySet {
    pub fn new(shapes: Vec<RegionShape>) -> Self {
        Self { shapes }
    }

    pub fn shapes(&self) -> &[RegionShape] {
        &self.shapes
    }

    /// The canonical name universe
    pub fn names(&self) -> Vec<String> {
        self.shapes.iter().map(|s| s.name.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&RegionShape> {
        self.shapes.iter().find(|s| s.name == name)
    }

    /// Bounding box over every shape
    pub fn bounds(&self) -> Option<Bounds> {
        self.shapes
            .iter()
            .filter_map(|s| s.bounds)
            .reduce(Bounds::union)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// Parse a GeoJSON FeatureCollection of named polygon features
pub fn parse_boundaries(bytes: &[u8]) -> LoadResult<BoundarySet> {
    let content = std::str::from_utf8(bytes)?;
    let geojson: GeoJson = content.parse()?;

    let GeoJson::FeatureCollection(fc) = geojson else {
        return Err(LoadError::NotFeatureCollection);
    };

    let shapes: Vec<RegionShape> = fc
        .features
        .par_iter()
        .map(|feature| {
            let name = feature
                .properties
                .as_ref()
                .and_then(|p| p.get("name"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();

            let mut rings = Vec::new();
            if let Some(ref geometry) = feature.geometry {
                collect_rings(geometry, &mut rings);
            }
            RegionShape::new(name, rings)
        })
        .collect();

    Ok(BoundarySet::new(shapes))
}

pub fn load_boundaries(source: &Source, timeout: Duration) -> LoadResult<BoundarySet> {
    let bytes = source.fetch(timeout)?;
    let set = parse_boundaries(&bytes)?;
    info!("Loaded {} boundary features from {}", set.len(), source);
    Ok(set)
}

/// Append every polygon ring of a geometry; other geometry types contribute nothing
fn collect_rings(geometry: &Geometry, rings: &mut Vec<Ring>) {
    let to_ring = |coords: &Vec<Vec<f64>>| -> Ring {
        coords
            .iter()
            .filter(|c| c.len() >= 2)
            .map(|c| (c[0], c[1]))
            .collect()
    };

    match &geometry.value {
        Value::Polygon(polygon) => {
            rings.extend(polygon.iter().map(to_ring));
        }
        Value::MultiPolygon(polygons) => {
            for polygon in polygons {
                rings.extend(polygon.iter().map(to_ring));
            }
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                collect_rings(g, rings);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"name": "北京市", "adcode": 110000},
                "geometry": {"type": "Polygon", "coordinates": [[[116.0, 39.5], [117.0, 39.5], [117.0, 40.5], [116.0, 40.5], [116.0, 39.5]]]}
            },
            {
                "type": "Feature",
                "properties": {"name": "海南省"},
                "geometry": {"type": "MultiPolygon", "coordinates": [
                    [[[108.5, 18.2], [111.0, 18.2], [111.0, 20.1], [108.5, 20.1], [108.5, 18.2]]],
                    [[[112.0, 16.0], [112.5, 16.0], [112.5, 16.5], [112.0, 16.0]]]
                ]}
            },
            {
                "type": "Feature",
                "properties": {"name": ""},
                "geometry": {"type": "LineString", "coordinates": [[110.0, 10.0], [111.0, 11.0]]}
            }
        ]
    }"#;

    #[test]
    fn test_parse_polygons_and_multipolygons() {
        let set = parse_boundaries(SAMPLE.as_bytes()).unwrap();
        assert_eq!(set.names(), ["北京市", "海南省", ""]);
        assert_eq!(set.get("北京市").unwrap().rings.len(), 1);
        assert_eq!(set.get("海南省").unwrap().rings.len(), 2);
        assert!(set.get("").unwrap().rings.is_empty());
        assert!(set.get("").unwrap().bounds.is_none());
    }

    #[test]
    fn test_bounds_over_all_shapes() {
        let set = parse_boundaries(SAMPLE.as_bytes()).unwrap();
        let b = set.bounds().unwrap();
        assert_eq!(b.min_lon, 108.5);
        assert_eq!(b.max_lon, 117.0);
        assert_eq!(b.min_lat, 16.0);
        assert_eq!(b.max_lat, 40.5);
    }

    #[test]
    fn test_rejects_bare_geometry() {
        let err = parse_boundaries(br#"{"type": "Point", "coordinates": [1.0, 2.0]}"#).unwrap_err();
        assert!(matches!(err, LoadError::NotFeatureCollection));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(parse_boundaries(b"{").is_err());
    }
}
