/// A ring or line as (lon, lat) pairs
pub type LineString = Vec<(f64, f64)>;

/// Axis-aligned lon/lat bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Bounds {
    /// Bounding box over every point of every ring; `None` when there are no points
    pub fn of_rings<'a>(rings: impl IntoIterator<Item = &'a LineString>) -> Option<Self> {
        let mut bounds: Option<Bounds> = None;
        for &(lon, lat) in rings.into_iter().flatten() {
            bounds = Some(match bounds {
                None => Bounds {
                    min_lon: lon,
                    min_lat: lat,
                    max_lon: lon,
                    max_lat: lat,
                },
                Some(b) => Bounds {
                    min_lon: b.min_lon.min(lon),
                    min_lat: b.min_lat.min(lat),
                    max_lon: b.max_lon.max(lon),
                    max_lat: b.max_lat.max(lat),
                },
            });
        }
        bounds
    }

    pub fn union(self, other: Bounds) -> Bounds {
        Bounds {
            min_lon: self.min_lon.min(other.min_lon),
            min_lat: self.min_lat.min(other.min_lat),
            max_lon: self.max_lon.max(other.max_lon),
            max_lat: self.max_lat.max(other.max_lat),
        }
    }

    #[inline(always)]
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lon + self.max_lon) * 0.5,
            (self.min_lat + self.max_lat) * 0.5,
        )
    }
}

/// Even-odd point-in-polygon test across all rings.
/// Holes and disjoint parts of a multipolygon both fall out of the parity rule.
pub fn point_in_rings(lon: f64, lat: f64, rings: &[LineString]) -> bool {
    let mut inside = false;
    for ring in rings {
        let n = ring.len();
        if n < 3 {
            continue;
        }
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = ring[i];
            let (xj, yj) = ring[j];
            if (yi > lat) != (yj > lat) && lon < (xj - xi) * (lat - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            j = i;
        }
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> LineString {
        vec![(x0, y0), (x0 + size, y0), (x0 + size, y0 + size), (x0, y0 + size), (x0, y0)]
    }

    #[test]
    fn test_bounds() {
        let rings = [square(0.0, 0.0, 2.0), square(5.0, -1.0, 1.0)];
        let b = Bounds::of_rings(&rings).unwrap();
        assert_eq!(b, Bounds { min_lon: 0.0, min_lat: -1.0, max_lon: 6.0, max_lat: 2.0 });
        assert!(Bounds::of_rings(&Vec::<LineString>::new()).is_none());
    }

    #[test]
    fn test_point_in_rings_with_hole() {
        let rings = [square(0.0, 0.0, 10.0), square(4.0, 4.0, 2.0)];
        assert!(point_in_rings(1.0, 1.0, &rings));
        assert!(!point_in_rings(5.0, 5.0, &rings));
        assert!(!point_in_rings(11.0, 1.0, &rings));
    }
}
