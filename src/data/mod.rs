//! Dataset sources and loaders for region records and boundary geometry.

pub mod boundaries;
pub mod generate;
pub mod loader;
pub mod regions;

use crate::error::{LoadError, LoadResult};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub use boundaries::{load_boundaries, parse_boundaries, BoundarySet, Ring, RegionShape};
pub use loader::{spawn_loads, LoadConfig, LoadEvent};
pub use regions::{fallback_regions, load_regions, load_regions_or_fallback, DatasetOrigin, RegionLoad};

/// Where a dataset is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(String),
}

impl Source {
    /// `http://` and `https://` strings are URLs, anything else is a path
    pub fn parse(s: &str) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            Source::Url(s.to_string())
        } else {
            Source::Path(PathBuf::from(s))
        }
    }

    /// Read the whole resource. A non-success HTTP status is an error.
    pub fn fetch(&self, timeout: Duration) -> LoadResult<Vec<u8>> {
        match self {
            Source::Path(path) => fs::read(path).map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            }),
            Source::Url(url) => {
                let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;
                let response = client.get(url).send()?;
                let status = response.status();
                if !status.is_success() {
                    return Err(LoadError::Status {
                        url: url.clone(),
                        status: status.as_u16(),
                    });
                }
                Ok(response.bytes()?.to_vec())
            }
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(path) => write!(f, "{}", path.display()),
            Source::Url(url) => f.write_str(url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source() {
        assert_eq!(
            Source::parse("https://example.com/a.json"),
            Source::Url("https://example.com/a.json".to_string())
        );
        assert_eq!(
            Source::parse("data/rpp_final.json"),
            Source::Path(PathBuf::from("data/rpp_final.json"))
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Source::parse("/nonexistent/survival-map/none.json")
            .fetch(Duration::from_secs(1))
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
