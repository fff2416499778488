use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Malformed JSON: {0}")]
    Json(#[from] simd_json::Error),

    #[error("Malformed GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("Dataset is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Boundary dataset is not a FeatureCollection")]
    NotFeatureCollection,
}

pub type LoadResult<T> = Result<T, LoadError>;
