//! Terminal dashboard of regional real wages: enrichment and ranking of
//! region records, a survival-cost model, and a Braille choropleth.

pub mod app;
pub mod braille;
pub mod config;
pub mod data;
pub mod error;
pub mod geo;
pub mod i18n;
pub mod map;
pub mod model;
pub mod names;
pub mod report;
pub mod ui;
