//! Region records and the pure metric pipeline: enrichment, ranking and the
//! survival-cost model.

pub mod dataset;
pub mod enrich;
pub mod rank;
pub mod record;
pub mod survival;

pub use dataset::Dataset;
pub use enrich::{enrich, enrich_all, round1, round2, WAGE_MULTIPLIER};
pub use rank::{format_index, rank, RankedView, Standing, Summary, NOT_AVAILABLE};
pub use record::{EnrichedRecord, GoodsPrices, RegionRecord};
pub use survival::{compute_breakdown, Good, GoodsAllocation, Measure, SurvivalCostBreakdown, TierCosts};
