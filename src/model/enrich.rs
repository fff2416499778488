use crate::model::record::{EnrichedRecord, RegionRecord};
use log::warn;

/// Nominal-to-real wage factor: 12h shifts with no overtime pay or benefits
pub const WAGE_MULTIPLIER: f64 = 0.45;

/// Round half away from zero to `places` decimals
#[inline(always)]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[inline(always)]
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

#[inline(always)]
pub fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

/// Real index for a wage/basket pair, `None` when the basket price is not a
/// positive finite number
pub fn real_index_for(real_wage: f64, basket_price: f64) -> Option<f64> {
    if basket_price > 0.0 && basket_price.is_finite() {
        Some(round2(real_wage / basket_price))
    } else {
        None
    }
}

/// Derive `real_wage` and `real_index`, keeping any value already present.
/// An unusable basket price pins the index to 0.0 so the region ranks last.
pub fn enrich(record: &RegionRecord) -> EnrichedRecord {
    let real_wage = record
        .real_wage
        .unwrap_or_else(|| round2(record.wage * WAGE_MULTIPLIER));

    let real_index = record.real_index.unwrap_or_else(|| {
        real_index_for(real_wage, record.basket_price).unwrap_or_else(|| {
            warn!(
                "{}: basket price {} is not positive, real index pinned to 0",
                record.name, record.basket_price
            );
            0.0
        })
    });

    EnrichedRecord {
        name: record.name.clone(),
        wage: record.wage,
        basket_price: record.basket_price,
        index: record.index,
        official_wage: record.official_wage,
        verdict: record.verdict.clone(),
        tier: record.tier,
        goods_prices: record.goods_prices,
        real_wage,
        real_index,
    }
}

/// Enrich a whole dataset, preserving input order
pub fn enrich_all(records: &[RegionRecord]) -> Vec<EnrichedRecord> {
    records.iter().map(enrich).collect()
}
