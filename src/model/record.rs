use serde::{Deserialize, Serialize};

/// Per-unit prices for the four reference goods.
/// Pork and rice are priced per 500g, eggs per 10 pieces, milk per 250ml.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoodsPrices {
    pub pork: f64,
    pub rice: f64,
    pub eggs: f64,
    pub milk: f64,
}

/// One region as it arrives from the dataset
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RegionRecord {
    /// Short display name, unique key (e.g. "北京")
    pub name: String,
    /// Official nominal hourly wage
    #[serde(default)]
    pub wage: f64,
    /// Price of the reference survival basket
    pub basket_price: f64,
    /// Externally supplied baseline ratio, carried but never derived from
    #[serde(default)]
    pub index: f64,
    #[serde(default)]
    pub official_wage: Option<f64>,
    #[serde(default)]
    pub verdict: Option<String>,
    /// Economic tier (1-5)
    #[serde(default, rename = "level")]
    pub tier: Option<u8>,
    #[serde(default, rename = "details")]
    pub goods_prices: Option<GoodsPrices>,
    #[serde(default)]
    pub real_wage: Option<f64>,
    #[serde(default)]
    pub real_index: Option<f64>,
}

impl RegionRecord {
    /// Minimal record with only the required fields set
    pub fn new(name: &str, wage: f64, basket_price: f64, index: f64) -> Self {
        Self {
            name: name.to_string(),
            wage,
            basket_price,
            index,
            ..Self::default()
        }
    }
}

/// A region with its derived metrics frozen in place.
/// Built once by [`crate::model::enrich`]; downstream code never re-checks optionality.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub name: String,
    pub wage: f64,
    pub basket_price: f64,
    pub index: f64,
    pub official_wage: Option<f64>,
    pub verdict: Option<String>,
    pub tier: Option<u8>,
    pub goods_prices: Option<GoodsPrices>,
    pub real_wage: f64,
    pub real_index: f64,
}

impl EnrichedRecord {
    /// Turn back into a raw record that carries both derived fields
    pub fn to_record(&self) -> RegionRecord {
        RegionRecord {
            name: self.name.clone(),
            wage: self.wage,
            basket_price: self.basket_price,
            index: self.index,
            official_wage: self.official_wage,
            verdict: self.verdict.clone(),
            tier: self.tier,
            goods_prices: self.goods_prices,
            real_wage: Some(self.real_wage),
            real_index: Some(self.real_index),
        }
    }
}
