//! Survival-cost model: what one hour of real wage buys, and how long it
//! takes to earn a meal or a month of rent.

use crate::model::enrich::round1;
use crate::model::record::{EnrichedRecord, GoodsPrices};

/// Share of one hour's real wage spent on each good, in percent
pub const ALLOCATION_PERCENT: [u32; 4] = [40, 30, 15, 15];

/// Fallback unit price of each good as a fraction of the basket price
pub const UNIT_PRICE_FRACTION: [f64; 4] = [0.45, 0.15, 0.15, 0.25];

/// Reference unit size each unit price is quoted for
pub const UNIT_SIZE: [f64; 4] = [500.0, 500.0, 10.0, 250.0];

pub const WORK_HOURS_PER_DAY: f64 = 10.0;
pub const WORK_DAYS_PER_MONTH: f64 = 26.0;

/// Tier used when a region carries none
pub const DEFAULT_TIER: u8 = 2;

/// Baseline meal and rent cost for one economic tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierCosts {
    pub meal: f64,
    pub rent_monthly: f64,
}

pub const TIER_COSTS: [(u8, TierCosts); 5] = [
    (1, TierCosts { meal: 12.0, rent_monthly: 800.0 }),
    (2, TierCosts { meal: 18.0, rent_monthly: 1500.0 }),
    (3, TierCosts { meal: 18.0, rent_monthly: 1500.0 }),
    (4, TierCosts { meal: 22.0, rent_monthly: 600.0 }),
    (5, TierCosts { meal: 22.0, rent_monthly: 600.0 }),
];

/// Costs for the named first-tier regions, regardless of their tier field
pub const TIER1_COSTS: TierCosts = TierCosts { meal: 25.0, rent_monthly: 2500.0 };

pub const TIER1_NAMES: [&str; 6] = ["北京", "上海", "广东", "天津", "江苏", "浙江"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Good {
    Pork,
    Rice,
    Eggs,
    Milk,
}

/// How a good's quantity is counted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Grams,
    Pieces,
    Millilitres,
}

impl Good {
    pub const ALL: [Good; 4] = [Good::Pork, Good::Rice, Good::Eggs, Good::Milk];

    fn slot(self) -> usize {
        self as usize
    }

    pub fn allocation_percent(self) -> u32 {
        ALLOCATION_PERCENT[self.slot()]
    }

    pub fn unit_price_fraction(self) -> f64 {
        UNIT_PRICE_FRACTION[self.slot()]
    }

    pub fn unit_size(self) -> f64 {
        UNIT_SIZE[self.slot()]
    }

    pub fn measure(self) -> Measure {
        match self {
            Good::Pork | Good::Rice => Measure::Grams,
            Good::Eggs => Measure::Pieces,
            Good::Milk => Measure::Millilitres,
        }
    }

    /// Localization key for the good's label
    pub fn label_key(self) -> &'static str {
        match self {
            Good::Pork => "item.pork",
            Good::Rice => "item.rice",
            Good::Eggs => "item.eggs",
            Good::Milk => "item.milk",
        }
    }

    /// Unit price from the region's own goods prices, else a share of the basket
    pub fn unit_price(self, prices: Option<&GoodsPrices>, basket_price: f64) -> f64 {
        match prices {
            Some(p) => match self {
                Good::Pork => p.pork,
                Good::Rice => p.rice,
                Good::Eggs => p.eggs,
                Good::Milk => p.milk,
            },
            None => basket_price * self.unit_price_fraction(),
        }
    }
}

/// One good's slice of an hour's wage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoodsAllocation {
    pub good: Good,
    pub percent: u32,
    pub spend: f64,
    pub unit_price: f64,
    /// Physical quantity (grams, pieces or millilitres); 0 when the price is unusable
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurvivalCostBreakdown {
    pub real_wage: f64,
    pub goods: [GoodsAllocation; 4],
    pub costs: TierCosts,
    /// Hours of work per standard meal
    pub meal_hours: f64,
    /// Work days per month of rent
    pub rent_work_days: f64,
    pub monthly_income: f64,
    pub meals_per_day: f64,
    pub rent_income_percent: f64,
}

/// Baseline costs for a region, honoring the first-tier name override
pub fn tier_costs(name: &str, tier: Option<u8>) -> TierCosts {
    if TIER1_NAMES.contains(&name) {
        return TIER1_COSTS;
    }
    let wanted = tier.unwrap_or(DEFAULT_TIER);
    TIER_COSTS
        .iter()
        .find(|(t, _)| *t == wanted)
        .or_else(|| TIER_COSTS.iter().find(|(t, _)| *t == DEFAULT_TIER))
        .map(|(_, c)| *c)
        .unwrap_or(TierCosts { meal: 18.0, rent_monthly: 1500.0 })
}

/// `numerator / denominator`, infinite when the denominator is not positive
#[inline(always)]
fn per_unit(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        f64::INFINITY
    }
}

fn allocate(good: Good, record: &EnrichedRecord) -> GoodsAllocation {
    let percent = good.allocation_percent();
    let spend = record.real_wage * percent as f64 / 100.0;
    let unit_price = good.unit_price(record.goods_prices.as_ref(), record.basket_price);
    let quantity = if unit_price > 0.0 && unit_price.is_finite() {
        ((spend / unit_price) * good.unit_size()).round().max(0.0) as u64
    } else {
        0
    };
    GoodsAllocation {
        good,
        percent,
        spend,
        unit_price,
        quantity,
    }
}

/// Survival report figures for one region
pub fn compute_breakdown(record: &EnrichedRecord) -> SurvivalCostBreakdown {
    let real_wage = record.real_wage;
    let goods = Good::ALL.map(|good| allocate(good, record));
    let costs = tier_costs(&record.name, record.tier);

    let daily_income = real_wage * WORK_HOURS_PER_DAY;
    let monthly_income = daily_income * WORK_DAYS_PER_MONTH;

    SurvivalCostBreakdown {
        real_wage,
        goods,
        costs,
        meal_hours: round1(per_unit(costs.meal, real_wage)),
        rent_work_days: round1(per_unit(costs.rent_monthly, daily_income)),
        monthly_income,
        meals_per_day: daily_income / costs.meal,
        rent_income_percent: per_unit(costs.rent_monthly, monthly_income) * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::enrich::enrich;
    use crate::model::record::RegionRecord;

    fn record(name: &str, wage: f64, basket: f64, tier: Option<u8>) -> EnrichedRecord {
        let mut r = RegionRecord::new(name, wage, basket, 1.0);
        r.tier = tier;
        enrich(&r)
    }

    #[test]
    fn test_allocations_sum_to_100() {
        assert_eq!(ALLOCATION_PERCENT.iter().sum::<u32>(), 100);
        let b = compute_breakdown(&record("四川", 21.0, 15.8, Some(2)));
        assert_eq!(b.goods.iter().map(|g| g.percent).sum::<u32>(), 100);
    }

    #[test]
    fn test_unit_price_fractions_sum_to_one() {
        let total: f64 = Good::ALL.iter().map(|g| g.unit_price_fraction()).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert_eq!(Good::Pork.unit_price_fraction(), 0.45);
        assert_eq!(Good::Milk.unit_price_fraction(), 0.25);
    }

    #[test]
    fn test_quantities_from_basket_fallback() {
        // real wage 9.0, basket 16.0
        let b = compute_breakdown(&record("测试", 20.0, 16.0, Some(2)));
        let q: Vec<u64> = b.goods.iter().map(|g| g.quantity).collect();
        // pork: 3.6 / 7.2 * 500, rice: 2.7 / 2.4 * 500, eggs: 1.35 / 2.4 * 10, milk: 1.35 / 4.0 * 250
        assert_eq!(q, [250, 563, 6, 84]);
    }

    #[test]
    fn test_quantities_from_goods_prices() {
        let mut r = RegionRecord::new("辽宁", 0.0, 18.0, 0.0);
        r.real_wage = Some(10.0);
        r.goods_prices = Some(GoodsPrices { pork: 10.0, rice: 3.0, eggs: 5.0, milk: 5.0 });
        let b = compute_breakdown(&enrich(&r));
        let q: Vec<u64> = b.goods.iter().map(|g| g.quantity).collect();
        assert_eq!(q, [200, 500, 3, 75]);
    }

    #[test]
    fn test_tier1_override() {
        let b = compute_breakdown(&record("北京", 26.0, 20.5, Some(4)));
        assert_eq!(b.costs, TierCosts { meal: 25.0, rent_monthly: 2500.0 });
    }

    #[test]
    fn test_tier_table() {
        assert_eq!(tier_costs("辽宁", Some(1)), TierCosts { meal: 12.0, rent_monthly: 800.0 });
        assert_eq!(tier_costs("河南", Some(3)), tier_costs("四川", Some(2)));
        assert_eq!(tier_costs("新疆", Some(4)).rent_monthly, 600.0);
        assert_eq!(tier_costs("海南", Some(5)).meal, 22.0);
        assert_eq!(tier_costs("无", None), tier_costs("无", Some(2)));
        assert_eq!(tier_costs("无", Some(9)), tier_costs("无", Some(2)));
    }

    #[test]
    fn test_time_costs() {
        // real wage 9.0, tier 2: meal 18, rent 1500
        let b = compute_breakdown(&record("测试", 20.0, 16.0, None));
        assert_eq!(b.meal_hours, 2.0);
        assert_eq!(b.rent_work_days, 16.7);
        assert_eq!(b.monthly_income, 2340.0);
        assert!((b.meals_per_day - 5.0).abs() < 1e-12);
        assert!((b.rent_income_percent - 1500.0 / 2340.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_wage_and_price_are_guarded() {
        let mut r = RegionRecord::new("零", 0.0, 0.0, 0.0);
        r.real_index = Some(0.0);
        let b = compute_breakdown(&enrich(&r));
        assert!(b.goods.iter().all(|g| g.quantity == 0));
        assert!(b.meal_hours.is_infinite());
        assert!(b.rent_work_days.is_infinite());
        assert!(b.rent_income_percent.is_infinite());
    }
}
