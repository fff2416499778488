//! Builds the bundled region dataset (`data/rpp_final.json`).
//!
//! Thirteen surveyed provinces carry measured values. Every other province
//! borrows the figures of the surveyed province it most resembles.

use crate::model::record::{GoodsPrices, RegionRecord};
use crate::model::survival::Good;
use crate::model::round2;
use serde::Serialize;

/// Official hourly wage every generated row reports
pub const OFFICIAL_WAGE: f64 = 20.0;

/// A surveyed province
#[derive(Debug, Clone, Copy)]
pub struct CoreRegion {
    pub name: &'static str,
    pub real_wage: f64,
    pub basket_price: f64,
    pub verdict: &'static str,
    pub tier: u8,
}

const fn core(
    name: &'static str,
    real_wage: f64,
    basket_price: f64,
    verdict: &'static str,
    tier: u8,
) -> CoreRegion {
    CoreRegion {
        name,
        real_wage,
        basket_price,
        verdict,
        tier,
    }
}

pub const CORE: [CoreRegion; 13] = [
    core("辽宁", 11.5, 18.0, "唯一的乐土 (早市碳水管饱，赖活天堂)", 1),
    core("黑龙江", 10.5, 18.0, "相对容易 (除了冷，活着不难)", 1),
    core("吉林", 10.5, 19.0, "相对容易 (物价感人)", 1),
    core("四川", 11.0, 24.0, "勉强维持 (安逸是假象，内卷是真)", 2),
    core("北京", 21.0, 45.0, "手停口停 (赚得多花得更多，存不下钱)", 2),
    core("上海", 21.0, 48.0, "魔都结界 (便利店盒饭都吃不起)", 2),
    core("湖北", 12.0, 26.0, "一般 (九省通衢，两头不靠)", 2),
    core("河南", 9.0, 22.0, "困难 (人多工价贱，9块钱都有人抢)", 3),
    core("山东", 10.0, 25.0, "困难 (考公大省，打工者地狱)", 3),
    core("广东", 14.0, 30.0, "两极分化 (深圳赚钱深圳花，工厂时薪低)", 3),
    core("新疆", 11.0, 38.0, "地狱模式 (运费贵死人，拌面30一碗)", 4),
    core("西藏", 12.0, 40.0, "无法生存 (物价堪比欧洲，工资堪比非洲)", 4),
    core("海南", 10.0, 35.0, "天崩开局 (东北人的富人区，本地人的火坑)", 5),
];

/// (province, surveyed province whose figures it borrows)
pub const MAP_TO: [(&str, &str); 18] = [
    ("天津", "北京"),
    ("江苏", "上海"),
    ("浙江", "上海"),
    ("河北", "河南"),
    ("山西", "河南"),
    ("安徽", "河南"),
    ("陕西", "河南"),
    ("内蒙古", "辽宁"),
    ("福建", "广东"),
    ("广西", "广东"),
    ("江西", "湖北"),
    ("湖南", "湖北"),
    ("重庆", "四川"),
    ("贵州", "四川"),
    ("云南", "四川"),
    ("甘肃", "新疆"),
    ("宁夏", "新疆"),
    ("青海", "西藏"),
];

/// One row of the generated dataset, in file field order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetRow {
    pub name: &'static str,
    pub official_wage: f64,
    pub real_wage: f64,
    pub basket_price: f64,
    pub real_index: f64,
    pub verdict: &'static str,
    pub level: u8,
    pub details: GoodsPrices,
}

impl DatasetRow {
    fn from_core(name: &'static str, src: &CoreRegion) -> Self {
        let basket = src.basket_price;
        let price = |good: Good| round2(good.unit_price(None, basket));
        Self {
            name,
            official_wage: OFFICIAL_WAGE,
            real_wage: src.real_wage,
            basket_price: basket,
            real_index: round2(src.real_wage / basket),
            verdict: src.verdict,
            level: src.tier,
            details: GoodsPrices {
                pork: price(Good::Pork),
                rice: price(Good::Rice),
                eggs: price(Good::Eggs),
                milk: price(Good::Milk),
            },
        }
    }

    /// The row as the loader would read it back
    pub fn to_record(&self) -> RegionRecord {
        RegionRecord {
            name: self.name.to_string(),
            basket_price: self.basket_price,
            official_wage: Some(self.official_wage),
            verdict: Some(self.verdict.to_string()),
            tier: Some(self.level),
            goods_prices: Some(self.details),
            real_wage: Some(self.real_wage),
            real_index: Some(self.real_index),
            ..RegionRecord::default()
        }
    }
}

fn core_region(name: &str) -> Option<&'static CoreRegion> {
    CORE.iter().find(|c| c.name == name)
}

/// Surveyed rows then borrowed rows, stably sorted best index first
pub fn generate() -> Vec<DatasetRow> {
    let mut rows: Vec<DatasetRow> = CORE.iter().map(|c| DatasetRow::from_core(c.name, c)).collect();
    rows.extend(
        MAP_TO
            .iter()
            .filter_map(|&(name, reference)| core_region(reference).map(|c| DatasetRow::from_core(name, c))),
    );
    rows.sort_by(|a, b| b.real_index.total_cmp(&a.real_index));
    rows
}

/// Pretty-printed JSON array of the generated rows
pub fn to_json(rows: &[DatasetRow]) -> Result<String, simd_json::Error> {
    simd_json::serde::to_string_pretty(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::regions::parse_regions;
    use crate::names::full_name;

    const BUNDLED: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/rpp_final.json");

    #[test]
    fn test_every_borrowed_region_has_a_source() {
        for (name, reference) in MAP_TO {
            assert!(core_region(reference).is_some(), "{name} borrows unknown {reference}");
            assert!(core_region(name).is_none(), "{name} is already surveyed");
        }
        assert_eq!(generate().len(), 31);
    }

    #[test]
    fn test_rows_cover_known_divisions() {
        for row in generate() {
            assert!(full_name(row.name).is_some(), "{} has no canonical name", row.name);
        }
    }

    #[test]
    fn test_borrowed_row_copies_source_figures() {
        let rows = generate();
        let find = |name: &str| rows.iter().find(|r| r.name == name).cloned();
        let (Some(jiangsu), Some(shanghai)) = (find("江苏"), find("上海")) else {
            panic!("missing rows");
        };
        assert_eq!(jiangsu.real_index, 0.44);
        assert_eq!(jiangsu.details, shanghai.details);
        assert_eq!(jiangsu.verdict, shanghai.verdict);
        assert_eq!(shanghai.details.pork, 21.6);
        assert_eq!(shanghai.details.milk, 12.0);
    }

    #[test]
    fn test_sorted_best_first_with_stable_ties() {
        let rows = generate();
        assert!(rows.windows(2).all(|w| w[0].real_index >= w[1].real_index));
        let names: Vec<&str> = rows.iter().take(2).map(|r| r.name).collect();
        assert_eq!(names, ["辽宁", "内蒙古"]);
        assert_eq!(rows.last().map(|r| r.name), Some("宁夏"));
    }

    #[test]
    fn test_output_matches_bundled_dataset() {
        let mut bundled = std::fs::read(BUNDLED).unwrap();
        let bundled = parse_regions(&mut bundled).unwrap();

        let mut json = to_json(&generate()).unwrap().into_bytes();
        let generated = parse_regions(&mut json).unwrap();

        assert_eq!(generated, bundled);

        let records: Vec<_> = generate().iter().map(DatasetRow::to_record).collect();
        assert_eq!(records, bundled);
    }
}
