//! Localized text for one region's survival report and map tooltip.

use crate::i18n::{Language, Localizer};
use crate::map::SeriesEntry;
use crate::model::{compute_breakdown, EnrichedRecord, Measure, SurvivalCostBreakdown};

/// Upper end of the meal bar, in hours
pub const MEAL_BAR_MAX_HOURS: f64 = 5.0;
/// Upper end of the rent bar, in work days
pub const RENT_BAR_MAX_DAYS: f64 = 30.0;
/// Fine-print wage when the record has neither an official nor a nominal wage
pub const FALLBACK_OFFICIAL_WAGE: f64 = 20.0;

const VERDICTS: [(&str, &str, &str); 31] = [
    ("黑龙江", "便宜的菜价勉强维持生存，但零下严寒和流失的就业机会冻结了你的未来。", "Cheap groceries keep you alive, but sub-zero winters and vanishing jobs freeze your future."),
    ("辽宁", "低物价救了你的命，但低工资碎了你的梦。", "Low prices save your life, but low wages break your dreams."),
    ("吉林", "严寒保住了食品价格——也保住了你停滞不前的工资。", "The cold preserves food prices — and also your stagnant paycheck."),
    ("内蒙古", "草原无边无际——就像你的工资和北京房租之间的差距。", "The steppes are endless — just like the gap between your wage and Beijing rent."),
    ("江苏", "工厂从不停工，你也不能——因为加班是\"自愿\"的。", "Factories never sleep, and neither do you — because overtime is \"voluntary\"."),
    ("安徽", "你把劳动力输出到上海，把贫穷带回了家乡。", "You export labor to Shanghai and import poverty back home."),
    ("山东", "大蒜便宜，但尊严的价格超出了你的收入。", "Garlic is cheap but dignity costs more than you earn."),
    ("四川", "火锅又辣又便宜——但医疗不是。", "The hotpot is spicy and affordable — unlike healthcare."),
    ("湖北", "2020年后他们重建了城市，但没人重建你的储蓄。", "They rebuilt after 2020, but no one rebuilt your savings."),
    ("河北", "你吸着北京的雾霾，却只赚北京工资的零头。", "You breathe Beijing's smog but earn a fraction of Beijing's wage."),
    ("浙江", "电商百万富翁住在隔壁，旁边是时薪¥8的工厂工人。", "E-commerce millionaires live next door to factory workers earning ¥8/hr."),
    ("广东", "珠三角灯火辉煌——但背后的工人不是。", "The Pearl River Delta glitters — but the workers behind it don't."),
    ("北京", "地铁票¥3，你从六环外通勤2小时的代价是灵魂。", "The subway costs ¥3. Your 2-hour commute from the 6th ring costs your soul."),
    ("重庆", "山城让送外卖更难，经济让其他一切更难。", "The hills make delivery harder. The economy makes everything else harder."),
    ("山西", "煤炭曾经带来财富，现在带来的是尘肺病和废弃的城镇。", "Coal once brought wealth. Now it brings lung disease and abandoned towns."),
    ("陕西", "古代的兵马俑比你有更好的就业保障。", "Ancient terracotta warriors had better job security than you."),
    ("上海", "外滩夜景璀璨，但你消费不起那里的一顿饭。", "The Bund sparkles at night. You can't afford to eat there."),
    ("福建", "茶文化底蕴深厚，你的银行余额却不是。", "Tea culture is rich. Your bank account is not."),
    ("天津", "近到能闻到北京的繁华——但尝不到。", "Close enough to smell Beijing's prosperity — but not to taste it."),
    ("河南", "一亿人口争抢就业岗位，这笔账怎么也算不过来。", "100 million people compete for jobs. The math doesn't add up."),
    ("湖南", "辣椒火辣，房租涨幅更火辣。", "The chili peppers are fiery. So is the rent inflation."),
    ("甘肃", "丝绸之路几百年前就终结了，经济机会也跟着走了。", "The Silk Road ended centuries ago. Economic opportunity followed."),
    ("江西", "群山阻断了高速公路，也阻断了你的职业道路。", "Mountains block the highway and your career path."),
    ("新疆", "风景令人窒息——距离海岸5000公里的物价也是。", "The scenery is breathtaking — so are the prices at 5000km from the coast."),
    ("云南", "游客的天堂，本地打工人的炼狱。", "Paradise for tourists, purgatory for local workers."),
    ("宁夏", "黄河奔流而过，机会也是——径直流走了。", "The Yellow River flows through, and so does opportunity — right past you."),
    ("贵州", "大数据中心来了，大工资没来。", "Big data centers arrived. Big paychecks did not."),
    ("广西", "喀斯特山水如画，工资底线难看。", "The karst mountains are beautiful. The wage floor is ugly."),
    ("青海", "盐湖如锂般闪耀，你的工资不会。", "The salt lake sparkles like lithium. Your wage doesn't."),
    ("海南", "自贸区的梦想遇上服务业的现实。", "Free-trade zone dreams meet service-worker realities."),
    ("西藏", "离天堂更近——离能活下去的工资更远。", "Closer to heaven — and farther from a living wage."),
];

/// Two decimals, or `∞` for values that cannot be shown
pub fn format_money(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}", value)
    } else {
        "∞".to_string()
    }
}

pub fn format_one(value: f64) -> String {
    if value.is_finite() {
        format!("{:.1}", value)
    } else {
        "∞".to_string()
    }
}

/// Difficulty badge shown under the region's index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Extreme,
    Hardcore,
    Unlivable,
}

impl Difficulty {
    pub fn for_index(real_index: f64) -> Self {
        if real_index >= 0.6 {
            Difficulty::Extreme
        } else if real_index >= 0.5 {
            Difficulty::Hardcore
        } else {
            Difficulty::Unlivable
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Difficulty::Extreme => "difficulty.extreme",
            Difficulty::Hardcore => "difficulty.hardcore",
            Difficulty::Unlivable => "difficulty.unlivable",
        }
    }
}

/// Color band of an index in the ranking lists, brightest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexBand {
    Bearable,
    Strained,
    Hard,
    Crushing,
}

impl IndexBand {
    pub fn for_index(real_index: f64) -> Self {
        if real_index >= 0.65 {
            IndexBand::Bearable
        } else if real_index >= 0.55 {
            IndexBand::Strained
        } else if real_index >= 0.50 {
            IndexBand::Hard
        } else {
            IndexBand::Crushing
        }
    }
}

/// How alarming a time-cost bar looks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarTone {
    Mild,
    Elevated,
    Severe,
}

/// One labelled progress bar of the time-cost section
#[derive(Debug, Clone, PartialEq)]
pub struct TimeCostBar {
    pub label: String,
    pub value: f64,
    pub max: f64,
    pub display: String,
}

impl TimeCostBar {
    /// Filled share in percent, capped at 100
    pub fn percent(&self) -> f64 {
        if self.value.is_nan() || self.max <= 0.0 {
            return 0.0;
        }
        (self.value / self.max * 100.0).min(100.0)
    }

    pub fn tone(&self) -> BarTone {
        let pct = self.percent();
        if pct > 60.0 {
            BarTone::Severe
        } else if pct > 30.0 {
            BarTone::Elevated
        } else {
            BarTone::Mild
        }
    }

    /// Block-character bar `width` cells wide
    pub fn text_bar(&self, width: usize) -> String {
        let filled = ((self.percent() / 100.0 * width as f64).round() as usize).min(width);
        let mut bar = "█".repeat(filled);
        bar.push_str(&"░".repeat(width - filled));
        bar
    }
}

/// One good on the receipt
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptItem {
    pub label: String,
    pub quantity: String,
    pub spend: String,
    pub allocation: String,
}

/// Everything the detail view shows for one region
#[derive(Debug, Clone)]
pub struct DetailReport<'a> {
    pub record: &'a EnrichedRecord,
    pub breakdown: SurvivalCostBreakdown,
}

impl<'a> DetailReport<'a> {
    pub fn new(record: &'a EnrichedRecord) -> Self {
        Self {
            record,
            breakdown: compute_breakdown(record),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::for_index(self.record.real_index)
    }

    /// Region verdict: built-in table, then the record's own text, then the default line
    pub fn verdict(&self, l: &Localizer) -> String {
        if let Some((_, zh, en)) = VERDICTS.iter().find(|(name, _, _)| *name == self.record.name) {
            return match l.language() {
                Language::Zh => zh,
                Language::En => en,
            }
            .to_string();
        }
        match self.record.verdict.as_deref() {
            Some(v) if !v.trim().is_empty() => v.to_string(),
            _ => l.t("verdict.default").to_string(),
        }
    }

    pub fn real_wage_text(&self) -> String {
        format_money(self.record.real_wage)
    }

    pub fn receipt_items(&self, l: &Localizer) -> Vec<ReceiptItem> {
        self.breakdown
            .goods
            .iter()
            .map(|g| {
                let quantity = match g.good.measure() {
                    Measure::Grams => format!("{}{}", g.quantity, l.t("item.gramUnit")),
                    Measure::Pieces => format!("{} {}", g.quantity, l.t("item.pieceUnit")),
                    Measure::Millilitres => format!("{}{}", g.quantity, l.t("item.milkUnit")),
                };
                ReceiptItem {
                    label: l.t(g.good.label_key()).to_string(),
                    quantity,
                    spend: format!("¥{}", format_one(g.spend)),
                    allocation: l.t_with(
                        "receipt.allocation",
                        &[("pct", &g.percent.to_string()), ("amount", &format_money(g.spend))],
                    ),
                }
            })
            .collect()
    }

    pub fn receipt_total(&self, l: &Localizer) -> String {
        l.t_with("receipt.totalCost", &[("wage", &self.real_wage_text())])
    }

    /// Meal and rent bars
    pub fn time_costs(&self, l: &Localizer) -> [TimeCostBar; 2] {
        let b = &self.breakdown;
        [
            TimeCostBar {
                label: l.t_with("time.meal", &[("price", &b.costs.meal.to_string())]),
                value: b.meal_hours,
                max: MEAL_BAR_MAX_HOURS,
                display: l.t_with("time.hours", &[("value", &format_one(b.meal_hours))]),
            },
            TimeCostBar {
                label: l.t_with("time.rent", &[("price", &b.costs.rent_monthly.to_string())]),
                value: b.rent_work_days,
                max: RENT_BAR_MAX_DAYS,
                display: l.t_with("time.days", &[("value", &format_one(b.rent_work_days))]),
            },
        ]
    }

    pub fn meals_per_day_text(&self) -> String {
        format_one(self.breakdown.meals_per_day)
    }

    pub fn rent_percent_text(&self) -> String {
        let pct = self.breakdown.rent_income_percent;
        if pct.is_finite() {
            format!("{:.0}%", pct)
        } else {
            "∞".to_string()
        }
    }

    /// Official wage, else the nominal wage, else a fixed default
    pub fn fine_print_wage(&self) -> f64 {
        self.record
            .official_wage
            .or_else(|| (self.record.wage > 0.0).then_some(self.record.wage))
            .unwrap_or(FALLBACK_OFFICIAL_WAGE)
    }

    pub fn fine_print(&self, l: &Localizer) -> String {
        format!(
            "{} {}, {}, {}. {}",
            l.t("fine.calcBasis"),
            l.t("fine.12hShifts"),
            l.t("fine.noSocial"),
            l.t("fine.26days"),
            l.t_with("fine.officialNote", &[("wage", &self.fine_print_wage().to_string())]),
        )
    }

    pub fn terminal_footer(&self, l: &Localizer) -> String {
        l.t_with("footer.terminal", &[("name", &self.record.name)])
    }
}

/// Hover card for a map region
pub fn tooltip(entry: &SeriesEntry, l: &Localizer) -> Vec<String> {
    vec![
        entry.short_name.clone(),
        format!("{}: ¥{}/hr", l.t("tooltip.realityWage"), format_money(entry.real_wage)),
        l.t("tooltip.shifts").to_string(),
        format!("{}: {}", l.t("tooltip.survivalIndex"), format_money(entry.value)),
        format!("{}: ¥{}", l.t("tooltip.basketCost"), format_money(entry.basket_price)),
        l.t_with("tooltip.warning", &[("value", &format_money(entry.value))]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::MemoryPreferenceStore;
    use crate::model::{enrich, RegionRecord};

    fn zh() -> Localizer {
        Localizer::new(Box::new(MemoryPreferenceStore::default()))
    }

    fn en() -> Localizer {
        Localizer::new(Box::new(MemoryPreferenceStore::with_value("en")))
    }

    fn shanghai() -> EnrichedRecord {
        enrich(&RegionRecord::new("上海", 24.0, 19.2, 1.25))
    }

    #[test]
    fn test_difficulty_thresholds() {
        assert_eq!(Difficulty::for_index(0.6), Difficulty::Extreme);
        assert_eq!(Difficulty::for_index(0.59), Difficulty::Hardcore);
        assert_eq!(Difficulty::for_index(0.5), Difficulty::Hardcore);
        assert_eq!(Difficulty::for_index(0.49), Difficulty::Unlivable);
    }

    #[test]
    fn test_index_bands() {
        assert_eq!(IndexBand::for_index(0.70), IndexBand::Bearable);
        assert_eq!(IndexBand::for_index(0.56), IndexBand::Strained);
        assert_eq!(IndexBand::for_index(0.52), IndexBand::Hard);
        assert_eq!(IndexBand::for_index(0.30), IndexBand::Crushing);
    }

    #[test]
    fn test_verdict_lookup_order() {
        let record = shanghai();
        let report = DetailReport::new(&record);
        assert_eq!(report.verdict(&en()), "The Bund sparkles at night. You can't afford to eat there.");

        let mut own = RegionRecord::new("台湾", 30.0, 20.0, 1.0);
        own.verdict = Some("自带的判词".to_string());
        let record = enrich(&own);
        assert_eq!(DetailReport::new(&record).verdict(&en()), "自带的判词");

        let record = enrich(&RegionRecord::new("香港", 30.0, 20.0, 1.0));
        assert_eq!(DetailReport::new(&record).verdict(&zh()), "每一分钱都很重要，而大多数不属于你。");
    }

    #[test]
    fn test_time_costs() {
        let record = shanghai();
        let report = DetailReport::new(&record);
        let [meal, rent] = report.time_costs(&en());
        assert_eq!(meal.label, "1 Standard Meal (¥25)");
        assert_eq!(meal.display, "2.3 hrs");
        assert_eq!(meal.percent(), 46.0);
        assert_eq!(meal.tone(), BarTone::Elevated);
        assert_eq!(meal.text_bar(10), "█████░░░░░");
        assert_eq!(rent.display, "23.1 days");
        assert_eq!(rent.tone(), BarTone::Severe);
        assert_eq!(report.rent_percent_text(), "89%");
        assert_eq!(report.meals_per_day_text(), "4.3");
    }

    #[test]
    fn test_infinite_time_costs() {
        let mut raw = RegionRecord::new("西藏", 0.0, 16.0, 1.0);
        raw.real_wage = Some(0.0);
        let record = enrich(&raw);
        let report = DetailReport::new(&record);
        let [meal, rent] = report.time_costs(&en());
        assert_eq!(meal.display, "∞ hrs");
        assert_eq!(meal.percent(), 100.0);
        assert_eq!(rent.text_bar(4), "████");
        assert_eq!(report.rent_percent_text(), "∞");
    }

    #[test]
    fn test_receipt() {
        let record = enrich(&RegionRecord::new("测试", 20.0, 16.0, 1.0));
        let report = DetailReport::new(&record);
        let items = report.receipt_items(&en());
        let quantities: Vec<&str> = items.iter().map(|i| i.quantity.as_str()).collect();
        assert_eq!(quantities, ["250g", "563g", "6 pcs", "84ml"]);
        assert_eq!(items[0].label, "Pork");
        assert_eq!(items[0].allocation, "Allocate 40% = ¥3.60");
        assert_eq!(report.receipt_total(&zh()), "总计: ¥9.00 (1小时生命)");
    }

    #[test]
    fn test_fine_print_wage() {
        let mut raw = RegionRecord::new("上海", 24.0, 19.2, 1.25);
        assert_eq!(DetailReport::new(&enrich(&raw)).fine_print_wage(), 24.0);
        raw.official_wage = Some(26.5);
        let record = enrich(&raw);
        let report = DetailReport::new(&record);
        assert_eq!(report.fine_print_wage(), 26.5);
        assert!(report.fine_print(&en()).contains("(¥26.5/hr)"));

        let mut raw = RegionRecord::new("某地", 0.0, 19.2, 1.25);
        raw.real_wage = Some(9.0);
        assert_eq!(DetailReport::new(&enrich(&raw)).fine_print_wage(), FALLBACK_OFFICIAL_WAGE);
    }

    #[test]
    fn test_footer_and_tooltip() {
        let record = shanghai();
        assert_eq!(
            DetailReport::new(&record).terminal_footer(&en()),
            "SURVIVAL_ENGINE v2.0 — 上海 SECTOR — REALITY_ONLY"
        );
        let entry = SeriesEntry {
            canonical_name: "上海市".to_string(),
            short_name: "上海".to_string(),
            value: 0.56,
            real_wage: 10.8,
            basket_price: 19.2,
        };
        let lines = tooltip(&entry, &en());
        assert_eq!(lines[0], "上海");
        assert_eq!(lines[1], "Reality Wage: ¥10.80/hr");
        assert_eq!(lines[5], "⚠ 1 hour of labor buys only 0.56 survival baskets.");
    }
}
