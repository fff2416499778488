//! Two-locale string tables with `{param}` substitution and a persisted
//! language preference.

use log::{info, warn};
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Zh,
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
        }
    }

    /// Only the exact tokens `zh` and `en` are recognized
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "zh" => Some(Language::Zh),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Language::Zh => Language::En,
            Language::En => Language::Zh,
        }
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::Zh => ZH,
            Language::En => EN,
        }
    }
}

const ZH: &[(&str, &str)] = &[
    ("header.title", "购买力地图"),
    ("header.subtitle", "真实指数 = 现实工资 (×0.45) ÷ 生存篮子 · 12小时工作 · 无保险"),
    ("stats.provinces", "省份"),
    ("stats.bestSurvival", "最佳生存"),
    ("stats.worstSurvival", "最差生存"),
    ("stats.avgIndex", "平均真实指数"),
    ("sidebar.bestSurvival", "最佳生存"),
    ("sidebar.worstSurvival", "最差生存"),
    ("detail.backButton", "⬅ 返回全国地图"),
    ("detail.realityIndex", "现实生存指数"),
    ("detail.realityWage", "现实工资"),
    ("detail.survivalReport", "生存报告"),
    ("detail.basedOn", "基于现实工资 · ¥{wage}/小时"),
    ("section.survivalCombo", "1小时劳动 (¥{wage}) 生存套餐"),
    ("section.timeCost", "生活时间成本"),
    ("section.finePrint", "残酷真相"),
    ("item.pork", "猪肉"),
    ("item.eggs", "鸡蛋"),
    ("item.milk", "牛奶"),
    ("item.rice", "大米"),
    ("item.milkUnit", "ml"),
    ("item.gramUnit", "g"),
    ("item.pieceUnit", "个"),
    ("receipt.totalCost", "总计: ¥{wage} (1小时生命)"),
    ("receipt.allocation", "分配 {pct}% = ¥{amount}"),
    ("time.meal", "1顿标准餐 (¥{price})"),
    ("time.rent", "1个月房租 (¥{price})"),
    ("time.mealsPerDay", "每日可吃餐数"),
    ("time.rentPercent", "房租 / 收入"),
    ("time.workDay", "按10小时工作日"),
    ("time.monthlyIncome", "占月收入比例"),
    ("time.hours", "{value} 小时"),
    ("time.days", "{value} 天"),
    ("time.regionalNote", "ℹ 价格已根据地区经济水平调整"),
    ("fine.calcBasis", "⚠ 计算基于"),
    ("fine.12hShifts", "每日12小时轮班"),
    ("fine.noSocial", "无社保"),
    ("fine.26days", "每月26个工作日"),
    ("fine.officialNote", "官方最低工资 (¥{wage}/小时) 假设8小时工作制+福利——这对大多数低收入工人来说并不存在。"),
    ("difficulty.extreme", "⚠ 极端困难"),
    ("difficulty.hardcore", "💀 艰难生存"),
    ("difficulty.unlivable", "☠ 无法生存"),
    ("map.loading", "加载地图数据..."),
    ("map.realityMode", "现实模式"),
    ("map.vmHard", "困难"),
    ("map.vmCrushing", "碾压"),
    ("tooltip.realityWage", "现实工资"),
    ("tooltip.shifts", "12小时轮班 · 无福利 · 无社保"),
    ("tooltip.survivalIndex", "生存指数"),
    ("tooltip.basketCost", "篮子成本"),
    ("tooltip.warning", "⚠ 1小时劳动仅能购买 {value} 个生存篮子。"),
    ("footer.note", "现实工资 = 官方最低工资 × 0.45 (12小时班次，无保险，无加班费)。点击任意省份查看完整生存报告。"),
    ("footer.terminal", "SURVIVAL_ENGINE v2.0 — {name} 区域 — 仅限现实模式"),
    ("keys.overview", "q:退出 Tab:切换列表 j/k:移动 Enter:详情 +/-:缩放 h/l:平移 r:重置 L:English"),
    ("keys.detail", "Backspace/Esc:返回 L:English q:退出"),
    ("verdict.default", "每一分钱都很重要，而大多数不属于你。"),
];

const EN: &[(&str, &str)] = &[
    ("header.title", "Purchasing Power Map"),
    ("header.subtitle", "Reality Index = Real Wage (×0.45) ÷ Survival Basket · 12h shifts · No benefits"),
    ("stats.provinces", "Provinces"),
    ("stats.bestSurvival", "Best Survival"),
    ("stats.worstSurvival", "Worst Survival"),
    ("stats.avgIndex", "Avg Reality Index"),
    ("sidebar.bestSurvival", "Best Survival"),
    ("sidebar.worstSurvival", "Worst Survival"),
    ("detail.backButton", "⬅ Back to National Map"),
    ("detail.realityIndex", "Reality Survival Index"),
    ("detail.realityWage", "Reality Wage"),
    ("detail.survivalReport", "The Survival Report"),
    ("detail.basedOn", "Based on Reality Wage · ¥{wage}/hr"),
    ("section.survivalCombo", "1 Hour of Labor (¥{wage}) Survival Combo"),
    ("section.timeCost", "Time Cost of Living"),
    ("section.finePrint", "The Fine Print"),
    ("item.pork", "Pork"),
    ("item.eggs", "Eggs"),
    ("item.milk", "Milk"),
    ("item.rice", "Rice"),
    ("item.milkUnit", "ml"),
    ("item.gramUnit", "g"),
    ("item.pieceUnit", "pcs"),
    ("receipt.totalCost", "Total: ¥{wage} (1 Hour of Life)"),
    ("receipt.allocation", "Allocate {pct}% = ¥{amount}"),
    ("time.meal", "1 Standard Meal (¥{price})"),
    ("time.rent", "1 Month Rent (¥{price})"),
    ("time.mealsPerDay", "Meals per day"),
    ("time.rentPercent", "Rent / Income"),
    ("time.workDay", "@ 10hr work day"),
    ("time.monthlyIncome", "of monthly take-home"),
    ("time.hours", "{value} hrs"),
    ("time.days", "{value} days"),
    ("time.regionalNote", "ℹ Prices adjusted for regional economic level"),
    ("fine.calcBasis", "⚠ Calculation based on"),
    ("fine.12hShifts", "12-hour daily shifts"),
    ("fine.noSocial", "no social security"),
    ("fine.26days", "26 working days/month"),
    ("fine.officialNote", "The official minimum wage (¥{wage}/hr) assumes 8-hour days with benefits — a reality that does not exist for most low-income workers."),
    ("difficulty.extreme", "⚠ EXTREME DIFFICULTY"),
    ("difficulty.hardcore", "💀 HARDCORE SURVIVAL"),
    ("difficulty.unlivable", "☠ UNLIVABLE"),
    ("map.loading", "Loading reality data..."),
    ("map.realityMode", "REALITY MODE"),
    ("map.vmHard", "Hard"),
    ("map.vmCrushing", "Crushing"),
    ("tooltip.realityWage", "Reality Wage"),
    ("tooltip.shifts", "12h shifts · no benefits · no insurance"),
    ("tooltip.survivalIndex", "Survival Index"),
    ("tooltip.basketCost", "Basket Cost"),
    ("tooltip.warning", "⚠ 1 hour of labor buys only {value} survival baskets."),
    ("footer.note", "Reality Wage = Official Min Wage × 0.45 (12h shift, no insurance, no overtime pay). Click any province for the full survival report."),
    ("footer.terminal", "SURVIVAL_ENGINE v2.0 — {name} SECTOR — REALITY_ONLY"),
    ("keys.overview", "q:quit Tab:switch list j/k:move Enter:detail +/-:zoom h/l:pan r:reset L:中文"),
    ("keys.detail", "Backspace/Esc:back L:中文 q:quit"),
    ("verdict.default", "Every yuan counts, and most of them aren't yours."),
];

/// Where the chosen language token is kept between runs
pub trait PreferenceStore {
    fn load(&self) -> Option<String>;
    fn save(&mut self, value: &str) -> io::Result<()>;
}

/// Keeps the token verbatim in a small file
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> Option<String> {
        fs::read_to_string(&self.path)
            .ok()
            .map(|s| s.trim().to_string())
    }

    fn save(&mut self, value: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, value)
    }
}

/// In-memory store; clones share the same slot
#[derive(Clone, Default)]
pub struct MemoryPreferenceStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryPreferenceStore {
    pub fn with_value(value: &str) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(value.to_string()))),
        }
    }

    pub fn value(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Option<String> {
        self.value()
    }

    fn save(&mut self, value: &str) -> io::Result<()> {
        *self.slot.borrow_mut() = Some(value.to_string());
        Ok(())
    }
}

/// Active language plus lookup
pub struct Localizer {
    language: Language,
    store: Box<dyn PreferenceStore>,
}

impl Localizer {
    /// Reads the stored preference once; anything unrecognized keeps the default
    pub fn new(store: Box<dyn PreferenceStore>) -> Self {
        let language = store
            .load()
            .and_then(|code| Language::from_code(&code))
            .unwrap_or_default();
        Self { language, store }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Switch language and persist the choice
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        match self.store.save(language.code()) {
            Ok(()) => info!("language set to {}", language.code()),
            Err(e) => warn!("could not persist language preference: {e}"),
        }
    }

    pub fn toggle(&mut self) {
        self.set_language(self.language.other());
    }

    /// Translation for `key`, or the key itself when missing
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        self.language
            .table()
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .unwrap_or(key)
    }

    /// Translation with the first `{name}` of each param replaced
    pub fn t_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        let mut text = self.t(key).to_string();
        for (name, value) in params {
            text = text.replacen(&format!("{{{name}}}"), value, 1);
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn localizer(store: &MemoryPreferenceStore) -> Localizer {
        Localizer::new(Box::new(store.clone()))
    }

    #[test]
    fn test_default_is_zh() {
        let store = MemoryPreferenceStore::default();
        let l = localizer(&store);
        assert_eq!(l.language(), Language::Zh);
        assert_eq!(l.t("header.title"), "购买力地图");
    }

    #[test]
    fn test_stored_preference_applied() {
        let store = MemoryPreferenceStore::with_value("en");
        assert_eq!(localizer(&store).language(), Language::En);
    }

    #[test]
    fn test_unknown_token_ignored() {
        for token in ["fr", "EN", ""] {
            let store = MemoryPreferenceStore::with_value(token);
            assert_eq!(localizer(&store).language(), Language::Zh);
        }
    }

    #[test]
    fn test_set_language_persists() {
        let store = MemoryPreferenceStore::default();
        let mut l = localizer(&store);
        l.set_language(Language::En);
        assert_eq!(store.value().as_deref(), Some("en"));
        assert_eq!(l.t("item.pork"), "Pork");
        l.toggle();
        assert_eq!(store.value().as_deref(), Some("zh"));
        assert_eq!(localizer(&store).language(), Language::Zh);
    }

    #[test]
    fn test_missing_key_returns_key() {
        let l = localizer(&MemoryPreferenceStore::default());
        assert_eq!(l.t("no.such.key"), "no.such.key");
        assert_eq!(l.t_with("no.such.key", &[("wage", "9")]), "no.such.key");
    }

    #[test]
    fn test_param_substitution() {
        let mut l = localizer(&MemoryPreferenceStore::default());
        l.set_language(Language::En);
        assert_eq!(
            l.t_with("receipt.allocation", &[("pct", "40"), ("amount", "3.60")]),
            "Allocate 40% = ¥3.60"
        );
        // unknown params are ignored
        assert_eq!(l.t_with("item.rice", &[("x", "1")]), "Rice");
    }

    #[test]
    fn test_tables_share_keys() {
        assert_eq!(ZH.len(), EN.len());
        for (key, _) in ZH {
            assert!(EN.iter().any(|(k, _)| k == key), "{key} missing in en");
        }
    }

    #[test]
    fn test_file_store_roundtrip() {
        let path = std::env::temp_dir()
            .join(format!("survival-map-lang-{}", std::process::id()))
            .join("language");
        let mut store = FilePreferenceStore::new(&path);
        assert_eq!(store.load(), None);
        store.save("en").unwrap();
        assert_eq!(store.load().as_deref(), Some("en"));
        let l = Localizer::new(Box::new(FilePreferenceStore::new(&path)));
        assert_eq!(l.language(), Language::En);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
