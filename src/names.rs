//! Short region names to the canonical names used by the boundary dataset.

use log::debug;

/// Short name to full administrative name for every province-level division
pub const NAME_MAP: [(&str, &str); 34] = [
    ("北京", "北京市"),
    ("天津", "天津市"),
    ("上海", "上海市"),
    ("重庆", "重庆市"),
    ("河北", "河北省"),
    ("山西", "山西省"),
    ("辽宁", "辽宁省"),
    ("吉林", "吉林省"),
    ("黑龙江", "黑龙江省"),
    ("江苏", "江苏省"),
    ("浙江", "浙江省"),
    ("安徽", "安徽省"),
    ("福建", "福建省"),
    ("江西", "江西省"),
    ("山东", "山东省"),
    ("河南", "河南省"),
    ("湖北", "湖北省"),
    ("湖南", "湖南省"),
    ("广东", "广东省"),
    ("海南", "海南省"),
    ("四川", "四川省"),
    ("贵州", "贵州省"),
    ("云南", "云南省"),
    ("陕西", "陕西省"),
    ("甘肃", "甘肃省"),
    ("青海", "青海省"),
    ("台湾", "台湾省"),
    ("内蒙古", "内蒙古自治区"),
    ("广西", "广西壮族自治区"),
    ("西藏", "西藏自治区"),
    ("宁夏", "宁夏回族自治区"),
    ("新疆", "新疆维吾尔自治区"),
    ("香港", "香港特别行政区"),
    ("澳门", "澳门特别行政区"),
];

/// Full administrative name for a short name, if it is in the table
pub fn full_name(short_name: &str) -> Option<&'static str> {
    NAME_MAP
        .iter()
        .find(|(short, _)| *short == short_name)
        .map(|(_, full)| *full)
}

/// How a short name was matched against the canonical universe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Exact,
    Mapped,
    Prefix,
    Unresolved,
}

/// Resolve `short_name` against `universe`; first match wins:
/// exact member, mapped full name, first member with `short_name` as prefix.
/// Unresolved names come back unchanged.
pub fn resolve<S: AsRef<str>>(short_name: &str, universe: &[S]) -> (String, Resolution) {
    let contains = |name: &str| universe.iter().any(|u| u.as_ref() == name);

    if contains(short_name) {
        return (short_name.to_string(), Resolution::Exact);
    }

    if let Some(mapped) = full_name(short_name) {
        if contains(mapped) {
            return (mapped.to_string(), Resolution::Mapped);
        }
    }

    if let Some(prefixed) = universe.iter().find(|u| u.as_ref().starts_with(short_name)) {
        return (prefixed.as_ref().to_string(), Resolution::Prefix);
    }

    debug!("region name {short_name:?} not found in boundary dataset");
    (short_name.to_string(), Resolution::Unresolved)
}

/// Canonical boundary-dataset name for a short region name
pub fn to_canonical_name<S: AsRef<str>>(short_name: &str, universe: &[S]) -> String {
    resolve(short_name, universe).0
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIVERSE: [&str; 5] = ["北京市", "福建省", "内蒙古自治区", "新疆维吾尔自治区", "南海诸岛"];

    #[test]
    fn test_mapped_names() {
        assert_eq!(to_canonical_name("北京", &UNIVERSE), "北京市");
        assert_eq!(to_canonical_name("福建", &UNIVERSE), "福建省");
        assert_eq!(resolve("新疆", &UNIVERSE).1, Resolution::Mapped);
    }

    #[test]
    fn test_canonical_name_unchanged() {
        assert_eq!(resolve("北京市", &UNIVERSE), ("北京市".to_string(), Resolution::Exact));
    }

    #[test]
    fn test_prefix_fallback() {
        assert_eq!(resolve("南海", &UNIVERSE), ("南海诸岛".to_string(), Resolution::Prefix));
    }

    #[test]
    fn test_mapped_name_missing_from_universe_uses_prefix() {
        let universe = ["内蒙古"];
        assert_eq!(to_canonical_name("内蒙", &universe), "内蒙古");
    }

    #[test]
    fn test_unresolved_returns_input() {
        assert_eq!(resolve("火星", &UNIVERSE), ("火星".to_string(), Resolution::Unresolved));
        let empty: [&str; 0] = [];
        assert_eq!(to_canonical_name("北京", &empty), "北京");
    }

    #[test]
    fn test_table_covers_all_divisions() {
        assert_eq!(NAME_MAP.len(), 34);
        for (short, full) in NAME_MAP {
            assert!(full.starts_with(short));
        }
    }
}
