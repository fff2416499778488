use crate::model::record::EnrichedRecord;

/// Marker shown wherever a statistic has no value (empty dataset)
pub const NOT_AVAILABLE: &str = "—";

/// A region's name and index at one end of the ranking
#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub name: String,
    pub real_index: f64,
}

impl Standing {
    fn of(record: &EnrichedRecord) -> Self {
        Self {
            name: record.name.clone(),
            real_index: record.real_index,
        }
    }
}

/// Headline statistics over the full record set
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub best: Option<Standing>,
    pub worst: Option<Standing>,
    /// `None` for an empty set; never NaN
    pub mean_index: Option<f64>,
}

/// Format an optional index with two decimals, or the NOT-AVAILABLE marker
pub fn format_index(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Records ordered by real index, best first
#[derive(Debug, Clone, PartialEq)]
pub struct RankedView {
    descending: Vec<EnrichedRecord>,
    summary: Summary,
}

impl RankedView {
    /// Full descending order
    pub fn descending(&self) -> &[EnrichedRecord] {
        &self.descending
    }

    /// First `n` of the descending order
    pub fn top_n(&self, n: usize) -> &[EnrichedRecord] {
        &self.descending[..n.min(self.descending.len())]
    }

    /// Last `n` of the descending order, reversed so index 0 is the worst
    pub fn bottom_n(&self, n: usize) -> Vec<&EnrichedRecord> {
        let start = self.descending.len().saturating_sub(n);
        self.descending[start..].iter().rev().collect()
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Look up a record by short name
    pub fn get(&self, name: &str) -> Option<&EnrichedRecord> {
        self.descending.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.descending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descending.is_empty()
    }
}

/// Sort by `real_index` descending. The sort is stable: equal indices keep
/// their input order, so table positions are identical across reloads.
pub fn rank(records: &[EnrichedRecord]) -> RankedView {
    let mut descending = records.to_vec();
    descending.sort_by(|a, b| sort_key(b).total_cmp(&sort_key(a)));

    let mean_index = if descending.is_empty() {
        None
    } else {
        let total: f64 = descending.iter().map(|r| r.real_index).sum();
        Some(total / descending.len() as f64)
    };

    let summary = Summary {
        count: descending.len(),
        best: descending.first().map(Standing::of),
        worst: descending.last().map(Standing::of),
        mean_index,
    };

    RankedView { descending, summary }
}

/// Adding 0.0 folds -0.0 into 0.0 so the two tie
fn sort_key(record: &EnrichedRecord) -> f64 {
    record.real_index + 0.0
}
