use crate::model::enrich::enrich_all;
use crate::model::rank::{rank, RankedView};
use crate::model::record::{EnrichedRecord, RegionRecord};

/// Session cache of enriched records and the ranking derived from them.
/// Records are enriched once on construction; supplying a new raw dataset
/// re-derives everything.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<EnrichedRecord>,
    ranked: RankedView,
}

impl Dataset {
    pub fn new(raw: &[RegionRecord]) -> Self {
        let records = enrich_all(raw);
        let ranked = rank(&records);
        Self { records, ranked }
    }

    /// Replace the underlying dataset and recompute the ranking
    pub fn replace(&mut self, raw: &[RegionRecord]) {
        *self = Self::new(raw);
    }

    /// Enriched records in input order
    pub fn records(&self) -> &[EnrichedRecord] {
        &self.records
    }

    pub fn ranked(&self) -> &RankedView {
        &self.ranked
    }

    pub fn get(&self, name: &str) -> Option<&EnrichedRecord> {
        self.records.iter().find(|r| r.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_rederives() {
        let mut ds = Dataset::new(&[RegionRecord::new("上海", 24.0, 19.2, 1.25)]);
        assert_eq!(ds.get("上海").map(|r| r.real_index), Some(0.56));

        ds.replace(&[
            RegionRecord::new("上海", 25.0, 19.2, 1.25),
            RegionRecord::new("辽宁", 19.0, 13.0, 1.46),
        ]);
        assert_eq!(ds.records().len(), 2);
        assert_eq!(ds.get("上海").map(|r| r.real_wage), Some(11.25));
        assert_eq!(ds.ranked().summary().best.as_ref().map(|b| b.name.as_str()), Some("辽宁"));
    }
}
