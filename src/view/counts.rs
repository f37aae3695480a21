use std::collections::BTreeMap;

use crate::data::model::IncidentRecord;

// ---------------------------------------------------------------------------
// Summary table: raw row count per year
// ---------------------------------------------------------------------------

/// Rows shown per page by the front end.
pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearCount {
    pub year: i32,
    /// Number of rows, not the sum of `Farola`.
    pub incidents: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountTable {
    /// Ascending by year.
    pub rows: Vec<YearCount>,
}

impl CountTable {
    /// Sum over all entries; equals the number of filtered rows.
    pub fn total(&self) -> usize {
        self.rows.iter().map(|r| r.incidents).sum()
    }
}

#[cfg(test)]
impl CountTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, year: i32) -> Option<usize> {
        self.rows
            .iter()
            .find(|r| r.year == year)
            .map(|r| r.incidents)
    }
}

pub fn build_count_table(rows: &[&IncidentRecord]) -> CountTable {
    let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();
    for rec in rows {
        *by_year.entry(rec.year).or_default() += 1;
    }
    CountTable {
        rows: by_year
            .into_iter()
            .map(|(year, incidents)| YearCount { year, incidents })
            .collect(),
    }
}
