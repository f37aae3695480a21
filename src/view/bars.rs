use std::collections::{BTreeSet, HashMap, HashSet};

use crate::color::{sequential_color, to_hex};
use crate::data::model::{IncidentRecord, IncidentTable};

// ---------------------------------------------------------------------------
// Grouped bar chart: Farola summed per (month, year)
// ---------------------------------------------------------------------------

/// One year's bars, aligned month by month.
#[derive(Debug, Clone, PartialEq)]
pub struct BarTrace {
    pub year: i32,
    /// `#rrggbb`, positioned on the sequential scale by the year's value.
    pub color: String,
    pub months: Vec<String>,
    pub totals: Vec<f64>,
}

/// Bars clustered by month and keyed by year.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarSeries {
    /// Category axis: months present in the rows, in file order.
    pub months: Vec<String>,
    /// One trace per year present, ascending.
    pub traces: Vec<BarTrace>,
}

impl BarSeries {
    /// Number of bars across all traces.
    pub fn bar_count(&self) -> usize {
        self.traces.iter().map(|t| t.totals.len()).sum()
    }
}

#[cfg(test)]
impl BarSeries {
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    /// Height of the bar for `(month, year)`, if there is one.
    pub fn total(&self, month: &str, year: i32) -> Option<f64> {
        let trace = self.traces.iter().find(|t| t.year == year)?;
        let pos = trace.months.iter().position(|m| m == month)?;
        trace.totals.get(pos).copied()
    }
}

/// Group `rows` by `(month, year)` and sum their counts. Null counts add
/// nothing but still make the group exist.
pub fn build_bar_series(table: &IncidentTable, rows: &[&IncidentRecord]) -> BarSeries {
    let mut totals: HashMap<(&str, i32), f64> = HashMap::new();
    let mut years = BTreeSet::new();
    let mut present_months = HashSet::new();

    for rec in rows {
        *totals.entry((rec.month.as_str(), rec.year)).or_default() += rec.count.unwrap_or(0.0);
        years.insert(rec.year);
        present_months.insert(rec.month.as_str());
    }

    let months: Vec<String> = table
        .month_order()
        .iter()
        .filter(|m| present_months.contains(m.as_str()))
        .cloned()
        .collect();

    let (min, max) = match (years.first(), years.last()) {
        (Some(&lo), Some(&hi)) => (lo, hi),
        _ => return BarSeries::default(),
    };
    // Widened: the i32 difference can overflow.
    let span = f64::from(max) - f64::from(min);

    let traces = years
        .iter()
        .map(|&year| {
            let t = if span > 0.0 {
                ((f64::from(year) - f64::from(min)) / span) as f32
            } else {
                0.0
            };
            let mut trace = BarTrace {
                year,
                color: to_hex(sequential_color(t)),
                months: Vec::new(),
                totals: Vec::new(),
            };
            for month in &months {
                if let Some(&total) = totals.get(&(month.as_str(), year)) {
                    trace.months.push(month.clone());
                    trace.totals.push(total);
                }
            }
            trace
        })
        .collect();

    BarSeries { months, traces }
}
