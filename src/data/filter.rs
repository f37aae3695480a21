use super::model::{IncidentRecord, IncidentTable};

// ---------------------------------------------------------------------------
// Year selection: which years the user picked, in pick order
// ---------------------------------------------------------------------------

/// Ordered set of selected years.
///
/// Order matters downstream: a year's position decides its map colour and
/// its layer's draw order. Repeated years collapse onto their first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearSelection {
    years: Vec<i32>,
}

impl YearSelection {
    pub fn new<I: IntoIterator<Item = i32>>(years: I) -> Self {
        let mut selected = Vec::new();
        for year in years {
            if !selected.contains(&year) {
                selected.push(year);
            }
        }
        YearSelection { years: selected }
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn contains(&self, year: i32) -> bool {
        self.years.contains(&year)
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

impl From<&[i32]> for YearSelection {
    fn from(years: &[i32]) -> Self {
        YearSelection::new(years.iter().copied())
    }
}

/// Rows whose year is selected, in table order.
///
/// * Empty selection → no rows.
/// * A selected year absent from the table contributes nothing.
pub fn filter_rows<'a>(
    table: &'a IncidentTable,
    selection: &YearSelection,
) -> Vec<&'a IncidentRecord> {
    if selection.is_empty() {
        return Vec::new();
    }
    table
        .records()
        .iter()
        .filter(|rec| selection.contains(rec.year))
        .collect()
}
