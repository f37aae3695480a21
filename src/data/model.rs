use std::collections::HashSet;

// ---------------------------------------------------------------------------
// Source column names
// ---------------------------------------------------------------------------

pub const YEAR_COLUMN: &str = "AÑO";
pub const MONTH_COLUMN: &str = "Mes";
pub const COUNT_COLUMN: &str = "Farola";
pub const LATITUDE_COLUMN: &str = "Latitud";
pub const LONGITUDE_COLUMN: &str = "Longitud";

// ---------------------------------------------------------------------------
// IncidentRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single theft incident row.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentRecord {
    pub year: i32,
    pub month: String,
    /// Number of stolen units (`Farola`). `None` for an empty cell.
    pub count: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl IncidentRecord {
    /// Coordinates as `(lat, lon)` when both are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// IncidentTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed indices. Never mutated after
/// construction.
#[derive(Debug, Clone)]
pub struct IncidentTable {
    records: Vec<IncidentRecord>,
    /// Header names as they appeared in the source.
    column_names: Vec<String>,
    /// Whether the source carried both `Latitud` and `Longitud`.
    has_coordinates: bool,
    /// Unique years in first-appearance order.
    distinct_years: Vec<i32>,
    /// Unique month labels in first-appearance order.
    month_order: Vec<String>,
}

impl IncidentTable {
    /// Build the year and month indices from the loaded records.
    pub fn from_records(
        records: Vec<IncidentRecord>,
        column_names: Vec<String>,
        has_coordinates: bool,
    ) -> Self {
        let mut seen_years = HashSet::new();
        let mut seen_months = HashSet::new();
        let mut distinct_years = Vec::new();
        let mut month_order = Vec::new();

        for rec in &records {
            if seen_years.insert(rec.year) {
                distinct_years.push(rec.year);
            }
            if seen_months.insert(rec.month.as_str()) {
                month_order.push(rec.month.clone());
            }
        }

        IncidentTable {
            records,
            column_names,
            has_coordinates,
            distinct_years,
            month_order,
        }
    }

    pub fn records(&self) -> &[IncidentRecord] {
        &self.records
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn has_coordinates(&self) -> bool {
        self.has_coordinates
    }

    /// Distinct years in the order they first appear in the file (not sorted).
    pub fn distinct_years(&self) -> &[i32] {
        &self.distinct_years
    }

    /// Default filter selection: the first distinct year.
    pub fn default_selection(&self) -> Vec<i32> {
        self.distinct_years.first().copied().into_iter().collect()
    }

    /// Month labels in the order they first appear in the file.
    pub fn month_order(&self) -> &[String] {
        &self.month_order
    }

    /// Number of rows with both coordinates present.
    pub fn geocoded_len(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.coordinates().is_some())
            .count()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
