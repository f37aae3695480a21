/// View layer: everything the dashboard shows for one year selection.
///
/// ```text
///   IncidentTable + selected years
///            │  filter
///            ▼
///      filtered rows ──► bars    (Farola per month × year)
///                   ├──► geo     (points per year + viewport)
///                   └──► counts  (rows per year)
/// ```

pub mod bars;
pub mod counts;
pub mod geo;

use crate::data::filter::{filter_rows, YearSelection};
use crate::data::model::IncidentTable;

use bars::{build_bar_series, BarSeries};
use counts::{build_count_table, CountTable};
use geo::{build_geo_layers, GeoLayers};

/// The three artifacts derived from one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub bars: BarSeries,
    pub map: GeoLayers,
    pub table: CountTable,
}

/// Recompute the dashboard for `selected_years`.
///
/// Pure: reads the table, never fails. Order of `selected_years` decides
/// map colours; empty or unknown selections give empty artifacts.
pub fn recompute(table: &IncidentTable, selected_years: &[i32]) -> DashboardView {
    let selection = YearSelection::from(selected_years);
    let rows = filter_rows(table, &selection);
    log::debug!(
        "Recomputing view for {:?}: {} of {} rows",
        selection.years(),
        rows.len(),
        table.len()
    );

    DashboardView {
        bars: build_bar_series(table, &rows),
        map: build_geo_layers(table, &rows, &selection),
        table: build_count_table(&rows),
    }
}
