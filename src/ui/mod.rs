/// Presentation layer: the dashboard page and the JSON it renders.
///
/// * `handlers` – axum routes (page, year options, recomputed view)
/// * `plot`     – Plotly figure and table descriptors built from a view

pub mod handlers;
pub mod plot;
