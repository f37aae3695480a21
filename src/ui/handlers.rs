use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;
use crate::ui::plot::view_payload;
use crate::view::recompute;

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

const INDEX_HTML: &str = include_str!("../../assets/index.html");

pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn healthz_handler() -> &'static str {
    "ok"
}

// ---------------------------------------------------------------------------
// Error body
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": { "code": self.code, "message": self.message }
        }));
        (self.status, body).into_response()
    }
}

// ---------------------------------------------------------------------------
// Filter control
// ---------------------------------------------------------------------------

/// Options for the year control and its initial selection.
pub async fn years_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "years": state.table.distinct_years(),
        "default": state.table.default_selection(),
    }))
}

// ---------------------------------------------------------------------------
// Recomputation
// ---------------------------------------------------------------------------

/// Parse `2023,2024` keeping the given order. Blank means no years.
fn parse_years(raw: &str) -> Result<Vec<i32>, ApiError> {
    raw.split(',')
        .map(str::trim)
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            tok.parse::<i32>().map_err(|_| {
                ApiError::bad_request("invalid_year", format!("'{tok}' is not a year"))
            })
        })
        .collect()
}

/// `GET /api/view?years=2023,2024` → bar chart, map and table.
pub async fn view_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let years = parse_years(params.get("years").map(String::as_str).unwrap_or(""))?;
    let view = recompute(&state.table, &years);
    log::debug!(
        "View for {years:?}: {} bars, {} points, {} rows",
        view.bars.bar_count(),
        view.map.point_count(),
        view.table.total()
    );
    Ok(Json(view_payload(&view)))
}

// ---------------------------------------------------------------------------
// Debug
// ---------------------------------------------------------------------------

/// Dataset summary; only routed in debug mode.
pub async fn debug_dataset_handler(State(state): State<AppState>) -> Json<Value> {
    let table = &state.table;
    Json(json!({
        "source": state.config.data_path.display().to_string(),
        "rows": table.len(),
        "geocoded_rows": table.geocoded_len(),
        "has_coordinates": table.has_coordinates(),
        "columns": table.column_names(),
        "years": table.distinct_years(),
        "months": table.month_order(),
    }))
}
