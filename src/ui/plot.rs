use serde_json::{json, Value};

use crate::view::bars::BarSeries;
use crate::view::counts::{CountTable, PAGE_SIZE};
use crate::view::geo::{GeoLayers, MARKER_SIZE};
use crate::view::DashboardView;

// ---------------------------------------------------------------------------
// Plotly figure descriptors
// ---------------------------------------------------------------------------

pub const BAR_TITLE: &str = "Hurtos de Luminarias por Mes";
const MAP_STYLE: &str = "open-street-map";
const MAP_HEIGHT: u32 = 600;
const HOVER_TEMPLATE: &str = "<b>Año:</b> %{fullData.name}<br>\
                              <b>Cantidad:</b> %{hovertext}<br>\
                              <b>Latitud:</b> %{lat:.4f}<br>\
                              <b>Longitud:</b> %{lon:.4f}<extra></extra>";

/// Grouped bar chart: one trace per year, months on the x axis.
pub fn bar_figure(bars: &BarSeries) -> Value {
    let traces: Vec<Value> = bars
        .traces
        .iter()
        .map(|trace| {
            json!({
                "type": "bar",
                "name": trace.year.to_string(),
                "x": trace.months,
                "y": trace.totals,
                "marker": { "color": trace.color },
            })
        })
        .collect();

    json!({
        "data": traces,
        "layout": {
            "title": { "text": BAR_TITLE },
            "barmode": "group",
            "xaxis": {
                "title": { "text": "Mes" },
                "type": "category",
                "categoryorder": "array",
                "categoryarray": bars.months,
            },
            "yaxis": { "title": { "text": "Farola" } },
            "legend": { "title": { "text": "AÑO" } },
        },
    })
}

/// Scatter map: one marker layer per selected year.
pub fn map_figure(map: &GeoLayers) -> Value {
    let traces: Vec<Value> = map
        .layers
        .iter()
        .map(|layer| {
            let lat: Vec<f64> = layer.points.iter().map(|p| p.lat).collect();
            let lon: Vec<f64> = layer.points.iter().map(|p| p.lon).collect();
            let hover: Vec<Option<f64>> = layer.points.iter().map(|p| p.count).collect();
            json!({
                "type": "scattermapbox",
                "mode": "markers",
                "name": layer.label,
                "lat": lat,
                "lon": lon,
                "hovertext": hover,
                "hovertemplate": HOVER_TEMPLATE,
                "marker": { "size": MARKER_SIZE, "color": layer.color },
            })
        })
        .collect();

    json!({
        "data": traces,
        "layout": {
            "mapbox": {
                "style": MAP_STYLE,
                "center": {
                    "lat": map.viewport.center_lat,
                    "lon": map.viewport.center_lon,
                },
                "zoom": map.viewport.zoom,
            },
            "margin": { "r": 0, "t": 30, "l": 0, "b": 0 },
            "height": MAP_HEIGHT,
            "showlegend": true,
            "legend": { "yanchor": "top", "y": 0.99, "xanchor": "left", "x": 0.01 },
            "uirevision": true,
            "dragmode": "zoom",
        },
    })
}

/// Two-column table, paged client side.
pub fn table_descriptor(table: &CountTable) -> Value {
    let rows: Vec<Value> = table
        .rows
        .iter()
        .map(|r| json!({ "year": r.year, "incidents": r.incidents }))
        .collect();

    json!({
        "columns": [
            { "id": "year", "name": "Año", "type": "numeric" },
            { "id": "incidents", "name": "Cantidad de Hurtos", "type": "numeric" },
        ],
        "rows": rows,
        "page_size": PAGE_SIZE,
    })
}

/// Response body for one recomputation.
pub fn view_payload(view: &DashboardView) -> Value {
    json!({
        "bar_chart": bar_figure(&view.bars),
        "map": map_figure(&view.map),
        "table": table_descriptor(&view.table),
    })
}
