use crate::color::{qualitative_color, to_hex};
use crate::data::filter::YearSelection;
use crate::data::model::{IncidentRecord, IncidentTable};

// ---------------------------------------------------------------------------
// Map layers: one marker group per selected year
// ---------------------------------------------------------------------------

/// Map center used when the filtered rows carry no coordinates (Bogotá).
pub const FALLBACK_CENTER: (f64, f64) = (4.6097, -74.0817);
/// Fixed zoom level of the map.
pub const MAP_ZOOM: f64 = 10.0;
/// Marker diameter in pixels.
pub const MARKER_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    /// Farola value shown in the tooltip.
    pub count: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeoLayer {
    pub year: i32,
    pub label: String,
    pub color: String,
    pub points: Vec<GeoPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewport {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeoLayers {
    /// In selection order; later layers draw on top.
    pub layers: Vec<GeoLayer>,
    pub viewport: MapViewport,
}

impl GeoLayers {
    pub fn point_count(&self) -> usize {
        self.layers.iter().map(|l| l.points.len()).sum()
    }
}

#[cfg(test)]
impl GeoLayers {
    pub fn layer(&self, year: i32) -> Option<&GeoLayer> {
        self.layers.iter().find(|l| l.year == year)
    }
}

/// Build one layer per selected year from the geocoded subset of `rows`.
///
/// Colour comes from the year's position in `selection`, not its value, so
/// reordering the selection reassigns colours. A table without coordinate
/// columns yields no layers at all.
pub fn build_geo_layers(
    table: &IncidentTable,
    rows: &[&IncidentRecord],
    selection: &YearSelection,
) -> GeoLayers {
    let layers = if table.has_coordinates() {
        selection
            .years()
            .iter()
            .enumerate()
            .map(|(index, &year)| GeoLayer {
                year,
                label: year.to_string(),
                color: to_hex(qualitative_color(index)),
                points: rows
                    .iter()
                    .filter(|rec| rec.year == year)
                    .filter_map(|rec| {
                        let (lat, lon) = rec.coordinates()?;
                        Some(GeoPoint {
                            lat,
                            lon,
                            count: rec.count,
                        })
                    })
                    .collect(),
            })
            .collect()
    } else {
        Vec::new()
    };

    GeoLayers {
        layers,
        viewport: viewport(rows),
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Each axis is the mean of its own non-null values over all filtered rows,
/// falling back to [`FALLBACK_CENTER`] independently.
fn viewport(rows: &[&IncidentRecord]) -> MapViewport {
    MapViewport {
        center_lat: mean(rows.iter().filter_map(|r| r.latitude)).unwrap_or(FALLBACK_CENTER.0),
        center_lon: mean(rows.iter().filter_map(|r| r.longitude)).unwrap_or(FALLBACK_CENTER.1),
        zoom: MAP_ZOOM,
    }
}
