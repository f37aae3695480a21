use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::{cast, cast_with_options, CastOptions};
use arrow::datatypes::{DataType, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{
    IncidentRecord, IncidentTable, COUNT_COLUMN, LATITUDE_COLUMN, LONGITUDE_COLUMN, MONTH_COLUMN,
    YEAR_COLUMN,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Anything that keeps the dataset from loading. Fatal at startup.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}, column '{column}': {reason}")]
    Malformed {
        row: usize,
        column: &'static str,
        reason: String,
    },
    #[error("dataset contains no rows")]
    Empty,
    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("Arrow: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

type Result<T> = std::result::Result<T, DataLoadError>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the incident table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.tsv` / `.txt` – header row, `,` `;` or tab delimited
/// * `.json`    – `[{ "AÑO": 2023, "Mes": "Enero", "Farola": 2, ... }, ...]`
/// * `.parquet` – flat columns with the same names
///
/// Required columns are `AÑO`, `Mes` and `Farola`; `Latitud` / `Longitud`
/// are optional.
pub fn load_file(path: &Path) -> Result<IncidentTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" | "tsv" | "txt" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataLoadError::UnsupportedFormat(other.to_string())),
    };

    if table.is_empty() {
        return Err(DataLoadError::Empty);
    }
    log::info!(
        "Loaded {} incidents from {} ({} geocoded, years {:?})",
        table.len(),
        path.display(),
        table.geocoded_len(),
        table.distinct_years()
    );
    Ok(table)
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Cell parsing shared by all formats
// ---------------------------------------------------------------------------

/// Tokens treated as an empty cell.
fn is_missing(s: &str) -> bool {
    matches!(s, "" | "NaN" | "nan" | "NA" | "N/A" | "null" | "NULL" | "None")
}

fn malformed(row: usize, column: &'static str, reason: impl Into<String>) -> DataLoadError {
    DataLoadError::Malformed {
        row,
        column,
        reason: reason.into(),
    }
}

/// Accept `2023` as well as `2023.0`, which is how float-typed exports write years.
fn year_from_f64(v: f64, row: usize) -> Result<i32> {
    if v.is_finite() && v.fract() == 0.0 && v >= i32::MIN as f64 && v <= i32::MAX as f64 {
        Ok(v as i32)
    } else {
        Err(malformed(row, YEAR_COLUMN, format!("'{v}' is not a year")))
    }
}

fn parse_year(raw: &str, row: usize) -> Result<i32> {
    if is_missing(raw) {
        return Err(malformed(row, YEAR_COLUMN, "missing value"));
    }
    if let Ok(y) = raw.parse::<i32>() {
        return Ok(y);
    }
    match raw.parse::<f64>() {
        Ok(v) => year_from_f64(v, row),
        Err(_) => Err(malformed(row, YEAR_COLUMN, format!("'{raw}' is not a year"))),
    }
}

fn parse_month(raw: &str, row: usize) -> Result<String> {
    if is_missing(raw) {
        return Err(malformed(row, MONTH_COLUMN, "missing value"));
    }
    Ok(raw.to_string())
}

fn parse_count(raw: &str, row: usize) -> Result<Option<f64>> {
    if is_missing(raw) {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| malformed(row, COUNT_COLUMN, format!("'{raw}' is not a number")))
}

fn parse_coordinate(raw: Option<&str>, row: usize, column: &'static str) -> Option<f64> {
    let raw = raw?;
    if is_missing(raw) {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("Row {row}: dropping unparsable {column} '{raw}'");
            None
        }
    }
}

/// Drop coordinates that cannot be placed on a map. A bad value is a data
/// quality issue, never a load failure.
fn checked_coordinates(
    latitude: Option<f64>,
    longitude: Option<f64>,
    row: usize,
) -> (Option<f64>, Option<f64>) {
    let lat = latitude.filter(|v| {
        let ok = v.is_finite() && (-90.0..=90.0).contains(v);
        if !ok {
            log::warn!("Row {row}: dropping out-of-range {LATITUDE_COLUMN} {v}");
        }
        ok
    });
    let lon = longitude.filter(|v| {
        let ok = v.is_finite() && (-180.0..=180.0).contains(v);
        if !ok {
            log::warn!("Row {row}: dropping out-of-range {LONGITUDE_COLUMN} {v}");
        }
        ok
    });
    (lat, lon)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Decode as UTF-8, falling back to Latin-1 (common for spreadsheet exports),
/// and drop a leading byte-order mark.
fn decode_text(bytes: Vec<u8>, path: &Path) -> String {
    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("{} is not valid UTF-8, decoding as Latin-1", path.display());
            e.into_bytes().iter().map(|&b| b as char).collect()
        }
    };
    if text.starts_with('\u{feff}') {
        text['\u{feff}'.len_utf8()..].to_string()
    } else {
        text
    }
}

/// Pick the delimiter that occurs most often in the header line.
fn sniff_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or("");
    let mut best = b',';
    let mut best_count = header.matches(',').count();
    for candidate in [b';', b'\t'] {
        let n = header.matches(candidate as char).count();
        if n > best_count {
            best = candidate;
            best_count = n;
        }
    }
    best
}

/// CSV layout: header row with column names, one incident per line.
fn load_csv(path: &Path) -> Result<IncidentTable> {
    let text = decode_text(read_bytes(path)?, path);
    let delimiter = sniff_delimiter(&text);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let find = |name: &str| headers.iter().position(|h| h == name);
    let year_idx = find(YEAR_COLUMN).ok_or(DataLoadError::MissingColumn(YEAR_COLUMN))?;
    let month_idx = find(MONTH_COLUMN).ok_or(DataLoadError::MissingColumn(MONTH_COLUMN))?;
    let count_idx = find(COUNT_COLUMN).ok_or(DataLoadError::MissingColumn(COUNT_COLUMN))?;
    let lat_idx = find(LATITUDE_COLUMN);
    let lon_idx = find(LONGITUDE_COLUMN);

    let mut records = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let row = i + 1;

        let year = parse_year(record.get(year_idx).unwrap_or(""), row)?;
        let month = parse_month(record.get(month_idx).unwrap_or(""), row)?;
        let count = parse_count(record.get(count_idx).unwrap_or(""), row)?;
        let latitude = parse_coordinate(lat_idx.and_then(|j| record.get(j)), row, LATITUDE_COLUMN);
        let longitude =
            parse_coordinate(lon_idx.and_then(|j| record.get(j)), row, LONGITUDE_COLUMN);
        let (latitude, longitude) = checked_coordinates(latitude, longitude, row);

        records.push(IncidentRecord {
            year,
            month,
            count,
            latitude,
            longitude,
        });
    }

    let has_coordinates = lat_idx.is_some() && lon_idx.is_some();
    Ok(IncidentTable::from_records(records, headers, has_coordinates))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "AÑO": 2023, "Mes": "Enero", "Farola": 2, "Latitud": 4.61, "Longitud": -74.08 },
///   ...
/// ]
/// ```
static JSON_NULL: JsonValue = JsonValue::Null;

fn load_json(path: &Path) -> Result<IncidentTable> {
    let bytes = read_bytes(path)?;
    let root: JsonValue = serde_json::from_slice(&bytes)?;

    let rows = root
        .as_array()
        .ok_or_else(|| malformed(0, YEAR_COLUMN, "expected a top-level JSON array of records"))?;

    // Union of keys across rows stands in for the header.
    let mut columns: BTreeSet<&str> = BTreeSet::new();
    for (i, rec) in rows.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| malformed(i + 1, YEAR_COLUMN, "row is not a JSON object"))?;
        columns.extend(obj.keys().map(String::as_str));
    }
    for required in [YEAR_COLUMN, MONTH_COLUMN, COUNT_COLUMN] {
        if !columns.contains(required) {
            return Err(DataLoadError::MissingColumn(required));
        }
    }
    let has_coordinates = columns.contains(LATITUDE_COLUMN) && columns.contains(LONGITUDE_COLUMN);
    let column_names: Vec<String> = columns.iter().map(|c| c.to_string()).collect();

    let mut records = Vec::with_capacity(rows.len());
    for (i, rec) in rows.iter().enumerate() {
        let row = i + 1;
        let cell = |name: &str| rec.get(name).unwrap_or(&JSON_NULL);

        let year = match cell(YEAR_COLUMN) {
            JsonValue::Number(n) => match n.as_i64() {
                Some(v) => i32::try_from(v)
                    .map_err(|_| malformed(row, YEAR_COLUMN, format!("'{v}' is not a year")))?,
                None => year_from_f64(n.as_f64().unwrap_or(f64::NAN), row)?,
            },
            JsonValue::String(s) => parse_year(s.trim(), row)?,
            JsonValue::Null => return Err(malformed(row, YEAR_COLUMN, "missing value")),
            other => return Err(malformed(row, YEAR_COLUMN, format!("'{other}' is not a year"))),
        };
        let month = match cell(MONTH_COLUMN) {
            JsonValue::String(s) => parse_month(s.trim(), row)?,
            JsonValue::Null => return Err(malformed(row, MONTH_COLUMN, "missing value")),
            other => other.to_string(),
        };
        let count = match cell(COUNT_COLUMN) {
            JsonValue::Number(n) => n.as_f64(),
            JsonValue::String(s) => parse_count(s.trim(), row)?,
            JsonValue::Null => None,
            other => {
                return Err(malformed(row, COUNT_COLUMN, format!("'{other}' is not a number")))
            }
        };
        let coordinate = |name: &'static str| json_coordinate(cell(name), row, name);
        let (latitude, longitude) =
            checked_coordinates(coordinate(LATITUDE_COLUMN), coordinate(LONGITUDE_COLUMN), row);

        records.push(IncidentRecord {
            year,
            month,
            count,
            latitude,
            longitude,
        });
    }

    Ok(IncidentTable::from_records(
        records,
        column_names,
        has_coordinates,
    ))
}

fn json_coordinate(value: &JsonValue, row: usize, column: &'static str) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => parse_coordinate(Some(s.trim()), row, column),
        JsonValue::Null => None,
        other => {
            log::warn!("Row {row}: dropping non-numeric {column} {other}");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Safe cast to `Float64`: unparsable cells become null instead of failing.
/// Each cell nulled by the cast is logged; returns the cast column and how
/// many cells were dropped.
fn lenient_float_column(
    column: &ArrayRef,
    name: &'static str,
    first_row: usize,
) -> Result<(ArrayRef, usize)> {
    let floats = cast(column, &DataType::Float64)?;
    if floats.null_count() == column.null_count() {
        return Ok((floats, 0));
    }
    let mut dropped = 0;
    for i in 0..column.len() {
        if column.is_valid(i) && floats.is_null(i) {
            log::warn!("Row {}: dropping unparsable {name}", first_row + i);
            dropped += 1;
        }
    }
    Ok((floats, dropped))
}

/// Load a Parquet file with flat incident columns.
///
/// Numeric columns may be any integer or float type; `Mes` is anything that
/// casts to a string. Works with files written by **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<IncidentTable> {
    let file = std::fs::File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let schema = Arc::clone(builder.schema());
    let column_names: Vec<String> = schema.fields().iter().map(|f| f.name().clone()).collect();
    for required in [YEAR_COLUMN, MONTH_COLUMN, COUNT_COLUMN] {
        if schema.index_of(required).is_err() {
            return Err(DataLoadError::MissingColumn(required));
        }
    }
    let has_coordinates =
        schema.index_of(LATITUDE_COLUMN).is_ok() && schema.index_of(LONGITUDE_COLUMN).is_ok();

    let reader = builder.build()?;
    let strict = CastOptions {
        safe: false,
        ..Default::default()
    };

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let column = |name: &str| batch.column_by_name(name).cloned();

        let years = cast_with_options(
            &column(YEAR_COLUMN).ok_or(DataLoadError::MissingColumn(YEAR_COLUMN))?,
            &DataType::Float64,
            &strict,
        )?;
        let months = cast(
            &column(MONTH_COLUMN).ok_or(DataLoadError::MissingColumn(MONTH_COLUMN))?,
            &DataType::Utf8,
        )?;
        let counts = cast_with_options(
            &column(COUNT_COLUMN).ok_or(DataLoadError::MissingColumn(COUNT_COLUMN))?,
            &DataType::Float64,
            &strict,
        )?;
        let first_row = records.len() + 1;
        let lats = match column(LATITUDE_COLUMN) {
            Some(c) => Some(lenient_float_column(&c, LATITUDE_COLUMN, first_row)?.0),
            None => None,
        };
        let lons = match column(LONGITUDE_COLUMN) {
            Some(c) => Some(lenient_float_column(&c, LONGITUDE_COLUMN, first_row)?.0),
            None => None,
        };

        let years = years.as_primitive::<Float64Type>();
        let months = months.as_string::<i32>();
        let counts = counts.as_primitive::<Float64Type>();
        let lats = lats.as_ref().map(|a| a.as_primitive::<Float64Type>());
        let lons = lons.as_ref().map(|a| a.as_primitive::<Float64Type>());

        let optional = |arr: Option<&arrow::array::Float64Array>, i: usize| {
            arr.filter(|a| a.is_valid(i)).map(|a| a.value(i))
        };

        for i in 0..batch.num_rows() {
            let row = records.len() + 1;

            if years.is_null(i) {
                return Err(malformed(row, YEAR_COLUMN, "missing value"));
            }
            let year = year_from_f64(years.value(i), row)?;
            if months.is_null(i) {
                return Err(malformed(row, MONTH_COLUMN, "missing value"));
            }
            let month = parse_month(months.value(i).trim(), row)?;
            let count = counts.is_valid(i).then(|| counts.value(i));
            let (latitude, longitude) =
                checked_coordinates(optional(lats, i), optional(lons, i), row);

            records.push(IncidentRecord {
                year,
                month,
                count,
                latitude,
                longitude,
            });
        }
    }

    Ok(IncidentTable::from_records(
        records,
        column_names,
        has_coordinates,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).expect("create fixture");
        f.write_all(contents).expect("write fixture");
        path
    }

    #[test]
    fn loads_comma_csv_with_optional_coordinates() {
        let dir = tempdir().expect("tempdir");
        let path = write_file(
            dir.path(),
            "hurtos.csv",
            "AÑO,Mes,Farola,Latitud,Longitud\n\
             2022,Enero,3,,\n\
             2022,Enero,2,,\n\
             2023,Enero,1,4.6,-74.1\n"
                .as_bytes(),
        );
        let table = load_file(&path).expect("load csv");
        assert_eq!(table.len(), 3);
        assert!(table.has_coordinates());
        assert_eq!(table.distinct_years(), &[2022, 2023]);
        assert_eq!(table.records()[2].coordinates(), Some((4.6, -74.1)));
        assert_eq!(table.records()[0].coordinates(), None);
    }

    #[test]
    fn sniffs_semicolons_and_strips_bom() {
        let dir = tempdir().expect("tempdir");
        let path = write_file(
            dir.path(),
            "hurtos.csv",
            "\u{feff}AÑO;Mes;Farola\n2024;Marzo;7\n".as_bytes(),
        );
        let table = load_file(&path).expect("load csv");
        assert_eq!(table.records()[0].count, Some(7.0));
        assert_eq!(table.records()[0].month, "Marzo");
        assert!(!table.has_coordinates());
    }

    #[test]
    fn decodes_latin1_headers() {
        let dir = tempdir().expect("tempdir");
        // "AÑO" with Ñ as the single Latin-1 byte 0xD1.
        let mut bytes = b"A\xd1O,Mes,Farola\n".to_vec();
        bytes.extend_from_slice(b"2022,Enero,1\n");
        let path = write_file(dir.path(), "latin.csv", &bytes);
        let table = load_file(&path).expect("load latin-1 csv");
        assert_eq!(table.distinct_years(), &[2022]);
    }

    #[test]
    fn float_years_are_accepted() {
        let dir = tempdir().expect("tempdir");
        let path = write_file(dir.path(), "f.csv", "AÑO,Mes,Farola\n2023.0,Mayo,1.5\n".as_bytes());
        let table = load_file(&path).expect("load csv");
        assert_eq!(table.records()[0].year, 2023);
        assert_eq!(table.records()[0].count, Some(1.5));
    }

    #[test]
    fn bad_coordinates_are_dropped_not_fatal() {
        let dir = tempdir().expect("tempdir");
        let path = write_file(
            dir.path(),
            "bad.csv",
            b"A\xc3\x91O,Mes,Farola,Latitud,Longitud\n2022,Enero,1,abc,-74.1\n2022,Enero,1,95.0,-74.1\n2022,Enero,1,4.6,-74.1\n",
        );
        let table = load_file(&path).expect("load csv");
        assert_eq!(table.len(), 3);
        assert_eq!(table.records()[0].latitude, None);
        assert_eq!(table.records()[1].latitude, None);
        assert_eq!(table.geocoded_len(), 1);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().expect("tempdir");
        let err = load_file(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
    }

    #[test]
    fn missing_required_column_is_reported() {
        let dir = tempdir().expect("tempdir");
        let path = write_file(dir.path(), "x.csv", b"A\xc3\x91O,Mes\n2022,Enero\n");
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn("Farola")));
    }

    #[test]
    fn unparsable_year_is_malformed() {
        let dir = tempdir().expect("tempdir");
        let path = write_file(dir.path(), "x.csv", b"A\xc3\x91O,Mes,Farola\ndos mil,Enero,1\n");
        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::Malformed {
                row: 1,
                column: "AÑO",
                ..
            }
        ));
    }

    #[test]
    fn non_numeric_count_is_malformed() {
        let dir = tempdir().expect("tempdir");
        let path = write_file(dir.path(), "x.csv", b"A\xc3\x91O,Mes,Farola\n2022,Enero,muchas\n");
        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::Malformed {
                column: "Farola",
                ..
            }
        ));
    }

    #[test]
    fn header_only_file_is_empty() {
        let dir = tempdir().expect("tempdir");
        let path = write_file(dir.path(), "x.csv", b"A\xc3\x91O,Mes,Farola\n");
        assert!(matches!(load_file(&path), Err(DataLoadError::Empty)));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = tempdir().expect("tempdir");
        let path = write_file(dir.path(), "x.xlsx", b"");
        assert!(matches!(
            load_file(&path),
            Err(DataLoadError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn loads_json_records() {
        let dir = tempdir().expect("tempdir");
        let path = write_file(
            dir.path(),
            "hurtos.json",
            r#"[
                {"AÑO": 2023, "Mes": "Enero", "Farola": 4, "Latitud": 4.61, "Longitud": -74.08},
                {"AÑO": "2024", "Mes": "Febrero", "Farola": null, "Latitud": null, "Longitud": null}
            ]"#
            .as_bytes(),
        );
        let table = load_file(&path).expect("load json");
        assert_eq!(table.distinct_years(), &[2023, 2024]);
        assert!(table.has_coordinates());
        assert_eq!(table.records()[0].coordinates(), Some((4.61, -74.08)));
        assert_eq!(table.records()[1].count, None);
    }

    #[test]
    fn json_without_month_column_fails() {
        let dir = tempdir().expect("tempdir");
        let path = write_file(dir.path(), "x.json", r#"[{"AÑO": 2023, "Farola": 1}]"#.as_bytes());
        assert!(matches!(
            load_file(&path),
            Err(DataLoadError::MissingColumn("Mes"))
        ));
    }

    #[test]
    fn loads_parquet_columns() {
        use arrow::array::{Float64Array, Int64Array, StringArray};
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new(YEAR_COLUMN, DataType::Int64, false),
            Field::new(MONTH_COLUMN, DataType::Utf8, false),
            Field::new(COUNT_COLUMN, DataType::Int64, true),
            Field::new(LATITUDE_COLUMN, DataType::Float64, true),
            Field::new(LONGITUDE_COLUMN, DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![2022, 2023])),
                Arc::new(StringArray::from(vec!["Enero", "Febrero"])),
                Arc::new(Int64Array::from(vec![Some(3), None])),
                Arc::new(Float64Array::from(vec![None, Some(4.6)])),
                Arc::new(Float64Array::from(vec![None, Some(-74.1)])),
            ],
        )
        .expect("record batch");

        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("hurtos.parquet");
        let file = std::fs::File::create(&path).expect("create parquet");
        let mut writer = ArrowWriter::try_new(file, schema, None).expect("writer");
        writer.write(&batch).expect("write batch");
        writer.close().expect("close writer");

        let table = load_file(&path).expect("load parquet");
        assert_eq!(table.distinct_years(), &[2022, 2023]);
        assert_eq!(table.records()[0].count, Some(3.0));
        assert_eq!(table.records()[1].count, None);
        assert_eq!(table.records()[1].coordinates(), Some((4.6, -74.1)));
        assert_eq!(table.month_order(), &["Enero", "Febrero"]);
    }

    #[test]
    fn lenient_cast_counts_unparsable_cells() {
        use arrow::array::StringArray;

        let column: ArrayRef = Arc::new(StringArray::from(vec![
            Some("4.6"),
            Some("north"),
            None,
        ]));
        let (floats, dropped) =
            lenient_float_column(&column, LATITUDE_COLUMN, 1).expect("cast");
        assert_eq!(dropped, 1);
        let floats = floats.as_primitive::<Float64Type>();
        assert_eq!(floats.value(0), 4.6);
        assert!(floats.is_null(1));
        assert!(floats.is_null(2));
    }

    #[test]
    fn parquet_text_coordinates_that_do_not_parse_load_as_null() {
        use arrow::array::{Int64Array, StringArray};
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new(YEAR_COLUMN, DataType::Int64, false),
            Field::new(MONTH_COLUMN, DataType::Utf8, false),
            Field::new(COUNT_COLUMN, DataType::Int64, true),
            Field::new(LATITUDE_COLUMN, DataType::Utf8, true),
            Field::new(LONGITUDE_COLUMN, DataType::Utf8, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![2022, 2022])),
                Arc::new(StringArray::from(vec!["Enero", "Enero"])),
                Arc::new(Int64Array::from(vec![1, 1])),
                Arc::new(StringArray::from(vec!["4.6", "n/d"])),
                Arc::new(StringArray::from(vec!["-74.1", "-74.0"])),
            ],
        )
        .expect("record batch");

        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("hurtos.parquet");
        let file = std::fs::File::create(&path).expect("create parquet");
        let mut writer = ArrowWriter::try_new(file, schema, None).expect("writer");
        writer.write(&batch).expect("write batch");
        writer.close().expect("close writer");

        let table = load_file(&path).expect("load parquet");
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].coordinates(), Some((4.6, -74.1)));
        assert_eq!(table.records()[1].latitude, None);
        assert_eq!(table.records()[1].longitude, Some(-74.0));
        assert_eq!(table.geocoded_len(), 1);
    }

    #[test]
    fn json_coordinates_of_the_wrong_type_load_as_null() {
        assert_eq!(json_coordinate(&serde_json::json!(true), 1, LATITUDE_COLUMN), None);
        assert_eq!(json_coordinate(&serde_json::json!([4.6]), 1, LATITUDE_COLUMN), None);
        assert_eq!(json_coordinate(&serde_json::json!("4.6"), 1, LATITUDE_COLUMN), Some(4.6));

        let dir = tempdir().expect("tempdir");
        let path = write_file(
            dir.path(),
            "hurtos.json",
            r#"[
                {"AÑO": 2023, "Mes": "Enero", "Farola": 1, "Latitud": true, "Longitud": -74.08},
                {"AÑO": 2023, "Mes": "Enero", "Farola": 1, "Latitud": 4.6, "Longitud": -74.1}
            ]"#
            .as_bytes(),
        );
        let table = load_file(&path).expect("load json");
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].latitude, None);
        assert_eq!(table.geocoded_len(), 1);
    }
}
