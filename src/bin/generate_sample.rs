//! Writes a synthetic theft dataset for local runs.
//!
//! `generate_sample [OUTPUT]` – `.csv` (default `sample_hurtos.csv`) or `.parquet`.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const MONTHS: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Neighbourhood centres incidents scatter around.
const HOTSPOTS: [(f64, f64); 4] = [
    (4.6097, -74.0817),
    (4.6760, -74.0480),
    (4.5700, -74.1300),
    (4.7110, -74.1050),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

struct Row {
    year: i64,
    month: &'static str,
    count: i64,
    coords: Option<(f64, f64)>,
}

fn generate(rng: &mut SimpleRng) -> Vec<Row> {
    let mut rows = Vec::new();
    for year in 2022..=2025 {
        // The current year only runs through March.
        let months = if year == 2025 { &MONTHS[..3] } else { &MONTHS[..] };
        for &month in months {
            let incidents = rng.below(9);
            for _ in 0..incidents {
                let count = 1 + rng.below(4) as i64;
                // About a quarter of reports come without a geocode.
                let coords = if rng.next_f64() < 0.25 {
                    None
                } else {
                    let (lat, lon) = HOTSPOTS[rng.below(HOTSPOTS.len() as u64) as usize];
                    Some((rng.gauss(lat, 0.012), rng.gauss(lon, 0.012)))
                };
                rows.push(Row {
                    year,
                    month,
                    count,
                    coords,
                });
            }
        }
    }
    rows
}

fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(["AÑO", "Mes", "Farola", "Latitud", "Longitud"])?;
    for row in rows {
        let (lat, lon) = match row.coords {
            Some((lat, lon)) => (format!("{lat:.6}"), format!("{lon:.6}")),
            None => (String::new(), String::new()),
        };
        writer.write_record([
            row.year.to_string(),
            row.month.to_string(),
            row.count.to_string(),
            lat,
            lon,
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("AÑO", DataType::Int64, false),
        Field::new("Mes", DataType::Utf8, false),
        Field::new("Farola", DataType::Int64, false),
        Field::new("Latitud", DataType::Float64, true),
        Field::new("Longitud", DataType::Float64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.year))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.month))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.count))),
            Arc::new(Float64Array::from_iter(rows.iter().map(|r| r.coords.map(|c| c.0)))),
            Arc::new(Float64Array::from_iter(rows.iter().map(|r| r.coords.map(|c| c.1)))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_hurtos.csv".to_string());
    let path = Path::new(&output);

    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    match path.extension().and_then(|e| e.to_str()) {
        Some("parquet") | Some("pq") => write_parquet(path, &rows)?,
        _ => write_csv(path, &rows)?,
    }

    let geocoded = rows.iter().filter(|r| r.coords.is_some()).count();
    println!(
        "Wrote {} incidents ({geocoded} geocoded) to {output}",
        rows.len()
    );
    Ok(())
}
