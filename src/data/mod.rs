/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → IncidentTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ IncidentTable │  Vec<IncidentRecord>, year/month index
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  selected years → filtered rows
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
