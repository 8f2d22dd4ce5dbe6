/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  sredjena_baza_elas.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → MeasurementTable (cached by path)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ MeasurementTable  │  Vec<MeasurementRecord>, option sets
///   └──────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Selection membership → filtered indices
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
