/// Data layer: core types, loading, schema binding and the derive operations.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read file → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  schema   │  ColumnMapping binds columns → Vec<LaunchRecord>
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ LaunchDataset │  records, site list, payload bounds
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Selection → pie table + scatter table
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;
