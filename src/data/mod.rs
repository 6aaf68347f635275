/// Data layer: core types, loading, statistics and queries.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse + normalise rows → Dataset (all or nothing)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset  │  Vec<Record>, immutable after load
///   └──────────┘
///     │      │
///     ▼      ▼
///  aggregate  query / table   counts, means, top-N │ filter, search, sort
///                 │
///                 ▼
///              export          CSV of the current table view
/// ```

pub mod aggregate;
pub mod error;
pub mod export;
pub mod loader;
pub mod model;
pub mod query;
pub mod table;
