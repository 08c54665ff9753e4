/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///   main_data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → Dataset (sorted by date)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  [start, end] → contiguous slice of records
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  daily totals, totals by season / weather
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
