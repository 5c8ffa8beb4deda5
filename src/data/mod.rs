/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  billionaires.csv (+ optional columns.json)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV, coerce wealth → RecordTable
///   └──────────┘   (fronted by cache::TableCache, keyed path+mtime)
///        │
///        ▼
///   ┌─────────────┐
///   │ RecordTable  │  Vec<Record>, distinct option lists
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  country/industry selections → row indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  count / sum / mean / value_counts / histogram
///   └───────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
