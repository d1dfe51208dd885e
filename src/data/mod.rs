/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  path / http(s) url
///        │
///        ▼
///   ┌──────────┐
///   │  source   │  fetch raw bytes
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  xlsx / csv / json / parquet → validate → coerce → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  AND of column predicates → derived Table
///   └──────────┘
/// ```

pub mod dates;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod source;

pub use error::LoadError;
pub use filter::{filter, EmptyDatePolicy, Predicates};
pub use loader::{load, load_with_report, LoadOptions, LoadReport};
pub use model::{Column, Row, Summary, Table};
pub use source::{Format, Source};
