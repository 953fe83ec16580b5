/// Data layer: record types, loading, and typed errors.
///
/// Architecture:
/// ```text
///  .parquet / .json / .jsonl / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<TweetRecord>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  DatasetKind + tweets, read-only
///   └──────────┘
/// ```
pub mod de;
pub mod loader;
pub mod model;

use thiserror::Error;

pub use model::{AccountRecord, Dataset, DatasetKind, PredictedClass, TweetRecord, UserId};

/// Schema problems found while reading a dataset file.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing required column '{0}'")]
    MissingColumn(String),
    #[error("column '{column}' has unsupported type {found}")]
    ColumnType { column: String, found: String },
    #[error("row {row}: null value in required column '{column}'")]
    NullValue { column: String, row: usize },
    #[error("row {row}: invalid value in column '{column}': {reason}")]
    InvalidValue {
        column: String,
        row: usize,
        reason: String,
    },
    #[error("unknown predicted class '{0}' (expected 'human' or 'bot')")]
    UnknownClass(String),
}
