use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::{can_cast_types, cast};
use arrow::datatypes::{DataType, Float64Type, UInt64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{columns, Dataset, DatasetKind, PredictedClass, TweetRecord};
use super::DataError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load one of the corpora and tag it with its kind.
pub fn load_dataset(path: &Path, kind: DatasetKind) -> Result<Dataset> {
    let tweets = load_file(path)
        .with_context(|| format!("loading {} dataset from {}", kind, path.display()))?;
    log::info!(
        "Loaded {} records for the {} dataset from {}",
        tweets.len(),
        kind,
        path.display()
    );
    if tweets.is_empty() {
        log::warn!("{kind} dataset is empty");
    }
    Ok(Dataset::new(kind, tweets))
}

/// Load tweet records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – written by `df.to_parquet()` (recommended)
/// * `.json`    – `df.to_json(orient="records")`
/// * `.jsonl`   – `df.to_json(orient="records", lines=True)`
/// * `.csv`     – `df.to_csv(index=False)`
pub fn load_file(path: &Path) -> Result<Vec<TweetRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "jsonl" | "ndjson" => load_json_lines(path),
        "csv" => load_csv(path),
        other => Err(DataError::UnsupportedExtension(other.to_string()).into()),
    }
}

// ---------------------------------------------------------------------------
// JSON loaders
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   {
///     "user.id": 783214,
///     "user.followers_count": 5120,
///     "user.description.length": 87,
///     "retweeted_status.id": null,
///     "in_reply_to_status_id": 1325938127312482306,
///     "predicted_class": "human",
///     ...
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<TweetRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing JSON records")
}

fn load_json_lines(path: &Path) -> Result<Vec<TweetRecord>> {
    let file = File::open(path).context("opening JSON lines file")?;
    let mut tweets = Vec::new();
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("reading line {}", line_no + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let tweet = serde_json::from_str(&line)
            .with_context(|| format!("parsing line {}", line_no + 1))?;
        tweets.push(tweet);
    }
    Ok(tweets)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with the flattened column names, one tweet per row.
/// Empty cells are nulls.
fn load_csv(path: &Path) -> Result<Vec<TweetRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let mut tweets = Vec::new();
    for (row_no, result) in reader.deserialize().enumerate() {
        let tweet: TweetRecord = result.with_context(|| format!("CSV row {row_no}"))?;
        tweets.push(tweet);
    }
    Ok(tweets)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum ColumnKind {
    Integer,
    Flag,
    Text,
}

impl ColumnKind {
    fn data_type(self) -> DataType {
        match self {
            ColumnKind::Integer => DataType::UInt64,
            ColumnKind::Flag => DataType::Boolean,
            ColumnKind::Text => DataType::Utf8,
        }
    }
}

/// Columns read from Parquet files: name, target type, required.
const PARQUET_COLUMNS: &[(&str, ColumnKind, bool)] = &[
    (columns::USER_ID, ColumnKind::Integer, true),
    (columns::USER_CREATED_AT, ColumnKind::Text, false),
    (columns::USER_NAME, ColumnKind::Text, false),
    (columns::USER_SCREEN_NAME, ColumnKind::Text, false),
    (columns::USER_DESCRIPTION, ColumnKind::Text, false),
    (columns::USER_LANG, ColumnKind::Text, false),
    (columns::USER_VERIFIED, ColumnKind::Flag, false),
    (columns::USER_GEO_ENABLED, ColumnKind::Flag, false),
    (columns::USER_DEFAULT_PROFILE, ColumnKind::Flag, false),
    (columns::USER_DEFAULT_PROFILE_IMAGE, ColumnKind::Flag, false),
    (columns::USER_FOLLOWERS_COUNT, ColumnKind::Integer, true),
    (columns::USER_FRIENDS_COUNT, ColumnKind::Integer, false),
    (columns::USER_LISTED_COUNT, ColumnKind::Integer, false),
    (columns::USER_FAVOURITES_COUNT, ColumnKind::Integer, false),
    (columns::USER_STATUSES_COUNT, ColumnKind::Integer, false),
    (columns::USER_DESCRIPTION_LENGTH, ColumnKind::Integer, true),
    (columns::RETWEETED_STATUS_ID, ColumnKind::Integer, false),
    (columns::IN_REPLY_TO_STATUS_ID, ColumnKind::Integer, false),
    (columns::PREDICTED_CLASS, ColumnKind::Text, true),
];

/// Load a Parquet file of tweet records.
///
/// Works with files written by **pandas** (`df.to_parquet()`), including
/// integer id columns stored as floats because they contain nulls.
fn load_parquet(path: &Path) -> Result<Vec<TweetRecord>> {
    let file = File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut tweets = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let offset = tweets.len();
        let batch_columns = BatchColumns::from_batch(&batch, offset)?;
        for row in 0..batch.num_rows() {
            tweets.push(batch_columns.tweet(row, offset + row)?);
        }
    }

    Ok(tweets)
}

/// Numeric values headed for an unsigned column must be whole and
/// non-negative; NaN is a null.
fn check_whole_numbers(name: &str, column: &ArrayRef, offset: usize) -> Result<(), DataError> {
    if !column.data_type().is_numeric() {
        return Ok(());
    }
    let values = cast(column, &DataType::Float64).map_err(|_| DataError::ColumnType {
        column: name.to_string(),
        found: format!("{:?}", column.data_type()),
    })?;
    let Some(values) = values.as_primitive_opt::<Float64Type>() else {
        return Ok(());
    };
    for (row, value) in values.iter().enumerate() {
        let Some(value) = value.filter(|v| !v.is_nan()) else {
            continue;
        };
        if value < 0.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
            return Err(DataError::InvalidValue {
                column: name.to_string(),
                row: offset + row,
                reason: format!("{value} is not a non-negative integer"),
            });
        }
    }
    Ok(())
}

/// The known columns of one record batch, cast to their canonical types.
struct BatchColumns {
    arrays: HashMap<&'static str, ArrayRef>,
}

impl BatchColumns {
    /// `offset` is the row number of the batch's first row, used in errors.
    fn from_batch(batch: &RecordBatch, offset: usize) -> Result<Self, DataError> {
        let schema = batch.schema();
        let mut arrays = HashMap::new();

        for &(name, kind, required) in PARQUET_COLUMNS {
            let Ok(idx) = schema.index_of(name) else {
                if required {
                    return Err(DataError::MissingColumn(name.to_string()));
                }
                continue;
            };
            let column = batch.column(idx);
            let target = kind.data_type();
            let type_error = || DataError::ColumnType {
                column: name.to_string(),
                found: format!("{:?}", column.data_type()),
            };
            if !can_cast_types(column.data_type(), &target) {
                return Err(type_error());
            }
            if matches!(kind, ColumnKind::Integer) {
                check_whole_numbers(name, column, offset)?;
            }
            let casted = cast(column, &target).map_err(|_| type_error())?;
            arrays.insert(name, casted);
        }

        Ok(Self { arrays })
    }

    fn integer(&self, name: &str, row: usize) -> Option<u64> {
        let array = self.arrays.get(name)?.as_primitive_opt::<UInt64Type>()?;
        (!array.is_null(row)).then(|| array.value(row))
    }

    fn flag(&self, name: &str, row: usize) -> bool {
        self.arrays
            .get(name)
            .and_then(|a| a.as_boolean_opt())
            .is_some_and(|a| !a.is_null(row) && a.value(row))
    }

    fn text(&self, name: &str, row: usize) -> Option<String> {
        let array = self.arrays.get(name)?.as_string_opt::<i32>()?;
        (!array.is_null(row)).then(|| array.value(row).to_string())
    }

    fn required_integer(&self, name: &str, row: usize) -> Result<u64, DataError> {
        self.integer(name, row).ok_or_else(|| DataError::NullValue {
            column: name.to_string(),
            row,
        })
    }

    /// Build the record at `row`; `line` numbers it across batches for errors.
    fn tweet(&self, row: usize, line: usize) -> Result<TweetRecord, DataError> {
        let with_line = |err: DataError| match err {
            DataError::NullValue { column, .. } => DataError::NullValue { column, row: line },
            other => other,
        };

        let predicted_class = self
            .text(columns::PREDICTED_CLASS, row)
            .ok_or_else(|| DataError::NullValue {
                column: columns::PREDICTED_CLASS.to_string(),
                row: line,
            })?
            .parse::<PredictedClass>()
            .map_err(|err| DataError::InvalidValue {
                column: columns::PREDICTED_CLASS.to_string(),
                row: line,
                reason: err.to_string(),
            })?;

        Ok(TweetRecord {
            user_id: self
                .required_integer(columns::USER_ID, row)
                .map_err(with_line)?,
            created_at: self.text(columns::USER_CREATED_AT, row),
            name: self.text(columns::USER_NAME, row),
            screen_name: self.text(columns::USER_SCREEN_NAME, row),
            description: self.text(columns::USER_DESCRIPTION, row),
            lang: self.text(columns::USER_LANG, row),
            verified: self.flag(columns::USER_VERIFIED, row),
            geo_enabled: self.flag(columns::USER_GEO_ENABLED, row),
            default_profile: self.flag(columns::USER_DEFAULT_PROFILE, row),
            default_profile_image: self.flag(columns::USER_DEFAULT_PROFILE_IMAGE, row),
            followers_count: self
                .required_integer(columns::USER_FOLLOWERS_COUNT, row)
                .map_err(with_line)?,
            friends_count: self.integer(columns::USER_FRIENDS_COUNT, row).unwrap_or(0),
            listed_count: self.integer(columns::USER_LISTED_COUNT, row).unwrap_or(0),
            favourites_count: self.integer(columns::USER_FAVOURITES_COUNT, row).unwrap_or(0),
            statuses_count: self.integer(columns::USER_STATUSES_COUNT, row).unwrap_or(0),
            description_length: self
                .required_integer(columns::USER_DESCRIPTION_LENGTH, row)
                .map_err(with_line)?,
            retweeted_status_id: self.integer(columns::RETWEETED_STATUS_ID, row),
            in_reply_to_status_id: self.integer(columns::IN_REPLY_TO_STATUS_ID, row),
            predicted_class,
        })
    }
}
