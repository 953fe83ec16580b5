use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::TempDir;

use election_explorer::data::loader::{load_dataset, load_file};
use election_explorer::data::{DataError, DatasetKind, PredictedClass};

const JSON_RECORDS: &str = r#"[
  {"user.id": 7, "user.screen_name": "first", "user.verified": true,
   "user.followers_count": 120, "user.description.length": 33,
   "retweeted_status.id": 1.3e18, "in_reply_to_status_id": null,
   "predicted_class": "human", "text": "RT something"},
  {"user.id": 8, "user.verified": false,
   "user.followers_count": 0, "user.description.length": 0,
   "retweeted_status.id": null, "in_reply_to_status_id": 55,
   "predicted_class": "bot"}
]"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn write_parquet(path: &Path, class: &[&str], user_id: Vec<i64>, retweet: Vec<Option<f64>>) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("user.id", DataType::Int64, false),
        Field::new("user.verified", DataType::Boolean, false),
        Field::new("user.followers_count", DataType::Int64, false),
        Field::new("user.description.length", DataType::Int64, false),
        Field::new("retweeted_status.id", DataType::Float64, true),
        Field::new("predicted_class", DataType::Utf8, false),
        Field::new("__index_level_0__", DataType::Int64, false),
    ]));
    let n = user_id.len();
    let arrays: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(user_id)),
        Arc::new(BooleanArray::from(vec![true; n])),
        Arc::new(Int64Array::from(vec![10; n])),
        Arc::new(Int64Array::from(vec![3; n])),
        Arc::new(Float64Array::from(retweet)),
        Arc::new(StringArray::from(class.to_vec())),
        Arc::new(Int64Array::from((0..n as i64).collect::<Vec<_>>())),
    ];
    let batch = RecordBatch::try_new(schema.clone(), arrays).unwrap();
    let file = std::fs::File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}

#[test]
fn loads_json_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "tweets.json", JSON_RECORDS);

    let tweets = load_file(&path).unwrap();
    assert_eq!(tweets.len(), 2);
    assert_eq!(tweets[0].user_id, 7);
    assert_eq!(tweets[0].screen_name.as_deref(), Some("first"));
    assert!(tweets[0].verified);
    assert!(tweets[0].is_retweet());
    assert!(!tweets[0].is_reply());
    assert_eq!(tweets[1].in_reply_to_status_id, Some(55));
    assert_eq!(tweets[1].predicted_class, PredictedClass::Bot);
}

#[test]
fn loads_json_lines_skipping_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "tweets.jsonl",
        concat!(
            r#"{"user.id": 1, "user.followers_count": 5, "user.description.length": 2, "predicted_class": "human"}"#,
            "\n\n",
            r#"{"user.id": 2, "user.followers_count": 6, "user.description.length": 0, "predicted_class": "bot"}"#,
            "\n"
        ),
    );

    let tweets = load_file(&path).unwrap();
    assert_eq!(tweets.iter().map(|t| t.user_id).collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn loads_pandas_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "tweets.csv",
        "user.id,user.verified,user.followers_count,user.description.length,retweeted_status.id,in_reply_to_status_id,predicted_class\n\
         11,True,250,40,,,human\n\
         12,False,3,0,1.325e+18,,bot\n\
         11,True,251,40,,98.0,human\n",
    );

    let tweets = load_file(&path).unwrap();
    assert_eq!(tweets.len(), 3);
    assert!(tweets[0].verified);
    assert!(!tweets[0].is_retweet() && !tweets[0].is_reply());
    assert!(tweets[1].is_retweet());
    assert_eq!(tweets[2].in_reply_to_status_id, Some(98));
}

#[test]
fn null_optional_counts_read_as_zero() {
    let dir = tempfile::tempdir().unwrap();
    let json = write(
        &dir,
        "tweets.json",
        r#"[{"user.id": 1, "user.followers_count": 5, "user.description.length": 2,
             "user.friends_count": null, "user.statuses_count": 40.0,
             "predicted_class": "human"}]"#,
    );
    let csv = write(
        &dir,
        "tweets.csv",
        "user.id,user.followers_count,user.description.length,user.friends_count,user.listed_count,predicted_class\n\
         1,5,2,,NaN,human\n",
    );

    let from_json = load_file(&json).unwrap();
    assert_eq!(from_json[0].friends_count, 0);
    assert_eq!(from_json[0].statuses_count, 40);

    let from_csv = load_file(&csv).unwrap();
    assert_eq!(from_csv[0].friends_count, 0);
    assert_eq!(from_csv[0].listed_count, 0);
}

#[test]
fn loads_parquet_with_float_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tweets.parquet");
    write_parquet(
        &path,
        &["human", "bot", "human"],
        vec![1, 2, 1],
        vec![None, Some(1.3e18), Some(f64::NAN)],
    );

    let dataset = load_dataset(&path, DatasetKind::Us).unwrap();
    assert_eq!(dataset.kind, DatasetKind::Us);
    assert_eq!(dataset.len(), 3);
    let tweets = &dataset.tweets;
    assert_eq!(tweets[0].followers_count, 10);
    assert!(tweets[0].verified);
    assert!(!tweets[0].is_retweet());
    assert!(tweets[1].is_retweet());
    // NaN is a null, as in pandas
    assert!(!tweets[2].is_retweet());
    assert_eq!(tweets[1].predicted_class, PredictedClass::Bot);
    assert_eq!(tweets[2].friends_count, 0);
}

#[test]
fn parquet_with_unknown_class_names_the_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tweets.parquet");
    write_parquet(&path, &["human", "cyborg"], vec![1, 2], vec![None, None]);

    let err = load_file(&path).unwrap_err();
    let data_err = err.downcast_ref::<DataError>().unwrap();
    assert!(matches!(
        data_err,
        DataError::InvalidValue { column, row: 1, .. } if column == "predicted_class"
    ));
}

fn write_counts_parquet(path: &Path, followers: ArrayRef, description_length: Vec<i64>) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("user.id", DataType::Int64, false),
        Field::new("user.followers_count", followers.data_type().clone(), true),
        Field::new("user.description.length", DataType::Int64, false),
        Field::new("predicted_class", DataType::Utf8, false),
    ]));
    let n = description_length.len();
    let arrays: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from((1..=n as i64).collect::<Vec<_>>())),
        followers,
        Arc::new(Int64Array::from(description_length)),
        Arc::new(StringArray::from(vec!["human"; n])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), arrays).unwrap();
    let file = std::fs::File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}

fn invalid_value(err: &anyhow::Error) -> Option<(&str, usize)> {
    match err.downcast_ref::<DataError>()? {
        DataError::InvalidValue { column, row, .. } => Some((column.as_str(), *row)),
        _ => None,
    }
}

#[test]
fn parquet_fractional_count_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tweets.parquet");
    write_counts_parquet(
        &path,
        Arc::new(Float64Array::from(vec![3.0, 4.5])),
        vec![1, 1],
    );

    let err = load_file(&path).unwrap_err();
    assert_eq!(invalid_value(&err), Some(("user.followers_count", 1)));
}

#[test]
fn parquet_negative_count_is_invalid_not_null() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tweets.parquet");
    write_counts_parquet(&path, Arc::new(Int64Array::from(vec![3, 4, 5])), vec![0, 2, -1]);

    let err = load_file(&path).unwrap_err();
    assert_eq!(invalid_value(&err), Some(("user.description.length", 2)));
}

#[test]
fn parquet_whole_float_counts_are_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tweets.parquet");
    write_counts_parquet(
        &path,
        Arc::new(Float64Array::from(vec![3.0, 1.0e6])),
        vec![4, 0],
    );

    let tweets = load_file(&path).unwrap();
    assert_eq!(tweets[0].followers_count, 3);
    assert_eq!(tweets[1].followers_count, 1_000_000);
}

#[test]
fn missing_required_column_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "tweets.json",
        r#"[{"user.id": 1, "user.followers_count": 5, "predicted_class": "human"}]"#,
    );

    let err = load_file(&path).unwrap_err();
    assert!(format!("{err:#}").contains("user.description.length"));
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "tweets.p", "");

    let err = load_file(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DataError>(),
        Some(DataError::UnsupportedExtension(ext)) if ext == "p"
    ));
}

#[test]
fn missing_file_names_the_dataset() {
    let err = load_dataset(Path::new("/nonexistent/us.parquet"), DatasetKind::Us).unwrap_err();
    assert!(err.to_string().contains("US dataset"));
}
