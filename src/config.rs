use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::DatasetKind;

// ---------------------------------------------------------------------------
// Explorer configuration
// ---------------------------------------------------------------------------

/// Where the datasets live and where exported statistics go.
///
/// Read from a JSON file; every key is optional:
///
/// ```json
/// {
///   "data_dir": "/data/election",
///   "us_file": "us_election_tweets.parquet",
///   "georgia_file": "georgia_election_tweets.parquet",
///   "training_file": "balanced_account_training_data.parquet",
///   "output_dir": "figures"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExplorerConfig {
    /// Directory the dataset file names are resolved against.
    pub data_dir: PathBuf,
    pub us_file: PathBuf,
    pub georgia_file: PathBuf,
    pub training_file: PathBuf,
    /// Exported statistics are written here; `None` disables export.
    pub output_dir: Option<PathBuf>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            us_file: PathBuf::from("us_election_tweets.parquet"),
            georgia_file: PathBuf::from("georgia_election_tweets.parquet"),
            training_file: PathBuf::from("balanced_account_training_data.parquet"),
            output_dir: None,
        }
    }
}

impl ExplorerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Full path of a dataset file. Absolute file names are used as-is.
    pub fn dataset_path(&self, kind: DatasetKind) -> PathBuf {
        let file = match kind {
            DatasetKind::Us => &self.us_file,
            DatasetKind::Georgia => &self.georgia_file,
            DatasetKind::Training => &self.training_file,
        };
        self.data_dir.join(file)
    }
}
