use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::de;
use super::DataError;

/// Account identifier (`user.id`).
pub type UserId = u64;

/// Flattened column names as written by `pandas.json_normalize`.
pub mod columns {
    pub const USER_ID: &str = "user.id";
    pub const USER_CREATED_AT: &str = "user.created_at";
    pub const USER_NAME: &str = "user.name";
    pub const USER_SCREEN_NAME: &str = "user.screen_name";
    pub const USER_DESCRIPTION: &str = "user.description";
    pub const USER_LANG: &str = "user.lang";
    pub const USER_VERIFIED: &str = "user.verified";
    pub const USER_GEO_ENABLED: &str = "user.geo_enabled";
    pub const USER_DEFAULT_PROFILE: &str = "user.default_profile";
    pub const USER_DEFAULT_PROFILE_IMAGE: &str = "user.default_profile_image";
    pub const USER_FOLLOWERS_COUNT: &str = "user.followers_count";
    pub const USER_FRIENDS_COUNT: &str = "user.friends_count";
    pub const USER_LISTED_COUNT: &str = "user.listed_count";
    pub const USER_FAVOURITES_COUNT: &str = "user.favourites_count";
    pub const USER_STATUSES_COUNT: &str = "user.statuses_count";
    pub const USER_DESCRIPTION_LENGTH: &str = "user.description.length";
    pub const RETWEETED_STATUS_ID: &str = "retweeted_status.id";
    pub const IN_REPLY_TO_STATUS_ID: &str = "in_reply_to_status_id";
    pub const PREDICTED_CLASS: &str = "predicted_class";
}

// ---------------------------------------------------------------------------
// PredictedClass – the upstream classifier's label
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictedClass {
    Human,
    Bot,
}

impl PredictedClass {
    pub const ALL: [PredictedClass; 2] = [PredictedClass::Human, PredictedClass::Bot];

    pub fn label(self) -> &'static str {
        match self {
            PredictedClass::Human => "Human",
            PredictedClass::Bot => "Bot",
        }
    }
}

impl FromStr for PredictedClass {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(PredictedClass::Human),
            "bot" => Ok(PredictedClass::Bot),
            other => Err(DataError::UnknownClass(other.to_string())),
        }
    }
}

impl fmt::Display for PredictedClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictedClass::Human => write!(f, "human"),
            PredictedClass::Bot => write!(f, "bot"),
        }
    }
}

// ---------------------------------------------------------------------------
// TweetRecord – one row of a collected dataset
// ---------------------------------------------------------------------------

/// A single tweet with the attributes of the account that posted it.
///
/// Field names follow the flattened column layout of the collected data
/// (`user.followers_count`, `retweeted_status.id`, ...). Columns not listed
/// here are ignored when loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TweetRecord {
    #[serde(rename = "user.id", deserialize_with = "de::id")]
    pub user_id: UserId,

    #[serde(rename = "user.created_at", default)]
    pub created_at: Option<String>,
    #[serde(rename = "user.name", default)]
    pub name: Option<String>,
    #[serde(rename = "user.screen_name", default)]
    pub screen_name: Option<String>,
    #[serde(rename = "user.description", default)]
    pub description: Option<String>,
    #[serde(rename = "user.lang", default)]
    pub lang: Option<String>,

    #[serde(rename = "user.verified", default, deserialize_with = "de::flag")]
    pub verified: bool,
    #[serde(rename = "user.geo_enabled", default, deserialize_with = "de::flag")]
    pub geo_enabled: bool,
    #[serde(rename = "user.default_profile", default, deserialize_with = "de::flag")]
    pub default_profile: bool,
    #[serde(
        rename = "user.default_profile_image",
        default,
        deserialize_with = "de::flag"
    )]
    pub default_profile_image: bool,

    #[serde(rename = "user.followers_count", deserialize_with = "de::count")]
    pub followers_count: u64,
    #[serde(
        rename = "user.friends_count",
        default,
        deserialize_with = "de::optional_count"
    )]
    pub friends_count: u64,
    #[serde(
        rename = "user.listed_count",
        default,
        deserialize_with = "de::optional_count"
    )]
    pub listed_count: u64,
    #[serde(
        rename = "user.favourites_count",
        default,
        deserialize_with = "de::optional_count"
    )]
    pub favourites_count: u64,
    #[serde(
        rename = "user.statuses_count",
        default,
        deserialize_with = "de::optional_count"
    )]
    pub statuses_count: u64,
    #[serde(rename = "user.description.length", deserialize_with = "de::count")]
    pub description_length: u64,

    /// Present when the tweet is a retweet.
    #[serde(rename = "retweeted_status.id", default, deserialize_with = "de::optional_id")]
    pub retweeted_status_id: Option<u64>,
    /// Present when the tweet is a reply.
    #[serde(rename = "in_reply_to_status_id", default, deserialize_with = "de::optional_id")]
    pub in_reply_to_status_id: Option<u64>,

    pub predicted_class: PredictedClass,
}

impl TweetRecord {
    /// A record carrying only the required columns; everything else takes its
    /// default.
    pub fn new(
        user_id: UserId,
        followers_count: u64,
        description_length: u64,
        predicted_class: PredictedClass,
    ) -> Self {
        Self {
            user_id,
            created_at: None,
            name: None,
            screen_name: None,
            description: None,
            lang: None,
            verified: false,
            geo_enabled: false,
            default_profile: false,
            default_profile_image: false,
            followers_count,
            friends_count: 0,
            listed_count: 0,
            favourites_count: 0,
            statuses_count: 0,
            description_length,
            retweeted_status_id: None,
            in_reply_to_status_id: None,
            predicted_class,
        }
    }

    pub fn is_retweet(&self) -> bool {
        self.retweeted_status_id.is_some()
    }

    pub fn is_reply(&self) -> bool {
        self.in_reply_to_status_id.is_some()
    }
}

// ---------------------------------------------------------------------------
// AccountRecord – one row per unique account
// ---------------------------------------------------------------------------

/// Snapshot of an account: its first tweet in the dataset plus the number of
/// tweets it has there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccountRecord<'a> {
    pub first_tweet: &'a TweetRecord,
    pub tweet_count: usize,
}

impl AccountRecord<'_> {
    pub fn user_id(&self) -> UserId {
        self.first_tweet.user_id
    }

    pub fn followers_count(&self) -> u64 {
        self.first_tweet.followers_count
    }

    pub fn description_length(&self) -> u64 {
        self.first_tweet.description_length
    }

    pub fn verified(&self) -> bool {
        self.first_tweet.verified
    }

    pub fn predicted_class(&self) -> PredictedClass {
        self.first_tweet.predicted_class
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded corpus
// ---------------------------------------------------------------------------

/// Which of the three corpora a dataset is.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Us,
    Georgia,
    Training,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 3] = [
        DatasetKind::Us,
        DatasetKind::Georgia,
        DatasetKind::Training,
    ];

    /// Short group label used on chart axes.
    pub fn label(self) -> &'static str {
        match self {
            DatasetKind::Us => "US",
            DatasetKind::Georgia => "Georgia",
            DatasetKind::Training => "Training",
        }
    }

    /// Name used in titles ("... in the US Election Dataset").
    pub fn title(self) -> &'static str {
        match self {
            DatasetKind::Us => "US Election",
            DatasetKind::Georgia => "Georgia Election",
            DatasetKind::Training => "Training",
        }
    }

    /// Lowercase identifier used in exported file names.
    pub fn slug(self) -> &'static str {
        match self {
            DatasetKind::Us => "us",
            DatasetKind::Georgia => "georgia",
            DatasetKind::Training => "training",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A loaded corpus. Read-only once built.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub kind: DatasetKind,
    pub tweets: Vec<TweetRecord>,
}

impl Dataset {
    pub fn new(kind: DatasetKind, tweets: Vec<TweetRecord>) -> Self {
        Self { kind, tweets }
    }

    /// Number of tweet records.
    pub fn len(&self) -> usize {
        self.tweets.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.tweets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicted_class_parses_lowercase_labels() {
        assert_eq!("human".parse::<PredictedClass>().unwrap(), PredictedClass::Human);
        assert_eq!("bot".parse::<PredictedClass>().unwrap(), PredictedClass::Bot);
        assert!(matches!(
            "cyborg".parse::<PredictedClass>(),
            Err(DataError::UnknownClass(label)) if label == "cyborg"
        ));
    }

    #[test]
    fn tweet_record_reads_pandas_records_json() {
        let json = r#"{
            "user.id": 12345.0,
            "user.screen_name": "someone",
            "user.verified": true,
            "user.followers_count": 87,
            "user.description.length": 42,
            "retweeted_status.id": null,
            "in_reply_to_status_id": 1.3244e18,
            "predicted_class": "bot",
            "text": "ignored column"
        }"#;
        let tweet: TweetRecord = serde_json::from_str(json).unwrap();
        assert_eq!(tweet.user_id, 12345);
        assert_eq!(tweet.screen_name.as_deref(), Some("someone"));
        assert!(tweet.verified);
        assert!(!tweet.geo_enabled);
        assert_eq!(tweet.followers_count, 87);
        assert_eq!(tweet.description_length, 42);
        assert!(!tweet.is_retweet());
        assert!(tweet.is_reply());
        assert_eq!(tweet.predicted_class, PredictedClass::Bot);
    }

    #[test]
    fn tweet_record_requires_predicted_class() {
        let json = r#"{"user.id": 1, "user.followers_count": 3, "user.description.length": 0}"#;
        assert!(serde_json::from_str::<TweetRecord>(json).is_err());
    }
}
