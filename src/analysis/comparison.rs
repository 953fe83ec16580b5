//! Feature distributions of the collected datasets next to the training set.

use std::fmt;

use serde::Serialize;

use super::accounts::to_unique_accounts;
use super::stats::BoxStats;
use crate::data::{AccountRecord, Dataset, DatasetKind};

/// How a feature's value axis should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AxisScale {
    Linear,
    /// Symmetric log, clipped to `[0, max]`.
    SymLog { max: u64 },
}

/// Account attribute compared across datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountFeature {
    FollowersCount,
    DescriptionLength,
}

impl AccountFeature {
    pub const ALL: [AccountFeature; 2] = [
        AccountFeature::FollowersCount,
        AccountFeature::DescriptionLength,
    ];

    pub fn value(self, account: &AccountRecord<'_>) -> f64 {
        match self {
            AccountFeature::FollowersCount => account.followers_count() as f64,
            AccountFeature::DescriptionLength => account.description_length() as f64,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AccountFeature::FollowersCount => "Comparing User Followers",
            AccountFeature::DescriptionLength => "Comparing User Description Lengths",
        }
    }

    pub fn axis_label(self) -> &'static str {
        match self {
            AccountFeature::FollowersCount => "User Follower Count",
            AccountFeature::DescriptionLength => "User Description Length",
        }
    }

    pub fn scale(self) -> AxisScale {
        match self {
            // follower counts span zero to hundreds of millions
            AccountFeature::FollowersCount => AxisScale::SymLog {
                max: 1_000_000_000,
            },
            AccountFeature::DescriptionLength => AxisScale::Linear,
        }
    }
}

/// One dataset's values of a feature.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureGroup {
    pub dataset: DatasetKind,
    #[serde(skip)]
    pub values: Vec<f64>,
    /// `None` when the dataset has no accounts.
    pub stats: Option<BoxStats>,
}

/// A feature compared across datasets, in the order the datasets were given.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureComparison {
    pub feature: AccountFeature,
    pub groups: Vec<FeatureGroup>,
}

/// Both compared features.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetComparison {
    pub followers: FeatureComparison,
    pub description_length: FeatureComparison,
}

impl DatasetComparison {
    pub fn features(&self) -> [&FeatureComparison; 2] {
        [&self.followers, &self.description_length]
    }
}

/// Compare follower counts and description lengths of each dataset's
/// accounts.
///
/// Every dataset, the training set included, is reduced to unique accounts
/// first.
pub fn compare_datasets(datasets: &[Dataset]) -> DatasetComparison {
    let reduced: Vec<(DatasetKind, Vec<AccountRecord<'_>>)> = datasets
        .iter()
        .map(|ds| (ds.kind, to_unique_accounts(&ds.tweets)))
        .collect();

    DatasetComparison {
        followers: compare_feature(&reduced, AccountFeature::FollowersCount),
        description_length: compare_feature(&reduced, AccountFeature::DescriptionLength),
    }
}

pub fn compare_feature(
    accounts: &[(DatasetKind, Vec<AccountRecord<'_>>)],
    feature: AccountFeature,
) -> FeatureComparison {
    let groups = accounts
        .iter()
        .map(|(kind, accounts)| {
            let values: Vec<f64> = accounts.iter().map(|a| feature.value(a)).collect();
            if values.is_empty() {
                log::warn!("{kind} dataset has no accounts to compare");
            }
            let stats = BoxStats::new(values.iter().copied());
            FeatureGroup {
                dataset: *kind,
                values,
                stats,
            }
        })
        .collect();

    FeatureComparison { feature, groups }
}

impl fmt::Display for FeatureComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.feature.title())?;
        for group in &self.groups {
            match &group.stats {
                Some(s) => writeln!(
                    f,
                    "  {:<9} n = {:<8} median = {:<12} IQR = [{}, {}]  mean = {:.2}  max = {}  outliers = {}",
                    group.dataset.label(),
                    s.count,
                    s.median,
                    s.q1,
                    s.q3,
                    s.mean,
                    s.max,
                    s.outliers.len()
                )?,
                None => writeln!(f, "  {:<9} n = 0", group.dataset.label())?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for DatasetComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.followers)?;
        write!(f, "{}", self.description_length)
    }
}
