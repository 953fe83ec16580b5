//! Headline statistics of a dataset's accounts.

use std::fmt;

use serde::Serialize;

use super::accounts::to_unique_accounts;
use crate::data::{AccountRecord, Dataset, DatasetKind};

/// Share of most active accounts whose tweet volume is reported.
pub const TOP_ACCOUNT_FRACTION: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSummary {
    pub dataset: DatasetKind,
    pub unique_accounts: usize,
    pub verified_accounts: usize,
    pub total_tweets: usize,
    pub top_fraction: f64,
    /// Number of accounts in the top slice.
    pub top_accounts: usize,
    /// Tweets posted by the top slice.
    pub top_tweet_volume: usize,
    /// `None` when there are no accounts.
    pub mean_followers: Option<f64>,
}

pub fn summarize(dataset: &Dataset) -> DistributionSummary {
    let accounts = to_unique_accounts(&dataset.tweets);
    let (top_accounts, top_tweet_volume) =
        top_share_tweet_volume(&accounts, TOP_ACCOUNT_FRACTION);

    DistributionSummary {
        dataset: dataset.kind,
        unique_accounts: accounts.len(),
        verified_accounts: accounts.iter().filter(|a| a.verified()).count(),
        total_tweets: dataset.len(),
        top_fraction: TOP_ACCOUNT_FRACTION,
        top_accounts,
        top_tweet_volume,
        mean_followers: mean_followers(&accounts),
    }
}

/// Tweets posted by the `fraction` most active accounts.
///
/// Takes `ceil(len × fraction)` accounts from the tail of the tweet counts
/// sorted ascending. The sort is stable, so ties at the boundary keep
/// first-appearance order. Returns `(accounts taken, tweets summed)`.
pub fn top_share_tweet_volume(accounts: &[AccountRecord<'_>], fraction: f64) -> (usize, usize) {
    let fraction = fraction.clamp(0.0, 1.0);
    let take = ((accounts.len() as f64 * fraction).ceil() as usize).min(accounts.len());

    let mut counts: Vec<usize> = accounts.iter().map(|a| a.tweet_count).collect();
    counts.sort();
    let volume = counts[counts.len() - take..].iter().sum();
    (take, volume)
}

pub fn mean_followers(accounts: &[AccountRecord<'_>]) -> Option<f64> {
    if accounts.is_empty() {
        return None;
    }
    let sum: f64 = accounts.iter().map(|a| a.followers_count() as f64).sum();
    Some(sum / accounts.len() as f64)
}

impl fmt::Display for DistributionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "There are {} unique users", self.unique_accounts)?;
        writeln!(
            f,
            "Out of this, there are {} verified users",
            self.verified_accounts
        )?;
        writeln!(
            f,
            "The top {}% of users produced {} of the {} tweets in the dataset",
            self.top_fraction * 100.0,
            self.top_tweet_volume,
            self.total_tweets
        )?;
        match self.mean_followers {
            Some(mean) => writeln!(
                f,
                "The average number of followers the accounts have is {mean}"
            ),
            None => writeln!(
                f,
                "The average number of followers the accounts have is n/a"
            ),
        }
    }
}
