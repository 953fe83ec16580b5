use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::data::{AccountRecord, TweetRecord, UserId};

/// Reduce tweets to one [`AccountRecord`] per distinct `user.id`.
///
/// The first tweet of each account is its snapshot; later tweets only add to
/// `tweet_count`. Accounts keep the order in which they first appear.
pub fn to_unique_accounts(tweets: &[TweetRecord]) -> Vec<AccountRecord<'_>> {
    let mut index: HashMap<UserId, usize> = HashMap::new();
    let mut accounts: Vec<AccountRecord<'_>> = Vec::new();

    for tweet in tweets {
        match index.entry(tweet.user_id) {
            Entry::Occupied(slot) => accounts[*slot.get()].tweet_count += 1,
            Entry::Vacant(slot) => {
                slot.insert(accounts.len());
                accounts.push(AccountRecord {
                    first_tweet: tweet,
                    tweet_count: 1,
                });
            }
        }
    }

    log::debug!(
        "Reduced {} tweets to {} unique accounts",
        tweets.len(),
        accounts.len()
    );
    accounts
}

/// Optional status reference a tweet may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusField {
    /// `retweeted_status.id`
    RetweetedStatus,
    /// `in_reply_to_status_id`
    InReplyToStatus,
}

impl StatusField {
    pub fn is_present(self, tweet: &TweetRecord) -> bool {
        match self {
            StatusField::RetweetedStatus => tweet.is_retweet(),
            StatusField::InReplyToStatus => tweet.is_reply(),
        }
    }
}

/// Tweets whose `field` is non-null, in input order.
///
/// The two fields are checked independently: a tweet carrying both lands in
/// both subsets.
pub fn filter_has_field(tweets: &[TweetRecord], field: StatusField) -> Vec<&TweetRecord> {
    tweets.iter().filter(|t| field.is_present(t)).collect()
}
