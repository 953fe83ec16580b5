//! Human/bot proportions over accounts, tweets, retweets and replies.

use std::fmt;

use serde::Serialize;

use super::accounts::{filter_has_field, to_unique_accounts, StatusField};
use crate::data::{Dataset, DatasetKind, PredictedClass};

/// Human and bot counts of one subset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassCounts {
    pub human: usize,
    pub bot: usize,
}

impl ClassCounts {
    pub fn tally<I>(classes: I) -> Self
    where
        I: IntoIterator<Item = PredictedClass>,
    {
        classes
            .into_iter()
            .fold(Self::default(), |mut counts, class| {
                match class {
                    PredictedClass::Human => counts.human += 1,
                    PredictedClass::Bot => counts.bot += 1,
                }
                counts
            })
    }

    pub fn total(&self) -> usize {
        self.human + self.bot
    }

    pub fn get(&self, class: PredictedClass) -> usize {
        match class {
            PredictedClass::Human => self.human,
            PredictedClass::Bot => self.bot,
        }
    }

    /// Percentage (0-100) of `class`. `None` for an empty subset.
    pub fn percentage(&self, class: PredictedClass) -> Option<f64> {
        let total = self.total();
        (total > 0).then(|| self.get(class) as f64 * 100.0 / total as f64)
    }
}

impl fmt::Display for ClassCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (
            self.percentage(PredictedClass::Human),
            self.percentage(PredictedClass::Bot),
        ) {
            (Some(h), Some(b)) => write!(
                f,
                "human {} ({h:.2}%), bot {} ({b:.2}%)",
                self.human, self.bot
            ),
            _ => write!(f, "no records"),
        }
    }
}

/// Record subsets the proportions are computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Subset {
    Accounts,
    Tweets,
    Retweets,
    Replies,
}

impl Subset {
    pub const ALL: [Subset; 4] = [
        Subset::Accounts,
        Subset::Tweets,
        Subset::Retweets,
        Subset::Replies,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Subset::Accounts => "Accounts",
            Subset::Tweets => "Tweets",
            Subset::Retweets => "Retweets",
            Subset::Replies => "Replies",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassProportions {
    pub dataset: DatasetKind,
    pub accounts: ClassCounts,
    pub tweets: ClassCounts,
    pub retweets: ClassCounts,
    pub replies: ClassCounts,
}

impl ClassProportions {
    pub fn title(&self) -> String {
        format!(
            "Proportions of Humans and Bots in the {} Dataset",
            self.dataset.title()
        )
    }

    pub fn get(&self, subset: Subset) -> ClassCounts {
        match subset {
            Subset::Accounts => self.accounts,
            Subset::Tweets => self.tweets,
            Subset::Retweets => self.retweets,
            Subset::Replies => self.replies,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Subset, ClassCounts)> + '_ {
        Subset::ALL.into_iter().map(|s| (s, self.get(s)))
    }
}

impl fmt::Display for ClassProportions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title())?;
        for (subset, counts) in self.iter() {
            writeln!(f, "  {:<9} {counts}", subset.label())?;
        }
        Ok(())
    }
}

/// Count humans and bots among a dataset's accounts, tweets, retweets and
/// replies.
pub fn class_proportions(dataset: &Dataset) -> ClassProportions {
    let accounts = to_unique_accounts(&dataset.tweets);
    let retweets = filter_has_field(&dataset.tweets, StatusField::RetweetedStatus);
    let replies = filter_has_field(&dataset.tweets, StatusField::InReplyToStatus);

    let proportions = ClassProportions {
        dataset: dataset.kind,
        accounts: ClassCounts::tally(accounts.iter().map(|a| a.predicted_class())),
        tweets: ClassCounts::tally(dataset.tweets.iter().map(|t| t.predicted_class)),
        retweets: ClassCounts::tally(retweets.iter().map(|t| t.predicted_class)),
        replies: ClassCounts::tally(replies.iter().map(|t| t.predicted_class)),
    };

    for (subset, counts) in proportions.iter() {
        if counts.total() == 0 {
            log::warn!(
                "{} dataset has no {}; their proportion is undefined",
                dataset.kind,
                subset.label().to_lowercase()
            );
        }
    }
    proportions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{four_accounts, tweet};
    use crate::data::PredictedClass::{Bot, Human};

    #[test]
    fn counts_each_subset() {
        let dataset = Dataset::new(DatasetKind::Us, four_accounts());
        let p = class_proportions(&dataset);

        assert_eq!(p.accounts, ClassCounts { human: 2, bot: 2 });
        assert_eq!(p.tweets, ClassCounts { human: 8, bot: 2 });
        assert_eq!(p.retweets, ClassCounts { human: 1, bot: 1 });
        assert_eq!(p.replies, ClassCounts { human: 1, bot: 0 });
    }

    #[test]
    fn subset_totals_match_subset_sizes() {
        let dataset = Dataset::new(DatasetKind::Georgia, four_accounts());
        let p = class_proportions(&dataset);

        assert_eq!(p.tweets.total(), dataset.len());
        assert_eq!(p.accounts.total(), to_unique_accounts(&dataset.tweets).len());
        assert_eq!(
            p.retweets.total(),
            dataset.tweets.iter().filter(|t| t.is_retweet()).count()
        );
        assert_eq!(
            p.replies.total(),
            dataset.tweets.iter().filter(|t| t.is_reply()).count()
        );
    }

    #[test]
    fn empty_subset_has_no_percentage() {
        let dataset = Dataset::new(DatasetKind::Us, vec![tweet(1, Human), tweet(2, Bot)]);
        let p = class_proportions(&dataset);

        assert_eq!(p.retweets.total(), 0);
        assert_eq!(p.retweets.percentage(Human), None);
        assert_eq!(p.retweets.to_string(), "no records");
        assert_eq!(p.tweets.percentage(Bot), Some(50.0));
    }

    #[test]
    fn display_uses_two_decimal_percentages() {
        let counts = ClassCounts { human: 2, bot: 1 };
        assert_eq!(counts.to_string(), "human 2 (66.67%), bot 1 (33.33%)");
    }

    #[test]
    fn title_names_the_dataset() {
        let p = class_proportions(&Dataset::new(DatasetKind::Us, Vec::new()));
        assert_eq!(
            p.title(),
            "Proportions of Humans and Bots in the US Election Dataset"
        );
    }
}
