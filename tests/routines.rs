use std::fmt::Write as _;

use tempfile::TempDir;

use election_explorer::command::{compute, Mode};
use election_explorer::config::ExplorerConfig;
use election_explorer::data::DatasetKind;
use election_explorer::report::Report;

/// One JSON record; `status` marks it as a retweet (`Some(true)`) or reply
/// (`Some(false)`).
fn record(user: u64, followers: u64, class: &str, status: Option<bool>) -> String {
    let (retweet, reply) = match status {
        Some(true) => ("1000", "null"),
        Some(false) => ("null", "2000"),
        None => ("null", "null"),
    };
    format!(
        r#"{{"user.id": {user}, "user.verified": {verified}, "user.followers_count": {followers},
            "user.description.length": {len}, "retweeted_status.id": {retweet},
            "in_reply_to_status_id": {reply}, "predicted_class": "{class}"}}"#,
        verified = user % 2 == 0,
        len = user * 3,
    )
}

fn write_dataset(dir: &TempDir, file: &str, records: &[String]) {
    let mut json = String::from("[");
    for (i, r) in records.iter().enumerate() {
        if i > 0 {
            json.push(',');
        }
        write!(json, "{r}").unwrap();
    }
    json.push(']');
    std::fs::write(dir.path().join(file), json).unwrap();
}

fn fixture() -> (TempDir, ExplorerConfig) {
    let dir = tempfile::tempdir().unwrap();
    let config = ExplorerConfig {
        data_dir: dir.path().to_path_buf(),
        us_file: "us.json".into(),
        georgia_file: "georgia.json".into(),
        training_file: "training.json".into(),
        output_dir: None,
    };

    write_dataset(
        &dir,
        "us.json",
        &[
            record(1, 10, "human", None),
            record(1, 11, "human", Some(true)),
            record(2, 500, "bot", Some(true)),
            record(3, 0, "human", Some(false)),
            record(1, 12, "human", None),
        ],
    );
    write_dataset(
        &dir,
        "georgia.json",
        &(0..20)
            .map(|i| record(100 + i % 10, 7, if i % 10 == 0 { "bot" } else { "human" }, None))
            .collect::<Vec<_>>(),
    );
    write_dataset(
        &dir,
        "training.json",
        &[record(7, 1_000_000, "bot", None), record(8, 40, "human", None)],
    );
    (dir, config)
}

#[test]
fn compare_reduces_every_dataset_to_accounts() {
    let (_dir, config) = fixture();
    let Report::Comparison(comparison) = compute(&config, &Mode::Compare).unwrap() else {
        panic!("expected a comparison report");
    };

    let sizes: Vec<_> = comparison
        .followers
        .groups
        .iter()
        .map(|g| (g.dataset, g.values.len()))
        .collect();
    assert_eq!(
        sizes,
        vec![
            (DatasetKind::Us, 3),
            (DatasetKind::Georgia, 10),
            (DatasetKind::Training, 2)
        ]
    );
    assert_eq!(comparison.followers.groups[0].values, vec![10.0, 500.0, 0.0]);
    assert_eq!(
        comparison.description_length.groups[2].values,
        vec![21.0, 24.0]
    );
}

#[test]
fn proportions_of_us_dataset() {
    let (_dir, config) = fixture();
    let report = compute(
        &config,
        &Mode::Proportions {
            dataset: DatasetKind::Us,
        },
    )
    .unwrap();
    let Report::Proportions(p) = &report else {
        panic!("expected a proportions report");
    };

    assert_eq!((p.accounts.human, p.accounts.bot), (2, 1));
    assert_eq!((p.tweets.human, p.tweets.bot), (4, 1));
    assert_eq!((p.retweets.human, p.retweets.bot), (1, 1));
    assert_eq!((p.replies.human, p.replies.bot), (1, 0));

    let text = report.to_string();
    assert!(text.starts_with("Proportions of Humans and Bots in the US Election Dataset"));
    assert!(text.contains("Retweets  human 1 (50.00%), bot 1 (50.00%)"));
}

#[test]
fn summary_of_georgia_dataset() {
    let (_dir, config) = fixture();
    let Report::Summary(summary) = compute(
        &config,
        &Mode::Summary {
            dataset: DatasetKind::Georgia,
        },
    )
    .unwrap() else {
        panic!("expected a summary report");
    };

    assert_eq!(summary.unique_accounts, 10);
    // even user ids 100, 102, ..., 108 are verified
    assert_eq!(summary.verified_accounts, 5);
    assert_eq!(summary.top_accounts, 1);
    assert_eq!(summary.top_tweet_volume, 2);
    assert_eq!(summary.mean_followers, Some(7.0));
}

#[test]
fn missing_dataset_fails_the_routine() {
    let (dir, config) = fixture();
    std::fs::remove_file(dir.path().join("training.json")).unwrap();

    let err = compute(&config, &Mode::Compare).unwrap_err();
    assert!(err.to_string().contains("Training dataset"));

    // routines that do not need the training set are unaffected
    assert!(compute(
        &config,
        &Mode::Summary {
            dataset: DatasetKind::Us
        }
    )
    .is_ok());
}

#[test]
fn export_writes_into_output_dir() {
    let (dir, mut config) = fixture();
    let out = dir.path().join("figures");
    config.output_dir = Some(out.clone());

    let report = compute(&config, &Mode::Compare).unwrap();
    let path = report.export(&out).unwrap();
    assert_eq!(path, out.join("compare_datasets.json"));

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(value["report"], "comparison");
    assert_eq!(value["followers"]["groups"][2]["dataset"], "training");
    assert_eq!(value["followers"]["groups"][2]["stats"]["count"], 2);
    assert!(value["followers"]["groups"][0].get("values").is_none());
}
