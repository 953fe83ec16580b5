//! Writes synthetic US, Georgia and training datasets in the collected-data
//! layout so the explorer can be run without the real corpora.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;

use election_explorer::config::ExplorerConfig;
use election_explorer::data::model::columns;
use election_explorer::data::DatasetKind;

#[derive(Debug, Parser)]
#[command(about = "Generate synthetic election datasets as Parquet files")]
struct Args {
    /// Directory the three dataset files are written to
    #[arg(long, default_value = "sample_data")]
    output_dir: PathBuf,

    /// Seed for the pseudo-random generator
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Heavy-tailed count >= 1 (discrete Pareto).
    fn pareto(&mut self, alpha: f64, cap: u64) -> u64 {
        let u = self.next_f64().max(1e-12);
        (u.powf(-1.0 / alpha).floor() as u64).clamp(1, cap)
    }
}

/// Shape of one synthetic corpus.
struct Profile {
    kind: DatasetKind,
    accounts: u64,
    first_id: i64,
    bot_share: f64,
    /// One row per account instead of one per tweet.
    account_level: bool,
}

/// Column buffers for one dataset.
#[derive(Default)]
struct Rows {
    user_id: Vec<i64>,
    created_at: Vec<String>,
    name: Vec<String>,
    screen_name: Vec<String>,
    description: Vec<String>,
    lang: Vec<String>,
    verified: Vec<bool>,
    geo_enabled: Vec<bool>,
    default_profile: Vec<bool>,
    default_profile_image: Vec<bool>,
    followers_count: Vec<i64>,
    friends_count: Vec<i64>,
    listed_count: Vec<i64>,
    favourites_count: Vec<i64>,
    statuses_count: Vec<i64>,
    description_length: Vec<i64>,
    // pandas stores nullable ids as float columns
    retweeted_status_id: Vec<Option<f64>>,
    in_reply_to_status_id: Vec<Option<f64>>,
    predicted_class: Vec<String>,
}

struct Account {
    id: i64,
    bot: bool,
    verified: bool,
    followers: i64,
    friends: i64,
    description_length: i64,
    tweets: u64,
}

fn generate_account(rng: &mut SimpleRng, id: i64, bot_share: f64) -> Account {
    let bot = rng.chance(bot_share);
    let followers_mu = if bot { 3.5 } else { 5.5 };
    let followers = rng.gauss(followers_mu, 2.2).exp().floor() as i64;
    let description_length = if rng.chance(0.15) {
        0
    } else {
        (rng.next_f64() * 160.0).floor() as i64 + 1
    };
    Account {
        id,
        bot,
        verified: !bot && rng.chance(0.02),
        followers,
        friends: rng.gauss(5.0, 1.5).exp().floor() as i64,
        description_length,
        tweets: rng.pareto(if bot { 0.9 } else { 1.4 }, 400),
    }
}

fn push_row(rows: &mut Rows, account: &Account, retweet: Option<f64>, reply: Option<f64>) {
    rows.user_id.push(account.id);
    rows.created_at.push(format!("2015-0{}-1{} 12:00:00", account.id % 9 + 1, account.id % 10));
    rows.name.push(format!("Account {}", account.id));
    rows.screen_name.push(format!("account_{}", account.id));
    rows.description.push("x".repeat(account.description_length as usize));
    rows.lang.push("en".to_string());
    rows.verified.push(account.verified);
    rows.geo_enabled.push(account.id % 3 == 0);
    rows.default_profile.push(account.bot);
    rows.default_profile_image.push(account.bot && account.id % 4 == 0);
    rows.followers_count.push(account.followers);
    rows.friends_count.push(account.friends);
    rows.listed_count.push(account.followers / 200);
    rows.favourites_count.push(account.friends * 3);
    rows.statuses_count.push(account.tweets as i64 * 40);
    rows.description_length.push(account.description_length);
    rows.retweeted_status_id.push(retweet);
    rows.in_reply_to_status_id.push(reply);
    rows.predicted_class
        .push(if account.bot { "bot" } else { "human" }.to_string());
}

fn generate(profile: &Profile, rng: &mut SimpleRng) -> Rows {
    let mut rows = Rows::default();
    let mut status_id = 1_320_000_000_000_000_000.0;

    for i in 0..profile.accounts {
        let account = generate_account(rng, profile.first_id + i as i64, profile.bot_share);
        if profile.account_level {
            push_row(&mut rows, &account, None, None);
            continue;
        }
        let retweet_share = if account.bot { 0.8 } else { 0.5 };
        for _ in 0..account.tweets {
            status_id += 1.0e6;
            if rng.chance(retweet_share) {
                push_row(&mut rows, &account, Some(status_id), None);
            } else if rng.chance(0.25) {
                push_row(&mut rows, &account, None, Some(status_id));
            } else {
                push_row(&mut rows, &account, None, None);
            }
        }
    }
    rows
}

fn write_parquet(rows: Rows, path: &Path) -> Result<usize> {
    let text = |name: &str| Field::new(name, DataType::Utf8, false);
    let flag = |name: &str| Field::new(name, DataType::Boolean, false);
    let int = |name: &str| Field::new(name, DataType::Int64, false);
    let nullable_id = |name: &str| Field::new(name, DataType::Float64, true);

    let schema = Arc::new(Schema::new(vec![
        int(columns::USER_ID),
        text(columns::USER_CREATED_AT),
        text(columns::USER_NAME),
        text(columns::USER_SCREEN_NAME),
        text(columns::USER_DESCRIPTION),
        text(columns::USER_LANG),
        flag(columns::USER_VERIFIED),
        flag(columns::USER_GEO_ENABLED),
        flag(columns::USER_DEFAULT_PROFILE),
        flag(columns::USER_DEFAULT_PROFILE_IMAGE),
        int(columns::USER_FOLLOWERS_COUNT),
        int(columns::USER_FRIENDS_COUNT),
        int(columns::USER_LISTED_COUNT),
        int(columns::USER_FAVOURITES_COUNT),
        int(columns::USER_STATUSES_COUNT),
        int(columns::USER_DESCRIPTION_LENGTH),
        nullable_id(columns::RETWEETED_STATUS_ID),
        nullable_id(columns::IN_REPLY_TO_STATUS_ID),
        text(columns::PREDICTED_CLASS),
    ]));

    let n_rows = rows.user_id.len();
    let arrays: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(rows.user_id)),
        Arc::new(StringArray::from(rows.created_at)),
        Arc::new(StringArray::from(rows.name)),
        Arc::new(StringArray::from(rows.screen_name)),
        Arc::new(StringArray::from(rows.description)),
        Arc::new(StringArray::from(rows.lang)),
        Arc::new(BooleanArray::from(rows.verified)),
        Arc::new(BooleanArray::from(rows.geo_enabled)),
        Arc::new(BooleanArray::from(rows.default_profile)),
        Arc::new(BooleanArray::from(rows.default_profile_image)),
        Arc::new(Int64Array::from(rows.followers_count)),
        Arc::new(Int64Array::from(rows.friends_count)),
        Arc::new(Int64Array::from(rows.listed_count)),
        Arc::new(Int64Array::from(rows.favourites_count)),
        Arc::new(Int64Array::from(rows.statuses_count)),
        Arc::new(Int64Array::from(rows.description_length)),
        Arc::new(Float64Array::from(rows.retweeted_status_id)),
        Arc::new(Float64Array::from(rows.in_reply_to_status_id)),
        Arc::new(StringArray::from(rows.predicted_class)),
    ];

    let batch =
        RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;

    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(n_rows)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("creating {}", args.output_dir.display()))?;

    let config = ExplorerConfig {
        data_dir: args.output_dir.clone(),
        ..ExplorerConfig::default()
    };
    let profiles = [
        Profile {
            kind: DatasetKind::Us,
            accounts: 2_000,
            first_id: 10_000,
            bot_share: 0.12,
            account_level: false,
        },
        Profile {
            kind: DatasetKind::Georgia,
            accounts: 800,
            first_id: 50_000,
            bot_share: 0.09,
            account_level: false,
        },
        Profile {
            kind: DatasetKind::Training,
            accounts: 1_000,
            first_id: 90_000,
            bot_share: 0.5,
            account_level: true,
        },
    ];

    for profile in &profiles {
        let path = config.dataset_path(profile.kind);
        let rows = generate(profile, &mut rng);
        let written = write_parquet(rows, &path)?;
        println!(
            "Wrote {written} rows ({} accounts) for the {} dataset to {}",
            profile.accounts,
            profile.kind,
            path.display()
        );
    }
    Ok(())
}
