use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::analysis::comparison::compare_datasets;
use crate::analysis::proportions::class_proportions;
use crate::analysis::summary::summarize;
use crate::app;
use crate::config::ExplorerConfig;
use crate::data::loader::load_dataset;
use crate::data::{Dataset, DatasetKind};
use crate::report::Report;
use crate::state::AppState;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the dataset files (overrides the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Directory to export statistics to (overrides the config file)
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Print results without opening the chart window
    #[arg(long, global = true)]
    pub headless: bool,

    /// Which analysis to run
    #[command(subcommand)]
    pub mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Mode {
    /// Compare follower counts and description lengths of all three datasets
    Compare,
    /// Human/bot proportions of accounts, tweets, retweets and replies
    Proportions {
        #[arg(long, value_enum, default_value_t = DatasetKind::Us)]
        dataset: DatasetKind,
    },
    /// Unique and verified users, top-decile tweet volume and mean followers
    Summary {
        #[arg(long, value_enum, default_value_t = DatasetKind::Georgia)]
        dataset: DatasetKind,
    },
}

impl CommandArgs {
    /// Configuration file (or defaults) with command-line overrides applied.
    pub fn resolve_config(&self) -> Result<ExplorerConfig> {
        let mut config = match &self.config {
            Some(path) => ExplorerConfig::load(path)?,
            None => ExplorerConfig::default(),
        };
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = Some(dir.clone());
        }
        Ok(config)
    }
}

/// Load the datasets the routine needs, compute its statistics, print them,
/// export them when an output directory is configured, then show the charts.
pub fn run(args: &CommandArgs) -> Result<()> {
    let config = args.resolve_config()?;
    let report = compute(&config, &args.mode)?;

    print!("{report}");

    if let Some(dir) = &config.output_dir {
        report.export(dir)?;
    }
    if args.headless {
        return Ok(());
    }
    if let Some(charts) = report.into_charts() {
        app::run_window(AppState::new(charts, config.output_dir))?;
    }
    Ok(())
}

/// Run one routine. Datasets are dropped before this returns.
pub fn compute(config: &ExplorerConfig, mode: &Mode) -> Result<Report> {
    let load = |kind: DatasetKind| -> Result<Dataset> {
        load_dataset(&config.dataset_path(kind), kind)
    };

    let report = match *mode {
        Mode::Compare => {
            let datasets = DatasetKind::ALL
                .into_iter()
                .map(load)
                .collect::<Result<Vec<_>>>()?;
            Report::Comparison(compare_datasets(&datasets))
        }
        Mode::Proportions { dataset } => Report::Proportions(class_proportions(&load(dataset)?)),
        Mode::Summary { dataset } => Report::Summary(summarize(&load(dataset)?)),
    };
    Ok(report)
}
