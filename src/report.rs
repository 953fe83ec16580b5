use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::analysis::comparison::DatasetComparison;
use crate::analysis::proportions::ClassProportions;
use crate::analysis::summary::DistributionSummary;

/// Result of one analysis routine.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "report", rename_all = "snake_case")]
pub enum Report {
    Comparison(DatasetComparison),
    Proportions(ClassProportions),
    Summary(DistributionSummary),
}

impl Report {
    /// File name used when exporting.
    pub fn file_name(&self) -> String {
        match self {
            Report::Comparison(_) => "compare_datasets.json".to_string(),
            Report::Proportions(p) => format!("proportions_{}.json", p.dataset.slug()),
            Report::Summary(s) => format!("summary_{}.json", s.dataset.slug()),
        }
    }

    /// The charts drawn for this report; the summary has none.
    pub fn into_charts(self) -> Option<ChartReport> {
        match self {
            Report::Comparison(c) => Some(ChartReport::Comparison(c)),
            Report::Proportions(p) => Some(ChartReport::Proportions(p)),
            Report::Summary(_) => None,
        }
    }

    /// Write the report as pretty JSON into `dir`, creating it if needed.
    pub fn export(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
        let path = dir.join(self.file_name());
        let file =
            File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported statistics to {}", path.display());
        Ok(path)
    }
}

/// A report shown in the chart window.
#[derive(Debug, Clone)]
pub enum ChartReport {
    Comparison(DatasetComparison),
    Proportions(ClassProportions),
}

impl ChartReport {
    pub fn title(&self) -> String {
        match self {
            ChartReport::Comparison(_) => "Comparing Datasets".to_string(),
            ChartReport::Proportions(p) => p.title(),
        }
    }
}

impl From<ChartReport> for Report {
    fn from(charts: ChartReport) -> Self {
        match charts {
            ChartReport::Comparison(c) => Report::Comparison(c),
            ChartReport::Proportions(p) => Report::Proportions(p),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Comparison(c) => c.fmt(f),
            Report::Proportions(p) => p.fmt(f),
            Report::Summary(s) => s.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::proportions::class_proportions;
    use crate::analysis::summary::summarize;
    use crate::data::fixtures::four_accounts;
    use crate::data::{Dataset, DatasetKind};

    #[test]
    fn file_names_carry_the_dataset() {
        let dataset = Dataset::new(DatasetKind::Georgia, four_accounts());
        assert_eq!(
            Report::Proportions(class_proportions(&dataset)).file_name(),
            "proportions_georgia.json"
        );
        assert_eq!(
            Report::Summary(summarize(&dataset)).file_name(),
            "summary_georgia.json"
        );
    }

    #[test]
    fn export_writes_tagged_json() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = Dataset::new(DatasetKind::Us, four_accounts());
        let report = Report::Proportions(class_proportions(&dataset));

        let path = report.export(&dir.path().join("nested")).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();

        assert_eq!(value["report"], "proportions");
        assert_eq!(value["dataset"], "us");
        assert_eq!(value["tweets"]["human"], 8);
        assert_eq!(value["replies"]["bot"], 0);
    }
}
