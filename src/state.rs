use std::path::{Path, PathBuf};

use crate::color::ColorMap;
use crate::data::DatasetKind;
use crate::report::{ChartReport, Report};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Computed statistics being shown.
    pub charts: ChartReport,

    /// Configured export directory, if any.
    pub output_dir: Option<PathBuf>,

    /// Colour per dataset for the box plots.
    pub dataset_colors: ColorMap<DatasetKind>,

    /// Whether the statistics table panel is open.
    pub show_table: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(charts: ChartReport, output_dir: Option<PathBuf>) -> Self {
        Self {
            charts,
            output_dir,
            dataset_colors: ColorMap::new(&DatasetKind::ALL),
            show_table: true,
            status_message: None,
        }
    }

    pub fn title(&self) -> String {
        self.charts.title()
    }

    /// Export the report to `dir` and report the outcome in the status line.
    pub fn export_to(&mut self, dir: &Path) {
        match Report::from(self.charts.clone()).export(dir) {
            Ok(path) => {
                self.status_message = Some(format!("Exported to {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to export statistics: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
