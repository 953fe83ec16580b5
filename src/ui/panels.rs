use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::analysis::comparison::FeatureComparison;
use crate::analysis::proportions::ClassProportions;
use crate::data::PredictedClass;
use crate::report::ChartReport;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Right side panel – statistics table
// ---------------------------------------------------------------------------

/// Render the numbers behind the charts.
pub fn stats_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Statistics");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match &state.charts {
            ChartReport::Comparison(comparison) => {
                for feature in comparison.features() {
                    ui.strong(feature.feature.title());
                    ui.push_id(feature.feature.axis_label(), |ui: &mut Ui| {
                        box_stats_table(ui, feature);
                    });
                    ui.add_space(8.0);
                }
            }
            ChartReport::Proportions(proportions) => proportions_table(ui, proportions),
        });
}

fn box_stats_table(ui: &mut Ui, comparison: &FeatureComparison) {
    let headers = ["Dataset", "n", "Q1", "Median", "Q3", "Mean", "Max"];
    TableBuilder::new(ui)
        .striped(true)
        .columns(Column::auto().at_least(40.0), headers.len())
        .header(ROW_HEIGHT + 2.0, |mut header| {
            for title in headers {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for group in &comparison.groups {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.label(group.dataset.label());
                    });
                    let cells = match &group.stats {
                        Some(s) => vec![
                            s.count.to_string(),
                            format!("{}", s.q1),
                            format!("{}", s.median),
                            format!("{}", s.q3),
                            format!("{:.2}", s.mean),
                            format!("{}", s.max),
                        ],
                        None => vec!["0".to_string()],
                    };
                    for cell in cells {
                        row.col(|ui| {
                            ui.label(cell);
                        });
                    }
                });
            }
        });
}

fn proportions_table(ui: &mut Ui, proportions: &ClassProportions) {
    let headers = ["Subset", "Human", "Bot", "Human %", "Bot %"];
    TableBuilder::new(ui)
        .striped(true)
        .columns(Column::auto().at_least(50.0), headers.len())
        .header(ROW_HEIGHT + 2.0, |mut header| {
            for title in headers {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for (subset, counts) in proportions.iter() {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.label(subset.label());
                    });
                    row.col(|ui| {
                        ui.label(counts.human.to_string());
                    });
                    row.col(|ui| {
                        ui.label(counts.bot.to_string());
                    });
                    for class in PredictedClass::ALL {
                        let text = counts
                            .percentage(class)
                            .map_or_else(|| "–".to_string(), |p| format!("{p:.2}"));
                        row.col(|ui| {
                            ui.label(text);
                        });
                    }
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export statistics…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
            if let Some(dir) = state.output_dir.clone() {
                if ui
                    .button(format!("Export to {}", dir.display()))
                    .clicked()
                {
                    state.export_to(&dir);
                    ui.close_menu();
                }
            }
        });

        ui.separator();

        if ui
            .selectable_label(state.show_table, "Statistics table")
            .clicked()
        {
            state.show_table = !state.show_table;
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn export_dialog(state: &mut AppState) {
    let mut dialog = rfd::FileDialog::new().set_title("Export statistics to folder");
    if let Some(dir) = &state.output_dir {
        dialog = dialog.set_directory(dir);
    }
    if let Some(dir) = dialog.pick_folder() {
        state.export_to(&dir);
    }
}
