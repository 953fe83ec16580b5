use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Color32, RichText, Stroke, Ui};
use egui_plot::{
    BoxElem, BoxPlot, BoxSpread, GridMark, Plot, PlotPoint, PlotPoints, Points, Polygon, Text,
};

use super::scale::{format_count, SymLog};
use crate::analysis::comparison::{AxisScale, DatasetComparison, FeatureComparison};
use crate::analysis::proportions::{ClassCounts, ClassProportions, Subset};
use crate::color::{class_color, darker, ColorMap};
use crate::data::{DatasetKind, PredictedClass};
use crate::report::ChartReport;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the charts of the current report in the central panel.
pub fn report_plots(ui: &mut Ui, state: &AppState) {
    match &state.charts {
        ChartReport::Comparison(comparison) => {
            comparison_plots(ui, comparison, &state.dataset_colors)
        }
        ChartReport::Proportions(proportions) => proportion_pies(ui, proportions),
    }
}

// ---------------------------------------------------------------------------
// Box plots
// ---------------------------------------------------------------------------

fn comparison_plots(ui: &mut Ui, comparison: &DatasetComparison, colors: &ColorMap<DatasetKind>) {
    let features = comparison.features();
    ui.columns(features.len(), |columns| {
        for (ui, feature) in columns.iter_mut().zip(features) {
            feature_box_plot(ui, feature, colors);
        }
    });
}

/// Maps feature values onto the plot's y axis.
#[derive(Debug, Clone, Copy)]
enum ValueAxis {
    Linear,
    SymLog { scale: SymLog, max: f64 },
}

impl ValueAxis {
    fn for_scale(scale: AxisScale) -> Self {
        match scale {
            AxisScale::Linear => ValueAxis::Linear,
            AxisScale::SymLog { max } => ValueAxis::SymLog {
                scale: SymLog::default(),
                max: max as f64,
            },
        }
    }

    fn to_plot(self, value: f64) -> f64 {
        match self {
            ValueAxis::Linear => value,
            ValueAxis::SymLog { scale, max } => scale.forward(value.clamp(0.0, max)),
        }
    }
}

fn feature_box_plot(ui: &mut Ui, comparison: &FeatureComparison, colors: &ColorMap<DatasetKind>) {
    let feature = comparison.feature;
    let axis = ValueAxis::for_scale(feature.scale());

    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(feature.title()).strong().size(16.0));
    });

    let labels: Vec<&'static str> = comparison
        .groups
        .iter()
        .map(|g| g.dataset.label())
        .collect();
    let slots = labels.len() as f64;

    let mut plot = Plot::new(("box_plot", feature.axis_label()))
        .x_axis_label(RichText::new("Account Dataset").strong())
        .y_axis_label(RichText::new(feature.axis_label()).strong())
        .show_grid([false, true])
        .include_x(-0.5)
        .include_x(slots - 0.5)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark: GridMark, _range| group_label(&labels, mark.value));

    if let ValueAxis::SymLog { scale, max } = axis {
        plot = plot
            .include_y(0.0)
            .include_y(scale.forward(max))
            .y_axis_formatter(move |mark: GridMark, _range| format_count(scale.inverse(mark.value)))
            .label_formatter(move |name, point| {
                format!("{name}\n{}", format_count(scale.inverse(point.y)))
            });
    } else {
        plot = plot.include_y(0.0);
    }

    plot.show(ui, |plot_ui| {
        for (slot, group) in comparison.groups.iter().enumerate() {
            let Some(stats) = &group.stats else {
                continue;
            };
            let x = slot as f64;
            let fill = colors.color_for(&group.dataset);
            let edge = darker(fill, 0.45);
            let label = group.dataset.label();

            let spread = BoxSpread::new(
                axis.to_plot(stats.lower_whisker),
                axis.to_plot(stats.q1),
                axis.to_plot(stats.median),
                axis.to_plot(stats.q3),
                axis.to_plot(stats.upper_whisker),
            );
            let elem = BoxElem::new(x, spread)
                .name(label)
                .fill(fill)
                .stroke(Stroke::new(1.5, edge))
                .box_width(0.6)
                .whisker_width(0.3);
            plot_ui.box_plot(BoxPlot::new(vec![elem]).name(label));

            if !stats.outliers.is_empty() {
                let outliers: PlotPoints = stats
                    .outliers
                    .iter()
                    .map(|&v| [x, axis.to_plot(v)])
                    .collect();
                plot_ui.points(Points::new(outliers).radius(2.0).color(edge));
            }
        }
    });
}

/// Dataset label for grid marks that land on a box slot.
fn group_label(labels: &[&str], value: f64) -> String {
    let slot = value.round();
    if (value - slot).abs() > 1e-6 || slot < 0.0 {
        return String::new();
    }
    labels
        .get(slot as usize)
        .map(|l| l.to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Pie charts
// ---------------------------------------------------------------------------

fn proportion_pies(ui: &mut Ui, proportions: &ClassProportions) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(proportions.title()).strong().size(18.0));
    });
    ui.add_space(8.0);

    ui.columns(Subset::ALL.len(), |columns| {
        for (ui, (subset, counts)) in columns.iter_mut().zip(proportions.iter()) {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(RichText::new(subset.label()).strong().size(15.0));
            });
            class_pie(ui, subset, counts);
        }
    });

    ui.add_space(8.0);
    ui.horizontal(|ui: &mut Ui| {
        for class in PredictedClass::ALL {
            ui.label(RichText::new("■").color(class_color(class)).size(18.0));
            ui.label(class.label());
            ui.add_space(12.0);
        }
    });
}

fn class_pie(ui: &mut Ui, subset: Subset, counts: ClassCounts) {
    Plot::new(("pie", subset.label()))
        .data_aspect(1.0)
        .view_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            let total = counts.total();
            if total == 0 {
                plot_ui.text(Text::new(PlotPoint::new(0.0, 0.0), "no records"));
                return;
            }

            let mut start = 0.0;
            for class in PredictedClass::ALL {
                let share = counts.get(class) as f64 / total as f64;
                if share == 0.0 {
                    continue;
                }
                let end = start + share * TAU;
                for piece in wedge_pieces(start, end) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(piece))
                            .name(class.label())
                            .fill_color(class_color(class))
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                }

                let mid = (start + end) / 2.0;
                let label = RichText::new(format!("{:.2}%", share * 100.0))
                    .strong()
                    .size(15.0)
                    .color(Color32::BLACK);
                plot_ui.text(Text::new(
                    PlotPoint::new(0.6 * mid.cos(), 0.6 * mid.sin()),
                    egui::WidgetText::from(label),
                ));
                start = end;
            }
        });
}

/// Unit-circle wedge from `start` to `end` (radians, counter-clockwise), split
/// into convex pieces of at most a quarter turn.
fn wedge_pieces(start: f64, end: f64) -> Vec<Vec<[f64; 2]>> {
    const STEPS_PER_RADIAN: f64 = 24.0;

    let mut pieces = Vec::new();
    let mut from = start;
    while from < end {
        let to = (from + FRAC_PI_2).min(end);
        let steps = ((to - from) * STEPS_PER_RADIAN).ceil().max(1.0) as usize;
        let mut points = Vec::with_capacity(steps + 2);
        points.push([0.0, 0.0]);
        for i in 0..=steps {
            let angle = from + (to - from) * i as f64 / steps as f64;
            points.push([angle.cos(), angle.sin()]);
        }
        pieces.push(points);
        from = to;
    }
    pieces
}
