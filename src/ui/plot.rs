use std::f64::consts::{FRAC_PI_2, TAU};
use std::ops::RangeInclusive;

use eframe::egui::{Align2, Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line, Plot, PlotPoint,
    PlotPoints, Points, Polygon, Text,
};

use crate::color::{ConferenceColors, BIG_TEN_RED, NATIONAL_GRAY};
use crate::data::profile::{SchoolProfile, AXIS_LABELS, AXIS_MAX};
use crate::data::projection::{ConferenceGroup, TropeComparison};

// ---------------------------------------------------------------------------
// Conference box plot
// ---------------------------------------------------------------------------

/// Aggression score distribution per conference with every song overlaid.
pub fn conference_box_plot(ui: &mut Ui, groups: &[ConferenceGroup], colors: &ConferenceColors) {
    let labels: Vec<String> = groups.iter().map(|g| g.conference.clone()).collect();

    Plot::new("conference_box_plot")
        .legend(Legend::default())
        .height(420.0)
        .x_axis_label("conference")
        .y_axis_label("aggression_score")
        .x_axis_formatter(category_formatter(labels))
        .include_y(0.0)
        .include_y(AXIS_MAX)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, group) in groups.iter().enumerate() {
                let x = i as f64;
                let color = colors.color_for(&group.conference);

                if let Some(s) = group.summary {
                    let elem = BoxElem::new(x, BoxSpread::new(s.min, s.q1, s.median, s.q3, s.max))
                        .name(&group.conference)
                        .box_width(0.5)
                        .fill(color.gamma_multiply(0.3))
                        .stroke(Stroke::new(1.5, color));
                    plot_ui.box_plot(BoxPlot::new(vec![elem]).name(&group.conference).color(color));
                }

                let points: PlotPoints = group
                    .points
                    .iter()
                    .enumerate()
                    .filter_map(|(k, (_, score))| Some([x + jitter(k), f64::from((*score)?)]))
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&group.conference)
                        .color(color)
                        .radius(3.0),
                );
            }
        });
}

/// Deterministic horizontal spread so equal scores do not overlap.
fn jitter(k: usize) -> f64 {
    ((k % 7) as f64 - 3.0) * 0.04
}

// ---------------------------------------------------------------------------
// Big Ten spotlight bars
// ---------------------------------------------------------------------------

/// Grouped bars: trope frequency inside vs. outside the Big Ten.
pub fn spotlight_bar_chart(ui: &mut Ui, comparisons: &[TropeComparison]) {
    let labels: Vec<String> = comparisons.iter().map(|c| c.trope.to_string()).collect();

    let bars = |offset: f64, pick: fn(&TropeComparison) -> Option<f64>, name: &str| {
        comparisons
            .iter()
            .enumerate()
            .filter_map(|(i, c)| {
                pick(c).map(|v| Bar::new(i as f64 + offset, v).width(0.38).name(name))
            })
            .collect::<Vec<_>>()
    };
    let big_ten = BarChart::new(bars(-0.2, |c| c.big_ten, "Big Ten"))
        .name("Big Ten")
        .color(BIG_TEN_RED);
    let national = BarChart::new(bars(0.2, |c| c.national, "National Avg"))
        .name("National Avg")
        .color(NATIONAL_GRAY);

    Plot::new("spotlight_bar_chart")
        .legend(Legend::default())
        .height(380.0)
        .x_axis_label("Trope")
        .y_axis_label("Frequency")
        .x_axis_formatter(category_formatter(labels))
        .include_y(0.0)
        .include_y(1.0)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(big_ten);
            plot_ui.bar_chart(national);
        });
}

/// Label integer x positions with category names.
fn category_formatter(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// School radar chart
// ---------------------------------------------------------------------------

/// Position of `value` on axis `axis` of an `n`-axis radar chart. Axis 0
/// points up, the rest follow clockwise.
pub fn radar_point(value: f64, axis: usize, n: usize) -> [f64; 2] {
    let angle = FRAC_PI_2 - TAU * axis as f64 / n as f64;
    [value * angle.cos(), value * angle.sin()]
}

/// Closed polygon of the four profile axes over a ring grid of 0..=4.
pub fn radar_chart(ui: &mut Ui, profile: &SchoolProfile) {
    let n = AXIS_LABELS.len();
    let grid = Color32::from_gray(120);

    ui.label(RichText::new(format!("DNA of {}'s Fight Song", profile.school)).strong());

    Plot::new("school_radar")
        .height(380.0)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-AXIS_MAX * 1.5)
        .include_x(AXIS_MAX * 1.5)
        .include_y(-AXIS_MAX * 1.25)
        .include_y(AXIS_MAX * 1.25)
        .show(ui, |plot_ui| {
            for ring in 1..=AXIS_MAX as usize {
                let r = ring as f64;
                let circle: PlotPoints = (0..=64)
                    .map(|k| {
                        let a = TAU * k as f64 / 64.0;
                        [r * a.cos(), r * a.sin()]
                    })
                    .collect();
                plot_ui.line(Line::new(circle).color(grid).width(0.5));
            }

            for (axis, (label, value)) in AXIS_LABELS.iter().zip(profile.axes).enumerate() {
                let spoke: PlotPoints = vec![[0.0, 0.0], radar_point(AXIS_MAX, axis, n)].into();
                plot_ui.line(Line::new(spoke).color(grid).width(0.5));

                let [x, y] = radar_point(AXIS_MAX * 1.15, axis, n);
                let value_text = value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"));
                plot_ui.text(
                    Text::new(PlotPoint::new(x, y), format!("{label}\n{value_text}"))
                        .anchor(Align2::CENTER_CENTER),
                );
            }

            let outline: Vec<[f64; 2]> = profile
                .axes
                .iter()
                .enumerate()
                .map(|(axis, v)| radar_point(v.unwrap_or(0.0), axis, n))
                .collect();
            plot_ui.polygon(
                Polygon::new(PlotPoints::from(outline))
                    .name(&profile.school)
                    .fill_color(BIG_TEN_RED.gamma_multiply(0.35))
                    .stroke(Stroke::new(2.0, BIG_TEN_RED)),
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn radar_axes_start_up_and_run_clockwise() {
        let [x0, y0] = radar_point(4.0, 0, 4);
        assert!(approx(x0, 0.0) && approx(y0, 4.0));

        let [x1, y1] = radar_point(2.0, 1, 4);
        assert!(approx(x1, 2.0) && approx(y1, 0.0));

        let [x2, y2] = radar_point(1.0, 2, 4);
        assert!(approx(x2, 0.0) && approx(y2, -1.0));
    }

    #[test]
    fn jitter_stays_inside_the_box() {
        assert!((0..50).all(|k| jitter(k).abs() <= 0.12 + 1e-12));
    }
}
