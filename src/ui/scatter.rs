use eframe::egui::{Ui, Vec2};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::color::ColorMap;
use crate::data::filter::{PayloadRange, ScatterRow};
use crate::data::model::Outcome;

// ---------------------------------------------------------------------------
// Categorical outcome axis
// ---------------------------------------------------------------------------

/// One y position per distinct outcome label.
///
/// Labels other than the success label come first in alphabetical order and
/// the success label sits on top, so the flag layout keeps `Failure` at 0 and
/// `Success` at 1 while the text layout gives `Success (payload status
/// unclear)` its own row.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeAxis {
    labels: Vec<String>,
}

impl OutcomeAxis {
    pub fn new<'a>(outcomes: impl IntoIterator<Item = &'a Outcome>) -> Self {
        let mut labels: Vec<String> = Vec::new();
        for outcome in outcomes {
            if !labels.contains(&outcome.label) {
                labels.push(outcome.label.clone());
            }
        }
        labels.sort_by(|a, b| {
            let a_top = a == Outcome::SUCCESS_LABEL;
            let b_top = b == Outcome::SUCCESS_LABEL;
            a_top.cmp(&b_top).then_with(|| a.cmp(b))
        });
        Self { labels }
    }

    /// Y position of a label; unknown labels sit below the axis.
    pub fn position(&self, label: &str) -> f64 {
        self.labels
            .iter()
            .position(|l| l == label)
            .map_or(-1.0, |i| i as f64)
    }

    /// Label drawn at a grid mark or hovered point, empty between rows.
    pub fn label_at(&self, value: f64) -> &str {
        let rounded = value.round();
        if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
            return "";
        }
        self.labels
            .get(rounded as usize)
            .map_or("", String::as_str)
    }

    fn top(&self) -> f64 {
        self.labels.len().saturating_sub(1) as f64
    }
}

// ---------------------------------------------------------------------------
// Series grouping
// ---------------------------------------------------------------------------

/// Points grouped by booster category, in order of first appearance.
pub fn category_series<'r>(
    rows: &'r [ScatterRow],
    axis: &OutcomeAxis,
) -> Vec<(&'r str, Vec<[f64; 2]>)> {
    let mut series: Vec<(&str, Vec<[f64; 2]>)> = Vec::new();
    for row in rows {
        let point = [row.payload_mass_kg, axis.position(&row.outcome.label)];
        match series.iter_mut().find(|(c, _)| *c == row.booster_category) {
            Some((_, points)) => points.push(point),
            None => series.push((row.booster_category.as_str(), vec![point])),
        }
    }
    series
}

// ---------------------------------------------------------------------------
// Scatter plot
// ---------------------------------------------------------------------------

/// Payload mass (x) against outcome (y), coloured by booster category.
pub fn scatter_chart(
    ui: &mut Ui,
    title: &str,
    rows: &[ScatterRow],
    payload: PayloadRange,
    axis: &OutcomeAxis,
    colors: &ColorMap,
    height: f32,
) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(title);
    });

    let series = category_series(rows, axis);
    let tick_axis = axis.clone();
    let hover_axis = axis.clone();

    let mut plot = Plot::new("payload_outcome_scatter")
        .legend(Legend::default())
        .height(height)
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("Outcome")
        .y_axis_formatter(move |mark, _range| tick_axis.label_at(mark.value).to_string())
        .label_formatter(move |name, value| {
            let outcome = hover_axis.label_at(value.y);
            if name.is_empty() || outcome.is_empty() {
                format!("{:.0} kg", value.x)
            } else {
                format!("{name}\n{:.0} kg, {outcome}", value.x)
            }
        })
        .include_y(-0.25)
        .include_y(axis.top() + 0.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    if !payload.is_degenerate() {
        plot = plot.include_x(payload.low).include_x(payload.high);
    }

    ui.allocate_ui(Vec2::new(ui.available_width(), height), |ui: &mut Ui| {
        plot.show(ui, |plot_ui| {
            for (category, points) in series {
                let points = Points::new(PlotPoints::from(points))
                    .name(category)
                    .color(colors.color_for(category))
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(5.0);
                plot_ui.points(points);
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(payload: f64, outcome: Outcome, category: &str) -> ScatterRow {
        ScatterRow {
            site: "KSC LC-39A".into(),
            payload_mass_kg: payload,
            outcome,
            booster_category: category.into(),
            booster_version: format!("F9 {category} B1000"),
        }
    }

    #[test]
    fn groups_points_by_category() {
        let rows = vec![
            row(500.0, Outcome::from_flag(true), "FT"),
            row(1500.0, Outcome::from_flag(false), "v1.1"),
            row(3000.0, Outcome::from_flag(true), "FT"),
        ];
        let axis = OutcomeAxis::new(rows.iter().map(|r| &r.outcome));
        let series = category_series(&rows, &axis);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].0, "FT");
        assert_eq!(series[0].1, vec![[500.0, 1.0], [3000.0, 1.0]]);
        assert_eq!(series[1].1, vec![[1500.0, 0.0]]);
    }

    #[test]
    fn flag_layout_keeps_binary_positions() {
        let outcomes = [Outcome::from_flag(true), Outcome::from_flag(false)];
        let axis = OutcomeAxis::new(&outcomes);
        assert_eq!(axis.position("Failure"), 0.0);
        assert_eq!(axis.position("Success"), 1.0);
        assert_eq!(axis.label_at(1.0), "Success");
        assert_eq!(axis.label_at(0.0), "Failure");
        assert_eq!(axis.label_at(0.5), "");
        assert_eq!(axis.label_at(2.0), "");
    }

    #[test]
    fn partial_success_gets_its_own_row() {
        let unclear = Outcome::from_text("Success (payload status unclear)");
        let rows = vec![
            row(6465.0, unclear.clone(), "B5"),
            row(2490.0, Outcome::from_text("Success"), "FT"),
            row(1952.0, Outcome::from_text("Failure (in flight)"), "v1.1"),
        ];
        let axis = OutcomeAxis::new(rows.iter().map(|r| &r.outcome));

        let series = category_series(&rows, &axis);
        let y = series[0].1[0][1];
        assert_eq!(axis.label_at(y), "Success (payload status unclear)");
        assert_ne!(axis.label_at(y), axis.label_at(axis.position("Failure (in flight)")));

        assert_eq!(axis.label_at(0.0), "Failure (in flight)");
        assert_eq!(axis.label_at(1.0), "Success (payload status unclear)");
        assert_eq!(axis.label_at(2.0), "Success");
        assert_eq!(axis.top(), 2.0);
    }
}
