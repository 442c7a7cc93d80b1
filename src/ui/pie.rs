use std::collections::BTreeMap;
use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, Mesh, Pos2, RichText, Sense, Shape, Stroke, Ui, Vec2};

use crate::color::ColorMap;
use crate::data::filter::PieData;

// ---------------------------------------------------------------------------
// Slice aggregation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: usize,
    pub fraction: f64,
}

/// Turn a pie table into slices, largest first (ties by label).
///
/// Pre-counted rows are used as-is; per-record outcome rows are counted by
/// label here.
pub fn pie_slices(data: &PieData) -> Vec<PieSlice> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    match data {
        PieData::SuccessBySite(rows) => {
            for row in rows {
                *counts.entry(row.site.as_str()).or_default() += row.success_count;
            }
        }
        PieData::OutcomeDistribution(rows) => {
            for row in rows {
                *counts.entry(row.outcome.label.as_str()).or_default() += 1;
            }
        }
    }

    let total: usize = counts.values().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut slices: Vec<PieSlice> = counts
        .into_iter()
        .filter(|(_, v)| *v > 0)
        .map(|(label, value)| PieSlice {
            label: label.to_string(),
            value,
            fraction: value as f64 / total as f64,
        })
        .collect();
    // Stable sort keeps the label order for equal counts.
    slices.sort_by(|a, b| b.value.cmp(&a.value));
    slices
}

/// Index of the slice under a point given as a fraction of a full turn,
/// measured clockwise from twelve o'clock.
fn slice_at(slices: &[PieSlice], turn: f64) -> Option<usize> {
    let mut acc = 0.0;
    for (i, s) in slices.iter().enumerate() {
        acc += s.fraction;
        if turn < acc {
            return Some(i);
        }
    }
    slices.len().checked_sub(1)
}

// ---------------------------------------------------------------------------
// Pie widget
// ---------------------------------------------------------------------------

/// Render a pie chart with a legend to its right.
pub fn pie_chart(ui: &mut Ui, title: &str, data: &PieData, colors: &ColorMap, height: f32) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(title);
    });

    if data.is_empty() {
        ui.allocate_ui(Vec2::new(ui.available_width(), height), |ui: &mut Ui| {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label("No launches match the selection.");
            });
        });
        return;
    }

    let slices = pie_slices(data);
    ui.horizontal(|ui: &mut Ui| {
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(height), Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = rect.width().min(rect.height()) * 0.45;

        let mut start = -FRAC_PI_2;
        for slice in &slices {
            let sweep = slice.fraction as f32 * TAU;
            let color = colors.color_for(&slice.label);
            painter.add(Shape::mesh(wedge(center, radius, start, sweep, color)));
            start += sweep;
        }
        if slices.len() > 1 {
            let mut angle = -FRAC_PI_2;
            for slice in &slices {
                let edge = center + radius * Vec2::angled(angle);
                painter.line_segment([center, edge], Stroke::new(1.0, Color32::WHITE));
                angle += slice.fraction as f32 * TAU;
            }
        }

        let hovered = response.hover_pos().and_then(|pos| {
            let d = pos - center;
            if d.length() > radius {
                return None;
            }
            let turn = ((d.y.atan2(d.x) + FRAC_PI_2).rem_euclid(TAU) / TAU) as f64;
            slice_at(&slices, turn)
        });
        if let Some(i) = hovered {
            let s = &slices[i];
            response.on_hover_text(format!(
                "{}: {} ({:.1}%)",
                s.label,
                s.value,
                s.fraction * 100.0
            ));
        }

        ui.add_space(16.0);
        ui.vertical(|ui: &mut Ui| {
            for s in &slices {
                ui.horizontal(|ui: &mut Ui| {
                    let (swatch, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
                    ui.painter().rect_filled(swatch, 2.0, colors.color_for(&s.label));
                    ui.label(RichText::new(format!(
                        "{}  {} ({:.1}%)",
                        s.label,
                        s.value,
                        s.fraction * 100.0
                    )));
                });
            }
        });
    });
}

/// Triangle fan covering one slice.
fn wedge(center: Pos2, radius: f32, start: f32, sweep: f32, color: Color32) -> Mesh {
    let segments = ((sweep / TAU) * 128.0).ceil().max(2.0) as u32;
    let mut mesh = Mesh::default();
    mesh.colored_vertex(center, color);
    for k in 0..=segments {
        let a = start + sweep * k as f32 / segments as f32;
        mesh.colored_vertex(center + radius * Vec2::angled(a), color);
    }
    for k in 1..=segments {
        mesh.add_triangle(0, k, k + 1);
    }
    mesh
}
