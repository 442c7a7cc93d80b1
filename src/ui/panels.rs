use eframe::egui::{self, Color32, RichText, Ui};

use crate::config::{DASHBOARD_TITLE, PAYLOAD_SLIDER_MARKS, PAYLOAD_SLIDER_MIN, PAYLOAD_SLIDER_STEP};
use crate::data::filter::{PayloadRange, SiteChoice};
use crate::state::AppState;

const ALL_SITES_LABEL: &str = "All Sites";

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left panel: site dropdown and payload range.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // ---- Launch site dropdown ----
    ui.strong("Launch Site");
    ui.add(
        egui::TextEdit::singleline(&mut state.site_search)
            .hint_text("Select a Launch Site"),
    );

    let current = match &state.selection.site {
        SiteChoice::All => ALL_SITES_LABEL.to_string(),
        SiteChoice::Site(s) => s.clone(),
    };
    let sites: Vec<String> = state.matching_sites().into_iter().map(str::to_string).collect();
    let mut picked: Option<SiteChoice> = None;

    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(&current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(state.selection.site == SiteChoice::All, ALL_SITES_LABEL)
                .clicked()
            {
                picked = Some(SiteChoice::All);
            }
            for site in &sites {
                let is_current = matches!(&state.selection.site, SiteChoice::Site(s) if s == site);
                if ui.selectable_label(is_current, site).clicked() {
                    picked = Some(SiteChoice::Site(site.clone()));
                }
            }
        });

    if let Some(site) = picked {
        state.set_site(site);
    }
    ui.separator();

    // ---- Payload range ----
    ui.strong("Payload range (kg)");
    let mut range = state.selection.payload;
    let max = state.slider_max;

    ui.add(
        egui::Slider::new(&mut range.low, PAYLOAD_SLIDER_MIN..=max)
            .step_by(PAYLOAD_SLIDER_STEP)
            .text("min"),
    );
    ui.add(
        egui::Slider::new(&mut range.high, PAYLOAD_SLIDER_MIN..=max)
            .step_by(PAYLOAD_SLIDER_STEP)
            .text("max"),
    );
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for mark in PAYLOAD_SLIDER_MARKS.iter().filter(|m| **m <= max) {
            ui.small(format!("{mark:.0}"));
        }
    });
    if range.is_degenerate() {
        ui.label(RichText::new("Lower bound exceeds upper bound").color(Color32::YELLOW));
    }

    if range != state.selection.payload {
        state.set_payload(PayloadRange::new(range.low, range.high));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with record counts.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong(DASHBOARD_TITLE);
        ui.separator();
        ui.label(format!(
            "{} launches loaded ({} layout), {} in scatter",
            state.dataset.len(),
            state.dataset.variant,
            state.views.scatter.len()
        ));
    });
}
