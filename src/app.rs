use std::sync::Arc;

use eframe::egui;

use crate::config::DASHBOARD_TITLE;
use crate::data::filter::SiteChoice;
use crate::data::model::LaunchDataset;
use crate::state::AppState;
use crate::ui::{panels, pie, scatter, table};

const PIE_HEIGHT: f32 = 300.0;
const SCATTER_HEIGHT: f32 = 380.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashboardApp {
    pub state: AppState,
}

impl LaunchDashboardApp {
    pub fn new(dataset: Arc<LaunchDataset>) -> Self {
        Self {
            state: AppState::new(dataset),
        }
    }
}

impl eframe::App for LaunchDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: selection ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let state = &self.state;
            ui.vertical_centered(|ui| {
                ui.heading(egui::RichText::new(DASHBOARD_TITLE).size(24.0));
            });
            ui.add_space(8.0);

            let pie_colors = match state.selection.site {
                SiteChoice::All => &state.site_colors,
                SiteChoice::Site(_) => &state.outcome_colors,
            };
            pie::pie_chart(
                ui,
                &state.views.pie_chart.title,
                &state.views.pie,
                pie_colors,
                PIE_HEIGHT,
            );
            ui.separator();

            scatter::scatter_chart(
                ui,
                &state.views.scatter_chart.title,
                &state.views.scatter,
                state.selection.payload,
                &state.outcome_axis,
                &state.category_colors,
                SCATTER_HEIGHT,
            );
            ui.separator();

            table::scatter_table(ui, &state.views.scatter, &state.category_colors);
        });
    }
}
