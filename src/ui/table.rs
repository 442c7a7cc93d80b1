use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::ColorMap;
use crate::data::filter::ScatterRow;

/// Rows behind the scatter chart, with the raw booster version.
pub fn scatter_table(ui: &mut Ui, rows: &[ScatterRow], colors: &ColorMap) {
    if rows.is_empty() {
        return;
    }

    TableBuilder::new(ui)
        .id_salt("scatter_rows")
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Payload (kg)", "Outcome", "Category", "Booster Version", "Site"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut table_row| {
                let r = &rows[table_row.index()];
                table_row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.0}", r.payload_mass_kg));
                });
                table_row.col(|ui: &mut Ui| {
                    ui.label(&r.outcome.label);
                });
                table_row.col(|ui: &mut Ui| {
                    ui.label(
                        RichText::new(&r.booster_category)
                            .color(colors.color_for(&r.booster_category)),
                    );
                });
                table_row.col(|ui: &mut Ui| {
                    ui.label(&r.booster_version);
                });
                table_row.col(|ui: &mut Ui| {
                    ui.label(&r.site);
                });
            });
        });
}
