use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::projection::RawTableView;

const ROW_HEIGHT: f32 = 18.0;

/// Unfiltered dump of every prepared row and column.
pub fn raw_table(ui: &mut Ui, view: &RawTableView) {
    ui.push_id("raw_table", |ui: &mut Ui| {
        egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .vscroll(false)
                .columns(Column::auto().at_least(40.0), view.headers.len())
                .header(ROW_HEIGHT + 4.0, |mut header| {
                    for name in &view.headers {
                        header.col(|ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, view.rows.len(), |mut row| {
                        let cells = &view.rows[row.index()];
                        for cell in cells {
                            row.col(|ui| {
                                ui.label(cell);
                            });
                        }
                    });
                });
        });
    });
}
