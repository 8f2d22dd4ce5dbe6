use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::FilteredTable;
use crate::data::model::Category;

const ROW_HEIGHT: f32 = 18.0;

/// Collapsed-by-default grid of the rows behind the chart.
pub fn filtered_table(ui: &mut Ui, filtered: &FilteredTable<'_>) {
    egui::CollapsingHeader::new(format!("View filtered data ({} rows)", filtered.len()))
        .id_salt("filtered_data")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            let rows: Vec<_> = filtered.rows().collect();

            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .vscroll(false)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::auto().at_least(40.0))
                .columns(Column::auto().at_least(90.0), 6)
                .header(20.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("#");
                    });
                    for name in Category::ALL
                        .iter()
                        .map(|c| c.column())
                        .chain(["time_days", "value"])
                    {
                        header.col(|ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                        let (source_row, rec) = rows[row.index()];
                        row.col(|ui| {
                            ui.label(source_row.to_string());
                        });
                        for category in Category::ALL {
                            row.col(|ui| {
                                ui.label(rec.category(category));
                            });
                        }
                        row.col(|ui| {
                            ui.label(rec.time_days.to_string());
                        });
                        row.col(|ui| {
                            ui.label(rec.value.to_string());
                        });
                    });
                });
        });
}
