use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::color::ColorScale;
use crate::config::PAGE_HEADING;
use crate::data::model::Category;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: one multi-select per category.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Display filters");
    ui.separator();

    // The Arc keeps the option sets alive while `state` is mutated below.
    let Some(table) = state.table.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    let scale = ColorScale::for_health_status(table.options(Category::HealthStatus));

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for category in Category::ALL {
                let all_values = table.options(category);

                let n_selected = state.selection.get(&category).map_or(0, |s| s.len());
                let n_total = all_values.len();
                let header_text = format!("{}  ({n_selected}/{n_total})", category.label());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(category.column())
                    .default_open(category != Category::Patient)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(category);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(category);
                            }
                        });

                        for val in all_values {
                            let mut text = RichText::new(val);
                            if category == Category::HealthStatus {
                                text = text.color(scale.color_for(val));
                            }

                            let mut checked = state.is_selected(category, val);
                            if ui.checkbox(&mut checked, text).changed() {
                                state.toggle(category, val);
                            }
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the heading row with load status.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(PAGE_HEADING);
        ui.separator();

        match &state.table {
            Some(table) if table.is_empty() => {
                ui.label(RichText::new("data file has no rows").weak());
            }
            Some(table) => {
                ui.label(format!(
                    "{} rows loaded, {} visible",
                    table.len(),
                    state.visible_indices.len()
                ));
            }
            None => {
                ui.label(RichText::new("no data").weak());
            }
        }

        ui.separator();
        ui.label(RichText::new(state.data_path.display().to_string()).monospace().weak());
    });
}
