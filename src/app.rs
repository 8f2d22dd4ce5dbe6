use std::path::PathBuf;

use eframe::egui;

use crate::pipeline::View;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SpaghettiApp {
    pub state: AppState,
}

impl SpaghettiApp {
    pub fn new(data_path: PathBuf) -> Self {
        Self {
            state: AppState::new(data_path),
        }
    }
}

/// Deferred mutations collected while the view borrows the state.
enum Followup {
    Nothing,
    Retry,
    Hover(Option<String>),
}

impl eframe::App for SpaghettiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: heading and row counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart and raw data ----
        let followup = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let plot_height = (ui.available_height() * 0.72).max(260.0);

                match self.state.view() {
                    View::LoadFailed { lines } => {
                        if plot::load_failed(ui, &lines) {
                            Followup::Retry
                        } else {
                            Followup::Nothing
                        }
                    }
                    View::EmptySelection => {
                        plot::empty_selection(ui);
                        Followup::Hover(None)
                    }
                    View::Chart { spec, filtered } => egui::ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            let hovered = plot::spaghetti_plot(
                                ui,
                                &spec,
                                filtered.table,
                                self.state.highlight.as_deref(),
                                plot_height,
                            );
                            ui.add_space(8.0);
                            table::filtered_table(ui, &filtered);
                            Followup::Hover(hovered)
                        })
                        .inner,
                }
            })
            .inner;

        match followup {
            Followup::Nothing => {}
            Followup::Retry => self.state.load(),
            Followup::Hover(highlight) => {
                // Redraw at once so the emphasis follows the pointer.
                if self.state.set_highlight(highlight) {
                    ctx.request_repaint();
                }
            }
        }
    }
}
