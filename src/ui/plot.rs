use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoint, PlotPoints, Points};

use crate::chart::{ChartSpec, tooltip_fields};
use crate::config::PICK_RADIUS;
use crate::data::model::MeasurementTable;
use crate::pipeline::EMPTY_SELECTION_MESSAGE;

// ---------------------------------------------------------------------------
// Spaghetti plot (central panel)
// ---------------------------------------------------------------------------

/// Draw `spec` with `highlight` emphasised and return the patient code
/// under the pointer, if any.
pub fn spaghetti_plot(
    ui: &mut Ui,
    spec: &ChartSpec,
    table: &MeasurementTable,
    highlight: Option<&str>,
    height: f32,
) -> Option<String> {
    if !spec.title.is_empty() {
        ui.heading(&spec.title);
    }

    let plot_response = Plot::new("spaghetti_plot")
        .legend(Legend::default())
        .x_axis_label(spec.x_label)
        .y_axis_label(spec.y_label)
        .show_grid([false, true])
        .show_x(false)
        .show_y(false)
        .height(height)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let hovered = plot_ui.pointer_coordinate().and_then(|coord| {
                let pointer = plot_ui.screen_from_plot(coord);
                spec.pick_nearest(
                    pointer,
                    |x, y| plot_ui.screen_from_plot(PlotPoint::new(x, y)),
                    PICK_RADIUS,
                )
            });

            // Faded series first so the highlighted patient is drawn on top.
            let mut order: Vec<_> = spec
                .series
                .iter()
                .map(|series| (series, spec.mark_style(series, highlight)))
                .collect();
            order.sort_by_key(|(_, style)| style.highlighted);

            // Unnamed marks stay out of the legend.
            for (series, style) in order {
                plot_ui.line(
                    Line::new(PlotPoints::from(series.xy()))
                        .color(style.line_color)
                        .width(style.stroke_width),
                );
                for (status, xy) in series.points_by_status() {
                    plot_ui.points(
                        Points::new(PlotPoints::from(xy))
                            .color(spec.point_color(status, &style))
                            .shape(MarkerShape::Circle)
                            .filled(false)
                            .radius(style.point_radius),
                    );
                }
            }

            // Legend-only entries in full colour, one per status.
            for (status, color) in spec.color_scale.legend_entries() {
                plot_ui.points(
                    Points::new(PlotPoints::new(Vec::new()))
                        .name(status)
                        .color(color)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }

            hovered
        });

    let hovered = plot_response.inner?;
    let row = spec.point(hovered)?.row;
    let record = table.records.get(row)?;

    plot_response.response.on_hover_ui_at_pointer(|ui: &mut Ui| {
        egui::Grid::new("point_tooltip").show(ui, |ui: &mut Ui| {
            for (label, value) in tooltip_fields(record) {
                ui.label(label);
                ui.strong(value);
                ui.end_row();
            }
        });
    });

    Some(record.code.clone())
}

// ---------------------------------------------------------------------------
// Halted states
// ---------------------------------------------------------------------------

/// Show the load failure. Returns true when the user asked to retry.
pub fn load_failed(ui: &mut Ui, lines: &[String]) -> bool {
    ui.add_space(12.0);
    for line in lines {
        ui.label(RichText::new(line).color(Color32::RED));
    }
    ui.add_space(8.0);
    ui.button("Retry").clicked()
}

/// Show the empty-selection warning in place of the chart.
pub fn empty_selection(ui: &mut Ui) {
    ui.add_space(12.0);
    ui.label(RichText::new(EMPTY_SELECTION_MESSAGE).color(Color32::from_rgb(230, 160, 0)));
}
