use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::format::cell_text;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Filtered rows table (central panel, top)
// ---------------------------------------------------------------------------

/// Render the filtered rows, all columns, in dataset order.
pub fn filtered_table(ui: &mut Ui, state: &AppState, max_height: f32) {
    let dataset = &state.dataset;
    let indices = state.result.filtered.indices();
    let columns = dataset.column_names();
    let value_column = state.pipeline.value_column();
    let category_column = state.pipeline.category_column();
    let precision = state.config.precision;

    if indices.is_empty() {
        ui.label("No rows match the current filters.");
        return;
    }

    TableBuilder::new(ui)
        .id_salt("filtered_table")
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(70.0), columns.len())
        .min_scrolled_height(0.0)
        .max_scroll_height(max_height)
        .header(20.0, |mut header| {
            for col in columns {
                header.col(|ui| {
                    ui.strong(col);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, indices.len(), |mut row| {
                let Some(record) = dataset.row(indices[row.index()]) else {
                    return;
                };
                for col in columns {
                    let cell = record.get(col);
                    let text = cell
                        .map(|c| cell_text(c, col == value_column, precision))
                        .unwrap_or_default();
                    let color = (col == category_column)
                        .then(|| cell.zip(state.color_map.as_ref()))
                        .flatten()
                        .map(|(c, cm)| cm.color_for(c));

                    row.col(|ui| {
                        let mut text = RichText::new(text);
                        if let Some(c) = color {
                            text = text.color(c);
                        }
                        ui.label(text);
                    });
                }
            });
        });
}
