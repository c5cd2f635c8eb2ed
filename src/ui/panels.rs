use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets and statistics
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Row count ----
            ui.strong("Number of rows");
            let mut row_limit = state.params.row_limit;
            let range = state.config.row_slider_min..=state.config.row_slider_max;
            if ui.add(egui::Slider::new(&mut row_limit, range)).changed() {
                state.set_row_limit(row_limit);
            }
            ui.add_space(6.0);

            // ---- Category ----
            ui.strong("Filter by category");
            let current = state.params.category.to_string();
            let mut chosen: Option<String> = None;
            egui::ComboBox::from_id_salt("category")
                .selected_text(&current)
                .show_ui(ui, |ui: &mut Ui| {
                    for label in &state.categories {
                        let mut text = RichText::new(label);
                        if let Some(c) = state
                            .color_map
                            .as_ref()
                            .and_then(|cm| cm.color_for_label(label))
                        {
                            text = text.color(c);
                        }
                        if ui.selectable_label(current == *label, text).clicked() {
                            chosen = Some(label.clone());
                        }
                    }
                });
            if let Some(label) = chosen {
                state.set_category(&label);
            }
            ui.add_space(6.0);

            // ---- Value bounds ----
            let mut bounds_changed = false;
            ui.horizontal(|ui: &mut Ui| {
                bounds_changed |= ui
                    .checkbox(&mut state.min_enabled, "Minimum value")
                    .changed();
                bounds_changed |= ui
                    .add_enabled(
                        state.min_enabled,
                        egui::DragValue::new(&mut state.min_draft).speed(0.5),
                    )
                    .changed();
            });
            ui.horizontal(|ui: &mut Ui| {
                bounds_changed |= ui
                    .checkbox(&mut state.max_enabled, "Maximum value")
                    .changed();
                bounds_changed |= ui
                    .add_enabled(
                        state.max_enabled,
                        egui::DragValue::new(&mut state.max_draft).speed(0.5),
                    )
                    .changed();
            });
            if bounds_changed {
                state.apply_bounds();
            }

            if ui.small_button("Reset filters").clicked() {
                state.reset_filters();
            }

            ui.separator();

            // ---- Statistics ----
            ui.heading("Data Statistics");
            for line in &state.stats_lines {
                ui.monospace(line);
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("panda-dash");
        ui.separator();

        ui.label(&state.source_label);
        ui.separator();

        ui.label(format!(
            "{} rows loaded, {} shown",
            state.dataset.len(),
            state.result.filtered.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
