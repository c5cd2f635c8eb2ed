use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Value histogram (central panel, bottom)
// ---------------------------------------------------------------------------

/// Render the distribution of the value column over the filtered rows.
pub fn value_histogram(ui: &mut Ui, state: &AppState) {
    let Some(histogram) = &state.histogram else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No data to display");
        });
        return;
    };

    let width = histogram.bin_width();
    let bars: Vec<Bar> = histogram
        .bars()
        .map(|(center, count)| {
            Bar::new(center, count as f64)
                .width(width)
                .fill(Color32::from_rgba_unmultiplied(70, 130, 180, 180))
                .stroke((1.0, Color32::BLACK))
        })
        .collect();

    let chart = BarChart::new(bars).name("Frequency");

    Plot::new("value_histogram")
        .legend(egui_plot::Legend::default())
        .x_axis_label(state.pipeline.value_column().to_string())
        .y_axis_label("Frequency")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}
