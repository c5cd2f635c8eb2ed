use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PandaDashApp {
    pub state: AppState,
}

impl PandaDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for PandaDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: source and row counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: filters and statistics ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table above histogram ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let table_height = (ui.available_height() * 0.45).max(120.0);

            ui.heading("Filtered Data");
            table::filtered_table(ui, &self.state, table_height);
            ui.separator();

            ui.heading("Value Distribution");
            plot::value_histogram(ui, &self.state);
        });
    }
}
