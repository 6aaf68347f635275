use eframe::egui;

use crate::state::{AppState, Page};
use crate::ui::{pages, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HospitalInsightsApp {
    pub state: AppState,
}

impl HospitalInsightsApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for HospitalInsightsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Left side panel: navigation ----
        egui::SidePanel::left("nav_panel")
            .exact_width(200.0)
            .resizable(false)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Top panel: page title and status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: current page ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.page {
            Page::Summary => {
                egui::ScrollArea::vertical().show(ui, |ui| pages::summary_page(ui, &self.state));
            }
            Page::Companies => pages::companies_page(ui, &mut self.state),
            Page::Map => pages::map_page(ui, &mut self.state),
            Page::Analytics => pages::analytics_page(ui, &self.state),
            Page::Table => table::table_page(ui, &mut self.state),
        });
    }
}
