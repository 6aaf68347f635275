use eframe::egui::{self, Color32, RichText, Ui};

use crate::color::ACCENT;
use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Left side panel – page navigation
// ---------------------------------------------------------------------------

/// Render the sidebar with the DASHBOARD and DATA sections.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(8.0);
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new("Hospital Insights").strong().color(ACCENT));
    });
    ui.add_space(4.0);
    ui.separator();

    nav_section(ui, state, "DASHBOARD", &Page::DASHBOARD);
    ui.add_space(8.0);
    nav_section(ui, state, "DATA", &Page::DATA);
}

fn nav_section(ui: &mut Ui, state: &mut AppState, title: &str, pages: &[Page]) {
    ui.add_space(8.0);
    ui.label(RichText::new(title).small().color(Color32::GRAY));
    for &page in pages {
        if ui
            .selectable_label(state.page == page, page.label())
            .clicked()
        {
            state.set_page(page);
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the header strip: page title, dataset size and status.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong(state.page.label());
        ui.separator();
        ui.label(format!("{} hospitals loaded", state.dataset.len()));

        if let Some(msg) = state.status_message.clone() {
            ui.separator();
            ui.label(RichText::new(&msg).color(Color32::RED));
            if ui.small_button("✕").clicked() {
                state.status_message = None;
            }
        }
    });
}

/// A titled figure card used on the summary page.
pub fn stat_card(ui: &mut Ui, title: &str, value: &str, color: Color32) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(140.0);
        ui.vertical(|ui: &mut Ui| {
            ui.label(RichText::new(title).small().color(Color32::GRAY));
            ui.label(RichText::new(value).size(24.0).strong().color(color));
        });
    });
}
