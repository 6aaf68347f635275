use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::{generate_palette, size_color, ACCENT, OTHER};
use crate::data::model::SizeCategory;
use crate::state::{AppState, CompanyCard, MapMode};
use crate::ui::panels::stat_card;
use crate::ui::plot::{bar_chart, map_plot, BarSpec};

const NAME_CHARS: usize = 25;
const DESCRIPTION_CHARS: usize = 120;

/// Cut `text` to `max` characters, marking the cut with "...".
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

pub fn summary_page(ui: &mut Ui, state: &AppState) {
    let summary = &state.summary;
    ui.label("A comprehensive overview of hospitals across the United States.");
    ui.add_space(8.0);

    ui.horizontal_wrapped(|ui: &mut Ui| {
        stat_card(ui, "Total Companies", &summary.total.to_string(), ACCENT);
        for size in [SizeCategory::Small, SizeCategory::Medium, SizeCategory::Large] {
            stat_card(
                ui,
                &format!("{size} Hospitals"),
                &summary.size_count(size).to_string(),
                size_color(size),
            );
        }
        let beds = summary
            .average_beds
            .map(|b| format!("{b:.0}"))
            .unwrap_or_else(|| "N/A".to_string());
        stat_card(ui, "Average Beds", &beds, Color32::DARK_GRAY);
    });
    ui.add_space(12.0);

    ui.columns(2, |cols| {
        cols[0].strong("Companies by Size");
        let size_bars: Vec<BarSpec> = SizeCategory::DISPLAY_ORDER
            .iter()
            .map(|&size| BarSpec {
                label: size.to_string(),
                value: summary.size_count(size) as f64,
                color: size_color(size),
            })
            .collect();
        bar_chart(
            &mut cols[0],
            "size_chart",
            &size_bars,
            "Number of Hospitals",
            false,
        );

        cols[1].strong("Specialty Focus");
        let top = &summary.top_specialties;
        let palette = generate_palette(top.entries.len());
        let mut specialty_bars: Vec<BarSpec> = top
            .entries
            .iter()
            .zip(palette)
            .map(|((name, count), color)| BarSpec {
                label: name.clone(),
                value: *count as f64,
                color,
            })
            .collect();
        specialty_bars.push(BarSpec {
            label: "Other".to_string(),
            value: top.remainder as f64,
            color: OTHER,
        });
        bar_chart(
            &mut cols[1],
            "specialty_chart",
            &specialty_bars,
            "Hospitals",
            false,
        );
    });
}

// ---------------------------------------------------------------------------
// Companies
// ---------------------------------------------------------------------------

pub fn companies_page(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Featured Companies");
    ui.add_space(4.0);

    ui.horizontal(|ui: &mut Ui| {
        ui.label("🔍");
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.search)
                .hint_text("Search companies...")
                .desired_width(320.0),
        );
        if response.changed() {
            state.refresh_cards();
        }
        if state.cards_are_sample && !state.search.trim().is_empty() {
            ui.label(
                RichText::new("No matches, showing a sample").color(Color32::GRAY),
            );
        }
    });
    ui.add_space(8.0);

    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        ui.horizontal_wrapped(|ui: &mut Ui| {
            for card in &state.cards {
                company_card(ui, card);
            }
        });
    });
}

fn company_card(ui: &mut Ui, card: &CompanyCard) {
    let r = &card.record;
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(250.0);
        ui.vertical(|ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(40.0, 40.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 20.0, Color32::from_gray(235));
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    r.initial,
                    egui::FontId::proportional(20.0),
                    ACCENT,
                );
                ui.strong(truncate(&r.organization, NAME_CHARS));
            });

            ui.horizontal_wrapped(|ui: &mut Ui| {
                badge(ui, r.size.label(), size_color(r.size));
                badge(ui, &r.location, ACCENT);
            });

            ui.label(truncate(&card.description, DESCRIPTION_CHARS));
            ui.label(RichText::new(format!("Founded {}", card.founded)).small());
        });
    });
}

fn badge(ui: &mut Ui, text: &str, color: Color32) {
    ui.label(
        RichText::new(format!(" {text} "))
            .small()
            .color(Color32::WHITE)
            .background_color(color),
    );
}

// ---------------------------------------------------------------------------
// Map
// ---------------------------------------------------------------------------

pub fn map_page(ui: &mut Ui, state: &mut AppState) {
    ui.label("Geographic distribution of hospitals across the United States.");
    ui.add_space(4.0);

    let mut mode = state.map.mode;
    let mut changed = false;
    ui.horizontal(|ui: &mut Ui| {
        changed |= ui.radio_value(&mut mode, MapMode::All, "All Hospitals").changed();
        changed |= ui.radio_value(&mut mode, MapMode::BySize, "By Size").changed();
        changed |= ui
            .radio_value(&mut mode, MapMode::BySpecialty, "By Specialty")
            .changed();
    });

    ui.horizontal(|ui: &mut Ui| {
        changed |= value_combo(
            ui,
            "size_filter",
            "Select a size",
            &state.unique_sizes,
            &mut state.map.size,
            mode == MapMode::BySize,
        );
        changed |= value_combo(
            ui,
            "specialty_filter",
            "Select a specialty",
            &state.unique_specialties,
            &mut state.map.specialty,
            mode == MapMode::BySpecialty,
        );
    });

    if changed {
        state.set_map_mode(mode);
    }
    if state.map.skipped > 0 {
        ui.label(
            RichText::new(format!(
                "{} hospitals without coordinates are not shown",
                state.map.skipped
            ))
            .small()
            .color(Color32::GRAY),
        );
    }

    map_plot(ui, &state.map);
}

/// Drop-down over `values`; returns whether the selection changed.
fn value_combo(
    ui: &mut Ui,
    id: &str,
    placeholder: &str,
    values: &[String],
    selected: &mut Option<String>,
    enabled: bool,
) -> bool {
    let mut changed = false;
    ui.add_enabled_ui(enabled, |ui: &mut Ui| {
        egui::ComboBox::from_id_salt(id)
            .selected_text(selected.as_deref().unwrap_or(placeholder))
            .width(220.0)
            .show_ui(ui, |ui: &mut Ui| {
                for value in values {
                    let is_selected = selected.as_deref() == Some(value.as_str());
                    if ui.selectable_label(is_selected, value).clicked() && !is_selected {
                        *selected = Some(value.clone());
                        changed = true;
                    }
                }
            });
    });
    changed
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

pub fn analytics_page(ui: &mut Ui, state: &AppState) {
    ui.label("Advanced analytics and insights about the hospital data.");
    ui.add_space(8.0);

    let view = &state.summary;
    ui.columns(2, |cols| {
        cols[0].strong("Average Beds by Hospital Size");
        let bars: Vec<BarSpec> = view
            .beds_by_size
            .iter()
            .map(|&(size, mean)| BarSpec {
                label: size.to_string(),
                value: mean,
                color: size_color(size),
            })
            .collect();
        if bars.is_empty() {
            cols[0].label("No bed counts in this dataset.");
        } else {
            bar_chart(
                &mut cols[0],
                "beds_by_size",
                &bars,
                "Average Number of Beds",
                false,
            );
        }

        cols[1].strong("Top Locations");
        let bars: Vec<BarSpec> = view
            .top_locations
            .iter()
            .map(|(location, count)| BarSpec {
                label: location.clone(),
                value: *count as f64,
                color: ACCENT,
            })
            .collect();
        bar_chart(&mut cols[1], "top_locations", &bars, "Count", true);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Mercy", 25), "Mercy");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("ééééé", 2), "éé...");
        assert_eq!(truncate("abc", 3), "abc");
    }
}
