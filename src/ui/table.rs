use std::fs::File;
use std::io::BufWriter;

use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::error::ExportError;
use crate::data::export::write_csv;
use crate::data::model::Record;
use crate::data::table::{paginate, SortDirection, TableColumn};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Table view (central panel)
// ---------------------------------------------------------------------------

/// Filterable, sortable, paginated view of every record.
pub fn table_page(ui: &mut Ui, state: &mut AppState) {
    ui.label("Complete dataset in tabular format with filtering and sorting capabilities.");
    ui.add_space(4.0);

    filter_row(ui, state);

    let rows = state.table.apply(&state.dataset);
    let (page_rows, pages) = paginate(&rows, state.table_page, state.display.table_page_size);
    state.table_page = state.table_page.min(pages - 1);

    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Export CSV").clicked() {
            if let Some(Err(e)) = export_dialog(&rows) {
                state.status_message = Some(format!("Export failed: {e}"));
            }
        }
        ui.separator();
        ui.label(format!("{} rows", rows.len()));
        ui.separator();
        if ui
            .add_enabled(state.table_page > 0, egui::Button::new("◀"))
            .clicked()
        {
            state.table_page -= 1;
        }
        ui.label(format!("Page {} of {pages}", state.table_page + 1));
        if ui
            .add_enabled(state.table_page + 1 < pages, egui::Button::new("▶"))
            .clicked()
        {
            state.table_page += 1;
        }
    });
    ui.add_space(4.0);

    let sort = state.table.sort;
    let mut clicked: Option<TableColumn> = None;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(
            Column::auto().at_least(100.0).clip(true),
            TableColumn::ALL.len(),
        )
        .min_scrolled_height(0.0)
        .header(24.0, |mut header| {
            for column in TableColumn::ALL {
                header.col(|ui| {
                    let arrow = match sort {
                        Some((c, SortDirection::Ascending)) if c == column => " ▲",
                        Some((c, SortDirection::Descending)) if c == column => " ▼",
                        _ => "",
                    };
                    let title = RichText::new(format!("{}{arrow}", column.title())).strong();
                    if ui.button(title).clicked() {
                        clicked = Some(column);
                    }
                });
            }
        })
        .body(|mut body| {
            for record in page_rows {
                body.row(20.0, |mut row| {
                    for column in TableColumn::ALL {
                        row.col(|ui| {
                            ui.label(column.display(record));
                        });
                    }
                });
            }
        });

    if let Some(column) = clicked {
        state.table.toggle_sort(column);
        log::debug!("table sort: {:?}", state.table.sort);
    }
}

/// One text box per column; editing any filter returns to the first page.
fn filter_row(ui: &mut Ui, state: &mut AppState) {
    egui::CollapsingHeader::new("Column filters")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("table_filters")
                .num_columns(2)
                .show(ui, |ui: &mut Ui| {
                    for column in TableColumn::ALL {
                        ui.label(column.title());
                        let mut text = state.table.filter_text(column).to_string();
                        if ui.text_edit_singleline(&mut text).changed() {
                            state.table.set_filter(column, text);
                            state.table_page = 0;
                        }
                        ui.end_row();
                    }
                });
        });
}

/// Ask for a destination and write `rows` there. `None` if cancelled.
fn export_dialog(rows: &[&Record]) -> Option<Result<usize, ExportError>> {
    let path = rfd::FileDialog::new()
        .set_title("Export table")
        .set_file_name("hospitals.csv")
        .add_filter("CSV", &["csv"])
        .save_file()?;

    let result = File::create(&path)
        .map_err(ExportError::from)
        .and_then(|file| write_csv(rows.iter().copied(), BufWriter::new(file)));
    match &result {
        Ok(n) => log::info!("Exported {n} rows to {}", path.display()),
        Err(e) => log::warn!("Export to {} failed: {e}", path.display()),
    }
    Some(result)
}
