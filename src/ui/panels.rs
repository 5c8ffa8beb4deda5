use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, FilterColumn};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(table) => table.clone(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            changed |= filter_section(
                ui,
                state,
                FilterColumn::Country,
                "Country",
                &dataset.countries,
            );
            ui.separator();
            changed |= filter_section(
                ui,
                state,
                FilterColumn::Industry,
                "Industry",
                &dataset.industries,
            );
        });

    // Recompute visible indices after any checkbox changes.
    if changed {
        state.refilter();
    }
}

/// One collapsible multi-select section. Returns true when the selection
/// changed this frame.
fn filter_section(
    ui: &mut Ui,
    state: &mut AppState,
    column: FilterColumn,
    title: &str,
    options: &[String],
) -> bool {
    let mut changed = false;

    let n_selected = match column {
        FilterColumn::Country => state.selection.countries.len(),
        FilterColumn::Industry => state.selection.industries.len(),
    };
    let header_text = format!("{title}  ({n_selected}/{})", options.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all(column);
                }
                if ui.small_button("None").clicked() {
                    state.select_none(column);
                }
            });

            let selected = match column {
                FilterColumn::Country => &mut state.selection.countries,
                FilterColumn::Industry => &mut state.selection.industries,
            };

            for value in options {
                let mut checked = selected.contains(value);
                if ui.checkbox(&mut checked, value).changed() {
                    if checked {
                        selected.insert(value.clone());
                    } else {
                        selected.remove(value);
                    }
                    changed = true;
                }
            }
        });

    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.dataset {
            ui.label(format!(
                "{} rows loaded, {} matching",
                table.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open billionaires data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}
