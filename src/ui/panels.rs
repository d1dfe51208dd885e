use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use inventory_dashboard::data::Column;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Header – logo, titles and banner
// ---------------------------------------------------------------------------

pub fn header(ui: &mut Ui, state: &AppState) {
    let display = &state.config.display;
    ui.horizontal(|ui: &mut Ui| {
        if let Some(logo) = &state.logo {
            ui.add(
                egui::Image::from_bytes("bytes://logo.png", logo.clone())
                    .max_width(48.0)
                    .max_height(48.0),
            );
        }
        ui.vertical(|ui: &mut Ui| {
            ui.label(RichText::new(&display.title).size(24.0).strong());
            ui.label(RichText::new(&display.subtitle).size(14.0));
        });
    });

    egui::Frame::default()
        .fill(Color32::from_rgb(0x4A, 0x90, 0xE2))
        .inner_margin(16.0)
        .show(ui, |ui: &mut Ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(
                    RichText::new(&display.banner)
                        .size(36.0)
                        .strong()
                        .color(Color32::WHITE),
                );
            });
        });
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the filter panel and refilter when any control changed.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(table) = &state.table else {
        ui.label("No inventory loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the closures.
    let summary = table.summary().clone();
    let dates_available = state.dates_available();
    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Date ----
            ui.strong("Date");
            ui.add_enabled_ui(dates_available, |ui: &mut Ui| {
                ui.horizontal(|ui: &mut Ui| {
                    changed |= ui
                        .checkbox(&mut state.date_filter_on, "Filter by date")
                        .changed();
                    let picker = egui_extras::DatePickerButton::new(&mut state.picked_date)
                        .id_salt("date_filter");
                    changed |= ui.add(picker).changed();
                });
            });
            if !dates_available {
                ui.small("No valid dates in this table.");
            }
            ui.separator();

            // ---- Item description search ----
            ui.strong("Search Item Description");
            changed |= ui
                .text_edit_singleline(&mut state.predicates.description)
                .changed();
            ui.separator();

            // ---- Multi-select columns ----
            let choices = [
                (Column::Category, &summary.categories),
                (Column::Uom, &summary.uoms),
                (Column::Vendor, &summary.vendors),
            ];
            for (column, values) in choices {
                choice_list(ui, state, column, values);
            }
            ui.separator();

            // ---- Numeric ranges ----
            if let Some(bounds) = summary.quantity_bounds {
                ui.strong("Quantity Range");
                changed |= range_sliders(ui, &mut state.predicates.quantity, bounds);
            }
            if let Some(bounds) = summary.price_bounds {
                ui.strong("Price Range");
                changed |= range_sliders(ui, &mut state.predicates.price, bounds);
            }
            ui.separator();

            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }

            for warning in state.warnings.iter().chain(&state.logo_warning) {
                ui.label(RichText::new(format!("⚠ {warning}")).color(Color32::YELLOW));
            }
        });

    if changed {
        state.refilter();
    }
}

/// Checkbox list for one multi-select column. Nothing ticked means "all".
fn choice_list(ui: &mut Ui, state: &mut AppState, column: Column, values: &[String]) {
    let selected = match column {
        Column::Category => &state.predicates.categories,
        Column::Uom => &state.predicates.uoms,
        _ => &state.predicates.vendors,
    };
    let summary = if selected.is_empty() {
        "all".to_string()
    } else {
        format!("{}/{}", selected.len(), values.len())
    };
    let ticked: Vec<bool> = values.iter().map(|v| selected.contains(v)).collect();

    let mut toggled: Option<&String> = None;
    let mut cleared = false;
    egui::CollapsingHeader::new(RichText::new(format!("{column}  ({summary})")).strong())
        .id_salt(column.name())
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if ui.small_button("All").clicked() {
                cleared = true;
            }
            for (value, is_ticked) in values.iter().zip(ticked) {
                let mut checked = is_ticked;
                if ui.checkbox(&mut checked, value.as_str()).changed() {
                    toggled = Some(value);
                }
            }
        });

    // toggle_choice / clear_choices refilter on their own.
    if cleared {
        state.clear_choices(column);
    } else if let Some(value) = toggled {
        state.toggle_choice(column, value);
    }
}

/// Two sliders for an inclusive range, clamped to the observed bounds.
fn range_sliders(
    ui: &mut Ui,
    range: &mut Option<std::ops::RangeInclusive<i64>>,
    (min, max): (i64, i64),
) -> bool {
    let (mut lo, mut hi) = range
        .as_ref()
        .map(|r| (*r.start(), *r.end()))
        .unwrap_or((min, max));

    let mut changed = ui
        .add(egui::Slider::new(&mut lo, min..=max).text("min"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut hi, min..=max).text("max"))
        .changed();

    if changed {
        if lo > hi {
            std::mem::swap(&mut lo, &mut hi);
        }
        *range = Some(lo..=hi);
    }
    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.load_configured();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} records loaded, {} match",
                table.len(),
                state.visible.len()
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
        .set_title("Open inventory spreadsheet")
        .add_filter(
            "Supported files",
            &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv", "json", "parquet", "pq"],
        )
        .add_filter("Excel", &["xlsx", "xlsm", "xlsb", "xls"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_location(&path.to_string_lossy());
    }
}
