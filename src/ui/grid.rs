use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column as GridColumn, TableBuilder};
use inventory_dashboard::data::Column;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Inventory grid (central panel)
// ---------------------------------------------------------------------------

/// Render the current subset of rows with a record count.
pub fn inventory_grid(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No inventory loaded  (File → Open… or File → Reload)");
        });
        return;
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Inventory Data");
        ui.label(format!("{} of {} records", state.visible.len(), table.len()));
    });
    ui.separator();

    let rows = state.visible.rows();
    let row_height = state.config.display.row_height;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(GridColumn::auto().at_least(90.0))
        .column(GridColumn::initial(240.0).at_least(120.0))
        .columns(GridColumn::auto().at_least(70.0), 4)
        .column(GridColumn::remainder())
        .header(row_height + 4.0, |mut header| {
            for column in Column::ALL {
                header.col(|ui: &mut Ui| {
                    ui.strong(column.name());
                });
            }
        })
        .body(|body| {
            body.rows(row_height, rows.len(), |mut grid_row| {
                let row = &rows[grid_row.index()];
                for column in Column::ALL {
                    grid_row.col(|ui: &mut Ui| {
                        let text = RichText::new(row.display(column));
                        let text = match (column, &state.category_colors) {
                            (Column::Category, Some(colors)) => {
                                text.color(colors.color_for(&row.category))
                            }
                            _ => text,
                        };
                        ui.label(text);
                    });
                }
            });
        });
}
