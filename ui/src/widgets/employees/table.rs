//! Sortable employee grid, Typora-like: thin outer border, shaded header.

use egui::{Button, Color32, Frame, InnerResponse, Margin, RichText, Stroke, TextEdit, Ui};
use roster_business::{Employee, EmployeeColumn, EmployeeTableCompute, EmployeeTableQuery, workflow};
use roster_states::StateCtx;

const TABLE_BORDER_COLOR: Color32 = Color32::from_rgb(200, 200, 200);

const HEADER_BG_COLOR: Color32 = Color32::from_rgb(245, 245, 245);

fn header_cell<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> InnerResponse<R> {
    Frame::NONE
        .fill(HEADER_BG_COLOR)
        .inner_margin(Margin::symmetric(8, 8))
        .show(ui, add_contents)
}

fn data_cell<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> InnerResponse<R> {
    Frame::NONE
        .inner_margin(Margin::symmetric(8, 6))
        .show(ui, add_contents)
}

enum RowAction {
    Sort(EmployeeColumn),
    Edit(Employee),
    Delete(Employee),
}

/// Global filter input; typing filters across every column.
pub fn search_box(ctx: &mut StateCtx, ui: &mut Ui) {
    let mut filter = ctx.state::<EmployeeTableQuery>().global_filter.clone();
    let changed = ui
        .horizontal(|ui| {
            let label = ui.label("Search:");
            ui.add(
                TextEdit::singleline(&mut filter)
                    .hint_text("Search employees")
                    .desired_width(240.0),
            )
            .labelled_by(label.id)
            .changed()
        })
        .inner;

    if changed {
        workflow::set_global_filter(ctx, filter);
    }
}

fn header_text(view: &EmployeeTableCompute, column: EmployeeColumn) -> String {
    match view.sort_for(column) {
        Some(sort) => format!("{}{}", column.header(), sort.direction.indicator()),
        None => column.header().to_owned(),
    }
}

/// The current page of employees with per-row Edit and Delete.
pub fn employee_table(ctx: &mut StateCtx, ui: &mut Ui) {
    let view = ctx.compute::<EmployeeTableCompute>().clone();
    let mut action = None;

    Frame::NONE
        .stroke(Stroke::new(1.0, TABLE_BORDER_COLOR))
        .inner_margin(Margin::ZERO)
        .show(ui, |ui| {
            egui::Grid::new("employee_table")
                .num_columns(EmployeeColumn::ALL.len() + 1)
                .striped(true)
                .spacing([16.0, 0.0])
                .min_col_width(80.0)
                .show(ui, |ui| {
                    for column in EmployeeColumn::ALL {
                        header_cell(ui, |ui| {
                            let text = RichText::new(header_text(&view, column)).strong();
                            if ui
                                .add(Button::new(text).frame(false))
                                .on_hover_text("Sort")
                                .clicked()
                            {
                                action = Some(RowAction::Sort(column));
                            }
                        });
                    }
                    header_cell(ui, |ui| {
                        ui.strong("Actions");
                    });
                    ui.end_row();

                    if view.rows.is_empty() {
                        data_cell(ui, |ui| {
                            ui.weak("No employees");
                        });
                        ui.end_row();
                    }

                    for employee in &view.rows {
                        for column in EmployeeColumn::ALL {
                            data_cell(ui, |ui| {
                                ui.label(&*column.cell_text(employee));
                            });
                        }
                        data_cell(ui, |ui| {
                            ui.horizontal(|ui| {
                                if ui.button("Edit").clicked() {
                                    action = Some(RowAction::Edit(employee.clone()));
                                }
                                if ui.button("Delete").clicked() {
                                    action = Some(RowAction::Delete(employee.clone()));
                                }
                            });
                        });
                        ui.end_row();
                    }
                });
        });

    match action {
        Some(RowAction::Sort(column)) => workflow::toggle_sort(ctx, column),
        Some(RowAction::Edit(employee)) => workflow::begin_edit(ctx, &employee),
        Some(RowAction::Delete(employee)) => workflow::request_delete(ctx, &employee),
        None => {}
    }
}
