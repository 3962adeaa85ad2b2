use chrono::Local;
use egui::{Color32, Ui};
use roster_business::{EmployeeActionCompute, EmployeeListCompute, workflow};
use roster_states::StateCtx;

/// Loading spinner, list errors and the outcome of the last failed mutation.
pub fn status_line(ctx: &mut StateCtx, ui: &mut Ui) {
    let list = ctx.compute::<EmployeeListCompute>();
    ui.horizontal(|ui| {
        if list.is_loading() {
            ui.spinner();
            ui.label("Loading employees...");
        } else if let Some(error) = list.error() {
            ui.colored_label(Color32::RED, format!("Error: {error}"));
        } else if let Some(loaded_at) = list.loaded_at() {
            ui.weak(format!(
                "{} employees, refreshed at {}",
                list.employees.len(),
                loaded_at.with_timezone(&Local).format("%H:%M:%S")
            ));
        }
    });

    let Some(message) = ctx.compute::<EmployeeActionCompute>().error_message() else {
        return;
    };
    let dismissed = ui
        .horizontal(|ui| {
            ui.colored_label(Color32::RED, message);
            ui.button("Dismiss").clicked()
        })
        .inner;
    if dismissed {
        workflow::clear_action_status(ctx);
    }
}
