use egui::{Align2, Ui, Window};
use roster_business::{CONFIRM_DELETE_PROMPT, DeleteConfirmState, workflow};
use roster_states::StateCtx;

/// Yes/No prompt for the row whose Delete was clicked. Closing the window counts as No.
pub fn delete_dialog(ctx: &mut StateCtx, ui: &mut Ui) {
    let Some(employee) = ctx.state::<DeleteConfirmState>().pending.clone() else {
        return;
    };

    let mut open = true;
    let mut answer = None;
    Window::new("Delete employee")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ui.ctx(), |ui| {
            ui.label(CONFIRM_DELETE_PROMPT);
            ui.strong(format!("{} (#{})", employee.name, employee.id_text()));
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Yes").clicked() {
                    answer = Some(true);
                }
                if ui.button("No").clicked() {
                    answer = Some(false);
                }
            });
        });

    match answer {
        Some(true) => {
            workflow::confirm_delete(ctx);
        }
        Some(false) => workflow::dismiss_delete(ctx),
        None if !open => workflow::dismiss_delete(ctx),
        None => {}
    }
}
