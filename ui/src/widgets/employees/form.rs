use egui::{Button, Color32, TextEdit, Ui};
use roster_business::{EmployeeActionCompute, EmployeeField, EmployeeFormState, workflow};
use roster_states::StateCtx;

const FIELD_WIDTH: f32 = 140.0;

/// Name/manager/salary inputs with Add (or Update) and Cancel.
pub fn employee_form(ctx: &mut StateCtx, ui: &mut Ui) {
    let form = ctx.state::<EmployeeFormState>().clone();
    let in_flight = ctx.compute::<EmployeeActionCompute>().is_in_flight();

    let mut changed = Vec::new();
    let mut submit = false;

    let cancel = ui
        .horizontal_wrapped(|ui| {
            for field in EmployeeField::ALL {
                let mut value = form.field(field).to_owned();
                let label = ui.label(format!("{}:", field.label()));
                let response = ui
                    .add(
                        TextEdit::singleline(&mut value)
                            .hint_text(field.label())
                            .desired_width(FIELD_WIDTH),
                    )
                    .labelled_by(label.id);
                if response.changed() {
                    changed.push((field, value));
                }
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submit = true;
                }
            }

            submit |= ui
                .add_enabled(!in_flight, Button::new(form.submit_label()))
                .clicked();

            ui.add_enabled(form.editing, Button::new("Cancel")).clicked()
        })
        .inner;

    if let Some(error) = &form.error {
        ui.colored_label(Color32::RED, error);
    }

    for (field, value) in changed {
        workflow::change_field(ctx, field, value);
    }
    if cancel {
        workflow::cancel_edit(ctx);
    } else if submit {
        workflow::submit(ctx);
    }
}
