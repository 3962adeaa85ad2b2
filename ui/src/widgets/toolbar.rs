use roster_business::{BusinessConfig, EmployeeListCompute, workflow};
use roster_states::StateCtx;
use egui::{Button, Ui};

/// Top bar: manual reload plus the store being talked to.
pub fn toolbar(ctx: &mut StateCtx, ui: &mut Ui) {
    let loading = ctx.compute::<EmployeeListCompute>().is_loading();
    if ui
        .add_enabled(!loading, Button::new("Refresh"))
        .on_hover_text("Reload employees from the store")
        .clicked()
    {
        workflow::load_all(ctx);
    }

    ui.separator();
    ui.weak(ctx.state::<BusinessConfig>().api_base_url().as_str());
}
