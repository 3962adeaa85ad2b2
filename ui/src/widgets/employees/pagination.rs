use egui::{Button, Ui};
use roster_business::{EmployeeTableCompute, workflow};
use roster_states::StateCtx;

#[derive(Clone, Copy)]
enum PageMove {
    First,
    Previous,
    Next,
    Last,
}

/// `First | Previous | Page 1 of 3 | Next | Last`
pub fn pagination(ctx: &mut StateCtx, ui: &mut Ui) {
    let view = ctx.compute::<EmployeeTableCompute>();
    let can_previous = view.can_previous();
    let can_next = view.can_next();
    let label = format!("Page {}", view.page_label());

    let mut page_move = None;
    ui.horizontal(|ui| {
        if ui.add_enabled(can_previous, Button::new("First")).clicked() {
            page_move = Some(PageMove::First);
        }
        if ui.add_enabled(can_previous, Button::new("Previous")).clicked() {
            page_move = Some(PageMove::Previous);
        }
        ui.label(label);
        if ui.add_enabled(can_next, Button::new("Next")).clicked() {
            page_move = Some(PageMove::Next);
        }
        if ui.add_enabled(can_next, Button::new("Last")).clicked() {
            page_move = Some(PageMove::Last);
        }
    });

    match page_move {
        Some(PageMove::First) => workflow::first_page(ctx),
        Some(PageMove::Previous) => workflow::previous_page(ctx),
        Some(PageMove::Next) => workflow::next_page(ctx),
        Some(PageMove::Last) => workflow::last_page(ctx),
        None => {}
    }
}
