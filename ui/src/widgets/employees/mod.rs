//! Employee management widgets.
//!
//! - `form`: add/edit form above the table
//! - `table`: search box and the sortable grid
//! - `pagination`: page navigation below the grid
//! - `dialog`: delete confirmation
//! - `status`: load and mutation feedback

mod dialog;
mod form;
mod pagination;
mod status;
mod table;

use egui::{Response, Ui};
use roster_states::StateCtx;

pub use dialog::delete_dialog;
pub use form::employee_form;
pub use pagination::pagination;
pub use status::status_line;
pub use table::{employee_table, search_box};

/// The whole employee screen.
pub fn employee_panel(ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    let response = ui.vertical(|ui| {
        employee_form(ctx, ui);
        ui.add_space(12.0);
        search_box(ctx, ui);
        ui.add_space(4.0);
        employee_table(ctx, ui);
        ui.add_space(4.0);
        pagination(ctx, ui);
        status_line(ctx, ui);
    });

    delete_dialog(ctx, ui);

    response.response
}
