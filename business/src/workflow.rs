//! Operations the UI invokes, one per user gesture.
//!
//! UI code never touches commands or the updater directly: it calls these and
//! then reads states/computes back from the context.

use roster_states::StateCtx;

use crate::action_compute::{
    DeleteEmployeeCommand, EmployeeActionCompute, EmployeeActionKind, SubmitEmployeeCommand,
};
use crate::delete_confirm::DeleteConfirmState;
use crate::employee::Employee;
use crate::form::{EmployeeField, EmployeeFormState};
use crate::list_compute::RefreshEmployeesCommand;
use crate::table::{EmployeeColumn, EmployeeTableCompute, EmployeeTableQuery};

/// Fetch the full list, replacing any refresh still in flight.
pub fn load_all(ctx: &mut StateCtx) {
    ctx.dispatch::<RefreshEmployeesCommand>();
}

pub fn begin_edit(ctx: &mut StateCtx, employee: &Employee) {
    ctx.update::<EmployeeFormState>(|form| form.begin_edit(employee));
}

pub fn cancel_edit(ctx: &mut StateCtx) {
    ctx.update::<EmployeeFormState>(EmployeeFormState::cancel_edit);
}

pub fn change_field(ctx: &mut StateCtx, field: EmployeeField, value: impl Into<String>) {
    ctx.update::<EmployeeFormState>(|form| form.set_field(field, value));
}

/// Validate the form and, when complete, dispatch the create/update.
///
/// Returns whether a request was dispatched. Nothing is sent while another
/// mutation is still running.
pub fn submit(ctx: &mut StateCtx) -> bool {
    if ctx.compute::<EmployeeActionCompute>().is_in_flight() {
        return false;
    }

    let mut request = None;
    ctx.update::<EmployeeFormState>(|form| request = form.validate());
    let Some(request) = request else {
        return false;
    };

    mark_in_flight(
        ctx,
        EmployeeActionKind::for_request(&request),
        request.employee_id(),
    );
    ctx.dispatch::<SubmitEmployeeCommand>();
    true
}

/// Open the confirmation prompt for `employee`.
pub fn request_delete(ctx: &mut StateCtx, employee: &Employee) {
    ctx.update::<DeleteConfirmState>(|confirm| confirm.request(employee));
}

/// Answer "no": nothing is sent.
pub fn dismiss_delete(ctx: &mut StateCtx) {
    ctx.update::<DeleteConfirmState>(DeleteConfirmState::dismiss);
}

/// Answer "yes": dispatch the delete and close the prompt.
///
/// Returns whether a request was dispatched.
pub fn confirm_delete(ctx: &mut StateCtx) -> bool {
    let Some(employee_id) = ctx.state::<DeleteConfirmState>().employee_id() else {
        dismiss_delete(ctx);
        return false;
    };
    if ctx.compute::<EmployeeActionCompute>().is_in_flight() {
        return false;
    }

    mark_in_flight(ctx, EmployeeActionKind::Delete, Some(employee_id));
    // The command reads the pending row from its snapshot, taken here.
    ctx.dispatch::<DeleteEmployeeCommand>();
    dismiss_delete(ctx);
    true
}

/// Forget the last mutation's outcome.
pub fn clear_action_status(ctx: &mut StateCtx) {
    ctx.updater().set(EmployeeActionCompute::default());
    ctx.sync_computes();
}

pub fn set_global_filter(ctx: &mut StateCtx, filter: impl Into<String>) {
    ctx.update::<EmployeeTableQuery>(|query| query.set_global_filter(filter));
}

pub fn toggle_sort(ctx: &mut StateCtx, column: EmployeeColumn) {
    ctx.update::<EmployeeTableQuery>(|query| query.toggle_sort(column));
}

pub fn first_page(ctx: &mut StateCtx) {
    ctx.update::<EmployeeTableQuery>(EmployeeTableQuery::first_page);
}

pub fn previous_page(ctx: &mut StateCtx) {
    let page_count = page_count(ctx);
    ctx.update::<EmployeeTableQuery>(|query| query.previous_page(page_count));
}

pub fn next_page(ctx: &mut StateCtx) {
    let page_count = page_count(ctx);
    ctx.update::<EmployeeTableQuery>(|query| query.next_page(page_count));
}

pub fn last_page(ctx: &mut StateCtx) {
    let page_count = page_count(ctx);
    ctx.update::<EmployeeTableQuery>(|query| query.last_page(page_count));
}

fn page_count(ctx: &StateCtx) -> usize {
    ctx.compute::<EmployeeTableCompute>().page_count
}

// Published synchronously so a second click in the same frame is rejected.
fn mark_in_flight(ctx: &mut StateCtx, kind: EmployeeActionKind, employee_id: Option<i64>) {
    ctx.updater()
        .set(EmployeeActionCompute::in_flight(kind, employee_id));
    ctx.sync_computes();
}
