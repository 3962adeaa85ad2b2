//! Business layer of the employee roster: store client, form, table and the
//! states/computes/commands the UI drives.

use roster_states::StateCtx;

pub mod action_compute;
pub mod api;
mod config;
pub mod delete_confirm;
pub mod employee;
pub mod form;
pub mod http;
pub mod list_compute;
pub mod table;
pub mod workflow;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod test_utils;

pub use action_compute::{
    DeleteEmployeeCommand, EmployeeActionCompute, EmployeeActionKind, EmployeeActionState,
    SubmitEmployeeCommand,
};
pub use api::{ApiResult, EmployeeApiError};
pub use config::{BusinessConfig, DEFAULT_API_BASE_URL};
pub use delete_confirm::{CONFIRM_DELETE_PROMPT, DeleteConfirmState};
pub use employee::{Employee, EmployeePayload, SalaryValue};
pub use form::{EmployeeField, EmployeeFormState, REQUIRED_FIELDS_MESSAGE, SubmitRequest};
pub use list_compute::{EmployeeListCompute, EmployeeListStatus, RefreshEmployeesCommand};
pub use table::{
    EmployeeColumn, EmployeeTableCompute, EmployeeTableQuery, PAGE_SIZE, SortBy, SortDirection,
};

/// A context with every roster state, compute and command registered.
pub fn build_state_ctx(config: BusinessConfig) -> StateCtx {
    let mut ctx = StateCtx::new();

    ctx.add_state(config);
    ctx.add_state(EmployeeFormState::default());
    ctx.add_state(EmployeeTableQuery::default());
    ctx.add_state(DeleteConfirmState::default());

    ctx.record_compute(EmployeeListCompute::default());
    ctx.record_compute(EmployeeTableCompute::default());
    ctx.record_compute(EmployeeActionCompute::default());

    ctx.record_command(RefreshEmployeesCommand);
    ctx.record_command(SubmitEmployeeCommand);
    ctx.record_command(DeleteEmployeeCommand);

    ctx
}
