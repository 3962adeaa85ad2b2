//! Create/update/delete commands and the compute reporting their outcome.
//
// Flow:
// - UI validates through `workflow::submit` / `workflow::confirm_delete`, which dispatch a command
// - the command performs one mutation, publishes the outcome via `Updater::set()`
// - only a successful mutation reloads the list, by enqueueing `RefreshEmployeesCommand`
//   so it shares the latest-only slot with manual refreshes

use std::any::Any;

use log::{info, warn};
use roster_states::{
    CancellationToken, Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep,
    Updater, assign_impl,
};

use crate::BusinessConfig;
use crate::api;
use crate::delete_confirm::DeleteConfirmState;
use crate::form::{EmployeeFormState, SubmitRequest};
use crate::list_compute::RefreshEmployeesCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmployeeActionKind {
    Create,
    Update,
    Delete,
}

impl EmployeeActionKind {
    pub fn for_request(request: &SubmitRequest) -> Self {
        match request {
            SubmitRequest::Create(_) => Self::Create,
            SubmitRequest::Update { .. } => Self::Update,
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            Self::Create => "add",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EmployeeActionState {
    #[default]
    Idle,
    InFlight {
        kind: EmployeeActionKind,
        employee_id: Option<i64>,
    },
    Success {
        kind: EmployeeActionKind,
        employee_id: Option<i64>,
    },
    Error {
        kind: EmployeeActionKind,
        employee_id: Option<i64>,
        message: String,
    },
}

/// Outcome of the latest mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeActionCompute {
    pub state: EmployeeActionState,
}

impl EmployeeActionCompute {
    pub fn in_flight(kind: EmployeeActionKind, employee_id: Option<i64>) -> Self {
        Self {
            state: EmployeeActionState::InFlight { kind, employee_id },
        }
    }

    pub fn success(kind: EmployeeActionKind, employee_id: Option<i64>) -> Self {
        Self {
            state: EmployeeActionState::Success { kind, employee_id },
        }
    }

    pub fn failed(kind: EmployeeActionKind, employee_id: Option<i64>, message: String) -> Self {
        Self {
            state: EmployeeActionState::Error {
                kind,
                employee_id,
                message,
            },
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.state, EmployeeActionState::InFlight { .. })
    }

    /// "Failed to delete employee 3: ..." for the status line.
    pub fn error_message(&self) -> Option<String> {
        match &self.state {
            EmployeeActionState::Error {
                kind,
                employee_id: Some(id),
                message,
            } => Some(format!("Failed to {} employee {id}: {message}", kind.verb())),
            EmployeeActionState::Error { kind, message, .. } => {
                Some(format!("Failed to {} employee: {message}", kind.verb()))
            }
            _ => None,
        }
    }
}

impl Compute for EmployeeActionCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn deps(&self) -> ComputeDeps {
        ComputeDeps::none()
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {}

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

/// POST or PATCH the form, depending on edit mode.
///
/// On success the form is reset and the list reloaded once. On failure the
/// form keeps its contents so the user can retry.
#[derive(Debug, Default)]
pub struct SubmitEmployeeCommand;

impl Command for SubmitEmployeeCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        _cancel: CancellationToken,
    ) -> CommandFuture {
        let config = snap.state::<BusinessConfig>().clone();
        let mut form = snap.state::<EmployeeFormState>().clone();

        Box::pin(async move {
            let Some(request) = form.validate() else {
                updater.set(form);
                return;
            };
            let kind = EmployeeActionKind::for_request(&request);
            let employee_id = request.employee_id();
            updater.set(EmployeeActionCompute::in_flight(kind, employee_id));

            let result = match &request {
                SubmitRequest::Create(payload) => api::create_employee(&config, payload).await,
                SubmitRequest::Update {
                    employee_id,
                    payload,
                } => api::update_employee(&config, *employee_id, payload).await,
            };

            match result {
                Ok(_) => {
                    info!("Employee {} succeeded", kind.verb());
                    updater.set(EmployeeFormState::default());
                    updater.set(EmployeeActionCompute::success(kind, employee_id));
                    updater.enqueue::<RefreshEmployeesCommand>();
                }
                Err(err) => {
                    warn!("Employee {} failed: {err}", kind.verb());
                    updater.set(EmployeeActionCompute::failed(kind, employee_id, err.to_string()));
                }
            }
        })
    }
}

/// DELETE the employee held by [`DeleteConfirmState`] at dispatch time.
#[derive(Debug, Default)]
pub struct DeleteEmployeeCommand;

impl Command for DeleteEmployeeCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        _cancel: CancellationToken,
    ) -> CommandFuture {
        let config = snap.state::<BusinessConfig>().clone();
        let target = snap.state::<DeleteConfirmState>().employee_id();

        Box::pin(async move {
            let Some(employee_id) = target else {
                warn!("Delete dispatched without a confirmed employee");
                return;
            };
            let kind = EmployeeActionKind::Delete;
            updater.set(EmployeeActionCompute::in_flight(kind, Some(employee_id)));

            match api::delete_employee(&config, employee_id).await {
                Ok(_) => {
                    updater.set(EmployeeActionCompute::success(kind, Some(employee_id)));
                    updater.enqueue::<RefreshEmployeesCommand>();
                }
                Err(err) => {
                    warn!("Deleting employee {employee_id} failed: {err}");
                    updater.set(EmployeeActionCompute::failed(
                        kind,
                        Some(employee_id),
                        err.to_string(),
                    ));
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_names_the_action() {
        let with_id = EmployeeActionCompute::failed(
            EmployeeActionKind::Delete,
            Some(3),
            "store down".to_owned(),
        );
        assert_eq!(
            with_id.error_message().as_deref(),
            Some("Failed to delete employee 3: store down")
        );

        let without_id =
            EmployeeActionCompute::failed(EmployeeActionKind::Create, None, "boom".to_owned());
        assert_eq!(
            without_id.error_message().as_deref(),
            Some("Failed to add employee: boom")
        );

        assert_eq!(EmployeeActionCompute::default().error_message(), None);
    }

    #[test]
    fn in_flight_flag() {
        let kind = EmployeeActionKind::Update;
        assert!(EmployeeActionCompute::in_flight(kind, Some(1)).is_in_flight());
        assert!(!EmployeeActionCompute::success(kind, Some(1)).is_in_flight());
    }
}
