//! Cached employee list and the command that (re)loads it.

use std::any::Any;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use roster_states::{
    CancellationToken, Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep,
    Updater, assign_impl,
};

use crate::BusinessConfig;
use crate::api;
use crate::employee::Employee;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EmployeeListStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Loaded {
        loaded_at: DateTime<Utc>,
    },
    Error(String),
}

/// Last successfully fetched list plus the state of the latest fetch.
///
/// `employees` survives `Loading` and `Error` so the table keeps showing the
/// previous rows while a reload is pending or after it failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeListCompute {
    pub employees: Vec<Employee>,
    pub status: EmployeeListStatus,
}

impl EmployeeListCompute {
    pub fn loaded(employees: Vec<Employee>, loaded_at: DateTime<Utc>) -> Self {
        Self {
            employees,
            status: EmployeeListStatus::Loaded { loaded_at },
        }
    }

    pub fn loading(&self) -> Self {
        Self {
            employees: self.employees.clone(),
            status: EmployeeListStatus::Loading,
        }
    }

    pub fn failed(&self, message: impl Into<String>) -> Self {
        Self {
            employees: self.employees.clone(),
            status: EmployeeListStatus::Error(message.into()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, EmployeeListStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            EmployeeListStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        match self.status {
            EmployeeListStatus::Loaded { loaded_at } => Some(loaded_at),
            _ => None,
        }
    }
}

impl Compute for EmployeeListCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn deps(&self) -> ComputeDeps {
        ComputeDeps::none()
    }

    // Written only by commands.
    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {}

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

/// Publish `Loading`, fetch, then publish the outcome.
///
/// `previous` supplies the rows kept visible while loading or after a failure.
async fn reload_employees(
    config: &BusinessConfig,
    previous: &EmployeeListCompute,
    updater: &Updater,
) {
    updater.set(previous.loading());
    let next = match api::list_employees(config).await {
        Ok(employees) => EmployeeListCompute::loaded(employees, Utc::now()),
        Err(err) => {
            warn!("Loading employees failed: {err}");
            previous.failed(err.to_string())
        }
    };
    updater.set(next);
}

/// `GET /employees` into [`EmployeeListCompute`].
///
/// Latest-only: a new dispatch cancels a refresh still in flight, so an older
/// response can never overwrite a newer one.
#[derive(Debug, Default)]
pub struct RefreshEmployeesCommand;

impl Command for RefreshEmployeesCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let config = snap.state::<BusinessConfig>().clone();
        let previous = snap.compute::<EmployeeListCompute>().clone();

        Box::pin(async move {
            tokio::select! {
                () = cancel.cancelled() => debug!("Employee refresh superseded"),
                () = reload_employees(&config, &previous, &updater) => {}
            }
        })
    }

    fn latest_only(&self) -> bool {
        true
    }
}
