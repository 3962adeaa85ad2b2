use std::any::Any;

use roster_states::{State, state_assign_impl};

use crate::employee::Employee;

pub const CONFIRM_DELETE_PROMPT: &str = "Are you sure you want to delete this employee?";

/// The row awaiting a yes/no answer before it is deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteConfirmState {
    pub pending: Option<Employee>,
}

impl DeleteConfirmState {
    pub fn request(&mut self, employee: &Employee) {
        self.pending = Some(employee.clone());
    }

    pub fn dismiss(&mut self) {
        self.pending = None;
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn employee_id(&self) -> Option<i64> {
        self.pending.as_ref().and_then(|employee| employee.employee_id)
    }
}

impl State for DeleteConfirmState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
