//! The add/edit form shown above the table.

use std::any::Any;

use roster_states::{State, state_assign_impl};

use crate::employee::{Employee, EmployeePayload, SalaryValue};

pub const REQUIRED_FIELDS_MESSAGE: &str = "All fields are required!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmployeeField {
    Name,
    Manager,
    Salary,
}

impl EmployeeField {
    pub const ALL: [Self; 3] = [Self::Name, Self::Manager, Self::Salary];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Manager => "Manager",
            Self::Salary => "Salary",
        }
    }
}

/// What a valid form turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRequest {
    Create(EmployeePayload),
    Update {
        employee_id: i64,
        payload: EmployeePayload,
    },
}

impl SubmitRequest {
    pub fn employee_id(&self) -> Option<i64> {
        match self {
            Self::Create(_) => None,
            Self::Update { employee_id, .. } => Some(*employee_id),
        }
    }

    pub fn payload(&self) -> &EmployeePayload {
        match self {
            Self::Create(payload) | Self::Update { payload, .. } => payload,
        }
    }
}

/// Draft record plus edit mode.
///
/// `editing` is true only between `begin_edit` and the next `cancel_edit` or
/// successful submit; in that window `employee_id` names the row being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFormState {
    pub employee_id: Option<i64>,
    pub name: String,
    pub manager: String,
    pub salary: String,
    pub editing: bool,
    pub error: Option<String>,
}

impl EmployeeFormState {
    /// Copy `employee` into the form and switch to edit mode.
    pub fn begin_edit(&mut self, employee: &Employee) {
        *self = Self {
            employee_id: employee.employee_id,
            name: employee.name.clone(),
            manager: employee.manager.clone(),
            salary: employee.salary.clone(),
            editing: true,
            error: None,
        };
    }

    /// Back to an empty draft in create mode.
    pub fn cancel_edit(&mut self) {
        *self = Self::default();
    }

    pub fn field(&self, field: EmployeeField) -> &str {
        match field {
            EmployeeField::Name => &self.name,
            EmployeeField::Manager => &self.manager,
            EmployeeField::Salary => &self.salary,
        }
    }

    /// Overwrite one field. Any validation message is cleared.
    pub fn set_field(&mut self, field: EmployeeField, value: impl Into<String>) {
        let value = value.into();
        match field {
            EmployeeField::Name => self.name = value,
            EmployeeField::Manager => self.manager = value,
            EmployeeField::Salary => self.salary = value,
        }
        self.error = None;
    }

    /// An update needs both edit mode and an id; anything else creates.
    pub fn is_existing(&self) -> bool {
        self.editing && self.employee_id.is_some()
    }

    /// Follows the request `submit_request` would build.
    pub fn submit_label(&self) -> &'static str {
        if self.is_existing() { "Update" } else { "Add" }
    }

    pub fn missing_fields(&self) -> Vec<EmployeeField> {
        EmployeeField::ALL
            .into_iter()
            .filter(|field| self.field(*field).is_empty())
            .collect()
    }

    /// The request this draft would submit, or `None` when a field is empty.
    pub fn submit_request(&self) -> Option<SubmitRequest> {
        if !self.missing_fields().is_empty() {
            return None;
        }

        let payload = EmployeePayload {
            name: self.name.clone(),
            manager: self.manager.clone(),
            salary: SalaryValue::from_text(&self.salary),
        };
        Some(match self.employee_id {
            Some(employee_id) if self.editing => SubmitRequest::Update {
                employee_id,
                payload,
            },
            _ => SubmitRequest::Create(payload),
        })
    }

    /// [`Self::submit_request`], recording the required-fields message on failure.
    pub fn validate(&mut self) -> Option<SubmitRequest> {
        let request = self.submit_request();
        self.error = match request {
            Some(_) => None,
            None => Some(REQUIRED_FIELDS_MESSAGE.to_owned()),
        };
        request
    }
}

impl State for EmployeeFormState {
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
