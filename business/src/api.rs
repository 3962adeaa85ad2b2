//! Employee store client.
//!
//! Each function performs exactly one request and maps the outcome into an
//! [`EmployeeApiError`]. Only commands call these.

use log::{debug, info};
use thiserror::Error;

use crate::BusinessConfig;
use crate::employee::{Employee, EmployeePayload};
use crate::http::{Client, HttpError, Response};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmployeeApiError {
    /// No response: connection refused, DNS, aborted fetch.
    #[error("Could not reach the employee store: {0}")]
    Transport(String),
    #[error("Employee store answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Unexpected response from the employee store: {0}")]
    Decode(String),
    #[error("Could not encode the request: {0}")]
    Encode(String),
}

impl From<HttpError> for EmployeeApiError {
    fn from(err: HttpError) -> Self {
        Self::Transport(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, EmployeeApiError>;

fn ensure_success(response: Response) -> ApiResult<Response> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(EmployeeApiError::Status {
            status: response.status,
            body: response.text(),
        })
    }
}

/// The created/updated record, if the store echoed one back.
fn echoed_employee(response: &Response) -> Option<Employee> {
    match response.json::<Employee>() {
        Ok(employee) => Some(employee),
        Err(err) => {
            debug!("Store reply is not an employee record ({err}): {}", response.text());
            None
        }
    }
}

/// `GET /employees`
pub async fn list_employees(config: &BusinessConfig) -> ApiResult<Vec<Employee>> {
    let response = Client::get(config.employees_url()).send().await?;
    let response = ensure_success(response)?;
    let employees: Vec<Employee> = response
        .json()
        .map_err(|err| EmployeeApiError::Decode(err.to_string()))?;
    debug!("Fetched {} employees", employees.len());
    Ok(employees)
}

/// `POST /employees`
pub async fn create_employee(
    config: &BusinessConfig,
    payload: &EmployeePayload,
) -> ApiResult<Option<Employee>> {
    let request = Client::post(config.employees_url())
        .json(payload)
        .map_err(|err| EmployeeApiError::Encode(err.to_string()))?;
    let response = ensure_success(request.send().await?)?;
    let created = echoed_employee(&response);
    info!("Employee created: {created:?}");
    Ok(created)
}

/// `PATCH /employees/{employee_id}`
pub async fn update_employee(
    config: &BusinessConfig,
    employee_id: i64,
    payload: &EmployeePayload,
) -> ApiResult<Option<Employee>> {
    let request = Client::patch(config.employee_url(employee_id))
        .json(payload)
        .map_err(|err| EmployeeApiError::Encode(err.to_string()))?;
    let response = ensure_success(request.send().await?)?;
    let updated = echoed_employee(&response);
    info!("Employee {employee_id} updated: {updated:?}");
    Ok(updated)
}

/// `DELETE /employees/{employee_id}`, returning the store's reply text.
pub async fn delete_employee(config: &BusinessConfig, employee_id: i64) -> ApiResult<String> {
    let response = Client::delete(config.employee_url(employee_id))
        .send()
        .await?;
    let reply = ensure_success(response)?.text();
    info!("Employee {employee_id} deleted: {reply}");
    Ok(reply)
}
