//! Mock-store harness for exercising commands end to end.
//!
//! ```ignore
//! let mut test_ctx = TestContext::new().await;
//! test_ctx.mock_list(vec![sample_employee(1)]).await;
//!
//! workflow::load_all(&mut test_ctx.ctx);
//! test_ctx.flush_and_wait().await;
//!
//! assert_eq!(test_ctx.ctx.compute::<EmployeeListCompute>().employees.len(), 1);
//! ```

use std::time::{Duration, Instant};

use roster_states::StateCtx;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{BusinessConfig, Employee, build_state_ctx};

pub struct TestContext {
    pub mock_server: MockServer,
    /// Fully registered and pointed at `mock_server`.
    pub ctx: StateCtx,
}

impl TestContext {
    pub async fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let mock_server = MockServer::start().await;
        let ctx = build_state_ctx(BusinessConfig::new(mock_server.uri()));
        Self { mock_server, ctx }
    }

    /// Flush queued commands, then join every task, syncing after each one.
    pub async fn flush_and_wait(&mut self) {
        self.ctx.sync_computes();
        self.ctx.flush_commands();

        let timeout = Duration::from_secs(5);
        let start = Instant::now();
        while self.ctx.task_count() > 0 {
            assert!(
                start.elapsed() < timeout,
                "Timed out waiting for {} pending tasks",
                self.ctx.task_count()
            );
            if self.ctx.task_set_mut().join_next().await.is_some() {
                self.ctx.sync_computes();
            }
        }

        self.ctx.sync_computes();
        self.ctx.run_computed();
    }

    pub async fn mock_list(&self, employees: Vec<Employee>) {
        Mock::given(method("GET"))
            .and(path("/employees"))
            .respond_with(ResponseTemplate::new(200).set_body_json(employees))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_list_failure(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/employees"))
            .respond_with(ResponseTemplate::new(status).set_body_string("list failed"))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_create(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/employees"))
            .respond_with(ResponseTemplate::new(status).set_body_json(sample_employee(100)))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_update(&self, employee_id: i64, status: u16) {
        Mock::given(method("PATCH"))
            .and(path(format!("/employees/{employee_id}")))
            .respond_with(ResponseTemplate::new(status).set_body_json(sample_employee(employee_id)))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_delete(&self, employee_id: i64, status: u16) {
        Mock::given(method("DELETE"))
            .and(path(format!("/employees/{employee_id}")))
            .respond_with(ResponseTemplate::new(status).set_body_string("Employee deleted"))
            .mount(&self.mock_server)
            .await;
    }

    /// Requests the mock store saw with the given method.
    pub async fn requests(&self, http_method: &str) -> Vec<wiremock::Request> {
        self.mock_server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.method.as_str() == http_method)
            .collect()
    }
}

pub fn sample_employee(employee_id: i64) -> Employee {
    Employee::new(
        employee_id,
        format!("Employee {employee_id}"),
        "Boss",
        (40000 + employee_id * 1000).to_string(),
    )
}

pub fn sample_staff(count: i64) -> Vec<Employee> {
    (1..=count).map(sample_employee).collect()
}
