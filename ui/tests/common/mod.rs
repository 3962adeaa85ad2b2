use std::time::Duration;

use egui_kittest::Harness;
use roster_business::Employee;
use roster_ui::RosterApp;
use roster_ui::state::State;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Frames rendered by [`TestCtx::settle`]; each waits a little for the network.
const SETTLE_FRAMES: usize = 8;
const FRAME_WAIT: Duration = Duration::from_millis(25);

pub struct TestCtx<'a> {
    mock_server: MockServer,
    harness: Harness<'a, RosterApp>,
}

impl<'a> TestCtx<'a> {
    /// App pointed at a fresh mock store that lists `employees`.
    pub async fn new_app(employees: Vec<Employee>) -> Self {
        let ctx = Self::new_app_without_list().await;
        ctx.mount_list(employees).await;
        ctx
    }

    /// App whose store has no `GET /employees` mock yet.
    #[allow(unused)]
    pub async fn new_app_without_list() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let mock_server = MockServer::start().await;
        let app = RosterApp::new(State::test(mock_server.uri()));
        let harness = Harness::new_eframe(|_| app);

        Self {
            mock_server,
            harness,
        }
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, RosterApp> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn harness(&self) -> &Harness<'a, RosterApp> {
        &self.harness
    }

    #[allow(unused)]
    pub fn mock_server(&self) -> &MockServer {
        &self.mock_server
    }

    pub async fn mount_list(&self, employees: Vec<Employee>) {
        Mock::given(method("GET"))
            .and(path("/employees"))
            .respond_with(ResponseTemplate::new(200).set_body_json(employees))
            .mount(&self.mock_server)
            .await;
    }

    /// Step frames while giving spawned commands time to finish.
    pub async fn settle(&mut self) {
        for _ in 0..SETTLE_FRAMES {
            self.harness.step();
            tokio::time::sleep(FRAME_WAIT).await;
        }
        self.harness.step();
    }

    /// Number of requests the store saw with `http_method`.
    #[allow(unused)]
    pub async fn request_count(&self, http_method: &str) -> usize {
        self.mock_server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.method.as_str() == http_method)
            .count()
    }
}

#[allow(unused)]
pub fn staff(count: i64) -> Vec<Employee> {
    (1..=count)
        .map(|id| {
            Employee::new(
                id,
                format!("Employee {id}"),
                if id % 2 == 0 { "Grace" } else { "Alan" },
                (40000 + id * 1000).to_string(),
            )
        })
        .collect()
}
