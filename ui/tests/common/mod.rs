use std::time::Duration;

use egui_kittest::Harness;
use serde_json::Value;
use slotboard_ui::SlotboardApp;
use slotboard_ui::state::State;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestCtx<'a> {
    mock_server: MockServer,
    harness: Harness<'a, SlotboardApp>,
}

impl<'a> TestCtx<'a> {
    /// Starts the app against a backend serving `devices` and `loaners`.
    pub async fn new_app(devices: Value, loaners: Value) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/get-data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(devices))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/get-loaner-data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(loaners))
            .mount(&mock_server)
            .await;

        let state = State::test(mock_server.uri());
        let harness = Harness::new_eframe(|cc| SlotboardApp::new(state, &cc.egui_ctx));

        Self {
            mock_server,
            harness,
        }
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, SlotboardApp> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn server(&self) -> &MockServer {
        &self.mock_server
    }

    /// Steps frames, yielding to the runtime between them, until `done` holds.
    pub async fn step_until(&mut self, done: impl Fn(&State) -> bool) {
        for _ in 0..200 {
            self.harness.step();
            if done(self.harness.state().state()) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("condition not reached after 200 frames");
    }
}
