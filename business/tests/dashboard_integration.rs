//! End-to-end flows through the dispatcher: request, message, state update.

use std::time::Duration;

use serde_json::json;
use slotboard_business::{
    BusinessConfig, Category, DashboardApi, DeviceSlot, DeviceTableState, Dispatcher,
    LoanerTableState, Popups, RowAction,
};
use slotboard_states::{StateCtx, Time};
use tokio::runtime::Handle;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TestContext {
    server: MockServer,
    ctx: StateCtx,
    dispatcher: Dispatcher,
}

impl TestContext {
    async fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let server = MockServer::start().await;
        let config = BusinessConfig::new(server.uri())
            .with_user_email("tech@example.com")
            .with_poll_interval(Duration::from_secs(60));

        let mut ctx = StateCtx::new();
        ctx.add_state(Time::default());
        ctx.add_state(config.clone());
        ctx.add_state(DeviceTableState::default());
        ctx.add_state(LoanerTableState::default());
        ctx.add_state(Popups::default());

        let dispatcher = Dispatcher::new(Handle::current(), DashboardApi::new(config));
        Self {
            server,
            ctx,
            dispatcher,
        }
    }

    /// Applies messages until `expected` have arrived or two seconds pass.
    async fn pump_until(&mut self, expected: usize) {
        let mut seen = 0;
        for _ in 0..200 {
            seen += self.dispatcher.pump(&mut self.ctx);
            if seen >= expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("expected {expected} messages, got {seen}");
    }

    async fn mount_devices(&self, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/get-data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    async fn mount_loaners(&self, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/get-loaner-data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }
}

#[tokio::test]
async fn polling_fills_both_tables() {
    let mut t = TestContext::new().await;
    t.mount_devices(json!({"result": [
        {"number": "SCTASK1", "requested_for": "Ada", "slot": 3},
        {"number": "SCTASK2", "requested_for": "Bob", "slot": null}
    ]}))
    .await;
    t.mount_loaners(json!({"loaners": [
        {"name": "LN-1", "status": "in stock"},
        {"name": "LN-2", "status": "not found"}
    ]}))
    .await;

    t.dispatcher.start_polling();
    assert!(t.dispatcher.is_polling());
    t.pump_until(2).await;

    let devices = t.ctx.state::<DeviceTableState>().counts();
    assert_eq!((devices.total, devices.slotted, devices.unslotted), (2, 1, 1));
    let loaners = t.ctx.state::<LoanerTableState>().counts();
    assert_eq!((loaners.total, loaners.in_stock), (1, 1));

    t.dispatcher.stop_polling();
    assert!(!t.dispatcher.is_polling());
}

#[tokio::test]
async fn poll_failure_leaves_an_empty_table() {
    let mut t = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/get-data"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&t.server)
        .await;
    t.mount_loaners(json!({"loaners": []})).await;
    t.ctx
        .state_mut::<DeviceTableState>()
        .replace_records(vec![Default::default()]);

    t.dispatcher.start_polling();
    t.pump_until(2).await;

    assert_eq!(t.ctx.state::<DeviceTableState>().counts().total, 0);
}

#[tokio::test]
async fn device_notify_slots_the_row() {
    let mut t = TestContext::new().await;
    t.mount_devices(json!({"result": [
        {"number": "SCTASK7", "requested_for": "Ada", "slot": ""}
    ]}))
    .await;
    t.mount_loaners(json!({"loaners": []})).await;
    Mock::given(method("GET"))
        .and(path("/SCTASK7/tech%40example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "requestedFor": "Ada",
            "CI": "LT-7",
            "slotNumber": 105,
            "UCD": "2026-06-01"
        })))
        .expect(1)
        .mount(&t.server)
        .await;

    t.dispatcher.start_polling();
    t.pump_until(2).await;
    t.dispatcher.stop_polling();

    let events = t.ctx.state_mut::<DeviceTableState>().subscribe_slotted();
    let row_id = t.ctx.state::<DeviceTableState>().records()[0].row_id;
    t.dispatcher.notify_device(&mut t.ctx, row_id);
    let today = t.ctx.state::<Time>().today();
    assert_eq!(
        t.ctx.state::<DeviceTableState>().visible_rows(today, "")[0].action,
        RowAction::Pending
    );

    t.pump_until(1).await;

    let record = t.ctx.state::<DeviceTableState>().records()[0].clone();
    assert_eq!(record.slot, Some(DeviceSlot::Number(105)));
    assert_eq!(record.category, Category::Phones);
    assert_eq!(events.try_recv().map(|e| e.slot).ok(), Some(105));
    let popup = t.ctx.state::<Popups>().current().cloned().expect("confirmation shown");
    assert!(popup.message.contains("Slot: 105"), "{}", popup.message);
}

#[tokio::test]
async fn device_notify_failure_reenables_the_button() {
    let mut t = TestContext::new().await;
    t.mount_devices(json!({"result": [{"number": "SCTASK8", "requested_for": "Bob"}]}))
        .await;
    t.mount_loaners(json!({"loaners": []})).await;
    Mock::given(method("GET"))
        .and(path("/SCTASK8/tech%40example.com"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&t.server)
        .await;

    t.dispatcher.start_polling();
    t.pump_until(2).await;
    t.dispatcher.stop_polling();

    let row_id = t.ctx.state::<DeviceTableState>().records()[0].row_id;
    t.dispatcher.notify_device(&mut t.ctx, row_id);
    t.pump_until(1).await;

    let today = t.ctx.state::<Time>().today();
    assert_eq!(
        t.ctx.state::<DeviceTableState>().visible_rows(today, "")[0].action,
        RowAction::Notify
    );
    assert!(!t.ctx.state::<Popups>().is_empty());
}

#[tokio::test]
async fn loaner_notify_reports_success() {
    let mut t = TestContext::new().await;
    t.mount_devices(json!({"result": []})).await;
    t.mount_loaners(json!({"loaners": [
        {"name": "LN-9", "status": "In Use", "user_assigned_to": "ada@example.com"}
    ]}))
    .await;
    Mock::given(method("POST"))
        .and(path("/notify-loaner-return"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&t.server)
        .await;

    t.dispatcher.start_polling();
    t.pump_until(2).await;
    t.dispatcher.stop_polling();

    let row_id = t.ctx.state::<LoanerTableState>().records()[0].row_id;
    t.dispatcher.notify_loaner(&mut t.ctx, row_id);
    assert!(t.ctx.state::<LoanerTableState>().is_pending("LN-9"));
    t.pump_until(1).await;

    assert!(!t.ctx.state::<LoanerTableState>().is_pending("LN-9"));
    assert_eq!(
        t.ctx.state::<Popups>().current().map(|p| p.message.clone()),
        Some("Notification sent to ada@example.com for loaner LN-9.".to_owned())
    );
}

#[tokio::test]
async fn manual_refresh_shows_throttle_advisory() {
    let mut t = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/refresh-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [{"number": "SCTASK3"}],
            "throttled": true,
            "next_allowed_in": 1
        })))
        .mount(&t.server)
        .await;

    t.dispatcher.refresh_devices(&mut t.ctx);
    assert!(t.ctx.state::<DeviceTableState>().is_refreshing());
    t.pump_until(1).await;

    assert!(!t.ctx.state::<DeviceTableState>().is_refreshing());
    assert_eq!(t.ctx.state::<DeviceTableState>().counts().total, 1);
    assert_eq!(
        t.ctx.state::<Popups>().current().map(|p| p.message.clone()),
        Some("Please wait 1 second before refreshing again.".to_owned())
    );
}

#[tokio::test]
async fn notify_without_email_is_refused() {
    let mut t = TestContext::new().await;
    let dispatcher = Dispatcher::new(
        Handle::current(),
        DashboardApi::new(BusinessConfig::new(t.server.uri())),
    );
    let row_id = t
        .ctx
        .state_mut::<DeviceTableState>()
        .add_device_row(Default::default());

    dispatcher.notify_device(&mut t.ctx, row_id);

    assert!(!t.ctx.state::<DeviceTableState>().is_pending(""));
    assert!(
        t.ctx
            .state::<Popups>()
            .current()
            .is_some_and(|p| p.message.contains("SLOTBOARD_USER_EMAIL"))
    );
}
