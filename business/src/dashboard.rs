//! Glue between user actions, background requests and the table states.
//!
//! Requests run on the tokio runtime and report back as [`DashboardMessage`]s.
//! The UI drains them once per frame and folds them into the [`StateCtx`] with
//! [`apply_message`], so every state mutation happens on the UI thread.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;

use flume::{Receiver, Sender};
use log::{info, warn};
use slotboard_states::{State, StateCtx, TaskHandle, TaskId};
use tokio::runtime::Handle;

use crate::api::{DashboardApi, DeviceNotification, LoanerNotification, RefreshOutcome};
use crate::device::TicketItem;
use crate::device_table::DeviceTableState;
use crate::error::ApiResult;
use crate::loaner::LoanerItem;
use crate::loaner_table::{LoanerNotifyRequest, LoanerTableState};
use crate::poller::{Waker, spawn_poller};
use crate::table::RowId;

/// A finished background request.
#[derive(Debug)]
pub enum DashboardMessage {
    DevicesPolled(ApiResult<Vec<TicketItem>>),
    DevicesRefreshed(ApiResult<RefreshOutcome>),
    DeviceNotified {
        ticket: String,
        result: ApiResult<DeviceNotification>,
    },
    LoanersPolled(ApiResult<Vec<LoanerItem>>),
    LoanersRefreshed(ApiResult<Vec<LoanerItem>>),
    LoanerNotified {
        request: LoanerNotifyRequest,
        result: ApiResult<LoanerNotification>,
    },
}

/// A modal message waiting to be acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub title: String,
    pub message: String,
}

/// Popups in the order they were raised.
#[derive(Debug, Default)]
pub struct Popups {
    queue: VecDeque<Popup>,
}

impl State for Popups {}

impl Popups {
    pub fn push(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.queue.push_back(Popup {
            title: title.into(),
            message: message.into(),
        });
    }

    pub fn current(&self) -> Option<&Popup> {
        self.queue.front()
    }

    pub fn dismiss(&mut self) -> Option<Popup> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Folds one finished request into the states it concerns.
pub fn apply_message(ctx: &mut StateCtx, message: DashboardMessage) {
    match message {
        DashboardMessage::DevicesPolled(result) => {
            ctx.update::<DeviceTableState, _>(|table| table.apply_poll(result));
        }
        DashboardMessage::DevicesRefreshed(result) => {
            let advisory = ctx.update::<DeviceTableState, _>(|table| table.finish_refresh(result));
            if let Some(advisory) = advisory {
                ctx.state_mut::<Popups>().push("Refresh", advisory);
            }
        }
        DashboardMessage::DeviceNotified { ticket, result } => {
            let text =
                ctx.update::<DeviceTableState, _>(|table| table.finish_notify(&ticket, result));
            ctx.state_mut::<Popups>().push("Notify", text);
        }
        DashboardMessage::LoanersPolled(result) => {
            ctx.update::<LoanerTableState, _>(|table| table.apply_poll(result));
        }
        DashboardMessage::LoanersRefreshed(result) => {
            ctx.update::<LoanerTableState, _>(|table| table.finish_refresh(result));
        }
        DashboardMessage::LoanerNotified { request, result } => {
            let text =
                ctx.update::<LoanerTableState, _>(|table| table.finish_notify(&request, result));
            ctx.state_mut::<Popups>().push("Notify", text);
        }
    }
}

struct DevicePoll;
struct LoanerPoll;

/// Starts requests on the runtime and collects their results.
pub struct Dispatcher {
    runtime: Handle,
    api: DashboardApi,
    tx: Sender<DashboardMessage>,
    rx: Receiver<DashboardMessage>,
    wake: Waker,
    pollers: Vec<TaskHandle>,
    generation: u64,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("api", &self.api)
            .field("pollers", &self.pollers)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(runtime: Handle, api: DashboardApi) -> Self {
        let (tx, rx) = flume::unbounded();
        Self {
            runtime,
            api,
            tx,
            rx,
            wake: Arc::new(|| {}),
            pollers: Vec::new(),
            generation: 0,
        }
    }

    /// Callback run whenever a message is queued.
    pub fn set_waker(&mut self, wake: impl Fn() + Send + Sync + 'static) {
        self.wake = Arc::new(wake);
    }

    pub fn api(&self) -> &DashboardApi {
        &self.api
    }

    /// (Re)starts both table pollers at the configured interval.
    pub fn start_polling(&mut self) {
        self.stop_polling();
        self.generation += 1;
        let interval = self.api.config().poll_interval;

        let api = self.api.clone();
        self.pollers.push(spawn_poller(
            &self.runtime,
            TaskId::of::<DevicePoll>(self.generation),
            interval,
            move || {
                let api = api.clone();
                async move { DashboardMessage::DevicesPolled(api.fetch_devices().await) }
            },
            self.tx.clone(),
            self.wake.clone(),
        ));

        let api = self.api.clone();
        self.pollers.push(spawn_poller(
            &self.runtime,
            TaskId::of::<LoanerPoll>(self.generation),
            interval,
            move || {
                let api = api.clone();
                async move { DashboardMessage::LoanersPolled(api.fetch_loaners().await) }
            },
            self.tx.clone(),
            self.wake.clone(),
        ));
    }

    pub fn stop_polling(&mut self) {
        for poller in self.pollers.drain(..) {
            poller.cancel();
        }
    }

    pub fn is_polling(&self) -> bool {
        self.pollers.iter().any(|p| !p.is_cancelled())
    }

    /// Messages that arrived since the last call.
    pub fn drain(&self) -> Vec<DashboardMessage> {
        self.rx.try_iter().collect()
    }

    /// Drains and applies every pending message; returns how many there were.
    pub fn pump(&self, ctx: &mut StateCtx) -> usize {
        let messages = self.drain();
        let count = messages.len();
        for message in messages {
            apply_message(ctx, message);
        }
        count
    }

    fn spawn(&self, request: impl Future<Output = DashboardMessage> + Send + 'static) {
        let tx = self.tx.clone();
        let wake = self.wake.clone();
        self.runtime.spawn(async move {
            if tx.send_async(request.await).await.is_ok() {
                wake();
            }
        });
    }

    pub fn refresh_devices(&self, ctx: &mut StateCtx) {
        if !ctx.update::<DeviceTableState, _>(|table| table.begin_refresh()) {
            return;
        }
        info!("Manual device refresh");
        let api = self.api.clone();
        self.spawn(async move { DashboardMessage::DevicesRefreshed(api.refresh_devices().await) });
    }

    pub fn refresh_loaners(&self, ctx: &mut StateCtx) {
        if !ctx.update::<LoanerTableState, _>(|table| table.begin_refresh()) {
            return;
        }
        info!("Manual loaner refresh");
        let api = self.api.clone();
        self.spawn(async move { DashboardMessage::LoanersRefreshed(api.fetch_loaners().await) });
    }

    /// Slots and notifies the device on `row_id` with the configured technician email.
    pub fn notify_device(&self, ctx: &mut StateCtx, row_id: RowId) {
        let user_email = self.api.config().user_email.clone();
        if user_email.is_empty() {
            warn!("Notify requested without a configured user email");
            ctx.state_mut::<Popups>().push(
                "Notify",
                "No user email configured. Set SLOTBOARD_USER_EMAIL to send notifications.",
            );
            return;
        }
        let Some(ticket) = ctx.update::<DeviceTableState, _>(|table| table.begin_notify(row_id))
        else {
            return;
        };
        let api = self.api.clone();
        self.spawn(async move {
            let result = api.notify_device(&ticket, &user_email).await;
            DashboardMessage::DeviceNotified { ticket, result }
        });
    }

    pub fn notify_loaner(&self, ctx: &mut StateCtx, row_id: RowId) {
        let Some(request) = ctx.update::<LoanerTableState, _>(|table| table.begin_notify(row_id))
        else {
            return;
        };
        let api = self.api.clone();
        self.spawn(async move {
            let result = api
                .notify_loaner(&request.loaner_name, &request.user_email)
                .await;
            DashboardMessage::LoanerNotified { request, result }
        });
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.stop_polling();
    }
}
