use std::time::Duration;

use slotboard_business::{
    BusinessConfig, DashboardApi, DeviceTableState, Dispatcher, LoanerTableState,
    MemoryPreferences, Popups, PreferenceStore,
};
use slotboard_states::{StateCtx, Time};
use tokio::runtime::Handle;

use crate::pages::Page;

/// The main application state.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
    /// Runs backend requests and collects their results.
    pub dispatcher: Dispatcher,
    /// Last saved preferences, written to eframe storage on save.
    pub prefs: MemoryPreferences,
    pub page: Page,
    /// Whether [`Time`] follows the wall clock each frame.
    pub live_clock: bool,
}

impl State {
    pub fn new(runtime: Handle, config: BusinessConfig) -> Self {
        let mut ctx = StateCtx::new();

        ctx.add_state(Time::default());
        ctx.add_state(config.clone());
        ctx.add_state(DeviceTableState::default());
        ctx.add_state(LoanerTableState::default());
        ctx.add_state(Popups::default());

        Self {
            ctx,
            dispatcher: Dispatcher::new(runtime, DashboardApi::new(config)),
            prefs: MemoryPreferences::new(),
            page: Page::default(),
            live_clock: true,
        }
    }

    /// State pointed at a mock backend, with a fixed clock and slow polling.
    ///
    /// Must be called from inside a tokio runtime.
    pub fn test(base_url: String) -> Self {
        let config = BusinessConfig::new(base_url)
            .with_user_email("tech@example.com")
            .with_poll_interval(Duration::from_secs(300));
        let mut state = Self::new(Handle::current(), config);
        state.live_clock = false;
        state
    }

    pub fn config(&self) -> &BusinessConfig {
        self.ctx.state::<BusinessConfig>()
    }

    /// Restores both tables' selections and remembers them as saved.
    pub fn load_preferences(&mut self, store: &dyn PreferenceStore) {
        self.ctx
            .update::<DeviceTableState, _>(|table| table.load_preferences(store));
        self.ctx
            .update::<LoanerTableState, _>(|table| table.load_preferences(store));
        crate::utils::storage::copy_preferences(store, &mut self.prefs);
    }

    /// Records changed selections in [`Self::prefs`]. Returns whether anything changed.
    pub fn sync_preferences(&mut self) -> bool {
        let mut changed = false;
        let devices = self.ctx.state_mut::<DeviceTableState>();
        if devices.prefs_dirty() {
            devices.save_preferences(&mut self.prefs);
            changed = true;
        }
        let loaners = self.ctx.state_mut::<LoanerTableState>();
        if loaners.prefs_dirty() {
            loaners.save_preferences(&mut self.prefs);
            changed = true;
        }
        changed
    }
}
