//! Device pickup page.

use crate::state::State;
use crate::widgets::{self, DeviceAction, DeviceToolbar};
use egui::{Response, Ui};
use slotboard_business::DeviceTableState;
use slotboard_states::Time;

/// Renders the device toolbar and table, then applies whatever the user clicked.
pub fn devices_page(state: &mut State, ui: &mut Ui) -> Response {
    let today = state.ctx.state::<Time>().today();
    let ticket_base_url = state.config().ticket_base_url.clone();

    let table = state.ctx.state::<DeviceTableState>();
    let toolbar = DeviceToolbar {
        counts: table.counts(),
        filter: table.filter(),
        category: table.category(),
        refreshing: table.is_refreshing(),
    };
    let rows = table.visible_rows(today, &ticket_base_url);
    let sort = table.sort();

    let mut actions = Vec::new();
    let response = ui
        .vertical(|ui| {
            widgets::device_toolbar(ui, &toolbar, &mut actions);
            ui.add_space(8.0);
            widgets::device_table(ui, &rows, sort, &mut actions);
        })
        .response;

    for action in actions {
        apply_action(state, action);
    }
    response
}

fn apply_action(state: &mut State, action: DeviceAction) {
    match action {
        DeviceAction::ToggleFilter(filter) => state
            .ctx
            .update::<DeviceTableState, _>(|table| table.toggle_filter(filter)),
        DeviceAction::ToggleCategory(category) => state
            .ctx
            .update::<DeviceTableState, _>(|table| table.toggle_category(category)),
        DeviceAction::ClearFilters => state
            .ctx
            .update::<DeviceTableState, _>(|table| table.clear_filters()),
        DeviceAction::SortBy(column) => state
            .ctx
            .update::<DeviceTableState, _>(|table| table.click_header(column)),
        DeviceAction::Refresh => state.dispatcher.refresh_devices(&mut state.ctx),
        DeviceAction::Notify(row_id) => state.dispatcher.notify_device(&mut state.ctx, row_id),
    }
}
