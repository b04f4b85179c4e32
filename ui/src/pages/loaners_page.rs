//! Loaner inventory page.

use crate::state::State;
use crate::widgets::{self, LoanerAction, LoanerToolbar};
use egui::{Response, Ui};
use slotboard_business::LoanerTableState;
use slotboard_states::Time;

pub fn loaners_page(state: &mut State, ui: &mut Ui) -> Response {
    let today = state.ctx.state::<Time>().today();

    let table = state.ctx.state::<LoanerTableState>();
    let toolbar = LoanerToolbar {
        counts: table.counts(),
        filter: table.filter(),
        refreshing: table.is_refreshing(),
    };
    let rows = table.visible_rows(today);
    let sort = table.sort();

    let mut actions = Vec::new();
    let response = ui
        .vertical(|ui| {
            widgets::loaner_toolbar(ui, &toolbar, &mut actions);
            ui.add_space(8.0);
            widgets::loaner_table(ui, &rows, sort, &mut actions);
        })
        .response;

    for action in actions {
        match action {
            LoanerAction::ToggleFilter(filter) => state
                .ctx
                .update::<LoanerTableState, _>(|table| table.toggle_filter(filter)),
            LoanerAction::ClearFilters => state
                .ctx
                .update::<LoanerTableState, _>(|table| table.clear_filters()),
            LoanerAction::SortBy(column) => state
                .ctx
                .update::<LoanerTableState, _>(|table| table.click_header(column)),
            LoanerAction::Refresh => state.dispatcher.refresh_loaners(&mut state.ctx),
            LoanerAction::Notify(row_id) => state.dispatcher.notify_loaner(&mut state.ctx, row_id),
        }
    }
    response
}
