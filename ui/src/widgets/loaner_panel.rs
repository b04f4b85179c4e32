//! Loaner inventory: KPIs, status filters and the loaner table.

use egui::{ScrollArea, Ui};
use egui_extras::TableBuilder;
use slotboard_business::loaner::columns::HEADERS;
use slotboard_business::{LoanerCounts, LoanerFilter, LoanerRow, PLACEHOLDER, RowId, SortState};

use super::device_panel::refresh_button;
use super::kpi::kpi;
use super::table::cells::{
    render_action_cell, render_date_badge, render_placeholder_cell, render_status_cell,
    render_text_cell,
};
use super::table::columns::{HEADER_HEIGHT, ROW_HEIGHT, loaner_columns};
use super::table::header::render_sortable_header;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanerAction {
    ToggleFilter(LoanerFilter),
    ClearFilters,
    Refresh,
    SortBy(usize),
    Notify(RowId),
}

#[derive(Debug, Clone, Copy)]
pub struct LoanerToolbar {
    pub counts: LoanerCounts,
    pub filter: LoanerFilter,
    pub refreshing: bool,
}

pub fn loaner_toolbar(ui: &mut Ui, toolbar: &LoanerToolbar, actions: &mut Vec<LoanerAction>) {
    ui.horizontal(|ui| {
        kpi(ui, "Total", toolbar.counts.total);
        kpi(ui, "In Stock", toolbar.counts.in_stock);
        kpi(ui, "In Use", toolbar.counts.in_use);
        kpi(ui, "Re-imaging", toolbar.counts.reimaging);
    });
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        for filter in [LoanerFilter::InStock, LoanerFilter::InUse, LoanerFilter::Reimaging] {
            if ui
                .selectable_label(toolbar.filter == filter, filter.label())
                .clicked()
            {
                actions.push(LoanerAction::ToggleFilter(filter));
            }
        }
        ui.separator();
        if ui.button("Clear filters").clicked() {
            actions.push(LoanerAction::ClearFilters);
        }
        if refresh_button(ui, toolbar.refreshing).clicked() {
            actions.push(LoanerAction::Refresh);
        }
    });
}

pub fn loaner_table(
    ui: &mut Ui,
    rows: &[LoanerRow],
    sort: SortState,
    actions: &mut Vec<LoanerAction>,
) {
    if rows.is_empty() {
        ui.weak("No loaners to show.");
    }

    ScrollArea::horizontal().show(ui, |ui| {
        let mut builder = TableBuilder::new(ui)
            .id_salt("loaner_table")
            .striped(true)
            .resizable(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center));
        for column in loaner_columns() {
            builder = builder.column(column);
        }

        builder
            .header(HEADER_HEIGHT, |mut header| {
                if let Some(column) = render_sortable_header(&mut header, &HEADERS, sort) {
                    actions.push(LoanerAction::SortBy(column));
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let data = &rows[row.index()];
                    row.col(|ui| render_text_cell(ui, &data.name));
                    row.col(|ui| render_status_cell(ui, &data.status_text, &data.status));
                    row.col(|ui| {
                        if data.return_date.is_some() {
                            render_date_badge(ui, &data.date_text, data.date_badge);
                        } else {
                            render_placeholder_cell(ui);
                        }
                    });
                    row.col(|ui| {
                        if data.user_text == PLACEHOLDER {
                            render_placeholder_cell(ui);
                        } else {
                            render_text_cell(ui, &data.user_text);
                        }
                    });
                    row.col(|ui| {
                        if render_action_cell(ui, data.action) {
                            actions.push(LoanerAction::Notify(data.row_id));
                        }
                    });
                });
            });
    });
}
