//! Devices waiting for pickup: KPIs, filters and the device table.

use egui::{Response, ScrollArea, Ui};
use egui_extras::TableBuilder;
use slotboard_business::device::columns::HEADERS;
use slotboard_business::{
    Category, CategoryFilter, DeviceCounts, DeviceFilter, DeviceRow, RowId, SortState,
};

use super::kpi::kpi;
use super::table::cells::{
    render_action_cell, render_date_badge, render_text_cell, render_ticket_cell,
};
use super::table::columns::{HEADER_HEIGHT, ROW_HEIGHT, device_columns};
use super::table::header::render_sortable_header;

/// Something the user asked for on the device page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceAction {
    ToggleFilter(DeviceFilter),
    ToggleCategory(CategoryFilter),
    ClearFilters,
    Refresh,
    SortBy(usize),
    Notify(RowId),
}

/// What the toolbar needs to know about the table.
#[derive(Debug, Clone, Copy)]
pub struct DeviceToolbar {
    pub counts: DeviceCounts,
    pub filter: DeviceFilter,
    pub category: CategoryFilter,
    pub refreshing: bool,
}

/// KPIs, type filters, refresh and clear controls, then the category chips.
pub fn device_toolbar(ui: &mut Ui, toolbar: &DeviceToolbar, actions: &mut Vec<DeviceAction>) {
    ui.horizontal(|ui| {
        kpi(ui, "Total", toolbar.counts.total);
        kpi(ui, "Slotted", toolbar.counts.slotted);
        kpi(ui, "Unslotted", toolbar.counts.unslotted);
    });
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        for filter in [DeviceFilter::Computer, DeviceFilter::Incident, DeviceFilter::Phone] {
            if ui
                .selectable_label(toolbar.filter == filter, filter.label())
                .clicked()
            {
                actions.push(DeviceAction::ToggleFilter(filter));
            }
        }
        ui.separator();
        if ui.button("Clear filters").clicked() {
            actions.push(DeviceAction::ClearFilters);
        }
        if refresh_button(ui, toolbar.refreshing).clicked() {
            actions.push(DeviceAction::Refresh);
        }
    });

    ui.horizontal_wrapped(|ui| {
        for category in Category::SHELVES {
            let chip = CategoryFilter::Only(category);
            if ui
                .selectable_label(toolbar.category == chip, category.label())
                .on_hover_text(category.title())
                .clicked()
            {
                actions.push(DeviceAction::ToggleCategory(chip));
            }
        }
    });
}

/// Shows `Refreshing...` and ignores clicks while a refresh is running.
pub fn refresh_button(ui: &mut Ui, refreshing: bool) -> Response {
    let label = if refreshing { "Refreshing..." } else { "Refresh" };
    ui.add_enabled(!refreshing, egui::Button::new(label))
}

/// The device table; rows arrive filtered and sorted.
pub fn device_table(
    ui: &mut Ui,
    rows: &[DeviceRow],
    sort: SortState,
    actions: &mut Vec<DeviceAction>,
) {
    if rows.is_empty() {
        ui.weak("No devices to show.");
    }

    ScrollArea::horizontal().show(ui, |ui| {
        let mut builder = TableBuilder::new(ui)
            .id_salt("device_table")
            .striped(true)
            .resizable(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center));
        for column in device_columns() {
            builder = builder.column(column);
        }

        builder
            .header(HEADER_HEIGHT, |mut header| {
                if let Some(column) = render_sortable_header(&mut header, &HEADERS, sort) {
                    actions.push(DeviceAction::SortBy(column));
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let data = &rows[row.index()];
                    row.col(|ui| render_text_cell(ui, &data.user));
                    row.col(|ui| render_text_cell(ui, &data.slot_text));
                    row.col(|ui| render_ticket_cell(ui, &data.ticket, data.ticket_url.as_deref()));
                    row.col(|ui| render_date_badge(ui, &data.ucd.text, data.ucd_badge));
                    row.col(|ui| render_text_cell(ui, &data.config_item));
                    row.col(|ui| {
                        if render_action_cell(ui, data.action) {
                            actions.push(DeviceAction::Notify(data.row_id));
                        }
                    });
                });
            });
    });
}
