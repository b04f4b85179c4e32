//! Device table: the device model plus its filter, sort and in-flight state.

use std::collections::HashSet;

use chrono::NaiveDate;
use flume::Receiver;
use log::{debug, info, warn};
use slotboard_states::State;

use crate::api::{DeviceNotification, RefreshOutcome, SlotAssignment};
use crate::device::{DeviceDraft, DeviceRecord, DeviceRow, TicketItem};
use crate::error::ApiResult;
use crate::events::{SlottedEvent, SlottedEvents};
use crate::filter::{CategoryFilter, DeviceFilter};
use crate::prefs::{self, PreferenceStore};
use crate::slot::{self, Category, DeviceSlot};
use crate::table::{RowId, RowIdSeq, SortDirection, SortState, sort_rows};

/// KPI counters over every device, regardless of filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceCounts {
    pub total: usize,
    pub slotted: usize,
    pub unslotted: usize,
}

#[derive(Debug, Default)]
pub struct DeviceTableState {
    records: Vec<DeviceRecord>,
    ids: RowIdSeq,
    filter: DeviceFilter,
    category: CategoryFilter,
    sort: SortState,
    /// Tickets with a notify request in flight.
    pending: HashSet<String>,
    refreshing: bool,
    events: SlottedEvents,
    prefs_dirty: bool,
}

impl State for DeviceTableState {}

impl DeviceTableState {
    pub fn records(&self) -> &[DeviceRecord] {
        &self.records
    }

    pub fn record(&self, row_id: RowId) -> Option<&DeviceRecord> {
        self.records.iter().find(|r| r.row_id == row_id)
    }

    fn record_mut(&mut self, row_id: RowId) -> Option<&mut DeviceRecord> {
        self.records.iter_mut().find(|r| r.row_id == row_id)
    }

    /// Replaces the whole model with a fresh backend snapshot.
    pub fn replace_records(&mut self, tickets: Vec<TicketItem>) {
        self.records.clear();
        for ticket in tickets {
            self.add_device_row(DeviceDraft::from(ticket));
        }
    }

    /// Appends one device and returns its new row id.
    pub fn add_device_row(&mut self, draft: DeviceDraft) -> RowId {
        let row_id = self.ids.next_id();
        self.records.push(DeviceRecord::new(row_id, draft));
        row_id
    }

    /// Rows that pass both filters, in the active sort order.
    pub fn visible_rows(&self, today: NaiveDate, ticket_base_url: &str) -> Vec<DeviceRow> {
        let mut rows: Vec<DeviceRow> = self
            .records
            .iter()
            .map(|record| {
                DeviceRow::project(
                    record,
                    self.pending.contains(&record.ticket),
                    today,
                    ticket_base_url,
                )
            })
            .filter(|row| self.filter.matches(row) && self.category.matches(row))
            .collect();
        sort_rows(&mut rows, self.sort);
        rows
    }

    pub fn counts(&self) -> DeviceCounts {
        let total = self.records.len();
        let slotted = self.records.iter().filter(|r| r.is_slotted()).count();
        DeviceCounts {
            total,
            slotted,
            unslotted: total - slotted,
        }
    }

    pub fn filter(&self) -> DeviceFilter {
        self.filter
    }

    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn set_filter(&mut self, filter: DeviceFilter) {
        self.filter = filter;
        self.prefs_dirty = true;
    }

    /// Filter button click: selects `filter`, or returns to `All` if it was active.
    pub fn toggle_filter(&mut self, filter: DeviceFilter) {
        self.set_filter(filter.toggled(self.filter));
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
        self.prefs_dirty = true;
    }

    pub fn toggle_category(&mut self, category: CategoryFilter) {
        self.set_category(category.toggled(self.category));
    }

    pub fn clear_filters(&mut self) {
        self.set_filter(DeviceFilter::All);
        self.set_category(CategoryFilter::All);
    }

    pub fn click_header(&mut self, column: usize) {
        self.sort.click(column);
        self.prefs_dirty = true;
    }

    pub fn subscribe_slotted(&mut self) -> Receiver<SlottedEvent> {
        self.events.subscribe()
    }

    /// Marks a row slotted, recomputes its category and broadcasts `slotted`
    /// when the slot has a shelf number.
    ///
    /// Returns `false` when the row does not exist.
    pub fn slot_device(&mut self, row_id: RowId, slot: impl Into<DeviceSlot>) -> bool {
        let Some(record) = self.record_mut(row_id) else {
            warn!("Cannot slot {row_id}: no such row");
            return false;
        };
        record.assign_slot(slot);
        let category = record.category;
        match record.slot_number() {
            Some(slot) => self.events.emit(SlottedEvent {
                row_id,
                slot,
                category,
            }),
            None => debug!("Row {row_id} slotted without a shelf number"),
        }
        true
    }

    /// Lowest free slot of `category` among the current rows.
    pub fn suggest_slot(&self, category: Category) -> Option<u32> {
        slot::suggest_slot(
            category,
            self.records.iter().filter_map(DeviceRecord::slot_number),
        )
    }

    pub fn is_pending(&self, ticket: &str) -> bool {
        self.pending.contains(ticket)
    }

    /// Starts a notify for `row_id`, returning the ticket to send.
    ///
    /// Returns `None` when the row cannot be notified or a request is already in flight.
    pub fn begin_notify(&mut self, row_id: RowId) -> Option<String> {
        let record = self.record(row_id)?;
        if record.ticket.is_empty() {
            warn!("Cannot notify {row_id}: row has no ticket number");
            return None;
        }
        if !record.can_notify() || self.pending.contains(&record.ticket) {
            return None;
        }
        let ticket = record.ticket.clone();
        self.pending.insert(ticket.clone());
        Some(ticket)
    }

    /// Applies a notify reply and returns the popup text.
    pub fn finish_notify(&mut self, ticket: &str, result: ApiResult<DeviceNotification>) -> String {
        self.pending.remove(ticket);
        let notification = match result {
            Ok(notification) => notification,
            Err(err) => {
                warn!("Notify for {ticket} failed: {err}");
                return format!("Notify failed: {err}");
            }
        };

        let row_id = self
            .records
            .iter()
            .find(|r| r.ticket == ticket)
            .map(|r| r.row_id);
        match row_id {
            Some(row_id) => self.apply_notify(row_id, &notification),
            None => info!("Ticket {ticket} left the table before its notify finished"),
        }
        notification.summary()
    }

    fn apply_notify(&mut self, row_id: RowId, notification: &DeviceNotification) {
        match &notification.slot {
            SlotAssignment::Assigned(slot) => {
                self.slot_device(row_id, *slot);
            }
            SlotAssignment::Other(text) => {
                self.slot_device(row_id, DeviceSlot::Text(text.clone()));
            }
            SlotAssignment::NotRequired => {
                if let Some(record) = self.record_mut(row_id) {
                    record.notified = true;
                }
            }
        }
        if let Some(record) = self.record_mut(row_id) {
            if !notification.ucd.is_empty() {
                record.ucd = notification.ucd.clone();
            }
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Returns `false` if a refresh is already running.
    pub fn begin_refresh(&mut self) -> bool {
        !std::mem::replace(&mut self.refreshing, true)
    }

    /// Applies a manual refresh and returns the throttle advisory, if any.
    pub fn finish_refresh(&mut self, result: ApiResult<RefreshOutcome>) -> Option<String> {
        self.refreshing = false;
        match result {
            Ok(outcome) => {
                let message = outcome.throttle_message();
                self.replace_records(outcome.tickets);
                message
            }
            Err(err) => {
                warn!("Refresh failed: {err}");
                None
            }
        }
    }

    /// Applies a poll result; failures leave an empty table.
    pub fn apply_poll(&mut self, result: ApiResult<Vec<TicketItem>>) {
        match result {
            Ok(tickets) => self.replace_records(tickets),
            Err(err) => {
                warn!("Device poll failed: {err}");
                self.replace_records(Vec::new());
            }
        }
    }

    /// Restores filter and sort selections; unknown values are ignored.
    pub fn load_preferences(&mut self, store: &dyn PreferenceStore) {
        if let Some(filter) = store.get(prefs::FILTER).and_then(|k| DeviceFilter::from_key(&k)) {
            self.filter = filter;
        }
        if let Some(category) = store
            .get(prefs::CATEGORY)
            .and_then(|k| CategoryFilter::from_key(&k))
        {
            self.category = category;
        }
        self.sort = SortState {
            column: store
                .get(prefs::SORT_COLUMN)
                .and_then(|c| c.parse().ok()),
            direction: store
                .get(prefs::SORT_DIRECTION)
                .and_then(|d| SortDirection::from_key(&d))
                .unwrap_or_default(),
        };
        self.prefs_dirty = false;
    }

    pub fn save_preferences(&mut self, store: &mut dyn PreferenceStore) {
        store.set(prefs::FILTER, self.filter.key().to_owned());
        store.set(prefs::CATEGORY, self.category.key().to_owned());
        if let Some(column) = self.sort.column {
            store.set(prefs::SORT_COLUMN, column.to_string());
            store.set(prefs::SORT_DIRECTION, self.sort.direction.key().to_owned());
        }
        self.prefs_dirty = false;
    }

    /// Whether a selection changed since the last load or save.
    pub fn prefs_dirty(&self) -> bool {
        self.prefs_dirty
    }
}
