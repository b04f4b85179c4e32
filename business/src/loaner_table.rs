//! Loaner table: the loaner inventory plus its filter, sort and in-flight state.

use std::collections::HashSet;

use chrono::NaiveDate;
use log::warn;
use slotboard_states::State;

use crate::api::LoanerNotification;
use crate::error::ApiResult;
use crate::filter::LoanerFilter;
use crate::loaner::{LoanerItem, LoanerRecord, LoanerRow, LoanerStatus};
use crate::prefs::{self, PreferenceStore};
use crate::table::{RowId, RowIdSeq, SortDirection, SortState, sort_rows};

/// KPI counters; `not found` loaners are left out of every one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoanerCounts {
    pub total: usize,
    pub in_stock: usize,
    pub in_use: usize,
    pub reimaging: usize,
}

/// A loaner return reminder waiting to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanerNotifyRequest {
    pub loaner_name: String,
    pub user_email: String,
}

#[derive(Debug, Default)]
pub struct LoanerTableState {
    records: Vec<LoanerRecord>,
    ids: RowIdSeq,
    filter: LoanerFilter,
    sort: SortState,
    /// Loaner names with a notify request in flight.
    pending: HashSet<String>,
    refreshing: bool,
    prefs_dirty: bool,
}

impl State for LoanerTableState {}

impl LoanerTableState {
    pub fn records(&self) -> &[LoanerRecord] {
        &self.records
    }

    pub fn replace_records(&mut self, items: Vec<LoanerItem>) {
        self.records = items
            .into_iter()
            .map(|item| LoanerRecord::new(self.ids.next_id(), item))
            .collect();
    }

    pub fn visible_rows(&self, today: NaiveDate) -> Vec<LoanerRow> {
        let mut rows: Vec<LoanerRow> = self
            .records
            .iter()
            .map(|record| LoanerRow::project(record, self.pending.contains(&record.name), today))
            .filter(|row| self.filter.matches(row))
            .collect();
        sort_rows(&mut rows, self.sort);
        rows
    }

    pub fn counts(&self) -> LoanerCounts {
        self.records
            .iter()
            .filter(|r| r.status.is_visible())
            .fold(LoanerCounts::default(), |mut counts, record| {
                counts.total += 1;
                match record.status {
                    LoanerStatus::InStock => counts.in_stock += 1,
                    LoanerStatus::InUse => counts.in_use += 1,
                    LoanerStatus::Reimaging => counts.reimaging += 1,
                    LoanerStatus::NotFound | LoanerStatus::Other(_) => {}
                }
                counts
            })
    }

    pub fn filter(&self) -> LoanerFilter {
        self.filter
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn set_filter(&mut self, filter: LoanerFilter) {
        self.filter = filter;
        self.prefs_dirty = true;
    }

    pub fn toggle_filter(&mut self, filter: LoanerFilter) {
        self.set_filter(filter.toggled(self.filter));
    }

    pub fn clear_filters(&mut self) {
        self.set_filter(LoanerFilter::All);
    }

    pub fn click_header(&mut self, column: usize) {
        self.sort.click(column);
        self.prefs_dirty = true;
    }

    pub fn is_pending(&self, loaner_name: &str) -> bool {
        self.pending.contains(loaner_name)
    }

    /// Starts a return reminder for `row_id`.
    ///
    /// Returns `None` unless the loaner is in use with an assignee and no
    /// reminder for it is in flight.
    pub fn begin_notify(&mut self, row_id: RowId) -> Option<LoanerNotifyRequest> {
        let record = self.records.iter().find(|r| r.row_id == row_id)?;
        if !record.can_notify() || self.pending.contains(&record.name) {
            return None;
        }
        let request = LoanerNotifyRequest {
            loaner_name: record.name.clone(),
            user_email: record.user_assigned.clone(),
        };
        self.pending.insert(request.loaner_name.clone());
        Some(request)
    }

    /// Re-enables the button and returns the popup text.
    pub fn finish_notify(
        &mut self,
        request: &LoanerNotifyRequest,
        result: ApiResult<LoanerNotification>,
    ) -> String {
        self.pending.remove(&request.loaner_name);
        match result {
            Ok(notification) => notification.message(&request.loaner_name, &request.user_email),
            Err(err) => {
                warn!("Loaner notify for {} failed: {err}", request.loaner_name);
                format!("Error sending notification: {err}")
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

    pub fn finish_refresh(&mut self, result: ApiResult<Vec<LoanerItem>>) {
        self.refreshing = false;
        match result {
            Ok(items) => self.replace_records(items),
            Err(err) => warn!("Loaner refresh failed: {err}"),
        }
    }

    /// Applies a poll result; failures leave an empty table.
    pub fn apply_poll(&mut self, result: ApiResult<Vec<LoanerItem>>) {
        match result {
            Ok(items) => self.replace_records(items),
            Err(err) => {
                warn!("Loaner poll failed: {err}");
                self.replace_records(Vec::new());
            }
        }
    }

    pub fn load_preferences(&mut self, store: &dyn PreferenceStore) {
        if let Some(filter) = store
            .get(prefs::LOANER_FILTER)
            .and_then(|k| LoanerFilter::from_key(&k))
        {
            self.filter = filter;
        }
        self.sort = SortState {
            column: store
                .get(prefs::LOANER_SORT_COLUMN)
                .and_then(|c| c.parse().ok()),
            direction: store
                .get(prefs::LOANER_SORT_DIRECTION)
                .and_then(|d| SortDirection::from_key(&d))
                .unwrap_or_default(),
        };
        self.prefs_dirty = false;
    }

    pub fn save_preferences(&mut self, store: &mut dyn PreferenceStore) {
        store.set(prefs::LOANER_FILTER, self.filter.key().to_owned());
        if let Some(column) = self.sort.column {
            store.set(prefs::LOANER_SORT_COLUMN, column.to_string());
            store.set(prefs::LOANER_SORT_DIRECTION, self.sort.direction.key().to_owned());
        }
        self.prefs_dirty = false;
    }

    pub fn prefs_dirty(&self) -> bool {
        self.prefs_dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::DateBadge;
    use crate::error::ApiError;
    use crate::loaner::columns;
    use crate::prefs::MemoryPreferences;
    use crate::table::RowAction;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 10).expect("valid date")
    }

    fn table() -> LoanerTableState {
        let mut table = LoanerTableState::default();
        table.replace_records(vec![
            LoanerItem::new("LN-3", "in use", "2099-01-01", "ada@example.com"),
            LoanerItem::new("LN-1", "In Stock", "", ""),
            LoanerItem::new("LN-2", "not found", "", ""),
            LoanerItem::new("LN-4", "Reimaging", "5/1", ""),
            LoanerItem::new("LN-5", "in use", "5/9", "grace@example.com"),
        ]);
        table
    }

    fn names(rows: &[LoanerRow]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn not_found_is_hidden_and_uncounted() {
        let table = table();
        assert_eq!(
            table.counts(),
            LoanerCounts {
                total: 4,
                in_stock: 1,
                in_use: 2,
                reimaging: 1
            }
        );
        let rows = table.visible_rows(today());
        assert!(!names(&rows).contains(&"LN-2"));
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn far_future_return_is_a_future_badge() {
        let rows = table().visible_rows(today());
        let row = rows.iter().find(|r| r.name == "LN-3").expect("row shown");
        assert_eq!(row.date_badge, DateBadge::Future);
        assert_eq!(row.action, RowAction::Notify);
    }

    #[test]
    fn filter_toggles_back_to_all() {
        let mut table = table();
        table.toggle_filter(LoanerFilter::InUse);
        assert_eq!(names(&table.visible_rows(today())), ["LN-3", "LN-5"]);
        table.toggle_filter(LoanerFilter::InUse);
        assert_eq!(table.filter(), LoanerFilter::All);
        assert_eq!(table.visible_rows(today()).len(), 4);
    }

    #[test]
    fn date_column_sorts_by_date_with_blanks_last() {
        let mut table = table();
        table.click_header(columns::DATE_OF_RETURN);
        assert_eq!(
            names(&table.visible_rows(today())),
            ["LN-4", "LN-5", "LN-3", "LN-1"]
        );
    }

    #[test]
    fn notify_round_trip() {
        let mut table = table();
        let row_id = table.records()[0].row_id;
        let request = table.begin_notify(row_id).expect("in use with user");
        assert_eq!(request.user_email, "ada@example.com");
        assert!(table.begin_notify(row_id).is_none());

        let message = table.finish_notify(&request, Ok(LoanerNotification::Sent));
        assert_eq!(message, "Notification sent to ada@example.com for loaner LN-3.");
        assert!(!table.is_pending("LN-3"));

        table.begin_notify(row_id).expect("enabled again");
        let message = table.finish_notify(
            &request,
            Err(ApiError::Http(crate::http::HttpError::new("connection refused"))),
        );
        assert!(message.starts_with("Error sending notification:"));
    }

    #[test]
    fn rows_without_user_cannot_notify() {
        let mut table = table();
        let in_stock = table.records()[1].row_id;
        assert!(table.begin_notify(in_stock).is_none());
    }

    #[test]
    fn preferences_round_trip() {
        let mut store = MemoryPreferences::new();
        let mut table = table();
        table.toggle_filter(LoanerFilter::Reimaging);
        table.click_header(columns::NAME);
        table.save_preferences(&mut store);

        assert_eq!(store.get(prefs::LOANER_FILTER).as_deref(), Some("reimaging"));
        assert_eq!(store.get(prefs::LOANER_SORT_COLUMN).as_deref(), Some("0"));

        let mut restored = LoanerTableState::default();
        restored.load_preferences(&store);
        assert_eq!(restored.filter(), LoanerFilter::Reimaging);
        assert_eq!(restored.sort().column, Some(columns::NAME));
        assert!(!restored.prefs_dirty());
    }

    #[test]
    fn failed_poll_empties_the_table() {
        let mut table = table();
        table.apply_poll(Err(ApiError::Status(503)));
        assert_eq!(table.counts().total, 0);
    }
}
