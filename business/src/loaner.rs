//! Loaner devices, as inventory items from the backend and as table rows.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::date::{self, DateBadge};
use crate::table::{PLACEHOLDER, RowAction, RowId, SortableRow};
use crate::wire;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LoanerStatus {
    InStock,
    InUse,
    Reimaging,
    NotFound,
    /// Any status the dashboard has no filter for.
    Other(String),
}

impl LoanerStatus {
    pub fn parse(status: &str) -> Self {
        let normalized = status.trim().to_lowercase();
        match normalized.as_str() {
            "in stock" => Self::InStock,
            "in use" => Self::InUse,
            "re-imaging" | "reimaging" => Self::Reimaging,
            "not found" => Self::NotFound,
            _ => Self::Other(normalized),
        }
    }

    /// `not found` loaners are never shown or counted.
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

/// A loaner object as returned by `/get-loaner-data`.
///
/// Both snake_case and camelCase spellings are accepted; the first non-empty one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoanerItem {
    #[serde(default, deserialize_with = "wire::text")]
    name: String,
    #[serde(default, deserialize_with = "wire::text")]
    loaner_name: String,
    #[serde(default, deserialize_with = "wire::text")]
    status: String,
    #[serde(default, deserialize_with = "wire::text")]
    date_of_return: String,
    #[serde(default, rename = "dateOfReturn", deserialize_with = "wire::text")]
    date_of_return_camel: String,
    #[serde(default, deserialize_with = "wire::text")]
    user_assigned_to: String,
    #[serde(default, rename = "userAssigned", deserialize_with = "wire::text")]
    user_assigned_camel: String,
}

impl LoanerItem {
    pub fn new(name: &str, status: &str, date_of_return: &str, user_assigned_to: &str) -> Self {
        Self {
            name: name.to_owned(),
            status: status.to_owned(),
            date_of_return: date_of_return.to_owned(),
            user_assigned_to: user_assigned_to.to_owned(),
            ..Self::default()
        }
    }
}

fn first_non_empty(primary: String, fallback: String) -> String {
    if primary.is_empty() { fallback } else { primary }
}

/// One loaner in the in-memory model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanerRecord {
    pub row_id: RowId,
    pub name: String,
    /// Status as the backend spelled it, shown in the status badge.
    pub status_text: String,
    pub status: LoanerStatus,
    pub date_of_return: String,
    pub user_assigned: String,
}

impl LoanerRecord {
    pub fn new(row_id: RowId, item: LoanerItem) -> Self {
        let status = LoanerStatus::parse(&item.status);
        Self {
            row_id,
            name: first_non_empty(item.name, item.loaner_name),
            status_text: item.status,
            status,
            date_of_return: first_non_empty(item.date_of_return, item.date_of_return_camel),
            user_assigned: first_non_empty(item.user_assigned_to, item.user_assigned_camel),
        }
    }

    /// Return reminders only make sense for loaners someone has.
    pub fn can_notify(&self) -> bool {
        self.status == LoanerStatus::InUse && !self.user_assigned.is_empty()
    }
}

/// Column order of the loaner table.
pub mod columns {
    pub const NAME: usize = 0;
    pub const STATUS: usize = 1;
    pub const DATE_OF_RETURN: usize = 2;
    pub const USER: usize = 3;
    pub const NOTIFY: usize = 4;

    pub const HEADERS: [&str; 5] = ["Loaner", "Status", "Date of Return", "User Assigned To", "Notify"];
}

/// Display projection of a [`LoanerRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanerRow {
    pub row_id: RowId,
    pub name: String,
    pub status_text: String,
    pub status: LoanerStatus,
    pub return_date: Option<NaiveDate>,
    /// `MM/DD/YYYY`, or a placeholder when the date is missing or unreadable.
    pub date_text: String,
    pub date_badge: DateBadge,
    /// Assignee, shown only for loaners in use.
    pub user_text: String,
    pub action: RowAction,
}

impl LoanerRow {
    pub fn project(record: &LoanerRecord, pending: bool, today: NaiveDate) -> Self {
        let return_date = date::parse_date(&record.date_of_return, today);
        let can_notify = record.can_notify();
        let action = match (can_notify, pending) {
            (true, true) => RowAction::Pending,
            (true, false) => RowAction::Notify,
            (false, _) => RowAction::Placeholder,
        };
        Self {
            row_id: record.row_id,
            name: record.name.clone(),
            status_text: record.status_text.clone(),
            status: record.status.clone(),
            return_date,
            date_text: return_date
                .map(date::format_us_date)
                .unwrap_or_else(|| PLACEHOLDER.to_owned()),
            date_badge: date::classify(return_date, today),
            user_text: if can_notify {
                record.user_assigned.clone()
            } else {
                PLACEHOLDER.to_owned()
            },
            action,
        }
    }
}

impl SortableRow for LoanerRow {
    const DATE_COLUMN: Option<usize> = Some(columns::DATE_OF_RETURN);

    fn cell_text(&self, column: usize) -> &str {
        match column {
            columns::NAME => &self.name,
            columns::STATUS => &self.status_text,
            columns::DATE_OF_RETURN => &self.date_text,
            columns::USER => &self.user_text,
            columns::NOTIFY => self.action.cell_text(),
            _ => "",
        }
    }

    fn sort_date(&self) -> Option<NaiveDate> {
        self.return_date
    }
}
