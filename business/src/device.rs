//! Devices waiting for pickup, as tickets from the backend and as table rows.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::date::{DateBadge, ParsedDate};
use crate::slot::{Category, DeviceSlot};
use crate::table::{RowAction, RowId, SortableRow};
use crate::wire;

/// Short-description marker for phones that are ready to be collected.
const PHONE_MARKER: &str = "Ready for Pickup";

/// Ticket number marker for incidents (everything else is a catalog task).
const INCIDENT_MARKER: &str = "INC";

/// A ticket object as returned by `/get-data` and `/refresh-data`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TicketItem {
    #[serde(default, deserialize_with = "wire::text")]
    pub number: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub requested_for: String,
    #[serde(default, deserialize_with = "wire::slot")]
    pub slot: Option<DeviceSlot>,
    #[serde(default, deserialize_with = "wire::text")]
    pub ucd: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub cmdb_ci: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub short_description: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub sys_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceType {
    #[default]
    Computer,
    Phone,
}

impl DeviceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Computer => "computer",
            Self::Phone => "phone",
        }
    }
}

/// Everything needed to add a device row; the table assigns the row id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceDraft {
    pub user: String,
    pub slot: Option<DeviceSlot>,
    pub ticket: String,
    pub ucd: String,
    pub config_item: String,
    pub device_type: DeviceType,
    pub incident: bool,
    /// Explicit category; derived from the slot when absent.
    pub category: Option<Category>,
    pub sys_id: String,
}

impl From<TicketItem> for DeviceDraft {
    fn from(item: TicketItem) -> Self {
        let incident = item.number.contains(INCIDENT_MARKER);
        let device_type = if !incident && item.short_description.contains(PHONE_MARKER) {
            DeviceType::Phone
        } else {
            DeviceType::Computer
        };
        Self {
            user: item.requested_for,
            slot: item.slot,
            ticket: item.number,
            ucd: item.ucd,
            config_item: item.cmdb_ci,
            device_type,
            incident,
            category: None,
            sys_id: item.sys_id,
        }
    }
}

/// One device in the in-memory model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    pub row_id: RowId,
    pub user: String,
    pub slot: Option<DeviceSlot>,
    pub ticket: String,
    pub ucd: String,
    pub config_item: String,
    pub device_type: DeviceType,
    pub incident: bool,
    pub category: Category,
    pub sys_id: String,
    /// Set once a notification went out without a slot being needed.
    pub notified: bool,
}

impl DeviceRecord {
    pub fn new(row_id: RowId, draft: DeviceDraft) -> Self {
        let category = draft.category.unwrap_or_else(|| {
            draft
                .slot
                .as_ref()
                .map_or(Category::Unassigned, DeviceSlot::category)
        });
        Self {
            row_id,
            user: draft.user,
            slot: draft.slot,
            ticket: draft.ticket,
            ucd: draft.ucd,
            config_item: draft.config_item,
            device_type: draft.device_type,
            incident: draft.incident,
            category,
            sys_id: draft.sys_id,
            notified: false,
        }
    }

    pub fn is_slotted(&self) -> bool {
        self.slot.is_some()
    }

    /// Places the device in `slot` and recomputes its category.
    pub fn assign_slot(&mut self, slot: impl Into<DeviceSlot>) {
        let slot = slot.into();
        self.category = slot.category();
        self.slot = Some(slot);
    }

    /// Shelf number of the slot, if it has one.
    pub fn slot_number(&self) -> Option<u32> {
        self.slot.as_ref().and_then(DeviceSlot::number)
    }

    /// Notify is offered for devices that are neither slotted nor already notified.
    pub fn can_notify(&self) -> bool {
        !self.is_slotted() && !self.notified
    }

    /// Deep link to the ticket in the ticketing system.
    pub fn ticket_url(&self, ticket_base_url: &str) -> Option<String> {
        if self.ticket.is_empty() {
            return None;
        }
        let table = if self.ticket.contains(INCIDENT_MARKER) {
            "incident"
        } else {
            "sc_task"
        };
        Some(format!(
            "{}/{table}.do?sys_id={}&sysparm_stack=&sysparm_view=",
            ticket_base_url.trim_end_matches('/'),
            self.sys_id
        ))
    }
}

/// Column order of the device table.
pub mod columns {
    pub const USER: usize = 0;
    pub const SLOT: usize = 1;
    pub const TICKET: usize = 2;
    pub const UCD: usize = 3;
    pub const CONFIG_ITEM: usize = 4;
    pub const NOTIFY: usize = 5;

    pub const HEADERS: [&str; 6] = ["User", "Slot", "Ticket", "UCD", "Config Item", "Notify"];
}

/// Display projection of a [`DeviceRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRow {
    pub row_id: RowId,
    pub user: String,
    pub slot_text: String,
    pub ticket: String,
    pub ticket_url: Option<String>,
    pub ucd: ParsedDate,
    pub ucd_badge: DateBadge,
    pub config_item: String,
    pub device_type: DeviceType,
    pub incident: bool,
    pub category: Category,
    pub slotted: bool,
    pub action: RowAction,
}

impl DeviceRow {
    pub fn project(
        record: &DeviceRecord,
        pending: bool,
        today: NaiveDate,
        ticket_base_url: &str,
    ) -> Self {
        let ucd = ParsedDate::parse(&record.ucd, today);
        let action = if pending {
            RowAction::Pending
        } else if record.can_notify() {
            RowAction::Notify
        } else {
            RowAction::Placeholder
        };
        Self {
            row_id: record.row_id,
            user: record.user.clone(),
            slot_text: record
                .slot
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            ticket: record.ticket.clone(),
            ticket_url: record.ticket_url(ticket_base_url),
            ucd_badge: ucd.badge(today),
            ucd,
            config_item: record.config_item.clone(),
            device_type: record.device_type,
            incident: record.incident,
            category: record.category,
            slotted: record.is_slotted(),
            action,
        }
    }
}

impl SortableRow for DeviceRow {
    const DATE_COLUMN: Option<usize> = Some(columns::UCD);

    fn cell_text(&self, column: usize) -> &str {
        match column {
            columns::USER => &self.user,
            columns::SLOT => &self.slot_text,
            columns::TICKET => &self.ticket,
            columns::UCD => &self.ucd.text,
            columns::CONFIG_ITEM => &self.config_item,
            columns::NOTIFY => self.action.cell_text(),
            _ => "",
        }
    }

    fn sort_date(&self) -> Option<NaiveDate> {
        self.ucd.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(number: &str, short_description: &str) -> TicketItem {
        TicketItem {
            number: number.to_owned(),
            short_description: short_description.to_owned(),
            ..TicketItem::default()
        }
    }

    #[test]
    fn incident_tickets_are_computers_with_the_flag() {
        let draft = DeviceDraft::from(ticket("INC0012345", "Ready for Pickup slot 3"));
        assert!(draft.incident);
        assert_eq!(draft.device_type, DeviceType::Computer);
    }

    #[test]
    fn ready_for_pickup_tasks_are_phones() {
        let draft = DeviceDraft::from(ticket("SCTASK0099", "iPhone Ready for Pickup"));
        assert!(!draft.incident);
        assert_eq!(draft.device_type, DeviceType::Phone);
    }

    #[test]
    fn other_tasks_are_computers() {
        let draft = DeviceDraft::from(ticket("SCTASK0100", "New laptop slot 12"));
        assert!(!draft.incident);
        assert_eq!(draft.device_type, DeviceType::Computer);
    }

    #[test]
    fn category_comes_from_slot_unless_given() {
        let slotted = DeviceRecord::new(
            RowId(1),
            DeviceDraft {
                slot: Some(DeviceSlot::Number(40)),
                ..DeviceDraft::default()
            },
        );
        assert_eq!(slotted.category, Category::Zbooks);

        let unslotted = DeviceRecord::new(RowId(2), DeviceDraft::default());
        assert_eq!(unslotted.category, Category::Unassigned);

        let explicit = DeviceRecord::new(
            RowId(3),
            DeviceDraft {
                slot: Some(DeviceSlot::Number(40)),
                category: Some(Category::Repaired),
                ..DeviceDraft::default()
            },
        );
        assert_eq!(explicit.category, Category::Repaired);
    }

    #[test]
    fn ticket_links_pick_the_ticket_table() {
        let mut record = DeviceRecord::new(
            RowId(1),
            DeviceDraft {
                ticket: "INC001".to_owned(),
                sys_id: "abc".to_owned(),
                ..DeviceDraft::default()
            },
        );
        assert_eq!(
            record.ticket_url("https://tickets.example/nav/").as_deref(),
            Some("https://tickets.example/nav/incident.do?sys_id=abc&sysparm_stack=&sysparm_view=")
        );

        record.ticket = "SCTASK001".to_owned();
        assert!(
            record
                .ticket_url("https://tickets.example/nav")
                .is_some_and(|url| url.contains("/sc_task.do?sys_id=abc"))
        );

        record.ticket.clear();
        assert_eq!(record.ticket_url("https://tickets.example/nav"), None);
    }

    #[test]
    fn only_unslotted_rows_offer_notify() {
        let today = NaiveDate::from_ymd_opt(2026, 5, 10).expect("valid date");
        let mut record = DeviceRecord::new(RowId(1), DeviceDraft::default());
        assert_eq!(DeviceRow::project(&record, false, today, "").action, RowAction::Notify);
        assert_eq!(DeviceRow::project(&record, true, today, "").action, RowAction::Pending);

        record.assign_slot(5);
        let row = DeviceRow::project(&record, false, today, "");
        assert_eq!(row.action, RowAction::Placeholder);
        assert_eq!(row.slot_text, "5");
        assert_eq!(row.category, Category::Elitebooks);
        assert!(row.slotted);
    }

    #[test]
    fn any_stored_slot_value_counts_as_slotted() {
        let today = NaiveDate::from_ymd_opt(2026, 5, 10).expect("valid date");
        let decode = |slot: serde_json::Value| {
            let item: TicketItem =
                serde_json::from_value(serde_json::json!({"number": "SCTASK7", "slot": slot}))
                    .expect("ticket decodes");
            let record = DeviceRecord::new(RowId(1), DeviceDraft::from(item));
            DeviceRow::project(&record, false, today, "")
        };

        let overflow = decode(serde_json::json!("57, Overflow! Using Slot 57 as overflow slot"));
        assert!(overflow.slotted);
        assert_eq!(overflow.slot_text, "57, Overflow! Using Slot 57 as overflow slot");
        assert_eq!(overflow.category, Category::Toughbooks);
        assert_eq!(overflow.action, RowAction::Placeholder);

        let mac = decode(serde_json::json!(-1));
        assert!(mac.slotted);
        assert_eq!(mac.slot_text, "-1");
        assert_eq!(mac.category, Category::Unassigned);
        assert_eq!(mac.action, RowAction::Placeholder);

        let zero = decode(serde_json::json!(0));
        assert!(!zero.slotted);
        assert_eq!(zero.slot_text, "");
        assert_eq!(zero.action, RowAction::Notify);
    }
}
