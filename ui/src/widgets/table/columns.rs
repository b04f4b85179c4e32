//! Column definitions for both tables.

use egui_extras::Column;

pub const SLOT_WIDTH: f32 = 50.0;
pub const DATE_WIDTH: f32 = 110.0;
pub const STATUS_WIDTH: f32 = 110.0;
pub const NOTIFY_WIDTH: f32 = 90.0;
pub const ROW_HEIGHT: f32 = 28.0;
pub const HEADER_HEIGHT: f32 = 24.0;

/// User, Slot, Ticket, UCD, Config Item, Notify.
#[inline]
pub fn device_columns() -> Vec<Column> {
    vec![
        Column::remainder().at_least(140.0), // User - flexible
        Column::exact(SLOT_WIDTH),           // Slot
        Column::auto().at_least(110.0),      // Ticket
        Column::exact(DATE_WIDTH),           // UCD
        Column::auto().at_least(110.0),      // Config Item
        Column::exact(NOTIFY_WIDTH),         // Notify
    ]
}

/// Loaner, Status, Date of Return, User Assigned To, Notify.
#[inline]
pub fn loaner_columns() -> Vec<Column> {
    vec![
        Column::auto().at_least(100.0),      // Loaner
        Column::exact(STATUS_WIDTH),         // Status
        Column::exact(DATE_WIDTH),           // Date of Return
        Column::remainder().at_least(160.0), // User Assigned To - flexible
        Column::exact(NOTIFY_WIDTH),         // Notify
    ]
}
