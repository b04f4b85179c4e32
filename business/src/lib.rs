pub mod api;
pub mod config;
pub mod dashboard;
pub mod date;
pub mod device;
pub mod device_table;
pub mod error;
pub mod events;
pub mod filter;
pub mod http;
pub mod loaner;
pub mod loaner_table;
pub mod poller;
pub mod prefs;
pub mod slot;
pub mod table;
mod wire;

pub use api::{
    DashboardApi, DeviceNotification, LoanerNotification, RefreshOutcome, SlotAssignment,
    throttle_message,
};
pub use config::BusinessConfig;
pub use dashboard::{DashboardMessage, Dispatcher, Popup, Popups, apply_message};
pub use date::{DateBadge, ParsedDate, classify, parse_date};
pub use device::{DeviceDraft, DeviceRecord, DeviceRow, DeviceType, TicketItem};
pub use device_table::{DeviceCounts, DeviceTableState};
pub use error::{ApiError, ApiResult};
pub use events::{SlottedEvent, SlottedEvents};
pub use filter::{CategoryFilter, DeviceFilter, LoanerFilter};
pub use loaner::{LoanerItem, LoanerRecord, LoanerRow, LoanerStatus};
pub use loaner_table::{LoanerCounts, LoanerNotifyRequest, LoanerTableState};
pub use poller::spawn_poller;
pub use prefs::{MemoryPreferences, PreferenceStore};
pub use slot::{Category, DeviceSlot, suggest_slot};
pub use table::{PLACEHOLDER, RowAction, RowId, SortDirection, SortState, SortableRow};
