mod device_panel;
mod kpi;
mod loaner_panel;
mod popup;
pub mod table;

pub use device_panel::{
    DeviceAction, DeviceToolbar, device_table, device_toolbar, refresh_button,
};
pub use kpi::kpi;
pub use loaner_panel::{LoanerAction, LoanerToolbar, loaner_table, loaner_toolbar};
pub use popup::popup;
