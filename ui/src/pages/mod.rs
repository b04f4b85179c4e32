//! Pages module for the application.
//!
//! - `devices_page`: devices waiting for pickup and their shelf slots
//! - `loaners_page`: loaner inventory and return reminders

mod devices_page;
mod loaners_page;

pub use devices_page::devices_page;
pub use loaners_page::loaners_page;

/// Which table the central panel shows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    #[default]
    Devices,
    Loaners,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Devices, Page::Loaners];

    pub fn label(self) -> &'static str {
        match self {
            Page::Devices => "Devices",
            Page::Loaners => "Loaners",
        }
    }
}
