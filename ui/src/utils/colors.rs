//! Shared color constants for the UI.

use egui::Color32;
use slotboard_business::{DateBadge, LoanerStatus};

/// Forest green for future dates and loaners in stock.
pub const COLOR_GREEN: Color32 = Color32::from_rgb(34, 139, 34);

/// Red for overdue dates.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Amber for today and loaners being re-imaged.
pub const COLOR_AMBER: Color32 = Color32::from_rgb(255, 193, 7);

/// Blue for loaners currently in use.
pub const COLOR_BLUE: Color32 = Color32::from_rgb(13, 110, 253);

/// Gray for neutral badges and muted placeholders.
pub const COLOR_MUTED: Color32 = Color32::from_rgb(140, 140, 140);

pub fn badge_color(badge: DateBadge) -> Color32 {
    match badge {
        DateBadge::Overdue => COLOR_RED,
        DateBadge::Today => COLOR_AMBER,
        DateBadge::Future => COLOR_GREEN,
        DateBadge::Neutral => COLOR_MUTED,
    }
}

pub fn status_color(status: &LoanerStatus) -> Color32 {
    match status {
        LoanerStatus::InStock => COLOR_GREEN,
        LoanerStatus::InUse => COLOR_BLUE,
        LoanerStatus::Reimaging => COLOR_AMBER,
        LoanerStatus::NotFound | LoanerStatus::Other(_) => COLOR_MUTED,
    }
}
