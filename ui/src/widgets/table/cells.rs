//! Cell rendering functions.

use egui::{Button, RichText, Ui};
use slotboard_business::{DateBadge, LoanerStatus, PLACEHOLDER, RowAction};

use crate::utils::colors::{COLOR_MUTED, badge_color, status_color};

#[inline]
pub fn render_text_cell(ui: &mut Ui, text: &str) {
    ui.label(text);
}

/// Muted dash for cells without content.
#[inline]
pub fn render_placeholder_cell(ui: &mut Ui) {
    ui.label(RichText::new(PLACEHOLDER).color(COLOR_MUTED));
}

/// Ticket number, linked to the ticketing system when a URL is known.
#[inline]
pub fn render_ticket_cell(ui: &mut Ui, ticket: &str, url: Option<&str>) {
    match url {
        Some(url) => {
            ui.hyperlink_to(ticket, url).on_hover_text("Open ticket");
        }
        None => render_text_cell(ui, ticket),
    }
}

/// Date text colored by how it compares to today.
#[inline]
pub fn render_date_badge(ui: &mut Ui, text: &str, badge: DateBadge) {
    ui.label(RichText::new(text).color(badge_color(badge)).monospace())
        .on_hover_text(badge.as_str());
}

#[inline]
pub fn render_status_cell(ui: &mut Ui, text: &str, status: &LoanerStatus) {
    ui.label(RichText::new(text).color(status_color(status)));
}

/// Notify button, disabled with a spinner while its request is in flight.
///
/// Returns `true` if the button was clicked.
#[inline]
pub fn render_action_cell(ui: &mut Ui, action: RowAction) -> bool {
    match action {
        RowAction::Notify => ui.button("Notify").clicked(),
        RowAction::Pending => {
            ui.horizontal(|ui| {
                ui.add_enabled(false, Button::new("Notify"));
                ui.spinner();
            });
            false
        }
        RowAction::Placeholder => {
            render_placeholder_cell(ui);
            false
        }
    }
}
