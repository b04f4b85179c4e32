//! Sortable header row.

use egui::{Sense, Ui};
use egui_extras::TableRow;
use slotboard_business::SortState;

/// Renders one clickable label per column, the active one carrying ▲ or ▼.
///
/// Returns the index of the clicked column.
pub fn render_sortable_header(
    header: &mut TableRow<'_, '_>,
    labels: &[&str],
    sort: SortState,
) -> Option<usize> {
    let mut clicked = None;
    for (index, label) in labels.iter().enumerate() {
        header.col(|ui| {
            if render_header_cell(ui, &format!("{label}{}", sort.indicator(index))) {
                clicked = Some(index);
            }
        });
    }
    clicked
}

#[inline]
fn render_header_cell(ui: &mut Ui, text: &str) -> bool {
    ui.add(egui::Label::new(egui::RichText::new(text).strong()).sense(Sense::click()))
        .on_hover_cursor(egui::CursorIcon::PointingHand)
        .clicked()
}
