use egui::{Frame, Margin, RichText, Ui};

/// A labelled counter tile.
pub fn kpi(ui: &mut Ui, label: &str, value: usize) {
    Frame::group(ui.style())
        .inner_margin(Margin::symmetric(10, 4))
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.weak(label);
                ui.label(RichText::new(value.to_string()).heading().strong());
            });
        });
}
