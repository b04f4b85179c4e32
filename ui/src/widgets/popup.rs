//! Modal confirmation for finished actions.

use egui::{Align2, Context};
use slotboard_business::Popups;
use slotboard_states::StateCtx;

/// Shows the oldest pending popup until it is acknowledged.
pub fn popup(ctx: &Context, state_ctx: &mut StateCtx) {
    let Some(current) = state_ctx.state::<Popups>().current().cloned() else {
        return;
    };

    let mut dismissed = false;
    egui::Window::new(&current.title)
        .id(egui::Id::new("action_popup"))
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            for line in current.message.lines() {
                ui.label(line);
            }
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        state_ctx.state_mut::<Popups>().dismiss();
    }
}
