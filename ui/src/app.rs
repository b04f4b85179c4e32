use slotboard_states::Time;

use crate::pages::{self, Page};
use crate::state::State;
use crate::utils::storage::{EframePreferences, copy_preferences};
use crate::widgets;

pub struct SlotboardApp {
    state: State,
}

impl SlotboardApp {
    /// Called once before the first frame. Starts the background pollers.
    pub fn new(mut state: State, egui_ctx: &egui::Context) -> Self {
        let repaint = egui_ctx.clone();
        state.dispatcher.set_waker(move || repaint.request_repaint());
        state.dispatcher.start_polling();
        Self { state }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }
}

impl eframe::App for SlotboardApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.live_clock {
            self.state.ctx.update::<Time, _>(|time| time.sync_now());
        }
        self.state.dispatcher.pump(&mut self.state.ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.strong("Slotboard");
                ui.separator();
                for page in Page::ALL {
                    if ui
                        .selectable_label(self.state.page == page, page.label())
                        .clicked()
                    {
                        self.state.page = page;
                    }
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.state.page {
            Page::Devices => {
                pages::devices_page(&mut self.state, ui);
            }
            Page::Loaners => {
                pages::loaners_page(&mut self.state, ui);
            }
        });

        widgets::popup(ctx, &mut self.state.ctx);

        if self.state.sync_preferences() {
            log::debug!("table preferences changed");
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        copy_preferences(&self.state.prefs, &mut EframePreferences::new(storage));
    }
}
