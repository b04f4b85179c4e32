#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use slotboard_business::BusinessConfig;
use slotboard_ui::SlotboardApp;
use slotboard_ui::state::State;
use slotboard_ui::utils::storage::read_preferences;

mod alloc {
    #[global_allocator]
    static MALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;
}

fn main() -> anyhow::Result<()> {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_module("egui_winit::clipboard", log::LevelFilter::Off)
        .init();

    let config = BusinessConfig::from_env()?;
    log::info!("backend at {}", config.api_base_url);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("slotboard-io")
        .build()?;

    let native_options = eframe::NativeOptions {
        hardware_acceleration: eframe::HardwareAcceleration::Preferred,
        persist_window: true,
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    let handle = runtime.handle().clone();
    eframe::run_native(
        "Slotboard",
        native_options,
        Box::new(move |cc| {
            let mut state = State::new(handle, config);
            if let Some(storage) = cc.storage {
                let prefs = read_preferences(storage);
                state.load_preferences(&prefs);
            }
            Ok(Box::new(SlotboardApp::new(state, &cc.egui_ctx)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to run the dashboard: {err}"))
}
