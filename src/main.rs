use eframe::egui;

mod api;
mod app;
mod config;
mod error;
mod fetch;
mod formats;
mod handoff;
mod localizations;
mod models;
mod theme;
mod toast;
mod ui;

use app::VidlApp;
use config::ClientConfig;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("vidl_gui=info"))
        .init();

    let config = ClientConfig::load();
    log::info!("using backend {}", config.base_url);
    let app = VidlApp::new(&config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([820.0, 640.0])
            .with_min_inner_size([600.0, 450.0])
            .with_title("Video Downloader"),
        ..Default::default()
    };

    eframe::run_native(
        "Video Downloader",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Box::new(app)
        }),
    )
    .map_err(|e| anyhow::anyhow!("window failed: {e}"))
}
