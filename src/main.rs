//! Agiliza Uploader — desktop client for the Agiliza conversion service.

mod app;

use eframe::CreationContext;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([520.0, 680.0])
            .with_min_inner_size([420.0, 540.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Agiliza Converter",
        options,
        Box::new(|cc: &CreationContext| Box::new(app::AgilizaApp::new(cc))),
    )
}
