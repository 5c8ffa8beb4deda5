mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::WealthboardApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional CSV path on the command line; otherwise File → Open.
    let initial_path: Option<PathBuf> = std::env::args().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Wealthboard – Billionaires Dashboard",
        options,
        Box::new(move |_cc| {
            let mut app = WealthboardApp::default();
            if let Some(path) = &initial_path {
                app.state.open_path(path);
            }
            Ok(Box::new(app))
        }),
    )
}
