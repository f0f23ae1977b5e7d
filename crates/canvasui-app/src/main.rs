//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    use canvasui_app::{App, AppConfig};

    env_logger::init();
    log::info!("Starting CanvasUI");

    let config = match std::env::args().nth(1) {
        Some(path) => match AppConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => AppConfig::default(),
    };

    match App::with_config(config) {
        Ok(mut app) => app.run(),
        Err(e) => {
            log::error!("Failed to start: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
