//! Application entry point

use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use gapsboard::app::App;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,gapsboard=debug".into()),
        )
        .init();

    tracing::info!("Starting GAPS Board");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            Config::new().with_window(
                WindowBuilder::new()
                    .with_title("GAPS Board")
                    .with_inner_size(LogicalSize::new(1280.0, 860.0)),
            ),
        )
        .launch(App);
}
