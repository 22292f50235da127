//! Desktop viewer for the stipple scatter renderer.
//!
//! Drag to pan, scroll to zoom, Escape to quit.

mod app;
mod config;
mod demo;
mod host;

use stipple_engine::logging::{init_logging, LoggingConfig};
use stipple_engine::window::{Runtime, RuntimeConfig};

use crate::app::ViewerApp;
use crate::config::ViewerConfig;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = ViewerConfig::from_env();
    log::info!("starting viewer: {config:?}");

    Runtime::run(RuntimeConfig::default(), ViewerApp::new(config))
}
