//! Action Sheet - a dismissible bottom sheet of actions for ratatui
//!
//! This library provides an action-sheet overlay: a list of labeled,
//! icon-bearing actions that slides up from the bottom of the terminal over a
//! dimmed backdrop, and runs the picked action's handler once it is gone.
//!
//! # Architecture
//!
//! - **Configuration**: style options shared through an explicit handle
//! - **Sheet**: action rows, list view, backdrop, and the controller driving them
//! - **App**: a small crossterm host used by the demo binary

pub mod app;
pub mod config;
pub mod error;
pub mod sheet;

pub use app::App;
pub use config::{SharedConfiguration, SheetConfiguration};
pub use error::{AppError, AppResult};
pub use sheet::{Action, Overlay, SheetController, SheetState};

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging system with structured logging
///
/// `RUST_LOG` wins when set; otherwise `default_level` applies to this crate.
/// Logs go to stderr so they stay out of the rendered screen when redirected.
pub fn initialize_logging(default_level: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("action_sheet={}", default_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}
