//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads and schema-checks the model artifact
//! - hands control to the terminal UI

use clap::Parser;

use crate::cli::Cli;
use crate::domain::AppConfig;
use crate::error::AppError;
use crate::model::LinearModel;

/// Entry point for the `homeval` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig {
        model_path: cli.model,
        data_path: cli.data,
    };

    // Load the artifact before any terminal mode change so a corrupt or
    // mismatched file terminates with a clean stderr diagnostic instead of
    // garbling the screen. The handle is immutable for the process lifetime.
    let model = LinearModel::load(&config.model_path)?;
    model.check_schema()?;

    crate::tui::run(config, model)
}
