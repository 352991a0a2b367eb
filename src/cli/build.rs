//! Build command implementation.

use super::CliError;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use turnpipe::build::{Pipeline, SystemClipboard, SystemRunner};
use turnpipe::config::{CONFIG_FILE, Config};

/// Execute the build command in the current directory.
///
/// # Errors
///
/// Returns an error carrying the failing step's exit status.
pub(crate) fn execute() -> Result<(), CliError> {
    let root = Path::new(".");
    let config = Config::load(&root.join(CONFIG_FILE))?;

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));

    let artifact = Pipeline::new(root, &config.build, SystemRunner::new(root), SystemClipboard)
        .with_progress(spinner)
        .run()?;

    println!("Wrote {}", artifact.display());
    Ok(())
}
