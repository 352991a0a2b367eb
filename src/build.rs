//! Submission build pipeline.
//!
//! Produces a single-file submission from the compiled logic module and a
//! shim source:
//!
//! ```text
//! Main.elm ──compile──> Elm.js ──compress──> (stdout) ──mangle──> Elm.terser.js
//!     ──format──> Elm.prettier.js ──(header + module + shim)──> code.js
//! ```
//!
//! Each step runs to completion before the next. Any external program
//! failure aborts the build immediately; files written by earlier steps are
//! left as they are.

mod clipboard;
mod runner;

pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use runner::{Runner, Step, SystemRunner};

use crate::config::BuildConfig;
use crate::error::BuildError;
use indicatif::ProgressBar;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Compiler output inside the build directory.
pub const COMPILED: &str = "Elm.js";
/// Minifier output inside the build directory.
pub const MANGLED: &str = "Elm.terser.js";
/// Formatter output inside the build directory.
pub const FORMATTED: &str = "Elm.prettier.js";

/// Minifier `--compress` options for dead-code elimination.
#[must_use]
pub fn compress_options(pure_funcs: &[String]) -> String {
    let funcs = pure_funcs
        .iter()
        .map(|f| format!("\"{f}\""))
        .collect::<Vec<_>>()
        .join(",");
    format!("pure_funcs=[{funcs}],pure_getters,keep_fargs=false,unsafe_comps,unsafe")
}

/// The build pipeline for one project directory.
pub struct Pipeline<'a, R, C> {
    root: PathBuf,
    config: &'a BuildConfig,
    runner: R,
    clipboard: C,
    progress: ProgressBar,
}

impl<R: fmt::Debug, C: fmt::Debug> fmt::Debug for Pipeline<'_, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("root", &self.root)
            .field("config", &self.config)
            .field("runner", &self.runner)
            .field("clipboard", &self.clipboard)
            .finish_non_exhaustive()
    }
}

impl<'a, R: Runner, C: Clipboard> Pipeline<'a, R, C> {
    /// Create a pipeline rooted at `root`; all configured paths are relative
    /// to it.
    pub fn new(root: impl Into<PathBuf>, config: &'a BuildConfig, runner: R, clipboard: C) -> Self {
        Self {
            root: root.into(),
            config,
            runner,
            clipboard,
            progress: ProgressBar::hidden(),
        }
    }

    /// Report step progress on `progress`.
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Give back the clipboard, e.g. to inspect what was copied.
    pub fn into_clipboard(self) -> C {
        self.clipboard
    }

    /// Run every step and return the artifact path.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error. [`BuildError::exit_code`]
    /// gives the code to exit with.
    pub fn run(&mut self) -> Result<PathBuf, BuildError> {
        let build_dir = self.config.build_dir.clone();
        let abs_build_dir = self.root.join(&build_dir);
        fs::create_dir_all(&abs_build_dir).map_err(|source| BuildError::File {
            path: abs_build_dir.clone(),
            source,
        })?;

        let compiled = arg(&build_dir.join(COMPILED));
        let mangled = arg(&build_dir.join(MANGLED));

        self.step(
            "compiling",
            &Step::inherited(
                &self.config.compiler,
                vec![
                    "make".to_string(),
                    arg(&self.config.main),
                    "--optimize".to_string(),
                    "--output".to_string(),
                    compiled.clone(),
                ],
            ),
        )?;

        let minified = self.step(
            "compressing",
            &Step::captured(
                &self.config.minifier,
                vec![
                    compiled,
                    "--compress".to_string(),
                    compress_options(&self.config.pure_funcs),
                ],
            ),
        )?;

        self.step(
            "mangling",
            &Step::captured(
                &self.config.minifier,
                vec!["--mangle".to_string(), "--output".to_string(), mangled.clone()],
            )
            .with_input(minified),
        )?;

        let formatted = self.step(
            "formatting",
            &Step::captured(&self.config.formatter, vec![mangled]),
        )?;
        write_file(&abs_build_dir.join(FORMATTED), &formatted)?;

        let shim_path = self.root.join(&self.config.shim);
        let shim = fs::read(&shim_path).map_err(|source| BuildError::File {
            path: shim_path,
            source,
        })?;

        let mut artifact = Vec::with_capacity(self.config.header.len() + formatted.len() + shim.len());
        artifact.extend_from_slice(self.config.header.as_bytes());
        artifact.extend_from_slice(&formatted);
        artifact.extend_from_slice(&shim);

        let artifact_path = abs_build_dir.join(&self.config.artifact);
        write_file(&artifact_path, &artifact)?;
        info!(path = %artifact_path.display(), bytes = artifact.len(), "artifact written");

        if self.config.clipboard {
            match self.clipboard.copy(&artifact) {
                Ok(()) => info!("artifact copied to clipboard"),
                Err(e) => warn!("could not copy artifact to clipboard: {e}"),
            }
        }

        self.progress.finish_and_clear();
        Ok(artifact_path)
    }

    fn step(&mut self, label: &'static str, step: &Step) -> Result<Vec<u8>, BuildError> {
        info!(program = %step.program, args = ?step.args, "{label}");
        self.progress.set_message(format!("{label} ({})", step.program));
        let runner = &mut self.runner;
        let result = if step.capture {
            runner.run(step)
        } else {
            self.progress.suspend(|| runner.run(step))
        };
        if result.is_err() {
            self.progress.abandon();
        }
        result
    }
}

fn arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), BuildError> {
    fs::write(path, bytes).map_err(|source| BuildError::File {
        path: path.to_path_buf(),
        source,
    })
}
