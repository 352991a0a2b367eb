//! Optional `turnpipe.toml` settings.
//!
//! Every field has a default, so a missing file or a partial `[build]`
//! table is fine:
//!
//! ```toml
//! [build]
//! shim = "shims/mines.js"
//! clipboard = false
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "turnpipe.toml";

/// Comment placed at the top of the submission file.
pub const DEFAULT_HEADER: &str = "
// Original code in Elm, available at:
// https://github.com/mpizenberg/elm-codingame
// The following contains the JavaScript code
// result of the compilation of the Elm code.
";

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build pipeline settings.
    pub build: BuildConfig,
}

/// Settings for the `build` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Directory for intermediate files and the artifact.
    pub build_dir: PathBuf,
    /// Entry module handed to the compiler.
    pub main: PathBuf,
    /// Compiler program (`<compiler> make <main> --optimize --output ...`).
    pub compiler: String,
    /// Minifier program, run twice (compress, then mangle).
    pub minifier: String,
    /// Formatter program that re-splits the minified code into lines.
    pub formatter: String,
    /// Functions the minifier may drop when their result is unused.
    pub pure_funcs: Vec<String>,
    /// Shim source appended after the compiled module.
    pub shim: PathBuf,
    /// Artifact file name inside `build_dir`.
    pub artifact: String,
    /// Comment placed before the compiled module.
    pub header: String,
    /// Copy the artifact to the clipboard.
    pub clipboard: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        let pure_funcs = (2..=9)
            .map(|n| format!("F{n}"))
            .chain((2..=9).map(|n| format!("A{n}")))
            .collect();
        Self {
            build_dir: PathBuf::from("build"),
            main: PathBuf::from("Main.elm"),
            compiler: "elm".to_string(),
            minifier: "terser".to_string(),
            formatter: "prettier".to_string(),
            pure_funcs,
            shim: PathBuf::from("CodinGame.js"),
            artifact: "code.js".to_string(),
            header: DEFAULT_HEADER.to_string(),
            clipboard: true,
        }
    }
}

impl Config {
    /// Load settings from `path`, falling back to defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&text).map_err(|source| ConfigError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }
}
