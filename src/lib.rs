// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Turnpipe: stdin/stdout shims and a submission builder for programming-game bots.
//!
//! A shim reads the referee's fixed-format text from stdin, turns it into
//! typed records, hands them to a decision engine, and prints the engine's
//! answers:
//!
//! ```text
//! ┌─────────────┐  init + turns   ┌──────────────┐  action / debug   ┌────────────────┐
//! │   stdin     │ ──────────────> │    shim      │ ────────────────> │ stdout / stderr│
//! │ (referee)   │                 │ (games, run) │ <──── engine ───> │                │
//! └─────────────┘                 └──────────────┘                   └────────────────┘
//! ```
//!
//! The [`build`] module assembles the single-file submission from a compiled
//! logic module and a shim source.

pub mod build;
pub mod config;
pub mod engine;
pub mod error;
pub mod games;
pub mod input;
pub mod shim;

pub use engine::{EchoEngine, Emission, Engine, Ports, ProcessEngine};
pub use error::{BuildError, ConfigError, EngineError, ParseError, ShimError};
pub use games::{Game, Gateway, Mines, Pellets};
pub use shim::run;
