//! The decision-engine boundary.
//!
//! An engine is built once from a game's init record, then receives one turn
//! record per turn. It answers through [`Ports`]: the action port carries the
//! move to print on stdout, the diagnostic port carries debug text for
//! stderr. Emissions are queued in order and drained by the shim after each
//! delivery, so everything a turn produced is written before the next turn
//! is read.

mod echo;
mod process;

pub use echo::EchoEngine;
pub use process::{JsonLinesEngine, PortMessage, ProcessEngine};

use crate::error::EngineError;
use crate::games::Game;
use std::collections::VecDeque;

/// One message emitted by an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// A move, printed verbatim on stdout.
    Action(String),
    /// Debug text, printed on stderr.
    Diagnostic(String),
}

/// Outbound channels of an engine.
#[derive(Debug, Default)]
pub struct Ports {
    pending: VecDeque<Emission>,
}

impl Ports {
    /// Create empty ports.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit on the action channel.
    pub fn action(&mut self, message: impl Into<String>) {
        self.pending.push_back(Emission::Action(message.into()));
    }

    /// Emit on the diagnostic channel.
    pub fn diagnostic(&mut self, message: impl Into<String>) {
        self.pending.push_back(Emission::Diagnostic(message.into()));
    }

    /// Number of queued emissions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take queued emissions in the order they were made.
    pub fn drain(&mut self) -> impl Iterator<Item = Emission> + '_ {
        self.pending.drain(..)
    }
}

/// A decision engine for game `G`.
pub trait Engine<G: Game> {
    /// Hand over one turn; emissions go to `ports`.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot process the turn.
    fn deliver(&mut self, turn: G::Turn, ports: &mut Ports) -> Result<(), EngineError>;
}

impl<G: Game, E: Engine<G> + ?Sized> Engine<G> for Box<E> {
    fn deliver(&mut self, turn: G::Turn, ports: &mut Ports) -> Result<(), EngineError> {
        <E as Engine<G>>::deliver(&mut **self, turn, ports)
    }
}
