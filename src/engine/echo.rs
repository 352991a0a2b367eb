//! Built-in engine that answers every turn with a fixed action.

use super::{Engine, Ports};
use crate::error::EngineError;
use crate::games::Game;

/// Prints each turn record as JSON on the diagnostic channel and replies
/// with the same action every turn.
#[derive(Debug, Clone)]
pub struct EchoEngine {
    action: String,
}

impl EchoEngine {
    /// Create an engine that always plays `action`.
    #[must_use]
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
        }
    }
}

impl<G: Game> Engine<G> for EchoEngine {
    fn deliver(&mut self, turn: G::Turn, ports: &mut Ports) -> Result<(), EngineError> {
        let json = serde_json::to_string(&turn).map_err(EngineError::Encode)?;
        ports.diagnostic(json);
        ports.action(self.action.clone());
        Ok(())
    }
}
