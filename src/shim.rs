//! The turn loop shared by every game.
//!
//! 1. Read the init block and build the engine from it.
//! 2. Read one turn, deliver it, write the emissions it produced.
//! 3. Repeat until the input ends.
//!
//! Action emissions go to `output` and diagnostic emissions to
//! `diagnostics`, one line each, flushed before the next turn is read.

use crate::engine::{Emission, Engine, Ports};
use crate::error::{EngineError, ShimError};
use crate::games::Game;
use crate::input::TokenReader;
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Run a shim until the input is exhausted.
///
/// Returns the number of turns delivered. Input ending cleanly between two
/// turns is the normal way out; ending inside a record is an error.
///
/// # Errors
///
/// Returns an error on malformed input, an engine failure, or a failed write.
pub fn run<G, E, F, R, O, D>(
    game: &G,
    input: R,
    output: &mut O,
    diagnostics: &mut D,
    factory: F,
) -> Result<u64, ShimError>
where
    G: Game,
    E: Engine<G>,
    F: FnOnce(G::Init) -> Result<E, EngineError>,
    R: BufRead,
    O: Write,
    D: Write,
{
    let mut reader = TokenReader::new(input);
    let init = game.read_init(&mut reader)?;
    debug!(game = game.name(), ?init, "init block read");

    let mut engine = factory(init)?;
    let mut ports = Ports::new();
    let mut turns = 0u64;

    loop {
        if reader.at_eof()? {
            info!(game = game.name(), turns, "input closed");
            return Ok(turns);
        }

        let turn = game.read_turn(&mut reader)?;
        debug!(turn = turns, lines = reader.lines_read(), "turn read");

        engine.deliver(turn, &mut ports)?;
        flush_ports(&mut ports, output, diagnostics).map_err(ShimError::Output)?;
        turns += 1;
    }
}

/// Write every queued emission to its stream and flush both.
///
/// # Errors
///
/// Returns the first write error.
pub fn flush_ports<O: Write, D: Write>(
    ports: &mut Ports,
    output: &mut O,
    diagnostics: &mut D,
) -> std::io::Result<()> {
    for emission in ports.drain() {
        match emission {
            Emission::Action(action) => {
                output.write_all(action.as_bytes())?;
                output.write_all(b"\n")?;
            }
            Emission::Diagnostic(msg) => {
                diagnostics.write_all(msg.as_bytes())?;
                diagnostics.write_all(b"\n")?;
            }
        }
    }
    output.flush()?;
    diagnostics.flush()
}
