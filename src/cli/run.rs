//! Run command implementation.

use super::{CliError, GameKind};
use std::io;
use turnpipe::{EchoEngine, Engine, EngineError, Game, Gateway, Mines, Pellets, ProcessEngine};

/// Where the turns go.
enum EngineChoice {
    Echo(String),
    Process { program: String, args: Vec<String> },
}

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if no engine is given, the input is malformed, or the
/// engine fails.
pub(crate) fn execute(
    game: GameKind,
    echo: Option<String>,
    engine: Vec<String>,
) -> Result<(), CliError> {
    let choice = match (echo, engine.split_first()) {
        (Some(action), _) => EngineChoice::Echo(action),
        (None, Some((program, args))) => EngineChoice::Process {
            program: program.clone(),
            args: args.to_vec(),
        },
        (None, None) => {
            return Err(CliError::new(
                "no engine: pass --echo <ACTION> or an engine command after --",
            ));
        }
    };

    match game {
        GameKind::Gateway => relay(&Gateway, choice),
        GameKind::Pellets => relay(&Pellets, choice),
        GameKind::Mines => relay(&Mines, choice),
    }
}

fn relay<G: Game + 'static>(game: &G, choice: EngineChoice) -> Result<(), CliError> {
    let factory = move |init: G::Init| -> Result<Box<dyn Engine<G>>, EngineError> {
        match choice {
            EngineChoice::Echo(action) => Ok(Box::new(EchoEngine::new(action))),
            EngineChoice::Process { program, args } => {
                Ok(Box::new(ProcessEngine::spawn(&program, &args, &init)?))
            }
        }
    };

    let stdin = io::stdin().lock();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    turnpipe::run(game, stdin, &mut stdout, &mut stderr, factory)?;
    Ok(())
}
