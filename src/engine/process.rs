//! Engines that live in another process and speak JSON lines.
//!
//! The shim writes the init record as the first line, then one turn record
//! per line. For each turn the engine replies with any number of port
//! messages and closes the turn with `{"port":"done"}`:
//!
//! ```text
//! -> {"nodeCount":4,"linkCount":4,"exitCount":2,"links":[[0,1]],"exits":[1,3]}
//! -> {"skynetNode":0}
//! <- {"port":"debug","message":"agent at 0"}
//! <- {"port":"action","message":"0 1"}
//! <- {"port":"done"}
//! ```

use super::{Engine, Ports};
use crate::error::EngineError;
use crate::games::Game;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use tracing::{debug, warn};

/// A message sent by an engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "port", content = "message", rename_all = "lowercase")]
pub enum PortMessage {
    /// Move to print on stdout.
    Action(String),
    /// Debug text for stderr.
    Debug(String),
    /// End of the engine's reply to the current turn.
    Done,
}

/// JSON-lines engine over an arbitrary writer/reader pair.
#[derive(Debug)]
pub struct JsonLinesEngine<W, R> {
    writer: W,
    reader: R,
    turn: u64,
    line: String,
}

impl<W: Write, R: BufRead> JsonLinesEngine<W, R> {
    /// Send the init record and return the connected engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be encoded or written.
    pub fn start<T: Serialize>(writer: W, reader: R, init: &T) -> Result<Self, EngineError> {
        let mut engine = Self {
            writer,
            reader,
            turn: 0,
            line: String::new(),
        };
        engine.send(init)?;
        Ok(engine)
    }

    fn send<T: Serialize>(&mut self, record: &T) -> Result<(), EngineError> {
        serde_json::to_writer(&mut self.writer, record).map_err(EngineError::Encode)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    fn collect(&mut self, ports: &mut Ports) -> Result<(), EngineError> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Err(EngineError::Disconnected { turn: self.turn });
            }
            let text = self.line.trim();
            if text.is_empty() {
                continue;
            }
            let message: PortMessage =
                serde_json::from_str(text).map_err(|source| EngineError::Protocol {
                    line: text.to_string(),
                    source,
                })?;
            match message {
                PortMessage::Action(action) => ports.action(action),
                PortMessage::Debug(msg) => ports.diagnostic(msg),
                PortMessage::Done => return Ok(()),
            }
        }
    }
}

impl<G: Game, W: Write, R: BufRead> Engine<G> for JsonLinesEngine<W, R> {
    fn deliver(&mut self, turn: G::Turn, ports: &mut Ports) -> Result<(), EngineError> {
        self.send(&turn)?;
        self.collect(ports)?;
        self.turn += 1;
        Ok(())
    }
}

/// An engine run as a child process, talking over its stdin and stdout.
///
/// The child's stderr is inherited. The child is killed when the engine is
/// dropped.
#[derive(Debug)]
pub struct ProcessEngine {
    child: Child,
    link: JsonLinesEngine<ChildStdin, BufReader<ChildStdout>>,
}

impl ProcessEngine {
    /// Spawn `program` and send it the init record.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be started or the init record
    /// cannot be sent.
    pub fn spawn<T: Serialize>(
        program: &str,
        args: &[String],
        init: &T,
    ) -> Result<Self, EngineError> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| EngineError::Spawn {
                program: program.to_string(),
                source,
            })?;
        debug!(program, pid = child.id(), "engine process started");

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            return Err(EngineError::Io(std::io::Error::other(
                "engine pipes unavailable",
            )));
        };
        let link = JsonLinesEngine::start(stdin, BufReader::new(stdout), init)?;
        Ok(Self { child, link })
    }
}

impl<G: Game> Engine<G> for ProcessEngine {
    fn deliver(&mut self, turn: G::Turn, ports: &mut Ports) -> Result<(), EngineError> {
        Engine::<G>::deliver(&mut self.link, turn, ports)
    }
}

impl Drop for ProcessEngine {
    fn drop(&mut self) {
        if let Err(e) = self.child.kill() {
            warn!("failed to stop engine process: {e}");
        }
        let _ = self.child.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Emission;
    use crate::games::{Gateway, GatewayTurn, Mines, MinesTurn};
    use std::io::Cursor;

    fn replies(lines: &[&str]) -> Cursor<Vec<u8>> {
        let mut text = lines.join("\n");
        text.push('\n');
        Cursor::new(text.into_bytes())
    }

    #[test]
    fn test_init_written_first() {
        let engine = JsonLinesEngine::start(Vec::new(), replies(&[]), &[1, 2]).unwrap();
        assert_eq!(engine.writer, b"[1,2]\n");
    }

    #[test]
    fn test_turn_round_trip() {
        let reader = replies(&[
            r#"{"port":"debug","message":"agent at 0"}"#,
            "",
            r#"{"port":"action","message":"0 1"}"#,
            r#"{"port":"done"}"#,
        ]);
        let mut engine = JsonLinesEngine::start(Vec::new(), reader, &"init").unwrap();
        let mut ports = Ports::new();
        Engine::<Gateway>::deliver(&mut engine, GatewayTurn { skynet_node: 0 }, &mut ports)
            .unwrap();

        assert_eq!(
            String::from_utf8(engine.writer.clone()).unwrap(),
            "\"init\"\n{\"skynetNode\":0}\n"
        );
        let drained: Vec<_> = ports.drain().collect();
        assert_eq!(
            drained,
            vec![
                Emission::Diagnostic("agent at 0".to_string()),
                Emission::Action("0 1".to_string()),
            ]
        );
    }

    #[test]
    fn test_disconnect_mid_turn() {
        let reader = replies(&[r#"{"port":"action","message":"WAIT"}"#]);
        let mut engine = JsonLinesEngine::start(Vec::new(), reader, &0).unwrap();
        let mut ports = Ports::new();
        let err = Engine::<Gateway>::deliver(&mut engine, GatewayTurn { skynet_node: 1 }, &mut ports)
            .unwrap_err();
        assert!(matches!(err, EngineError::Disconnected { turn: 0 }));
    }

    #[test]
    fn test_garbage_reply() {
        let reader = replies(&["MOVE 1 2"]);
        let mut engine = JsonLinesEngine::start(Vec::new(), reader, &0).unwrap();
        let turn = MinesTurn {
            gold: 0,
            income: 0,
            opponent_gold: 0,
            opponent_income: 0,
            terrain: Vec::new(),
            building_count: 0,
            buildings: Vec::new(),
            unit_count: 0,
            units: Vec::new(),
        };
        let err = Engine::<Mines>::deliver(&mut engine, turn, &mut Ports::new()).unwrap_err();
        assert!(matches!(err, EngineError::Protocol { ref line, .. } if line == "MOVE 1 2"));
    }

    #[test]
    fn test_port_message_wire_format() {
        let done = serde_json::to_string(&PortMessage::Done).unwrap();
        assert_eq!(done, r#"{"port":"done"}"#);
        let action = serde_json::to_string(&PortMessage::Action("WAIT".to_string())).unwrap();
        assert_eq!(action, r#"{"port":"action","message":"WAIT"}"#);
    }

    #[cfg(unix)]
    #[test]
    fn test_spawned_engine() {
        let script = r#"read init
while read turn; do
  echo '{"port":"action","message":"WAIT"}'
  echo '{"port":"done"}'
done"#;
        let mut engine =
            ProcessEngine::spawn("sh", &["-c".to_string(), script.to_string()], &1).unwrap();
        let mut ports = Ports::new();
        for node in 0..3 {
            Engine::<Gateway>::deliver(&mut engine, GatewayTurn { skynet_node: node }, &mut ports)
                .unwrap();
        }
        let actions: Vec<_> = ports.drain().collect();
        assert_eq!(actions, vec![Emission::Action("WAIT".to_string()); 3]);
    }
}
