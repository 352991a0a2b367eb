//! Copying the artifact to the system clipboard.

use std::io::{self, Write};
use std::process::{Command, Stdio};

/// Clipboard helpers tried in order.
const TOOLS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("clip", &[]),
];

/// Destination for the finished artifact.
pub trait Clipboard {
    /// Replace the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if no clipboard is reachable.
    fn copy(&mut self, text: &[u8]) -> io::Result<()>;
}

/// The desktop clipboard, reached through the platform's copy tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &[u8]) -> io::Result<()> {
        let mut last_error = io::Error::new(io::ErrorKind::NotFound, "no clipboard tool found");
        for (program, args) in TOOLS {
            match pipe_to(program, args, text) {
                Ok(()) => return Ok(()),
                Err(e) => last_error = e,
            }
        }
        Err(last_error)
    }
}

fn pipe_to(program: &str, args: &[&str], text: &[u8]) -> io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    let written = child
        .stdin
        .take()
        .map_or(Ok(()), |mut stdin| stdin.write_all(text));
    let status = child.wait()?;
    if !status.success() {
        return Err(io::Error::other(format!("{program} exited with {status}")));
    }
    written
}

/// Clipboard that keeps the last copied text in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    /// Last copied bytes.
    pub contents: Option<Vec<u8>>,
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &[u8]) -> io::Result<()> {
        self.contents = Some(text.to_vec());
        Ok(())
    }
}
