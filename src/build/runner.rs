//! Running external build programs.

use crate::error::BuildError;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

/// One external program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Program to run.
    pub program: String,
    /// Arguments.
    pub args: Vec<String>,
    /// Bytes fed to stdin, if any.
    pub input: Option<Vec<u8>>,
    /// Capture stdout instead of passing it through.
    pub capture: bool,
}

impl Step {
    /// A step whose stdout is captured.
    #[must_use]
    pub fn captured(program: &str, args: Vec<String>) -> Self {
        Self {
            program: program.to_string(),
            args,
            input: None,
            capture: true,
        }
    }

    /// A step that shares the terminal.
    #[must_use]
    pub fn inherited(program: &str, args: Vec<String>) -> Self {
        Self {
            capture: false,
            ..Self::captured(program, args)
        }
    }

    /// Feed `input` on stdin.
    #[must_use]
    pub fn with_input(mut self, input: Vec<u8>) -> Self {
        self.input = Some(input);
        self
    }
}

/// Executes build steps.
pub trait Runner {
    /// Run `step` to completion and return its captured stdout (empty when
    /// not captured).
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Spawn`] if the program cannot be started and
    /// [`BuildError::Status`] if it exits unsuccessfully.
    fn run(&mut self, step: &Step) -> Result<Vec<u8>, BuildError>;
}

impl<R: Runner + ?Sized> Runner for &mut R {
    fn run(&mut self, step: &Step) -> Result<Vec<u8>, BuildError> {
        (**self).run(step)
    }
}

/// Runs steps as real processes in a working directory.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    root: PathBuf,
}

impl SystemRunner {
    /// Run programs from `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Runner for SystemRunner {
    fn run(&mut self, step: &Step) -> Result<Vec<u8>, BuildError> {
        let spawn_error = |source| BuildError::Spawn {
            program: step.program.clone(),
            source,
        };

        let stdin = match (&step.input, step.capture) {
            (Some(_), _) => Stdio::piped(),
            (None, true) => Stdio::null(),
            (None, false) => Stdio::inherit(),
        };
        let stdout = if step.capture {
            Stdio::piped()
        } else {
            Stdio::inherit()
        };

        let mut child = Command::new(&step.program)
            .args(&step.args)
            .current_dir(&self.root)
            .stdin(stdin)
            .stdout(stdout)
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(spawn_error)?;

        // Stdin is written from a helper thread so a chatty child cannot
        // block on a full stdout pipe while we are still writing.
        let output = thread::scope(|scope| {
            if let (Some(input), Some(mut pipe)) = (&step.input, child.stdin.take()) {
                scope.spawn(move || {
                    // A child that exits early closes the pipe; its status
                    // reports the failure.
                    let _ = pipe.write_all(input);
                });
            }
            child.wait_with_output()
        })
        .map_err(spawn_error)?;

        if !output.status.success() {
            return Err(BuildError::Status {
                program: step.program.clone(),
                code: output.status.code(),
            });
        }
        Ok(output.stdout)
    }
}
