//! System command runner

use std::io;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::domain::entities::ExecutionResult;
use crate::domain::ports::{CommandRunner, CommandSpec};
use crate::domain::value_objects::Environment;

/// Production runner backed by `std::process::Command`
///
/// The child sees only the variables of the run environment, and the program
/// is looked up on that environment's `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &CommandSpec, env: &Environment) -> io::Result<ExecutionResult> {
        debug!(command = %command, cwd = %env.current_dir().display(), "spawning");
        let output = Command::new(command.program())
            .args(command.args())
            .env_clear()
            .envs(env.vars())
            .current_dir(env.current_dir())
            .stdin(Stdio::null())
            .output()?;

        Ok(ExecutionResult {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
