//! Command Runner port - synchronous external commands
//!
//! The installer, environment builder, database CLI and script interpreter
//! are all reached through this port. A call blocks until the process exits.

use std::fmt;
use std::io;

use crate::domain::entities::ExecutionResult;
use crate::domain::value_objects::Environment;

/// Program plus arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Build from a configured argv such as `["python3", "-u"]`
    pub fn from_argv(argv: &[String]) -> io::Result<Self> {
        let (program, args) = argv.split_first().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "empty command line")
        })?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Trait for running external commands
///
/// Implementations must run the command with exactly the variables and
/// current directory of `env`. An `Err` means the process could not be run
/// at all; a non-zero exit is reported through `ExecutionResult`.
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &CommandSpec, env: &Environment) -> io::Result<ExecutionResult>;
}
