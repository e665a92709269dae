//! Scripted command runner - test double for the CommandRunner port
//!
//! Records every invocation with the environment it ran in, and answers with
//! results configured per program. Unconfigured programs succeed silently.
//! Clones share invocations and handlers.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::entities::ExecutionResult;
use crate::domain::ports::{CommandRunner, CommandSpec};
use crate::domain::value_objects::Environment;

type Handler = dyn Fn(&CommandSpec, &Environment) -> io::Result<ExecutionResult> + Send + Sync;

/// One recorded command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: CommandSpec,
    pub env: Environment,
}

impl Invocation {
    pub fn current_dir(&self) -> PathBuf {
        self.env.current_dir().to_path_buf()
    }
}

#[derive(Clone, Default)]
pub struct ScriptedRunner {
    invocations: Arc<Mutex<Vec<Invocation>>>,
    handlers: Arc<Mutex<HashMap<String, Arc<Handler>>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every call of `program` with `result`
    pub fn respond(&self, program: &str, result: ExecutionResult) -> &Self {
        self.on(program, move |_, _| Ok(result.clone()))
    }

    /// Answer every call of `program` by running `handler`
    pub fn on<F>(&self, program: &str, handler: F) -> &Self
    where
        F: Fn(&CommandSpec, &Environment) -> io::Result<ExecutionResult> + Send + Sync + 'static,
    {
        lock(&self.handlers).insert(program.to_string(), Arc::new(handler));
        self
    }

    /// All invocations, in order
    pub fn invocations(&self) -> Vec<Invocation> {
        lock(&self.invocations).clone()
    }

    /// Rendered command lines, in order
    pub fn commands(&self) -> Vec<String> {
        lock(&self.invocations)
            .iter()
            .map(|i| i.command.to_string())
            .collect()
    }

    /// Number of calls to `program`
    pub fn count(&self, program: &str) -> usize {
        lock(&self.invocations)
            .iter()
            .filter(|i| i.command.program() == program)
            .count()
    }
}

impl std::fmt::Debug for ScriptedRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedRunner")
            .field("invocations", &lock(&self.invocations).len())
            .finish_non_exhaustive()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &CommandSpec, env: &Environment) -> io::Result<ExecutionResult> {
        lock(&self.invocations).push(Invocation {
            command: command.clone(),
            env: env.clone(),
        });
        let handler = lock(&self.handlers).get(command.program()).cloned();
        match handler {
            Some(handler) => handler(command, env),
            None => Ok(ExecutionResult::ok()),
        }
    }
}
