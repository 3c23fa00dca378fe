//! Scripted channel for workflow tests
//!
//! Matches each executed command against substring rules and replays a
//! canned output, recording every command for sequence assertions.

use std::sync::Mutex;

use async_trait::async_trait;

use fleetops::channel::{CommandOutput, RemoteChannel};
use fleetops::errors::ConsoleError;

enum Rule {
    Output(CommandOutput),
    Transport(String),
}

pub struct ScriptedChannel {
    rules: Vec<(String, Rule)>,
    log: Mutex<Vec<String>>,
}

impl ScriptedChannel {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            log: Mutex::new(Vec::new()),
        }
    }

    /// Commands containing `needle` succeed with `stdout`.
    pub fn on(mut self, needle: &str, stdout: &str) -> Self {
        self.rules.push((
            needle.to_string(),
            Rule::Output(CommandOutput {
                stdout: stdout.to_string(),
                stderr: String::new(),
                exit_code: 0,
            }),
        ));
        self
    }

    /// Commands containing `needle` ran but failed (exit 1).
    pub fn on_fail(mut self, needle: &str, stderr: &str) -> Self {
        self.rules.push((
            needle.to_string(),
            Rule::Output(CommandOutput {
                stdout: String::new(),
                stderr: stderr.to_string(),
                exit_code: 1,
            }),
        ));
        self
    }

    /// Commands containing `needle` hit a transport failure.
    pub fn on_transport_failure(mut self, needle: &str) -> Self {
        self.rules
            .push((needle.to_string(), Rule::Transport("host unreachable".to_string())));
        self
    }

    pub fn executed(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteChannel for ScriptedChannel {
    async fn execute(&self, command: &str) -> Result<CommandOutput, ConsoleError> {
        self.log.lock().unwrap().push(command.to_string());

        for (needle, rule) in &self.rules {
            if command.contains(needle.as_str()) {
                return match rule {
                    Rule::Output(output) => Ok(output.clone()),
                    Rule::Transport(msg) => Err(ConsoleError::Transport(msg.clone())),
                };
            }
        }

        // Unscripted commands ran fine and printed nothing, which reads
        // as "feature absent" downstream.
        Ok(CommandOutput {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: 0,
        })
    }
}

/// `free` output with the given figures, in the kernel's column layout.
pub fn free_output(total_kb: u64, used_kb: u64, available_kb: u64) -> String {
    format!(
        "              total        used        free      shared  buff/cache   available\n\
         Mem:    {:>11} {:>11} {:>11} {:>11} {:>11} {:>11}\n\
         Swap:             0           0           0\n",
        total_kb,
        used_kb,
        total_kb - used_kb,
        0,
        0,
        available_kb
    )
}
