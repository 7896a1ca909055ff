//! # Command Execution Service
//!
//! Runs submitted commands without blocking the input loop. Each command is
//! spawned on tokio; its outcome comes back over an mpsc channel and is
//! picked up by the controller on a later tick.

use anyhow::Result;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinError;

use crate::repl::models::Vocabulary;

/// Boxed future returned by executors
pub type ExecutionFuture = Pin<Box<dyn Future<Output = Result<String>> + Send + 'static>>;

/// Outbound collaborator that carries out a committed command
pub trait CommandExecutor: Send + Sync {
    fn execute(&self, command: String) -> ExecutionFuture;
}

/// Message type for async execution results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Command succeeded with this output
    Output { command: String, text: String },
    /// Command failed with this message
    Error { command: String, message: String },
}

/// Service for dispatching commands to an executor
pub struct ExecutionService {
    executor: Arc<dyn CommandExecutor>,
    /// Channel for receiving async execution results
    outcome_receiver: mpsc::Receiver<ExecutionOutcome>,
    /// Channel sender for spawned tasks
    outcome_sender: mpsc::Sender<ExecutionOutcome>,
    pending: usize,
}

impl ExecutionService {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        let (outcome_sender, outcome_receiver) = mpsc::channel(32);
        Self {
            executor,
            outcome_receiver,
            outcome_sender,
            pending: 0,
        }
    }

    /// Start executing `command` in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, command: String) {
        let future = self.executor.execute(command.clone());
        let sender = self.outcome_sender.clone();
        self.pending += 1;

        tracing::debug!("Spawning execution for '{}'", command);
        tokio::spawn(async move {
            // Run the executor's future in its own task so a panic surfaces
            // as a JoinError instead of losing the outcome
            let outcome = match tokio::spawn(future).await {
                Ok(Ok(text)) => ExecutionOutcome::Output { command, text },
                Ok(Err(e)) => ExecutionOutcome::Error {
                    command,
                    message: e.to_string(),
                },
                Err(e) => {
                    tracing::error!("Execution of '{}' aborted: {}", command, e);
                    ExecutionOutcome::Error {
                        command,
                        message: aborted_message(e),
                    }
                }
            };

            if sender.send(outcome).await.is_err() {
                tracing::warn!("Execution finished after the console shut down");
            }
        });
    }

    /// Take a finished outcome if one is ready
    pub fn try_next_outcome(&mut self) -> Option<ExecutionOutcome> {
        match self.outcome_receiver.try_recv() {
            Ok(outcome) => {
                self.pending = self.pending.saturating_sub(1);
                Some(outcome)
            }
            Err(_) => None,
        }
    }

    /// Wait for the next outcome; `None` when nothing is in flight
    pub async fn next_outcome(&mut self) -> Option<ExecutionOutcome> {
        if self.pending == 0 {
            return None;
        }

        let outcome = self.outcome_receiver.recv().await;
        if outcome.is_some() {
            self.pending -= 1;
        }
        outcome
    }

    /// Wait for every in-flight execution, returning their outcomes in
    /// completion order
    pub async fn settle(&mut self) -> Vec<ExecutionOutcome> {
        let mut outcomes = Vec::new();
        while let Some(outcome) = self.next_outcome().await {
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Number of executions whose outcome has not been collected yet
    pub fn pending(&self) -> usize {
        self.pending
    }
}

/// Error text for an execution task that panicked or was cancelled
fn aborted_message(error: JoinError) -> String {
    if !error.is_panic() {
        return "Execution aborted".to_string();
    }

    let payload = error.into_panic();
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned());
    match detail {
        Some(detail) => format!("Execution aborted: {detail}"),
        None => "Execution aborted".to_string(),
    }
}

/// Offline executor answering a handful of commands locally.
///
/// Vocabulary commands that need the case-management backend fail with a
/// "no backend" error since no remote is wired in.
pub struct BuiltinExecutor {
    vocabulary: Vocabulary,
    operator: String,
}

impl BuiltinExecutor {
    pub fn new(vocabulary: Vocabulary, operator: impl Into<String>) -> Self {
        Self {
            vocabulary,
            operator: operator.into(),
        }
    }

    fn respond(&self, command: &str) -> Result<String> {
        let command = command.trim();
        let (name, rest) = match command.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (command, ""),
        };

        match name {
            "help" => Ok(format!(
                "Available commands:\n{}",
                self.vocabulary
                    .commands()
                    .iter()
                    .map(|c| format!("  {c}"))
                    .collect::<Vec<_>>()
                    .join("\n")
            )),
            "echo" => Ok(rest.to_string()),
            "whoami" => Ok(self.operator.clone()),
            "version" => Ok(format!("caseline {}", env!("CARGO_PKG_VERSION"))),
            _ if self.is_known(command) => Err(anyhow::anyhow!(
                "No backend connected; cannot run '{}'",
                command
            )),
            _ => Err(anyhow::anyhow!("Unknown command: {}", command)),
        }
    }

    /// Known when the command, or the command minus trailing arguments,
    /// appears in the vocabulary
    fn is_known(&self, command: &str) -> bool {
        let words: Vec<&str> = command.split_whitespace().collect();
        (1..=words.len())
            .rev()
            .any(|n| self.vocabulary.contains(&words[..n].join(" ")))
    }
}

impl CommandExecutor for BuiltinExecutor {
    fn execute(&self, command: String) -> ExecutionFuture {
        let result = self.respond(&command);
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> BuiltinExecutor {
        BuiltinExecutor::new(Vocabulary::default(), "operator")
    }

    /// Executor that fails every command, for checking error routing
    struct FailingExecutor;

    impl CommandExecutor for FailingExecutor {
        fn execute(&self, command: String) -> ExecutionFuture {
            Box::pin(async move { Err(anyhow::anyhow!("rejected: {}", command)) })
        }
    }

    /// Executor whose future panics instead of resolving
    struct PanickingExecutor;

    async fn explode(command: String) -> Result<String> {
        panic!("backend exploded on {command}")
    }

    impl CommandExecutor for PanickingExecutor {
        fn execute(&self, command: String) -> ExecutionFuture {
            Box::pin(explode(command))
        }
    }

    #[tokio::test]
    async fn panicking_executor_should_settle_with_error() {
        let mut service = ExecutionService::new(Arc::new(PanickingExecutor));

        service.submit("cases list".to_string());
        let outcomes = tokio::time::timeout(std::time::Duration::from_secs(5), service.settle())
            .await
            .expect("settle should not hang on a panicking executor");

        assert_eq!(
            outcomes,
            vec![ExecutionOutcome::Error {
                command: "cases list".to_string(),
                message: "Execution aborted: backend exploded on cases list".to_string()
            }]
        );
        assert_eq!(service.pending(), 0);
    }

    #[tokio::test]
    async fn submit_should_deliver_output_asynchronously() {
        let mut service = ExecutionService::new(Arc::new(builtin()));

        service.submit("echo hello".to_string());
        assert_eq!(service.pending(), 1);

        let outcome = service.next_outcome().await;
        assert_eq!(
            outcome,
            Some(ExecutionOutcome::Output {
                command: "echo hello".to_string(),
                text: "hello".to_string()
            })
        );
        assert_eq!(service.pending(), 0);
    }

    #[tokio::test]
    async fn submit_should_deliver_errors_verbatim() {
        let mut service = ExecutionService::new(Arc::new(FailingExecutor));

        service.submit("cases list".to_string());
        let outcomes = service.settle().await;

        assert_eq!(
            outcomes,
            vec![ExecutionOutcome::Error {
                command: "cases list".to_string(),
                message: "rejected: cases list".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn settle_should_collect_every_pending_outcome() {
        let mut service = ExecutionService::new(Arc::new(builtin()));
        service.submit("whoami".to_string());
        service.submit("version".to_string());
        service.submit("bogus".to_string());

        let outcomes = service.settle().await;

        assert_eq!(outcomes.len(), 3);
        assert_eq!(service.pending(), 0);
        assert!(service.next_outcome().await.is_none());
    }

    #[test]
    fn builtin_should_answer_help_with_vocabulary() {
        let text = builtin().respond("help").unwrap();

        assert!(text.starts_with("Available commands:"));
        assert!(text.contains("  cases list"));
    }

    #[test]
    fn builtin_should_echo_arguments() {
        assert_eq!(builtin().respond("echo  a b ").unwrap(), "a b");
    }

    #[test]
    fn builtin_should_reject_backend_commands() {
        let err = builtin().respond("cases show 42").unwrap_err();
        assert_eq!(err.to_string(), "No backend connected; cannot run 'cases show 42'");
    }

    #[test]
    fn builtin_should_reject_unknown_commands() {
        let err = builtin().respond("frobnicate").unwrap_err();
        assert_eq!(err.to_string(), "Unknown command: frobnicate");
    }
}
