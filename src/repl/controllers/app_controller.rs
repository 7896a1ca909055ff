//! # Console Application Controller
//!
//! The controller owns the event loop. Key events go through the command
//! registry, the resulting [`CommandEvent`]s are applied to the
//! [`LineEditor`], submitted commands are handed to the execution service,
//! and finished executions are drained into the transcript on later ticks.

use crate::repl::{
    commands::{CommandContext, CommandEvent, CommandRegistry},
    io::{EventStream, RenderStream},
    models::{LineEditor, NavDirection, Transcript, TranscriptRecord, Vocabulary},
    services::{
        CommandExecutor, ExecutionOutcome, ExecutionService, HistorySource, StaticHistorySource,
        TranscriptLog,
    },
    views::{ConsoleRenderer, ViewRenderer},
};
use anyhow::Result;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use std::sync::Arc;
use std::time::Duration;

/// Key poll timeout of the event loop
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Collaborators injected into the controller
pub struct ConsoleServices {
    pub executor: Arc<dyn CommandExecutor>,
    pub history_source: Box<dyn HistorySource>,
    pub transcript_log: Option<TranscriptLog>,
    pub vocabulary: Vocabulary,
}

impl ConsoleServices {
    /// Services with no history, no transcript log and the default vocabulary
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self {
            executor,
            history_source: Box::new(StaticHistorySource::empty()),
            transcript_log: None,
            vocabulary: Vocabulary::default(),
        }
    }

    pub fn with_history_source(mut self, source: impl HistorySource + 'static) -> Self {
        self.history_source = Box::new(source);
        self
    }

    pub fn with_transcript_log(mut self, log: TranscriptLog) -> Self {
        self.transcript_log = Some(log);
        self
    }

    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }
}

/// The main application controller
pub struct AppController<ES: EventStream, RS: RenderStream> {
    editor: LineEditor,
    transcript: Transcript,
    view_renderer: ConsoleRenderer<RS>,
    command_registry: CommandRegistry,
    execution: ExecutionService,
    transcript_log: Option<TranscriptLog>,
    event_stream: ES,
    should_quit: bool,
}

impl<ES: EventStream, RS: RenderStream> AppController<ES, RS> {
    /// Create new application controller with injected services and I/O streams
    pub fn with_io_streams(
        services: ConsoleServices,
        event_stream: ES,
        render_stream: RS,
    ) -> Result<Self> {
        let ConsoleServices {
            executor,
            history_source,
            transcript_log,
            vocabulary,
        } = services;

        // Pass RenderStream ownership to the View layer
        let view_renderer = ConsoleRenderer::with_render_stream(render_stream)?;

        let mut editor = LineEditor::new(vocabulary);
        Self::hydrate_history(&mut editor, history_source.as_ref());

        Ok(Self {
            editor,
            transcript: Transcript::new(),
            view_renderer,
            command_registry: CommandRegistry::new(),
            execution: ExecutionService::new(executor),
            transcript_log,
            event_stream,
            should_quit: false,
        })
    }

    /// Seed history from the source; a failing source leaves history empty
    fn hydrate_history(editor: &mut LineEditor, source: &dyn HistorySource) {
        match source.load() {
            Ok(entries) => {
                let count = entries.len();
                if editor.hydrate_history(entries) {
                    tracing::info!("Restored {} history entries", count);
                }
            }
            Err(e) => {
                tracing::warn!("Failed to load command history: {}", e);
            }
        }
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        // Initialize view renderer (handles all terminal setup)
        self.view_renderer.initialize()?;

        // Initial render
        self.render()?;

        while !self.should_quit {
            let mut needs_render = false;

            if self.event_stream.poll(POLL_INTERVAL)? {
                match self.event_stream.read()? {
                    Event::Key(key_event) => {
                        tracing::debug!("Received key event: {:?}", key_event);
                        self.handle_key(key_event)?;
                        needs_render = true;
                    }
                    Event::Resize(width, height) => {
                        self.view_renderer.update_size(width, height);
                        needs_render = true;
                    }
                    _ => {
                        // Ignore other events for now
                    }
                }
            }

            if self.drain_outcomes() > 0 {
                needs_render = true;
            }

            if needs_render && !self.should_quit {
                self.render()?;
            }

            // Let spawned executions make progress between ticks
            tokio::task::yield_now().await;
        }

        // Cleanup (all handled by view renderer)
        self.view_renderer.cleanup()?;

        Ok(())
    }

    /// Dispatch one key press through the command registry
    pub fn handle_key(&mut self, key_event: KeyEvent) -> Result<()> {
        if key_event.kind == KeyEventKind::Release {
            return Ok(());
        }

        let context = CommandContext::from_editor(&self.editor);
        let events = self.command_registry.process_event(key_event, &context)?;
        if !events.is_empty() {
            tracing::debug!("Command events generated: {:?}", events);
        }

        for event in events {
            self.apply_command_event(event);
        }
        Ok(())
    }

    /// Apply a command event to the line editor or the console
    pub fn apply_command_event(&mut self, event: CommandEvent) {
        let applied = match &event {
            CommandEvent::TextChangeRequested { text } => {
                self.editor.on_text_change(text.as_str())
            }
            CommandEvent::SubmitRequested => match self.editor.on_submit() {
                Some(command) => {
                    self.dispatch_command(command);
                    true
                }
                None => false,
            },
            CommandEvent::HistoryNavigationRequested { direction } => match direction {
                NavDirection::Up => self.editor.on_history_up(),
                NavDirection::Down => self.editor.on_history_down(),
            },
            CommandEvent::SuggestionNavigationRequested { direction } => {
                self.editor.on_suggestion_nav(*direction)
            }
            CommandEvent::TabCompleteRequested => self.editor.on_tab_complete(),
            CommandEvent::DismissSuggestionsRequested => self.editor.dismiss_suggestions(),
            CommandEvent::ReverseSearchToggleRequested => self.editor.toggle_reverse_search(),
            CommandEvent::SearchNavigationRequested { direction } => {
                self.editor.on_search_nav(*direction)
            }
            CommandEvent::SearchAcceptRequested => self.editor.on_search_accept(),
            CommandEvent::SearchCancelRequested => self.editor.on_search_cancel(),
            CommandEvent::ClearTranscriptRequested => {
                self.transcript.clear();
                true
            }
            CommandEvent::QuitRequested => {
                self.should_quit = true;
                true
            }
        };

        if !applied {
            tracing::debug!(
                "Ignored {:?} in mode {:?}",
                event,
                self.editor.mode_kind()
            );
        }
    }

    /// Record a committed command and run it, locally or through the executor
    fn dispatch_command(&mut self, command: String) {
        self.record(TranscriptRecord::command(command.as_str()));

        match command.trim() {
            "clear" => self.transcript.clear(),
            "exit" | "quit" => self.should_quit = true,
            "history" => {
                let listing = self
                    .editor
                    .history()
                    .entries()
                    .iter()
                    .enumerate()
                    .map(|(i, entry)| format!("{:>4}  {}", i + 1, entry))
                    .collect::<Vec<_>>()
                    .join("\n");
                self.record(TranscriptRecord::output(listing));
            }
            _ => self.execution.submit(command),
        }
    }

    fn apply_outcome(&mut self, outcome: ExecutionOutcome) {
        match outcome {
            ExecutionOutcome::Output { command, text } => {
                tracing::debug!("'{}' completed", command);
                self.record(TranscriptRecord::output(text));
            }
            ExecutionOutcome::Error { command, message } => {
                tracing::debug!("'{}' failed: {}", command, message);
                self.record(TranscriptRecord::error(message));
            }
        }
    }

    /// Append to the transcript and the transcript log
    fn record(&mut self, record: TranscriptRecord) {
        if let Some(log) = &self.transcript_log {
            log.record(&record);
        }
        self.transcript.append(record);
    }

    /// Move every finished execution into the transcript without waiting.
    /// Returns how many outcomes were applied.
    pub fn drain_outcomes(&mut self) -> usize {
        let mut applied = 0;
        while let Some(outcome) = self.execution.try_next_outcome() {
            self.apply_outcome(outcome);
            applied += 1;
        }
        applied
    }

    /// Wait for every in-flight execution and record its outcome
    pub async fn settle(&mut self) -> Result<()> {
        for outcome in self.execution.settle().await {
            self.apply_outcome(outcome);
        }
        self.render()
    }

    /// Redraw the whole console
    pub fn render(&mut self) -> Result<()> {
        self.view_renderer
            .render_full(&self.editor, &self.transcript)
    }

    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Number of submitted commands still executing
    pub fn pending_executions(&self) -> usize {
        self.execution.pending()
    }
}
