//! Input buffer state machine.
//!
//! The presentation layer reads [`InputState`] and the [`Transcript`] and
//! mutates them only through the four entry points here: `on_input`,
//! `on_tab`, `on_submit`, `on_suggestion_click`. Each call runs to
//! completion before the next event is processed.

use std::sync::Arc;

use termfolio_types::input::InputEvent;

use crate::interpreter::CommandInterpreter;
use crate::output::{OutputRecord, Transcript};
use crate::registry::CommandRegistry;
use crate::suggest::SuggestionEngine;

/// What the presentation layer renders under the prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pub buffer: String,
    /// Canonical names, registration order.
    pub suggestions: Vec<String>,
    /// Whether the suggestion list is visible.
    pub is_open: bool,
}

/// Steady states of the controller. Submission is transient and always
/// lands back in `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPhase {
    /// Buffer empty, nothing suggested.
    Idle,
    /// Buffer non-empty.
    Typing,
}

/// Result of handling a single input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
}

/// Owns the input buffer, its suggestions, and the session transcript.
pub struct InputController {
    state: InputState,
    engine: SuggestionEngine,
    interpreter: CommandInterpreter,
    transcript: Transcript,
}

impl InputController {
    pub fn new(interpreter: CommandInterpreter) -> Self {
        let engine = SuggestionEngine::new(Arc::clone(interpreter.registry()));
        Self {
            state: InputState::default(),
            engine,
            interpreter,
            transcript: Transcript::new(),
        }
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn registry(&self) -> &CommandRegistry {
        self.engine.registry()
    }

    pub fn phase(&self) -> InputPhase {
        if self.state.buffer.is_empty() {
            InputPhase::Idle
        } else {
            InputPhase::Typing
        }
    }

    /// Replace the buffer and recompute suggestions.
    pub fn on_input(&mut self, new_buffer: impl Into<String>) {
        self.state.buffer = new_buffer.into();
        self.refresh_suggestions();
    }

    /// Complete the buffer to a canonical command name.
    ///
    /// No-op when the buffer is blank or nothing matches. With several
    /// matches the first-registered command wins, so repeated Tab presses
    /// are stable.
    pub fn on_tab(&mut self) {
        if self.state.buffer.trim().is_empty() {
            return;
        }
        let completion = self
            .engine
            .registry()
            .prefix_matches(&self.state.buffer)
            .first()
            .map(|cmd| cmd.name().to_string());
        match completion {
            Some(name) => {
                log::debug!("tab: '{}' -> '{name}'", self.state.buffer);
                self.on_input(name);
            },
            None => log::debug!("tab: no completion for '{}'", self.state.buffer),
        }
    }

    /// Execute the buffer and append its output to the transcript.
    ///
    /// A blank buffer is a no-op and returns `None`. Otherwise the buffer
    /// and suggestions are cleared and the appended record is returned.
    pub fn on_submit(&mut self) -> Option<&OutputRecord> {
        if self.state.buffer.trim().is_empty() {
            return None;
        }
        let line = std::mem::take(&mut self.state.buffer);
        let record = self.interpreter.execute(&line);
        self.transcript.push(record);
        self.refresh_suggestions();
        self.transcript.last()
    }

    /// Fill the buffer with a clicked suggestion. Does not submit.
    pub fn on_suggestion_click(&mut self, name: &str) {
        self.on_input(name);
    }

    /// Map a raw UI event onto the entry points above.
    pub fn handle_event(&mut self, event: &InputEvent) -> EventResult {
        match event {
            InputEvent::TextInput(ch) => {
                let mut buffer = self.state.buffer.clone();
                buffer.push(*ch);
                self.on_input(buffer);
            },
            InputEvent::Backspace => {
                let mut buffer = self.state.buffer.clone();
                buffer.pop();
                self.on_input(buffer);
            },
            InputEvent::Replace(text) => self.on_input(text.as_str()),
            InputEvent::Tab => self.on_tab(),
            InputEvent::Enter => {
                self.on_submit();
            },
            InputEvent::SuggestionClick(name) => self.on_suggestion_click(name),
            InputEvent::Quit => return EventResult::Quit,
        }
        EventResult::Continue
    }

    /// Full reset: empty buffer, no suggestions, empty transcript.
    pub fn reset(&mut self) {
        self.state = InputState::default();
        self.transcript.clear();
        log::info!("terminal session reset");
    }

    fn refresh_suggestions(&mut self) {
        self.state.suggestions = self.engine.suggest(&self.state.buffer);
        self.state.is_open = !self.state.suggestions.is_empty();
    }
}
