//! Command interpreter and autocomplete engine.
//!
//! The terminal is a registry-based dispatch system. Commands implement the
//! `Command` trait and are registered once at startup. The input controller
//! owns the prompt buffer, asks the suggestion engine for live completions,
//! and hands submitted lines to the interpreter, which appends an
//! `OutputRecord` to the session transcript.

mod commands;
mod controller;
mod interpreter;
mod output;
mod registry;
mod suggest;


/// Register the built-in command table (help, more, start-time, ...).
pub use commands::register_builtins;
/// Input buffer state machine and the state it exposes to the UI.
pub use controller::{EventResult, InputController, InputPhase, InputState};
/// A single executable command and what it can touch while running.
pub use interpreter::{Command, CommandContext, CommandInterpreter, NullOpener, ResourceOpener};
/// Output shapes and the append-only transcript.
pub use output::{ContactLink, OutputRecord, Transcript, UNKNOWN_COMMAND_MESSAGE};
/// Ordered command table with exact and prefix lookup.
pub use registry::{CommandRegistry, normalize};
/// Live suggestion computation.
pub use suggest::SuggestionEngine;
