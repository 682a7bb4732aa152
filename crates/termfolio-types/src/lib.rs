//! Foundation types for termfolio.
//!
//! Shared by every termfolio crate: the error enum, the configuration
//! model loaded at startup, the platform-agnostic input events the
//! presentation layer feeds into the terminal core, and the tracking
//! trait commands use to emit usage events.

pub mod config;
pub mod error;
pub mod input;
pub mod track;
