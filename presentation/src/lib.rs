//! Presentation layer for support-triage
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the HTTP adapter.

pub mod cli;
pub mod output;
pub mod progress;
pub mod server;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::ProgressReporter;
pub use server::{ApiError, AppState, ServeError, create_router, serve};
