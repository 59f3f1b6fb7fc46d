//! Error types for the navlist CLI application.
//!
//! Lookup failures of the `lookup`, `urlformat` and `call` commands are not errors here: they are
//! printed as sentinel strings, the same text a wiki page would show. The errors below cover
//! everything else:
//! - Reading the configuration file
//! - Reading or extracting a template for the `list` command
//! - Calling a function that is not registered

use thiserror::Error;

/// Errors that can occur during CLI operations.
///
/// Library and dependency errors are wrapped transparently so their messages reach the user
/// unchanged.
#[derive(Error, Debug)]
pub enum NavlistCliError {
  /// Errors from the underlying navlist library
  #[error(transparent)]
  Navlist(#[from] navlist::errors::NavlistError),

  /// JSON output errors
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// File system and IO operation errors
  #[error(transparent)]
  IO(#[from] std::io::Error),

  /// `call` named a magic word with no registered function
  #[error("Unknown parser function: {0}")]
  UnknownFunction(String),
}
