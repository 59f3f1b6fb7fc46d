//! Error types for the navlist library.
//!
//! Two layers of errors exist:
//! - [`LookupError`] covers every condition a parser function reports back into the page. Each
//!   variant maps to one uppercase sentinel string via [`LookupError::sentinel`].
//! - [`NavlistError`] is the library-wide error, wrapping lookup failures together with the I/O
//!   and configuration errors that can occur around them.
//!
//! Conversion to sentinel text only happens at the function boundary in [`crate::host`], so the
//! rest of the crate matches on variants instead of strings.
//!
//! # Examples
//!
//! ```
//! use navlist::errors::LookupError;
//!
//! assert_eq!(LookupError::InvalidLookupValue.sentinel(), "INVALID LOOKUP VALUE");
//! assert_eq!(LookupError::IndexOutOfRange.to_string(), "INDEX OUT OF RANGE");
//! ```

use thiserror::Error;

/// Failures reported in-band by the `navlist` and `urlformat` functions.
///
/// The `Display` output of each variant is its sentinel string.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
  /// The template name is not a valid page title.
  #[error("INVALID TEMPLATE PARAMETER")]
  InvalidTemplateParameter,

  /// The template name is valid but no such page exists.
  #[error("INVALID TEMPLATE NAME")]
  InvalidTemplateName,

  /// The template page contains no list items.
  #[error("INVALID LIST")]
  InvalidList,

  /// A lookup fell back to the current page but the host supplied none.
  #[error("NO TITLE OBJECT")]
  NoTitleObject,

  /// In `#` mode the lookup value is neither numeric nor `first`/`last`.
  #[error("INVALID INDEX")]
  InvalidIndex,

  /// In `#` mode the numeric index exceeds the offset limit.
  #[error("INDEX OUT OF RANGE")]
  IndexOutOfRange,

  /// The lookup value is not a valid title or names no list entry.
  #[error("INVALID LOOKUP VALUE")]
  InvalidLookupValue,

  /// The action is not numeric and not one of the known keywords.
  #[error("INVALID ACTION")]
  InvalidAction,

  /// The numeric action offset exceeds the offset limit.
  #[error("ACTION OFFSET OUT OF RANGE")]
  ActionOffsetOutOfRange,
}

impl LookupError {
  /// Returns the sentinel string substituted into the page for this error.
  pub fn sentinel(self) -> &'static str {
    match self {
      LookupError::InvalidTemplateParameter => "INVALID TEMPLATE PARAMETER",
      LookupError::InvalidTemplateName => "INVALID TEMPLATE NAME",
      LookupError::InvalidList => "INVALID LIST",
      LookupError::NoTitleObject => "NO TITLE OBJECT",
      LookupError::InvalidIndex => "INVALID INDEX",
      LookupError::IndexOutOfRange => "INDEX OUT OF RANGE",
      LookupError::InvalidLookupValue => "INVALID LOOKUP VALUE",
      LookupError::InvalidAction => "INVALID ACTION",
      LookupError::ActionOffsetOutOfRange => "ACTION OFFSET OUT OF RANGE",
    }
  }
}

/// Errors that can occur when working with the navlist library.
///
/// Most variants wrap an underlying error from the standard library or a dependency. Lookup
/// failures are kept as their own variant so callers can still recover the sentinel.
#[derive(Error, Debug)]
pub enum NavlistError {
  /// A lookup failed with an in-band error.
  #[error(transparent)]
  Lookup(#[from] LookupError),

  /// Reading a page or configuration file failed.
  ///
  /// This occurs when:
  /// - A page file exists but cannot be read
  /// - The configuration file cannot be opened
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// The configuration file is not valid JSON for [`crate::config::SiteConfig`].
  #[error(transparent)]
  Config(#[from] serde_json::Error),
}

impl NavlistError {
  /// Returns the lookup error carried by this error, if any.
  pub fn lookup(&self) -> Option<LookupError> {
    match self {
      NavlistError::Lookup(e) => Some(*e),
      _ => None,
    }
  }
}
