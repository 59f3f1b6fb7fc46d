//! Text formatting utilities for turning page titles into URL slugs.
//!
//! This module provides the string pipeline behind the `urlformat` function. It converts a page
//! title into the path segment used by the official site: whitespace collapsed, a trailing
//! ` (toon)` qualifier dropped, lowercased, punctuation removed, and words joined by hyphens.
//!
//! # Examples
//!
//! ```
//! use navlist::format;
//!
//! assert_eq!(format::format_slug("some kinda robot"), "some-kinda-robot");
//! assert_eq!(format::format_slug("myths & legends"), "myths-legends");
//! assert_eq!(format::format_slug("Cheat Commandos (toon)"), "cheat-commandos");
//! ```

use super::*;

/// Qualifier that disambiguates toon pages on the wiki but is not part of the site's URL.
const TOON_SUFFIX: &str = " (toon)";

lazy_static! {
  static ref WHITESPACE: Regex = Regex::new(r"[ \t\n\r\x0B\x0C]+").unwrap();
  static ref SEPARATORS: Regex = Regex::new(r"[ _]+").unwrap();
}

/// Formats a title string for use in a URL.
///
/// This function performs several transformations, in order:
/// - Collapses runs of whitespace into single spaces and trims the ends
/// - Removes a trailing ` (toon)`
/// - Converts the text to lowercase
/// - Removes everything except ASCII letters, digits, underscores and spaces
/// - Replaces each run of spaces and underscores with one hyphen
///
/// The site's URL for "Bottom 10" carries a stray trailing hyphen, so the exact result
/// `bottom-10` gets one appended.
///
/// # Arguments
///
/// * `text` - The title to format. Empty input gives an empty slug.
///
/// # Examples
///
/// ```
/// use navlist::format;
///
/// assert_eq!(format::format_slug("  Strong   Bad_Email "), "strong-bad-email");
/// assert_eq!(format::format_slug("bottom 10"), "bottom-10-");
/// ```
pub fn format_slug(text: &str) -> String {
  let collapsed = WHITESPACE.replace_all(text.trim_matches(is_slug_whitespace), " ");
  let untagged = collapsed.strip_suffix(TOON_SUFFIX).unwrap_or(&collapsed[..]);

  let cleaned: String = untagged
    .to_ascii_lowercase()
    .chars()
    .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == ' ')
    .collect();

  let mut slug = SEPARATORS.replace_all(&cleaned, "-").into_owned();

  // the official site links this one with a trailing hyphen
  if slug == "bottom-10" {
    slug.push('-');
  }
  slug
}

/// Whitespace as far as slug formatting is concerned: ASCII spaces, tabs, line breaks, vertical
/// tabs and form feeds.
fn is_slug_whitespace(c: char) -> bool { matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C') }

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_format_slug() {
    assert_eq!(format_slug("some kinda robot"), "some-kinda-robot");
    assert_eq!(format_slug("myths & legends"), "myths-legends");
    assert_eq!(format_slug("Cheat Commandos (toon)"), "cheat-commandos");
    assert_eq!(format_slug(" Cheat Commandos (toon) "), "cheat-commandos");
    assert_eq!(format_slug("bottom 10"), "bottom-10-");
    assert_eq!(format_slug("Bottom\t10"), "bottom-10-");
    assert_eq!(format_slug("50 emails"), "50-emails");
  }

  #[test]
  fn test_toon_suffix_only_at_end() {
    assert_eq!(format_slug("(toon) Intro"), "toon-intro");
    assert_eq!(format_slug("Cheat Commandos (Toon)"), "cheat-commandos-toon");
  }

  #[test]
  fn test_separators_and_punctuation() {
    assert_eq!(format_slug("a_b  __ c"), "a-b-c");
    assert_eq!(format_slug("Don't Cry!"), "dont-cry");
    assert_eq!(format_slug("café"), "caf");
    assert_eq!(format_slug("a - b"), "a-b");
    assert_eq!(format_slug("trailing !"), "trailing-");
  }

  #[test]
  fn test_special_case_is_exact() {
    assert_eq!(format_slug("bottom 100"), "bottom-100");
    assert_eq!(format_slug("the bottom 10"), "the-bottom-10");
  }

  #[test]
  fn test_empty() {
    assert_eq!(format_slug(""), "");
    assert_eq!(format_slug("   "), "");
    assert_eq!(format_slug("!!!"), "");
  }

  #[test]
  fn test_idempotent_on_single_word_slugs() {
    for input in ["Homestar", "sbemail152", "Marzipan's", "Trogdor!"] {
      let once = format_slug(input);
      assert_eq!(format_slug(&once), once);
    }
  }
}
