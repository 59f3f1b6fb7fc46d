//! The circular list extracted from a template page.
//!
//! A [`NavList`] is an ordered, non-empty sequence of [`ListEntry`] values in document order.
//! Entries are never removed or reordered once extracted. An entry whose name failed title
//! validation keeps its slot but can never be found by name.

use super::*;

/// Text shown in place of an entry name that failed title validation.
pub const INVALID_LIST_ITEM: &str = "INVALID LIST ITEM";

/// The name of a list entry. Serializes as the name string, or `null` when invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryName {
  /// A normalized page title (without namespace)
  Valid(String),
  /// The bullet text was not a valid title
  Invalid,
}

impl EntryName {
  /// The name as it is written into output.
  pub fn as_str(&self) -> &str {
    match self {
      EntryName::Valid(name) => name,
      EntryName::Invalid => INVALID_LIST_ITEM,
    }
  }

  /// Compares this name with an already lowercased lookup key. Invalid names never match.
  pub fn matches(&self, lowercase_key: &str) -> bool {
    match self {
      EntryName::Valid(name) => name.to_lowercase() == lowercase_key,
      EntryName::Invalid => false,
    }
  }
}

impl fmt::Display for EntryName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// One bullet of a navigation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
  /// Page name the bullet points at
  pub name:    EntryName,
  /// Text after the pipe, trimmed; empty when there was no pipe
  pub display: String,
}

impl ListEntry {
  /// Creates an entry with a valid name.
  pub fn new(name: impl Into<String>, display: impl Into<String>) -> Self {
    Self { name: EntryName::Valid(name.into()), display: display.into() }
  }

  /// Creates an entry for a bullet whose name failed validation. Its display text is discarded.
  pub fn invalid() -> Self { Self { name: EntryName::Invalid, display: String::new() } }

  /// Renders this entry according to `flag`. [`Flag::Index`] is handled by the caller, since the
  /// entry does not know its own position.
  fn render(&self, flag: Flag) -> String {
    if self.display.is_empty() || flag == Flag::Target {
      return self.name.to_string();
    }
    match flag {
      Flag::Pipe => format!("{}|{}", self.name, self.display),
      _ => self.display.clone(),
    }
  }
}

/// Output modes for a resolved entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
  /// `#`: the 1-based position of the entry
  Index,
  /// `target`: the entry name, ignoring display text
  Target,
  /// `pipe`: `name|display`
  Pipe,
  /// Anything else: the display text, or the name when there is none
  Display,
}

impl From<&str> for Flag {
  fn from(flag: &str) -> Self {
    match flag {
      "#" => Flag::Index,
      "target" => Flag::Target,
      "pipe" => Flag::Pipe,
      _ => Flag::Display,
    }
  }
}

/// A non-empty circular list of entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavList {
  /// Entries in document order
  entries: Vec<ListEntry>,
}

impl NavList {
  /// Builds a list from extracted entries.
  ///
  /// # Errors
  ///
  /// Returns [`LookupError::InvalidList`] when `entries` is empty.
  pub fn new(entries: Vec<ListEntry>) -> Result<Self, LookupError> {
    if entries.is_empty() {
      return Err(LookupError::InvalidList);
    }
    Ok(Self { entries })
  }

  /// Number of entries, always at least one.
  pub fn size(&self) -> usize { self.entries.len() }

  /// The entries in document order.
  pub fn entries(&self) -> &[ListEntry] { &self.entries }

  /// Position of the first entry whose name matches `name`, ignoring case.
  pub fn position(&self, name: &str) -> Option<usize> {
    let key = name.to_lowercase();
    self.entries.iter().position(|entry| entry.name.matches(&key))
  }

  /// Maps any integer key onto `[0, size)`, wrapping in both directions.
  pub fn wrap(&self, key: i64) -> usize {
    // size is bounded by document length, far below i64::MAX
    key.rem_euclid(self.entries.len() as i64) as usize
  }

  /// Renders the entry at `index` (already wrapped) according to `flag`.
  pub fn render(&self, index: usize, flag: Flag) -> String {
    match flag {
      Flag::Index => (index + 1).to_string(),
      flag => self.entries[index].render(flag),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> NavList {
    NavList::new(vec![
      ListEntry::new("Some Kinda Robot", ""),
      ListEntry::new("Homestarloween Party", "Halloween"),
      ListEntry::invalid(),
    ])
    .unwrap()
  }

  #[test]
  fn test_empty_list_is_invalid() {
    assert_eq!(NavList::new(Vec::new()), Err(LookupError::InvalidList));
  }

  #[test]
  fn test_wrap() {
    let list = sample();
    assert_eq!(list.wrap(0), 0);
    assert_eq!(list.wrap(3), 0);
    assert_eq!(list.wrap(-1), 2);
    assert_eq!(list.wrap(-4), 2);
    assert_eq!(list.wrap(1001), 2);
  }

  #[test]
  fn test_position_ignores_case_and_invalid() {
    let list = sample();
    assert_eq!(list.position("some kinda robot"), Some(0));
    assert_eq!(list.position("HOMESTARLOWEEN PARTY"), Some(1));
    assert_eq!(list.position("invalid list item"), None);
    assert_eq!(list.position("Strong Bad"), None);
  }

  #[test]
  fn test_render_flags() {
    let list = sample();
    assert_eq!(list.render(1, Flag::Display), "Halloween");
    assert_eq!(list.render(1, Flag::Target), "Homestarloween Party");
    assert_eq!(list.render(1, Flag::Pipe), "Homestarloween Party|Halloween");
    assert_eq!(list.render(1, Flag::Index), "2");

    assert_eq!(list.render(0, Flag::Pipe), "Some Kinda Robot");
    assert_eq!(list.render(0, Flag::Display), "Some Kinda Robot");
    assert_eq!(list.render(2, Flag::Display), INVALID_LIST_ITEM);
  }

  #[test]
  fn test_entry_json() {
    let json = serde_json::to_string(sample().entries()).unwrap();
    assert_eq!(
      json,
      r#"[{"name":"Some Kinda Robot","display":""},{"name":"Homestarloween Party","display":"Halloween"},{"name":null,"display":""}]"#
    );
  }

  #[test]
  fn test_flag_from_str() {
    assert_eq!(Flag::from("#"), Flag::Index);
    assert_eq!(Flag::from("target"), Flag::Target);
    assert_eq!(Flag::from("pipe"), Flag::Pipe);
    assert_eq!(Flag::from("Pipe"), Flag::Display);
    assert_eq!(Flag::from(""), Flag::Display);
  }
}
