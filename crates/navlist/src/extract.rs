//! Extraction of a [`NavList`] from raw template markup.
//!
//! Extraction runs in two passes. [`strip_markup`] removes what a transclusion would not show:
//! `<noinclude>` regions, the `<includeonly>`/`<onlyinclude>` tags themselves and HTML comments.
//! [`extract`] then scans the remaining text line by line for top-level bullets:
//!
//! ```text
//! *Page name
//! *Page name|Display text
//! ```
//!
//! Every bullet becomes one [`ListEntry`] in document order. Bullets whose page name is not a
//! valid title still take a slot in the list, marked as [`EntryName::Invalid`](crate::list::EntryName::Invalid).
//!
//! # Examples
//!
//! ```
//! use navlist::{extract::extract, title::MediaWikiTitles};
//!
//! let markup = "<noinclude>Navigation for toons.\n</noinclude>*Cheat Commandos|CC\n*Teen Girl Squad\n";
//! let list = extract(markup, &MediaWikiTitles::default()).unwrap();
//! assert_eq!(list.size(), 2);
//! assert_eq!(list.entries()[0].display, "CC");
//! ```

use super::*;

/// Opens a region that is removed entirely.
const EXCLUDE_OPEN: &str = "<noinclude>";
/// Closes a region opened by [`EXCLUDE_OPEN`].
const EXCLUDE_CLOSE: &str = "</noinclude>";
/// Tags that are dropped while their content is kept.
const TRANSPARENT_TAGS: [&str; 4] = ["<includeonly>", "</includeonly>", "<onlyinclude>", "</onlyinclude>"];
/// Opens an HTML comment.
const COMMENT_OPEN: &str = "<!--";
/// Closes an HTML comment.
const COMMENT_CLOSE: &str = "-->";

/// Parses template markup into a navigation list.
///
/// Each bullet name is validated with `titles` in the main namespace. The display text after the
/// pipe is trimmed, and discarded when the name is invalid.
///
/// # Errors
///
/// Returns [`LookupError::InvalidList`] when the markup contains no bullets.
pub fn extract<N: TitleNormalizer + ?Sized>(raw: &str, titles: &N) -> Result<NavList, LookupError> {
  let text = strip_markup(raw);

  let entries: Vec<ListEntry> = bullets(&text)
    .map(|(name, display)| match titles.normalize(name, Namespace::Main) {
      Some(title) => ListEntry::new(title.text(), display.trim()),
      None => {
        warn!("Invalid list item: {name:?}");
        ListEntry::invalid()
      },
    })
    .collect();

  debug!("Extracted {} list entries", entries.len());
  NavList::new(entries)
}

/// Scans `text` for bullet lines and yields their raw `(name, display)` fields.
///
/// A bullet line starts with `*`, followed by at least one character before any `|`. Everything
/// after the first `|` is the display field, which may be empty.
fn bullets(text: &str) -> impl Iterator<Item = (&str, &str)> {
  text.split('\n').filter_map(|line| {
    let body = line.strip_prefix('*')?;
    let (name, display) = body.split_once('|').unwrap_or((body, ""));
    (!name.is_empty()).then_some((name, display))
  })
}

/// Removes the parts of template markup that are not transcluded.
///
/// Line endings are normalized to `\n` first. Marker matching is case-sensitive.
pub fn strip_markup(raw: &str) -> String {
  let text = raw.replace("\r\n", "\n");
  let mut text = remove_delimited(&text, EXCLUDE_OPEN, EXCLUDE_CLOSE);
  for tag in TRANSPARENT_TAGS {
    text = text.replace(tag, "");
  }
  remove_comments(&text)
}

/// Removes every `open ... close` region, matching each opener with the nearest closer after it.
///
/// An opener without a closer is left in place along with everything after it.
fn remove_delimited(text: &str, open: &str, close: &str) -> String {
  let mut out = String::with_capacity(text.len());
  let mut rest = text;
  while let Some(start) = rest.find(open) {
    let after_open = &rest[start + open.len()..];
    let Some(end) = after_open.find(close) else {
      trace!("Unmatched {open} left in place");
      break;
    };
    out.push_str(&rest[..start]);
    rest = &after_open[end + close.len()..];
  }
  out.push_str(rest);
  out
}

/// Removes HTML comments.
///
/// An unterminated comment is left in place along with everything after it. When a comment is the
/// only thing on its line, apart from spaces, the whole line goes with it.
fn remove_comments(text: &str) -> String {
  let mut text = text.to_owned();
  let mut from = 0;
  while let Some(offset) = text[from..].find(COMMENT_OPEN) {
    let start = from + offset;
    let end = match text[start + COMMENT_OPEN.len()..].find(COMMENT_CLOSE) {
      Some(i) => start + COMMENT_OPEN.len() + i + COMMENT_CLOSE.len(),
      None => {
        trace!("Unterminated comment left in place");
        break;
      },
    };

    let bytes = text.as_bytes();
    let mut line_start = start;
    while line_start > 0 && bytes[line_start - 1] == b' ' {
      line_start -= 1;
    }
    let mut line_end = end;
    while line_end < bytes.len() && bytes[line_end] == b' ' {
      line_end += 1;
    }

    let own_line = line_start > 0
      && bytes[line_start - 1] == b'\n'
      && line_end < bytes.len()
      && bytes[line_end] == b'\n';
    if own_line {
      // keep the newline before the comment, drop the one after it
      text.replace_range(line_start..=line_end, "");
      from = line_start;
    } else {
      text.replace_range(start..end, "");
      from = start;
    }
  }
  text
}

#[cfg(test)]
mod tests {
  use super::*;

  fn names(list: &NavList) -> Vec<&str> { list.entries().iter().map(|e| e.name.as_str()).collect() }

  #[test]
  fn test_plain_bullets() {
    let list = extract("*Alpha\n*beta\n* gamma_ray\n", &MediaWikiTitles::default()).unwrap();
    assert_eq!(names(&list), vec!["Alpha", "Beta", "Gamma ray"]);
    assert!(list.entries().iter().all(|e| e.display.is_empty()));
  }

  #[test]
  fn test_pipes_and_display_trim() {
    let list = extract("*Alpha|  First one \n*Beta|\n*Gamma|a|b", &MediaWikiTitles::default())
      .unwrap();
    assert_eq!(list.entries()[0].display, "First one");
    assert_eq!(list.entries()[1].display, "");
    assert_eq!(list.entries()[2].display, "a|b");
  }

  #[test]
  fn test_non_bullet_lines_ignored() {
    let markup = "Intro text\n *Indented\n*\n*|no name\n\n*Real\n== Heading ==\n";
    let list = extract(markup, &MediaWikiTitles::default()).unwrap();
    assert_eq!(names(&list), vec!["Real"]);
  }

  #[traced_test]
  #[test]
  fn test_invalid_item_keeps_slot() {
    let list = extract("*Alpha\n*[[Beta]]|shown\n*Gamma", &MediaWikiTitles::default()).unwrap();
    assert_eq!(list.size(), 3);
    assert_eq!(list.entries()[1], ListEntry::invalid());
    assert!(logs_contain("Invalid list item"));
  }

  #[test]
  fn test_empty_list() {
    assert_eq!(
      extract("No bullets here.\n# numbered\n", &MediaWikiTitles::default()),
      Err(LookupError::InvalidList)
    );
    assert_eq!(extract("", &MediaWikiTitles::default()), Err(LookupError::InvalidList));
  }

  #[test]
  fn test_crlf() {
    let list = extract("*Alpha|A\r\n*Beta\r\n", &MediaWikiTitles::default()).unwrap();
    assert_eq!(names(&list), vec!["Alpha", "Beta"]);
    assert_eq!(list.entries()[0].display, "A");
  }

  #[test]
  fn test_noinclude_removed() {
    let markup = "<noinclude>*Hidden\n</noinclude>*Shown\n<noinclude>*Also hidden</noinclude>";
    assert_eq!(strip_markup(markup), "*Shown\n");
  }

  #[test]
  fn test_unmatched_noinclude_left_alone() {
    assert_eq!(strip_markup("*A\n<noinclude>*B\n"), "*A\n<noinclude>*B\n");
    assert_eq!(strip_markup("<noinclude>x</noinclude>*A\n<noinclude>*B"), "*A\n<noinclude>*B");
  }

  #[test]
  fn test_transparent_tags_dropped() {
    assert_eq!(
      strip_markup("<includeonly>*A\n</includeonly><onlyinclude>*B</onlyinclude>"),
      "*A\n*B"
    );
  }

  #[test]
  fn test_comments() {
    assert_eq!(strip_markup("*A<!-- note -->\n*B"), "*A\n*B");
    assert_eq!(strip_markup("*A\n  <!-- whole line -->  \n*B"), "*A\n*B");
    assert_eq!(strip_markup("*A\n<!-- unterminated\n*B"), "*A\n<!-- unterminated\n*B");
    assert_eq!(strip_markup("<!-- x -->*A\n<!-- open"), "*A\n<!-- open");
    assert_eq!(strip_markup("<!-- a --><!-- b -->*A"), "*A");
  }

  #[test]
  fn test_commented_bullet_not_extracted() {
    let list = extract("*A\n<!--*B\n-->*C", &MediaWikiTitles::default()).unwrap();
    assert_eq!(names(&list), vec!["A", "C"]);
  }

  #[test]
  fn test_unterminated_comment_keeps_later_bullets() {
    let list = extract("*A\n<!-- unterminated\n*B\n", &MediaWikiTitles::default()).unwrap();
    assert_eq!(names(&list), vec!["A", "B"]);
  }
}
