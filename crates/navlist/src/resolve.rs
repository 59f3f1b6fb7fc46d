//! Circular lookups over a [`NavList`].
//!
//! A lookup request has three parts, mirroring the arguments of the `navlist` function:
//!
//! | action              | lookup value                   | selects                               |
//! |---------------------|--------------------------------|---------------------------------------|
//! | `size`              | ignored                        | the list size (flag ignored too)      |
//! | `first` / `last`    | ignored                        | the first / last entry                |
//! | `#`                 | `first`, `last` or an integer  | the entry at that 1-based index       |
//! | empty, `next`, `prev` or an integer | entry name (default: current page) | the entry at that offset from the named one |
//!
//! Indices and offsets wrap around the list in both directions, so index `0` is the last entry
//! and `next` from the last entry is the first one. The flag then picks the output: the display
//! text (default), the `target` name, the `pipe` form or the `#` index.
//!
//! # Examples
//!
//! ```
//! use navlist::{
//!   list::{ListEntry, NavList},
//!   resolve::{LookupRequest, Resolver},
//!   title::MediaWikiTitles,
//! };
//!
//! let list = NavList::new(vec![
//!   ListEntry::new("A", ""),
//!   ListEntry::new("B", "Bee"),
//!   ListEntry::new("C", ""),
//! ])
//! .unwrap();
//! let titles = MediaWikiTitles::default();
//! let resolver = Resolver::new(&list, &titles);
//!
//! assert_eq!(resolver.resolve(&LookupRequest::new("next", "a", "")).unwrap(), "Bee");
//! assert_eq!(resolver.resolve(&LookupRequest::new("next", "c", "")).unwrap(), "A");
//! assert_eq!(resolver.resolve(&LookupRequest::new("#", "0", "#")).unwrap(), "3");
//! ```

use super::*;

/// Largest absolute index or offset accepted.
pub const MAX_OFFSET: u64 = 1000;

/// One invocation's lookup arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LookupRequest<'a> {
  /// `size`, `first`, `last`, `#`, `next`, `prev`, a numeric offset, or empty
  pub action: &'a str,
  /// An entry name, an index for `#`, or empty for the current page
  pub lookup: &'a str,
  /// `#`, `target`, `pipe`, or anything else for the display text
  pub flag:   &'a str,
}

impl<'a> LookupRequest<'a> {
  /// Bundles the three lookup arguments.
  pub fn new(action: &'a str, lookup: &'a str, flag: &'a str) -> Self { Self { action, lookup, flag } }
}

/// What a request addresses before output formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Address {
  /// The list size was requested
  Size,
  /// An unwrapped key, to be reduced modulo the list size
  Key(i64),
}

/// Resolves lookup requests against one list.
pub struct Resolver<'a, N: ?Sized> {
  /// The list being navigated
  list:         &'a NavList,
  /// Validates lookup values as titles
  titles:       &'a N,
  /// Prefixed title of the page the lookup is made from
  current_page: Option<&'a str>,
}

impl<'a, N: TitleNormalizer + ?Sized> Resolver<'a, N> {
  /// Creates a resolver with no current page.
  pub fn new(list: &'a NavList, titles: &'a N) -> Self { Self { list, titles, current_page: None } }

  /// Sets the page name used when a by-name lookup leaves the lookup value empty.
  pub fn with_current_page(mut self, current_page: Option<&'a str>) -> Self {
    self.current_page = current_page;
    self
  }

  /// Resolves `request` into the output string.
  ///
  /// # Errors
  ///
  /// Returns the first [`LookupError`] hit while reading the action and lookup value, in that
  /// order. The flag never fails; unrecognized flags select the display text.
  pub fn resolve(&self, request: &LookupRequest) -> Result<String, LookupError> {
    let key = match self.address(request)? {
      Address::Size => return Ok(self.list.size().to_string()),
      Address::Key(key) => self.list.wrap(key),
    };
    trace!("Request {request:?} resolved to index {key}");
    Ok(self.list.render(key, Flag::from(request.flag)))
  }

  /// Computes the raw key addressed by the action and lookup value of `request`.
  pub fn address(&self, request: &LookupRequest) -> Result<Address, LookupError> {
    let size = self.list.size() as i64;
    let key = match (request.action, request.lookup) {
      ("size", _) => return Ok(Address::Size),
      ("first", _) | ("#", "first") => 0,
      ("last", _) | ("#", "last") => size - 1,
      ("#", index) => {
        let index = parse_numeric(index).ok_or(LookupError::InvalidIndex)?;
        if index.unsigned_abs() > MAX_OFFSET {
          return Err(LookupError::IndexOutOfRange);
        }
        index - 1
      },
      (action, lookup) => {
        let position = self.position_of(lookup)?;
        position as i64 + parse_offset(action)?
      },
    };
    Ok(Address::Key(key))
  }

  /// Finds the entry named by `lookup`, falling back to the current page when it is empty.
  fn position_of(&self, lookup: &str) -> Result<usize, LookupError> {
    let lookup = match lookup {
      "" => self.current_page.ok_or(LookupError::NoTitleObject)?,
      lookup => lookup,
    };
    let title =
      self.titles.normalize(lookup, Namespace::Main).ok_or(LookupError::InvalidLookupValue)?;
    if title.text().to_lowercase() == INVALID_LIST_ITEM.to_lowercase() {
      return Err(LookupError::InvalidLookupValue);
    }
    self.list.position(title.text()).ok_or_else(|| {
      debug!("No list entry named {:?}", title.text());
      LookupError::InvalidLookupValue
    })
  }
}

/// Parses the action of a by-name lookup into a signed offset.
fn parse_offset(action: &str) -> Result<i64, LookupError> {
  let offset = match action {
    "" => 0,
    "next" => 1,
    "prev" => -1,
    action => parse_numeric(action).ok_or(LookupError::InvalidAction)?,
  };
  if offset.unsigned_abs() > MAX_OFFSET {
    return Err(LookupError::ActionOffsetOutOfRange);
  }
  Ok(offset)
}

lazy_static! {
  static ref NUMERIC: Regex =
    Regex::new(r"^[ \t\n\r\x0B\x0C]*([+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)[ \t\n\r\x0B\x0C]*$")
      .unwrap();
}

/// Reads a decimal number and truncates it toward zero.
///
/// Accepts the usual numeric spellings: optional sign, fraction and exponent, surrounding
/// whitespace. `"2.9"` gives 2, `"-2.9"` gives -2, `"1e2"` gives 100. Values beyond the `i64`
/// range saturate. Returns `None` for anything else, including hexadecimal and `inf`.
pub fn parse_numeric(text: &str) -> Option<i64> {
  let number = NUMERIC.captures(text)?.get(1)?.as_str();
  let value: f64 = number.parse().ok()?;
  // float to int casts saturate
  Some(value.trunc() as i64)
}
