//! Page title validation and normalization.
//!
//! Wiki titles are loose user input: `template_name`, ` Template : Name ` and `template:Name#Top`
//! all refer to the same page. This module turns such input into a canonical [`Title`] or rejects
//! it, following the rules of MediaWiki titles:
//!
//! - underscores and runs of spaces collapse to one space, and the ends are trimmed
//! - a known namespace prefix is split off and canonicalised (`template:` becomes `Template`)
//! - a leading `:` drops the caller's namespace hint
//! - a `#fragment` is discarded
//! - with capital links enabled the first letter is upper-cased
//!
//! # Examples
//!
//! ```
//! use navlist::title::{MediaWikiTitles, Namespace, TitleNormalizer};
//!
//! let titles = MediaWikiTitles::default();
//! let title = titles.normalize("seasons_of  the year", Namespace::Template).unwrap();
//! assert_eq!(title.prefixed_text(), "Template:Seasons of the year");
//! assert_eq!(title.text(), "Seasons of the year");
//!
//! assert!(titles.normalize("[[broken]]", Namespace::Main).is_none());
//! ```

use super::*;

/// Titles longer than this many bytes (without namespace) are rejected.
pub const MAX_TITLE_BYTES: usize = 255;

/// The namespaces a title can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Namespace {
  /// Articles, with no prefix
  Main,
  /// Discussion pages for articles
  Talk,
  /// User pages
  User,
  /// Discussion pages for the User namespace
  UserTalk,
  /// Project pages
  Project,
  /// Discussion pages for the Project namespace
  ProjectTalk,
  /// Uploaded files, also reachable through the legacy `Image:` prefix
  File,
  /// Discussion pages for the File namespace
  FileTalk,
  /// MediaWiki pages
  MediaWiki,
  /// Discussion pages for the MediaWiki namespace
  MediaWikiTalk,
  /// Templates, the default namespace for `navlist` list pages
  Template,
  /// Discussion pages for the Template namespace
  TemplateTalk,
  /// Help pages
  Help,
  /// Discussion pages for the Help namespace
  HelpTalk,
  /// Category pages
  Category,
  /// Discussion pages for the Category namespace
  CategoryTalk,
}

impl Namespace {
  /// Every namespace other than [`Namespace::Main`], in prefix lookup order.
  const PREFIXED: [Namespace; 15] = [
    Namespace::Talk,
    Namespace::User,
    Namespace::UserTalk,
    Namespace::Project,
    Namespace::ProjectTalk,
    Namespace::File,
    Namespace::FileTalk,
    Namespace::MediaWiki,
    Namespace::MediaWikiTalk,
    Namespace::Template,
    Namespace::TemplateTalk,
    Namespace::Help,
    Namespace::HelpTalk,
    Namespace::Category,
    Namespace::CategoryTalk,
  ];

  /// Canonical prefix text, without the trailing colon. Empty for [`Namespace::Main`].
  pub fn name(self) -> &'static str {
    match self {
      Namespace::Main => "",
      Namespace::Talk => "Talk",
      Namespace::User => "User",
      Namespace::UserTalk => "User talk",
      Namespace::Project => "Project",
      Namespace::ProjectTalk => "Project talk",
      Namespace::File => "File",
      Namespace::FileTalk => "File talk",
      Namespace::MediaWiki => "MediaWiki",
      Namespace::MediaWikiTalk => "MediaWiki talk",
      Namespace::Template => "Template",
      Namespace::TemplateTalk => "Template talk",
      Namespace::Help => "Help",
      Namespace::HelpTalk => "Help talk",
      Namespace::Category => "Category",
      Namespace::CategoryTalk => "Category talk",
    }
  }

  /// Matches a (space-normalized) prefix against the known namespaces, ignoring case.
  pub fn from_prefix(prefix: &str) -> Option<Namespace> {
    let prefix = prefix.to_lowercase();
    match prefix.as_str() {
      "image" => return Some(Namespace::File),
      "image talk" => return Some(Namespace::FileTalk),
      _ => {},
    }
    Self::PREFIXED.into_iter().find(|ns| ns.name().to_lowercase() == prefix)
  }
}

impl fmt::Display for Namespace {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.name()) }
}

/// A validated, canonical page title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Title {
  /// Namespace the page lives in
  namespace: Namespace,
  /// Title text without the namespace prefix
  text:      String,
}

impl Title {
  /// The namespace of this title.
  pub fn namespace(&self) -> Namespace { self.namespace }

  /// The title without its namespace prefix, e.g. `Seasons` for `Template:Seasons`.
  pub fn text(&self) -> &str { &self.text }

  /// The full title including the namespace prefix, e.g. `Template:Seasons`.
  pub fn prefixed_text(&self) -> String {
    match self.namespace {
      Namespace::Main => self.text.clone(),
      ns => format!("{}:{}", ns.name(), self.text),
    }
  }

  /// The prefixed title with spaces replaced by underscores, as used in URLs and file names.
  pub fn db_key(&self) -> String { self.prefixed_text().replace(' ', "_") }
}

impl fmt::Display for Title {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.prefixed_text()) }
}

/// Validates raw text as a page title.
///
/// Implementations return `None` when the text cannot name a page.
pub trait TitleNormalizer {
  /// Normalizes `raw` into a canonical title. `default_namespace` applies when `raw` carries no
  /// namespace prefix of its own.
  fn normalize(&self, raw: &str, default_namespace: Namespace) -> Option<Title>;
}

/// [`TitleNormalizer`] following MediaWiki's title rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaWikiTitles {
  /// Upper-case the first character of every title (`$wgCapitalLinks`)
  pub capital_links: bool,
}

impl Default for MediaWikiTitles {
  fn default() -> Self { Self { capital_links: true } }
}

lazy_static! {
  static ref SEPARATORS: Regex =
    Regex::new(r"[ _\u{A0}\u{1680}\u{180E}\u{2000}-\u{200A}\u{2028}\u{2029}\u{202F}\u{205F}\u{3000}]+")
      .unwrap();
  static ref ILLEGAL: Regex = Regex::new(r"[<>\[\]{}|\x00-\x1F\x7F]|~~~|%[0-9A-Fa-f]{2}").unwrap();
  static ref RELATIVE: Regex = Regex::new(r"^\.\.?(/|$)|/\.\.?(/|$)").unwrap();
}

impl TitleNormalizer for MediaWikiTitles {
  fn normalize(&self, raw: &str, default_namespace: Namespace) -> Option<Title> {
    let collapsed = SEPARATORS.replace_all(raw, " ");
    let mut rest = collapsed.trim_matches(' ');

    let mut namespace = default_namespace;
    if let Some(stripped) = rest.strip_prefix(':') {
      namespace = Namespace::Main;
      rest = stripped.trim_start_matches(' ');
    }
    if let Some((prefix, after)) = rest.split_once(':') {
      if let Some(ns) = Namespace::from_prefix(prefix.trim_end_matches(' ')) {
        namespace = ns;
        rest = after.trim_start_matches(' ');
      }
    }

    let text = match rest.split_once('#') {
      Some((before, _fragment)) => before.trim_end_matches(' '),
      None => rest,
    };

    if text.is_empty()
      || text.starts_with(':')
      || text.len() > MAX_TITLE_BYTES
      || ILLEGAL.is_match(text)
      || RELATIVE.is_match(text)
    {
      trace!("Rejected title: {raw:?}");
      return None;
    }

    let text = if self.capital_links { capitalize(text) } else { text.to_owned() };
    Some(Title { namespace, text })
  }
}

/// Upper-cases the first character of `text`.
fn capitalize(text: &str) -> String {
  let mut chars = text.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}
