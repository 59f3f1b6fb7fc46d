//! Page storage backends.
//!
//! The `navlist` function reads its list from a template page. Where pages come from is up to
//! the host, behind the [`DocumentStore`] trait. Two stores ship with the crate:
//!
//! - [`MemoryStore`] keeps pages in a map, for tests and embedding
//! - [`DirectoryStore`] reads `.wiki` files from a directory tree, one subdirectory per namespace
//!
//! # Examples
//!
//! ```
//! use navlist::{
//!   store::{DocumentStore, MemoryStore},
//!   title::{MediaWikiTitles, Namespace, TitleNormalizer},
//! };
//!
//! let mut store = MemoryStore::new();
//! store.insert("Template:Toons", "*Cheat Commandos\n");
//!
//! let title = MediaWikiTitles::default().normalize("toons", Namespace::Template).unwrap();
//! assert_eq!(store.fetch(&title).unwrap().as_deref(), Some("*Cheat Commandos\n"));
//! ```

use std::{fs, io};

use super::*;

/// File extension of pages in a [`DirectoryStore`].
pub const PAGE_EXTENSION: &str = "wiki";

/// Read access to raw page markup.
pub trait DocumentStore {
  /// Fetches the raw markup of `title`.
  ///
  /// Returns `Ok(None)` when the page does not exist.
  ///
  /// # Errors
  ///
  /// Returns an error when the page exists but cannot be read.
  fn fetch(&self, title: &Title) -> Result<Option<String>, NavlistError>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
  fn fetch(&self, title: &Title) -> Result<Option<String>, NavlistError> { (**self).fetch(title) }
}

/// In-memory page store keyed by prefixed title.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  /// Page markup by prefixed title text
  pages: HashMap<String, String>,
}

impl MemoryStore {
  /// Creates an empty store.
  pub fn new() -> Self { Self::default() }

  /// Adds or replaces a page.
  ///
  /// `title` is normalized with the default [`MediaWikiTitles`] rules, so `template:seasons` and
  /// `Template:Seasons` name the same page. Text that is not a valid title is stored verbatim and
  /// can never be fetched.
  pub fn insert(&mut self, title: &str, content: impl Into<String>) -> &mut Self {
    let key = MediaWikiTitles::default()
      .normalize(title, Namespace::Main)
      .map_or_else(|| title.to_owned(), |t| t.prefixed_text());
    self.pages.insert(key, content.into());
    self
  }

  /// Adds or replaces the page at an already normalized `title`.
  ///
  /// Use this when the host normalizes titles with rules other than the defaults, such as
  /// `capital_links: false`.
  pub fn insert_title(&mut self, title: &Title, content: impl Into<String>) -> &mut Self {
    self.pages.insert(title.prefixed_text(), content.into());
    self
  }

  /// Number of stored pages.
  pub fn len(&self) -> usize { self.pages.len() }

  /// Whether the store holds no pages.
  pub fn is_empty(&self) -> bool { self.pages.is_empty() }
}

impl DocumentStore for MemoryStore {
  fn fetch(&self, title: &Title) -> Result<Option<String>, NavlistError> {
    Ok(self.pages.get(&title.prefixed_text()).cloned())
  }
}

/// Page store backed by a directory of `.wiki` files.
///
/// `Template:Some title` lives at `<root>/Template/Some_title.wiki`; main namespace pages sit
/// directly in `<root>`. Subpages (`Foo/Bar`) map onto subdirectories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryStore {
  /// Root directory holding one subdirectory per namespace
  root: PathBuf,
}

impl DirectoryStore {
  /// Opens a store rooted at `root`. The directory does not need to exist yet.
  pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

  /// Get default page directory in user's data directory
  pub fn default_path() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("navlist").join("pages")
  }

  /// The root directory of this store.
  pub fn root(&self) -> &Path { &self.root }

  /// Path of the file holding `title`.
  ///
  /// Returns `None` when the title cannot name a file below the root: a leading or doubled `/`,
  /// a `.` or `..` segment, or a backslash.
  pub fn path_for(&self, title: &Title) -> Option<PathBuf> {
    let mut path = match title.namespace() {
      Namespace::Main => self.root.clone(),
      ns => self.root.join(ns.name().replace(' ', "_")),
    };
    let file = title.text().replace(' ', "_");
    let segments: Vec<&str> = file.split('/').collect();
    for (i, segment) in segments.iter().enumerate() {
      if segment.is_empty() || *segment == "." || *segment == ".." || segment.contains('\\') {
        return None;
      }
      if i + 1 == segments.len() {
        path.push(format!("{segment}.{PAGE_EXTENSION}"));
      } else {
        path.push(segment);
      }
    }
    Some(path)
  }
}

impl DocumentStore for DirectoryStore {
  fn fetch(&self, title: &Title) -> Result<Option<String>, NavlistError> {
    let Some(path) = self.path_for(title) else {
      warn!("Page {title} does not map to a file below {}", self.root.display());
      return Ok(None);
    };
    trace!("Reading page {title} from {}", path.display());
    match fs::read_to_string(&path) {
      Ok(content) => Ok(Some(content)),
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        debug!("No page file at {}", path.display());
        Ok(None)
      },
      Err(e) => Err(e.into()),
    }
  }
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;

  fn template(text: &str) -> Title {
    MediaWikiTitles::default().normalize(text, Namespace::Template).unwrap()
  }

  #[test]
  fn test_memory_store_normalizes_keys() {
    let mut store = MemoryStore::new();
    store.insert("template:strong_Bad emails", "*A").insert("Help:Contents", "*B");
    assert_eq!(store.len(), 2);
    assert_eq!(store.fetch(&template("Strong Bad emails")).unwrap().as_deref(), Some("*A"));
    assert_eq!(store.fetch(&template("strong_Bad_emails")).unwrap().as_deref(), Some("*A"));
    // only the first letter folds
    assert_eq!(store.fetch(&template("Strong bad emails")).unwrap(), None);
    assert_eq!(store.fetch(&template("Missing")).unwrap(), None);
  }

  #[test]
  fn test_directory_store_paths() {
    let store = DirectoryStore::new("/pages");
    assert_eq!(
      store.path_for(&template("Strong Bad emails")),
      Some(PathBuf::from("/pages/Template/Strong_Bad_emails.wiki"))
    );
    let main = MediaWikiTitles::default().normalize("Trogdor", Namespace::Main).unwrap();
    assert_eq!(store.path_for(&main), Some(PathBuf::from("/pages/Trogdor.wiki")));
    let talk = MediaWikiTitles::default().normalize("Template talk:Toons", Namespace::Main).unwrap();
    assert_eq!(store.path_for(&talk), Some(PathBuf::from("/pages/Template_talk/Toons.wiki")));
    let sub = MediaWikiTitles::default().normalize("Strong Bad/Emails", Namespace::Main).unwrap();
    assert_eq!(store.path_for(&sub), Some(PathBuf::from("/pages/Strong_Bad/Emails.wiki")));
  }

  #[test]
  fn test_directory_store_stays_below_root() {
    let store = DirectoryStore::new("/pages");
    assert_eq!(store.path_for(&template("/tmp/secret")), None);
    assert_eq!(store.path_for(&template("Template:/etc/passwd")), None);
    assert_eq!(store.path_for(&template("A//B")), None);
    assert_eq!(store.path_for(&template("A/")), None);
    assert_eq!(store.path_for(&template("A\\B")), None);
  }

  #[test]
  fn test_directory_store_ignores_files_outside_root() -> anyhow::Result<()> {
    let outside = tempdir()?;
    fs::write(outside.path().join("secret.wiki"), "*Escaped\n")?;
    let root = tempdir()?;

    let store = DirectoryStore::new(root.path());
    let absolute = format!("{}/secret", outside.path().display());
    assert_eq!(store.fetch(&template(&absolute))?, None);
    Ok(())
  }

  #[test]
  fn test_directory_store_fetch() -> anyhow::Result<()> {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("Template"))?;
    fs::write(dir.path().join("Template").join("Toons.wiki"), "*Cheat Commandos\n")?;

    let store = DirectoryStore::new(dir.path());
    assert_eq!(store.fetch(&template("toons"))?.as_deref(), Some("*Cheat Commandos\n"));
    assert_eq!(store.fetch(&template("Missing"))?, None);
    Ok(())
  }

  #[test]
  fn test_directory_store_read_error() -> anyhow::Result<()> {
    let dir = tempdir()?;
    // a directory where the page file should be cannot be read as text
    fs::create_dir_all(dir.path().join("Template").join("Toons.wiki"))?;

    let store = DirectoryStore::new(dir.path());
    assert!(matches!(store.fetch(&template("Toons")), Err(NavlistError::Io(_))));
    Ok(())
  }
}
