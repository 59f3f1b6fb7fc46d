//! Site configuration.
//!
//! A [`SiteConfig`] describes the wiki the functions run against: where pages are stored, which
//! page counts as current when a lookup leaves its value empty, and how titles are normalized.
//! It is read from a JSON file; every field is optional.
//!
//! ```json
//! {
//!   "pages_dir": "/srv/wiki/pages",
//!   "current_page": "Strong Bad Email",
//!   "capital_links": true
//! }
//! ```

use std::fs;

use super::*;

/// Settings for a wiki site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
  /// Root of the page directory, see [`store::DirectoryStore`]
  pub pages_dir:     PathBuf,
  /// Title of the page the functions are invoked from, if any
  pub current_page:  Option<String>,
  /// Upper-case the first letter of titles
  pub capital_links: bool,
}

impl Default for SiteConfig {
  fn default() -> Self {
    Self {
      pages_dir:     store::DirectoryStore::default_path(),
      current_page:  None,
      capital_links: true,
    }
  }
}

impl SiteConfig {
  /// Get default configuration file path in user's config directory
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("navlist").join("config.json")
  }

  /// Reads a configuration file. Missing fields take their defaults.
  ///
  /// # Errors
  ///
  /// Returns [`NavlistError::Io`] if the file cannot be read and [`NavlistError::Config`] if it
  /// is not a valid configuration.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, NavlistError> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
  }

  /// Reads the file at [`SiteConfig::default_path`] if it exists, defaults otherwise.
  ///
  /// # Errors
  ///
  /// Returns an error if the file exists but cannot be read or parsed.
  pub fn load_or_default() -> Result<Self, NavlistError> {
    let path = Self::default_path();
    if path.exists() {
      Self::load(path)
    } else {
      trace!("No configuration at {}, using defaults", path.display());
      Ok(Self::default())
    }
  }

  /// The title rules this site uses.
  pub fn titles(&self) -> MediaWikiTitles { MediaWikiTitles { capital_links: self.capital_links } }

  /// A page store reading from [`SiteConfig::pages_dir`].
  pub fn store(&self) -> store::DirectoryStore { store::DirectoryStore::new(&self.pages_dir) }
}
