//! The boundary between wiki markup and the library.
//!
//! A [`Host`] bundles what the functions need from the surrounding wiki: a [`DocumentStore`] to
//! read template pages from, a [`TitleNormalizer`], and a [`CurrentPageContext`] naming the page
//! being rendered. Its [`Host::navlist`] and [`Host::urlformat`] methods are the functions as seen
//! from markup: they take plain strings and always return a string, with failures turned into
//! sentinel text.
//!
//! [`FunctionRegistry`] dispatches calls by magic word, the way a wiki parser hands
//! `{{#navlist:...}}` to its hook.
//!
//! # Examples
//!
//! ```
//! use navlist::{
//!   host::{FunctionRegistry, Host},
//!   store::MemoryStore,
//! };
//!
//! let mut store = MemoryStore::new();
//! store.insert("Template:Emails", "*Some Kinda Robot|SB 1\n*Jibblies|SB 2\n");
//! let host = Host::new(store).with_current_page("Jibblies");
//!
//! assert_eq!(host.navlist("Emails", "prev", "", "target"), "Some Kinda Robot");
//! assert_eq!(host.navlist("Nope", "", "", ""), "INVALID TEMPLATE NAME");
//!
//! let registry = FunctionRegistry::with_builtins(&host);
//! assert_eq!(registry.call("#navlist", &["Emails", " next "]).as_deref(), Some("SB 1"));
//! assert_eq!(registry.call("urlformat", &[]).as_deref(), Some("jibblies"));
//! ```

use super::*;
use crate::{
  config::SiteConfig,
  extract::extract,
  format::format_slug,
  resolve::{LookupRequest, Resolver},
  store::DirectoryStore,
};

/// Supplies the title of the page being rendered.
pub trait CurrentPageContext {
  /// The prefixed title of the current page, or `None` when there is no page context.
  fn title(&self) -> Option<String>;
}

impl CurrentPageContext for Option<String> {
  fn title(&self) -> Option<String> { self.clone() }
}

impl CurrentPageContext for String {
  fn title(&self) -> Option<String> { Some(self.clone()) }
}

impl CurrentPageContext for &str {
  fn title(&self) -> Option<String> { Some((*self).to_owned()) }
}

/// The wiki-side collaborators of the parser functions.
pub struct Host<S, N = MediaWikiTitles> {
  /// Where template pages are read from
  store:        S,
  /// Title validation rules
  titles:       N,
  /// The page the functions are called from
  current_page: Box<dyn CurrentPageContext>,
}

impl<S: DocumentStore> Host<S> {
  /// Creates a host over `store` with default title rules and no current page.
  pub fn new(store: S) -> Self {
    Self { store, titles: MediaWikiTitles::default(), current_page: Box::new(None::<String>) }
  }
}

impl Host<DirectoryStore> {
  /// Creates a host from a site configuration.
  pub fn from_config(config: &SiteConfig) -> Self {
    Self {
      store:        config.store(),
      titles:       config.titles(),
      current_page: Box::new(config.current_page.clone()),
    }
  }
}

impl<S: DocumentStore, N: TitleNormalizer> Host<S, N> {
  /// Replaces the title rules.
  pub fn with_titles<M: TitleNormalizer>(self, titles: M) -> Host<S, M> {
    Host { store: self.store, titles, current_page: self.current_page }
  }

  /// Sets a fixed current page title.
  pub fn with_current_page(self, title: impl Into<String>) -> Self {
    self.with_context(Some(title.into()))
  }

  /// Sets the source of the current page title.
  pub fn with_context(mut self, context: impl CurrentPageContext + 'static) -> Self {
    self.current_page = Box::new(context);
    self
  }

  /// The page store.
  pub fn store(&self) -> &S { &self.store }

  /// Reads and extracts the list on template `template`.
  ///
  /// `template` is resolved in the template namespace unless it names another one.
  ///
  /// # Errors
  ///
  /// - [`LookupError::InvalidTemplateParameter`] if `template` is not a valid title
  /// - [`LookupError::InvalidTemplateName`] if the page does not exist
  /// - [`LookupError::InvalidList`] if the page has no list items
  /// - [`NavlistError::Io`] if the page cannot be read
  pub fn list(&self, template: &str) -> Result<NavList, NavlistError> {
    let title = self
      .titles
      .normalize(template, Namespace::Template)
      .ok_or(LookupError::InvalidTemplateParameter)?;
    let content = self.store.fetch(&title)?.ok_or(LookupError::InvalidTemplateName)?;
    trace!("Read {} bytes from {title}", content.len());
    Ok(extract(&content, &self.titles)?)
  }

  /// Looks up an entry of the list on `template`.
  ///
  /// # Errors
  ///
  /// Everything [`Host::list`] reports, plus the lookup errors of [`Resolver::resolve`].
  pub fn try_navlist(
    &self,
    template: &str,
    action: &str,
    lookup: &str,
    flag: &str,
  ) -> Result<String, NavlistError> {
    let list = self.list(template)?;
    let current_page = self.current_page.title();
    let resolver = Resolver::new(&list, &self.titles).with_current_page(current_page.as_deref());
    Ok(resolver.resolve(&LookupRequest::new(action, lookup, flag))?)
  }

  /// The `navlist` function: like [`Host::try_navlist`], with errors rendered as sentinels.
  ///
  /// A template page that exists but cannot be read is reported as `INVALID TEMPLATE NAME`.
  pub fn navlist(&self, template: &str, action: &str, lookup: &str, flag: &str) -> String {
    match self.try_navlist(template, action, lookup, flag) {
      Ok(result) => result,
      Err(NavlistError::Lookup(e)) => {
        debug!("navlist({template:?}, {action:?}, {lookup:?}, {flag:?}) failed: {e}");
        e.sentinel().to_owned()
      },
      Err(e) => {
        error!("Failed to read template {template:?}: {e}");
        LookupError::InvalidTemplateName.sentinel().to_owned()
      },
    }
  }

  /// The `urlformat` function: formats `text` as a URL slug.
  ///
  /// Empty `text` formats the current page title instead, or yields `NO TITLE OBJECT` when there
  /// is no current page.
  pub fn urlformat(&self, text: &str) -> String {
    if !text.is_empty() {
      return format_slug(text);
    }
    match self.current_page.title() {
      Some(title) => format_slug(&title),
      None => {
        debug!("urlformat called without text or current page");
        LookupError::NoTitleObject.sentinel().to_owned()
      },
    }
  }
}

/// A function callable from markup by magic word.
pub trait ParserFunction {
  /// The magic word, lowercase and without the leading `#`.
  fn name(&self) -> &'static str;

  /// How many positional arguments the function takes. Missing ones are passed as empty strings.
  fn arity(&self) -> usize;

  /// Runs the function on exactly [`ParserFunction::arity`] trimmed arguments.
  fn call(&self, args: &[&str]) -> String;
}

/// `{{#navlist: template | action | lookup value | flag }}`
pub struct NavlistFunction<'h, S, N> {
  /// Host the function reads from
  host: &'h Host<S, N>,
}

impl<S: DocumentStore, N: TitleNormalizer> ParserFunction for NavlistFunction<'_, S, N> {
  fn name(&self) -> &'static str { "navlist" }

  fn arity(&self) -> usize { 4 }

  fn call(&self, args: &[&str]) -> String { self.host.navlist(args[0], args[1], args[2], args[3]) }
}

/// `{{#urlformat: text }}`
pub struct UrlFormatFunction<'h, S, N> {
  /// Host supplying the current page
  host: &'h Host<S, N>,
}

impl<S: DocumentStore, N: TitleNormalizer> ParserFunction for UrlFormatFunction<'_, S, N> {
  fn name(&self) -> &'static str { "urlformat" }

  fn arity(&self) -> usize { 1 }

  fn call(&self, args: &[&str]) -> String { self.host.urlformat(args[0]) }
}

/// Parser functions by magic word.
#[derive(Default)]
pub struct FunctionRegistry<'h> {
  /// Registered functions keyed by lowercase magic word
  functions: HashMap<&'static str, Box<dyn ParserFunction + 'h>>,
}

impl<'h> FunctionRegistry<'h> {
  /// Creates an empty registry.
  pub fn new() -> Self { Self::default() }

  /// Creates a registry holding `navlist` and `urlformat` bound to `host`.
  pub fn with_builtins<S: DocumentStore, N: TitleNormalizer>(host: &'h Host<S, N>) -> Self {
    let mut registry = Self::new();
    registry.register(NavlistFunction { host });
    registry.register(UrlFormatFunction { host });
    registry
  }

  /// Registers `function` under its magic word, replacing any function with the same name.
  pub fn register(&mut self, function: impl ParserFunction + 'h) -> &mut Self {
    trace!("Registering parser function {}", function.name());
    self.functions.insert(function.name(), Box::new(function));
    self
  }

  /// Registered magic words, sorted.
  pub fn names(&self) -> Vec<&'static str> {
    let mut names: Vec<_> = self.functions.keys().copied().collect();
    names.sort_unstable();
    names
  }

  /// Calls the function registered as `name`.
  ///
  /// The name is matched ignoring case and a leading `#`. Arguments are trimmed; missing ones
  /// become empty strings and extra ones are ignored. Returns `None` for unknown names.
  pub fn call(&self, name: &str, args: &[&str]) -> Option<String> {
    let name = name.trim().trim_start_matches('#').to_lowercase();
    let Some(function) = self.functions.get(name.as_str()) else {
      warn!("Unknown parser function {name:?}");
      return None;
    };
    let args: Vec<&str> =
      (0..function.arity()).map(|i| args.get(i).map_or("", |arg| arg.trim())).collect();
    Some(function.call(&args))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::MemoryStore;

  fn host() -> Host<MemoryStore> {
    let mut store = MemoryStore::new();
    store
      .insert("Template:Emails", "<noinclude>Email list</noinclude>\n*Some Kinda Robot|SB 1\n*Jibblies\n")
      .insert("Template:Empty", "No list here.")
      .insert("User:Strong Bad/List", "*Trogdor\n");
    Host::new(store).with_current_page("Jibblies")
  }

  /// A store whose reads always fail.
  struct BrokenStore;

  impl DocumentStore for BrokenStore {
    fn fetch(&self, _title: &Title) -> Result<Option<String>, NavlistError> {
      Err(std::io::Error::other("disk on fire").into())
    }
  }

  #[test]
  fn test_navlist_lookups() {
    let host = host();
    assert_eq!(host.navlist("Emails", "", "", ""), "Jibblies");
    assert_eq!(host.navlist("Emails", "next", "", ""), "SB 1");
    assert_eq!(host.navlist("Emails", "next", "", "pipe"), "Some Kinda Robot|SB 1");
    assert_eq!(host.navlist("template:emails", "size", "", ""), "2");
    assert_eq!(host.navlist("User:Strong Bad/List", "first", "", ""), "Trogdor");
  }

  #[test]
  fn test_navlist_template_errors() {
    let host = host();
    assert_eq!(host.navlist("", "", "", ""), "INVALID TEMPLATE PARAMETER");
    assert_eq!(host.navlist("{{Emails}}", "", "", ""), "INVALID TEMPLATE PARAMETER");
    assert_eq!(host.navlist("Missing", "", "", ""), "INVALID TEMPLATE NAME");
    assert_eq!(host.navlist("Empty", "size", "", ""), "INVALID LIST");
  }

  #[test]
  fn test_navlist_without_current_page() {
    let host = Host::new(host().store().clone());
    assert_eq!(host.navlist("Emails", "next", "", ""), "NO TITLE OBJECT");
    assert_eq!(host.navlist("Emails", "next", "jibblies", ""), "SB 1");
    assert_eq!(host.urlformat(""), "NO TITLE OBJECT");
  }

  #[traced_test]
  #[test]
  fn test_navlist_read_failure() {
    let host = Host::new(BrokenStore);
    assert_eq!(host.navlist("Emails", "", "", ""), "INVALID TEMPLATE NAME");
    assert!(logs_contain("disk on fire"));
    assert!(matches!(host.try_navlist("Emails", "", "", ""), Err(NavlistError::Io(_))));
  }

  #[test]
  fn test_try_navlist_keeps_error_kind() {
    let host = host();
    let err = host.try_navlist("Emails", "sideways", "Jibblies", "").unwrap_err();
    assert_eq!(err.lookup(), Some(LookupError::InvalidAction));
  }

  #[test]
  fn test_urlformat() {
    let host = host().with_current_page("Cheat Commandos (toon)");
    assert_eq!(host.urlformat("myths & legends"), "myths-legends");
    assert_eq!(host.urlformat(""), "cheat-commandos");
  }

  #[test]
  fn test_context_source() {
    struct Fixed;
    impl CurrentPageContext for Fixed {
      fn title(&self) -> Option<String> { Some("Some Kinda Robot".into()) }
    }
    let host = host().with_context(Fixed);
    assert_eq!(host.navlist("Emails", "", "", "target"), "Some Kinda Robot");
  }

  #[test]
  fn test_capital_links_off() {
    let titles = MediaWikiTitles { capital_links: false };
    let mut store = MemoryStore::new();
    store.insert_title(&titles.normalize("lower", Namespace::Template).unwrap(), "*alpha\n*beta\n");
    let host = Host::new(store).with_titles(titles);
    assert_eq!(host.navlist("lower", "size", "", ""), "2");
    assert_eq!(host.navlist("lower", "next", "ALPHA", ""), "beta");
    assert_eq!(host.navlist("Lower", "size", "", ""), "INVALID TEMPLATE NAME");
  }

  #[test]
  fn test_registry() {
    let host = host();
    let registry = FunctionRegistry::with_builtins(&host);
    assert_eq!(registry.names(), vec!["navlist", "urlformat"]);
    assert_eq!(registry.call("NAVLIST", &["Emails", "size"]).as_deref(), Some("2"));
    assert_eq!(registry.call("#navlist", &[" Emails ", " #", "1 ", " target"]).as_deref(), Some("Some Kinda Robot"));
    assert_eq!(registry.call("navlist", &["Emails", "", "", "", "extra"]).as_deref(), Some("Jibblies"));
    assert_eq!(registry.call("urlformat", &["  "]).as_deref(), Some("jibblies"));
    assert_eq!(registry.call("ifexist", &["x"]), None);
  }

  #[test]
  fn test_registry_custom_function() {
    struct Shout;
    impl ParserFunction for Shout {
      fn name(&self) -> &'static str { "shout" }

      fn arity(&self) -> usize { 1 }

      fn call(&self, args: &[&str]) -> String { args[0].to_uppercase() }
    }

    let mut registry = FunctionRegistry::new();
    registry.register(Shout);
    assert_eq!(registry.call("shout", &["trogdor"]).as_deref(), Some("TROGDOR"));
    assert_eq!(registry.call("shout", &[]).as_deref(), Some(""));
  }
}
