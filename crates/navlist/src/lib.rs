//! Wiki parser functions for circular list navigation and URL slug formatting.
//!
//! The crate provides two functions meant to be called from page markup by a wiki host:
//!
//! - `navlist` reads the bulleted list on a template page, treats it as a circular list and
//!   resolves a lookup (by name and offset, by absolute index, or `first`/`last`/`size`) into an
//!   entry, its display text, its pipe form or its index.
//! - `urlformat` turns an arbitrary title into a URL slug.
//!
//! Both functions always produce a string. Failures surface as uppercase sentinel strings such as
//! `INVALID LOOKUP VALUE`, matching the single-string calling convention of wiki parser functions.
//!
//! # Example
//! ```
//! use navlist::{host::Host, store::MemoryStore};
//!
//! let mut store = MemoryStore::new();
//! store.insert("Template:Seasons", "*Spring\n*Summer\n*Autumn\n*Winter\n");
//!
//! let host = Host::new(store).with_current_page("Winter");
//! assert_eq!(host.navlist("Seasons", "next", "", ""), "Spring");
//! assert_eq!(host.navlist("Seasons", "#", "2", ""), "Summer");
//! assert_eq!(host.navlist("Seasons", "size", "", ""), "4");
//! assert_eq!(host.urlformat("Cheat Commandos (toon)"), "cheat-commandos");
//! ```

#![warn(missing_docs, clippy::missing_docs_in_private_items)]
use std::{
  collections::HashMap,
  fmt,
  path::{Path, PathBuf},
};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace, warn};
#[cfg(test)] use tracing_test::traced_test;

pub mod config;
pub mod errors;
pub mod extract;
pub mod format;
pub mod host;
pub mod list;
pub mod resolve;
pub mod store;
pub mod title;

use errors::{LookupError, NavlistError};
use list::{Flag, ListEntry, NavList, INVALID_LIST_ITEM};
use store::DocumentStore;
use title::{MediaWikiTitles, Namespace, Title, TitleNormalizer};
