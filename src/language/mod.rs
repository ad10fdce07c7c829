//! Language identifiers and the bundle inventory
//!
//! ## Architecture
//!
//! ```text
//! code block class "language-rust" → LanguageId("rust")
//!              → bundle_name (xml-served aliases → "xml")
//!              → BundleLocator → "_ch-hljs-lang-rust.min.js"
//! ```
//!
//! The catalog is advisory: ids missing from it still resolve to a URL and
//! simply fail at fetch time.

mod builtin;
mod id;
mod inventory;

pub use id::{LanguageId, LanguageSet};
pub use inventory::{
    available_languages, bundle_name, BundleLocator, Catalog, CatalogError, Language,
    LANG_BUNDLE_PREFIX, LANG_BUNDLE_SUFFIX, XML_SERVED_ALIASES,
};
