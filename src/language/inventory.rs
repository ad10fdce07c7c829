//! Catalog of supported languages and their bundle locations

use serde::{Deserialize, Serialize};

use super::builtin::BUILTIN_LANGUAGES;
use super::id::LanguageId;
use crate::config::LANG_PLACEHOLDER;

/// File name prefix of a language bundle in the media directory
pub const LANG_BUNDLE_PREFIX: &str = "_ch-hljs-lang-";
/// File name suffix of a language bundle in the media directory
pub const LANG_BUNDLE_SUFFIX: &str = ".min.js";

/// Aliases registered by the XML bundle rather than a bundle of their own
pub const XML_SERVED_ALIASES: [&str; 10] = [
    "html", "xhtml", "rss", "atom", "xjb", "xsd", "xsl", "plist", "wsf", "svg",
];

const XML_BUNDLE: &str = "xml";

/// A language supported by the engine, as dumped by the extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
    pub alias: LanguageId,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("line {line}: invalid language entry: {source}")]
    InvalidLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Deduplicated language table, in the engine's enumeration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    languages: Vec<Language>,
}

impl Catalog {
    /// The languages shipped with the bundled engine build
    pub fn builtin() -> Self {
        Self::from_languages(BUILTIN_LANGUAGES.iter().map(|(name, alias)| Language {
            name: (*name).to_string(),
            alias: LanguageId::from(*alias),
        }))
    }

    /// Build from languages, keeping the first entry for a repeated alias
    pub fn from_languages(languages: impl IntoIterator<Item = Language>) -> Self {
        let mut catalog = Self::default();
        for language in languages {
            if catalog.get(language.alias.as_str()).is_some() {
                tracing::debug!(alias = %language.alias, "Dropping duplicate catalog alias");
                continue;
            }
            catalog.languages.push(language);
        }
        catalog
    }

    /// Parse the extractor's output: one `{"name": .., "alias": ..}` per line
    ///
    /// Blank lines are skipped; line numbers in errors are 1-based.
    pub fn from_json_lines(input: &str) -> Result<Self, CatalogError> {
        let languages = input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str::<Language>(line).map_err(|source| {
                    CatalogError::InvalidLine {
                        line: idx + 1,
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_languages(languages))
    }

    pub fn get(&self, alias: &str) -> Option<&Language> {
        self.languages
            .iter()
            .find(|language| language.alias.as_str() == alias)
    }

    /// Whether `alias` can be highlighted, directly or through the XML bundle
    pub fn supports(&self, alias: &str) -> bool {
        self.get(alias).is_some()
            || (XML_SERVED_ALIASES.contains(&alias) && self.get(XML_BUNDLE).is_some())
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

/// Name of the bundle that registers `id`
///
/// Aliases handled by the XML grammar share its bundle; every other id is its
/// own bundle name.
pub fn bundle_name(id: &LanguageId) -> &str {
    if XML_SERVED_ALIASES.contains(&id.as_str()) {
        XML_BUNDLE
    } else {
        id.as_str()
    }
}

/// Turns language ids into loadable URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleLocator {
    base_engine_url: String,
    bundle_url_template: String,
}

impl BundleLocator {
    pub fn new(base_engine_url: impl Into<String>, bundle_url_template: impl Into<String>) -> Self {
        Self {
            base_engine_url: base_engine_url.into(),
            bundle_url_template: bundle_url_template.into(),
        }
    }

    pub fn engine_url(&self) -> &str {
        &self.base_engine_url
    }

    /// Total over all ids: unknown languages still get a URL and fail later
    pub fn resolve_bundle_location(&self, id: &LanguageId) -> String {
        self.bundle_url_template
            .replace(LANG_PLACEHOLDER, bundle_name(id))
    }
}

/// Languages available from the bundle files present in a media directory
///
/// Files not shaped like `_ch-hljs-lang-<alias>.min.js` are ignored. The
/// aliases served by the XML bundle are always appended.
pub fn available_languages<S: AsRef<str>>(media_files: &[S]) -> Vec<LanguageId> {
    media_files
        .iter()
        .filter_map(|file| {
            file.as_ref()
                .strip_prefix(LANG_BUNDLE_PREFIX)?
                .strip_suffix(LANG_BUNDLE_SUFFIX)
        })
        .map(LanguageId::from)
        .chain(XML_SERVED_ALIASES.iter().map(|alias| LanguageId::from(*alias)))
        .collect()
}
