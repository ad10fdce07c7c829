//! Finds the languages a document's code blocks ask for

use crate::document::Document;
use crate::language::LanguageSet;

/// Class prefix marking a code block's language, e.g. `language-rust`
pub const LANGUAGE_PREFIX: &str = "language-";

/// Deduplicated languages declared by the document's `pre code` blocks
///
/// Reads the document on every call; nothing is cached. Blocks without a
/// `<prefix><id>` class contribute nothing.
pub fn find_used_languages<D>(document: &D, prefix: &str) -> LanguageSet
where
    D: Document + ?Sized,
{
    let blocks = document.code_blocks();
    if blocks.is_empty() {
        return LanguageSet::new();
    }

    let languages: LanguageSet = blocks
        .iter()
        .filter_map(|block| block.language(prefix))
        .collect();

    tracing::debug!(
        blocks = blocks.len(),
        languages = languages.len(),
        "Scanned code blocks"
    );
    languages
}
