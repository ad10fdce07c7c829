//! Read-only view of the host document
//!
//! The pipeline only needs two things from a document: how far parsing has
//! progressed, and the class attribute of every `pre code` node.

mod page;

pub use page::Page;

use std::rc::Rc;

use crate::language::LanguageId;

/// The document's parsing progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReadyState {
    Loading,
    Interactive,
    #[default]
    Complete,
}

impl ReadyState {
    /// Still parsing: code blocks further down may not exist yet
    pub fn is_loading(self) -> bool {
        matches!(self, ReadyState::Loading)
    }
}

/// One `pre code` node
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeBlock {
    class: Option<String>,
}

impl CodeBlock {
    pub fn new(class: Option<String>) -> Self {
        Self { class }
    }

    pub fn with_class(class: impl Into<String>) -> Self {
        Self::new(Some(class.into()))
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    /// The id after the first `<prefix><id>` class token
    ///
    /// A bare prefix token (`language-` with nothing after it) names no
    /// language and is skipped.
    pub fn language(&self, prefix: &str) -> Option<LanguageId> {
        self.class
            .as_deref()?
            .split_whitespace()
            .filter_map(|token| token.strip_prefix(prefix))
            .find(|id| !id.is_empty())
            .map(LanguageId::from)
    }
}

/// A document the scanner can query
pub trait Document {
    fn ready_state(&self) -> ReadyState;

    /// Every code block nested in a preformatted block, in document order
    fn code_blocks(&self) -> Vec<CodeBlock>;
}

impl<T: Document + ?Sized> Document for Rc<T> {
    fn ready_state(&self) -> ReadyState {
        (**self).ready_state()
    }

    fn code_blocks(&self) -> Vec<CodeBlock> {
        (**self).code_blocks()
    }
}

impl<T: Document + ?Sized> Document for &T {
    fn ready_state(&self) -> ReadyState {
        (**self).ready_state()
    }

    fn code_blocks(&self) -> Vec<CodeBlock> {
        (**self).code_blocks()
    }
}
