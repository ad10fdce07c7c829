//! hljs-loader - on-demand highlight.js language loading
//!
//! Scans a document for `pre code` blocks, loads the highlighting engine and
//! only the language bundles those blocks declare, then runs one highlight
//! pass once every bundle has settled. Works against any [`Document`],
//! [`ScriptHost`] and [`HighlightEngine`]; the `web` feature provides the
//! browser implementations.

pub mod assets;
pub mod cli;
pub mod config;
pub mod config_paths;
pub mod document;
pub mod language;
pub mod loader;
pub mod media;
pub mod pipeline;
pub mod scanner;
pub mod tracing;
#[cfg(feature = "web")]
pub mod web;

// Re-export commonly used types
pub use config::LoaderConfig;
pub use document::{CodeBlock, Document, Page, ReadyState};
pub use language::{LanguageId, LanguageSet};
pub use loader::{BundleLoadOutcome, LoadError, ScriptHost};
pub use pipeline::{HighlightEngine, Orchestrator, PipelineError, PipelineOutcome};
pub use scanner::find_used_languages;
