//! Highlight pipeline: readiness gating, engine load, bundle fan-out
//!
//! ## Architecture
//!
//! ```text
//! invoke() ── document loading? ──yes──→ gate.request() → Deferred
//!    │                                         │
//!    no                         on_ready() ── gate.take()?
//!    ↓                                         │ yes
//! run(): scan → empty? → Done ←────────────────┘
//!          ↓ no
//!        load engine → load_bundles (settle all) → highlight_all → Done
//! ```
//!
//! Everything runs on one thread; the only suspension points are script
//! loads. Bundle failures are reported, never propagated. An engine failure
//! ends the run without highlighting, since nothing can recover from it.

use std::cell::Cell;
use std::rc::Rc;

use serde::Serialize;

use crate::config::LoaderConfig;
use crate::document::Document;
use crate::language::{BundleLocator, LanguageSet};
use crate::loader::{load_bundles, BundleReport, BundleRequest, LoadError, ScriptHost};
use crate::scanner::find_used_languages;

/// The shared highlighting engine's highlight-everything entry point
pub trait HighlightEngine {
    fn highlight_all(&self, selector: &str);
}

impl<T: HighlightEngine + ?Sized> HighlightEngine for Rc<T> {
    fn highlight_all(&self, selector: &str) {
        (**self).highlight_all(selector)
    }
}

impl<T: HighlightEngine + ?Sized> HighlightEngine for &T {
    fn highlight_all(&self, selector: &str) {
        (**self).highlight_all(selector)
    }
}

/// Bridges an early invocation to the later document-ready signal
///
/// Set when the pipeline is invoked too early, consumed by the ready
/// handler. Consuming clears it, so a deferred run happens at most once.
#[derive(Debug, Default)]
pub struct ReadinessGate {
    wants_highlight: Cell<bool>,
}

impl ReadinessGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wants_highlight(&self) -> bool {
        self.wants_highlight.get()
    }

    fn request(&self) {
        self.wants_highlight.set(true);
    }

    /// Returns whether a run was deferred, clearing the request
    pub fn take(&self) -> bool {
        self.wants_highlight.replace(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    #[default]
    Idle,
    Deferred,
    Running,
    Done,
}

/// What a finished run loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightReport {
    pub languages: LanguageSet,
    pub bundles: Vec<BundleReport>,
}

impl HighlightReport {
    pub fn failed(&self) -> impl Iterator<Item = &BundleReport> {
        self.bundles.iter().filter(|b| !b.outcome.is_loaded())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PipelineOutcome {
    /// Document still loading; the ready signal will run the pipeline
    Deferred,
    /// No code block names a language; nothing was fetched
    NothingToHighlight,
    Highlighted(HighlightReport),
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("highlighting engine {url} failed to load")]
    EngineUnavailable {
        url: String,
        #[source]
        source: LoadError,
    },
}

/// Drives one highlight pass over a document
pub struct Orchestrator<D, H, E> {
    document: D,
    host: H,
    engine: E,
    locator: BundleLocator,
    language_prefix: String,
    selector: String,
    gate: ReadinessGate,
    state: Cell<PipelineState>,
}

impl<D, H, E> Orchestrator<D, H, E>
where
    D: Document,
    H: ScriptHost,
    E: HighlightEngine,
{
    pub fn new(document: D, host: H, engine: E, config: &LoaderConfig) -> Self {
        Self {
            document,
            host,
            engine,
            locator: config.locator(),
            language_prefix: config.language_prefix.clone(),
            selector: config.selector.clone(),
            gate: ReadinessGate::new(),
            state: Cell::new(PipelineState::Idle),
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state.get()
    }

    pub fn gate(&self) -> &ReadinessGate {
        &self.gate
    }

    /// Entry point: run now, or defer if the document is still loading
    ///
    /// A deferred call touches nothing but the gate.
    pub async fn invoke(&self) -> Result<PipelineOutcome, PipelineError> {
        if self.document.ready_state().is_loading() {
            self.gate.request();
            self.state.set(PipelineState::Deferred);
            tracing::debug!("Document still loading, deferring highlight");
            return Ok(PipelineOutcome::Deferred);
        }
        self.run().await
    }

    /// Document-ready handler: run the deferred pass, if one was requested
    ///
    /// Returns `None` when no invocation was deferred.
    pub async fn on_ready(&self) -> Result<Option<PipelineOutcome>, PipelineError> {
        if !self.gate.take() {
            tracing::debug!("Ready signal without a deferred highlight");
            return Ok(None);
        }
        self.run().await.map(Some)
    }

    async fn run(&self) -> Result<PipelineOutcome, PipelineError> {
        self.state.set(PipelineState::Running);

        let languages = find_used_languages(&self.document, &self.language_prefix);
        if languages.is_empty() {
            self.state.set(PipelineState::Done);
            tracing::debug!("No highlightable code blocks");
            return Ok(PipelineOutcome::NothingToHighlight);
        }

        // Bundles register against the engine, so it must be fully loaded first
        let engine_url = self.locator.engine_url();
        if let Err(source) = self.host.load_script(engine_url).await {
            tracing::error!(url = engine_url, error = %source, "Highlighting engine failed to load");
            return Err(PipelineError::EngineUnavailable {
                url: engine_url.to_string(),
                source,
            });
        }

        let requests: Vec<BundleRequest> = languages
            .iter()
            .map(|language| BundleRequest {
                language: language.clone(),
                url: self.locator.resolve_bundle_location(language),
            })
            .collect();
        let bundles = load_bundles(&self.host, &requests).await;

        self.engine.highlight_all(&self.selector);
        self.state.set(PipelineState::Done);

        let report = HighlightReport { languages, bundles };
        tracing::info!(
            languages = report.languages.len(),
            failed = report.failed().count(),
            "Highlighted code blocks"
        );
        Ok(PipelineOutcome::Highlighted(report))
    }
}
