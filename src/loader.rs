//! Script loading and the settle-all bundle fan-out
//!
//! A [`ScriptHost`] makes one script available process-wide (in a browser,
//! by appending a `<script>` to `<head>`). [`load_bundles`] issues every
//! language bundle at once and waits for all of them, whatever each outcome.

use std::rc::Rc;

use futures::future::{join_all, LocalBoxFuture};
use serde::Serialize;

use crate::language::LanguageId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("script {url} not found")]
    NotFound { url: String },
    #[error("failed to load script {url}: {reason}")]
    Transport { url: String, reason: String },
}

impl LoadError {
    pub fn url(&self) -> &str {
        match self {
            LoadError::NotFound { url } | LoadError::Transport { url, .. } => url,
        }
    }
}

/// Loads and runs a script in the shared execution environment
pub trait ScriptHost {
    /// Resolves once the script has executed, fails on transport or
    /// execution errors
    fn load_script(&self, url: &str) -> LocalBoxFuture<'_, Result<(), LoadError>>;
}

impl<T: ScriptHost + ?Sized> ScriptHost for Rc<T> {
    fn load_script(&self, url: &str) -> LocalBoxFuture<'_, Result<(), LoadError>> {
        (**self).load_script(url)
    }
}

impl<T: ScriptHost + ?Sized> ScriptHost for &T {
    fn load_script(&self, url: &str) -> LocalBoxFuture<'_, Result<(), LoadError>> {
        (**self).load_script(url)
    }
}

/// A language bundle to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleRequest {
    pub language: LanguageId,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BundleLoadOutcome {
    Loaded,
    Failed { reason: String },
}

impl BundleLoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, BundleLoadOutcome::Loaded)
    }
}

impl From<Result<(), LoadError>> for BundleLoadOutcome {
    fn from(result: Result<(), LoadError>) -> Self {
        match result {
            Ok(()) => BundleLoadOutcome::Loaded,
            Err(err) => BundleLoadOutcome::Failed {
                reason: err.to_string(),
            },
        }
    }
}

/// Settled outcome for one requested language
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleReport {
    pub language: LanguageId,
    pub url: String,
    #[serde(flatten)]
    pub outcome: BundleLoadOutcome,
}

/// Load every bundle concurrently and wait for all of them to settle
///
/// Each distinct URL is requested once, in first-appearance order; languages
/// sharing a bundle share its outcome. A failure never cancels or delays the
/// other loads. Reports come back in request order.
pub async fn load_bundles<H>(host: &H, requests: &[BundleRequest]) -> Vec<BundleReport>
where
    H: ScriptHost + ?Sized,
{
    let mut urls: Vec<&str> = Vec::new();
    let slots: Vec<usize> = requests
        .iter()
        .map(|request| match urls.iter().position(|url| *url == request.url) {
            Some(idx) => idx,
            None => {
                urls.push(&request.url);
                urls.len() - 1
            }
        })
        .collect();

    let settled = join_all(urls.iter().map(|url| async move {
        let result = host.load_script(url).await;
        match &result {
            Ok(()) => tracing::debug!(url, "Bundle loaded"),
            Err(err) => tracing::warn!(url, error = %err, "Bundle failed to load"),
        }
        BundleLoadOutcome::from(result)
    }))
    .await;

    requests
        .iter()
        .zip(slots)
        .map(|(request, slot)| BundleReport {
            language: request.language.clone(),
            url: request.url.clone(),
            outcome: settled[slot].clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future::FutureExt;
    use std::cell::RefCell;

    /// Fails URLs containing "bad", records every request
    #[derive(Default)]
    struct RecordingHost {
        requested: RefCell<Vec<String>>,
    }

    impl ScriptHost for RecordingHost {
        fn load_script(&self, url: &str) -> LocalBoxFuture<'_, Result<(), LoadError>> {
            self.requested.borrow_mut().push(url.to_string());
            let url = url.to_string();
            async move {
                if url.contains("bad") {
                    Err(LoadError::NotFound { url })
                } else {
                    Ok(())
                }
            }
            .boxed_local()
        }
    }

    fn request(lang: &str, url: &str) -> BundleRequest {
        BundleRequest {
            language: LanguageId::from(lang),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_failure_does_not_stop_siblings() {
        let host = RecordingHost::default();
        let reports = block_on(load_bundles(
            &host,
            &[
                request("rust", "rust.js"),
                request("nope", "bad.js"),
                request("go", "go.js"),
            ],
        ));

        assert_eq!(reports.len(), 3);
        assert!(reports[0].outcome.is_loaded());
        assert_eq!(
            reports[1].outcome,
            BundleLoadOutcome::Failed {
                reason: "script bad.js not found".to_string()
            }
        );
        assert!(reports[2].outcome.is_loaded());
        assert_eq!(*host.requested.borrow(), vec!["rust.js", "bad.js", "go.js"]);
    }

    #[test]
    fn test_shared_bundle_requested_once() {
        let host = RecordingHost::default();
        let reports = block_on(load_bundles(
            &host,
            &[request("html", "xml.js"), request("xml", "xml.js")],
        ));

        assert_eq!(*host.requested.borrow(), vec!["xml.js"]);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].language.as_str(), "html");
        assert_eq!(reports[1].language.as_str(), "xml");
        assert!(reports.iter().all(|r| r.outcome.is_loaded()));
    }

    #[test]
    fn test_no_requests() {
        let host = RecordingHost::default();
        let reports = block_on(load_bundles(&host, &[]));
        assert!(reports.is_empty());
        assert!(host.requested.borrow().is_empty());
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let report = BundleReport {
            language: LanguageId::from("go"),
            url: "go.js".to_string(),
            outcome: BundleLoadOutcome::Failed {
                reason: "boom".to_string(),
            },
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["language"], "go");
        assert_eq!(json["status"], "failed");
        assert_eq!(json["reason"], "boom");
    }
}
