//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::{FutureExt, LocalBoxFuture};

use hljs_loader::{HighlightEngine, LoadError, ScriptHost};

pub const ENGINE_URL: &str = "_ch-highlight.js";

/// Ordered record of everything the fakes saw
#[derive(Debug, Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<String>>>);

impl EventLog {
    pub fn push(&self, event: impl Into<String>) {
        self.0.borrow_mut().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn position(&self, event: &str) -> Option<usize> {
        self.0.borrow().iter().position(|e| e == event)
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.0.borrow().iter().filter(|e| e.starts_with(prefix)).count()
    }
}

/// Script host whose loads settle immediately, or only when the test says so
///
/// Logs `load <url>` when a script is requested and `settled <url>` when its
/// future completes.
pub struct FakeHost {
    log: EventLog,
    failing: Vec<String>,
    manual: bool,
    pending: RefCell<Vec<(String, oneshot::Sender<Result<(), LoadError>>)>>,
}

impl FakeHost {
    /// Every load succeeds right away
    pub fn immediate(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            failing: Vec::new(),
            manual: false,
            pending: RefCell::new(Vec::new()),
        }
    }

    /// Loads stay pending until [`settle`](Self::settle) is called
    pub fn manual(log: &EventLog) -> Self {
        Self {
            manual: true,
            ..Self::immediate(log)
        }
    }

    /// Immediate loads of `url` fail with `NotFound`
    pub fn failing(mut self, url: &str) -> Self {
        self.failing.push(url.to_string());
        self
    }

    /// URLs currently waiting to settle, in request order
    pub fn pending(&self) -> Vec<String> {
        self.pending.borrow().iter().map(|(url, _)| url.clone()).collect()
    }

    /// Settle a pending load; returns false if `url` was not pending
    pub fn settle(&self, url: &str, ok: bool) -> bool {
        let mut pending = self.pending.borrow_mut();
        let Some(idx) = pending.iter().position(|(pending_url, _)| pending_url == url) else {
            return false;
        };
        let (url, sender) = pending.remove(idx);
        let result = if ok {
            Ok(())
        } else {
            Err(LoadError::NotFound { url })
        };
        sender.send(result).is_ok()
    }
}

impl ScriptHost for FakeHost {
    fn load_script(&self, url: &str) -> LocalBoxFuture<'_, Result<(), LoadError>> {
        self.log.push(format!("load {}", url));
        let url = url.to_string();

        if self.manual {
            let (sender, receiver) = oneshot::channel();
            self.pending.borrow_mut().push((url.clone(), sender));
            return async move {
                let result = receiver.await.unwrap_or_else(|_| {
                    Err(LoadError::Transport {
                        url: url.clone(),
                        reason: "dropped".to_string(),
                    })
                });
                self.log.push(format!("settled {}", url));
                result
            }
            .boxed_local();
        }

        let result = if self.failing.contains(&url) {
            Err(LoadError::NotFound { url: url.clone() })
        } else {
            Ok(())
        };
        async move {
            self.log.push(format!("settled {}", url));
            result
        }
        .boxed_local()
    }
}

/// Engine that only records its highlight passes
pub struct FakeEngine {
    log: EventLog,
}

impl FakeEngine {
    pub fn new(log: &EventLog) -> Self {
        Self { log: log.clone() }
    }
}

impl HighlightEngine for FakeEngine {
    fn highlight_all(&self, selector: &str) {
        self.log.push(format!("highlight {}", selector));
    }
}

pub fn bundle_url(lang: &str) -> String {
    format!("_ch-hljs-lang-{}.min.js", lang)
}
