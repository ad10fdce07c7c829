//! Browser backend: the real DOM, `<script>` injection and the global `hljs`
//!
//! [`install`] wires both invocation timings: an immediate run and a
//! `DOMContentLoaded` handler that performs the run deferred by the first one
//! when the page was still parsing.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::{FutureExt, LocalBoxFuture};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlScriptElement};

use crate::config::LoaderConfig;
use crate::document::{CodeBlock, Document, ReadyState};
use crate::loader::{LoadError, ScriptHost};
use crate::pipeline::{HighlightEngine, Orchestrator, PipelineError};

fn current_document() -> Result<web_sys::Document, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

pub struct BrowserDocument {
    document: web_sys::Document,
}

impl BrowserDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }
}

impl Document for BrowserDocument {
    fn ready_state(&self) -> ReadyState {
        match self.document.ready_state().as_str() {
            "loading" => ReadyState::Loading,
            "interactive" => ReadyState::Interactive,
            _ => ReadyState::Complete,
        }
    }

    fn code_blocks(&self) -> Vec<CodeBlock> {
        let nodes = match self.document.query_selector_all("pre code") {
            Ok(nodes) => nodes,
            Err(err) => {
                web_sys::console::warn_1(&err);
                return Vec::new();
            }
        };
        (0..nodes.length())
            .filter_map(|idx| nodes.item(idx))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| CodeBlock::new(element.get_attribute("class")))
            .collect()
    }
}

/// Loads scripts by appending `<script>` elements to `<head>`
pub struct BrowserScriptHost {
    document: web_sys::Document,
}

/// The load and error listeners of one pending `<script>`
///
/// Only one of them ever fires. Dropping this detaches both, so neither
/// closure outlives the load.
struct ScriptListeners {
    script: HtmlScriptElement,
    on_load: Closure<dyn FnMut()>,
    on_error: Closure<dyn FnMut()>,
}

impl Drop for ScriptListeners {
    fn drop(&mut self) {
        let _ = self
            .script
            .remove_event_listener_with_callback("load", self.on_load.as_ref().unchecked_ref());
        let _ = self
            .script
            .remove_event_listener_with_callback("error", self.on_error.as_ref().unchecked_ref());
    }
}

type LoadReceiver = oneshot::Receiver<Result<(), LoadError>>;

impl BrowserScriptHost {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// Append the element and return a receiver settled by its load/error event
    fn append_script(&self, url: &str) -> Result<(LoadReceiver, ScriptListeners), JsValue> {
        let script: HtmlScriptElement = self.document.create_element("script")?.dyn_into()?;
        script.set_src(url);
        script.set_type("text/javascript");
        // Dynamically inserted scripts default to async; keep them in order
        script.set_async(false);

        let (sender, receiver) = oneshot::channel();
        let sender = Rc::new(RefCell::new(Some(sender)));

        let on_load: Closure<dyn FnMut()> = {
            let sender = sender.clone();
            Closure::once(move || {
                if let Some(sender) = sender.borrow_mut().take() {
                    let _ = sender.send(Ok(()));
                }
            })
        };
        let on_error: Closure<dyn FnMut()> = {
            let url = url.to_string();
            Closure::once(move || {
                if let Some(sender) = sender.borrow_mut().take() {
                    let _ = sender.send(Err(LoadError::Transport {
                        url,
                        reason: "script error event".to_string(),
                    }));
                }
            })
        };
        script.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;
        script.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())?;
        let listeners = ScriptListeners {
            script: script.clone(),
            on_load,
            on_error,
        };

        let head = self
            .document
            .head()
            .ok_or_else(|| JsValue::from_str("no head"))?;
        head.append_child(&script)?;
        Ok((receiver, listeners))
    }
}

impl ScriptHost for BrowserScriptHost {
    fn load_script(&self, url: &str) -> LocalBoxFuture<'_, Result<(), LoadError>> {
        let url = url.to_string();
        async move {
            let (receiver, listeners) =
                self.append_script(&url).map_err(|err| LoadError::Transport {
                    url: url.clone(),
                    reason: describe(&err),
                })?;
            let result = receiver.await.unwrap_or_else(|_| {
                Err(LoadError::Transport {
                    url,
                    reason: "script listener dropped".to_string(),
                })
            });
            drop(listeners);
            result
        }
        .boxed_local()
    }
}

/// The `hljs` object the engine script defines on the global scope
pub struct GlobalHljs;

impl GlobalHljs {
    fn call(selector: &str) -> Result<(), JsValue> {
        let hljs = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("hljs"))?;
        if hljs.is_undefined() {
            return Err(JsValue::from_str("hljs is not defined"));
        }

        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"cssSelector".into(), &selector.into())?;

        let configure: js_sys::Function =
            js_sys::Reflect::get(&hljs, &"configure".into())?.dyn_into()?;
        configure.call1(&hljs, &options)?;

        let highlight_all: js_sys::Function =
            js_sys::Reflect::get(&hljs, &"highlightAll".into())?.dyn_into()?;
        highlight_all.call0(&hljs)?;
        Ok(())
    }
}

impl HighlightEngine for GlobalHljs {
    fn highlight_all(&self, selector: &str) {
        if let Err(err) = Self::call(selector) {
            web_sys::console::warn_1(&err);
        }
    }
}

fn report(err: &PipelineError) {
    web_sys::console::error_1(&JsValue::from_str(&format!("[hljs-loader] {}", err)));
}

/// Run the loader with default settings
#[wasm_bindgen]
pub fn install() -> Result<(), JsValue> {
    install_with(LoaderConfig::default())
}

/// Run the loader with settings given as a JSON object
#[wasm_bindgen(js_name = installWithConfig)]
pub fn install_with_config(config_json: &str) -> Result<(), JsValue> {
    let config: LoaderConfig = serde_json::from_str(config_json)
        .map_err(|e| JsValue::from_str(&format!("invalid config: {}", e)))?;
    config.validate().map_err(|e| JsValue::from_str(&e))?;
    install_with(config)
}

/// Start the pipeline now and again on `DOMContentLoaded`
///
/// The second run only happens if the first found the page still loading.
pub fn install_with(config: LoaderConfig) -> Result<(), JsValue> {
    let document = current_document()?;
    let orchestrator = Rc::new(Orchestrator::new(
        BrowserDocument::new(document.clone()),
        BrowserScriptHost::new(document.clone()),
        GlobalHljs,
        &config,
    ));

    let on_ready = {
        let orchestrator = orchestrator.clone();
        Closure::once_into_js(move || {
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = orchestrator.on_ready().await {
                    report(&err);
                }
            });
        })
    };
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;

    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = orchestrator.invoke().await {
            report(&err);
        }
    });
    Ok(())
}
