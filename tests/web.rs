//! Browser backend tests
//!
//! Run with: wasm-pack test --headless --firefox -- --features web

#![cfg(all(feature = "web", target_arch = "wasm32"))]

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

use hljs_loader::web::{install_with, BrowserDocument, BrowserScriptHost};
use hljs_loader::{Document, LoadError, LoaderConfig, ReadyState, ScriptHost};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn global(name: &str) -> JsValue {
    js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str(name)).unwrap()
}

fn script_url(body: &str) -> String {
    format!("data:text/javascript,{}", body)
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn head_script(src: &str) -> Option<web_sys::HtmlScriptElement> {
    let scripts = document().head().unwrap().get_elements_by_tag_name("script");
    (0..scripts.length())
        .filter_map(|idx| scripts.item(idx))
        .filter_map(|element| element.dyn_into::<web_sys::HtmlScriptElement>().ok())
        .find(|script| script.get_attribute("src").as_deref() == Some(src))
}

#[wasm_bindgen_test]
async fn test_load_script_runs_after_appending_to_head() {
    let host = BrowserScriptHost::new(document());
    let url = script_url("window.__hljsLoaderLoaded = 1;");

    host.load_script(&url).await.unwrap();

    assert_eq!(global("__hljsLoaderLoaded").as_f64(), Some(1.0));
    let script = head_script(&url).expect("script appended to head");
    assert!(!script.async_());
}

#[wasm_bindgen_test]
async fn test_load_script_missing_url_fails() {
    let host = BrowserScriptHost::new(document());

    let err = host
        .load_script("/_ch-hljs-lang-does-not-exist.min.js")
        .await
        .unwrap_err();

    assert!(matches!(err, LoadError::Transport { .. }));
    assert!(err.url().ends_with("does-not-exist.min.js"));
}

#[wasm_bindgen_test]
fn test_browser_document_reads_code_blocks() {
    let body = document().body().unwrap();
    body.set_inner_html(
        r#"<pre><code class="language-rust">fn main() {}</code></pre><pre><code>plain</code></pre>"#,
    );
    let browser = BrowserDocument::new(document());

    assert_eq!(browser.ready_state(), ReadyState::Complete);
    let blocks = browser.code_blocks();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].class(), Some("language-rust"));
    assert_eq!(blocks[1].class(), None);
}

#[wasm_bindgen_test]
async fn test_install_highlights_once_after_bundles() {
    document()
        .body()
        .unwrap()
        .set_inner_html(r#"<pre><code class="language-zig">const x = 1;</code></pre>"#);

    let config = LoaderConfig {
        base_engine_url: script_url(
            "window.hljs = { configure(o) { window.__hljsSelector = o.cssSelector; }, \
             highlightAll() { window.__hljsPasses = (window.__hljsPasses || 0) + 1; \
             window.__hljsSawBundle = window.__hljsBundle_zig === 1; } };",
        ),
        bundle_url_template: script_url("window.__hljsBundle_{lang} = 1;"),
        ..LoaderConfig::default()
    };
    let selector = config.selector.clone();

    install_with(config).unwrap();
    for _ in 0..100 {
        if !global("__hljsPasses").is_undefined() {
            break;
        }
        sleep(20).await;
    }
    // A ready signal after the immediate run must not start another pass
    let event = web_sys::Event::new("DOMContentLoaded").unwrap();
    document().dispatch_event(&event).unwrap();
    sleep(100).await;

    assert_eq!(global("__hljsPasses").as_f64(), Some(1.0));
    assert_eq!(global("__hljsSawBundle").as_bool(), Some(true));
    assert_eq!(global("__hljsSelector").as_string(), Some(selector));
}
