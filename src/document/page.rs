//! In-memory page built from Markdown using pulldown-cmark
//!
//! Stands in for a browser document on the native side: it exposes code
//! blocks to the scanner, collects the scripts a host appends to `<head>`,
//! and plays the engine by marking matched blocks as highlighted.

use std::cell::{Cell, RefCell};

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use pulldown_cmark_escape::escape_html;

use super::{CodeBlock, Document, ReadyState};
use crate::pipeline::HighlightEngine;

/// Class prefix pulldown-cmark puts on fenced blocks with an info string
const MARKDOWN_LANGUAGE_PREFIX: &str = "language-";

#[derive(Debug, Clone)]
struct PageBlock {
    class: Option<String>,
    highlighted: bool,
}

impl PageBlock {
    /// `<pre><code ...>` carrying the class and the highlight marker
    fn open_tag(&self) -> String {
        let mut tag = String::from("<pre><code");
        if let Some(class) = &self.class {
            tag.push_str(" class=\"");
            push_escaped(&mut tag, class);
            tag.push('"');
        }
        if self.highlighted {
            tag.push_str(" data-highlighted=\"yes\"");
        }
        tag.push('>');
        tag
    }
}

#[derive(Debug, Default)]
pub struct Page {
    ready_state: Cell<ReadyState>,
    /// Parsed Markdown; code block boundaries line up with `blocks`
    events: Vec<Event<'static>>,
    blocks: RefCell<Vec<PageBlock>>,
    head_scripts: RefCell<Vec<String>>,
    /// Number of `code_blocks` queries made against this page
    scans: Cell<usize>,
    /// Selector of every highlight pass, in call order
    highlight_passes: RefCell<Vec<String>>,
}

impl Page {
    /// An empty, fully parsed page
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse Markdown, keeping its events for rendering
    ///
    /// Fenced blocks get the class HTML rendering would give them: the first
    /// word of the info string behind `language-`. Indented blocks get none.
    pub fn from_markdown(markdown: &str) -> Self {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;

        let events: Vec<Event<'static>> = Parser::new_ext(markdown, options)
            .map(Event::into_static)
            .collect();

        let blocks: Vec<PageBlock> = events
            .iter()
            .filter_map(|event| match event {
                Event::Start(Tag::CodeBlock(kind)) => Some(PageBlock {
                    class: block_class(kind),
                    highlighted: false,
                }),
                _ => None,
            })
            .collect();

        tracing::debug!(blocks = blocks.len(), "Parsed markdown page");

        Self {
            events,
            blocks: RefCell::new(blocks),
            ..Self::default()
        }
    }

    /// Builder: append a `pre code` block
    pub fn with_block(mut self, class: Option<&str>, code: &str) -> Self {
        self.events.extend([
            Event::Start(Tag::CodeBlock(CodeBlockKind::Indented)),
            Event::Text(CowStr::from(code.to_string())),
            Event::End(TagEnd::CodeBlock),
        ]);
        self.blocks.get_mut().push(PageBlock {
            class: class.map(str::to_string),
            highlighted: false,
        });
        self
    }

    /// Builder: start in the given readiness state
    pub fn with_ready_state(self, state: ReadyState) -> Self {
        self.ready_state.set(state);
        self
    }

    pub fn set_ready_state(&self, state: ReadyState) {
        self.ready_state.set(state);
    }

    /// Append a `<script src>` node to `<head>`
    pub fn append_script(&self, src: &str) {
        self.head_scripts.borrow_mut().push(src.to_string());
    }

    pub fn head_scripts(&self) -> Vec<String> {
        self.head_scripts.borrow().clone()
    }

    pub fn scan_count(&self) -> usize {
        self.scans.get()
    }

    pub fn highlight_passes(&self) -> Vec<String> {
        self.highlight_passes.borrow().clone()
    }

    /// Highlight flag of each block, in document order
    pub fn highlighted(&self) -> Vec<bool> {
        self.blocks.borrow().iter().map(|b| b.highlighted).collect()
    }

    /// Serialize to an HTML document
    pub fn to_html(&self) -> String {
        let scripts: String = self
            .head_scripts
            .borrow()
            .iter()
            .map(|src| {
                let mut tag = String::from("    <script src=\"");
                push_escaped(&mut tag, src);
                tag.push_str("\"></script>\n");
                tag
            })
            .collect();

        let blocks = self.blocks.borrow();
        let mut open_tags = blocks.iter().map(PageBlock::open_tag);
        let events = self.events.iter().cloned().map(|event| match event {
            Event::Start(Tag::CodeBlock(_)) => {
                Event::Html(open_tags.next().unwrap_or_default().into())
            }
            Event::End(TagEnd::CodeBlock) => Event::Html("</code></pre>\n".into()),
            other => other,
        });

        let mut body = String::new();
        html::push_html(&mut body, events);

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
{}</head>
<body>
{}</body>
</html>
"#,
            scripts, body
        )
    }
}

impl Document for Page {
    fn ready_state(&self) -> ReadyState {
        self.ready_state.get()
    }

    fn code_blocks(&self) -> Vec<CodeBlock> {
        self.scans.set(self.scans.get() + 1);
        self.blocks
            .borrow()
            .iter()
            .map(|block| CodeBlock::new(block.class.clone()))
            .collect()
    }
}

impl HighlightEngine for Page {
    /// Marks blocks matched by `selector` as highlighted
    ///
    /// Understands the `[class^="..."]` filter and the
    /// `:not([data-highlighted="yes"])` guard; anything else matches every
    /// block.
    fn highlight_all(&self, selector: &str) {
        let prefix = class_prefix(selector);
        let skip_done = selector.contains(":not([data-highlighted");

        for block in self.blocks.borrow_mut().iter_mut() {
            if skip_done && block.highlighted {
                continue;
            }
            let matches = match prefix {
                Some(prefix) => block
                    .class
                    .as_deref()
                    .is_some_and(|class| class.starts_with(prefix)),
                None => true,
            };
            if matches {
                block.highlighted = true;
            }
        }

        self.highlight_passes.borrow_mut().push(selector.to_string());
    }
}

fn class_prefix(selector: &str) -> Option<&str> {
    const OPEN: &str = "[class^=\"";
    let rest = &selector[selector.find(OPEN)? + OPEN.len()..];
    rest.find('"').map(|end| &rest[..end])
}

fn block_class(kind: &CodeBlockKind) -> Option<String> {
    match kind {
        CodeBlockKind::Fenced(info) => info
            .split(' ')
            .next()
            .filter(|lang| !lang.is_empty())
            .map(|lang| format!("{}{}", MARKDOWN_LANGUAGE_PREFIX, lang)),
        CodeBlockKind::Indented => None,
    }
}

fn push_escaped(out: &mut String, text: &str) {
    // Writing into a String cannot fail
    let _ = escape_html(out, text);
}

#[cfg(test)]
mod tests {
    use super::*;

    const SELECTOR: &str = r#"pre code[class^="language-"]:not([data-highlighted="yes"])"#;

    #[test]
    fn test_from_markdown_code_blocks() {
        let md = "# Title\n\n```rust\nfn main() {}\n```\n\n```go extra words\npackage main\n```\n\n    indented\n\nSome `inline` code.\n";
        let page = Page::from_markdown(md);
        let blocks = page.code_blocks();

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].class(), Some("language-rust"));
        assert_eq!(blocks[1].class(), Some("language-go"));
        assert_eq!(blocks[2].class(), None);
    }

    #[test]
    fn test_fence_without_info_has_no_class() {
        let page = Page::from_markdown("```\nplain\n```\n");
        let blocks = page.code_blocks();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].class(), None);
    }

    #[test]
    fn test_scan_count_tracks_queries() {
        let page = Page::new();
        assert_eq!(page.scan_count(), 0);
        page.code_blocks();
        page.code_blocks();
        assert_eq!(page.scan_count(), 2);
    }

    #[test]
    fn test_highlight_all_respects_class_prefix() {
        let page = Page::new()
            .with_block(Some("language-rust"), "fn main() {}")
            .with_block(None, "plain")
            .with_block(Some("foreign-markup"), "<x/>");

        page.highlight_all(SELECTOR);

        assert_eq!(page.highlighted(), vec![true, false, false]);
        assert_eq!(page.highlight_passes(), vec![SELECTOR.to_string()]);
    }

    #[test]
    fn test_highlight_without_filter_matches_everything() {
        let page = Page::new().with_block(None, "a").with_block(Some("x"), "b");
        page.highlight_all("pre code");
        assert_eq!(page.highlighted(), vec![true, true]);
    }

    #[test]
    fn test_to_html() {
        let page = Page::new().with_block(Some("language-html"), "<p>\"hi\" & bye</p>");
        page.append_script("_ch-highlight.js");
        page.highlight_all(SELECTOR);
        let html = page.to_html();

        assert!(html.contains("<script src=\"_ch-highlight.js\"></script>"));
        assert!(html.contains(
            "<pre><code class=\"language-html\" data-highlighted=\"yes\">&lt;p&gt;\"hi\" &amp; bye&lt;/p&gt;</code></pre>"
        ));
    }

    #[test]
    fn test_to_html_keeps_prose() {
        let md = "# Title\n\nSome *important* prose.\n\n- item\n\n```rust\nfn main() {}\n```\n\nAfter.\n";
        let page = Page::from_markdown(md);
        page.highlight_all(SELECTOR);
        let html = page.to_html();

        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<p>Some <em>important</em> prose.</p>"));
        assert!(html.contains("<li>item</li>"));
        assert!(html.contains(
            "<pre><code class=\"language-rust\" data-highlighted=\"yes\">fn main() {}\n</code></pre>"
        ));
        assert!(html.find("Title") < html.find("fn main") && html.find("fn main") < html.find("After."));
    }

    #[test]
    fn test_to_html_escapes_class_attribute() {
        let page = Page::new().with_block(Some("a\"b<c"), "x");
        let html = page.to_html();
        assert!(html.contains("<pre><code class=\"a&quot;b&lt;c\">x</code></pre>"));
    }

    #[test]
    fn test_class_prefix() {
        assert_eq!(class_prefix(SELECTOR), Some("language-"));
        assert_eq!(class_prefix("pre code"), None);
    }
}
