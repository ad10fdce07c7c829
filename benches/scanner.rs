//! Benchmarks for document scanning and bundle resolution
//!
//! Run with: cargo bench scanner

use hljs_loader::language::Catalog;
use hljs_loader::{find_used_languages, LanguageId, LoaderConfig, Page};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

const LANGUAGES: [&str; 8] = ["rust", "go", "python", "html", "sql", "bash", "json", "yaml"];

fn page_with_blocks(count: usize) -> Page {
    (0..count).fold(Page::new(), |page, idx| {
        let class = (idx % 5 != 0).then(|| format!("language-{}", LANGUAGES[idx % LANGUAGES.len()]));
        page.with_block(class.as_deref(), "let x = 1;")
    })
}

fn markdown_with_blocks(count: usize) -> String {
    (0..count)
        .map(|idx| {
            format!(
                "Paragraph {}.\n\n```{}\nlet x = {};\n```\n\n",
                idx,
                LANGUAGES[idx % LANGUAGES.len()],
                idx
            )
        })
        .collect()
}

// ============================================================================
// Scanning
// ============================================================================

#[divan::bench(args = [10, 100, 1_000])]
fn scan_code_blocks(bencher: divan::Bencher, block_count: usize) {
    let page = page_with_blocks(block_count);
    bencher.bench_local(|| find_used_languages(divan::black_box(&page), "language-"));
}

#[divan::bench(args = [10, 100, 1_000])]
fn render_markdown_page(bencher: divan::Bencher, block_count: usize) {
    let markdown = markdown_with_blocks(block_count);
    bencher.bench_local(|| Page::from_markdown(divan::black_box(&markdown)));
}

// ============================================================================
// Resolution
// ============================================================================

#[divan::bench]
fn resolve_builtin_catalog(bencher: divan::Bencher) {
    let catalog = Catalog::builtin();
    let locator = LoaderConfig::default().locator();
    bencher.bench_local(|| {
        catalog
            .languages()
            .iter()
            .map(|language| locator.resolve_bundle_location(&language.alias))
            .collect::<Vec<_>>()
    });
}

#[divan::bench]
fn build_builtin_catalog() -> Catalog {
    Catalog::builtin()
}

#[divan::bench]
fn language_id_from_str() -> Vec<LanguageId> {
    LANGUAGES.iter().map(|l| LanguageId::from(*l)).collect()
}
