use std::path::Path;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use futures::executor::block_on;
use serde_json::json;

use hljs_loader::assets::{
    append_import_statements, delete_import_statements, sync_assets, MediaAssetManager,
    ASSET_PREFIX, BOOTSTRAP_SCRIPT, CLASS_NAME, GUARD,
};
use hljs_loader::cli::{CliArgs, Command};
use hljs_loader::config_paths;
use hljs_loader::language::{available_languages, Catalog};
use hljs_loader::media::{list_files_with_prefix, MediaDirHost};
use hljs_loader::{find_used_languages, LoaderConfig, Orchestrator, Page, PipelineOutcome};

fn main() -> Result<()> {
    hljs_loader::tracing::init();

    let args = CliArgs::parse();
    let config = match &args.config {
        Some(path) => LoaderConfig::load_from(path),
        None => LoaderConfig::load(),
    };

    match args.command {
        Command::Scan { file } => scan(&file, &config),
        Command::Languages { file } => languages(file.as_deref()),
        Command::Run { file, media, html } => run(&file, &media, html.as_deref(), &config),
        Command::Sync {
            assets,
            media,
            template,
            force,
        } => sync(&assets, &media, template.as_deref(), force),
        Command::Init { force } => init(args.config.as_deref(), force),
    }
}

fn read_page(file: &Path) -> Result<Page> {
    let markdown = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    Ok(Page::from_markdown(&markdown))
}

fn scan(file: &Path, config: &LoaderConfig) -> Result<()> {
    let page = read_page(file)?;
    let locator = config.locator();
    let catalog = Catalog::builtin();

    for language in &find_used_languages(&page, &config.language_prefix) {
        let line = json!({
            "language": language,
            "url": locator.resolve_bundle_location(language),
            "known": catalog.supports(language.as_str()),
        });
        println!("{}", line);
    }
    Ok(())
}

fn languages(file: Option<&Path>) -> Result<()> {
    let catalog = match file {
        Some(path) => {
            let input = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Catalog::from_json_lines(&input)
                .with_context(|| format!("Failed to parse language table {}", path.display()))?
        }
        None => Catalog::builtin(),
    };

    for language in catalog.languages() {
        println!("{}", serde_json::to_string(language)?);
    }
    Ok(())
}

fn run(file: &Path, media: &Path, html: Option<&Path>, config: &LoaderConfig) -> Result<()> {
    let page = Rc::new(read_page(file)?);

    let media_files = list_files_with_prefix(media, ASSET_PREFIX)
        .with_context(|| format!("Failed to list media directory {}", media.display()))?;
    let available = available_languages(&media_files);
    for language in &find_used_languages(&page, &config.language_prefix) {
        if !available.contains(language) {
            tracing::info!(%language, "No bundle for language in media directory");
        }
    }

    let host = MediaDirHost::new(media, page.clone());
    let orchestrator = Orchestrator::new(page.clone(), host, page.clone(), config);

    // Same two calls a page makes: immediately, then on the ready signal
    let outcome = block_on(async {
        let outcome = orchestrator.invoke().await?;
        let deferred = orchestrator.on_ready().await?;
        Ok::<PipelineOutcome, hljs_loader::PipelineError>(deferred.unwrap_or(outcome))
    })
    .context("Highlight pipeline failed")?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if let Some(html_path) = html {
        std::fs::write(html_path, page.to_html())
            .with_context(|| format!("Failed to write {}", html_path.display()))?;
        tracing::info!("Wrote page to {}", html_path.display());
    }
    Ok(())
}

fn sync(assets: &Path, media: &Path, template: Option<&Path>, force: bool) -> Result<()> {
    let mut manager = MediaAssetManager::new(assets, media);
    let newer = force || manager.is_outdated();
    let reinstalled = sync_assets(newer, &mut manager).context("Failed to sync assets")?;

    let template_updated = match template {
        Some(path) => {
            let current = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read template {}", path.display()))?;
            let css_assets: Vec<String> = list_files_with_prefix(media, ASSET_PREFIX)?
                .into_iter()
                .filter(|name| name.ends_with(".css"))
                .collect();
            let css_refs: Vec<&str> = css_assets.iter().map(String::as_str).collect();

            let updated = append_import_statements(
                &css_refs,
                &[BOOTSTRAP_SCRIPT],
                GUARD,
                CLASS_NAME,
                &delete_import_statements(GUARD, &current),
            );
            let changed = updated != current;
            if changed {
                std::fs::write(path, &updated)
                    .with_context(|| format!("Failed to write template {}", path.display()))?;
            }
            changed
        }
        None => false,
    };

    println!(
        "{}",
        json!({ "reinstalled": reinstalled, "template_updated": template_updated })
    );
    Ok(())
}

fn init(path: Option<&Path>, force: bool) -> Result<()> {
    let target = match path {
        Some(path) => path.to_path_buf(),
        None => config_paths::config_file().context("No config directory available")?,
    };
    if target.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", target.display());
    }

    let defaults = LoaderConfig::default();
    match path {
        Some(path) => defaults.save_to(path),
        None => defaults.save(),
    }
    .map_err(anyhow::Error::msg)?;

    println!("{}", target.display());
    Ok(())
}
