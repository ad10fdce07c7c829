//! Installing the loader's assets next to the pages that use them
//!
//! Asset files share a name prefix (`_ch-`) so they can be found and removed
//! as a group. A version file among them decides whether an installed copy is
//! stale. Page templates import the assets inside a guarded block of HTML
//! comments so the block can be replaced or removed later.

use std::io;
use std::path::{Path, PathBuf};

use crate::media::list_files_with_prefix;

/// Prefix shared by every file this tool installs
pub const ASSET_PREFIX: &str = "_ch-";
/// Asset holding the integer version of the bundled asset set
pub const VERSION_ASSET: &str = "_ch-asset-version.txt";
/// Guard text of the import block in page templates
pub const GUARD: &str = "hljs-loader";
/// Class put on every imported element
pub const CLASS_NAME: &str = "hljs-loader";
/// Inline script that fetches the wasm loader and starts it
///
/// A dynamic import works from a classic `<script>`, so templates need no
/// `type="module"`.
pub const BOOTSTRAP_SCRIPT: &str = "import(\"/_ch-hljs-loader.js\").then(async (loader) => { await loader.default(); loader.install(); });";

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AssetError {
    fn io<'a>(action: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> Self + 'a {
        move |source| AssetError::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Reads the integer version stored in `path`; `None` if missing or garbled
pub fn read_asset_version(path: &Path) -> Option<u32> {
    std::fs::read_to_string(path).ok()?.trim().parse().ok()
}

/// Whether the bundled assets are newer than the installed ones
///
/// Without a bundled version there is nothing to compare, so the answer is
/// no. A missing installed version counts as older than any bundled one.
pub fn has_newer_version(bundled_dir: &Path, installed_dir: &Path, version_asset: &str) -> bool {
    let Some(new_version) = read_asset_version(&bundled_dir.join(version_asset)) else {
        return false;
    };
    match read_asset_version(&installed_dir.join(version_asset)) {
        Some(old_version) => new_version > old_version,
        None => true,
    }
}

/// Something that can install and remove a set of assets
pub trait AssetManager {
    fn install_assets(&mut self) -> Result<(), AssetError>;
    fn delete_assets(&mut self) -> Result<(), AssetError>;
}

/// Reinstall the assets when a newer version is available
///
/// Returns whether anything was reinstalled.
pub fn sync_assets(is_newer: bool, manager: &mut impl AssetManager) -> Result<bool, AssetError> {
    if !is_newer {
        tracing::debug!("Installed assets are up to date");
        return Ok(false);
    }
    manager.delete_assets()?;
    manager.install_assets()?;
    Ok(true)
}

/// Copies prefixed files from a bundled directory into a media directory
pub struct MediaAssetManager {
    bundled_dir: PathBuf,
    media_dir: PathBuf,
    prefix: String,
}

impl MediaAssetManager {
    pub fn new(bundled_dir: impl Into<PathBuf>, media_dir: impl Into<PathBuf>) -> Self {
        Self {
            bundled_dir: bundled_dir.into(),
            media_dir: media_dir.into(),
            prefix: ASSET_PREFIX.to_string(),
        }
    }

    pub fn is_outdated(&self) -> bool {
        has_newer_version(&self.bundled_dir, &self.media_dir, VERSION_ASSET)
    }
}

impl AssetManager for MediaAssetManager {
    fn install_assets(&mut self) -> Result<(), AssetError> {
        std::fs::create_dir_all(&self.media_dir)
            .map_err(AssetError::io("create", &self.media_dir))?;
        let assets = list_files_with_prefix(&self.bundled_dir, &self.prefix)
            .map_err(AssetError::io("list", &self.bundled_dir))?;
        for asset in &assets {
            let from = self.bundled_dir.join(asset);
            std::fs::copy(&from, self.media_dir.join(asset))
                .map_err(AssetError::io("copy", &from))?;
        }
        tracing::info!(count = assets.len(), dir = %self.media_dir.display(), "Installed assets");
        Ok(())
    }

    fn delete_assets(&mut self) -> Result<(), AssetError> {
        if !self.media_dir.exists() {
            return Ok(());
        }
        let assets = list_files_with_prefix(&self.media_dir, &self.prefix)
            .map_err(AssetError::io("list", &self.media_dir))?;
        for asset in &assets {
            let path = self.media_dir.join(asset);
            std::fs::remove_file(&path).map_err(AssetError::io("remove", &path))?;
        }
        tracing::info!(count = assets.len(), dir = %self.media_dir.display(), "Removed assets");
        Ok(())
    }
}

/// HTML comments opening and closing the import block
pub fn guards(guard: &str) -> (String, String) {
    (
        format!("<!-- {} BEGIN -->\n", guard),
        format!("<!-- {} END -->\n", guard),
    )
}

/// Append a guarded block importing `css_assets` and `script_elements`
pub fn append_import_statements(
    css_assets: &[&str],
    script_elements: &[&str],
    guard: &str,
    class_name: &str,
    template: &str,
) -> String {
    let imports: String = css_assets
        .iter()
        .map(|css| format!("<link rel=\"stylesheet\" href=\"{}\" class=\"{}\">\n", css, class_name))
        .chain(
            script_elements
                .iter()
                .map(|script| format!("<script class=\"{}\">{}</script>\n", class_name, script)),
        )
        .collect();

    let (begin, end) = guards(guard);
    let gap = if template.ends_with('\n') { "\n" } else { "\n\n" };

    format!("{}{}{}{}{}", template, gap, begin, imports, end)
}

/// Remove the guarded import block, together with the newline before it
///
/// Everything from the first opening guard to the last closing guard goes.
/// Templates without a complete block come back unchanged.
pub fn delete_import_statements(guard: &str, template: &str) -> String {
    let (begin, end) = guards(guard);
    let opening = format!("\n{}", begin);

    let Some(start) = template.find(&opening) else {
        return template.to_string();
    };
    let Some(end_at) = template.rfind(&end).filter(|&idx| idx >= start + opening.len()) else {
        return template.to_string();
    };

    format!("{}{}", &template[..start], &template[end_at + end.len()..])
}
