//! Script host backed by a media directory on disk
//!
//! Resolves script URLs against the directory the page's assets are served
//! from. A script "executes" by being read successfully and appended to the
//! page head; nothing is evaluated.

use std::io;
use std::path::{Component, Path, PathBuf};
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};

use crate::document::Page;
use crate::loader::{LoadError, ScriptHost};

pub struct MediaDirHost {
    root: PathBuf,
    page: Rc<Page>,
}

impl MediaDirHost {
    pub fn new(root: impl Into<PathBuf>, page: Rc<Page>) -> Self {
        Self {
            root: root.into(),
            page,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `url` inside the media directory
    ///
    /// Only plain relative paths are accepted; a leading `/` means the media
    /// root, as it does for a page served from there.
    fn resolve(&self, url: &str) -> Option<PathBuf> {
        let relative = Path::new(url.trim_start_matches('/'));
        let plain = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        (plain && !url.is_empty()).then(|| self.root.join(relative))
    }

    fn load(&self, url: &str) -> Result<(), LoadError> {
        let path = self.resolve(url).ok_or_else(|| LoadError::Transport {
            url: url.to_string(),
            reason: "URL escapes the media directory".to_string(),
        })?;

        match std::fs::read(&path) {
            Ok(bytes) => {
                tracing::debug!(url, bytes = bytes.len(), "Loaded script from media directory");
                self.page.append_script(url);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(LoadError::NotFound {
                url: url.to_string(),
            }),
            Err(e) => Err(LoadError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

impl ScriptHost for MediaDirHost {
    fn load_script(&self, url: &str) -> LocalBoxFuture<'_, Result<(), LoadError>> {
        let url = url.to_string();
        async move { self.load(&url) }.boxed_local()
    }
}

/// File names directly inside `dir` starting with `prefix`, sorted
pub fn list_files_with_prefix(dir: &Path, prefix: &str) -> io::Result<Vec<String>> {
    let mut files: Vec<String> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with(prefix))
        .collect();
    files.sort();
    Ok(files)
}
