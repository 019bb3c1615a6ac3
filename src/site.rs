use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::errors::{NavError, Result};
use crate::inject::DEFAULT_PLACEHOLDER_ID;
use crate::menu::Menu;
use crate::NavRenderer;

/// URL prefix under which the site root is served during development.
pub const DEFAULT_MOUNT: &str = "/src";

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub mount: String,
    pub placeholder_id: String,
    pub dry_run: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            mount: DEFAULT_MOUNT.to_string(),
            placeholder_id: DEFAULT_PLACEHOLDER_ID.to_string(),
            dry_run: false,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Number of HTML pages visited.
    pub pages: usize,
    /// Pages whose placeholder received the menu.
    pub injected: Vec<PathBuf>,
    /// Pages without a placeholder.
    pub skipped: Vec<PathBuf>,
}

/// Result of mounting the menu into one page file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutcome {
    /// The page after injection; the original content when nothing was mounted.
    pub document: String,
    /// Whether the placeholder was found.
    pub injected: bool,
    /// Whether the file on disk was rewritten.
    pub written: bool,
}

/// URL path a page is served at: `mount` joined with its path below `root`.
pub fn url_path(root: &Path, page: &Path, mount: &str) -> String {
    let rel = page.strip_prefix(root).unwrap_or(page);
    let rel = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    format!("{}/{}", mount.trim_end_matches('/'), rel)
}

/// Mount the menu into the page at `file`, served at `url`.
///
/// With `write_back` the file is rewritten, but only when its content changed.
pub fn inject_file(
    renderer: &NavRenderer,
    file: &Path,
    url: &str,
    write_back: bool,
) -> Result<PageOutcome> {
    let original = std::fs::read_to_string(file).map_err(|e| NavError::io(file, e))?;
    let injection = renderer.mount(&original, url)?;
    let injected = injection.is_injected();
    if !injected {
        warn!(page = %file.display(), "no placeholder, page left as is");
    }
    let document = injection.into_document(&original);

    // Written only when the content changed.
    let written = write_back && document != original;
    if written {
        std::fs::write(file, &document).map_err(|e| NavError::io(file, e))?;
    }
    Ok(PageOutcome {
        document,
        injected,
        written,
    })
}

/// Inject the menu into every `*.html` file below `root`.
pub fn build_site(root: &Path, menu: &Menu, options: &BuildOptions) -> Result<BuildReport> {
    let renderer = NavRenderer::new(menu.clone()).with_placeholder(options.placeholder_id.clone());
    let mut report = BuildReport::default();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        let page = entry.path();
        // Directories, scripts, stylesheets and images are not pages.
        if !entry.file_type().is_file() || !is_html(page) {
            continue;
        }
        report.pages += 1;

        let url = url_path(root, page, &options.mount);
        // A dry run still renders and mounts, it just never writes.
        let outcome = inject_file(&renderer, page, &url, !options.dry_run)?;
        if !outcome.injected {
            report.skipped.push(page.to_path_buf());
            continue;
        }
        info!(
            page = %page.display(),
            url = %url,
            written = outcome.written,
            "navigation injected"
        );
        report.injected.push(page.to_path_buf());
    }

    debug!(
        pages = report.pages,
        injected = report.injected.len(),
        "site build done"
    );
    Ok(report)
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn url_paths_follow_layout() {
        let root = Path::new("/site/src");
        assert_eq!(
            url_path(root, &root.join("index.html"), "/src"),
            "/src/index.html"
        );
        assert_eq!(
            url_path(root, &root.join("resto").join("bar.html"), "/src/"),
            "/src/resto/bar.html"
        );
        assert_eq!(
            url_path(root, &root.join("eco/index.html"), ""),
            "/eco/index.html"
        );
    }

    #[test]
    fn html_extension_check() {
        assert!(is_html(Path::new("a/index.html")));
        assert!(is_html(Path::new("a/OLD.HTM")));
        assert!(!is_html(Path::new("a/nav.js")));
        assert!(!is_html(Path::new("a/README")));
    }
}
