use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::menu::{Menu, MenuItem, INDEX_FILE};

/// Suffixes that identify the site's home page.
const ROOT_INDEX_MARKERS: [&str; 3] = [
    "/src/index.html",
    "/src/",
    "LaResidence/src/index.html",
];

/// Spellings of the home page used when deciding whether "Accueil" is active.
const ROOT_ACTIVE_SUFFIXES: [&str; 2] = ["/src/index.html", "/LaResidence/index.html"];
const ROOT_ACTIVE_EXACT: [&str; 2] = ["/index.html", "/"];

/// Relative segment prepended to every menu link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "&'static str")]
pub enum Prefix {
    Root,
    Parent,
}

impl Prefix {
    pub fn as_str(self) -> &'static str {
        match self {
            Prefix::Root => "",
            Prefix::Parent => "../",
        }
    }

    pub fn apply(self, link: &str) -> String {
        format!("{}{}", self.as_str(), link)
    }
}

impl From<Prefix> for &'static str {
    fn from(p: Prefix) -> Self {
        p.as_str()
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the renderer needs to know about the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavState {
    pub prefix: Prefix,
    /// Index of the active top-level entry, if any.
    pub active: Option<usize>,
}

/// Forward slashes only.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Derive the link prefix for a URL path.
///
/// The site is two tiers deep: the home page sits at the root and every other
/// page lives exactly one folder below it. The checks run in order:
///
/// 1. a root index marker suffix gives `""`;
/// 2. a folder `index.html` (anything but the home page) gives `"../"`;
/// 3. a path without any separator gives `""`;
/// 4. anything else gives `"../"`.
pub fn resolve_prefix(path: &str) -> Prefix {
    let path = normalize_path(path);
    if ROOT_INDEX_MARKERS.iter().any(|m| path.ends_with(m)) {
        Prefix::Root
    } else if last_segment(&path) == INDEX_FILE && !path.contains("/src/index.html") {
        Prefix::Parent
    } else if !path.contains('/') {
        Prefix::Root
    } else {
        Prefix::Parent
    }
}

/// Index of the first top-level entry that corresponds to `path`.
pub fn resolve_active(path: &str, menu: &Menu) -> Option<usize> {
    let path = normalize_path(path);
    menu.items().iter().position(|item| {
        if item.is_root() {
            is_root_page(&path, menu)
        } else {
            matches_entry(&path, item)
        }
    })
}

/// Resolve prefix and active entry in one pass.
pub fn resolve_nav_state(path: &str, menu: &Menu) -> NavState {
    let state = NavState {
        prefix: resolve_prefix(path),
        active: resolve_active(path, menu),
    };
    debug!(path, prefix = %state.prefix, active = ?state.active, "resolved nav state");
    state
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

// Home page spellings, excluding folder landing pages that share the suffix.
fn is_root_page(path: &str, menu: &Menu) -> bool {
    let spelled_as_root = ROOT_ACTIVE_SUFFIXES.iter().any(|s| path.ends_with(s))
        || ROOT_ACTIVE_EXACT.contains(&path);
    spelled_as_root
        && !menu
            .items()
            .iter()
            .filter(|i| i.is_folder_index())
            .any(|i| path.ends_with(i.link.as_str()))
}

fn matches_entry(path: &str, item: &MenuItem) -> bool {
    path.ends_with(item.link.as_str())
        || item.dropdown.iter().any(|child| path.ends_with(child.link.as_str()))
}
