pub mod errors;
pub mod menu;
pub mod resolve;
pub mod render;
pub mod inject;
pub mod site;

use errors::Result;
use inject::{Injection, DEFAULT_PLACEHOLDER_ID};
use menu::Menu;
use resolve::NavState;

/// Builds the site navigation for a page and mounts it into the page's placeholder.
#[derive(Debug, Clone)]
pub struct NavRenderer {
    menu: Menu,
    placeholder_id: String,
}

impl NavRenderer {
    pub fn new(menu: Menu) -> Self {
        Self {
            menu,
            placeholder_id: DEFAULT_PLACEHOLDER_ID.to_string(),
        }
    }

    pub fn with_placeholder(mut self, id: impl Into<String>) -> Self {
        self.placeholder_id = id.into();
        self
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn placeholder_id(&self) -> &str {
        &self.placeholder_id
    }

    /// Prefix and active entry for `path`.
    pub fn state(&self, path: &str) -> NavState {
        resolve::resolve_nav_state(path, &self.menu)
    }

    /// The `<nav>` fragment for the page served at `path`.
    pub fn render(&self, path: &str) -> String {
        render::render_nav(&self.menu, &self.state(path))
    }

    /// Replace the placeholder's content in `document`.
    /// Yields `Injection::Missing` when the placeholder is absent.
    pub fn mount(&self, document: &str, path: &str) -> Result<Injection> {
        inject::inject(document, &self.placeholder_id, &self.render(path))
    }
}

impl Default for NavRenderer {
    fn default() -> Self {
        Self::new(Menu::builtin())
    }
}

/// Convenience: render the built-in menu for `path`.
pub fn render(path: &str) -> String {
    NavRenderer::default().render(path)
}

/// Convenience: mount the built-in menu into `document`, returning it unchanged
/// when the placeholder is missing.
pub fn mount(document: &str, path: &str) -> Result<String> {
    Ok(NavRenderer::default()
        .mount(document, path)?
        .into_document(document))
}

/// Load a menu from a JSON file, or fall back to the built-in one.
pub fn load_menu(path: Option<&std::path::Path>) -> Result<Menu> {
    match path {
        Some(p) => Menu::load(p),
        None => Ok(Menu::builtin()),
    }
}

pub use menu::MenuItem;
pub use resolve::{resolve_nav_state, Prefix};
