use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{NavError, Result};

/// Link of the site's home entry. Treated specially when resolving the active entry.
pub const ROOT_LINK: &str = "index.html";

/// Filename of a folder's landing page.
pub const INDEX_FILE: &str = "index.html";

/// One menu entry. `link` is relative to the site root, e.g. `resto/index.html`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub link: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropdown: Vec<MenuItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
            dropdown: Vec::new(),
            class: None,
        }
    }

    pub fn with_dropdown(mut self, items: Vec<MenuItem>) -> Self {
        self.dropdown = items;
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn has_dropdown(&self) -> bool {
        !self.dropdown.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.link == ROOT_LINK
    }

    /// True when the link points at a folder landing page (`<dir>/index.html`).
    pub fn is_folder_index(&self) -> bool {
        !self.is_root() && self.link.rsplit('/').next() == Some(INDEX_FILE)
    }
}

/// Ordered top-level menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    /// Build a menu, rejecting dropdowns nested more than one level deep.
    pub fn new(items: Vec<MenuItem>) -> Result<Self> {
        let menu = Self { items };
        menu.validate()?;
        Ok(menu)
    }

    /// The La Residence site menu.
    pub fn builtin() -> Self {
        Self {
            items: vec![
                MenuItem::new("Accueil", ROOT_LINK),
                MenuItem::new("Resto Spa", "resto/index.html").with_dropdown(vec![
                    MenuItem::new("Resto", "resto/restaurant.html"),
                    MenuItem::new("Bar", "resto/bar.html"),
                    MenuItem::new("The Tea Room", "resto/tearoom.html"),
                ]),
                MenuItem::new("Nos Chambres", "chambres/index.html"),
                MenuItem::new("Tarifs", "chambres/tarifs.html"),
                MenuItem::new("Eco", "eco/index.html"),
                MenuItem::new("Contact", "contact/index.html").with_class("contact-link"),
            ],
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let items: Vec<MenuItem> =
            serde_json::from_str(json).map_err(|e| NavError::Menu(e.to_string()))?;
        Self::new(items)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| NavError::io(path, e))?;
        tracing::debug!(path = %path.display(), "loading menu");
        Self::from_json_str(&raw)
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn validate(&self) -> Result<()> {
        for item in &self.items {
            if let Some(child) = item.dropdown.iter().find(|c| c.has_dropdown()) {
                return Err(NavError::Menu(format!(
                    "dropdown entry '{}' under '{}' has its own dropdown; \
                     only one level is supported",
                    child.name, item.name
                )));
            }
        }
        Ok(())
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::builtin()
    }
}
