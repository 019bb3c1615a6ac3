use html_escape::{encode_double_quoted_attribute, encode_text};
use itertools::Itertools;

use crate::menu::{Menu, MenuItem};
use crate::resolve::{NavState, Prefix};

/// Class applied to the entry matching the current page.
pub const ACTIVE_CLASS: &str = "active";

/// Render the `<nav>` fragment for a resolved state.
pub fn render_nav(menu: &Menu, state: &NavState) -> String {
    let mut html = String::from("<nav class=\"main-nav\">\n    <ul class=\"nav-links\">\n");
    for (idx, item) in menu.items().iter().enumerate() {
        render_item(&mut html, item, state.prefix, state.active == Some(idx));
    }
    html.push_str("    </ul>\n</nav>\n");
    html
}

fn render_item(html: &mut String, item: &MenuItem, prefix: Prefix, active: bool) {
    html.push_str("        ");
    if item.has_dropdown() {
        html.push_str("<li class=\"dropdown\">");
    } else {
        html.push_str("<li>");
    }

    let classes = item
        .class
        .as_deref()
        .into_iter()
        .chain(active.then_some(ACTIVE_CLASS))
        .filter(|c| !c.is_empty())
        .join(" ");
    push_link(html, &prefix.apply(&item.link), &classes, &item.name);

    if item.has_dropdown() {
        html.push_str("<div class=\"dropdown-content\">");
        // children share the parent's depth
        for child in &item.dropdown {
            push_link(html, &prefix.apply(&child.link), "", &child.name);
        }
        html.push_str("</div>");
    }
    html.push_str("</li>\n");
}

fn push_link(html: &mut String, href: &str, classes: &str, text: &str) {
    html.push_str("<a href=\"");
    html.push_str(&encode_double_quoted_attribute(href));
    html.push('"');
    if !classes.is_empty() {
        html.push_str(" class=\"");
        html.push_str(&encode_double_quoted_attribute(classes));
        html.push('"');
    }
    html.push('>');
    html.push_str(&encode_text(text));
    html.push_str("</a>");
}
