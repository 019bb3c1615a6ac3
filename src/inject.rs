use std::cell::Cell;

use lol_html::html_content::ContentType;
use lol_html::{element, rewrite_str, RewriteStrSettings, Selector};
use tracing::{debug, warn};

use crate::errors::{NavError, Result};

/// Id of the element that receives the navigation markup.
pub const DEFAULT_PLACEHOLDER_ID: &str = "nav-placeholder";

/// Outcome of mounting a fragment into a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Injection {
    /// The document with the placeholder's content replaced.
    Injected(String),
    /// No element carries the placeholder id; nothing was done.
    Missing,
}

impl Injection {
    pub fn is_injected(&self) -> bool {
        matches!(self, Injection::Injected(_))
    }

    /// The new document, or `original` untouched when the placeholder was missing.
    pub fn into_document(self, original: &str) -> String {
        match self {
            Injection::Injected(doc) => doc,
            Injection::Missing => original.to_string(),
        }
    }
}

/// Attribute selector matching `id="<id>"` exactly.
fn id_selector(id: &str) -> Result<String> {
    let escaped = id.replace('\\', "\\\\").replace('"', "\\\"");
    let selector = format!("[id=\"{escaped}\"]");
    selector
        .parse::<Selector>()
        .map_err(|e| NavError::Html(format!("placeholder id {id:?}: {e}")))?;
    Ok(selector)
}

/// Replace the inner content of the element whose `id` is `placeholder_id`.
///
/// The document is streamed through an HTML rewriter, so comments, raw text
/// (`<script>`, `<style>`) and escapable text (`<title>`, `<textarea>`) are
/// never mistaken for markup and every byte outside the placeholder is kept.
/// Only the first matching element is touched.
pub fn inject(document: &str, placeholder_id: &str, fragment: &str) -> Result<Injection> {
    let selector = id_selector(placeholder_id)?;
    let mounted = Cell::new(false);

    let output = rewrite_str(
        document,
        RewriteStrSettings {
            element_content_handlers: vec![element!(selector, |el| {
                if mounted.get() {
                    return Ok(());
                }
                debug!(tag = %el.tag_name(), "placeholder found");
                el.set_inner_content(fragment, ContentType::Html);
                mounted.set(true);
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|e| NavError::Html(e.to_string()))?;

    if !mounted.get() {
        warn!(placeholder_id, "placeholder element not found");
        return Ok(Injection::Missing);
    }
    Ok(Injection::Injected(output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NAV: &str = "<nav>x</nav>";

    fn mount(doc: &str) -> String {
        inject(doc, DEFAULT_PLACEHOLDER_ID, NAV)
            .unwrap()
            .into_document(doc)
    }

    #[test]
    fn replaces_placeholder_content() {
        let doc = r#"<body><div id="nav-placeholder">old</div><p>hi</p></body>"#;
        let out = inject(doc, DEFAULT_PLACEHOLDER_ID, NAV).unwrap();
        assert_eq!(
            out,
            Injection::Injected(
                r#"<body><div id="nav-placeholder"><nav>x</nav></div><p>hi</p></body>"#.into()
            )
        );
    }

    #[test]
    fn missing_placeholder_is_a_no_op() {
        let doc = r#"<body><div id="content"></div></body>"#;
        let out = inject(doc, DEFAULT_PLACEHOLDER_ID, NAV).unwrap();
        assert_eq!(out, Injection::Missing);
        assert_eq!(out.into_document(doc), doc);
    }

    #[test]
    fn balances_nested_tags_of_same_name() {
        let doc = "<header id='nav-placeholder'><div><div>a</div></div></header><div>b</div>";
        assert_eq!(
            mount(doc),
            "<header id='nav-placeholder'><nav>x</nav></header><div>b</div>"
        );

        let doc = "<div id=nav-placeholder><div>a</div><br/></div><div>b</div>";
        assert_eq!(
            mount(doc),
            "<div id=nav-placeholder><nav>x</nav></div><div>b</div>"
        );
    }

    #[test]
    fn ignores_ids_in_comments_scripts_and_other_attributes() {
        let doc = concat!(
            "<!-- <div id=\"nav-placeholder\"></div> -->",
            "<script>var s = '<div id=\"nav-placeholder\">';</script>",
            "<div data-id=\"nav-placeholder\" title=\"a > b\"></div>",
            "<div class=\"x\" id=\"nav-placeholder\"></div>"
        );
        let out = mount(doc);
        assert!(
            out.ends_with("<div class=\"x\" id=\"nav-placeholder\"><nav>x</nav></div>"),
            "{out}"
        );
        assert!(out.starts_with("<!-- <div id=\"nav-placeholder\"></div> -->"));
    }

    #[test]
    fn ignores_ids_in_title_and_textarea_text() {
        let doc = concat!(
            "<head><title>Use <div id=\"nav-placeholder\"> tags</title></head>",
            "<body><textarea><div id=\"nav-placeholder\"></div></textarea>",
            "<div id=\"nav-placeholder\"></div></body>"
        );
        let expected = concat!(
            "<head><title>Use <div id=\"nav-placeholder\"> tags</title></head>",
            "<body><textarea><div id=\"nav-placeholder\"></div></textarea>",
            "<div id=\"nav-placeholder\"><nav>x</nav></div></body>"
        );
        assert_eq!(mount(doc), expected);
    }

    #[test]
    fn script_with_self_closing_syntax_is_still_raw_text() {
        let doc = concat!(
            "<script src=\"x.js\" /><div id=\"nav-placeholder\"></div></script>",
            "<div id=\"nav-placeholder\"></div>"
        );
        let expected = concat!(
            "<script src=\"x.js\" /><div id=\"nav-placeholder\"></div></script>",
            "<div id=\"nav-placeholder\"><nav>x</nav></div>"
        );
        assert_eq!(mount(doc), expected);
    }

    #[test]
    fn only_first_placeholder_is_mounted() {
        let doc = "<div id=\"nav-placeholder\"></div><div id=\"nav-placeholder\">keep</div>";
        assert_eq!(
            mount(doc),
            "<div id=\"nav-placeholder\"><nav>x</nav></div><div id=\"nav-placeholder\">keep</div>"
        );
    }

    #[test]
    fn custom_placeholder_id() {
        let doc = "<div id=\"menu\"></div>";
        assert!(inject(doc, "menu", NAV).unwrap().is_injected());
        assert!(!inject(doc, DEFAULT_PLACEHOLDER_ID, NAV).unwrap().is_injected());
    }

    #[test]
    fn quotes_in_placeholder_id_are_escaped() {
        let doc = "<div id='a\"b'></div>";
        assert!(inject(doc, "a\"b", NAV).unwrap().is_injected());
    }
}
