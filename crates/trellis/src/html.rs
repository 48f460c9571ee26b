//! Shorthand constructors for common HTML elements.
//!
//! Each helper creates a detached [`Node`] in the given document, ready
//! for builder-style configuration:
//!
//! ```
//! use trellis::dom::memory::MemoryDocument;
//! use trellis::html;
//!
//! let document = MemoryDocument::new();
//! let card = html::div(&document)
//!     .style("card")
//!     .add_child(html::p(&document, "hello"));
//!
//! assert_eq!(card.element().outer_html(), "<div class=\"card\"><p>hello</p></div>");
//! ```

use crate::dom::Document;
use crate::node::{Children, Node};
use crate::router::Router;
use crate::view::View;

/// Create a node with an arbitrary tag.
pub fn element(document: &Document, tag: &str) -> Node {
    Node::new(document.create_element(tag))
}

/// `<div>`
pub fn div(document: &Document) -> Node {
    element(document, "div")
}

/// `<span>`
pub fn span(document: &Document) -> Node {
    element(document, "span")
}

/// `<p>` with text content.
pub fn p(document: &Document, text: impl AsRef<str>) -> Node {
    element(document, "p").text(text)
}

/// `<code>` with text content.
pub fn code(document: &Document, text: impl AsRef<str>) -> Node {
    element(document, "code").text(text)
}

/// `<pre>`
pub fn pre(document: &Document) -> Node {
    element(document, "pre")
}

/// `<button>` with a label.
pub fn button(document: &Document, label: impl AsRef<str>) -> Node {
    element(document, "button").text(label)
}

/// `<canvas>`
pub fn canvas(document: &Document) -> Node {
    element(document, "canvas")
}

/// `<input>`
pub fn input(document: &Document) -> Node {
    element(document, "input")
}

/// `<table>`
pub fn table(document: &Document) -> Node {
    element(document, "table")
}

/// `<tr>`
pub fn tr(document: &Document) -> Node {
    element(document, "tr")
}

/// `<td>`
pub fn td(document: &Document) -> Node {
    element(document, "td")
}

/// `<th>`
pub fn th(document: &Document) -> Node {
    element(document, "th")
}

/// A heading of the given level (clamped to `h1`..`h6`) with text content.
pub fn heading(document: &Document, level: u8, text: impl AsRef<str>) -> Node {
    let level = level.clamp(1, 6);
    element(document, &format!("h{level}")).text(text)
}

/// `<h1>` with text content.
pub fn h1(document: &Document, text: impl AsRef<str>) -> Node {
    heading(document, 1, text)
}

/// `<h2>` with text content.
pub fn h2(document: &Document, text: impl AsRef<str>) -> Node {
    heading(document, 2, text)
}

/// `<h3>` with text content.
pub fn h3(document: &Document, text: impl AsRef<str>) -> Node {
    heading(document, 3, text)
}

/// `<h4>` with text content.
pub fn h4(document: &Document, text: impl AsRef<str>) -> Node {
    heading(document, 4, text)
}

/// `<h5>` with text content.
pub fn h5(document: &Document, text: impl AsRef<str>) -> Node {
    heading(document, 5, text)
}

/// `<h6>` with text content.
pub fn h6(document: &Document, text: impl AsRef<str>) -> Node {
    heading(document, 6, text)
}

/// `<a>` pointing at `url`, for links that leave the application.
pub fn a(document: &Document, url: &str, text: impl AsRef<str>) -> Node {
    element(document, "a").attribute("href", url).text(text)
}

/// An in-application link: an `<a>` whose click navigates `router` to
/// `url` instead of reloading the page.
pub fn router_a(router: &Router, url: &str, text: impl AsRef<str>) -> Node {
    let target = url.to_string();
    let router = router.clone();
    a(&router.document(), url, text).on_click(move || {
        if let Err(error) = router.navigate(&target) {
            tracing::error!(target: "trellis::router", url = %target, %error, "link navigation failed");
        }
    })
}

/// Bundle nodes into a [`View`], for view functions that are a flat list
/// of elements.
pub fn compose(document: &Document, children: impl Into<Children>) -> View {
    View::new(document).add_child(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryDocument;
    use crate::history::MemoryHistory;

    #[test]
    fn constructors_set_tag_and_text() {
        let document = MemoryDocument::new();

        assert_eq!(p(&document, "x").element().outer_html(), "<p>x</p>");
        assert_eq!(button(&document, "+").element().outer_html(), "<button>+</button>");
        assert_eq!(h2(&document, "t").element().outer_html(), "<h2>t</h2>");
        assert_eq!(heading(&document, 9, "t").element().tag(), "h6");
        assert_eq!(
            a(&document, "https://example.org", "out").element().outer_html(),
            "<a href=\"https://example.org\">out</a>"
        );
    }

    #[test]
    fn router_link_navigates_on_click() {
        let document = MemoryDocument::new();
        let root = document.create_element("div");
        let history = MemoryHistory::new();
        let router = Router::new(&document, &root, history.handle());

        let doc = document.clone();
        router.route("/about", move |_| {
            compose(&doc, p(&doc, "about"))
        });

        let link = router_a(&router, "/about", "go");
        link.element().click();

        assert_eq!(root.outer_html(), "<div><p>about</p></div>");
        assert_eq!(history.current().as_deref(), Some("/about"));
    }

    #[test]
    fn compose_bundles_nodes_into_a_view() {
        let document = MemoryDocument::new();
        let root = document.create_element("div");

        let view = compose(&document, vec![p(&document, "a"), p(&document, "b")]);
        view.mount(&root, None);

        assert_eq!(root.outer_html(), "<div><p>a</p><p>b</p></div>");
    }
}
