//! Views: the unit the router mounts and unmounts.
//!
//! A [`View`] is an ordered list of top-level [`Node`]s produced by a view
//! function. Unlike [`Node::add_child`](crate::Node::add_child), adding a
//! child to a view does not touch the document; the whole view enters the
//! tree at once when the router mounts it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::dom::{Document, Element};
use crate::node::{Children, Node};

/// Dynamic path segments captured while matching a route template,
/// keyed by segment name.
pub type PathSegments = HashMap<String, String>;

/// Per-navigation data handed to a view function.
#[derive(Clone, Debug, Default)]
pub struct ViewData {
    /// Captured dynamic segments, empty for literal routes.
    pub path_segments: PathSegments,
}

impl ViewData {
    /// Data with no captured segments.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Data carrying the given captured segments.
    pub fn with_segments(path_segments: PathSegments) -> Self {
        Self { path_segments }
    }

    /// Look up a captured segment by name.
    pub fn segment(&self, name: &str) -> Option<&str> {
        self.path_segments.get(name).map(String::as_str)
    }
}

/// A view producer: builds a fresh [`View`] for each navigation.
pub type ViewFn = Rc<dyn Fn(&ViewData) -> View>;

/// A deferred view producer: resolves to a [`ViewFn`] on first use.
pub type LazyViewFn = Rc<dyn Fn() -> LocalBoxFuture<'static, ViewFn>>;

/// An ordered collection of top-level nodes.
#[derive(Clone)]
pub struct View {
    document: Document,
    children: Rc<RefCell<Vec<Node>>>,
}

impl View {
    /// Create an empty view over `document`.
    pub fn new(document: &Document) -> Self {
        Self {
            document: document.clone(),
            children: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// The document this view creates elements in.
    pub fn document(&self) -> Document {
        self.document.clone()
    }

    /// Add top-level nodes. Nothing is inserted into the document until
    /// the view is mounted.
    pub fn add_child(self, children: impl Into<Children>) -> Self {
        self.children.borrow_mut().extend(children.into().nodes);
        self
    }

    /// The view's top-level nodes.
    pub fn children(&self) -> Vec<Node> {
        self.children.borrow().clone()
    }

    /// The view's first top-level node, if any.
    pub fn first_child(&self) -> Option<Node> {
        self.children.borrow().first().cloned()
    }

    /// Mount every top-level node into `root`, before `reference` when
    /// given.
    ///
    /// An empty view mounts a single empty `div` so the view still
    /// occupies a position in the document.
    pub fn mount(&self, root: &Element, reference: Option<&Element>) {
        if self.children.borrow().is_empty() {
            let placeholder = Node::new(self.document.create_element("div"));
            self.children.borrow_mut().push(placeholder);
        }

        for child in self.children.borrow().iter() {
            child.mount(root, reference);
        }
    }

    /// Unmount every top-level node and drop them.
    pub fn unmount(&self) {
        let children = std::mem::take(&mut *self.children.borrow_mut());
        for child in children {
            child.unmount();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryDocument;

    #[test]
    fn add_child_does_not_mount() {
        let document = MemoryDocument::new();
        let root = document.create_element("div");

        let view = View::new(&document)
            .add_child(Node::new(document.create_element("p")).text("hi"));

        assert!(root.children().is_empty());

        view.mount(&root, None);
        assert_eq!(root.outer_html(), "<div><p>hi</p></div>");
    }

    #[test]
    fn empty_view_mounts_a_placeholder_div() {
        let document = MemoryDocument::new();
        let root = document.create_element("div");

        let view = View::new(&document);
        view.mount(&root, None);

        assert_eq!(root.outer_html(), "<div><div></div></div>");
        assert_eq!(view.children().len(), 1);
    }

    #[test]
    fn mount_before_reference_keeps_document_order() {
        let document = MemoryDocument::new();
        let root = document.create_element("div");
        let footer = document.create_element("footer");
        root.append_child(&footer);

        let view = View::new(&document)
            .add_child(Node::new(document.create_element("a")))
            .add_child(Node::new(document.create_element("b")));
        view.mount(&root, Some(&footer));

        let tags: Vec<String> = root.children().iter().map(Element::tag).collect();
        assert_eq!(tags, vec!["a", "b", "footer"]);
    }

    #[test]
    fn unmount_empties_the_view() {
        let document = MemoryDocument::new();
        let root = document.create_element("div");

        let view = View::new(&document)
            .add_child(Node::new(document.create_element("p")));
        view.mount(&root, None);
        view.unmount();

        assert!(root.children().is_empty());
        assert!(view.children().is_empty());
        assert!(view.first_child().is_none());
    }

    #[test]
    fn segment_lookup() {
        let mut segments = PathSegments::new();
        segments.insert("id".to_string(), "42".to_string());

        let data = ViewData::with_segments(segments);
        assert_eq!(data.segment("id"), Some("42"));
        assert_eq!(data.segment("other"), None);
        assert!(ViewData::empty().path_segments.is_empty());
    }
}
