//! In-memory DOM backend.
//!
//! A self-contained document model used for headless rendering and tests.
//! It keeps the tree, text, attributes, and classes in plain Rust
//! structures and lets tests dispatch synthetic click/input events.
//!
//! # Example
//!
//! ```
//! use trellis::dom::memory::MemoryDocument;
//!
//! let document = MemoryDocument::new();
//! let root = document.create_element("div");
//! let child = document.create_element("p");
//! child.set_text("hello");
//! root.append_child(&child);
//!
//! assert_eq!(root.outer_html(), "<div><p>hello</p></div>");
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use super::{DomDocument, DomElement, Document, Element};

/// The in-memory document: a factory for [`MemoryElement`]s.
pub struct MemoryDocument;

impl MemoryDocument {
    /// Create a new in-memory document handle.
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> Document {
        Document::new(Rc::new(MemoryDocument))
    }
}

impl DomDocument for MemoryDocument {
    fn create_element(&self, tag: &str) -> Element {
        Element::new(Rc::new(MemoryElement::new(tag)))
    }
}

/// An element stored entirely in memory.
pub struct MemoryElement {
    tag: String,
    text: RefCell<String>,
    // BTreeMap keeps attribute rendering deterministic.
    attributes: RefCell<BTreeMap<String, String>>,
    classes: RefCell<Vec<String>>,
    children: RefCell<Vec<Element>>,
    parent: RefCell<Option<Weak<dyn DomElement>>>,
    on_click: RefCell<Option<Rc<dyn Fn()>>>,
    on_input: RefCell<Option<Rc<dyn Fn(&str)>>>,
}

impl MemoryElement {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            text: RefCell::new(String::new()),
            attributes: RefCell::new(BTreeMap::new()),
            classes: RefCell::new(Vec::new()),
            children: RefCell::new(Vec::new()),
            parent: RefCell::new(None),
            on_click: RefCell::new(None),
            on_input: RefCell::new(None),
        }
    }
}

impl DomElement for MemoryElement {
    fn tag(&self) -> String {
        self.tag.clone()
    }

    fn parent(&self) -> Option<Element> {
        self.parent
            .borrow()
            .as_ref()
            .and_then(Weak::upgrade)
            .map(Element::new)
    }

    fn set_parent(&self, parent: Option<&Element>) {
        *self.parent.borrow_mut() = parent.map(|element| Rc::downgrade(element.backend()));
    }

    fn children(&self) -> Vec<Element> {
        self.children.borrow().clone()
    }

    fn push_child(&self, child: Element) {
        self.children.borrow_mut().push(child);
    }

    fn insert_child_before(&self, child: Element, reference: &Element) {
        let mut children = self.children.borrow_mut();
        match children.iter().position(|existing| existing.ptr_eq(reference)) {
            Some(index) => children.insert(index, child),
            None => {
                tracing::warn!(
                    target: "trellis::dom",
                    tag = %self.tag,
                    "insert-before reference is not a child, appending instead"
                );
                children.push(child);
            }
        }
    }

    fn remove_child(&self, child: &Element) {
        self.children
            .borrow_mut()
            .retain(|existing| !existing.ptr_eq(child));
    }

    fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
    }

    fn text(&self) -> String {
        self.text.borrow().clone()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    fn attributes(&self) -> Vec<(String, String)> {
        self.attributes
            .borrow()
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    fn add_class(&self, class: &str) {
        let mut classes = self.classes.borrow_mut();
        if !classes.iter().any(|existing| existing == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.classes.borrow_mut().retain(|existing| existing != class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().iter().any(|existing| existing == class)
    }

    fn classes(&self) -> Vec<String> {
        self.classes.borrow().clone()
    }

    fn set_on_click(&self, handler: Rc<dyn Fn()>) {
        *self.on_click.borrow_mut() = Some(handler);
    }

    fn click(&self) {
        // Clone out of the cell first: the handler may replace itself.
        let handler = self.on_click.borrow().clone();
        if let Some(handler) = handler {
            handler();
        }
    }

    fn set_on_input(&self, handler: Rc<dyn Fn(&str)>) {
        *self.on_input.borrow_mut() = Some(handler);
    }

    fn input(&self, value: &str) {
        let handler = self.on_input.borrow().clone();
        if let Some(handler) = handler {
            handler(value);
        }
    }
}
