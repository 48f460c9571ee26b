//! DOM abstraction for Trellis.
//!
//! Trellis never talks to a concrete document model directly. The node,
//! view, and router layers work against the [`Document`] and [`Element`]
//! handles defined here, and a host supplies the backend: a browser
//! binding in a deployed application, or the bundled [`memory`] backend
//! for headless use and tests.
//!
//! # Capability Set
//!
//! The consumed surface is deliberately small: create elements, splice
//! them into a tree (append, insert-before, detach), read and write text,
//! attributes and CSS classes, and attach click/input handlers. That is
//! everything the view-transition lifecycle and the reactive bindings
//! need.
//!
//! # Identity
//!
//! Elements are compared by handle identity ([`Element::ptr_eq`]), which
//! backends rely on to resolve insert-before references.

pub mod memory;

use std::fmt::{self, Write as FmtWrite};
use std::rc::Rc;

/// Backend trait for a single element.
///
/// Implementations store the element's own data (tag, text, attributes,
/// classes, handlers) and its links into the surrounding tree. Tree
/// surgery goes through the [`Element`] wrapper, which keeps the
/// parent/child links consistent; backends only provide the raw storage
/// operations.
pub trait DomElement {
    /// The element's tag name, e.g. `"div"`.
    fn tag(&self) -> String;

    /// The element's current parent, if attached.
    fn parent(&self) -> Option<Element>;

    /// Store (or clear) the parent link. Backends must hold this weakly
    /// to avoid reference cycles.
    fn set_parent(&self, parent: Option<&Element>);

    /// The element's children, in document order.
    fn children(&self) -> Vec<Element>;

    /// Append a child to the end of the child list.
    fn push_child(&self, child: Element);

    /// Insert a child immediately before `reference` in the child list.
    /// If `reference` is not a child of this element, the child is
    /// appended instead.
    fn insert_child_before(&self, child: Element, reference: &Element);

    /// Remove a child from the child list.
    fn remove_child(&self, child: &Element);

    /// Replace the element's text content.
    fn set_text(&self, text: &str);

    /// The element's text content.
    fn text(&self) -> String;

    /// Set an attribute.
    fn set_attribute(&self, name: &str, value: &str);

    /// Read an attribute.
    fn attribute(&self, name: &str) -> Option<String>;

    /// All attributes, in a stable order.
    fn attributes(&self) -> Vec<(String, String)>;

    /// Add a CSS class (no-op if already present).
    fn add_class(&self, class: &str);

    /// Remove a CSS class.
    fn remove_class(&self, class: &str);

    /// Whether a CSS class is present.
    fn has_class(&self, class: &str) -> bool;

    /// All CSS classes, in insertion order.
    fn classes(&self) -> Vec<String>;

    /// Install the click handler, replacing any previous one.
    fn set_on_click(&self, handler: Rc<dyn Fn()>);

    /// Dispatch a click to the installed handler, if any.
    fn click(&self);

    /// Install the input handler, replacing any previous one.
    fn set_on_input(&self, handler: Rc<dyn Fn(&str)>);

    /// Dispatch an input event carrying `value` to the installed handler.
    fn input(&self, value: &str);
}

/// Backend trait for the document: the element factory.
pub trait DomDocument {
    /// Create a detached element with the given tag.
    fn create_element(&self, tag: &str) -> Element;
}

/// A cheap-to-clone handle to a document backend.
#[derive(Clone)]
pub struct Document {
    backend: Rc<dyn DomDocument>,
}

impl Document {
    /// Wrap a backend in a document handle.
    pub fn new(backend: Rc<dyn DomDocument>) -> Self {
        Self { backend }
    }

    /// Create a detached element with the given tag.
    pub fn create_element(&self, tag: &str) -> Element {
        self.backend.create_element(tag)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document").finish_non_exhaustive()
    }
}

/// A cheap-to-clone handle to an element.
///
/// Clones share the same underlying element; identity is handle identity.
#[derive(Clone)]
pub struct Element {
    backend: Rc<dyn DomElement>,
}

impl Element {
    /// Wrap a backend element in a handle.
    pub fn new(backend: Rc<dyn DomElement>) -> Self {
        Self { backend }
    }

    /// Access the backend, e.g. to downcast in backend-specific code.
    pub fn backend(&self) -> &Rc<dyn DomElement> {
        &self.backend
    }

    /// Whether two handles refer to the same element.
    pub fn ptr_eq(&self, other: &Element) -> bool {
        Rc::ptr_eq(&self.backend, &other.backend)
    }

    /// The element's tag name.
    pub fn tag(&self) -> String {
        self.backend.tag()
    }

    /// The element's current parent, if attached.
    pub fn parent(&self) -> Option<Element> {
        self.backend.parent()
    }

    /// The element's children, in document order.
    pub fn children(&self) -> Vec<Element> {
        self.backend.children()
    }

    /// The element's first child, if any.
    pub fn first_child(&self) -> Option<Element> {
        self.backend.children().into_iter().next()
    }

    /// Append `child` as the last child of this element, detaching it
    /// from any previous parent first.
    pub fn append_child(&self, child: &Element) {
        child.remove();
        self.backend.push_child(child.clone());
        child.backend.set_parent(Some(self));
    }

    /// Insert `child` immediately before `reference` among this element's
    /// children, detaching it from any previous parent first.
    pub fn insert_before(&self, child: &Element, reference: &Element) {
        child.remove();
        self.backend.insert_child_before(child.clone(), reference);
        child.backend.set_parent(Some(self));
    }

    /// Detach this element from its parent. No-op when already detached.
    pub fn remove(&self) {
        if let Some(parent) = self.backend.parent() {
            parent.backend.remove_child(self);
            self.backend.set_parent(None);
        }
    }

    /// Replace the element's text content.
    pub fn set_text(&self, text: &str) {
        self.backend.set_text(text);
    }

    /// The element's text content.
    pub fn text(&self) -> String {
        self.backend.text()
    }

    /// Set an attribute.
    pub fn set_attribute(&self, name: &str, value: &str) {
        self.backend.set_attribute(name, value);
    }

    /// Read an attribute.
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.backend.attribute(name)
    }

    /// Add a CSS class.
    pub fn add_class(&self, class: &str) {
        self.backend.add_class(class);
    }

    /// Remove a CSS class.
    pub fn remove_class(&self, class: &str) {
        self.backend.remove_class(class);
    }

    /// Whether a CSS class is present.
    pub fn has_class(&self, class: &str) -> bool {
        self.backend.has_class(class)
    }

    /// Install the click handler.
    pub fn set_on_click(&self, handler: Rc<dyn Fn()>) {
        self.backend.set_on_click(handler);
    }

    /// Dispatch a click to the installed handler, if any.
    pub fn click(&self) {
        self.backend.click();
    }

    /// Install the input handler.
    pub fn set_on_input(&self, handler: Rc<dyn Fn(&str)>) {
        self.backend.set_on_input(handler);
    }

    /// Dispatch an input event carrying `value`.
    pub fn input(&self, value: &str) {
        self.backend.input(value);
    }

    /// Depth-first search for a descendant with the given `id` attribute.
    pub fn element_by_id(&self, id: &str) -> Option<Element> {
        if self.attribute("id").as_deref() == Some(id) {
            return Some(self.clone());
        }

        self.children()
            .into_iter()
            .find_map(|child| child.element_by_id(id))
    }

    /// Render this element and its subtree as an HTML-like string.
    ///
    /// Intended for debugging and test assertions; attribute order is the
    /// backend's stable order, classes render as a trailing `class`
    /// attribute, and text content precedes child elements.
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let tag = self.tag();
        out.push('<');
        out.push_str(&tag);

        for (name, value) in self.backend.attributes() {
            let _ = write!(out, " {name}=\"{value}\"");
        }

        let classes = self.backend.classes();
        if !classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", classes.join(" "));
        }

        out.push('>');
        out.push_str(&self.text());

        for child in self.children() {
            child.write_html(out);
        }

        let _ = write!(out, "</{tag}>");
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag())
            .field("children", &self.children().len())
            .finish()
    }
}
