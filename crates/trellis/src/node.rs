//! Declarative element nodes.
//!
//! A [`Node`] wraps one [`Element`] together with its child nodes and
//! lifecycle hooks, and carries the builder-style configuration methods
//! view code composes with: text, id, CSS classes, event handlers, and
//! reactive bindings onto [`State`] containers.
//!
//! # Lifecycle
//!
//! Mounting inserts the node's element into a parent (optionally before a
//! reference element) and fires the mount hook. Unmounting runs in a fixed
//! order: the node's unmount hook fires first, then children are
//! recursively unmounted, and only then is the element detached.
//!
//! # Bindings
//!
//! Reactive bindings subscribe the underlying element to a state for the
//! life of that state; nodes do not unbind on unmount.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use trellis_core::State;

use crate::dom::Element;

struct NodeInner {
    element: Element,
    children: RefCell<Vec<Node>>,
    on_mount: RefCell<Option<Rc<dyn Fn()>>>,
    on_unmount: RefCell<Option<Rc<dyn Fn()>>>,
}

/// A cheap-to-clone handle to an element node.
///
/// Clones share the same element, children, and hooks. Configuration
/// methods consume and return the handle for chaining.
#[derive(Clone)]
pub struct Node {
    inner: Rc<NodeInner>,
}

impl Node {
    /// Wrap an element in a node.
    pub fn new(element: Element) -> Self {
        Self {
            inner: Rc::new(NodeInner {
                element,
                children: RefCell::new(Vec::new()),
                on_mount: RefCell::new(None),
                on_unmount: RefCell::new(None),
            }),
        }
    }

    /// The underlying element.
    pub fn element(&self) -> Element {
        self.inner.element.clone()
    }

    /// This node's child nodes.
    pub fn children(&self) -> Vec<Node> {
        self.inner.children.borrow().clone()
    }

    /// Insert the node's element into `parent`, before `reference` when
    /// given, then fire the mount hook.
    pub fn mount(&self, parent: &Element, reference: Option<&Element>) {
        match reference {
            Some(reference) => parent.insert_before(&self.inner.element, reference),
            None => parent.append_child(&self.inner.element),
        }

        let hook = self.inner.on_mount.borrow().clone();
        if let Some(hook) = hook {
            hook();
        }
    }

    /// Tear the node down: fire the unmount hook, recursively unmount
    /// children, then detach the element.
    pub fn unmount(&self) {
        let hook = self.inner.on_unmount.borrow().clone();
        if let Some(hook) = hook {
            hook();
        }

        for child in self.inner.children.borrow().iter() {
            child.unmount();
        }

        self.inner.element.remove();
    }

    /// Unmount and drop all child nodes, keeping this node itself mounted.
    pub fn unmount_children(&self) {
        let children = std::mem::take(&mut *self.inner.children.borrow_mut());
        for child in children {
            child.unmount();
        }
    }

    /// Attach this node as a child of `parent`.
    pub fn child_of(self, parent: &Node) {
        parent.attach_child(self);
    }

    /// Add one or more child nodes, mounting them into this node's
    /// element immediately.
    pub fn add_child(self, children: impl Into<Children>) -> Self {
        for child in children.into().nodes {
            self.attach_child(child);
        }
        self
    }

    fn attach_child(&self, child: Node) {
        child.mount(&self.inner.element, None);
        self.inner.children.borrow_mut().push(child);
    }

    /// Set the element's text content.
    pub fn text(self, text: impl AsRef<str>) -> Self {
        self.inner.element.set_text(text.as_ref());
        self
    }

    /// Keep the element's text content in sync with `state`.
    pub fn bind_text(self, state: &State<String>) -> Self {
        self.inner.element.set_text(&state.get());

        let element = self.inner.element.clone();
        let _subscription = state.bind(move |value, _old| element.set_text(value));

        self
    }

    /// Set an attribute on the element.
    pub fn attribute(self, name: &str, value: &str) -> Self {
        self.inner.element.set_attribute(name, value);
        self
    }

    /// Set the element's `id`.
    pub fn id(self, id: &str) -> Self {
        self.inner.element.set_attribute("id", id);
        self
    }

    /// Keep the element's `id` in sync with `state`.
    pub fn bind_id(self, state: &State<String>) -> Self {
        self.inner.element.set_attribute("id", &state.get());

        let element = self.inner.element.clone();
        let _subscription =
            state.bind(move |value, _old| element.set_attribute("id", value));

        self
    }

    /// Add a CSS class to the element.
    pub fn style(self, class: &str) -> Self {
        self.inner.element.add_class(class);
        self
    }

    /// Keep the element's class list in sync with `state`.
    ///
    /// On each change, classes missing from the new list are removed and
    /// newly appearing ones are added; classes present in both are left
    /// untouched.
    pub fn bind_style(self, state: &State<Vec<String>>) -> Self {
        for class in state.get() {
            self.inner.element.add_class(&class);
        }

        let element = self.inner.element.clone();
        let _subscription = state.bind(move |new, old| {
            for class in old {
                if !new.contains(class) {
                    element.remove_class(class);
                }
            }
            for class in new {
                if !old.contains(class) {
                    element.add_class(class);
                }
            }
        });

        self
    }

    /// Install a click handler on the element.
    pub fn on_click(self, handler: impl Fn() + 'static) -> Self {
        self.inner.element.set_on_click(Rc::new(handler));
        self
    }

    /// Install an input handler on the element, invoked with the input's
    /// current value.
    pub fn on_input(self, handler: impl Fn(&str) + 'static) -> Self {
        self.inner.element.set_on_input(Rc::new(handler));
        self
    }

    /// Register a hook fired after the node's element is inserted.
    pub fn on_mount(self, hook: impl Fn() + 'static) -> Self {
        *self.inner.on_mount.borrow_mut() = Some(Rc::new(hook));
        self
    }

    /// Register a hook fired when the node is unmounted, before its
    /// children are torn down.
    pub fn on_unmount(self, hook: impl Fn() + 'static) -> Self {
        *self.inner.on_unmount.borrow_mut() = Some(Rc::new(hook));
        self
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("tag", &self.inner.element.tag())
            .field("children", &self.inner.children.borrow().len())
            .finish()
    }
}

/// A collection of child nodes accepted by `add_child`.
///
/// Conversions exist from a single node, an optional node, and vectors of
/// either, so conditional composition can hand over `None` instead of a
/// node and have it ignored.
pub struct Children {
    pub(crate) nodes: Vec<Node>,
}

impl From<Node> for Children {
    fn from(node: Node) -> Self {
        Self { nodes: vec![node] }
    }
}

impl From<Option<Node>> for Children {
    fn from(node: Option<Node>) -> Self {
        Self {
            nodes: node.into_iter().collect(),
        }
    }
}

impl From<Vec<Node>> for Children {
    fn from(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }
}

impl From<Vec<Option<Node>>> for Children {
    fn from(nodes: Vec<Option<Node>>) -> Self {
        Self {
            nodes: nodes.into_iter().flatten().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryDocument;

    #[test]
    fn add_child_mounts_immediately() {
        let document = MemoryDocument::new();
        let parent = Node::new(document.create_element("div"));
        let child = Node::new(document.create_element("p")).text("hi");

        let parent = parent.add_child(child);

        assert_eq!(parent.element().outer_html(), "<div><p>hi</p></div>");
        assert_eq!(parent.children().len(), 1);
    }

    #[test]
    fn child_of_attaches_to_parent() {
        let document = MemoryDocument::new();
        let parent = Node::new(document.create_element("div"));

        Node::new(document.create_element("span"))
            .text("a")
            .child_of(&parent);

        assert_eq!(parent.element().outer_html(), "<div><span>a</span></div>");
    }

    #[test]
    fn optional_children_are_skipped() {
        let document = MemoryDocument::new();
        let parent = Node::new(document.create_element("div"));

        let parent = parent.add_child(vec![
            Some(Node::new(document.create_element("a"))),
            None,
            Some(Node::new(document.create_element("b"))),
        ]);

        assert_eq!(parent.children().len(), 2);
    }

    #[test]
    fn bind_text_tracks_state() {
        let document = MemoryDocument::new();
        let state = State::new(String::from("before"));
        let node = Node::new(document.create_element("p")).bind_text(&state);

        assert_eq!(node.element().text(), "before");

        state.set(String::from("after"));
        assert_eq!(node.element().text(), "after");
    }

    #[test]
    fn bind_style_diffs_class_lists() {
        let document = MemoryDocument::new();
        let classes = State::new(vec![String::from("one")]);
        let node = Node::new(document.create_element("p")).bind_style(&classes);
        let element = node.element();

        assert!(element.has_class("one"));

        classes.set(vec![String::from("one"), String::from("two")]);
        assert!(element.has_class("one"));
        assert!(element.has_class("two"));

        classes.set(vec![String::from("two")]);
        assert!(!element.has_class("one"));
        assert!(element.has_class("two"));

        classes.set(Vec::new());
        assert!(!element.has_class("one"));
        assert!(!element.has_class("two"));
    }

    #[test]
    fn bind_id_tracks_state() {
        let document = MemoryDocument::new();
        let state = State::new(String::from("first"));
        let node = Node::new(document.create_element("div")).bind_id(&state);

        assert_eq!(node.element().attribute("id").as_deref(), Some("first"));

        state.set(String::from("second"));
        assert_eq!(node.element().attribute("id").as_deref(), Some("second"));
    }

    #[test]
    fn unmount_order_is_hook_children_detach() {
        let document = MemoryDocument::new();
        let root = document.create_element("div");
        let order = Rc::new(RefCell::new(Vec::new()));

        let order_clone = order.clone();
        let child = Node::new(document.create_element("span"))
            .on_unmount(move || order_clone.borrow_mut().push("child"));

        let order_clone = order.clone();
        let parent = Node::new(document.create_element("div"))
            .on_unmount(move || order_clone.borrow_mut().push("parent"))
            .add_child(child);

        parent.mount(&root, None);
        assert_eq!(root.children().len(), 1);

        parent.unmount();

        assert_eq!(*order.borrow(), vec!["parent", "child"]);
        assert!(root.children().is_empty());
    }

    #[test]
    fn mount_hook_fires_after_insertion() {
        let document = MemoryDocument::new();
        let root = document.create_element("div");
        let mounted = Rc::new(RefCell::new(false));

        let mounted_clone = mounted.clone();
        let node = Node::new(document.create_element("p"))
            .on_mount(move || *mounted_clone.borrow_mut() = true);

        node.mount(&root, None);
        assert!(*mounted.borrow());
    }

    #[test]
    fn mount_before_reference_preserves_order() {
        let document = MemoryDocument::new();
        let root = document.create_element("div");
        let footer = document.create_element("footer");
        root.append_child(&footer);

        let node = Node::new(document.create_element("main"));
        node.mount(&root, Some(&footer));

        let tags: Vec<String> = root.children().iter().map(Element::tag).collect();
        assert_eq!(tags, vec!["main", "footer"]);
    }

    #[test]
    fn unmount_children_keeps_node_mounted() {
        let document = MemoryDocument::new();
        let root = document.create_element("div");
        let parent = Node::new(document.create_element("ul"))
            .add_child(Node::new(document.create_element("li")));

        parent.mount(&root, None);
        parent.unmount_children();

        assert_eq!(root.children().len(), 1);
        assert!(parent.children().is_empty());
        assert_eq!(parent.element().outer_html(), "<ul></ul>");
    }

    #[test]
    fn on_click_reaches_handler() {
        let document = MemoryDocument::new();
        let count = Rc::new(RefCell::new(0));

        let count_clone = count.clone();
        let node = Node::new(document.create_element("button"))
            .on_click(move || *count_clone.borrow_mut() += 1);

        node.element().click();
        assert_eq!(*count.borrow(), 1);
    }
}
