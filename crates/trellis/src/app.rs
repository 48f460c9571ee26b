//! Application bootstrap.
//!
//! An [`App`] ties a document, a root element, and a [`Router`] together
//! and mounts the initial layout. The layout is an ordered list of
//! [`LayoutSlot`]s: static views that mount once and stay, and the single
//! routed slot whose content the router swaps on navigation. Slots mount
//! in order, so static chrome placed after the routed slot stays below the
//! routed content across navigations.
//!
//! # Example
//!
//! ```
//! use trellis::dom::memory::MemoryDocument;
//! use trellis::{html, App, LayoutSlot, MemoryHistory, View};
//! use std::rc::Rc;
//!
//! let document = MemoryDocument::new();
//! let root = document.create_element("div");
//! let app = App::new(&document, &root, MemoryHistory::new().handle());
//!
//! let doc = document.clone();
//! app.router().route("/", move |_| {
//!     View::new(&doc).add_child(html::p(&doc, "home"))
//! });
//!
//! let doc = document.clone();
//! app.compose_layout(vec![
//!     LayoutSlot::View(Rc::new(move |_| {
//!         View::new(&doc).add_child(html::h1(&doc, "My App"))
//!     })),
//!     LayoutSlot::Router,
//! ]);
//!
//! app.start("/").unwrap();
//! assert_eq!(root.outer_html(), "<div><h1>My App</h1><p>home</p></div>");
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::dom::{Document, Element};
use crate::error::{Error, Result};
use crate::history::History;
use crate::router::{Router, Spawner};
use crate::view::{ViewData, ViewFn};

/// One position in the application layout.
#[derive(Clone)]
pub enum LayoutSlot {
    /// The routed slot; its content is controlled by the [`Router`].
    Router,
    /// A static view, mounted once at startup.
    View(ViewFn),
}

struct AppInner {
    document: Document,
    root: Element,
    router: Router,
    layout: RefCell<Option<Vec<LayoutSlot>>>,
    started: Cell<bool>,
}

/// The application handle.
///
/// Cheap to clone; clones share the router and layout.
#[derive(Clone)]
pub struct App {
    inner: Rc<AppInner>,
}

impl App {
    /// Create an application rendering into `root`.
    pub fn new(document: &Document, root: &Element, history: History) -> Self {
        let router = Router::new(document, root, history);
        Self::build(document, root, router)
    }

    /// Create an application whose router hands lazy-load futures to
    /// `spawner`.
    pub fn with_spawner(
        document: &Document,
        root: &Element,
        history: History,
        spawner: Spawner,
    ) -> Self {
        let router = Router::with_spawner(document, root, history, spawner);
        Self::build(document, root, router)
    }

    fn build(document: &Document, root: &Element, router: Router) -> Self {
        Self {
            inner: Rc::new(AppInner {
                document: document.clone(),
                root: root.clone(),
                router,
                layout: RefCell::new(None),
                started: Cell::new(false),
            }),
        }
    }

    /// The application's router.
    pub fn router(&self) -> Router {
        self.inner.router.clone()
    }

    /// The document the application renders into.
    pub fn document(&self) -> Document {
        self.inner.document.clone()
    }

    /// The root element.
    pub fn root(&self) -> Element {
        self.inner.root.clone()
    }

    /// Define the layout mounted at startup. Without a layout, the routed
    /// content is all the application renders.
    pub fn compose_layout(&self, slots: Vec<LayoutSlot>) {
        *self.inner.layout.borrow_mut() = Some(slots);
    }

    /// Mount the layout and resolve the initial `path`.
    ///
    /// The initial navigation replaces the current history entry rather
    /// than pushing a new one. Fails with [`Error::AlreadyStarted`] on a
    /// second call.
    pub fn start(&self, path: &str) -> Result<()> {
        if self.inner.started.replace(true) {
            return Err(Error::AlreadyStarted);
        }

        tracing::debug!(target: "trellis::router", path, "starting application");

        let layout = self.inner.layout.borrow().clone();
        let Some(slots) = layout else {
            return self.inner.router.navigate_replace(path);
        };

        let data = ViewData::empty();
        for slot in slots {
            match slot {
                LayoutSlot::Router => {
                    self.inner.router.navigate_replace(path)?;
                }
                LayoutSlot::View(producer) => {
                    producer(&data).mount(&self.inner.root, None);
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("started", &self.inner.started.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryDocument;
    use crate::history::MemoryHistory;
    use crate::html;
    use crate::view::View;

    fn setup() -> (Document, Element, MemoryHistory, App) {
        let document = MemoryDocument::new();
        let root = document.create_element("div");
        let history = MemoryHistory::new();
        let app = App::new(&document, &root, history.handle());
        (document, root, history, app)
    }

    #[test]
    fn start_without_layout_navigates() {
        let (document, root, history, app) = setup();

        let doc = document.clone();
        app.router()
            .route("/", move |_| View::new(&doc).add_child(html::p(&doc, "home")));

        app.start("/").unwrap();

        assert_eq!(root.outer_html(), "<div><p>home</p></div>");
        assert_eq!(history.len(), 1);
        assert_eq!(history.current().as_deref(), Some("/"));
    }

    #[test]
    fn start_twice_fails() {
        let (document, _root, _history, app) = setup();

        let doc = document.clone();
        app.router()
            .route("/", move |_| View::new(&doc).add_child(html::p(&doc, "home")));

        app.start("/").unwrap();
        assert!(matches!(app.start("/"), Err(Error::AlreadyStarted)));
    }

    #[test]
    fn layout_mounts_slots_in_order() {
        let (document, root, _history, app) = setup();

        let doc = document.clone();
        app.router()
            .route("/", move |_| View::new(&doc).add_child(html::p(&doc, "home")));

        let doc = document.clone();
        let header: ViewFn =
            Rc::new(move |_| View::new(&doc).add_child(html::h1(&doc, "Header")));
        let doc = document.clone();
        let footer: ViewFn = Rc::new(move |_| {
            View::new(&doc).add_child(html::element(&doc, "footer").text("Footer"))
        });

        app.compose_layout(vec![
            LayoutSlot::View(header),
            LayoutSlot::Router,
            LayoutSlot::View(footer),
        ]);
        app.start("/").unwrap();

        assert_eq!(
            root.outer_html(),
            "<div><h1>Header</h1><p>home</p><footer>Footer</footer></div>"
        );
    }

    #[test]
    fn routed_slot_keeps_position_across_navigations() {
        let (document, root, _history, app) = setup();

        let doc = document.clone();
        app.router()
            .route("/", move |_| View::new(&doc).add_child(html::p(&doc, "home")));
        let doc = document.clone();
        app.router()
            .route("/other", move |_| View::new(&doc).add_child(html::p(&doc, "other")));

        let doc = document.clone();
        let footer: ViewFn = Rc::new(move |_| {
            View::new(&doc).add_child(html::element(&doc, "footer").text("Footer"))
        });

        app.compose_layout(vec![LayoutSlot::Router, LayoutSlot::View(footer)]);
        app.start("/").unwrap();

        app.router().navigate("/other").unwrap();
        assert_eq!(
            root.outer_html(),
            "<div><p>other</p><footer>Footer</footer></div>"
        );
    }
}
