//! Client-side navigation.
//!
//! The [`Router`] owns a route table mapping path templates to view
//! producers, resolves navigated paths against it, and swaps the active
//! view in and out of a root element. Templates are matched in three
//! stages: an exact lookup on the normalized path, then a scan of dynamic
//! templates in registration order, then the fallback view.
//!
//! # View Transitions
//!
//! Swapping views preserves document position: before the old view is
//! unmounted, a short-lived reference element is inserted at its location,
//! the new view mounts before that reference, and the reference is then
//! removed. Static siblings of the routed content keep their place.
//!
//! # Lazy Routes
//!
//! A route registered with [`Router::route_lazy`] defers building its view
//! producer until the first navigation reaches it. The loader runs at most
//! once per template; once resolved, the table entry is rewritten in place
//! so subsequent navigations take the eager path. While a load is in
//! flight, further navigations to the same template retarget the pending
//! mount instead of invoking the loader again, and a resolution that
//! arrives after the user has navigated elsewhere is discarded.

mod matcher;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::dom::{Document, Element};
use crate::error::{Error, Result};
use crate::history::History;
use crate::view::{LazyViewFn, View, ViewData, ViewFn};

use matcher::{match_template, normalize_path, MatchOutcome};

/// Hands spawned navigation futures to the host's event loop.
///
/// Futures are non-`Send`; a host embeds its single-threaded executor
/// here. Without one, the router resolves lazy loads by blocking in place.
pub type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

/// A registered route target.
#[derive(Clone)]
enum RouteView {
    /// Ready to produce a view.
    Eager(ViewFn),
    /// Producer not yet loaded.
    Lazy(LazyViewFn),
}

/// The route table: templates in registration order plus an exact-lookup
/// index.
///
/// Re-registering a template overwrites the entry in place, keeping its
/// original position in the scan order.
#[derive(Default)]
struct RouteTable {
    entries: Vec<(String, RouteView)>,
    index: HashMap<String, usize>,
}

impl RouteTable {
    fn insert(&mut self, template: &str, view: RouteView) {
        match self.index.get(template) {
            Some(&position) => self.entries[position].1 = view,
            None => {
                self.index
                    .insert(template.to_string(), self.entries.len());
                self.entries.push((template.to_string(), view));
            }
        }
    }

    fn get(&self, template: &str) -> Option<&RouteView> {
        self.index
            .get(template)
            .map(|&position| &self.entries[position].1)
    }

    fn iter(&self) -> impl Iterator<Item = &(String, RouteView)> {
        self.entries.iter()
    }
}

/// The currently mounted view and the path that produced it.
struct ActiveView {
    path: String,
    view: View,
}

/// A lazy load awaiting its loader; records where to mount on arrival.
struct PendingLoad {
    path: String,
    data: ViewData,
    generation: u64,
}

struct RouterInner {
    document: Document,
    root: Element,
    history: History,
    spawner: Option<Spawner>,
    routes: RefCell<RouteTable>,
    fallback: RefCell<Option<ViewFn>>,
    active: RefCell<Option<ActiveView>>,
    on_load: RefCell<Vec<Rc<dyn Fn(&str)>>>,
    // Bumped once per navigation; stale lazy resolutions compare against it.
    generation: Cell<u64>,
    in_flight: RefCell<HashMap<String, PendingLoad>>,
}

/// The navigation controller.
///
/// Cheap to clone; clones share the route table and active view.
///
/// # Example
///
/// ```
/// use trellis::dom::memory::MemoryDocument;
/// use trellis::{MemoryHistory, Node, Router, View};
///
/// let document = MemoryDocument::new();
/// let root = document.create_element("div");
/// let router = Router::new(&document, &root, MemoryHistory::new().handle());
///
/// let doc = document.clone();
/// router.route("/", move |_| {
///     View::new(&doc).add_child(Node::new(doc.create_element("p")).text("home"))
/// });
///
/// router.navigate("/").unwrap();
/// assert_eq!(root.outer_html(), "<div><p>home</p></div>");
/// ```
#[derive(Clone)]
pub struct Router {
    inner: Rc<RouterInner>,
}

impl Router {
    /// Create a router mounting views into `root`.
    pub fn new(document: &Document, root: &Element, history: History) -> Self {
        Self::build(document, root, history, None)
    }

    /// Create a router that hands lazy-load futures to `spawner`.
    pub fn with_spawner(
        document: &Document,
        root: &Element,
        history: History,
        spawner: Spawner,
    ) -> Self {
        Self::build(document, root, history, Some(spawner))
    }

    fn build(
        document: &Document,
        root: &Element,
        history: History,
        spawner: Option<Spawner>,
    ) -> Self {
        Self {
            inner: Rc::new(RouterInner {
                document: document.clone(),
                root: root.clone(),
                history,
                spawner,
                routes: RefCell::new(RouteTable::default()),
                fallback: RefCell::new(None),
                active: RefCell::new(None),
                on_load: RefCell::new(Vec::new()),
                generation: Cell::new(0),
                in_flight: RefCell::new(HashMap::new()),
            }),
        }
    }

    /// The document the router creates transition elements in.
    pub fn document(&self) -> Document {
        self.inner.document.clone()
    }

    /// The element routed views mount into.
    pub fn root(&self) -> Element {
        self.inner.root.clone()
    }

    /// The path of the currently mounted view, if any.
    pub fn active_path(&self) -> Option<String> {
        self.inner
            .active
            .borrow()
            .as_ref()
            .map(|active| active.path.clone())
    }

    /// Register a route. The template may contain `{name}` placeholders
    /// for dynamic segments; captured values reach the view function
    /// through [`ViewData`].
    pub fn route(&self, template: &str, view: impl Fn(&ViewData) -> View + 'static) {
        self.inner
            .routes
            .borrow_mut()
            .insert(normalize_path(template), RouteView::Eager(Rc::new(view)));
    }

    /// Register a route whose view producer is loaded on first use.
    pub fn route_lazy(
        &self,
        template: &str,
        loader: impl Fn() -> LocalBoxFuture<'static, ViewFn> + 'static,
    ) {
        self.inner
            .routes
            .borrow_mut()
            .insert(normalize_path(template), RouteView::Lazy(Rc::new(loader)));
    }

    /// Register the view shown when no route matches.
    pub fn fallback_to(&self, view: impl Fn(&ViewData) -> View + 'static) {
        *self.inner.fallback.borrow_mut() = Some(Rc::new(view));
    }

    /// Register a callback fired after each completed view transition,
    /// receiving the navigated path as written.
    pub fn on_router_load(&self, callback: impl Fn(&str) + 'static) {
        self.inner.on_load.borrow_mut().push(Rc::new(callback));
    }

    /// Navigate to `path`, pushing a new history entry.
    pub fn navigate(&self, path: &str) -> Result<()> {
        self.inner.history.push(path);
        self.load(path)
    }

    /// Navigate to `path`, replacing the current history entry.
    pub fn navigate_replace(&self, path: &str) -> Result<()> {
        self.inner.history.replace(path);
        self.load(path)
    }

    /// Resolve `path` without touching history. Hosts call this when the
    /// history cursor moves on its own, e.g. browser back/forward.
    pub fn handle_pop(&self, path: &str) -> Result<()> {
        self.load(path)
    }

    fn load(&self, path: &str) -> Result<()> {
        self.inner.generation.set(self.inner.generation.get() + 1);
        let normalized = normalize_path(path).to_string();

        tracing::debug!(target: "trellis::router", path, "resolving route");

        let exact = self
            .inner
            .routes
            .borrow()
            .get(&normalized)
            .cloned();
        if let Some(target) = exact {
            return match target {
                RouteView::Eager(producer) => {
                    self.mount_view(path, &producer, ViewData::empty());
                    Ok(())
                }
                RouteView::Lazy(loader) => {
                    self.load_lazy(normalized, loader, ViewData::empty(), path);
                    Ok(())
                }
            };
        }

        if let Some((template, target, segments)) = self.match_dynamic(&normalized)? {
            return match target {
                RouteView::Eager(producer) => {
                    self.mount_view(path, &producer, ViewData::with_segments(segments));
                    Ok(())
                }
                RouteView::Lazy(loader) => {
                    self.load_lazy(template, loader, ViewData::with_segments(segments), path);
                    Ok(())
                }
            };
        }

        let fallback = self.inner.fallback.borrow().clone();
        if let Some(producer) = fallback {
            tracing::debug!(target: "trellis::router", path, "no route matched, using fallback");
            self.mount_view(path, &producer, ViewData::empty());
            return Ok(());
        }

        tracing::error!(target: "trellis::router", path, "no route matched and no fallback set");
        Err(Error::Unroutable {
            path: path.to_string(),
        })
    }

    /// Scan dynamic templates in registration order; first match wins.
    fn match_dynamic(
        &self,
        normalized: &str,
    ) -> Result<Option<(String, RouteView, crate::view::PathSegments)>> {
        let routes = self.inner.routes.borrow();
        for (template, target) in routes.iter() {
            if let MatchOutcome::Match(segments) = match_template(normalized, template)? {
                return Ok(Some((template.clone(), target.clone(), segments)));
            }
        }
        Ok(None)
    }

    fn load_lazy(&self, template: String, loader: LazyViewFn, data: ViewData, path: &str) {
        let generation = self.inner.generation.get();
        let pending = PendingLoad {
            path: path.to_string(),
            data,
            generation,
        };

        let mut in_flight = self.inner.in_flight.borrow_mut();
        if let Some(existing) = in_flight.get_mut(&template) {
            // Loader already running; retarget the pending mount.
            tracing::debug!(target: "trellis::router", %template, "load already in flight");
            *existing = pending;
            return;
        }
        in_flight.insert(template.clone(), pending);
        drop(in_flight);

        let router = self.clone();
        let task = async move {
            let producer = loader().await;
            router.finish_lazy(&template, producer);
        };

        match &self.inner.spawner {
            Some(spawner) => spawner(Box::pin(task)),
            None => {
                // No event loop available, resolving in place.
                futures::executor::block_on(task);
            }
        }
    }

    fn finish_lazy(&self, template: &str, producer: ViewFn) {
        // Rewrite the table entry so later navigations skip the loader.
        self.inner
            .routes
            .borrow_mut()
            .insert(template, RouteView::Eager(producer.clone()));

        let pending = self.inner.in_flight.borrow_mut().remove(template);
        let Some(pending) = pending else {
            return;
        };

        if pending.generation != self.inner.generation.get() {
            tracing::debug!(
                target: "trellis::router",
                %template,
                "discarding stale lazy resolution"
            );
            return;
        }

        self.mount_view(&pending.path, &producer, pending.data);
    }

    /// Swap the active view: mark the old view's position, unmount it,
    /// mount the new view at the mark, then notify load callbacks.
    fn mount_view(&self, path: &str, producer: &ViewFn, data: ViewData) {
        let previous = self.inner.active.borrow_mut().take();

        let reference = previous
            .as_ref()
            .and_then(|active| self.create_reference_node(active));

        if let Some(previous) = &previous {
            previous.view.unmount();
        }

        let view = producer(&data);
        view.mount(&self.inner.root, reference.as_ref());

        if let Some(reference) = reference {
            reference.remove();
        }

        *self.inner.active.borrow_mut() = Some(ActiveView {
            path: path.to_string(),
            view,
        });

        tracing::debug!(target: "trellis::router", path, "view mounted");

        let callbacks = self.inner.on_load.borrow().clone();
        for callback in callbacks {
            callback(path);
        }
    }

    /// Insert a placeholder element at the outgoing view's position, so
    /// the incoming view can take over the same spot in document order.
    fn create_reference_node(&self, active: &ActiveView) -> Option<Element> {
        let first = active.view.first_child().map(|node| node.element());
        let Some(first) = first else {
            tracing::warn!(
                target: "trellis::router",
                path = %active.path,
                "active view has no elements, new view will append to the root"
            );
            return None;
        };

        let reference = self.inner.document.create_element("div");
        self.inner.root.insert_before(&reference, &first);
        Some(reference)
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.inner.routes.borrow().entries.len())
            .field("active", &self.active_path())
            .finish_non_exhaustive()
    }
}
