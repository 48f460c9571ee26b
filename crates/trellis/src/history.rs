//! Host history integration.
//!
//! The router records navigations in the host's history mechanism through
//! the [`History`] handle; a browser backend maps this onto
//! `pushState`/`replaceState`. The "entry changed via back/forward"
//! subscription is host wiring: the host observes its own popstate-style
//! event and feeds the new path to
//! [`Router::handle_pop`](crate::Router::handle_pop).
//!
//! [`MemoryHistory`] is the bundled backend for headless use and tests:
//! it keeps an entry stack with a cursor and exposes
//! [`back`](MemoryHistory::back)/[`forward`](MemoryHistory::forward) so
//! tests can traverse it.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Backend trait for the host's navigation history.
pub trait HistoryBackend {
    /// Push a new entry for `path`.
    fn push(&self, path: &str);

    /// Replace the current entry with `path`.
    fn replace(&self, path: &str);
}

/// A cheap-to-clone handle to a history backend.
#[derive(Clone)]
pub struct History {
    backend: Rc<dyn HistoryBackend>,
}

impl History {
    /// Wrap a backend in a history handle.
    pub fn new(backend: Rc<dyn HistoryBackend>) -> Self {
        Self { backend }
    }

    /// Push a new entry for `path`.
    pub fn push(&self, path: &str) {
        self.backend.push(path);
    }

    /// Replace the current entry with `path`.
    pub fn replace(&self, path: &str) {
        self.backend.replace(path);
    }
}

impl fmt::Debug for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History").finish_non_exhaustive()
    }
}

/// An in-memory history: an entry stack with a cursor.
///
/// Pushing while the cursor is behind the top truncates the forward
/// entries, mirroring browser history semantics.
#[derive(Clone, Default)]
pub struct MemoryHistory {
    inner: Rc<MemoryHistoryInner>,
}

#[derive(Default)]
struct MemoryHistoryInner {
    entries: RefCell<Vec<String>>,
    cursor: Cell<usize>,
}

impl MemoryHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// A [`History`] handle backed by this instance.
    pub fn handle(&self) -> History {
        History::new(Rc::new(self.clone()))
    }

    /// The entry the cursor currently points at.
    pub fn current(&self) -> Option<String> {
        self.inner.entries.borrow().get(self.inner.cursor.get()).cloned()
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.inner.entries.borrow().len()
    }

    /// Whether the history holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.entries.borrow().is_empty()
    }

    /// Move the cursor one entry back and return the path it lands on.
    ///
    /// The caller is expected to feed the returned path to
    /// [`Router::handle_pop`](crate::Router::handle_pop), the way a
    /// browser host wires its popstate event.
    pub fn back(&self) -> Option<String> {
        let cursor = self.inner.cursor.get();
        if cursor == 0 {
            return None;
        }
        self.inner.cursor.set(cursor - 1);
        self.current()
    }

    /// Move the cursor one entry forward and return the path it lands on.
    pub fn forward(&self) -> Option<String> {
        let cursor = self.inner.cursor.get();
        if cursor + 1 >= self.len() {
            return None;
        }
        self.inner.cursor.set(cursor + 1);
        self.current()
    }
}

impl HistoryBackend for MemoryHistory {
    fn push(&self, path: &str) {
        let mut entries = self.inner.entries.borrow_mut();
        if entries.is_empty() {
            entries.push(path.to_string());
            self.inner.cursor.set(0);
            return;
        }

        // Drop any forward entries before appending.
        entries.truncate(self.inner.cursor.get() + 1);
        entries.push(path.to_string());
        self.inner.cursor.set(entries.len() - 1);
    }

    fn replace(&self, path: &str) {
        let mut entries = self.inner.entries.borrow_mut();
        if entries.is_empty() {
            entries.push(path.to_string());
            self.inner.cursor.set(0);
        } else {
            let cursor = self.inner.cursor.get();
            entries[cursor] = path.to_string();
        }
    }
}

impl fmt::Debug for MemoryHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryHistory")
            .field("entries", &*self.inner.entries.borrow())
            .field("cursor", &self.inner.cursor.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_replace() {
        let history = MemoryHistory::new();
        let handle = history.handle();

        handle.replace("/");
        assert_eq!(history.current().as_deref(), Some("/"));
        assert_eq!(history.len(), 1);

        handle.push("/a");
        handle.push("/b");
        assert_eq!(history.current().as_deref(), Some("/b"));
        assert_eq!(history.len(), 3);

        handle.replace("/c");
        assert_eq!(history.current().as_deref(), Some("/c"));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn back_and_forward_move_the_cursor() {
        let history = MemoryHistory::new();
        let handle = history.handle();

        handle.push("/");
        handle.push("/a");
        handle.push("/b");

        assert_eq!(history.back().as_deref(), Some("/a"));
        assert_eq!(history.back().as_deref(), Some("/"));
        assert_eq!(history.back(), None);

        assert_eq!(history.forward().as_deref(), Some("/a"));
        assert_eq!(history.forward().as_deref(), Some("/b"));
        assert_eq!(history.forward(), None);
    }

    #[test]
    fn push_truncates_forward_entries() {
        let history = MemoryHistory::new();
        let handle = history.handle();

        handle.push("/");
        handle.push("/a");
        history.back();

        handle.push("/b");
        assert_eq!(history.len(), 2);
        assert_eq!(history.current().as_deref(), Some("/b"));
        assert_eq!(history.forward(), None);
    }
}
