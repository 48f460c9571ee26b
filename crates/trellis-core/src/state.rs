//! Reactive state containers for Trellis.
//!
//! This module provides the single source-of-truth primitive that views
//! subscribe to. A [`State<V>`] holds a value and notifies bound listeners
//! when the value changes; [`MappedState<M>`] derives its value from an
//! upstream state through a pure function.
//!
//! # Key Types
//!
//! - [`State<V>`] - A value container with change notification
//! - [`MappedState<M>`] - A derived container kept in sync by a one-way
//!   subscription
//! - [`Subscription`] - A capability that removes exactly one listener
//! - [`ListenerKey`] - Unique identifier for a bound listener
//!
//! # Change Detection
//!
//! A state may carry a caller-defined equality function. `set` notifies
//! listeners only when that function reports the old and new value as
//! different; without one, every `set` notifies. Listeners receive both the
//! new and the previous value, which binding code uses to diff (for example
//! a CSS class-list binding removes exactly the classes that disappeared).
//!
//! # Threading
//!
//! Trellis runs on a single cooperative UI thread. State handles are
//! `Rc`-based and deliberately `!Send`: listeners routinely capture DOM
//! element handles, which never leave the UI thread.
//!
//! # Example
//!
//! ```
//! use trellis_core::State;
//!
//! let counter = State::new(0);
//! let label = counter.map(|value| format!("Clicked {value} times"));
//!
//! assert_eq!(label.get(), "Clicked 0 times");
//! counter.set(3);
//! assert_eq!(label.get(), "Clicked 3 times");
//!
//! // Severing the derivation leaves the mapped value readable and settable.
//! label.unbind();
//! counter.set(4);
//! assert_eq!(label.get(), "Clicked 3 times");
//! ```

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::{Rc, Weak};

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for a listener bound to a [`State`].
    ///
    /// Keys are handed out by [`State::bind`] (wrapped in a
    /// [`Subscription`]) and stay valid until the listener is removed.
    pub struct ListenerKey;
}

type Listener<V> = Rc<dyn Fn(&V, &V)>;
type EqualsFn<V> = Rc<dyn Fn(&V, &V) -> bool>;

struct StateInner<V> {
    value: RefCell<V>,
    equals: Option<EqualsFn<V>>,
    listeners: RefCell<SlotMap<ListenerKey, Listener<V>>>,
}

/// A reactive value container with change notification.
///
/// `State<V>` is a cheap-to-clone handle; clones share the same underlying
/// value and listener set. Reading clones the value (like a property
/// getter), writing runs change detection and then notifies every bound
/// listener in binding order.
///
/// # Notification Semantics
///
/// Listeners are invoked synchronously from `set`, against a snapshot of
/// the listener set taken before the first invocation. A listener may
/// therefore unsubscribe itself or others mid-pass without destabilizing
/// the iteration. Nested `set` calls from inside a listener are allowed and
/// each trigger their own full notification pass immediately; there is no
/// batching or deduplication.
pub struct State<V> {
    inner: Rc<StateInner<V>>,
}

impl<V> Clone for State<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<V: Clone + 'static> State<V> {
    /// Create a new state with an initial value and no equality function.
    ///
    /// Without an equality function every `set` notifies, even when the new
    /// value equals the old one.
    pub fn new(value: V) -> Self {
        Self::build(value, None)
    }

    /// Create a new state with a caller-defined equality function.
    ///
    /// `set` will skip both the mutation and the notification whenever
    /// `equals(&old, &new)` returns `true`.
    ///
    /// # Example
    ///
    /// ```
    /// use trellis_core::State;
    ///
    /// let state = State::with_equals(0, |a, b| a == b);
    /// state.set(0); // no-op, listeners stay silent
    /// state.set(1); // mutates and notifies
    /// assert_eq!(state.get(), 1);
    /// ```
    pub fn with_equals(value: V, equals: impl Fn(&V, &V) -> bool + 'static) -> Self {
        Self::build(value, Some(Rc::new(equals)))
    }

    fn build(value: V, equals: Option<EqualsFn<V>>) -> Self {
        Self {
            inner: Rc::new(StateInner {
                value: RefCell::new(value),
                equals,
                listeners: RefCell::new(SlotMap::with_key()),
            }),
        }
    }

    /// Get the current value.
    ///
    /// This clones the value and has no side effects.
    pub fn get(&self) -> V {
        self.inner.value.borrow().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&V) -> R,
    {
        f(&self.inner.value.borrow())
    }

    /// Set the value, notifying listeners if it changed.
    ///
    /// Change detection is delegated to the equality function supplied at
    /// construction; a state built without one treats every `set` as a
    /// change. When the value is unchanged nothing happens at all: no
    /// mutation, no notification.
    pub fn set(&self, value: V) {
        let changed = match &self.inner.equals {
            Some(equals) => !equals(&self.inner.value.borrow(), &value),
            None => true,
        };

        if !changed {
            tracing::trace!(target: "trellis_core::state", "value unchanged, skipping notification");
            return;
        }

        let old = self.inner.value.replace(value);
        let new = self.inner.value.borrow().clone();

        // Snapshot before invoking anything: listeners may unsubscribe
        // themselves or others, or call `set` again, mid-pass.
        let snapshot: Vec<Listener<V>> = self.inner.listeners.borrow().values().cloned().collect();

        tracing::trace!(
            target: "trellis_core::state",
            listeners = snapshot.len(),
            "notifying listeners"
        );

        for listener in snapshot {
            listener(&new, &old);
        }
    }

    /// Bind a listener, invoked with `(new, old)` on every change.
    ///
    /// Returns a [`Subscription`] that removes exactly this listener when
    /// [`Subscription::unsubscribe`] is called. Dropping the subscription
    /// without unsubscribing leaves the listener bound for the lifetime of
    /// the state; there is no automatic cleanup.
    pub fn bind(&self, listener: impl Fn(&V, &V) + 'static) -> Subscription {
        let key = self.inner.listeners.borrow_mut().insert(Rc::new(listener));
        let weak: Weak<StateInner<V>> = Rc::downgrade(&self.inner);

        Subscription {
            detach: Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.listeners.borrow_mut().remove(key);
                }
            }),
        }
    }

    /// Get the number of currently bound listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Derive a new state whose value is `f` applied to this state's value.
    ///
    /// The mapped state is initialized to `f(&current)` and re-computed on
    /// every notification from this state. The upstream subscription is
    /// owned exclusively by the returned [`MappedState`]; release it with
    /// [`MappedState::unbind`] when the derived state is no longer needed,
    /// otherwise the listener stays bound to this state.
    pub fn map<M, F>(&self, f: F) -> MappedState<M>
    where
        M: Clone + 'static,
        F: Fn(&V) -> M + 'static,
    {
        let mapped = State::new(f(&self.inner.value.borrow()));
        let target = mapped.clone();
        let upstream = self.bind(move |new, _old| target.set(f(new)));

        MappedState {
            state: mapped,
            upstream: RefCell::new(Some(upstream)),
        }
    }
}

impl<V: Clone + fmt::Debug + 'static> fmt::Debug for State<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State").field("value", &self.get()).finish()
    }
}

impl<V: Clone + Default + 'static> Default for State<V> {
    fn default() -> Self {
        Self::new(V::default())
    }
}

/// A capability that removes exactly one bound listener.
///
/// Returned by [`State::bind`]. Calling [`unsubscribe`](Self::unsubscribe)
/// more than once is a safe no-op, as is unsubscribing after the state has
/// been dropped. The subscription holds no strong reference to the state.
pub struct Subscription {
    detach: Box<dyn Fn()>,
}

impl Subscription {
    /// Remove the listener this subscription was created for.
    pub fn unsubscribe(&self) {
        (self.detach)();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

/// A state derived from an upstream [`State`] through a pure function.
///
/// Created by [`State::map`]. The mapped state dereferences to
/// [`State<M>`], so it can be read, written, bound, and mapped further like
/// any other state. It additionally owns the subscription that keeps it in
/// sync with its upstream; [`unbind`](Self::unbind) releases that
/// subscription, after which the mapped state no longer follows upstream
/// changes but remains readable and externally settable.
pub struct MappedState<M> {
    state: State<M>,
    upstream: RefCell<Option<Subscription>>,
}

impl<M> MappedState<M> {
    /// Detach from the upstream state.
    ///
    /// Idempotent: calling this more than once does nothing further. This
    /// is the only way the upstream listener is released; dropping the
    /// mapped state without unbinding leaks the listener.
    pub fn unbind(&self) {
        if let Some(upstream) = self.upstream.borrow_mut().take() {
            upstream.unsubscribe();
        }
    }

    /// Whether the upstream subscription is still attached.
    pub fn is_bound(&self) -> bool {
        self.upstream.borrow().is_some()
    }
}

impl<M> Deref for MappedState<M> {
    type Target = State<M>;

    fn deref(&self) -> &State<M> {
        &self.state
    }
}

impl<M: Clone + fmt::Debug + 'static> fmt::Debug for MappedState<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappedState")
            .field("value", &self.get())
            .field("bound", &self.is_bound())
            .finish()
    }
}
