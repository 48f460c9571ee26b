//! Trellis - a reactive single-page application framework.
//!
//! Trellis renders views into a host document through a pluggable DOM
//! backend, keeps them up to date with reactive [`State`] bindings, and
//! swaps them on navigation through a client-side [`Router`].
//!
//! # Example
//!
//! ```
//! use trellis::dom::memory::MemoryDocument;
//! use trellis::{html, App, MemoryHistory, State, View};
//!
//! let document = MemoryDocument::new();
//! let root = document.create_element("div");
//! let app = App::new(&document, &root, MemoryHistory::new().handle());
//!
//! let doc = document.clone();
//! app.router().route("/", move |_| {
//!     let count = State::new(0u32);
//!     let label = count.map(|n| format!("Clicked {n} times"));
//!
//!     let increment = count.clone();
//!     View::new(&doc)
//!         .add_child(html::p(&doc, "").bind_text(&label))
//!         .add_child(html::button(&doc, "+").on_click(move || {
//!             increment.set(increment.get() + 1);
//!         }))
//! });
//!
//! app.start("/").unwrap();
//! assert_eq!(
//!     root.outer_html(),
//!     "<div><p>Clicked 0 times</p><button>+</button></div>"
//! );
//! ```

pub mod app;
pub mod dom;
pub mod error;
pub mod history;
pub mod html;
pub mod node;
pub mod prelude;
pub mod router;
pub mod view;

pub use app::{App, LayoutSlot};
pub use error::{Error, Result};
pub use history::{History, HistoryBackend, MemoryHistory};
pub use node::{Children, Node};
pub use router::{Router, Spawner};
pub use view::{LazyViewFn, PathSegments, View, ViewData, ViewFn};

pub use trellis_core::{ListenerKey, MappedState, State, Subscription};
