//! Core systems for Trellis.
//!
//! This crate provides the foundational reactive primitive of the Trellis
//! single-page-application framework:
//!
//! - **State**: value containers with equality-gated change notification
//! - **Derivation**: mapped states kept in sync by one-way subscriptions
//! - **Subscriptions**: explicit, idempotent listener removal
//!
//! Everything here is UI-agnostic; the DOM, view, and routing layers live
//! in the `trellis` crate and subscribe to these containers.
//!
//! # Example
//!
//! ```
//! use trellis_core::State;
//!
//! let name = State::new(String::from("world"));
//! let greeting = name.map(|name| format!("Hello, {name}!"));
//!
//! name.set(String::from("trellis"));
//! assert_eq!(greeting.get(), "Hello, trellis!");
//! ```

pub mod logging;
pub mod state;

pub use state::{ListenerKey, MappedState, State, Subscription};
