//! Prelude module for Trellis.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use trellis::prelude::*;
//! ```
//!
//! This provides access to:
//! - Application lifecycle (`App`, `LayoutSlot`)
//! - Navigation (`Router`, `History`, `MemoryHistory`)
//! - Views and nodes (`View`, `ViewData`, `Node`)
//! - Reactive state (`State`, `MappedState`, `Subscription`)
//! - Element shorthands (the `html` module)

pub use crate::app::{App, LayoutSlot};
pub use crate::dom::{Document, Element};
pub use crate::error::{Error, Result};
pub use crate::history::{History, MemoryHistory};
pub use crate::html;
pub use crate::node::{Children, Node};
pub use crate::router::Router;
pub use crate::view::{View, ViewData, ViewFn};

pub use trellis_core::{MappedState, State, Subscription};
