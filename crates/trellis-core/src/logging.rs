//! Logging facilities for Trellis.
//!
//! Trellis uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! Every subsystem logs under a stable target so filters can single it
//! out, e.g. `RUST_LOG=trellis::router=debug`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Reactive state changes and notification passes.
    pub const STATE: &str = "trellis_core::state";
    /// Route resolution and view transitions.
    pub const ROUTER: &str = "trellis::router";
    /// View composition and mounting.
    pub const VIEW: &str = "trellis::view";
    /// DOM backend operations.
    pub const DOM: &str = "trellis::dom";
}
