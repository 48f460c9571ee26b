//! Error types for Trellis.

/// A specialized Result type for Trellis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while navigating and mounting views.
///
/// These are the fatal conditions of the navigation layer; degraded
/// conditions (such as a view transition that cannot preserve ordering)
/// are logged and execution continues. The reactive state layer has no
/// error conditions of its own.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No registered route matched the path and no fallback view is set.
    ///
    /// Applications should always register a fallback view to make this
    /// unreachable.
    #[error("no route matches '{path}' and no fallback view is registered")]
    Unroutable {
        /// The path that failed to resolve.
        path: String,
    },

    /// A route template uses the wildcard marker, which is not supported.
    ///
    /// Detected when the template is first matched against, not at
    /// registration time.
    #[error("route template '{template}' uses the unsupported wildcard marker ':*'")]
    UnsupportedPattern {
        /// The offending template.
        template: String,
    },

    /// [`App::start`](crate::App::start) was called more than once on the
    /// same instance.
    #[error("the application has already been started")]
    AlreadyStarted,
}
