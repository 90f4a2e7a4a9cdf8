//! Logging facilities for horizon-controls.
//!
//! Everything in the workspace logs through the `tracing` crate. Nothing is
//! printed unless the application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_controls::selection=debug")
//!     .init();
//! ```
//!
//! Use the constants in [`targets`] to filter a single subsystem.

/// Target names for log filtering.
pub mod targets {
    /// Core primitives target.
    pub const CORE: &str = "horizon_controls_core";
    /// Signal/slot target.
    pub const SIGNAL: &str = "horizon_controls_core::signal";
    /// Observable list target.
    pub const LIST: &str = "horizon_controls_core::list";
    /// Input binding and dispatch target.
    pub const INPUT: &str = "horizon_controls::input";
    /// Behavior lifecycle target.
    pub const BEHAVIOR: &str = "horizon_controls::behavior";
    /// Selection, focus and anchor target.
    pub const SELECTION: &str = "horizon_controls::selection";
    /// Layout pass target.
    pub const LAYOUT: &str = "horizon_controls::layout";
    /// Configuration loading target.
    pub const CONFIG: &str = "horizon_controls::config";
}

/// Span names used for performance tracing.
pub mod span_names {
    /// A container's `layout_children` pass.
    pub const LAYOUT_PASS: &str = "horizon_controls::layout_pass";
    /// A single input event dispatch.
    pub const DISPATCH: &str = "horizon_controls::dispatch";
}

/// A performance span that stays entered until dropped.
///
/// ```ignore
/// let _span = PerfSpan::new(span_names::LAYOUT_PASS);
/// // ... timed work ...
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enter a span named after `operation`.
    pub fn new(operation: &'static str) -> Self {
        let span = tracing::debug_span!(target: "horizon_controls::perf", "perf", operation);
        Self {
            span: span.entered(),
        }
    }
}
