//! Core primitives for horizon-controls.
//!
//! This crate provides the small reactive foundation the behavior layer is
//! built on:
//!
//! - **Signal/Slot System**: typed, synchronous observer registration with
//!   explicit unsubscribe ([`Signal`], [`ConnectionId`])
//! - **Property System**: change-detecting value cells ([`Property`])
//! - **Observable Lists**: item vectors that announce structural changes
//!   ([`ObservableList`], [`ListChange`])
//! - **Geometry**: [`Point`], [`Size`], [`Rect`], [`Insets`]
//! - **Logging**: `tracing` targets and span helpers ([`logging`])
//!
//! # Observing a List
//!
//! ```
//! use horizon_controls_core::{ListChange, ObservableList};
//! use parking_lot::Mutex;
//! use std::sync::Arc;
//!
//! let mut rows = ObservableList::from_vec(vec!["alpha", "beta"]);
//! let last = Arc::new(Mutex::new(None));
//!
//! let sink = last.clone();
//! let id = rows.changed().connect(move |change: &ListChange| {
//!     *sink.lock() = Some(change.clone());
//! });
//!
//! rows.push("gamma");
//! assert_eq!(*last.lock(), Some(ListChange::Added { from: 2, count: 1 }));
//! rows.changed().disconnect(id);
//! ```

pub mod error;
pub mod geometry;
pub mod logging;
pub mod observable;
pub mod property;
pub mod signal;

pub use error::{CoreError, CoreResult};
pub use geometry::{Insets, Point, Rect, Size};
pub use logging::PerfSpan;
pub use observable::{ListChange, ObservableList};
pub use property::Property;
pub use signal::{ConnectionId, Signal};
