//! Prelude module for Horizon Controls.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use horizon_controls::prelude::*;
//! ```
//!
//! This provides access to:
//! - Input events, bindings and maps (`InputEvent`, `KeyBinding`, `InputMap`)
//! - Behaviors (`Behavior`, `Action`, `ControlKind`)
//! - Controls (`ListView`, `TableView`, `TreeView`, `Button`)
//! - Selection models and the anchor coordinator
//! - Layout panes (`TilePane`, `BorderPane`, `AnchorPane`, `GridPane`)
//! - Geometry and signal types from the core crate

// ============================================================================
// Core Primitives
// ============================================================================

pub use horizon_controls_core::{Insets, ListChange, ObservableList, Point, Property, Rect, Signal, Size};

// ============================================================================
// Input
// ============================================================================

pub use crate::input::{
    Direction, EventKind, FocusHost, HitTarget, InputEvent, InputMap, Key, KeyBinding, KeyboardModifiers, Mapping,
    MouseBinding, MouseButton, Platform, Trigger,
};

// ============================================================================
// Behaviors
// ============================================================================

pub use crate::behavior::{Action, Actionable, Behavior, ControlKind};

// ============================================================================
// Controls
// ============================================================================

pub use crate::control::{Button, Control, ListView, NodeOrientation, Orientation, TableColumn, TableView, TreeView};

// ============================================================================
// Selection
// ============================================================================

pub use crate::selection::{SelectionCoordinator, SelectionMode, SelectionModel, TablePosition, Viewport};

// ============================================================================
// Layout
// ============================================================================

pub use crate::layout::{
    AnchorPane, Anchors, BorderPane, GridPane, HPos, Layout, NodeAccess, NodeId, Pos, SizeHint, TilePane, VPos,
};

// ============================================================================
// Configuration & Errors
// ============================================================================

pub use crate::config::{BehaviorConfig, Keymap, KeymapEntry};
pub use crate::error::ControlsError;
