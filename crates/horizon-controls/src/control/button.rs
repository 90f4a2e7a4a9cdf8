//! Push button state.
//!
//! A button is *armed* while a press that will fire it is in progress. The
//! press may come from the keyboard (Space) or the primary mouse button;
//! the button tracks which, so a keyboard press is not fired or cancelled by
//! pointer movement and vice versa.

use horizon_controls_core::Signal;

use super::{Control, ControlBase};

/// A push button.
#[derive(Debug)]
pub struct Button {
    /// Base control state.
    base: ControlBase,

    /// The button's label.
    text: String,

    /// Whether releasing the current press fires the button.
    armed: bool,

    /// Whether the current press came from the keyboard.
    key_down: bool,

    /// Whether the primary mouse button is held on the button.
    mouse_held: bool,

    /// Signal emitted when the button fires.
    pub action: Signal<()>,

    /// Signal emitted when the armed state changes.
    pub armed_changed: Signal<bool>,
}

impl Button {
    /// Create a button labelled `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            base: ControlBase::new(),
            text: text.into(),
            armed: false,
            key_down: false,
            mouse_held: false,
            action: Signal::new(),
            armed_changed: Signal::new(),
        }
    }

    /// The label.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set the label.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Whether a press is in progress that will fire on release.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Arm the button.
    pub fn arm(&mut self) {
        if !self.armed {
            self.armed = true;
            self.armed_changed.emit(true);
        }
    }

    /// Disarm the button without firing.
    pub fn disarm(&mut self) {
        if self.armed {
            self.armed = false;
            self.armed_changed.emit(false);
        }
    }

    /// Fire the button's action.
    pub fn fire(&self) {
        self.action.emit(());
    }

    /// Whether the current press came from the keyboard.
    pub fn is_key_down(&self) -> bool {
        self.key_down
    }

    pub(crate) fn set_key_down(&mut self, down: bool) {
        self.key_down = down;
    }

    /// Whether the primary mouse button is held on the button.
    pub fn is_mouse_held(&self) -> bool {
        self.mouse_held
    }

    pub(crate) fn set_mouse_held(&mut self, held: bool) {
        self.mouse_held = held;
    }
}

impl Control for Button {
    fn control_base(&self) -> &ControlBase {
        &self.base
    }

    fn control_base_mut(&mut self) -> &mut ControlBase {
        &mut self.base
    }
}
