//! Button behavior.
//!
//! Keyboard and pointer presses are tracked separately: a Space press arms
//! the button until Space is released, Escape cancels it, and pointer exit
//! or re-entry has no effect on it. A pointer press arms the button while the
//! pointer stays over it.

use super::action::Action;
use super::kind::ControlKind;
use super::Actionable;
use crate::control::{Button, Control};
use crate::input::{InputEvent, MouseButton};

impl Actionable for Button {
    const KIND: ControlKind = ControlKind::Button;

    fn perform(&mut self, action: Action, event: &mut InputEvent) {
        match action {
            Action::KeyArm => {
                if !self.is_mouse_held() && !self.is_armed() {
                    self.set_key_down(true);
                    self.arm();
                }
            }
            Action::KeyFire => {
                if self.is_key_down() {
                    self.set_key_down(false);
                    if self.is_armed() {
                        self.disarm();
                        self.fire();
                    }
                }
            }
            Action::KeyCancel => {
                if self.is_key_down() {
                    self.set_key_down(false);
                    self.disarm();
                    event.consume();
                }
            }
            Action::MouseArm => {
                let base = self.control_base();
                if !base.is_focused() {
                    base.request_focus();
                }
                if event.button() == Some(MouseButton::Primary) && !self.is_key_down() {
                    self.set_mouse_held(true);
                    self.arm();
                }
            }
            Action::MouseFire => {
                let held = self.is_mouse_held();
                self.set_mouse_held(false);
                if held && !self.is_key_down() && self.is_armed() {
                    self.fire();
                    self.disarm();
                }
            }
            Action::MouseExit => {
                if !self.is_key_down() && self.is_armed() {
                    self.disarm();
                }
            }
            Action::MouseEnter => {
                if !self.is_key_down() && self.is_mouse_held() {
                    self.arm();
                }
            }
            Action::FocusLost => {
                self.set_key_down(false);
                self.set_mouse_held(false);
                self.disarm();
            }
            _ => {}
        }
    }
}
