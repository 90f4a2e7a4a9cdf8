//! Default binding tables, one per [`ControlKind`].
//!
//! A table is plain data: a list of `(trigger, action)` entries for the
//! control's root map plus named scopes that become interceptor-gated child
//! maps when a behavior installs the table. Tables are built on first use
//! and shared read-only by every behavior of that kind for the rest of the
//! process.
//!
//! Bindings that mention `shortcut` resolve against the platform of each
//! event, so one table serves every platform. Conventions that differ by
//! platform live in [`ScopeCondition::Mac`] / [`ScopeCondition::NotMac`]
//! scopes.

use std::sync::OnceLock;

use super::Actionable;
use super::action::Action;
use super::kind::ControlKind;
use crate::control::Orientation;
use crate::input::{EventKind, InputEvent, Key, KeyBinding, MouseBinding, Trigger};

/// One default binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingEntry {
    trigger: Trigger,
    action: Action,
    auto_consume: bool,
    mirror_rtl: bool,
}

impl BindingEntry {
    /// An auto-consuming binding of `trigger` to `action`.
    pub const fn new(trigger: Trigger, action: Action) -> Self {
        Self {
            trigger,
            action,
            auto_consume: true,
            mirror_rtl: false,
        }
    }

    /// Leave consumption to the action, so an unhandled event reaches the
    /// next matching mapping.
    pub const fn without_auto_consume(mut self) -> Self {
        self.auto_consume = false;
        self
    }

    /// Perform the [mirrored](Action::mirrored) action in right-to-left content.
    pub const fn mirrored_in_rtl(mut self) -> Self {
        self.mirror_rtl = true;
        self
    }

    /// The trigger.
    pub fn trigger(&self) -> Trigger {
        self.trigger
    }

    /// The action in left-to-right content.
    pub fn action(&self) -> Action {
        self.action
    }

    /// Whether the mapping consumes every event it handles.
    pub fn auto_consume(&self) -> bool {
        self.auto_consume
    }

    /// Whether the action flips in right-to-left content.
    pub fn mirrors_rtl(&self) -> bool {
        self.mirror_rtl
    }

    /// The action to perform given the content direction.
    pub fn action_for(&self, right_to_left: bool) -> Action {
        if self.mirror_rtl && right_to_left {
            self.action.mirrored()
        } else {
            self.action
        }
    }
}

/// When a scope's bindings are live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeCondition {
    Always,
    /// The control lays rows out vertically.
    Vertical,
    /// The control lays rows out horizontally.
    Horizontal,
    /// The event comes from macOS.
    Mac,
    /// The event comes from any other platform.
    NotMac,
}

impl ScopeCondition {
    /// Whether the scope applies to `event` on `control`. Evaluated per event.
    pub fn is_active<C: Actionable>(self, control: &C, event: &InputEvent) -> bool {
        match self {
            Self::Always => true,
            Self::Vertical => control.orientation() == Orientation::Vertical,
            Self::Horizontal => control.orientation() == Orientation::Horizontal,
            Self::Mac => event.platform().is_mac(),
            Self::NotMac => !event.platform().is_mac(),
        }
    }
}

/// A conditional group of bindings, installed as one child map.
#[derive(Debug, Clone)]
pub struct BindingScope {
    name: &'static str,
    condition: ScopeCondition,
    entries: Vec<BindingEntry>,
}

impl BindingScope {
    fn new(name: &'static str, condition: ScopeCondition, entries: Vec<BindingEntry>) -> Self {
        Self {
            name,
            condition,
            entries,
        }
    }

    /// The scope name, for logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// When the scope applies.
    pub fn condition(&self) -> ScopeCondition {
        self.condition
    }

    /// The scope's bindings.
    pub fn entries(&self) -> &[BindingEntry] {
        &self.entries
    }
}

/// The default bindings of one control kind.
#[derive(Debug, Clone)]
pub struct BindingTable {
    kind: ControlKind,
    entries: Vec<BindingEntry>,
    scopes: Vec<BindingScope>,
}

impl BindingTable {
    /// The control kind.
    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    /// Root-map bindings.
    pub fn entries(&self) -> &[BindingEntry] {
        &self.entries
    }

    /// Conditional scopes, in precedence order.
    pub fn scopes(&self) -> &[BindingScope] {
        &self.scopes
    }

    /// Number of bindings, scopes included.
    pub fn len(&self) -> usize {
        self.entries.len() + self.scopes.iter().map(|s| s.entries.len()).sum::<usize>()
    }

    /// Whether the table has no bindings.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn all_entries(&self) -> impl Iterator<Item = &BindingEntry> {
        self.entries.iter().chain(self.scopes.iter().flat_map(|s| s.entries.iter()))
    }

    /// Whether controls of this kind can perform `action`.
    pub fn supports(&self, action: Action) -> bool {
        self.all_entries().any(|e| {
            e.action == action || (e.mirror_rtl && e.action.mirrored() == action)
        })
    }
}

static_assertions::assert_impl_all!(BindingTable: Send, Sync);

/// The shared table for `kind`.
pub fn binding_table(kind: ControlKind) -> &'static BindingTable {
    static LIST: OnceLock<BindingTable> = OnceLock::new();
    static TREE: OnceLock<BindingTable> = OnceLock::new();
    static TABLE: OnceLock<BindingTable> = OnceLock::new();
    static BUTTON: OnceLock<BindingTable> = OnceLock::new();

    match kind {
        ControlKind::List => LIST.get_or_init(list_table),
        ControlKind::Tree => TREE.get_or_init(tree_table),
        ControlKind::Table => TABLE.get_or_init(table_table),
        ControlKind::Button => BUTTON.get_or_init(button_table),
    }
}

// =============================================================================
// Table contents
// =============================================================================

const fn key(binding: KeyBinding, action: Action) -> BindingEntry {
    BindingEntry::new(Trigger::Key(binding), action)
}

const fn k(key: Key) -> KeyBinding {
    KeyBinding::new(key)
}

/// Bindings shared by every row control, whatever its orientation.
fn row_entries() -> Vec<BindingEntry> {
    use Action::*;
    vec![
        key(k(Key::Home), SelectFirstRow),
        key(k(Key::End), SelectLastRow),
        key(k(Key::Home).shift(), SelectAllToFirstRow),
        key(k(Key::End).shift(), SelectAllToLastRow),
        key(k(Key::PageUp), ScrollPageUp),
        key(k(Key::PageDown), ScrollPageDown),
        key(k(Key::PageUp).shift(), SelectAllPageUp),
        key(k(Key::PageDown).shift(), SelectAllPageDown),
        key(k(Key::Space).shift(), SelectAllToFocus),
        key(k(Key::Space).shortcut().shift(), SelectAllToFocusAndSetAnchor),
        key(k(Key::A).shortcut(), SelectAll),
        key(k(Key::Home).shortcut(), FocusFirstRow),
        key(k(Key::End).shortcut(), FocusLastRow),
        key(k(Key::PageUp).shortcut(), FocusPageUp),
        key(k(Key::PageDown).shortcut(), FocusPageDown),
        key(k(Key::PageUp).shortcut().shift(), DiscontinuousSelectPageUp),
        key(k(Key::PageDown).shortcut().shift(), DiscontinuousSelectPageDown),
        key(k(Key::Home).shortcut().shift(), DiscontinuousSelectAllToFirstRow),
        key(k(Key::End).shortcut().shift(), DiscontinuousSelectAllToLastRow),
        key(k(Key::Enter), Activate).without_auto_consume(),
        key(k(Key::Space), Activate),
        key(k(Key::F2), Activate),
        key(k(Key::Escape), CancelEdit).without_auto_consume(),
        key(k(Key::Tab), TraverseNext),
        key(k(Key::Tab).shift(), TraversePrevious),
        BindingEntry::new(MouseBinding::new(EventKind::MousePressed).into(), PointerPress),
    ]
}

/// Previous/next row bindings on the keys `back`/`forward`.
fn row_step_entries(back: Key, forward: Key, mirror: bool) -> Vec<BindingEntry> {
    use Action::*;
    let entries = vec![
        key(k(back), SelectPreviousRow),
        key(k(forward), SelectNextRow),
        key(k(back).shift(), AlsoSelectPrevious),
        key(k(forward).shift(), AlsoSelectNext),
        key(k(back).shortcut(), FocusPreviousRow),
        key(k(forward).shortcut(), FocusNextRow),
        key(k(back).shortcut().shift(), DiscontinuousSelectPreviousRow),
        key(k(forward).shortcut().shift(), DiscontinuousSelectNextRow),
    ];
    if mirror {
        entries.into_iter().map(BindingEntry::mirrored_in_rtl).collect()
    } else {
        entries
    }
}

fn platform_scopes() -> Vec<BindingScope> {
    use Action::ToggleFocusOwnerSelection;
    vec![
        BindingScope::new(
            "mac",
            ScopeCondition::Mac,
            vec![key(k(Key::Space).ctrl().shortcut(), ToggleFocusOwnerSelection)],
        ),
        BindingScope::new(
            "not-mac",
            ScopeCondition::NotMac,
            vec![key(k(Key::Space).ctrl(), ToggleFocusOwnerSelection)],
        ),
    ]
}

fn list_scopes() -> Vec<BindingScope> {
    let mut scopes = vec![
        BindingScope::new(
            "vertical",
            ScopeCondition::Vertical,
            row_step_entries(Key::ArrowUp, Key::ArrowDown, false),
        ),
        BindingScope::new(
            "horizontal",
            ScopeCondition::Horizontal,
            row_step_entries(Key::ArrowLeft, Key::ArrowRight, true),
        ),
    ];
    scopes.extend(platform_scopes());
    scopes
}

fn list_table() -> BindingTable {
    BindingTable {
        kind: ControlKind::List,
        entries: row_entries(),
        scopes: list_scopes(),
    }
}

fn tree_table() -> BindingTable {
    use Action::*;
    let tree = BindingScope::new(
        "tree",
        ScopeCondition::Always,
        vec![
            key(k(Key::ArrowLeft), CollapseRow).mirrored_in_rtl(),
            key(k(Key::ArrowRight), ExpandRow).mirrored_in_rtl(),
            key(k(Key::NumpadSubtract), CollapseRow),
            key(k(Key::NumpadAdd), ExpandRow),
            key(k(Key::NumpadMultiply), ExpandAll),
        ],
    );
    let mut scopes = vec![tree];
    scopes.extend(list_scopes());
    BindingTable {
        kind: ControlKind::Tree,
        entries: row_entries(),
        scopes,
    }
}

fn table_table() -> BindingTable {
    use Action::*;
    let mut entries = row_entries();
    entries.extend([
        key(k(Key::ArrowUp), TraverseUp),
        key(k(Key::ArrowDown), TraverseDown),
        key(k(Key::ArrowLeft), TraverseLeft),
        key(k(Key::ArrowRight), TraverseRight),
    ]);

    let mut cells: Vec<BindingEntry> = row_step_entries(Key::ArrowUp, Key::ArrowDown, false)
        .into_iter()
        .map(|e| match e.action {
            SelectPreviousRow | SelectNextRow => e.without_auto_consume(),
            _ => e,
        })
        .collect();
    cells.extend(
        [
            key(k(Key::ArrowLeft), SelectLeftCell).without_auto_consume(),
            key(k(Key::ArrowRight), SelectRightCell).without_auto_consume(),
            key(k(Key::ArrowLeft).shift(), AlsoSelectLeftCell),
            key(k(Key::ArrowRight).shift(), AlsoSelectRightCell),
            key(k(Key::ArrowLeft).shortcut(), FocusLeftCell),
            key(k(Key::ArrowRight).shortcut(), FocusRightCell),
            key(k(Key::ArrowLeft).shortcut().shift(), DiscontinuousSelectPreviousColumn),
            key(k(Key::ArrowRight).shortcut().shift(), DiscontinuousSelectNextColumn),
        ]
        .map(BindingEntry::mirrored_in_rtl),
    );

    let mut scopes = vec![BindingScope::new("cells", ScopeCondition::Always, cells)];
    scopes.extend(platform_scopes());
    BindingTable {
        kind: ControlKind::Table,
        entries,
        scopes,
    }
}

fn button_table() -> BindingTable {
    use Action::*;
    BindingTable {
        kind: ControlKind::Button,
        entries: vec![
            key(k(Key::Space), KeyArm),
            key(k(Key::Space).released(), KeyFire),
            key(k(Key::Escape), KeyCancel).without_auto_consume(),
            BindingEntry::new(MouseBinding::new(EventKind::MousePressed).into(), MouseArm),
            BindingEntry::new(MouseBinding::new(EventKind::MouseReleased).into(), MouseFire),
            BindingEntry::new(MouseBinding::new(EventKind::MouseExited).into(), MouseExit),
            BindingEntry::new(MouseBinding::new(EventKind::MouseEntered).into(), MouseEnter),
            BindingEntry::new(Trigger::Event(EventKind::FocusLost), FocusLost),
        ],
        scopes: Vec::new(),
    }
}
