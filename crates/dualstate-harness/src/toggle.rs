#![forbid(unsafe_code)]

//! Reference Toggle component and a controlling owner.
//!
//! [`Toggle`] renders a status line and two buttons:
//!
//! - "Toggle with callback" requests `!previous` through an updater.
//! - "Toggle with value" requests the literal `!current`.
//!
//! It accepts an optional value and `on_change`. Without `on_change` it keeps
//! its own state; with it, [`ToggleOwner`] (or any other owner) holds the
//! value and decides what to do with each notification.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use dualstate_core::{ControlledState, Mode, OnChange, SetState};

use crate::error::{HarnessError, Result};
use crate::host::Component;

/// Status line shown when the toggle is on.
pub const ON_TEXT: &str = "Toggle is on";
/// Status line shown when the toggle is off.
pub const OFF_TEXT: &str = "Toggle is off";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    ToggleWithCallback,
    ToggleWithValue,
}

impl Button {
    pub const ALL: [Self; 2] = [Self::ToggleWithCallback, Self::ToggleWithValue];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ToggleWithCallback => "Toggle with callback",
            Self::ToggleWithValue => "Toggle with value",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.label() == label)
    }
}

/// Inputs supplied to a [`Toggle`] by whoever renders it.
#[derive(Clone, Default)]
pub struct ToggleProps {
    pub value: Option<bool>,
    pub on_change: Option<OnChange<bool>>,
}

impl ToggleProps {
    /// Self-managed toggle starting off.
    #[must_use]
    pub fn uncontrolled() -> Self {
        Self::default()
    }

    /// Self-managed toggle starting at `value`.
    #[must_use]
    pub fn with_default(value: bool) -> Self {
        Self {
            value: Some(value),
            on_change: None,
        }
    }

    /// Owner-managed toggle.
    #[must_use]
    pub fn controlled(value: bool, on_change: OnChange<bool>) -> Self {
        Self {
            value: Some(value),
            on_change: Some(on_change),
        }
    }
}

impl fmt::Debug for ToggleProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToggleProps")
            .field("value", &self.value)
            .field("on_change", &self.on_change.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Result of rendering a [`Toggle`].
#[derive(Debug, Clone)]
pub struct ToggleView {
    is_on: bool,
    set: SetState<bool>,
}

impl ToggleView {
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    #[must_use]
    pub fn text(&self) -> &'static str {
        if self.is_on { ON_TEXT } else { OFF_TEXT }
    }

    /// Mode the toggle rendered in.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.set.mode()
    }

    #[must_use]
    pub fn setter(&self) -> &SetState<bool> {
        &self.set
    }

    /// Text lines as they would appear on screen.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = Button::ALL
            .iter()
            .map(|b| format!("[{}]", b.label()))
            .collect();
        lines.push(self.text().to_string());
        lines
    }

    /// Whether some line reads exactly `text`.
    #[must_use]
    pub fn shows(&self, text: &str) -> bool {
        self.lines()
            .iter()
            .any(|line| line == text || line.trim_matches(['[', ']']) == text)
    }

    pub fn click(&self, button: Button) {
        match button {
            Button::ToggleWithCallback => self.set.update(|on| !on),
            Button::ToggleWithValue => self.set.set(!self.is_on),
        }
    }

    /// Click the button whose label is `label`.
    pub fn click_label(&self, label: &str) -> Result<()> {
        let button = Button::from_label(label).ok_or_else(|| HarnessError::UnknownButton {
            label: label.to_string(),
        })?;
        self.click(button);
        Ok(())
    }
}

/// The reference toggle component.
pub struct Toggle {
    state: ControlledState<bool>,
    props: ToggleProps,
}

impl Toggle {
    pub fn new(props: ToggleProps) -> Result<Self> {
        let state = ControlledState::new(props.value.unwrap_or(false))?.with_label("toggle");
        Ok(Self { state, props })
    }

    /// Replace the inputs used by the next render.
    pub fn set_props(&mut self, props: ToggleProps) {
        self.props = props;
    }

    /// The toggle's own (uncontrolled) value, shadowed while controlled.
    #[must_use]
    pub fn own_value(&self) -> bool {
        self.state.peek_uncontrolled()
    }
}

impl Component for Toggle {
    type View = ToggleView;

    fn render(&mut self) -> Result<ToggleView> {
        let value = self.props.value.unwrap_or(false);
        let (is_on, set) = self.state.resolve(value, self.props.on_change.clone());
        Ok(ToggleView { is_on, set })
    }

    fn needs_rerender(&self) -> bool {
        self.state.needs_rerun()
    }
}

/// How a [`ToggleOwner`] reacts to a change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerStrategy {
    /// Ignore the notified value; flip own state with an updater.
    FlipWithUpdater,
    /// Ignore the notified value; store `!value` as seen by the render.
    FlipWithSnapshot,
    /// Store the notified value.
    StoreNext,
}

impl OwnerStrategy {
    pub const ALL: [Self; 3] = [Self::FlipWithUpdater, Self::FlipWithSnapshot, Self::StoreNext];
}

/// Owns a boolean and renders a controlled [`Toggle`] with it.
pub struct ToggleOwner {
    state: ControlledState<bool>,
    strategy: OwnerStrategy,
    child: Toggle,
    notifications: Rc<Cell<u32>>,
}

impl ToggleOwner {
    pub fn new(initial: bool, strategy: OwnerStrategy) -> Result<Self> {
        Ok(Self {
            state: ControlledState::new(initial)?.with_label("toggle_owner"),
            strategy,
            child: Toggle::new(ToggleProps::uncontrolled())?,
            notifications: Rc::default(),
        })
    }

    /// The owner's value, as of the last write.
    #[must_use]
    pub fn value(&self) -> bool {
        self.state.peek_uncontrolled()
    }

    #[must_use]
    pub fn child(&self) -> &Toggle {
        &self.child
    }

    /// Number of `on_change` notifications received.
    #[must_use]
    pub fn notifications(&self) -> u32 {
        self.notifications.get()
    }
}

impl Component for ToggleOwner {
    type View = ToggleView;

    fn render(&mut self) -> Result<ToggleView> {
        let (owned, set_owned) = self.state.resolve(false, None);
        let count = Rc::clone(&self.notifications);
        // A fresh callback per render, like an inline closure in a UI tree.
        let on_change: OnChange<bool> = match self.strategy {
            OwnerStrategy::FlipWithUpdater => Rc::new(move |_: bool| {
                count.set(count.get() + 1);
                set_owned.update(|on| !on);
            }),
            OwnerStrategy::FlipWithSnapshot => Rc::new(move |_: bool| {
                count.set(count.get() + 1);
                set_owned.set(!owned);
            }),
            OwnerStrategy::StoreNext => Rc::new(move |next: bool| {
                count.set(count.get() + 1);
                set_owned.set(next);
            }),
        };
        self.child.set_props(ToggleProps::controlled(owned, on_change));
        self.child.render()
    }

    fn needs_rerender(&self) -> bool {
        self.state.needs_rerun() || self.child.needs_rerender()
    }
}
