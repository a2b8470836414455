#![forbid(unsafe_code)]

//! Per-instance reconciliation of internal and external values.
//!
//! # Design
//!
//! [`ControlledState<T>`] is the handle a component keeps for its whole
//! lifetime. It owns the uncontrolled cell, created from the first value it
//! sees. Every time the host re-runs the component, the component calls
//! [`resolve()`](ControlledState::resolve) with the value and optional
//! `on_change` it was given, and receives the effective value plus a
//! [`SetState`] handle.
//!
//! # Invariants
//!
//! 1. The uncontrolled [`SetState`] is created once and returned by every
//!    uncontrolled `resolve()`.
//! 2. The controlled [`SetState`] is reused while `on_change` is the same
//!    `Rc` and `value` compares equal, and recreated otherwise.
//! 3. `version` increments by exactly 1 per uncontrolled write.
//! 4. `needs_rerun()` is true after an uncontrolled write and until the next
//!    `resolve()`.
//!
//! # Failure Modes
//!
//! - **Callable state type**: [`ControlledState::new`] fails with
//!   [`ControlError::CallableValueNotSupported`] and allocates nothing.
//! - **Updater or `on_change` panics**: no borrow is held while they run, so
//!   the cell keeps its previous value and the instance stays usable.
//!
//! [`ControlError::CallableValueNotSupported`]: crate::ControlError::CallableValueNotSupported

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use super::mode::Mode;
use super::setter::{OnChange, SetState};
use crate::error::{Result, ensure_not_callable};

const DEFAULT_LABEL: &str = "controlled_state";

/// The uncontrolled cell shared between an instance and its uncontrolled
/// [`SetState`] handles.
pub(crate) struct StateCell<T> {
    pub(crate) value: T,
    /// Number of writes applied since creation.
    pub(crate) version: u64,
    /// Written since the last `resolve()`.
    pub(crate) pending: bool,
}

impl<T> StateCell<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            value,
            version: 0,
            pending: false,
        }
    }

    pub(crate) fn write(&mut self, next: T) {
        self.value = next;
        self.version += 1;
        self.pending = true;
    }
}

/// Dependencies of the last controlled handle, for identity reuse.
struct ControlledMemo<T> {
    on_change: OnChange<T>,
    value: T,
    setter: SetState<T>,
}

/// Dual-mode state for one component instance.
///
/// # Example
///
/// ```
/// use dualstate_core::ControlledState;
///
/// let state = ControlledState::new(false)?;
///
/// let (on, set) = state.resolve(false, None);
/// assert!(!on);
/// set.update(|v| !v);
///
/// let (on, _) = state.resolve(false, None);
/// assert!(on);
/// # Ok::<(), dualstate_core::ControlError>(())
/// ```
pub struct ControlledState<T> {
    cell: Rc<RefCell<StateCell<T>>>,
    setter: SetState<T>,
    memo: RefCell<Option<ControlledMemo<T>>>,
    last_mode: Cell<Option<Mode>>,
    label: &'static str,
}

impl<T: fmt::Debug> fmt::Debug for ControlledState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = self.cell.borrow();
        f.debug_struct("ControlledState")
            .field("label", &self.label)
            .field("uncontrolled", &cell.value)
            .field("version", &cell.version)
            .field("pending", &cell.pending)
            .field("last_mode", &self.last_mode.get())
            .finish()
    }
}

impl<T: 'static> ControlledState<T> {
    /// Name this instance in trace output.
    #[must_use]
    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = label;
        self.setter = SetState::uncontrolled(&self.cell, label);
        self
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Number of uncontrolled writes applied so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.cell.borrow().version
    }

    /// Whether the uncontrolled value was written since the last `resolve()`.
    ///
    /// Hosts use this to decide whether the component must run again.
    #[must_use]
    pub fn needs_rerun(&self) -> bool {
        self.cell.borrow().pending
    }

    /// Mode chosen by the most recent `resolve()`, if any.
    #[must_use]
    pub fn last_mode(&self) -> Option<Mode> {
        self.last_mode.get()
    }
}

impl<T: Clone + 'static> ControlledState<T> {
    /// Current uncontrolled value, including writes made while controlled.
    #[must_use]
    pub fn peek_uncontrolled(&self) -> T {
        self.cell.borrow().value.clone()
    }
}

impl<T: Clone + PartialEq + 'static> ControlledState<T> {
    /// Create the instance, seeding the uncontrolled cell with `initial`.
    ///
    /// The "value is not callable" precondition is enforced in two layers.
    /// Closures and function items do not implement `PartialEq`, so they are
    /// refused at compile time:
    ///
    /// ```compile_fail
    /// use dualstate_core::ControlledState;
    ///
    /// let _ = ControlledState::new(|v: u8| v + 1);
    /// ```
    ///
    /// ```compile_fail
    /// use dualstate_core::ControlledState;
    ///
    /// fn identity(v: u8) -> u8 {
    ///     v
    /// }
    /// let _ = ControlledState::new(identity);
    /// ```
    ///
    /// `dyn Fn*` objects have no `PartialEq` either. Function pointers do
    /// compare and are rejected at run time.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::CallableValueNotSupported`](crate::ControlError::CallableValueNotSupported)
    /// if `T` is a function pointer.
    pub fn new(initial: T) -> Result<Self> {
        ensure_not_callable::<T>()?;
        let cell = Rc::new(RefCell::new(StateCell::new(initial)));
        let setter = SetState::uncontrolled(&cell, DEFAULT_LABEL);
        Ok(Self {
            cell,
            setter,
            memo: RefCell::new(None),
            last_mode: Cell::new(None),
            label: DEFAULT_LABEL,
        })
    }

    /// Run one invocation.
    ///
    /// With `on_change` present the instance is controlled for this call:
    /// `value` is returned as is and change requests are forwarded to
    /// `on_change`. Without it the uncontrolled value is returned and
    /// `value` is ignored.
    pub fn resolve(&self, value: T, on_change: Option<OnChange<T>>) -> (T, SetState<T>) {
        let mode = Mode::from_callback(on_change.as_ref());
        let previous_mode = self.last_mode.replace(Some(mode));
        if let Some(previous) = previous_mode
            && previous != mode
        {
            self.log_mode_switch(previous, mode);
        }

        let resolved = match on_change {
            Some(on_change) => {
                let setter = self.controlled_setter(value.clone(), on_change);
                (value, setter)
            }
            None => (self.peek_uncontrolled(), self.setter.clone()),
        };

        let version = {
            let mut cell = self.cell.borrow_mut();
            cell.pending = false;
            cell.version
        };
        self.log_resolve(mode, version);

        resolved
    }

    fn controlled_setter(&self, value: T, on_change: OnChange<T>) -> SetState<T> {
        let mut memo = self.memo.borrow_mut();
        if let Some(last) = memo.as_ref()
            && Rc::ptr_eq(&last.on_change, &on_change)
            && last.value == value
        {
            return last.setter.clone();
        }

        let setter = SetState::controlled(value.clone(), Rc::clone(&on_change), self.label);
        *memo = Some(ControlledMemo {
            on_change,
            value,
            setter: setter.clone(),
        });
        setter
    }

    fn log_mode_switch(&self, from: Mode, to: Mode) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "controlled_state.mode_switch",
            label = self.label,
            from = from.as_str(),
            to = to.as_str()
        );
        #[cfg(not(feature = "tracing"))]
        let _ = (from, to);
    }

    fn log_resolve(&self, mode: Mode, version: u64) {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            message = "controlled_state.resolve",
            label = self.label,
            mode = mode.as_str(),
            version
        );
        #[cfg(not(feature = "tracing"))]
        let _ = (mode, version);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
