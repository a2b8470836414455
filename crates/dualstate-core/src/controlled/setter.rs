#![forbid(unsafe_code)]

//! The change-request handle handed out by [`ControlledState::resolve`].
//!
//! A [`SetState`] is bound to the mode of the invocation that produced it:
//!
//! - **Uncontrolled** handles write the instance's uncontrolled cell through a
//!   `Weak` reference. Updaters run against the cell's current value, so
//!   several requests issued before the next `resolve` compose.
//! - **Controlled** handles capture the external value of their invocation
//!   and the `on_change` callback. Updaters are resolved against that
//!   snapshot and `on_change` receives the literal result, exactly once per
//!   request.
//!
//! [`ControlledState::resolve`]: super::ControlledState::resolve

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::change::ChangeRequest;
use super::mode::Mode;
use super::state::StateCell;

/// Change notification supplied by an owning caller in controlled mode.
///
/// Always receives a literal next value.
pub type OnChange<T> = Rc<dyn Fn(T)>;

enum Target<T> {
    Uncontrolled {
        cell: Weak<RefCell<StateCell<T>>>,
        label: &'static str,
    },
    Controlled {
        snapshot: T,
        on_change: OnChange<T>,
        label: &'static str,
    },
}

/// Handle used to request a change of a controlled/uncontrolled value.
///
/// Cloning a `SetState` creates a new handle to the **same** target; use
/// [`ptr_eq`](Self::ptr_eq) to compare identity.
pub struct SetState<T> {
    target: Rc<Target<T>>,
}

impl<T> Clone for SetState<T> {
    fn clone(&self) -> Self {
        Self {
            target: Rc::clone(&self.target),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SetState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.target {
            Target::Uncontrolled { cell, label } => f
                .debug_struct("SetState")
                .field("mode", &Mode::Uncontrolled)
                .field("label", label)
                .field("alive", &(cell.strong_count() > 0))
                .finish(),
            Target::Controlled {
                snapshot, label, ..
            } => f
                .debug_struct("SetState")
                .field("mode", &Mode::Controlled)
                .field("label", label)
                .field("snapshot", snapshot)
                .finish(),
        }
    }
}

impl<T> SetState<T> {
    pub(crate) fn uncontrolled(cell: &Rc<RefCell<StateCell<T>>>, label: &'static str) -> Self {
        Self {
            target: Rc::new(Target::Uncontrolled {
                cell: Rc::downgrade(cell),
                label,
            }),
        }
    }

    pub(crate) fn controlled(snapshot: T, on_change: OnChange<T>, label: &'static str) -> Self {
        Self {
            target: Rc::new(Target::Controlled {
                snapshot,
                on_change,
                label,
            }),
        }
    }

    /// Mode of the invocation that produced this handle.
    #[must_use]
    pub fn mode(&self) -> Mode {
        match &*self.target {
            Target::Uncontrolled { .. } => Mode::Uncontrolled,
            Target::Controlled { .. } => Mode::Controlled,
        }
    }

    /// Whether two handles are the same handle (not merely equivalent).
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.target, &other.target)
    }

    /// Whether requests through this handle can still take effect.
    ///
    /// Controlled handles are always live. Uncontrolled handles die with the
    /// instance that created them.
    #[must_use]
    pub fn is_live(&self) -> bool {
        match &*self.target {
            Target::Uncontrolled { cell, .. } => cell.strong_count() > 0,
            Target::Controlled { .. } => true,
        }
    }
}

impl<T: Clone> SetState<T> {
    /// Request a change.
    ///
    /// Controlled: resolves `request` against the snapshot and calls
    /// `on_change` once with the literal result. Uncontrolled: applies
    /// `request` to the uncontrolled cell; the new value is seen by the next
    /// `resolve`. Requests against a dropped instance are ignored.
    pub fn request(&self, request: ChangeRequest<T>) {
        match &*self.target {
            Target::Controlled {
                snapshot,
                on_change,
                label,
            } => {
                log_request(label, Mode::Controlled, request.kind());
                let next = request.resolve(snapshot);
                on_change(next);
            }
            Target::Uncontrolled { cell, label } => {
                let Some(cell) = cell.upgrade() else {
                    log_orphaned(label);
                    return;
                };
                log_request(label, Mode::Uncontrolled, request.kind());
                let next = match request {
                    ChangeRequest::Literal(next) => next,
                    ChangeRequest::Updater(f) => {
                        // Release the borrow before running the updater.
                        let previous = cell.borrow().value.clone();
                        f(&previous)
                    }
                };
                cell.borrow_mut().write(next);
            }
        }
    }

    /// Request a literal next value.
    pub fn set(&self, next: T) {
        self.request(ChangeRequest::Literal(next));
    }

    /// Request a change relative to the previous value.
    pub fn update(&self, f: impl FnOnce(&T) -> T + 'static)
    where
        T: 'static,
    {
        self.request(ChangeRequest::update(f));
    }
}

fn log_request(label: &str, mode: Mode, kind: &str) {
    #[cfg(feature = "tracing")]
    tracing::debug!(
        message = "controlled_state.request",
        label,
        mode = mode.as_str(),
        kind
    );
    #[cfg(not(feature = "tracing"))]
    let _ = (label, mode, kind);
}

fn log_orphaned(label: &str) {
    #[cfg(feature = "tracing")]
    tracing::trace!(message = "controlled_state.orphaned", label);
    #[cfg(not(feature = "tracing"))]
    let _ = label;
}
