#![forbid(unsafe_code)]

//! Controlled/uncontrolled state for reusable components.
//!
//! This module provides the pieces a component needs to let its value be
//! owned either by itself or by an owning caller:
//!
//! - [`ControlledState`]: the per-instance handle. Owns the uncontrolled
//!   cell and reconciles it with an externally supplied value on every
//!   [`resolve`](ControlledState::resolve).
//! - [`SetState`]: the change-request handle returned by `resolve`.
//! - [`ChangeRequest`]: a literal next value or an updater of the previous
//!   value.
//! - [`Mode`]: which side owns the value on a given invocation.
//!
//! # Architecture
//!
//! The uncontrolled cell lives in an `Rc<RefCell<..>>` owned by the
//! instance. Uncontrolled [`SetState`] handles hold a `Weak` to it, so a
//! dropped instance turns them into no-ops. Controlled handles never touch
//! the cell: they resolve the request against the value snapshot of the
//! invocation that produced them and forward a literal to `on_change`.
//!
//! # Invariants
//!
//! 1. Mode is derived from the presence of `on_change` on each call and is
//!    never used from a previous call.
//! 2. The effective value is either the external value or the uncontrolled
//!    value, never a mix.
//! 3. `on_change` is invoked exactly once per controlled request, always with
//!    a literal value.
//! 4. Uncontrolled updaters see the current cell value, so sequential
//!    updaters compose.
//! 5. No internal borrow is held while user code (updaters, `on_change`)
//!    runs.
//!
//! # Shadow state
//!
//! An uncontrolled handle obtained before the instance switched to
//! controlled mode still writes the uncontrolled cell. Those writes are
//! hidden while controlled and become visible again when `on_change` is
//! dropped. Callers that toggle modes should expect to resume from the
//! shadow value, not from the last external value.

pub mod change;
pub mod mode;
pub mod setter;
pub mod state;

pub use change::ChangeRequest;
pub use mode::Mode;
pub use setter::{OnChange, SetState};
pub use state::ControlledState;
