#![forbid(unsafe_code)]

//! Core: dual-mode value adapter for components that can be driven either
//! by their own state or by an owning caller.

pub mod controlled;
pub mod error;

pub use controlled::{ChangeRequest, ControlledState, Mode, OnChange, SetState};
pub use error::{ControlError, Result, ensure_not_callable};
