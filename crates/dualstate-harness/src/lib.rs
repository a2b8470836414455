#![forbid(unsafe_code)]

//! Test harness and reference fixtures for dualstate.
//!
//! [`host::Host`] plays the part of a UI framework: it owns a component
//! tree, renders it, dispatches events and re-renders until no instance has
//! pending state. [`toggle`] holds the reference Toggle component and an
//! owner that drives it in controlled mode.

pub mod error;
pub mod host;
pub mod toggle;

pub use error::{HarnessError, Result};
