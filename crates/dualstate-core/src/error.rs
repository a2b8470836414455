#![forbid(unsafe_code)]

//! Error taxonomy for the controlled-state adapter.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ControlError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    /// The state value is itself callable, which would make it
    /// indistinguishable from an updater.
    #[error("callable state values are not supported: {type_name}")]
    CallableValueNotSupported { type_name: &'static str },
}

impl ControlError {
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::CallableValueNotSupported { type_name } => type_name,
        }
    }
}

/// Reject state types that are callable.
///
/// Only the outermost type is inspected, after peeling references, raw
/// pointers and `Box`/`Rc`/`Arc`: function pointers, closures and `dyn Fn*`
/// trait objects are rejected. Callable types nested inside other types
/// (`Wrapper<Rc<dyn Fn()>>`, `Option<fn()>`) are ordinary values.
///
/// The check reads `std::any::type_name`, whose format is unspecified.
/// [`ControlledState::new`](crate::ControlledState::new) also requires
/// `Clone + PartialEq`, which closures and function items never implement,
/// so those are refused at compile time regardless of this check.
pub fn ensure_not_callable<T: ?Sized>() -> Result<()> {
    let type_name = std::any::type_name::<T>();
    if is_callable_name(type_name) {
        return Err(ControlError::CallableValueNotSupported { type_name });
    }
    Ok(())
}

const POINTER_PREFIXES: [&str; 6] = [
    "alloc::boxed::Box<",
    "alloc::rc::Rc<",
    "alloc::sync::Arc<",
    "std::boxed::Box<",
    "std::rc::Rc<",
    "std::sync::Arc<",
];

fn is_callable_name(name: &str) -> bool {
    let mut head = name;
    let mut wrappers = 0;
    loop {
        let before = head;
        head = head.trim_start_matches(['&', '*']);
        head = head.trim_start_matches("mut ").trim_start_matches("const ");
        if let Some(inner) = POINTER_PREFIXES.iter().find_map(|p| head.strip_prefix(p)) {
            head = inner;
            wrappers += 1;
        }
        if head == before {
            break;
        }
    }
    for _ in 0..wrappers {
        head = head.strip_suffix('>').unwrap_or(head);
    }
    if let Some(rest) = head.strip_prefix("for<") {
        head = rest.split_once("> ").map_or(rest, |(_, tail)| tail);
    }

    head.starts_with("fn(")
        || head.starts_with("unsafe fn(")
        || head.starts_with("unsafe extern ")
        || head.starts_with("extern ")
        || head.starts_with("dyn core::ops::function::Fn")
        || head.starts_with("dyn std::ops::function::Fn")
        || head.ends_with("{{closure}}")
}
