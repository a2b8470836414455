//! Change requests: a literal next value or an updater of the previous one.

use std::fmt;

/// Boxed updater from the previous value to the next.
pub type Updater<T> = Box<dyn FnOnce(&T) -> T>;

/// A request to change a controlled/uncontrolled value.
///
/// The shape is chosen explicitly by the caller, so a value is never
/// mistaken for an updater (or the reverse).
pub enum ChangeRequest<T> {
    /// Replace the value.
    Literal(T),
    /// Compute the next value from the previous one.
    Updater(Updater<T>),
}

impl<T> ChangeRequest<T> {
    /// Request a literal next value.
    #[must_use]
    pub fn value(next: T) -> Self {
        Self::Literal(next)
    }

    /// Request a change relative to the previous value.
    #[must_use]
    pub fn update(f: impl FnOnce(&T) -> T + 'static) -> Self {
        Self::Updater(Box::new(f))
    }

    #[must_use]
    pub fn is_updater(&self) -> bool {
        matches!(self, Self::Updater(_))
    }

    /// Short name used in trace output.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Literal(_) => "literal",
            Self::Updater(_) => "updater",
        }
    }

    /// Collapse the request into a literal value using `previous`.
    pub fn resolve(self, previous: &T) -> T {
        match self {
            Self::Literal(next) => next,
            Self::Updater(f) => f(previous),
        }
    }
}

impl<T> From<T> for ChangeRequest<T> {
    fn from(next: T) -> Self {
        Self::Literal(next)
    }
}

impl<T: fmt::Debug> fmt::Debug for ChangeRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(next) => f.debug_tuple("Literal").field(next).finish(),
            Self::Updater(_) => f.write_str("Updater(..)"),
        }
    }
}
