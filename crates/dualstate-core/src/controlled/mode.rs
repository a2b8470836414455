use std::fmt;

/// Which side owns the value for a single invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// The owning caller supplies the value and is notified of changes.
    Controlled,
    /// The component owns its value.
    Uncontrolled,
}

impl Mode {
    /// Derive the mode from whether a change callback was supplied.
    #[must_use]
    pub fn from_callback<C>(on_change: Option<&C>) -> Self {
        if on_change.is_some() {
            Self::Controlled
        } else {
            Self::Uncontrolled
        }
    }

    #[must_use]
    pub const fn is_controlled(self) -> bool {
        matches!(self, Self::Controlled)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Controlled => "controlled",
            Self::Uncontrolled => "uncontrolled",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_selects_mode() {
        let cb = 7u8;
        assert_eq!(Mode::from_callback(Some(&cb)), Mode::Controlled);
        assert_eq!(Mode::from_callback::<u8>(None), Mode::Uncontrolled);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(Mode::Controlled.to_string(), "controlled");
        assert_eq!(Mode::Uncontrolled.to_string(), "uncontrolled");
        assert!(Mode::Controlled.is_controlled());
        assert!(!Mode::Uncontrolled.is_controlled());
    }
}
