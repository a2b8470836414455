use dualstate_core::ControlError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("state error: {0}")]
    State(#[from] ControlError),

    #[error("render loop did not settle after {passes} passes")]
    Unsettled { passes: u32 },

    #[error("no button labeled {label:?}")]
    UnknownButton { label: String },
}
