use std::str::FromStr;

use thiserror::Error;

use crate::models::application::ApplicationStatus;

/// Which status changes an application accepts.
///
/// `Unrestricted` lets any status follow any other. `Guarded` only allows
/// pending -> accepted | rejected and treats both outcomes as final.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransitionPolicy {
    #[default]
    Unrestricted,
    Guarded,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot change application status from {from} to {to}")]
pub struct TransitionError {
    pub from: ApplicationStatus,
    pub to: ApplicationStatus,
}

impl TransitionPolicy {
    /// Setting the current status again always passes.
    pub fn check(self, from: ApplicationStatus, to: ApplicationStatus) -> Result<(), TransitionError> {
        if from == to {
            return Ok(());
        }
        match self {
            TransitionPolicy::Unrestricted => Ok(()),
            TransitionPolicy::Guarded if !from.is_terminal() => Ok(()),
            TransitionPolicy::Guarded => Err(TransitionError { from, to }),
        }
    }
}

impl FromStr for TransitionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unrestricted" => Ok(TransitionPolicy::Unrestricted),
            "guarded" => Ok(TransitionPolicy::Guarded),
            other => Err(format!(
                "unknown transition policy '{other}' (expected 'unrestricted' or 'guarded')"
            )),
        }
    }
}
