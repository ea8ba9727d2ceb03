use thiserror::Error;

use crate::types::target::{OverlayId, TargetKey};

pub type Result<T> = std::result::Result<T, GuideError>;

/// Navigation precondition violations. None of them change guide state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GuideError {
    #[error("no targets are visible")]
    NoVisibleTargets,

    #[error("step {index} is out of range ({count} visible)")]
    StepOutOfRange { index: usize, count: usize },

    #[error("target '{target}' is no longer visible")]
    TargetHidden { target: TargetKey },

    #[error("unknown overlay: {overlay}")]
    UnknownOverlay { overlay: OverlayId },
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = GuideError::StepOutOfRange { index: 4, count: 2 };
        assert_eq!(err.to_string(), "step 4 is out of range (2 visible)");

        let err = GuideError::TargetHidden {
            target: TargetKey::parse("#gone").unwrap(),
        };
        assert!(err.to_string().contains("#gone"));
    }
}
