//! Command — the typed interface for every guide operation a shell can
//! trigger.

use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "command")]
pub enum Command {
    // -----------------------------------------------------------------
    // Guide lifecycle
    // -----------------------------------------------------------------

    #[serde(rename = "status")]
    Status,

    #[serde(rename = "open")]
    Open,

    #[serde(rename = "close")]
    Close,

    /// The open button: close, pop the welcome, or open.
    #[serde(rename = "toggle")]
    Toggle,

    /// Re-measure targets, e.g. after a viewport resize.
    #[serde(rename = "refresh")]
    Refresh,

    /// The page finished loading.
    #[serde(rename = "ready")]
    Ready,

    #[serde(rename = "teardown")]
    Teardown,

    // -----------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------

    #[serde(rename = "step.show")]
    StepShow {
        index: usize,
    },

    #[serde(rename = "step.next")]
    StepNext,

    #[serde(rename = "step.back")]
    StepBack,

    #[serde(rename = "overlay.select")]
    OverlaySelect {
        overlay: u32,
    },

    // -----------------------------------------------------------------
    // Welcome dialog
    // -----------------------------------------------------------------

    #[serde(rename = "welcome.dismiss")]
    WelcomeDismiss,

    #[serde(rename = "welcome.ignore")]
    WelcomeIgnore,

    #[serde(rename = "welcome.start")]
    WelcomeStart,

    // -----------------------------------------------------------------
    // Help
    // -----------------------------------------------------------------

    #[serde(rename = "help")]
    Help {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        topic: Option<String>,
    },
}
