//! Response and Action — what the guide hands back to its shell.
//!
//! Every command answers with a `Response`. Presentation changes are queued
//! as `Action`s; the shell drains the queue and applies them to the page.

use serde::{Deserialize, Serialize};

use crate::types::geometry::TargetStyle;
use crate::types::target::OverlayId;


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Response {
    Ok { output: String },
    Error { message: String },
}


/// Caption and hover title of the guide's own open toggle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenToggle {
    pub caption: String,
    pub title: String,
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Insert the guide's container. `toggle` is `None` when the host
    /// supplies its own open button.
    Mount {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        toggle: Option<OpenToggle>,
    },

    /// Create the overlay box bound to `target`.
    CreateOverlay {
        overlay: OverlayId,
        target: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        position_class: Option<String>,
    },

    /// Apply the present fields of `style`; absent fields keep their value.
    StyleOverlay { overlay: OverlayId, style: TargetStyle },

    /// Set (or clear) the step number shown on an overlay.
    LabelOverlay { overlay: OverlayId, step: Option<usize> },

    /// Mark one overlay active and every other inactive. `None` clears.
    ActivateOverlay { overlay: Option<OverlayId> },

    ShowMessage { content: String, step: usize },

    HideMessage,

    ScrollTo { top: f64 },

    SetGuideOpen { open: bool },

    SetWelcomeOpen { open: bool },

    /// Remove everything the guide ever added to the page.
    RemoveAll,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_is_tagged() {
        let action = Action::ScrollTo { top: 150.0 };
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"action":"scroll_to","top":150.0}"#);
    }

    #[test]
    fn style_overlay_round_trip() {
        let action = Action::StyleOverlay {
            overlay: OverlayId(2),
            style: TargetStyle::hidden(),
        };
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains(r#""style":{"display":false}"#));
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn mount_without_toggle_omits_the_field() {
        let json = serde_json::to_string(&Action::Mount { toggle: None }).unwrap();
        assert_eq!(json, r#"{"action":"mount"}"#);
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Action::Mount { toggle: None });
    }

    #[test]
    fn response_is_tagged() {
        let resp = Response::Error {
            message: "nope".into(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"status":"error","message":"nope"}"#);
    }
}
