//! Target identity — tour target keys, overlay handles, and authoring entries.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};


/// Stable key of an annotated page element: the selector written in the
/// tour markup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetKey(String);


impl TargetKey {
    /// Validate and normalize a selector string.
    ///
    /// Surrounding whitespace is trimmed. Empty keys and keys containing
    /// control characters are rejected.
    pub fn parse(raw: &str) -> Result<TargetKey, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("empty target selector".to_string());
        }
        if let Some(c) = trimmed.chars().find(|c| c.is_control()) {
            return Err(format!(
                "control character {:?} in target selector '{}'",
                c,
                trimmed.escape_debug()
            ));
        }
        Ok(TargetKey(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}


impl fmt::Display for TargetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


impl AsRef<str> for TargetKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}


impl Borrow<str> for TargetKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}


/// Handle of the overlay box bound to one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverlayId(pub u32);


impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "overlay-{}", self.0)
    }
}


/// One step as written in the page's tour markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourEntry {
    /// Selector of the element this step annotates.
    pub target: String,
    /// Placement hint copied onto the overlay's step-number badge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_class: Option<String>,
    /// Rendered markup shown in the message panel.
    #[serde(default)]
    pub content: String,
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let key = TargetKey::parse("  #save-button ").unwrap();
        assert_eq!(key.as_str(), "#save-button");
    }

    #[test]
    fn parse_accepts_compound_selectors() {
        assert!(TargetKey::parse("#nav > li.first a[href='/']").is_ok());
        assert!(TargetKey::parse(".toolbar .btn:nth-child(2)").is_ok());
    }

    #[test]
    fn parse_rejects_empty() {
        assert!(TargetKey::parse("").is_err());
        assert!(TargetKey::parse("   ").is_err());
    }

    #[test]
    fn parse_rejects_control_characters() {
        let err = TargetKey::parse("#a\u{0}b").unwrap_err();
        assert!(err.contains("control character"));
    }

    #[test]
    fn key_serializes_as_plain_string() {
        let key = TargetKey::parse("#x").unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"#x\"");
    }

    #[test]
    fn overlay_id_display() {
        assert_eq!(OverlayId(3).to_string(), "overlay-3");
    }
}
