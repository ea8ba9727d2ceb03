//! Geometry types — measured element boxes, viewport, and the optional-field
//! style map shared by stored state, diffs, and overlay styles.

use serde::{Deserialize, Serialize};


/// Stacking level of an element as reported by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZIndex {
    #[default]
    Auto,
    Level(i32),
}


impl ZIndex {
    /// The level one above this one. `Auto` stacks at 0, so it becomes 1.
    pub fn raised(self) -> ZIndex {
        match self {
            ZIndex::Auto => ZIndex::Level(1),
            ZIndex::Level(n) => ZIndex::Level(n.saturating_add(1)),
        }
    }
}


impl From<Option<i32>> for ZIndex {
    fn from(level: Option<i32>) -> Self {
        level.map_or(ZIndex::Auto, ZIndex::Level)
    }
}


/// Document-relative position and outer size of an element, in px.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub z_index: ZIndex,
}


impl Rect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether the element occupies any layout space.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 || self.height > 0.0
    }
}


/// What the page reports about an element that exists in the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementBox {
    /// False when display/visibility rules (on the element or an ancestor)
    /// take it out of rendering.
    pub rendered: bool,
    pub rect: Rect,
}


/// Vertical window onto the document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scroll_top: f64,
    pub height: f64,
}


impl Viewport {
    /// True if `rect` overlaps the viewport band, with the bottom edge pulled
    /// up by `tolerance` px.
    pub fn contains(&self, rect: &Rect, tolerance: f64) -> bool {
        let bottom = self.scroll_top + self.height;
        rect.bottom() >= self.scroll_top && rect.top <= bottom - tolerance
    }
}


/// Style map of a target or overlay. A `None` field is absent: not yet
/// measured in stored state, unchanged in a delta, untouched in an overlay
/// update.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TargetStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<ZIndex>,
}


impl TargetStyle {
    /// Style of a target that is not on screen: only the display flag.
    pub fn hidden() -> TargetStyle {
        TargetStyle {
            display: Some(false),
            ..TargetStyle::default()
        }
    }

    /// Full style of a visible target.
    pub fn shown(rect: &Rect) -> TargetStyle {
        TargetStyle {
            display: Some(true),
            top: Some(rect.top),
            left: Some(rect.left),
            width: Some(rect.width),
            height: Some(rect.height),
            z_index: Some(rect.z_index),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == TargetStyle::default()
    }

    /// Fields of `self` whose value differs from `previous`. Fields absent in
    /// `self` are never reported; fields absent in `previous` always are.
    pub fn changes_from(&self, previous: &TargetStyle) -> TargetStyle {
        TargetStyle {
            display: changed(self.display, previous.display),
            top: changed(self.top, previous.top),
            left: changed(self.left, previous.left),
            width: changed(self.width, previous.width),
            height: changed(self.height, previous.height),
            z_index: changed(self.z_index, previous.z_index),
        }
    }

    /// The same map with the stacking level lifted one above the target's.
    pub fn raised(&self) -> TargetStyle {
        TargetStyle {
            z_index: self.z_index.map(ZIndex::raised),
            ..*self
        }
    }

    /// Overwrite the fields present in `update`, keep the rest.
    pub fn merge(&mut self, update: &TargetStyle) {
        if update.display.is_some() {
            self.display = update.display;
        }
        if update.top.is_some() {
            self.top = update.top;
        }
        if update.left.is_some() {
            self.left = update.left;
        }
        if update.width.is_some() {
            self.width = update.width;
        }
        if update.height.is_some() {
            self.height = update.height;
        }
        if update.z_index.is_some() {
            self.z_index = update.z_index;
        }
    }
}


fn changed<T: PartialEq + Copy>(new: Option<T>, old: Option<T>) -> Option<T> {
    match new {
        Some(value) if old != Some(value) => Some(value),
        _ => None,
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
