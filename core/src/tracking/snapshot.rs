//! Geometry snapshot — is a target on screen, and where.

use crate::page::Page;
use crate::types::geometry::{ElementBox, Rect, TargetStyle};
use crate::types::target::TargetKey;


/// Result of measuring one target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Snapshot {
    /// Missing from the document, not rendered, or without a layout box.
    /// Carries no geometry so it can't be mistaken for a zero-sized box.
    Hidden,
    Shown(Rect),
}


impl Snapshot {
    pub fn is_visible(&self) -> bool {
        matches!(self, Snapshot::Shown(_))
    }

    pub fn rect(&self) -> Option<&Rect> {
        match self {
            Snapshot::Shown(rect) => Some(rect),
            Snapshot::Hidden => None,
        }
    }

    /// Style map for this snapshot: the full box when shown, only the
    /// display flag when hidden.
    pub fn style(&self) -> TargetStyle {
        match self {
            Snapshot::Shown(rect) => TargetStyle::shown(rect),
            Snapshot::Hidden => TargetStyle::hidden(),
        }
    }
}


/// Classify what the page reported about an element.
pub fn classify(element: Option<ElementBox>) -> Snapshot {
    match element {
        Some(el) if el.rendered && el.rect.has_area() => Snapshot::Shown(el.rect),
        _ => Snapshot::Hidden,
    }
}


/// Measure the element bound to `key`.
pub fn take<P: Page + ?Sized>(page: &P, key: &TargetKey) -> Snapshot {
    classify(page.inspect(key))
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
