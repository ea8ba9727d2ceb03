//! Page — read-only view of the host document.
//!
//! The guide never touches the document directly. Everything it needs to
//! know about the page comes through this trait; everything it wants to
//! change goes out as `Action`s.

use crate::types::geometry::{ElementBox, Viewport};
use crate::types::target::{TargetKey, TourEntry};


pub trait Page {
    /// Whether the page carries a tour at all.
    fn has_tour(&self) -> bool;

    /// Toggle title written on the tour itself, if any.
    fn tour_title(&self) -> Option<String> {
        None
    }

    /// All tour entries in document order, including ones already seen.
    fn tour_entries(&self) -> Vec<TourEntry>;

    /// Layout of the element matching `key`, or `None` if no such element
    /// is in the document. Measuring forces layout; callers batch.
    fn inspect(&self, key: &TargetKey) -> Option<ElementBox>;

    /// Whether an element matching `selector` is currently shown.
    fn is_shown(&self, selector: &str) -> bool;

    fn viewport(&self) -> Viewport;

    /// Whether the page carries a welcome dialog.
    fn has_welcome(&self) -> bool {
        false
    }

    /// Address of the current page, used to key persisted welcome state.
    fn url(&self) -> String;
}
