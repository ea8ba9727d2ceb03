//! Overlay renderer — turn change records into overlay actions.

use crate::response::Action;
use crate::tracking::diff::{ChangeRecord, IndexChange};
use crate::tracking::registry::TargetRegistry;


/// Queue the overlay updates described by `records`, then empty `records`.
///
/// Only changed style fields are sent, with the stacking level raised one
/// above the target's. A rank change relabels the overlay. Records whose
/// target is not in the registry are dropped.
pub fn apply_changes(
    records: &mut Vec<ChangeRecord>,
    registry: &TargetRegistry,
    actions: &mut Vec<Action>,
) {
    for record in records.drain(..) {
        let Some(overlay) = registry.overlay_for(record.target.as_str()) else {
            tracing::debug!(target_key = %record.target, "no overlay bound; dropping change");
            continue;
        };
        if !record.style.is_empty() {
            actions.push(Action::StyleOverlay {
                overlay,
                style: record.style.raised(),
            });
        }
        if let IndexChange::Changed(step) = record.index {
            actions.push(Action::LabelOverlay { overlay, step });
        }
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
