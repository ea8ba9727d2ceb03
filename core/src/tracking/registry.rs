//! Target registry — every annotated target seen so far, in discovery order.
//!
//! Each target is bound to exactly one overlay when it is first discovered.
//! The binding is kept in both directions so a target can find its overlay
//! and a clicked overlay can find its target.

use std::collections::HashMap;

use crate::response::Action;
use crate::types::geometry::TargetStyle;
use crate::types::target::{OverlayId, TargetKey, TourEntry};


#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub key: TargetKey,
    /// Markup captured at discovery. Never replaced afterwards.
    pub content: String,
    pub position_class: Option<String>,
    pub overlay: OverlayId,
    /// Style recorded by the last recompute. Empty until the first one.
    pub style: TargetStyle,
    /// 1-based rank among visible targets at the last recompute.
    pub visible_index: Option<usize>,
}


#[derive(Debug, Default)]
pub struct TargetRegistry {
    targets: Vec<Target>,
    by_key: HashMap<TargetKey, usize>,
    by_overlay: HashMap<OverlayId, usize>,
    next_overlay: u32,
}


impl TargetRegistry {
    pub fn new() -> TargetRegistry {
        TargetRegistry::default()
    }

    /// Register every entry whose target is not known yet, in the order
    /// given, and queue a `CreateOverlay` for each. Returns how many were
    /// added. Known targets are left untouched, content included.
    pub fn discover(&mut self, entries: &[TourEntry], actions: &mut Vec<Action>) -> usize {
        let mut added = 0;
        for entry in entries {
            let key = match TargetKey::parse(&entry.target) {
                Ok(key) => key,
                Err(e) => {
                    tracing::warn!(selector = %entry.target.escape_debug(), "skipping tour entry: {}", e);
                    continue;
                }
            };
            if self.by_key.contains_key(&key) {
                continue;
            }

            let overlay = OverlayId(self.next_overlay);
            self.next_overlay += 1;
            let slot = self.targets.len();

            actions.push(Action::CreateOverlay {
                overlay,
                target: key.to_string(),
                position_class: entry.position_class.clone(),
            });
            self.by_key.insert(key.clone(), slot);
            self.by_overlay.insert(overlay, slot);
            self.targets.push(Target {
                key,
                content: entry.content.clone(),
                position_class: entry.position_class.clone(),
                overlay,
                style: TargetStyle::default(),
                visible_index: None,
            });
            added += 1;
        }
        if added > 0 {
            tracing::debug!(added, total = self.targets.len(), "discovered tour targets");
        }
        added
    }

    pub fn get(&self, key: &str) -> Option<&Target> {
        self.by_key.get(key).map(|&slot| &self.targets[slot])
    }

    /// All targets in discovery order.
    pub fn all(&self) -> &[Target] {
        &self.targets
    }

    pub(crate) fn all_mut(&mut self) -> &mut [Target] {
        &mut self.targets
    }

    pub fn overlay_for(&self, key: &str) -> Option<OverlayId> {
        self.get(key).map(|t| t.overlay)
    }

    pub fn key_for_overlay(&self, overlay: OverlayId) -> Option<&TargetKey> {
        self.by_overlay
            .get(&overlay)
            .map(|&slot| &self.targets[slot].key)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Forget every target. Overlay handles are not reused afterwards.
    pub fn clear(&mut self) {
        self.targets.clear();
        self.by_key.clear();
        self.by_overlay.clear();
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
