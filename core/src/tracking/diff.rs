//! Diff engine — re-measure every registered target and record what moved.
//!
//! Passes run on open, on viewport resize, and on explicit refresh. Every
//! pass measures every target once.

use serde::Serialize;

use crate::page::Page;
use crate::tracking::registry::TargetRegistry;
use crate::tracking::snapshot;
use crate::types::geometry::TargetStyle;
use crate::types::target::TargetKey;


/// Whether a target's visible-index moved during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexChange {
    #[default]
    Unchanged,
    /// New 1-based rank, or `None` when the target left the visible set.
    Changed(Option<usize>),
}


/// What changed for one target since the previous pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeRecord {
    pub target: TargetKey,
    /// Only the style fields whose value changed.
    pub style: TargetStyle,
    pub index: IndexChange,
}


impl ChangeRecord {
    pub fn is_empty(&self) -> bool {
        self.style.is_empty() && self.index == IndexChange::Unchanged
    }
}


/// Outcome of one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recompute {
    /// One record per changed target, in registry order.
    pub changes: Vec<ChangeRecord>,
    /// Keys of the visible targets, in registry order. Position `i` in this
    /// list is step `i` of the tour.
    pub visible: Vec<TargetKey>,
}


/// Measure every registered target, store the fresh state, and report the
/// differences against what was stored before.
///
/// Visible targets are ranked 1, 2, 3... in registry order. Stored state is
/// overwritten whether or not anything changed.
pub fn recompute<P: Page + ?Sized>(page: &P, registry: &mut TargetRegistry) -> Recompute {
    let mut out = Recompute::default();

    for target in registry.all_mut() {
        let snap = snapshot::take(page, &target.key);
        let index = if snap.is_visible() {
            out.visible.push(target.key.clone());
            Some(out.visible.len())
        } else {
            None
        };
        let style = snap.style();

        let record = ChangeRecord {
            target: target.key.clone(),
            style: style.changes_from(&target.style),
            index: if index != target.visible_index {
                IndexChange::Changed(index)
            } else {
                IndexChange::Unchanged
            },
        };
        if !record.is_empty() {
            out.changes.push(record);
        }

        target.style = style;
        target.visible_index = index;
    }

    tracing::debug!(
        targets = registry.len(),
        visible = out.visible.len(),
        changed = out.changes.len(),
        "recomputed target geometry"
    );
    out
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::scene::{Scene, SceneElement};
    use crate::types::geometry::{Rect, ZIndex};
    use crate::types::target::TourEntry;
    use proptest::prelude::*;

    fn shown(top: f64, left: f64, width: f64, height: f64) -> SceneElement {
        SceneElement::shown(Rect {
            top,
            left,
            width,
            height,
            z_index: ZIndex::Auto,
        })
    }

    fn scene_with(targets: &[&str]) -> Scene {
        let mut scene = Scene::default();
        scene.tour = Some(
            targets
                .iter()
                .map(|t| TourEntry {
                    target: t.to_string(),
                    position_class: None,
                    content: format!("about {}", t),
                })
                .collect(),
        );
        scene
    }

    fn registry_for(scene: &Scene) -> TargetRegistry {
        let mut reg = TargetRegistry::new();
        let mut actions = Vec::new();
        reg.discover(&scene.tour_entries_or_empty(), &mut actions);
        reg
    }

    #[test]
    fn hidden_to_shown_reports_full_geometry_and_index() {
        let mut scene = scene_with(&["#a"]);
        let mut reg = registry_for(&scene);

        let first = recompute(&scene, &mut reg);
        assert_eq!(first.changes.len(), 1);
        assert_eq!(first.changes[0].style, TargetStyle::hidden());
        assert_eq!(first.changes[0].index, IndexChange::Unchanged);
        assert!(first.visible.is_empty());

        scene.set_element("#a", shown(200.0, 10.0, 300.0, 50.0));
        let second = recompute(&scene, &mut reg);
        assert_eq!(second.changes.len(), 1);
        let record = &second.changes[0];
        assert_eq!(record.target.as_str(), "#a");
        assert_eq!(
            record.style,
            TargetStyle {
                display: Some(true),
                top: Some(200.0),
                left: Some(10.0),
                width: Some(300.0),
                height: Some(50.0),
                z_index: Some(ZIndex::Auto),
            }
        );
        assert_eq!(record.index, IndexChange::Changed(Some(1)));
        assert_eq!(second.visible.len(), 1);
    }

    #[test]
    fn second_pass_without_changes_is_empty() {
        let mut scene = scene_with(&["#a", "#b"]);
        scene.set_element("#a", shown(0.0, 0.0, 10.0, 10.0));
        let mut reg = registry_for(&scene);

        let first = recompute(&scene, &mut reg);
        assert_eq!(first.changes.len(), 2);
        let second = recompute(&scene, &mut reg);
        assert!(second.changes.is_empty());
        assert_eq!(second.visible, first.visible);
    }

    #[test]
    fn moving_a_target_reports_only_moved_fields() {
        let mut scene = scene_with(&["#a"]);
        scene.set_element("#a", shown(10.0, 10.0, 50.0, 50.0));
        let mut reg = registry_for(&scene);
        recompute(&scene, &mut reg);

        scene.set_element("#a", shown(10.0, 40.0, 50.0, 50.0));
        let pass = recompute(&scene, &mut reg);
        assert_eq!(pass.changes.len(), 1);
        assert_eq!(
            pass.changes[0].style,
            TargetStyle {
                left: Some(40.0),
                ..TargetStyle::default()
            }
        );
        assert_eq!(pass.changes[0].index, IndexChange::Unchanged);
    }

    #[test]
    fn hiding_a_target_renumbers_the_rest() {
        let mut scene = scene_with(&["#a", "#b", "#c"]);
        for key in ["#a", "#b", "#c"] {
            scene.set_element(key, shown(0.0, 0.0, 10.0, 10.0));
        }
        let mut reg = registry_for(&scene);
        recompute(&scene, &mut reg);

        scene.remove_element("#a");
        let pass = recompute(&scene, &mut reg);
        let keys: Vec<&str> = pass.visible.iter().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["#b", "#c"]);

        assert_eq!(pass.changes.len(), 3);
        assert_eq!(pass.changes[0].style, TargetStyle::hidden());
        assert_eq!(pass.changes[0].index, IndexChange::Changed(None));
        // #b and #c only moved in rank.
        assert!(pass.changes[1].style.is_empty());
        assert_eq!(pass.changes[1].index, IndexChange::Changed(Some(1)));
        assert_eq!(pass.changes[2].index, IndexChange::Changed(Some(2)));
    }

    #[test]
    fn reappearing_target_reports_every_field_again() {
        let mut scene = scene_with(&["#a"]);
        scene.set_element("#a", shown(5.0, 5.0, 5.0, 5.0));
        let mut reg = registry_for(&scene);
        recompute(&scene, &mut reg);

        scene.remove_element("#a");
        recompute(&scene, &mut reg);
        assert_eq!(reg.get("#a").unwrap().style, TargetStyle::hidden());

        scene.set_element("#a", shown(5.0, 5.0, 5.0, 5.0));
        let pass = recompute(&scene, &mut reg);
        assert_eq!(pass.changes[0].style, TargetStyle::shown(&Rect {
            top: 5.0,
            left: 5.0,
            width: 5.0,
            height: 5.0,
            z_index: ZIndex::Auto,
        }));
    }

    #[test]
    fn unrendered_target_stays_out_of_the_visible_list() {
        let mut scene = scene_with(&["#a", "#b"]);
        let mut hidden = shown(0.0, 0.0, 10.0, 10.0);
        hidden.rendered = false;
        scene.set_element("#a", hidden);
        scene.set_element("#b", shown(0.0, 0.0, 10.0, 10.0));
        let mut reg = registry_for(&scene);

        let pass = recompute(&scene, &mut reg);
        let keys: Vec<&str> = pass.visible.iter().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["#b"]);
        assert_eq!(reg.get("#b").unwrap().visible_index, Some(1));
    }

    proptest! {
        #[test]
        fn visible_indices_are_contiguous(mask in proptest::collection::vec(any::<bool>(), 0..12)) {
            let names: Vec<String> = (0..mask.len()).map(|i| format!("#t{}", i)).collect();
            let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
            let mut scene = scene_with(&refs);
            for (name, on) in names.iter().zip(&mask) {
                if *on {
                    scene.set_element(name, shown(0.0, 0.0, 1.0, 1.0));
                }
            }
            let mut reg = registry_for(&scene);
            let pass = recompute(&scene, &mut reg);

            prop_assert_eq!(pass.visible.len(), mask.iter().filter(|on| **on).count());
            for (i, key) in pass.visible.iter().enumerate() {
                prop_assert_eq!(reg.get(key.as_str()).unwrap().visible_index, Some(i + 1));
            }
            let again = recompute(&scene, &mut reg);
            prop_assert!(again.changes.is_empty());
        }
    }
}
