// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draining visibility writes into change lists.
//!
//! Writes mark the [`VISIBILITY`](crate::dirty::VISIBILITY) channel. On
//! [`LayerSet::evaluate`], each drained slot's flag is compared against the
//! value last handed to the map; only real transitions are reported, so an
//! adapter that applies [`VisibilityChanges`] never writes a flag twice.
//!
//! [`VisibilityChanges`] uses raw slot indices so adapters can go straight to
//! [`key_at`](LayerSet::key_at).

use alloc::vec::Vec;

use super::store::LayerSet;
use crate::dirty;

/// The set of changes produced by a single [`LayerSet::evaluate`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibilityChanges {
    /// Slots that went from hidden to visible.
    pub shown: Vec<u32>,
    /// Slots that went from visible to hidden.
    pub hidden: Vec<u32>,
    /// Slots added since the last evaluate.
    pub added: Vec<u32>,
    /// Whether layers or group members were added.
    pub topology_changed: bool,
}

impl VisibilityChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.shown.clear();
        self.hidden.clear();
        self.added.clear();
        self.topology_changed = false;
    }

    /// Returns `true` if nothing needs to be applied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shown.is_empty() && self.hidden.is_empty() && !self.topology_changed
    }
}

impl LayerSet {
    /// Drains pending visibility writes and returns the transitions the map
    /// has not seen yet.
    pub fn evaluate(&mut self) -> VisibilityChanges {
        let mut changes = VisibilityChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer.
    pub fn evaluate_into(&mut self, changes: &mut VisibilityChanges) {
        changes.clear();

        let dirty_visibility: Vec<u32> = self
            .dirty
            .drain(dirty::VISIBILITY)
            .affected()
            .deterministic()
            .run()
            .collect();
        for idx in dirty_visibility {
            let now = self.visible[idx as usize];
            if now != self.presented[idx as usize] {
                if now {
                    changes.shown.push(idx);
                } else {
                    changes.hidden.push(idx);
                }
                self.presented[idx as usize] = now;
            }
        }

        let topology: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();
        changes.topology_changed = !topology.is_empty();

        core::mem::swap(&mut self.pending_added, &mut changes.added);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::layer::LayerKey;

    #[test]
    fn first_evaluate_reports_additions_only() {
        let mut set = LayerSet::new();
        set.push_layer("1", true);
        set.push_layer("2", false);
        let changes = set.evaluate();
        assert_eq!(changes.added, vec![0, 1]);
        assert!(changes.topology_changed);
        assert!(changes.shown.is_empty() && changes.hidden.is_empty());

        let again = set.evaluate();
        assert!(again.is_empty(), "nothing pending after a drain");
        assert!(again.added.is_empty());
    }

    #[test]
    fn transitions_are_reported_once() {
        let mut set = LayerSet::new();
        set.push_layer("1", true);
        set.push_layer("2", false);
        let _ = set.evaluate();

        set.set_visible(&[LayerKey::new("2")]);
        let changes = set.evaluate();
        assert_eq!(changes.shown, vec![1]);
        assert_eq!(changes.hidden, vec![0]);
        assert!(!changes.topology_changed);
    }

    #[test]
    fn group_members_are_reported_with_their_group() {
        let mut set = LayerSet::new();
        let one = set.push_layer("1", true);
        let g = set.push_group("g", false);
        let g1 = set.push_child(g, "g1", false);
        let g2 = set.push_child(g, "g2", false);
        let _ = set.evaluate();

        set.set_visible(&[LayerKey::new("g")]);
        let mut changes = set.evaluate();
        changes.shown.sort_unstable();
        assert_eq!(changes.shown, vec![g.index(), g1.index(), g2.index()]);
        assert_eq!(changes.hidden, vec![one.index()]);
    }

    #[test]
    fn write_and_revert_between_evaluates_cancels_out() {
        let mut set = LayerSet::new();
        set.push_layer("1", true);
        set.push_layer("2", false);
        let _ = set.evaluate();

        set.set_visible(&[LayerKey::new("2")]);
        set.set_visible(&[LayerKey::new("1")]);
        assert!(set.evaluate().is_empty());
    }
}
