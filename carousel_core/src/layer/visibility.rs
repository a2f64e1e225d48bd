// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility writes.
//!
//! Two write paths exist:
//!
//! - [`LayerSet::set_visible`] is used by hover-preview and click-commit. It
//!   rewrites every offered layer's flag from a target key list and copies a
//!   group's flag onto all of its members.
//! - [`LayerSet::show_only`] is used by the container-level click. It hides
//!   every offered layer except one and leaves group members alone.

use understory_dirty::EagerPolicy;

use super::id::{INVALID, LayerKey, LayerSlot};
use super::store::LayerSet;
use crate::dirty;

impl LayerSet {
    /// Makes exactly the offered layers whose keys appear in `targets`
    /// visible and hides the rest.
    ///
    /// Group members always end up with their group's flag. Keys in `targets`
    /// that match nothing are ignored; an empty slice hides every layer.
    /// Calling this twice with the same targets leaves the same state as
    /// calling it once.
    pub fn set_visible(&mut self, targets: &[LayerKey]) {
        for i in 0..self.top_level.len() {
            let idx = self.top_level[i];
            let on = targets.contains(&self.key[idx as usize]);
            self.visible[idx as usize] = on;
            // Eager: reaches group members through their dependency edges.
            self.dirty.mark_with(idx, dirty::VISIBILITY, &EagerPolicy);

            let mut child = self.first_child[idx as usize];
            while child != INVALID {
                self.visible[child as usize] = on;
                child = self.next_sibling[child as usize];
            }
        }
    }

    /// Hides every offered layer except `slot`, which is shown.
    ///
    /// Group members keep their flags. If `slot` is itself a group member,
    /// only that member is shown and its group is hidden with the rest.
    ///
    /// # Panics
    ///
    /// Panics if `slot` was not issued by this set.
    pub fn show_only(&mut self, slot: LayerSlot) {
        self.validate(slot);
        for i in 0..self.top_level.len() {
            let idx = self.top_level[i];
            self.set_flag(idx, false);
        }
        self.set_flag(slot.idx, true);
    }

    /// Writes one flag without touching group members.
    fn set_flag(&mut self, idx: u32, on: bool) {
        self.visible[idx as usize] = on;
        self.dirty.mark(idx, dirty::VISIBILITY);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    fn flags(set: &LayerSet) -> Vec<bool> {
        (0..set.slot_count())
            .map(|i| set.is_visible_at(u32::try_from(i).unwrap()))
            .collect()
    }

    #[test]
    fn single_target_is_the_only_visible_layer() {
        let mut set = LayerSet::new();
        set.push_layer("1", true);
        let b = set.push_layer("2", false);
        set.push_layer("3", true);

        set.set_visible(&[LayerKey::new("2")]);
        assert_eq!(flags(&set), vec![false, true, false]);
        assert_eq!(set.first_visible(), Some(b));
    }

    #[test]
    fn group_flag_reaches_every_member() {
        let mut set = LayerSet::new();
        let g = set.push_group("g", false);
        set.push_child(g, "g1", false);
        set.push_child(g, "g2", true);
        let h = set.push_group("h", true);
        set.push_child(h, "h1", true);
        set.push_layer("1", true);

        set.set_visible(&[LayerKey::new("g")]);
        // g, g1, g2, h, h1, 1
        assert_eq!(flags(&set), vec![true, true, true, false, false, false]);
    }

    #[test]
    fn empty_targets_hide_everything() {
        let mut set = LayerSet::new();
        set.push_layer("1", true);
        let g = set.push_group("g", true);
        set.push_child(g, "g1", true);

        set.set_visible(&[]);
        assert_eq!(flags(&set), vec![false, false, false]);
        assert_eq!(set.first_visible(), None);
    }

    #[test]
    fn unknown_target_keys_are_ignored() {
        let mut set = LayerSet::new();
        set.push_layer("1", true);
        set.set_visible(&[LayerKey::new("nope")]);
        assert_eq!(flags(&set), vec![false]);
    }

    #[test]
    fn set_visible_is_idempotent() {
        let mut set = LayerSet::new();
        set.push_layer("1", true);
        let g = set.push_group("g", false);
        set.push_child(g, "g1", false);
        let targets = [LayerKey::new("g")];

        set.set_visible(&targets);
        let once = flags(&set);
        let _ = set.evaluate();
        set.set_visible(&targets);
        assert_eq!(flags(&set), once);
        let changes = set.evaluate();
        assert!(
            changes.shown.is_empty() && changes.hidden.is_empty(),
            "second identical write changes nothing"
        );
    }

    #[test]
    fn show_only_leaves_members_alone() {
        let mut set = LayerSet::new();
        let g = set.push_group("g", true);
        set.push_child(g, "g1", true);
        let one = set.push_layer("1", false);

        set.show_only(one);
        // g, g1, 1
        assert_eq!(flags(&set), vec![false, true, true]);
    }
}
