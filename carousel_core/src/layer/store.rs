// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays layer storage with group membership and lookups.

use alloc::vec::Vec;

use understory_dirty::{CycleHandling, DirtyTracker};

use super::id::{INVALID, LayerKey, LayerSlot};
use super::traverse::{Children, TopLevel};
use crate::dirty;

/// The layers a carousel offers, plus the members of any group layers.
///
/// The shape of the set (which layers exist, which are groups, who belongs to
/// which group) is fixed by whoever builds it from the map. The carousel only
/// flips visibility flags; see [`set_visible`](Self::set_visible) and
/// [`show_only`](Self::show_only).
///
/// Keys are expected to be unique among top-level layers. Duplicates are not
/// rejected here; [`has_unique_keys`](Self::has_unique_keys) lets the builder
/// check before handing the set over.
#[derive(Debug)]
pub struct LayerSet {
    // -- Identity --
    pub(crate) key: Vec<LayerKey>,
    pub(crate) group: Vec<bool>,

    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) top_level: Vec<u32>,

    // -- Visibility --
    pub(crate) visible: Vec<bool>,
    /// Flag values as of the last evaluate (what the map currently shows).
    pub(crate) presented: Vec<bool>,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,
    pub(crate) pending_added: Vec<u32>,
}

impl Default for LayerSet {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerSet {
    /// Creates an empty layer set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            key: Vec::new(),
            group: Vec::new(),
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            top_level: Vec::new(),
            visible: Vec::new(),
            presented: Vec::new(),
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            pending_added: Vec::new(),
        }
    }

    // -- Building --

    /// Appends a plain layer to the carousel.
    ///
    /// `visible` is the flag the map currently reports for it.
    pub fn push_layer(&mut self, key: impl Into<LayerKey>, visible: bool) -> LayerSlot {
        let slot = self.alloc(key.into(), false, visible);
        self.top_level.push(slot.idx);
        slot
    }

    /// Appends a group layer to the carousel. Add members with
    /// [`push_child`](Self::push_child).
    pub fn push_group(&mut self, key: impl Into<LayerKey>, visible: bool) -> LayerSlot {
        let slot = self.alloc(key.into(), true, visible);
        self.top_level.push(slot.idx);
        slot
    }

    /// Appends a member to `group`.
    ///
    /// Members are not offered by the carousel on their own and cannot be
    /// targeted by [`set_visible`](Self::set_visible); they follow their
    /// group.
    ///
    /// # Panics
    ///
    /// Panics if `group` is out of range or is not a group layer.
    pub fn push_child(
        &mut self,
        group: LayerSlot,
        key: impl Into<LayerKey>,
        visible: bool,
    ) -> LayerSlot {
        self.validate(group);
        assert!(
            self.group[group.idx as usize],
            "{group:?} is not a group layer"
        );
        let child = self.alloc(key.into(), false, visible);
        let (p, c) = (group.idx, child.idx);
        self.parent[c as usize] = p;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            // Walk to last member.
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
        }

        // Member depends on its group: an eager mark on the group reaches it.
        let _ = self.dirty.add_dependency(c, p, dirty::VISIBILITY);
        self.dirty.mark(p, dirty::TOPOLOGY);
        child
    }

    // -- Queries --

    /// Number of layers the carousel offers (group members excluded).
    #[must_use]
    pub fn len(&self) -> usize {
        self.top_level.len()
    }

    /// Returns `true` if the carousel offers no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.top_level.is_empty()
    }

    /// Number of allocated slots, group members included.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.key.len()
    }

    /// Iterates the offered layers in carousel order.
    #[must_use]
    pub fn top_level(&self) -> TopLevel<'_> {
        TopLevel::new(&self.top_level)
    }

    /// Returns an iterator over the members of a group (empty for plain
    /// layers).
    #[must_use]
    pub fn children(&self, slot: LayerSlot) -> Children<'_> {
        self.validate(slot);
        Children::new(self, self.first_child[slot.idx as usize])
    }

    /// Returns the group a member belongs to, if any.
    #[must_use]
    pub fn parent(&self, slot: LayerSlot) -> Option<LayerSlot> {
        self.validate(slot);
        let p = self.parent[slot.idx as usize];
        (p != INVALID).then_some(LayerSlot { idx: p })
    }

    /// Returns the key of a layer.
    #[must_use]
    pub fn key(&self, slot: LayerSlot) -> &LayerKey {
        self.validate(slot);
        &self.key[slot.idx as usize]
    }

    /// Returns whether a layer's visibility flag is set.
    #[must_use]
    pub fn is_visible(&self, slot: LayerSlot) -> bool {
        self.validate(slot);
        self.visible[slot.idx as usize]
    }

    /// Returns whether a layer is a group.
    #[must_use]
    pub fn is_group(&self, slot: LayerSlot) -> bool {
        self.validate(slot);
        self.group[slot.idx as usize]
    }

    /// Finds the offered layer whose key equals `id`.
    ///
    /// Only top-level layers are searched; group members are not offered on
    /// their own. With duplicate keys the first match wins.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<LayerSlot> {
        self.top_level
            .iter()
            .copied()
            .find(|&idx| self.key[idx as usize] == *id)
            .map(|idx| LayerSlot { idx })
    }

    /// Returns the first offered layer whose flag is set.
    ///
    /// A linear scan; carousels hold a handful of layers.
    #[must_use]
    pub fn first_visible(&self) -> Option<LayerSlot> {
        self.top_level
            .iter()
            .copied()
            .find(|&idx| self.visible[idx as usize])
            .map(|idx| LayerSlot { idx })
    }

    /// Keys of all offered layers whose flag is set, in carousel order.
    #[must_use]
    pub fn visible_keys(&self) -> Vec<LayerKey> {
        self.top_level
            .iter()
            .filter(|&&idx| self.visible[idx as usize])
            .map(|&idx| self.key[idx as usize].clone())
            .collect()
    }

    /// Returns `false` if two offered layers share a key.
    #[must_use]
    pub fn has_unique_keys(&self) -> bool {
        self.top_level.iter().enumerate().all(|(i, &a)| {
            self.top_level[i + 1..]
                .iter()
                .all(|&b| self.key[a as usize] != self.key[b as usize])
        })
    }

    // -- Raw-index accessors for adapters --
    //
    // These accept raw slot indices as found in `VisibilityChanges`.

    /// Returns the key at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range.
    #[must_use]
    pub fn key_at(&self, idx: u32) -> &LayerKey {
        self.validate(LayerSlot { idx });
        &self.key[idx as usize]
    }

    /// Returns the visibility flag at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range.
    #[must_use]
    pub fn is_visible_at(&self, idx: u32) -> bool {
        self.validate(LayerSlot { idx });
        self.visible[idx as usize]
    }

    // -- Internal helpers --

    fn alloc(&mut self, key: LayerKey, group: bool, visible: bool) -> LayerSlot {
        assert!(self.key.len() < INVALID as usize, "layer set is full");
        #[expect(
            clippy::cast_possible_truncation,
            reason = "length is checked against INVALID above"
        )]
        let idx = self.key.len() as u32;
        self.key.push(key);
        self.group.push(group);
        self.parent.push(INVALID);
        self.first_child.push(INVALID);
        self.next_sibling.push(INVALID);
        self.visible.push(visible);
        self.presented.push(visible);
        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);
        LayerSlot { idx }
    }

    /// Panics if the slot was not issued by this set.
    pub(crate) fn validate(&self, slot: LayerSlot) {
        assert!(
            (slot.idx as usize) < self.key.len(),
            "slot index {} out of range (len {})",
            slot.idx,
            self.key.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn find_matches_by_value() {
        let mut set = LayerSet::new();
        let a = set.push_layer("1", true);
        let b = set.push_layer("2", false);
        assert_eq!(set.find("1"), Some(a));
        assert_eq!(set.find(&alloc::string::String::from("2")), Some(b));
        assert_eq!(set.find("3"), None);
        assert_eq!(set.find(""), None);
    }

    #[test]
    fn find_ignores_group_members() {
        let mut set = LayerSet::new();
        let g = set.push_group("g", false);
        set.push_child(g, "g1", false);
        assert_eq!(set.find("g"), Some(g));
        assert_eq!(set.find("g1"), None, "members are not offered");
    }

    #[test]
    fn children_in_insertion_order() {
        let mut set = LayerSet::new();
        let g = set.push_group("g", false);
        let c1 = set.push_child(g, "g1", false);
        let c2 = set.push_child(g, "g2", false);
        let plain = set.push_layer("1", true);

        let kids: Vec<_> = set.children(g).collect();
        assert_eq!(kids, vec![c1, c2]);
        assert_eq!(set.parent(c2), Some(g));
        assert_eq!(set.parent(g), None);
        assert!(set.children(plain).next().is_none());
        assert_eq!(set.len(), 2, "members do not count as offered layers");
        assert_eq!(set.slot_count(), 4);
    }

    #[test]
    fn first_visible_scans_in_order() {
        let mut set = LayerSet::new();
        set.push_layer("1", false);
        let b = set.push_layer("2", true);
        set.push_layer("3", true);
        assert_eq!(set.first_visible(), Some(b));
        assert_eq!(set.visible_keys(), vec![LayerKey::new("2"), LayerKey::new("3")]);
    }

    #[test]
    fn duplicate_keys_detected() {
        let mut set = LayerSet::new();
        set.push_layer("a", false);
        set.push_layer("b", false);
        assert!(set.has_unique_keys());
        set.push_layer("a", false);
        assert!(!set.has_unique_keys());
    }

    #[test]
    #[should_panic(expected = "is not a group layer")]
    fn push_child_into_plain_layer_panics() {
        let mut set = LayerSet::new();
        let a = set.push_layer("a", false);
        set.push_child(a, "a1", false);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn foreign_slot_panics() {
        let mut big = LayerSet::new();
        big.push_layer("a", false);
        let far = big.push_layer("b", false);
        let mut small = LayerSet::new();
        small.push_layer("a", false);
        let _ = small.is_visible(far);
    }
}
