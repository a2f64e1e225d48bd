// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover-preview and click-commit.
//!
//! Hovering a thumbnail temporarily makes its layer the only visible one;
//! leaving restores whatever was visible before. Clicking runs the same
//! snapshot-and-toggle sequence and additionally yields the selected key.
//!
//! ```text
//!   Idle ──begin_preview──► Previewing { snapshot } ──end_preview──► Idle
//!                                 │
//!                          commit_selection
//!                                 │
//!        LockOnCommit: Committed { key } ──end_preview (no-op)──► Idle
//!        RevertOnLeave: Previewing { snapshot taken at commit }
//! ```
//!
//! The functions here take the layer set and the state explicitly and never
//! hold on to either, so they can be driven without any UI.

use alloc::vec::Vec;

use crate::config::SnapshotPolicy;
use crate::layer::{LayerKey, LayerSet, LayerSlot};

/// Where the carousel is in a hover cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PreviewState {
    /// No hover in flight.
    #[default]
    Idle,
    /// A thumbnail is hovered; `snapshot` is the layer that was visible
    /// right before (`None`: nothing was visible).
    Previewing {
        /// Layer to restore on leave.
        snapshot: Option<LayerKey>,
    },
    /// A click committed `key` during the current hover; the next leave does
    /// not restore anything.
    Committed {
        /// The committed layer.
        key: LayerKey,
    },
}

impl PreviewState {
    /// Returns the snapshot a leave would restore, if a preview is in flight.
    ///
    /// The outer `Option` is `None` when no restore is pending; the inner one
    /// is `None` when the restore hides every layer.
    #[must_use]
    pub fn pending_restore(&self) -> Option<Option<&LayerKey>> {
        match self {
            Self::Previewing { snapshot } => Some(snapshot.as_ref()),
            Self::Idle | Self::Committed { .. } => None,
        }
    }
}

/// Finds the offered layer a UI event refers to.
///
/// `id` is the identifier carried by the event target, if any. Events without
/// an identifier, or with one the set does not contain, resolve to `None` and
/// callers are expected to do nothing further.
#[must_use]
pub fn resolve_layer(set: &LayerSet, id: Option<&str>) -> Option<LayerSlot> {
    set.find(id?)
}

/// Starts a hover-preview of `slot` and returns the recorded snapshot.
///
/// Records the first visible offered layer as the snapshot, then makes `slot`
/// the only visible layer. If a preview is already in flight its snapshot is
/// kept, so the eventual leave returns to the state before the first hover.
pub fn begin_preview(
    set: &mut LayerSet,
    state: &mut PreviewState,
    slot: LayerSlot,
) -> Option<LayerKey> {
    let snapshot = match state {
        PreviewState::Previewing { snapshot } => snapshot.clone(),
        PreviewState::Idle | PreviewState::Committed { .. } => current_snapshot(set),
    };
    *state = PreviewState::Previewing {
        snapshot: snapshot.clone(),
    };
    let key = set.key(slot).clone();
    set.set_visible(core::slice::from_ref(&key));
    snapshot
}

/// Ends the hover-preview in flight, restoring its snapshot.
///
/// Returns the restore that was applied: `Some(None)` means every layer was
/// hidden because nothing was visible when the preview began. Returns `None`
/// and leaves the set untouched when no preview is in flight, which includes
/// the leave that follows a locked commit.
pub fn end_preview(set: &mut LayerSet, state: &mut PreviewState) -> Option<Option<LayerKey>> {
    match core::mem::take(state) {
        PreviewState::Previewing { snapshot } => {
            let targets: Vec<LayerKey> = snapshot.iter().cloned().collect();
            set.set_visible(&targets);
            Some(snapshot)
        }
        PreviewState::Idle | PreviewState::Committed { .. } => None,
    }
}

/// Commits `slot` as the selection and returns the key to notify.
///
/// Performs the same snapshot-and-toggle as [`begin_preview`]; `policy`
/// decides what happens to that snapshot:
///
/// - [`SnapshotPolicy::LockOnCommit`]: the state becomes
///   [`PreviewState::Committed`] and the next [`end_preview`] is a no-op.
/// - [`SnapshotPolicy::RevertOnLeave`]: the snapshot is retaken from the
///   current visibility (replacing any hover snapshot) and the next
///   [`end_preview`] restores it.
pub fn commit_selection(
    set: &mut LayerSet,
    state: &mut PreviewState,
    slot: LayerSlot,
    policy: SnapshotPolicy,
) -> LayerKey {
    let key = set.key(slot).clone();
    let snapshot = current_snapshot(set);
    *state = match policy {
        SnapshotPolicy::LockOnCommit => PreviewState::Committed { key: key.clone() },
        SnapshotPolicy::RevertOnLeave => PreviewState::Previewing { snapshot },
    };
    set.set_visible(core::slice::from_ref(&key));
    key
}

fn current_snapshot(set: &LayerSet) -> Option<LayerKey> {
    set.first_visible().map(|slot| set.key(slot).clone())
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn two_layers() -> LayerSet {
        let mut set = LayerSet::new();
        set.push_layer("1", true);
        set.push_layer("2", false);
        set
    }

    fn flags(set: &LayerSet) -> Vec<bool> {
        set.top_level().map(|s| set.is_visible(s)).collect()
    }

    #[test]
    fn resolve_requires_an_identifier() {
        let set = two_layers();
        assert_eq!(resolve_layer(&set, None), None);
        assert_eq!(resolve_layer(&set, Some("9")), None);
        assert_eq!(resolve_layer(&set, Some("2")), set.find("2"));
    }

    #[test]
    fn hover_then_leave_round_trips() {
        let mut set = two_layers();
        let mut state = PreviewState::Idle;
        let two = set.find("2").unwrap();

        let snap = begin_preview(&mut set, &mut state, two);
        assert_eq!(snap, Some(LayerKey::new("1")));
        assert_eq!(flags(&set), vec![false, true]);

        let restored = end_preview(&mut set, &mut state);
        assert_eq!(restored, Some(Some(LayerKey::new("1"))));
        assert_eq!(flags(&set), vec![true, false]);
        assert_eq!(state, PreviewState::Idle);
    }

    #[test]
    fn restore_to_nothing_hides_all() {
        let mut set = LayerSet::new();
        set.push_layer("1", false);
        let b = set.push_layer("2", false);
        let mut state = PreviewState::Idle;

        assert_eq!(begin_preview(&mut set, &mut state, b), None);
        assert_eq!(end_preview(&mut set, &mut state), Some(None));
        assert_eq!(flags(&set), vec![false, false]);
    }

    #[test]
    fn nested_enter_keeps_first_snapshot() {
        let mut set = LayerSet::new();
        set.push_layer("1", true);
        let b = set.push_layer("2", false);
        let c = set.push_layer("3", false);
        let mut state = PreviewState::Idle;

        begin_preview(&mut set, &mut state, b);
        begin_preview(&mut set, &mut state, c);
        assert_eq!(flags(&set), vec![false, false, true]);
        end_preview(&mut set, &mut state);
        assert_eq!(flags(&set), vec![true, false, false]);
    }

    #[test]
    fn leave_without_preview_is_a_no_op() {
        let mut set = two_layers();
        let mut state = PreviewState::Idle;
        assert_eq!(end_preview(&mut set, &mut state), None);
        assert_eq!(flags(&set), vec![true, false]);
    }

    #[test]
    fn locked_commit_survives_leave() {
        let mut set = two_layers();
        let mut state = PreviewState::Idle;
        let two = set.find("2").unwrap();

        begin_preview(&mut set, &mut state, two);
        let key = commit_selection(&mut set, &mut state, two, SnapshotPolicy::LockOnCommit);
        assert_eq!(key, LayerKey::new("2"));
        assert_eq!(state.pending_restore(), None);

        assert_eq!(end_preview(&mut set, &mut state), None);
        assert_eq!(flags(&set), vec![false, true]);
        assert_eq!(state, PreviewState::Idle);
    }

    #[test]
    fn revert_policy_restores_commit_time_snapshot() {
        let mut set = two_layers();
        let mut state = PreviewState::Idle;
        let two = set.find("2").unwrap();

        // Click with no preceding hover: snapshot is "1".
        commit_selection(&mut set, &mut state, two, SnapshotPolicy::RevertOnLeave);
        assert_eq!(flags(&set), vec![false, true]);
        assert_eq!(
            state.pending_restore(),
            Some(Some(&LayerKey::new("1")))
        );
        end_preview(&mut set, &mut state);
        assert_eq!(flags(&set), vec![true, false], "leave undoes the commit");
    }

    #[test]
    fn revert_policy_after_hover_keeps_selection() {
        let mut set = two_layers();
        let mut state = PreviewState::Idle;
        let two = set.find("2").unwrap();

        begin_preview(&mut set, &mut state, two);
        commit_selection(&mut set, &mut state, two, SnapshotPolicy::RevertOnLeave);
        end_preview(&mut set, &mut state);
        assert_eq!(
            flags(&set),
            vec![false, true],
            "commit-time snapshot is the hovered layer itself"
        );
    }
}
