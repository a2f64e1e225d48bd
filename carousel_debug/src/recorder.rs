// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as tagged little-endian records. Layer keys are written as a
//! `u32` byte length followed by UTF-8. [`decode`] reads the records back as
//! an iterator of [`RecordedEvent`].
//!
//! [`on_visibility_changes`](TraceSink::on_visibility_changes) stores only
//! the shown and hidden counts.

use carousel_core::config::SnapshotPolicy;
use carousel_core::layer::LayerKey;
use carousel_core::time::{Duration, HostTime};
use carousel_core::trace::{
    ClickSuppressedEvent, CommitEvent, ContainerSelectEvent, MapMovedEvent, PressEvent,
    PreviewBeginEvent, PreviewEndEvent, ReleaseEvent, TraceSink, UnresolvedTargetEvent,
    VisibilityChange,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_PRESS: u8 = 1;
const TAG_RELEASE: u8 = 2;
const TAG_CLICK_SUPPRESSED: u8 = 3;
const TAG_UNRESOLVED_TARGET: u8 = 4;
const TAG_PREVIEW_BEGIN: u8 = 5;
const TAG_PREVIEW_END: u8 = 6;
const TAG_COMMIT: u8 = 7;
const TAG_CONTAINER_SELECT: u8 = 8;
const TAG_MAP_MOVED: u8 = 9;
const TAG_VISIBILITY_COUNTS: u8 = 10;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_option_u64(&mut self, v: Option<u64>) {
        match v {
            Some(val) => {
                self.write_u8(1);
                self.write_u64(val);
            }
            None => {
                self.write_u8(0);
                self.write_u64(0);
            }
        }
    }

    fn write_count(&mut self, n: usize) {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "counts capped at u32::MAX for recording"
        )]
        self.write_u32(n.min(u32::MAX as usize) as u32);
    }

    fn write_key(&mut self, key: &LayerKey) {
        let bytes = key.as_str().as_bytes();
        // Overlong keys are cut; the decoder then stops at this record.
        let len = bytes.len().min(u32::MAX as usize);
        self.write_count(len);
        self.buf.extend_from_slice(&bytes[..len]);
    }

    fn write_option_key(&mut self, key: Option<&LayerKey>) {
        match key {
            Some(k) => {
                self.write_u8(1);
                self.write_key(k);
            }
            None => self.write_u8(0),
        }
    }

    fn write_policy(&mut self, p: SnapshotPolicy) {
        self.write_u8(match p {
            SnapshotPolicy::LockOnCommit => 0,
            SnapshotPolicy::RevertOnLeave => 1,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_press(&mut self, e: &PressEvent) {
        self.write_u8(TAG_PRESS);
        self.write_u64(e.at.ticks());
    }

    fn on_release(&mut self, e: &ReleaseEvent) {
        self.write_u8(TAG_RELEASE);
        self.write_u64(e.at.ticks());
        self.write_u64(e.duration.ticks());
        self.write_u8(u8::from(e.drag));
    }

    fn on_click_suppressed(&mut self, e: &ClickSuppressedEvent) {
        self.write_u8(TAG_CLICK_SUPPRESSED);
        self.write_u64(e.at.ticks());
        self.write_option_u64(e.duration.map(Duration::ticks));
    }

    fn on_unresolved_target(&mut self, e: &UnresolvedTargetEvent) {
        self.write_u8(TAG_UNRESOLVED_TARGET);
        self.write_u64(e.at.ticks());
        self.write_option_key(e.key.as_ref());
    }

    fn on_preview_begin(&mut self, e: &PreviewBeginEvent) {
        self.write_u8(TAG_PREVIEW_BEGIN);
        self.write_u64(e.at.ticks());
        self.write_key(&e.key);
        self.write_option_key(e.snapshot.as_ref());
    }

    fn on_preview_end(&mut self, e: &PreviewEndEvent) {
        self.write_u8(TAG_PREVIEW_END);
        self.write_u64(e.at.ticks());
        self.write_option_key(e.restored.as_ref());
    }

    fn on_commit(&mut self, e: &CommitEvent) {
        self.write_u8(TAG_COMMIT);
        self.write_u64(e.at.ticks());
        self.write_key(&e.key);
        self.write_policy(e.policy);
    }

    fn on_container_select(&mut self, e: &ContainerSelectEvent) {
        self.write_u8(TAG_CONTAINER_SELECT);
        self.write_u64(e.at.ticks());
        self.write_key(&e.key);
    }

    fn on_map_moved(&mut self, e: &MapMovedEvent) {
        self.write_u8(TAG_MAP_MOVED);
        self.write_u64(e.at.ticks());
        self.write_u64(e.render_revision);
    }

    fn on_visibility_changes(&mut self, at: HostTime, changes: &[VisibilityChange]) {
        let shown = changes.iter().filter(|c| c.visible).count();
        self.write_u8(TAG_VISIBILITY_COUNTS);
        self.write_u64(at.ticks());
        self.write_count(shown);
        self.write_count(changes.len() - shown);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`PressEvent`].
    Press(PressEvent),
    /// A [`ReleaseEvent`].
    Release(ReleaseEvent),
    /// A [`ClickSuppressedEvent`].
    ClickSuppressed(ClickSuppressedEvent),
    /// An [`UnresolvedTargetEvent`].
    UnresolvedTarget(UnresolvedTargetEvent),
    /// A [`PreviewBeginEvent`].
    PreviewBegin(PreviewBeginEvent),
    /// A [`PreviewEndEvent`].
    PreviewEnd(PreviewEndEvent),
    /// A [`CommitEvent`].
    Commit(CommitEvent),
    /// A [`ContainerSelectEvent`].
    ContainerSelect(ContainerSelectEvent),
    /// A [`MapMovedEvent`].
    MapMoved(MapMovedEvent),
    /// Visibility transition counts for one sync.
    VisibilityCounts {
        /// Host time of the sync.
        at: HostTime,
        /// Layers made visible.
        shown: u32,
        /// Layers hidden.
        hidden: u32,
    },
}

impl RecordedEvent {
    /// Returns the host time the event was emitted at.
    #[must_use]
    pub fn at(&self) -> HostTime {
        match self {
            Self::Press(e) => e.at,
            Self::Release(e) => e.at,
            Self::ClickSuppressed(e) => e.at,
            Self::UnresolvedTarget(e) => e.at,
            Self::PreviewBegin(e) => e.at,
            Self::PreviewEnd(e) => e.at,
            Self::Commit(e) => e.at,
            Self::ContainerSelect(e) => e.at,
            Self::MapMoved(e) => e.at,
            Self::VisibilityCounts { at, .. } => *at,
        }
    }
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_bytes(&mut self, n: usize) -> Option<&[u8]> {
        if self.remaining() < n {
            return None;
        }
        let v = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Some(v)
    }

    fn read_u8(&mut self) -> Option<u8> {
        Some(self.read_bytes(1)?[0])
    }

    fn read_u32(&mut self) -> Option<u32> {
        Some(u32::from_le_bytes(self.read_bytes(4)?.try_into().ok()?))
    }

    fn read_u64(&mut self) -> Option<u64> {
        Some(u64::from_le_bytes(self.read_bytes(8)?.try_into().ok()?))
    }

    fn read_time(&mut self) -> Option<HostTime> {
        self.read_u64().map(HostTime)
    }

    fn read_option_u64(&mut self) -> Option<Option<u64>> {
        let present = self.read_u8()?;
        let val = self.read_u64()?;
        Some(if present != 0 { Some(val) } else { None })
    }

    fn read_key(&mut self) -> Option<LayerKey> {
        let len = usize::try_from(self.read_u32()?).ok()?;
        let bytes = self.read_bytes(len)?;
        core::str::from_utf8(bytes).ok().map(LayerKey::new)
    }

    fn read_option_key(&mut self) -> Option<Option<LayerKey>> {
        Some(match self.read_u8()? {
            0 => None,
            _ => Some(self.read_key()?),
        })
    }

    fn read_policy(&mut self) -> Option<SnapshotPolicy> {
        Some(match self.read_u8()? {
            0 => SnapshotPolicy::LockOnCommit,
            _ => SnapshotPolicy::RevertOnLeave,
        })
    }

    fn decode_release(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Release(ReleaseEvent {
            at: self.read_time()?,
            duration: Duration(self.read_u64()?),
            drag: self.read_u8()? != 0,
        }))
    }

    fn decode_click_suppressed(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ClickSuppressed(ClickSuppressedEvent {
            at: self.read_time()?,
            duration: self.read_option_u64()?.map(Duration),
        }))
    }

    fn decode_unresolved_target(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::UnresolvedTarget(UnresolvedTargetEvent {
            at: self.read_time()?,
            key: self.read_option_key()?,
        }))
    }

    fn decode_preview_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PreviewBegin(PreviewBeginEvent {
            at: self.read_time()?,
            key: self.read_key()?,
            snapshot: self.read_option_key()?,
        }))
    }

    fn decode_preview_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PreviewEnd(PreviewEndEvent {
            at: self.read_time()?,
            restored: self.read_option_key()?,
        }))
    }

    fn decode_commit(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Commit(CommitEvent {
            at: self.read_time()?,
            key: self.read_key()?,
            policy: self.read_policy()?,
        }))
    }

    fn decode_container_select(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ContainerSelect(ContainerSelectEvent {
            at: self.read_time()?,
            key: self.read_key()?,
        }))
    }

    fn decode_map_moved(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::MapMoved(MapMovedEvent {
            at: self.read_time()?,
            render_revision: self.read_u64()?,
        }))
    }

    fn decode_visibility_counts(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::VisibilityCounts {
            at: self.read_time()?,
            shown: self.read_u32()?,
            hidden: self.read_u32()?,
        })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_PRESS => Some(RecordedEvent::Press(PressEvent {
                at: self.read_time()?,
            })),
            TAG_RELEASE => self.decode_release(),
            TAG_CLICK_SUPPRESSED => self.decode_click_suppressed(),
            TAG_UNRESOLVED_TARGET => self.decode_unresolved_target(),
            TAG_PREVIEW_BEGIN => self.decode_preview_begin(),
            TAG_PREVIEW_END => self.decode_preview_end(),
            TAG_COMMIT => self.decode_commit(),
            TAG_CONTAINER_SELECT => self.decode_container_select(),
            TAG_MAP_MOVED => self.decode_map_moved(),
            TAG_VISIBILITY_COUNTS => self.decode_visibility_counts(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_session_decodes_in_order() {
        let mut rec = RecorderSink::new();
        rec.on_preview_begin(&PreviewBeginEvent {
            at: HostTime(1_000),
            key: LayerKey::new("ortho"),
            snapshot: Some(LayerKey::new("osm")),
        });
        rec.on_preview_end(&PreviewEndEvent {
            at: HostTime(2_000),
            restored: None,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 2);
        match &events[0] {
            RecordedEvent::PreviewBegin(e) => {
                assert_eq!(e.at, HostTime(1_000));
                assert_eq!(e.key, "ortho");
                assert_eq!(e.snapshot, Some(LayerKey::new("osm")));
            }
            other => panic!("expected PreviewBegin, got {other:?}"),
        }
        match &events[1] {
            RecordedEvent::PreviewEnd(e) => {
                assert_eq!(e.at, HostTime(2_000));
                assert_eq!(e.restored, None);
            }
            other => panic!("expected PreviewEnd, got {other:?}"),
        }
    }

    #[test]
    fn commit_keeps_policy_and_unicode_key() {
        let mut rec = RecorderSink::new();
        rec.on_commit(&CommitEvent {
            at: HostTime(7),
            key: LayerKey::new("Orthofoto München"),
            policy: SnapshotPolicy::RevertOnLeave,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        match &events[..] {
            [RecordedEvent::Commit(e)] => {
                assert_eq!(e.key, "Orthofoto München");
                assert_eq!(e.policy, SnapshotPolicy::RevertOnLeave);
            }
            other => panic!("expected one Commit, got {other:?}"),
        }
    }

    #[test]
    fn gesture_events_keep_durations() {
        let mut rec = RecorderSink::new();
        rec.on_press(&PressEvent { at: HostTime(10) });
        rec.on_release(&ReleaseEvent {
            at: HostTime(300),
            duration: Duration(290),
            drag: true,
        });
        rec.on_click_suppressed(&ClickSuppressedEvent {
            at: HostTime(300),
            duration: Some(Duration(290)),
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], RecordedEvent::Press(PressEvent { at: HostTime(10) })));
        match &events[1] {
            RecordedEvent::Release(e) => {
                assert_eq!(e.duration, Duration(290));
                assert!(e.drag);
            }
            other => panic!("expected Release, got {other:?}"),
        }
        match &events[2] {
            RecordedEvent::ClickSuppressed(e) => assert_eq!(e.duration, Some(Duration(290))),
            other => panic!("expected ClickSuppressed, got {other:?}"),
        }
    }

    #[test]
    fn visibility_changes_store_counts() {
        let mut rec = RecorderSink::new();
        rec.on_visibility_changes(
            HostTime(42),
            &[
                VisibilityChange {
                    layer_index: 0,
                    visible: false,
                },
                VisibilityChange {
                    layer_index: 1,
                    visible: true,
                },
                VisibilityChange {
                    layer_index: 2,
                    visible: true,
                },
            ],
        );

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        match &events[..] {
            [RecordedEvent::VisibilityCounts { at, shown, hidden }] => {
                assert_eq!(*at, HostTime(42));
                assert_eq!((*shown, *hidden), (2, 1));
            }
            other => panic!("expected VisibilityCounts, got {other:?}"),
        }
    }

    #[test]
    fn truncated_record_stops_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_map_moved(&MapMovedEvent {
            at: HostTime(1),
            render_revision: 3,
        });
        rec.on_container_select(&ContainerSelectEvent {
            at: HostTime(2),
            key: LayerKey::new("osm"),
        });
        let bytes = rec.into_bytes();
        let cut = &bytes[..bytes.len() - 1];

        let events: Vec<_> = decode(cut).collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].at(), HostTime(1));
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        let events: Vec<_> = decode(&[]).collect();
        assert!(events.is_empty());
    }
}
