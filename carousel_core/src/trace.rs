// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for carousel interactions.
//!
//! This module provides a [`TraceSink`] trait with one method per interaction
//! event. All method bodies default to no-ops, so implementing only the events
//! you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`): gates [`VisibilityChange`] events and
//!   the corresponding `TraceSink` method.

use crate::config::SnapshotPolicy;
use crate::layer::LayerKey;
use crate::time::{Duration, HostTime};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a press starts on the carousel container.
#[derive(Clone, Copy, Debug)]
pub struct PressEvent {
    /// Host time of the press.
    pub at: HostTime,
}

/// Emitted when a press ends on the carousel container.
#[derive(Clone, Copy, Debug)]
pub struct ReleaseEvent {
    /// Host time of the release.
    pub at: HostTime,
    /// How long the press was held.
    pub duration: Duration,
    /// Whether the press classifies as a drag.
    pub drag: bool,
}

/// Emitted when a click is ignored because the gesture was a drag.
#[derive(Clone, Debug)]
pub struct ClickSuppressedEvent {
    /// Host time of the click.
    pub at: HostTime,
    /// Length of the press that made it a drag, if the press completed.
    pub duration: Option<Duration>,
}

/// Emitted when a thumbnail event carries no key, or a key the set does not
/// contain.
#[derive(Clone, Debug)]
pub struct UnresolvedTargetEvent {
    /// Host time of the event.
    pub at: HostTime,
    /// The key the event carried, if any.
    pub key: Option<LayerKey>,
}

/// Emitted when a hover-preview starts.
#[derive(Clone, Debug)]
pub struct PreviewBeginEvent {
    /// Host time of the pointer-enter.
    pub at: HostTime,
    /// The layer being previewed.
    pub key: LayerKey,
    /// The layer that will be restored on leave (`None`: hide all).
    pub snapshot: Option<LayerKey>,
}

/// Emitted when a hover-preview ends and its snapshot is restored.
#[derive(Clone, Debug)]
pub struct PreviewEndEvent {
    /// Host time of the pointer-leave.
    pub at: HostTime,
    /// The layer made visible again (`None`: every layer hidden).
    pub restored: Option<LayerKey>,
}

/// Emitted when a thumbnail click commits a selection.
#[derive(Clone, Debug)]
pub struct CommitEvent {
    /// Host time of the click.
    pub at: HostTime,
    /// The committed layer.
    pub key: LayerKey,
    /// The snapshot policy in effect.
    pub policy: SnapshotPolicy,
}

/// Emitted when a container-level click selects a layer directly.
#[derive(Clone, Debug)]
pub struct ContainerSelectEvent {
    /// Host time of the click.
    pub at: HostTime,
    /// The selected layer.
    pub key: LayerKey,
}

/// Emitted when the map view changed and thumbnails must be re-rendered.
#[derive(Clone, Copy, Debug)]
pub struct MapMovedEvent {
    /// Host time the move was observed.
    pub at: HostTime,
    /// The render revision after the bump.
    pub render_revision: u64,
}

/// A single visibility transition pushed to the map.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilityChange {
    /// Raw slot index of the layer.
    pub layer_index: u32,
    /// The new flag value.
    pub visible: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the carousel.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a press starts.
    fn on_press(&mut self, e: &PressEvent) {
        _ = e;
    }

    /// Called when a press ends.
    fn on_release(&mut self, e: &ReleaseEvent) {
        _ = e;
    }

    /// Called when a click is dropped as a drag.
    fn on_click_suppressed(&mut self, e: &ClickSuppressedEvent) {
        _ = e;
    }

    /// Called when a thumbnail event cannot be resolved to a layer.
    fn on_unresolved_target(&mut self, e: &UnresolvedTargetEvent) {
        _ = e;
    }

    /// Called when a hover-preview starts.
    fn on_preview_begin(&mut self, e: &PreviewBeginEvent) {
        _ = e;
    }

    /// Called when a hover-preview is restored.
    fn on_preview_end(&mut self, e: &PreviewEndEvent) {
        _ = e;
    }

    /// Called when a thumbnail click commits a selection.
    fn on_commit(&mut self, e: &CommitEvent) {
        _ = e;
    }

    /// Called when a container-level click selects a layer.
    fn on_container_select(&mut self, e: &ContainerSelectEvent) {
        _ = e;
    }

    /// Called when the map moved.
    fn on_map_moved(&mut self, e: &MapMovedEvent) {
        _ = e;
    }

    /// Called with the visibility transitions of one sync (requires
    /// `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_visibility_changes(&mut self, at: HostTime, changes: &[VisibilityChange]) {
        _ = (at, changes);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

/// Generates a `Tracer` method that forwards one event type to the sink.
macro_rules! forward {
    ($(#[$doc:meta])* $name:ident => $hook:ident($ty:ty)) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self, e: &$ty) {
            #[cfg(feature = "trace")]
            if let Some(s) = &mut self.sink {
                s.$hook(e);
            }
            #[cfg(not(feature = "trace"))]
            {
                _ = e;
            }
        }
    };
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    forward!(
        /// Emits a [`PressEvent`].
        press => on_press(PressEvent)
    );
    forward!(
        /// Emits a [`ReleaseEvent`].
        release => on_release(ReleaseEvent)
    );
    forward!(
        /// Emits a [`ClickSuppressedEvent`].
        click_suppressed => on_click_suppressed(ClickSuppressedEvent)
    );
    forward!(
        /// Emits an [`UnresolvedTargetEvent`].
        unresolved_target => on_unresolved_target(UnresolvedTargetEvent)
    );
    forward!(
        /// Emits a [`PreviewBeginEvent`].
        preview_begin => on_preview_begin(PreviewBeginEvent)
    );
    forward!(
        /// Emits a [`PreviewEndEvent`].
        preview_end => on_preview_end(PreviewEndEvent)
    );
    forward!(
        /// Emits a [`CommitEvent`].
        commit => on_commit(CommitEvent)
    );
    forward!(
        /// Emits a [`ContainerSelectEvent`].
        container_select => on_container_select(ContainerSelectEvent)
    );
    forward!(
        /// Emits a [`MapMovedEvent`].
        map_moved => on_map_moved(MapMovedEvent)
    );

    /// Emits visibility transitions (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn visibility_changes(&mut self, at: HostTime, changes: &[VisibilityChange]) {
        if let Some(s) = &mut self.sink {
            s.on_visibility_changes(at, changes);
        }
    }

    /// Returns whether events are delivered anywhere.
    ///
    /// Lets callers skip building payloads nobody will see.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        #[cfg(feature = "trace")]
        {
            self.sink.is_some()
        }
        #[cfg(not(feature = "trace"))]
        {
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
