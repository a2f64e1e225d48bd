// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The carousel controller.
//!
//! [`LayerCarousel`] owns the layer set, the gesture timer and the preview
//! state, and turns [`CarouselEvent`]s into state changes plus a
//! [`Reaction`]. Visibility writes stay in the layer set until
//! [`sync`](LayerCarousel::sync) pushes them to a [`MapAdapter`].
//!
//! Two selection paths coexist:
//!
//! - Thumbnail events ([`ThumbnailEnter`](CarouselEvent::ThumbnailEnter),
//!   [`ThumbnailLeave`](CarouselEvent::ThumbnailLeave),
//!   [`ThumbnailClick`](CarouselEvent::ThumbnailClick)) go through key
//!   resolution, hover snapshots and group expansion, and a click reports the
//!   selection.
//! - [`ContainerClick`](CarouselEvent::ContainerClick) takes a slot directly
//!   and shows only that layer, without snapshots, group expansion or a
//!   selection report.
//!
//! Both ignore clicks that end a drag.

use alloc::string::String;
use alloc::vec::Vec;

use crate::adapter::MapAdapter;
use crate::carousel::{self, CarouselSettings, MapView, ThumbnailView};
use crate::config::CarouselConfig;
use crate::gesture::GestureClassifier;
use crate::layer::{LayerKey, LayerSet, LayerSlot, VisibilityChanges};
use crate::preview::{self, PreviewState};
use crate::time::{HostTime, Timebase};
use crate::trace::{
    ClickSuppressedEvent, CommitEvent, ContainerSelectEvent, MapMovedEvent, PressEvent,
    PreviewBeginEvent, PreviewEndEvent, ReleaseEvent, Tracer, UnresolvedTargetEvent,
};

/// An input to [`LayerCarousel::handle`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CarouselEvent {
    /// Pointer pressed on the carousel container.
    PressStart,
    /// Pointer released on the carousel container.
    PressEnd,
    /// Pointer entered a thumbnail carrying the given key.
    ThumbnailEnter(Option<LayerKey>),
    /// Pointer left a thumbnail.
    ThumbnailLeave,
    /// A thumbnail carrying the given key was clicked.
    ThumbnailClick(Option<LayerKey>),
    /// The container was clicked on behalf of a specific layer.
    ContainerClick(LayerSlot),
    /// The map view changed.
    MapMoved,
}

/// What the embedding code should do after an event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct Reaction {
    /// Layer to report to the selection callback. Set at most once per
    /// committed thumbnail click.
    pub selected: Option<LayerKey>,
    /// Whether thumbnails should be re-rendered.
    pub rerender: bool,
}

impl Reaction {
    const NONE: Self = Self {
        selected: None,
        rerender: false,
    };
}

/// Base-layer carousel state.
#[derive(Debug)]
pub struct LayerCarousel {
    layers: LayerSet,
    gesture: GestureClassifier,
    preview: PreviewState,
    config: CarouselConfig,
    render_revision: u64,
    changes: VisibilityChanges,
}

impl LayerCarousel {
    /// Creates a carousel over `layers`.
    ///
    /// `timebase` describes the host times passed to [`handle`](Self::handle).
    #[must_use]
    pub fn new(layers: LayerSet, timebase: Timebase, config: CarouselConfig) -> Self {
        Self {
            layers,
            gesture: GestureClassifier::new(timebase),
            preview: PreviewState::Idle,
            config,
            render_revision: 0,
            changes: VisibilityChanges::default(),
        }
    }

    /// Returns the layer set.
    #[must_use]
    pub fn layers(&self) -> &LayerSet {
        &self.layers
    }

    /// Replaces the layer set, e.g. after the map's layer list changed.
    ///
    /// Any hover in flight is dropped without restoring; its snapshot refers
    /// to the old set.
    pub fn replace_layers(&mut self, layers: LayerSet) {
        self.layers = layers;
        self.preview = PreviewState::Idle;
        self.render_revision += 1;
    }

    /// Returns the hover state.
    #[must_use]
    pub fn preview_state(&self) -> &PreviewState {
        &self.preview
    }

    /// Returns the gesture timer.
    #[must_use]
    pub fn gesture(&self) -> &GestureClassifier {
        &self.gesture
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Returns a counter bumped whenever thumbnails need re-rendering.
    #[must_use]
    pub fn render_revision(&self) -> u64 {
        self.render_revision
    }

    /// Returns the slider settings for the current layer count.
    #[must_use]
    pub fn settings(&self) -> CarouselSettings {
        CarouselSettings::for_layer_count(self.layers.len()).with_lazy_load(self.config.lazy_load)
    }

    /// Returns the wrapper element's class attribute.
    #[must_use]
    pub fn wrapper_class_name(&self) -> String {
        carousel::wrapper_class_name(&self.config.class_name)
    }

    /// Builds the thumbnail inputs for the current view.
    #[must_use]
    pub fn thumbnails(&self, view: &MapView) -> Vec<ThumbnailView> {
        carousel::thumbnails(&self.layers, view)
    }

    /// Handles one event.
    pub fn handle(
        &mut self,
        event: CarouselEvent,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> Reaction {
        match event {
            CarouselEvent::PressStart => {
                self.gesture.press_start(now);
                tracer.press(&PressEvent { at: now });
                Reaction::NONE
            }
            CarouselEvent::PressEnd => {
                let duration = self.gesture.press_end(now);
                tracer.release(&ReleaseEvent {
                    at: now,
                    duration,
                    drag: self.gesture.is_drag(),
                });
                Reaction::NONE
            }
            CarouselEvent::ThumbnailEnter(key) => {
                let Some(slot) = self.resolve(key, now, tracer) else {
                    return Reaction::NONE;
                };
                let snapshot = preview::begin_preview(&mut self.layers, &mut self.preview, slot);
                tracer.preview_begin(&PreviewBeginEvent {
                    at: now,
                    key: self.layers.key(slot).clone(),
                    snapshot,
                });
                Reaction::NONE
            }
            CarouselEvent::ThumbnailLeave => {
                if let Some(restored) = preview::end_preview(&mut self.layers, &mut self.preview)
                {
                    tracer.preview_end(&PreviewEndEvent { at: now, restored });
                }
                Reaction::NONE
            }
            CarouselEvent::ThumbnailClick(key) => {
                if self.suppress_drag(now, tracer) {
                    return Reaction::NONE;
                }
                let Some(slot) = self.resolve(key, now, tracer) else {
                    return Reaction::NONE;
                };
                let policy = self.config.snapshot_policy;
                let key =
                    preview::commit_selection(&mut self.layers, &mut self.preview, slot, policy);
                tracer.commit(&CommitEvent {
                    at: now,
                    key: key.clone(),
                    policy,
                });
                Reaction {
                    selected: Some(key),
                    rerender: false,
                }
            }
            CarouselEvent::ContainerClick(slot) => {
                if self.suppress_drag(now, tracer) {
                    return Reaction::NONE;
                }
                self.layers.show_only(slot);
                self.render_revision += 1;
                tracer.container_select(&ContainerSelectEvent {
                    at: now,
                    key: self.layers.key(slot).clone(),
                });
                Reaction {
                    selected: None,
                    rerender: true,
                }
            }
            CarouselEvent::MapMoved => {
                self.render_revision += 1;
                tracer.map_moved(&MapMovedEvent {
                    at: now,
                    render_revision: self.render_revision,
                });
                Reaction {
                    selected: None,
                    rerender: true,
                }
            }
        }
    }

    /// Pushes pending visibility transitions to `adapter`.
    ///
    /// Returns `true` if anything was applied.
    pub fn sync(
        &mut self,
        adapter: &mut dyn MapAdapter,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        self.layers.evaluate_into(&mut self.changes);
        if self.changes.is_empty() {
            return false;
        }
        adapter.apply(&self.layers, &self.changes);

        #[cfg(feature = "trace-rich")]
        if tracer.is_active() {
            use crate::trace::VisibilityChange;
            let rich: Vec<VisibilityChange> = self
                .changes
                .shown
                .iter()
                .map(|&layer_index| VisibilityChange {
                    layer_index,
                    visible: true,
                })
                .chain(self.changes.hidden.iter().map(|&layer_index| VisibilityChange {
                    layer_index,
                    visible: false,
                }))
                .collect();
            tracer.visibility_changes(now, &rich);
        }
        #[cfg(not(feature = "trace-rich"))]
        {
            _ = (now, tracer);
        }
        true
    }

    fn resolve(
        &self,
        key: Option<LayerKey>,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> Option<LayerSlot> {
        let slot = preview::resolve_layer(&self.layers, key.as_ref().map(LayerKey::as_str));
        if slot.is_none() {
            tracer.unresolved_target(&UnresolvedTargetEvent { at: now, key });
        }
        slot
    }

    fn suppress_drag(&self, now: HostTime, tracer: &mut Tracer<'_>) -> bool {
        let drag = self.gesture.is_drag();
        if drag {
            tracer.click_suppressed(&ClickSuppressedEvent {
                at: now,
                duration: self.gesture.last_duration(),
            });
        }
        drag
    }
}
