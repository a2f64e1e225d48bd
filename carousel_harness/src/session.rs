// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted pointer sessions against a [`SimulatedMap`].

use alloc::vec::Vec;

use kurbo::Vec2;

use carousel_core::adapter::{MapAdapter, ViewWatcher};
use carousel_core::carousel::ThumbnailView;
use carousel_core::config::CarouselConfig;
use carousel_core::controller::{CarouselEvent, LayerCarousel, Reaction};
use carousel_core::layer::{LayerKey, LayerSet, LayerSlot};
use carousel_core::time::{Duration, HostTime, Timebase};
use carousel_core::trace::Tracer;

use crate::map::SimulatedMap;

/// A clock that only moves when told to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ManualClock {
    now: HostTime,
}

impl Default for ManualClock {
    /// Starts one second in, so an unpaired release reads as a long press.
    fn default() -> Self {
        Self::new(HostTime(1_000_000))
    }
}

impl ManualClock {
    /// Ticks are microseconds, like the browser backend's.
    pub const TIMEBASE: Timebase = Timebase::MICROS;

    /// Creates a clock reading `start`.
    #[must_use]
    pub const fn new(start: HostTime) -> Self {
        Self { now: start }
    }

    /// Returns the current reading.
    #[must_use]
    pub const fn now(&self) -> HostTime {
        self.now
    }

    /// Moves the clock forward.
    pub fn advance(&mut self, by: Duration) {
        self.now = self.now.saturating_add(by);
    }

    /// Moves the clock forward by whole milliseconds.
    pub fn advance_ms(&mut self, ms: u64) {
        self.advance(Duration::from_millis(ms, Self::TIMEBASE));
    }
}

/// A carousel wired to a simulated map, driven by scripted gestures.
///
/// Every step dispatches one event at the clock's current time, syncs the
/// map, and records the selection callbacks and re-renders the embedding code
/// would have performed.
#[derive(Debug)]
pub struct Session {
    carousel: LayerCarousel,
    map: SimulatedMap,
    clock: ManualClock,
    watcher: ViewWatcher,
    selections: Vec<LayerKey>,
    rerenders: u32,
}

impl Session {
    /// Creates a session over `layers` with a default map and clock.
    ///
    /// The map is synced once so it starts out showing the layers' initial
    /// flags.
    #[must_use]
    pub fn new(layers: LayerSet, config: CarouselConfig) -> Self {
        Self::with_map(layers, config, SimulatedMap::default())
    }

    /// Like [`new`](Self::new), with a caller-provided map.
    #[must_use]
    pub fn with_map(layers: LayerSet, config: CarouselConfig, map: SimulatedMap) -> Self {
        let clock = ManualClock::default();
        let mut carousel = LayerCarousel::new(layers, ManualClock::TIMEBASE, config);
        let mut map = map;
        carousel.sync(&mut map, clock.now(), &mut Tracer::none());
        let watcher = ViewWatcher::primed(&map);
        Self {
            carousel,
            map,
            clock,
            watcher,
            selections: Vec::new(),
            rerenders: 0,
        }
    }

    /// Dispatches `event` now, then syncs the map.
    pub fn dispatch(&mut self, event: CarouselEvent, tracer: &mut Tracer<'_>) -> Reaction {
        let now = self.clock.now();
        let reaction = self.carousel.handle(event, now, tracer);
        self.carousel.sync(&mut self.map, now, tracer);
        if let Some(key) = &reaction.selected {
            self.selections.push(key.clone());
        }
        if reaction.rerender {
            self.rerenders += 1;
        }
        reaction
    }

    /// Pointer enters the thumbnail of `key`.
    pub fn hover(&mut self, key: &str, tracer: &mut Tracer<'_>) -> Reaction {
        self.dispatch(CarouselEvent::ThumbnailEnter(Some(LayerKey::new(key))), tracer)
    }

    /// Pointer leaves the current thumbnail.
    pub fn leave(&mut self, tracer: &mut Tracer<'_>) -> Reaction {
        self.dispatch(CarouselEvent::ThumbnailLeave, tracer)
    }

    /// Presses, holds for `hold_ms`, releases, then clicks the thumbnail of
    /// `key`.
    pub fn click(&mut self, key: &str, hold_ms: u64, tracer: &mut Tracer<'_>) -> Reaction {
        self.press_and_release(hold_ms, tracer);
        self.dispatch(
            CarouselEvent::ThumbnailClick(Some(LayerKey::new(key))),
            tracer,
        )
    }

    /// Presses, holds for `hold_ms`, releases, then clicks the container on
    /// behalf of `slot`.
    pub fn click_container(
        &mut self,
        slot: LayerSlot,
        hold_ms: u64,
        tracer: &mut Tracer<'_>,
    ) -> Reaction {
        self.press_and_release(hold_ms, tracer);
        self.dispatch(CarouselEvent::ContainerClick(slot), tracer)
    }

    /// Pans the map and forwards the move if the watcher sees one.
    pub fn pan(&mut self, offset: Vec2, tracer: &mut Tracer<'_>) -> Reaction {
        self.map.pan(offset);
        self.poll_view(tracer)
    }

    /// Polls the map for view changes and dispatches
    /// [`MapMoved`](CarouselEvent::MapMoved) on each one.
    pub fn poll_view(&mut self, tracer: &mut Tracer<'_>) -> Reaction {
        if self.watcher.poll(&self.map) {
            self.dispatch(CarouselEvent::MapMoved, tracer)
        } else {
            Reaction::default()
        }
    }

    /// Lets time pass without input.
    pub fn wait_ms(&mut self, ms: u64) {
        self.clock.advance_ms(ms);
    }

    /// Map flags of the offered layers, in carousel order.
    #[must_use]
    pub fn visible(&self) -> Vec<bool> {
        let layers = self.carousel.layers();
        layers
            .top_level()
            .map(|slot| self.map.is_visible(slot))
            .collect()
    }

    /// Keys of every layer the map shows, members included.
    #[must_use]
    pub fn visible_keys(&self) -> Vec<LayerKey> {
        self.map.visible_keys(self.carousel.layers())
    }

    /// Current thumbnail inputs.
    #[must_use]
    pub fn thumbnails(&self) -> Vec<ThumbnailView> {
        self.carousel.thumbnails(&self.map.view())
    }

    /// Selection callbacks fired so far.
    #[must_use]
    pub fn selections(&self) -> &[LayerKey] {
        &self.selections
    }

    /// Re-renders requested so far.
    #[must_use]
    pub fn rerenders(&self) -> u32 {
        self.rerenders
    }

    /// Returns the carousel.
    #[must_use]
    pub fn carousel(&self) -> &LayerCarousel {
        &self.carousel
    }

    /// Returns the map.
    #[must_use]
    pub fn map(&self) -> &SimulatedMap {
        &self.map
    }

    /// Returns the map for direct view changes; follow up with
    /// [`poll_view`](Self::poll_view).
    pub fn map_mut(&mut self) -> &mut SimulatedMap {
        &mut self.map
    }

    /// Returns the clock.
    #[must_use]
    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    fn press_and_release(&mut self, hold_ms: u64, tracer: &mut Tracer<'_>) {
        let _ = self.dispatch(CarouselEvent::PressStart, tracer);
        self.clock.advance_ms(hold_ms);
        let _ = self.dispatch(CarouselEvent::PressEnd, tracer);
    }
}
