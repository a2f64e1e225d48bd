// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Map adapter contract.
//!
//! The carousel never talks to a map library directly. The embedding code
//! implements [`MapAdapter`] for its map and provides:
//!
//! - **Enumeration**: building a [`LayerSet`] from the map's layers. This is
//!   done once up front with [`LayerSet::push_layer`] and friends and is not
//!   part of the trait, because group discovery differs between map
//!   libraries.
//! - **Visibility writes**: [`MapAdapter::apply`] receives the transitions
//!   produced by [`LayerSet::evaluate`].
//! - **View geometry**: [`MapAdapter::view`] reports the viewport size,
//!   visible extent and projection used for thumbnails.
//! - **Move notifications**: [`MapAdapter::view_revision`] is polled; a
//!   changed value means the view moved. [`ViewWatcher`] turns that into
//!   [`CarouselEvent::MapMoved`](crate::controller::CarouselEvent::MapMoved).
//!
//! # Sync loop pseudocode
//!
//! ```rust,ignore
//! fn on_pointer_event(event: CarouselEvent) {
//!     let reaction = carousel.handle(event, now(), &mut tracer);
//!     carousel.sync(&mut map, now(), &mut tracer);
//!     if let Some(key) = reaction.selected {
//!         on_layer_selected(&key);
//!     }
//!     if reaction.rerender {
//!         render_slides(&carousel.thumbnails(&map.view()));
//!     }
//! }
//! ```

use crate::carousel::MapView;
use crate::layer::{LayerSet, VisibilityChanges};

/// The map side of the carousel.
pub trait MapAdapter {
    /// Writes the visibility transitions in `changes` to the map, reading
    /// keys and flags from `set` as needed.
    fn apply(&mut self, set: &LayerSet, changes: &VisibilityChanges);

    /// Returns the current view geometry.
    fn view(&self) -> MapView;

    /// Returns a counter that changes whenever the view changes.
    fn view_revision(&self) -> u64;
}

/// Detects view changes by polling [`MapAdapter::view_revision`].
///
/// Holds nothing but the last revision seen; it never touches preview or
/// gesture state.
#[derive(Clone, Copy, Debug, Default)]
pub struct ViewWatcher {
    seen: Option<u64>,
}

impl ViewWatcher {
    /// Creates a watcher that reports the first poll as a change.
    #[must_use]
    pub const fn new() -> Self {
        Self { seen: None }
    }

    /// Creates a watcher that considers `adapter`'s current revision seen.
    #[must_use]
    pub fn primed(adapter: &dyn MapAdapter) -> Self {
        Self {
            seen: Some(adapter.view_revision()),
        }
    }

    /// Returns `true` if the view changed since the last poll.
    pub fn poll(&mut self, adapter: &dyn MapAdapter) -> bool {
        let current = adapter.view_revision();
        let changed = self.seen != Some(current);
        self.seen = Some(current);
        changed
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Size};

    use super::*;
    use crate::carousel::ProjectionCode;

    struct StubMap {
        revision: u64,
    }

    impl MapAdapter for StubMap {
        fn apply(&mut self, _set: &LayerSet, _changes: &VisibilityChanges) {}

        fn view(&self) -> MapView {
            MapView {
                size: Size::new(1.0, 1.0),
                extent: Rect::new(0.0, 0.0, 1.0, 1.0),
                projection: ProjectionCode::new("EPSG:4326"),
            }
        }

        fn view_revision(&self) -> u64 {
            self.revision
        }
    }

    #[test]
    fn watcher_reports_each_change_once() {
        let mut map = StubMap { revision: 3 };
        let mut watcher = ViewWatcher::new();
        assert!(watcher.poll(&map), "first poll is a change");
        assert!(!watcher.poll(&map));
        map.revision = 4;
        assert!(watcher.poll(&map));
        assert!(!watcher.poll(&map));
    }

    #[test]
    fn primed_watcher_starts_quiet() {
        let map = StubMap { revision: 9 };
        let mut watcher = ViewWatcher::primed(&map);
        assert!(!watcher.poll(&map));
    }
}
