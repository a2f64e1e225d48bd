// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory map that records what the carousel writes to it.

use alloc::vec::Vec;

use kurbo::{Rect, Size, Vec2};

use carousel_core::adapter::MapAdapter;
use carousel_core::carousel::{MapView, ProjectionCode};
use carousel_core::layer::{LayerKey, LayerSet, LayerSlot, VisibilityChanges};

/// A map with no rendering: visibility flags per slot, a view, and counters.
///
/// Flags are only ever changed through [`MapAdapter::apply`], so they show
/// exactly what a real map would display after each sync.
#[derive(Clone, Debug)]
pub struct SimulatedMap {
    flags: Vec<bool>,
    size: Size,
    extent: Rect,
    projection: ProjectionCode,
    revision: u64,
    applies: u64,
    writes: u64,
}

impl Default for SimulatedMap {
    fn default() -> Self {
        Self::new(
            Size::new(800.0, 600.0),
            Rect::new(-20_037_508.34, -15_028_131.26, 20_037_508.34, 15_028_131.26),
            ProjectionCode::new("EPSG:3857"),
        )
    }
}

impl SimulatedMap {
    /// Creates a map with no layers and the given view.
    #[must_use]
    pub fn new(size: Size, extent: Rect, projection: ProjectionCode) -> Self {
        Self {
            flags: Vec::new(),
            size,
            extent,
            projection,
            revision: 0,
            applies: 0,
            writes: 0,
        }
    }

    /// Returns the map's flag for `slot`, `false` if the map has never heard
    /// of it.
    #[must_use]
    pub fn is_visible(&self, slot: LayerSlot) -> bool {
        self.flags
            .get(slot.index() as usize)
            .copied()
            .unwrap_or(false)
    }

    /// Returns the keys of every layer the map shows, members included, in
    /// slot order.
    #[must_use]
    pub fn visible_keys(&self, set: &LayerSet) -> Vec<LayerKey> {
        (0_u32..)
            .zip(&self.flags)
            .filter(|&(_, &on)| on)
            .map(|(idx, _)| set.key_at(idx).clone())
            .collect()
    }

    /// Number of layers the map knows about.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.flags.len()
    }

    /// Shifts the visible extent by `offset` map units.
    pub fn pan(&mut self, offset: Vec2) {
        self.extent = self.extent + offset;
        self.revision += 1;
    }

    /// Zooms around the extent's center; `factor > 1` zooms in.
    ///
    /// # Panics
    ///
    /// Panics if `factor` is not strictly positive.
    pub fn zoom(&mut self, factor: f64) {
        assert!(factor > 0.0, "zoom factor must be positive, got {factor}");
        self.extent = Rect::from_center_size(self.extent.center(), self.extent.size() / factor);
        self.revision += 1;
    }

    /// Changes the viewport size.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
        self.revision += 1;
    }

    /// Number of [`MapAdapter::apply`] calls so far.
    #[must_use]
    pub fn apply_count(&self) -> u64 {
        self.applies
    }

    /// Number of individual flag writes so far.
    #[must_use]
    pub fn write_count(&self) -> u64 {
        self.writes
    }

    fn write(&mut self, idx: u32, visible: bool) {
        let idx = idx as usize;
        if idx >= self.flags.len() {
            self.flags.resize(idx + 1, false);
        }
        self.flags[idx] = visible;
        self.writes += 1;
    }
}

impl MapAdapter for SimulatedMap {
    fn apply(&mut self, set: &LayerSet, changes: &VisibilityChanges) {
        self.applies += 1;
        for &idx in &changes.added {
            self.write(idx, set.is_visible_at(idx));
        }
        for &idx in &changes.shown {
            self.write(idx, true);
        }
        for &idx in &changes.hidden {
            self.write(idx, false);
        }
    }

    fn view(&self) -> MapView {
        MapView {
            size: self.size,
            extent: self.extent,
            projection: self.projection.clone(),
        }
    }

    fn view_revision(&self) -> u64 {
        self.revision
    }
}
