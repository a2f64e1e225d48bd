// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic simulated map and scripted sessions for carousel tests and
//! demos.
//!
//! - [`SimulatedMap`] implements [`MapAdapter`](carousel_core::adapter::MapAdapter)
//!   in memory and counts what is written to it.
//! - [`ManualClock`] produces host times in microseconds and only moves when
//!   advanced.
//! - [`Session`] wires a [`LayerCarousel`](carousel_core::controller::LayerCarousel)
//!   to both and offers gesture-level steps (`hover`, `leave`, `click` with a
//!   hold time, `pan`), recording selection callbacks and re-renders.

#![no_std]

extern crate alloc;

mod map;
mod session;

#[cfg(test)]
mod scenarios;

pub use map::SimulatedMap;
pub use session::{ManualClock, Session};
