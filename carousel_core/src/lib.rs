// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection and preview state for a base-layer carousel.
//!
//! `carousel_core` decides which of a small set of map base layers is visible
//! while a user browses thumbnails of them. It is `no_std` compatible (with
//! `alloc`) and has no opinion on how thumbnails or the map are drawn: pointer
//! events come in, visibility changes and selection notifications go out.
//!
//! # Architecture
//!
//! ```text
//!   pointer / map events
//!       │
//!       ▼
//!   LayerCarousel::handle() ──► Reaction { selected, rerender }
//!       │
//!       │  (GestureClassifier, PreviewState, LayerSet mutations)
//!       ▼
//!   LayerSet::evaluate() ──► VisibilityChanges ──► MapAdapter::apply()
//! ```
//!
//! **[`layer`]**: Struct-of-arrays layer set keyed by opaque [`LayerKey`]s.
//! Visibility writes expand groups to their children and are recorded in a
//! dirty channel so adapters only touch layers that actually changed.
//!
//! **[`gesture`]**: Press/release timing that tells a click from a drag.
//!
//! **[`preview`]**: Hover snapshot/restore and click-commit, as explicit
//! state plus free functions.
//!
//! **[`controller`]**: [`LayerCarousel`](controller::LayerCarousel), which
//! composes the pieces above behind a single event entry point.
//!
//! **[`carousel`]**: Slider settings and per-thumbnail render inputs.
//!
//! **[`adapter`]**: The [`MapAdapter`](adapter::MapAdapter) trait the
//! embedding map implements.
//!
//! **[`config`]**: [`CarouselConfig`](config::CarouselConfig) presets.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) hooks with a
//! zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! **[`time`]**: Monotonic host time, durations and timebases.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-layer
//!   visibility change events.
//!
//! [`LayerKey`]: layer::LayerKey

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod adapter;
pub mod carousel;
pub mod config;
pub mod controller;
pub mod dirty;
pub mod gesture;
pub mod layer;
pub mod preview;
pub mod time;
pub mod trace;
