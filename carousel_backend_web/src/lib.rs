// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for the base-layer carousel.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`now`] / [`timebase`]: `performance.now()` host time in microseconds
//! - [`layer_key_from_event`]: reads a thumbnail's layer key off a DOM event
//! - [`SlidePresenter`]: thumbnail slide elements
//! - [`CarouselBinding`]: DOM listeners forwarding pointer events to a
//!   [`LayerCarousel`](carousel_core::controller::LayerCarousel)

#![no_std]

extern crate alloc;

mod bind;
mod presenter;

pub use bind::CarouselBinding;
pub use presenter::SlidePresenter;

use carousel_core::carousel::IDENTIFIER_ATTRIBUTE;
use carousel_core::layer::LayerKey;
use carousel_core::time::{HostTime, Timebase};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event};

// Direct global binding instead of `web_sys::Window` methods; avoids
// fetching (and unwrapping) the Window/Performance objects on every event.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    fn performance_now() -> f64;
}

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks. Use [`timebase`] to
/// convert to nanoseconds.
#[must_use]
pub fn now() -> HostTime {
    let ms = performance_now();
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "performance.now() returns small positive f64; µs fits in u64"
    )]
    let us = (ms * 1000.0) as u64;
    HostTime(us)
}

/// Returns the web [`Timebase`]: 1 tick = 1 µs = 1000 ns.
#[must_use]
pub fn timebase() -> Timebase {
    Timebase::MICROS
}

/// Returns the layer key carried by the slide an event happened in.
///
/// Walks up from the event target to the nearest element with the
/// [`IDENTIFIER_ATTRIBUTE`], so clicks on a thumbnail's inner image still
/// resolve. Returns `None` outside any slide.
#[must_use]
pub fn layer_key_from_event(event: &Event) -> Option<LayerKey> {
    let target: Element = event.target()?.dyn_into().ok()?;
    let slide = target.closest(&identifier_selector()).ok()??;
    slide.get_attribute(IDENTIFIER_ATTRIBUTE).map(LayerKey::from)
}

/// Returns whether the event target is a slide element itself.
///
/// `mouseenter`/`mouseleave` fire once per entered element; only the slide's
/// own events count.
pub(crate) fn is_slide_event(event: &Event) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .is_some_and(|el| el.has_attribute(IDENTIFIER_ATTRIBUTE))
}

fn identifier_selector() -> alloc::string::String {
    alloc::format!("[{IDENTIFIER_ATTRIBUTE}]")
}
