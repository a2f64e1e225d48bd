// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM listeners that drive a [`LayerCarousel`].
//!
//! All listeners sit on the carousel wrapper, so slides can be re-rendered
//! freely:
//!
//! | DOM event              | carousel event                    |
//! |------------------------|-----------------------------------|
//! | `mousedown`            | `PressStart`                      |
//! | `mouseup`              | `PressEnd`                        |
//! | `mouseenter` (capture) | `ThumbnailEnter` (slides only)    |
//! | `mouseleave` (capture) | `ThumbnailLeave` (slides only)    |
//! | `click`                | `ThumbnailClick` (inside a slide) |
//!
//! `mouseenter`/`mouseleave` do not bubble, so they are caught in the capture
//! phase and filtered to slide elements.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use carousel_core::adapter::{MapAdapter, ViewWatcher};
use carousel_core::controller::{CarouselEvent, LayerCarousel};
use carousel_core::layer::{LayerKey, LayerSlot};
use carousel_core::trace::Tracer;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlElement};

type Listener = Closure<dyn FnMut(Event)>;

/// Forwards handled events to the carousel, syncs the map, and runs the
/// embedding callbacks with no borrows held.
struct Dispatch<M> {
    carousel: Rc<RefCell<LayerCarousel>>,
    map: Rc<RefCell<M>>,
    watcher: Cell<ViewWatcher>,
    on_selected: RefCell<Box<dyn FnMut(&LayerKey)>>,
    on_rerender: RefCell<Box<dyn FnMut()>>,
}

impl<M: MapAdapter> Dispatch<M> {
    fn dispatch(&self, event: CarouselEvent) {
        let reaction = {
            let mut carousel = self.carousel.borrow_mut();
            let mut map = self.map.borrow_mut();
            let mut tracer = Tracer::none();
            let now = crate::now();
            let reaction = carousel.handle(event, now, &mut tracer);
            carousel.sync(&mut *map, now, &mut tracer);
            reaction
        };
        if let Some(key) = &reaction.selected {
            (self.on_selected.borrow_mut())(key);
        }
        if reaction.rerender {
            (self.on_rerender.borrow_mut())();
        }
    }

    fn poll_view(&self) {
        let mut watcher = self.watcher.get();
        let moved = watcher.poll(&*self.map.borrow());
        self.watcher.set(watcher);
        if moved {
            self.dispatch(CarouselEvent::MapMoved);
        }
    }
}

/// Live DOM listeners for one carousel. Dropping it removes them.
pub struct CarouselBinding<M: MapAdapter + 'static> {
    target: EventTarget,
    listeners: Vec<(&'static str, bool, Listener)>,
    dispatch: Rc<Dispatch<M>>,
}

impl<M: MapAdapter + 'static> core::fmt::Debug for CarouselBinding<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CarouselBinding")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<M: MapAdapter + 'static> CarouselBinding<M> {
    /// Installs listeners on `wrapper`.
    ///
    /// `on_selected` receives the key of every committed thumbnail click.
    /// `on_rerender` runs whenever thumbnails need re-rendering; it may
    /// borrow `carousel` and `map`.
    pub fn bind(
        wrapper: &HtmlElement,
        carousel: Rc<RefCell<LayerCarousel>>,
        map: Rc<RefCell<M>>,
        on_selected: impl FnMut(&LayerKey) + 'static,
        on_rerender: impl FnMut() + 'static,
    ) -> Result<Self, JsValue> {
        let watcher = ViewWatcher::primed(&*map.borrow());
        let dispatch = Rc::new(Dispatch {
            carousel,
            map,
            watcher: Cell::new(watcher),
            on_selected: RefCell::new(Box::new(on_selected)),
            on_rerender: RefCell::new(Box::new(on_rerender)),
        });

        let mut binding = Self {
            target: wrapper.clone().into(),
            listeners: Vec::new(),
            dispatch,
        };
        binding.listen("mousedown", false, |_| Some(CarouselEvent::PressStart))?;
        binding.listen("mouseup", false, |_| Some(CarouselEvent::PressEnd))?;
        binding.listen("mouseenter", true, |e| {
            crate::is_slide_event(e)
                .then(|| CarouselEvent::ThumbnailEnter(crate::layer_key_from_event(e)))
        })?;
        binding.listen("mouseleave", true, |e| {
            crate::is_slide_event(e).then_some(CarouselEvent::ThumbnailLeave)
        })?;
        binding.listen("click", false, |e| {
            Some(CarouselEvent::ThumbnailClick(crate::layer_key_from_event(e)))
        })?;
        Ok(binding)
    }

    /// Selects `slot` through the container path (no hover bookkeeping, no
    /// selection callback).
    pub fn select(&self, slot: LayerSlot) {
        self.dispatch.dispatch(CarouselEvent::ContainerClick(slot));
    }

    /// Checks the map for view changes; call from the map's move listener.
    pub fn poll_view(&self) {
        self.dispatch.poll_view();
    }

    fn listen(
        &mut self,
        kind: &'static str,
        capture: bool,
        translate: impl Fn(&Event) -> Option<CarouselEvent> + 'static,
    ) -> Result<(), JsValue> {
        let dispatch = Rc::clone(&self.dispatch);
        let closure = Closure::wrap(Box::new(move |e: Event| {
            if let Some(event) = translate(&e) {
                dispatch.dispatch(event);
            }
        }) as Box<dyn FnMut(Event)>);
        self.target.add_event_listener_with_callback_and_bool(
            kind,
            closure.as_ref().unchecked_ref(),
            capture,
        )?;
        self.listeners.push((kind, capture, closure));
        Ok(())
    }
}

impl<M: MapAdapter + 'static> Drop for CarouselBinding<M> {
    fn drop(&mut self) {
        for (kind, capture, closure) in self.listeners.drain(..) {
            let _ = self.target.remove_event_listener_with_callback_and_bool(
                kind,
                closure.as_ref().unchecked_ref(),
                capture,
            );
        }
    }
}
