// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thumbnail slide elements.
//!
//! Turns [`ThumbnailView`]s into `<div>` slides inside a slider element. Each
//! slide carries its layer key in the [`IDENTIFIER_ATTRIBUTE`], and the map
//! geometry and loading strategy in `data-*` attributes, for whatever fills
//! in the preview image.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use carousel_core::carousel::{CarouselSettings, IDENTIFIER_ATTRIBUTE, SLIDER_CLASS, ThumbnailView};
use carousel_core::layer::LayerSet;
use kurbo::{Rect, Size};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlElement};

/// CSS class of each slide.
const SLIDE_CLASS: &str = "carousel-slide";

/// Extra class on slides whose layer is visible.
const VISIBLE_CLASS: &str = "is-visible";

/// Owns the slider and slide elements below a wrapper element.
pub struct SlidePresenter {
    wrapper: HtmlElement,
    slider: Option<HtmlElement>,
    slides: Vec<HtmlElement>,
}

impl core::fmt::Debug for SlidePresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SlidePresenter")
            .field("wrapper", &"HtmlElement")
            .field("slides_len", &self.slides.len())
            .finish_non_exhaustive()
    }
}

impl SlidePresenter {
    /// Creates a presenter that manages child elements of `wrapper`.
    #[must_use]
    pub fn new(wrapper: HtmlElement) -> Self {
        Self {
            wrapper,
            slider: None,
            slides: Vec::new(),
        }
    }

    /// Returns the wrapper element; pointer listeners go here.
    #[must_use]
    pub fn wrapper(&self) -> &HtmlElement {
        &self.wrapper
    }

    /// Returns the slide element at carousel position `i`, if rendered.
    #[must_use]
    pub fn slide(&self, i: usize) -> Option<&HtmlElement> {
        self.slides.get(i)
    }

    /// Replaces all slides with one per thumbnail.
    pub fn render(
        &mut self,
        thumbs: &[ThumbnailView],
        settings: &CarouselSettings,
        wrapper_class: &str,
    ) -> Result<(), JsValue> {
        let doc = self
            .wrapper
            .owner_document()
            .ok_or_else(|| JsValue::from_str("carousel wrapper has no owner document"))?;
        self.wrapper.set_class_name(wrapper_class);
        let slider = self.ensure_slider(&doc, settings)?;

        for el in self.slides.drain(..) {
            el.remove();
        }

        let width = slide_width(settings);
        for thumb in thumbs {
            let el: HtmlElement = doc.create_element("div")?.unchecked_into();
            el.set_class_name(SLIDE_CLASS);
            el.set_attribute(IDENTIFIER_ATTRIBUTE, thumb.key.as_str())?;
            if thumb.group {
                el.set_attribute("data-group", "")?;
            }
            el.set_attribute("data-projection", thumb.projection.as_str())?;
            el.set_attribute("data-extent", &extent_attr(thumb.extent))?;
            el.set_attribute("data-map-size", &size_attr(thumb.map_size))?;
            el.set_attribute("data-lazy", settings.lazy_load.as_str())?;
            let s = el.style();
            s.set_property("flex", "0 0 auto")?;
            s.set_property("width", &width)?;
            slider.append_child(&el)?;
            self.slides.push(el);
        }
        Ok(())
    }

    /// Marks the slides of visible layers with the `is-visible` class.
    ///
    /// Slides are matched to `set`'s offered layers by position.
    pub fn highlight(&self, set: &LayerSet) {
        for (el, slot) in self.slides.iter().zip(set.top_level()) {
            if set.is_visible(slot) {
                el.set_class_name(&format!("{SLIDE_CLASS} {VISIBLE_CLASS}"));
            } else {
                el.set_class_name(SLIDE_CLASS);
            }
        }
    }

    fn ensure_slider(
        &mut self,
        doc: &Document,
        settings: &CarouselSettings,
    ) -> Result<HtmlElement, JsValue> {
        let slider = match &self.slider {
            Some(el) => el.clone(),
            None => {
                let el: HtmlElement = doc.create_element("div")?.unchecked_into();
                el.set_class_name(SLIDER_CLASS);
                self.wrapper.append_child(&el)?;
                self.slider = Some(el.clone());
                el
            }
        };
        let s = slider.style();
        s.set_property("display", "flex")?;
        let overflow = if settings.swipe_to_slide { "auto" } else { "hidden" };
        s.set_property("overflow-x", overflow)?;
        Ok(slider)
    }
}

/// CSS width of one slide so that `slides_to_show` fit the slider.
fn slide_width(settings: &CarouselSettings) -> String {
    let shown = settings.slides_to_show.max(1);
    format!("{}%", 100.0 / shown as f64)
}

fn extent_attr(extent: Rect) -> String {
    format!("{},{},{},{}", extent.x0, extent.y0, extent.x1, extent.y1)
}

fn size_attr(size: Size) -> String {
    format!("{},{}", size.width, size.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slide_width_splits_slider() {
        assert_eq!(slide_width(&CarouselSettings::for_layer_count(4)), "50%");
        assert_eq!(slide_width(&CarouselSettings::for_layer_count(1)), "100%");
        assert_eq!(
            slide_width(&CarouselSettings::for_layer_count(0)),
            "100%",
            "empty carousel still yields a usable width"
        );
    }

    #[test]
    fn geometry_attributes_are_comma_separated() {
        assert_eq!(extent_attr(Rect::new(-1.5, -2.0, 3.0, 4.0)), "-1.5,-2,3,4");
        assert_eq!(size_attr(Size::new(800.0, 600.0)), "800,600");
    }
}
