// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slider settings and thumbnail render inputs.
//!
//! Nothing here affects selection. These are the values handed to whatever
//! draws the slider and its thumbnails: the slider policy, and for every
//! offered layer the map geometry a thumbnail preview is rendered against.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Rect, Size};

use crate::layer::{LayerKey, LayerSet, LayerSlot};

/// Attribute on a thumbnail element that carries its layer's key.
pub const IDENTIFIER_ATTRIBUTE: &str = "data-identifier";

/// CSS class of the slider element.
pub const SLIDER_CLASS: &str = "carousel";

/// CSS class appended to the wrapper element's configured class.
pub const WRAPPER_CLASS: &str = "carousel-wrapper";

/// When thumbnail previews are loaded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LazyLoad {
    /// Load a thumbnail when its slide scrolls into view.
    #[default]
    OnDemand,
    /// Load thumbnails one after another in the background.
    Progressive,
}

impl LazyLoad {
    /// Returns the value slide renderers put in their `data-lazy` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnDemand => "ondemand",
            Self::Progressive => "progressive",
        }
    }
}

/// Slider policy for the thumbnail strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CarouselSettings {
    /// Thumbnails visible at once.
    pub slides_to_show: usize,
    /// Thumbnails advanced per swipe step.
    pub slides_to_scroll: usize,
    /// Thumbnail loading strategy.
    pub lazy_load: LazyLoad,
    /// Whether the strip wraps around.
    pub infinite: bool,
    /// Whether a swipe may stop on any slide.
    pub swipe_to_slide: bool,
    /// Whether pagination dots are shown.
    pub dots: bool,
    /// Whether previous/next arrows are shown.
    pub arrows: bool,
}

impl CarouselSettings {
    /// Settings for a carousel offering `layer_count` layers: half of them
    /// (rounded up) visible at once, looping, swipeable, no dots or arrows.
    #[must_use]
    pub const fn for_layer_count(layer_count: usize) -> Self {
        Self {
            slides_to_show: layer_count.div_ceil(2),
            slides_to_scroll: 1,
            lazy_load: LazyLoad::OnDemand,
            infinite: true,
            swipe_to_slide: true,
            dots: false,
            arrows: false,
        }
    }

    /// Returns these settings with a different loading strategy.
    #[must_use]
    pub const fn with_lazy_load(mut self, lazy_load: LazyLoad) -> Self {
        self.lazy_load = lazy_load;
        self
    }
}

/// Builds the wrapper element's class attribute from a configured class.
#[must_use]
pub fn wrapper_class_name(class_name: &str) -> String {
    let mut out = String::with_capacity(class_name.len() + 1 + WRAPPER_CLASS.len());
    let trimmed = class_name.trim();
    if !trimmed.is_empty() {
        out.push_str(trimmed);
        out.push(' ');
    }
    out.push_str(WRAPPER_CLASS);
    out
}

/// A map projection code such as `EPSG:3857`, passed through untouched.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ProjectionCode(Arc<str>);

impl ProjectionCode {
    /// Wraps a projection code reported by the map.
    #[must_use]
    pub fn new(code: &str) -> Self {
        Self(Arc::from(code))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ProjectionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProjectionCode({:?})", &*self.0)
    }
}

impl fmt::Display for ProjectionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The map geometry thumbnails are rendered against.
#[derive(Clone, Debug, PartialEq)]
pub struct MapView {
    /// Viewport size in pixels.
    pub size: Size,
    /// Visible extent in projected map units.
    pub extent: Rect,
    /// Projection of `extent`.
    pub projection: ProjectionCode,
}

/// Everything the slide renderer needs for one thumbnail.
#[derive(Clone, Debug, PartialEq)]
pub struct ThumbnailView {
    /// Slot of the layer in the set.
    pub slot: LayerSlot,
    /// Key to tag the thumbnail element with (see [`IDENTIFIER_ATTRIBUTE`]).
    pub key: LayerKey,
    /// Whether the layer is a group.
    pub group: bool,
    /// Viewport size in pixels.
    pub map_size: Size,
    /// Visible extent in projected map units.
    pub extent: Rect,
    /// Projection of `extent`.
    pub projection: ProjectionCode,
}

/// Builds one [`ThumbnailView`] per offered layer, in carousel order.
///
/// Pure: reads the set and the view, writes nothing, so it can run on every
/// map move.
#[must_use]
pub fn thumbnails(set: &LayerSet, view: &MapView) -> Vec<ThumbnailView> {
    set.top_level()
        .map(|slot| ThumbnailView {
            slot,
            key: set.key(slot).clone(),
            group: set.is_group(slot),
            map_size: view.size,
            extent: view.extent,
            projection: view.projection.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> MapView {
        MapView {
            size: Size::new(800.0, 600.0),
            extent: Rect::new(-1000.0, -750.0, 1000.0, 750.0),
            projection: ProjectionCode::new("EPSG:3857"),
        }
    }

    #[test]
    fn slides_to_show_is_half_rounded_up() {
        assert_eq!(CarouselSettings::for_layer_count(0).slides_to_show, 0);
        assert_eq!(CarouselSettings::for_layer_count(1).slides_to_show, 1);
        assert_eq!(CarouselSettings::for_layer_count(4).slides_to_show, 2);
        assert_eq!(CarouselSettings::for_layer_count(5).slides_to_show, 3);
    }

    #[test]
    fn slider_policy_is_fixed() {
        let s = CarouselSettings::for_layer_count(6);
        assert_eq!(s.slides_to_scroll, 1);
        assert_eq!(s.lazy_load, LazyLoad::OnDemand);
        assert!(s.infinite && s.swipe_to_slide);
        assert!(!s.dots && !s.arrows);
    }

    #[test]
    fn lazy_load_can_be_overridden() {
        let s = CarouselSettings::for_layer_count(4).with_lazy_load(LazyLoad::Progressive);
        assert_eq!(s.lazy_load, LazyLoad::Progressive);
        assert_eq!(s.slides_to_show, 2, "other settings are kept");
        assert_eq!(s.lazy_load.as_str(), "progressive");
        assert_eq!(LazyLoad::default().as_str(), "ondemand");
    }

    #[test]
    fn wrapper_class_is_trimmed() {
        assert_eq!(wrapper_class_name(""), "carousel-wrapper");
        assert_eq!(wrapper_class_name("bottom"), "bottom carousel-wrapper");
        assert_eq!(wrapper_class_name("  bottom "), "bottom carousel-wrapper");
    }

    #[test]
    fn one_thumbnail_per_offered_layer() {
        let mut set = LayerSet::new();
        set.push_layer("osm", true);
        let g = set.push_group("ortho", false);
        set.push_child(g, "ortho-2020", false);

        let thumbs = thumbnails(&set, &view());
        assert_eq!(thumbs.len(), 2, "group members get no thumbnail");
        assert_eq!(thumbs[0].key, LayerKey::new("osm"));
        assert!(thumbs[1].group);
        assert_eq!(thumbs[1].projection.as_str(), "EPSG:3857");
        assert_eq!(thumbs[1].map_size, Size::new(800.0, 600.0));
    }

    #[test]
    fn thumbnails_do_not_touch_visibility() {
        let mut set = LayerSet::new();
        set.push_layer("a", true);
        set.push_layer("b", false);
        let _ = set.evaluate();
        let _ = thumbnails(&set, &view());
        assert!(set.evaluate().is_empty());
    }
}
