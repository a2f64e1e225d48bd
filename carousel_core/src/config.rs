// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel configuration.

use alloc::borrow::Cow;

use crate::carousel::LazyLoad;

/// What a click-commit does to the hover snapshot.
///
/// A thumbnail click runs the same snapshot-and-toggle sequence as a hover.
/// The pointer is usually still over the thumbnail afterwards, so a
/// pointer-leave follows sooner or later; this policy decides whether that
/// leave may restore the snapshot.
///
/// Passed to [`LayerCarousel`](crate::controller::LayerCarousel) via
/// [`CarouselConfig::snapshot_policy`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SnapshotPolicy {
    /// The commit locks the preview: the following leave is a no-op and the
    /// committed layer stays visible.
    #[default]
    LockOnCommit,
    /// The commit re-snapshots whatever was visible right before it and the
    /// following leave restores that snapshot.
    ///
    /// After a hover on the same thumbnail the snapshot is the hovered layer,
    /// so nothing visibly changes. A click without a preceding hover (touch
    /// input, synthetic clicks) is reverted by the next leave.
    RevertOnLeave,
}

/// Configuration for a [`LayerCarousel`](crate::controller::LayerCarousel).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarouselConfig {
    /// How a click-commit interacts with a later pointer-leave.
    pub snapshot_policy: SnapshotPolicy,
    /// Extra CSS class for the carousel wrapper element.
    pub class_name: Cow<'static, str>,
    /// When the slide renderer loads thumbnail previews.
    pub lazy_load: LazyLoad,
}

impl CarouselConfig {
    /// Default configuration: commits survive the following pointer-leave.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            snapshot_policy: SnapshotPolicy::LockOnCommit,
            class_name: Cow::Borrowed(""),
            lazy_load: LazyLoad::OnDemand,
        }
    }

    /// Reproduces the snapshot-reuse behaviour of earlier carousel versions,
    /// where a leave after a commit restores the commit-time snapshot.
    #[must_use]
    pub const fn compat() -> Self {
        Self {
            snapshot_policy: SnapshotPolicy::RevertOnLeave,
            class_name: Cow::Borrowed(""),
            lazy_load: LazyLoad::OnDemand,
        }
    }

    /// Returns this configuration with a different wrapper class.
    ///
    /// Accepts literals as well as class names only known at runtime.
    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<Cow<'static, str>>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Returns this configuration with a different thumbnail loading
    /// strategy.
    #[must_use]
    pub fn with_lazy_load(mut self, lazy_load: LazyLoad) -> Self {
        self.lazy_load = lazy_load;
        self
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self::new()
    }
}
