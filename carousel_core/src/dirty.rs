// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The layer set records mutations with [`understory_dirty`] so that
//! [`LayerSet::evaluate`](crate::layer::LayerSet::evaluate) can report only
//! the layers whose visibility actually needs to be pushed to the map.
//!
//! - [`VISIBILITY`] is marked with
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) whenever a layer's flag is
//!   written. Group members carry a dependency edge on their group, so marking
//!   a group marks every child as well.
//! - [`TOPOLOGY`] is marked when layers are added. It does not propagate.

use understory_dirty::Channel;

/// A visibility flag was written.
pub const VISIBILITY: Channel = Channel::new(0);

/// A layer or group member was added to the set.
pub const TOPOLOGY: Channel = Channel::new(1);
