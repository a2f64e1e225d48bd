// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer set data model.
//!
//! A *layer* is one of the map layers the carousel can show. Each layer has:
//!
//! - A [`LayerKey`]: the opaque identifier the map assigned to it, used to
//!   find the layer again from a UI event.
//! - A [`LayerSlot`]: the index handle the set hands out when the layer is
//!   added.
//! - A visibility flag, and optionally a group marker with ordered members.
//!
//! Layers are stored in struct-of-arrays layout. The set is built once from
//! the map's enumeration; after that only flags change.
//!
//! # Dirty tracking
//!
//! Flag writes mark the [`VISIBILITY`](crate::dirty::VISIBILITY) channel and
//! additions mark [`TOPOLOGY`](crate::dirty::TOPOLOGY).
//! [`evaluate`](LayerSet::evaluate) drains both into [`VisibilityChanges`].

mod evaluate;
mod id;
mod store;
mod traverse;
mod visibility;

pub use evaluate::VisibilityChanges;
pub use id::{INVALID, LayerKey, LayerSlot};
pub use store::LayerSet;
pub use traverse::{Children, TopLevel};
