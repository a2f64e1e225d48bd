// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Iteration over group members and top-level layers.

use super::id::{INVALID, LayerSlot};
use super::store::LayerSet;

/// An iterator over the direct members of a group layer.
///
/// Created by [`LayerSet::children`].
#[derive(Debug)]
pub struct Children<'a> {
    set: &'a LayerSet,
    current: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(set: &'a LayerSet, first: u32) -> Self {
        Self {
            set,
            current: first,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = LayerSlot;

    fn next(&mut self) -> Option<LayerSlot> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.set.next_sibling[idx as usize];
        Some(LayerSlot { idx })
    }
}

/// An iterator over the layers the carousel offers, in carousel order.
///
/// Created by [`LayerSet::top_level`].
#[derive(Debug)]
pub struct TopLevel<'a> {
    inner: core::slice::Iter<'a, u32>,
}

impl<'a> TopLevel<'a> {
    pub(crate) fn new(order: &'a [u32]) -> Self {
        Self {
            inner: order.iter(),
        }
    }
}

impl Iterator for TopLevel<'_> {
    type Item = LayerSlot;

    fn next(&mut self) -> Option<LayerSlot> {
        self.inner.next().map(|&idx| LayerSlot { idx })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for TopLevel<'_> {}
