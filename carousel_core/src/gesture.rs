// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Telling a click from a drag.
//!
//! Sliding the carousel and clicking a thumbnail both end in a click event on
//! the thumbnail under the pointer. [`GestureClassifier`] times the press on
//! the carousel container and lets the click handler ask whether that press
//! was held long enough to count as a drag.
//!
//! ```text
//!   Idle ──press_start──► Pressed ──press_end──► Idle (duration recorded)
//! ```
//!
//! A click consults the duration of the most recently completed press. The
//! duration stays in place until the next press replaces it.

use crate::time::{Duration, HostTime, Timebase};

/// Presses held for longer than this many milliseconds are drags.
pub const DRAG_THRESHOLD_MS: u64 = 180;

/// Where the classifier is in a press/release cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureState {
    /// No press in flight. Holds the duration of the last completed press,
    /// if any.
    Idle {
        /// Length of the last completed press.
        last: Option<Duration>,
    },
    /// A press started at the given time and has not been released.
    Pressed {
        /// When the press started.
        at: HostTime,
    },
}

impl Default for GestureState {
    fn default() -> Self {
        Self::Idle { last: None }
    }
}

/// Press/release timer for the carousel container.
///
/// # Pairing
///
/// Callers must pair [`press_end`](Self::press_end) with a preceding
/// [`press_start`](Self::press_start). An unpaired release is measured from
/// [`HostTime::ZERO`], which any real clock reading turns into a drag.
#[derive(Clone, Copy, Debug)]
pub struct GestureClassifier {
    state: GestureState,
    timebase: Timebase,
}

impl GestureClassifier {
    /// Creates a classifier for host times expressed in `timebase` ticks.
    #[must_use]
    pub const fn new(timebase: Timebase) -> Self {
        Self {
            state: GestureState::Idle { last: None },
            timebase,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> GestureState {
        self.state
    }

    /// Returns the timebase host times are interpreted in.
    #[must_use]
    pub const fn timebase(&self) -> Timebase {
        self.timebase
    }

    /// Records the start of a press.
    pub fn press_start(&mut self, now: HostTime) {
        self.state = GestureState::Pressed { at: now };
    }

    /// Records the end of a press and returns its duration.
    pub fn press_end(&mut self, now: HostTime) -> Duration {
        let started = match self.state {
            GestureState::Pressed { at } => at,
            GestureState::Idle { .. } => HostTime::ZERO,
        };
        let duration = now.saturating_duration_since(started);
        self.state = GestureState::Idle {
            last: Some(duration),
        };
        duration
    }

    /// Returns the duration of the last completed press.
    #[must_use]
    pub const fn last_duration(&self) -> Option<Duration> {
        match self.state {
            GestureState::Idle { last } => last,
            GestureState::Pressed { .. } => None,
        }
    }

    /// Returns whether the most recent gesture counts as a drag.
    ///
    /// - No press seen yet: not a drag.
    /// - Press completed: a drag iff it lasted longer than
    ///   [`DRAG_THRESHOLD_MS`].
    /// - Press still held: a drag. A click cannot legitimately arrive before
    ///   the release that produces it.
    #[must_use]
    pub const fn is_drag(&self) -> bool {
        match self.state {
            GestureState::Idle { last: None } => false,
            GestureState::Idle { last: Some(d) } => {
                d.exceeds_millis(DRAG_THRESHOLD_MS, self.timebase)
            }
            GestureState::Pressed { .. } => true,
        }
    }
}
