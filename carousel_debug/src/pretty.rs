// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are converted to milliseconds using a [`Timebase`].

use std::io::Write;

use carousel_core::layer::LayerKey;
use carousel_core::time::{HostTime, Timebase};
use carousel_core::trace::{
    ClickSuppressedEvent, CommitEvent, ContainerSelectEvent, MapMovedEvent, PressEvent,
    PreviewBeginEvent, PreviewEndEvent, ReleaseEvent, TraceSink, UnresolvedTargetEvent,
    VisibilityChange,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    timebase: Timebase,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr(timebase: Timebase) -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
            timebase,
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn ticks_to_ms(&self, ticks: u64) -> f64 {
        self.timebase.ticks_to_nanos(ticks) as f64 / 1_000_000.0
    }

    fn host_ms(&self, t: HostTime) -> f64 {
        self.ticks_to_ms(t.ticks())
    }
}

fn key_or_none(key: Option<&LayerKey>) -> &str {
    key.map_or("<none>", LayerKey::as_str)
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_press(&mut self, e: &PressEvent) {
        let _ = writeln!(self.writer, "[press] at {:.1}ms", self.host_ms(e.at));
    }

    fn on_release(&mut self, e: &ReleaseEvent) {
        let kind = if e.drag { "drag" } else { "click" };
        let _ = writeln!(
            self.writer,
            "[release] at {:.1}ms held={:.1}ms {kind}",
            self.host_ms(e.at),
            self.ticks_to_ms(e.duration.ticks()),
        );
    }

    fn on_click_suppressed(&mut self, e: &ClickSuppressedEvent) {
        let held = e
            .duration
            .map_or(f64::NAN, |d| self.ticks_to_ms(d.ticks()));
        let _ = writeln!(
            self.writer,
            "[click:suppressed] at {:.1}ms held={held:.1}ms",
            self.host_ms(e.at),
        );
    }

    fn on_unresolved_target(&mut self, e: &UnresolvedTargetEvent) {
        let _ = writeln!(
            self.writer,
            "[unresolved] at {:.1}ms key={}",
            self.host_ms(e.at),
            key_or_none(e.key.as_ref()),
        );
    }

    fn on_preview_begin(&mut self, e: &PreviewBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[preview:begin] at {:.1}ms key={} snapshot={}",
            self.host_ms(e.at),
            e.key,
            key_or_none(e.snapshot.as_ref()),
        );
    }

    fn on_preview_end(&mut self, e: &PreviewEndEvent) {
        let _ = writeln!(
            self.writer,
            "[preview:end] at {:.1}ms restored={}",
            self.host_ms(e.at),
            key_or_none(e.restored.as_ref()),
        );
    }

    fn on_commit(&mut self, e: &CommitEvent) {
        let _ = writeln!(
            self.writer,
            "[commit] at {:.1}ms key={} policy={:?}",
            self.host_ms(e.at),
            e.key,
            e.policy,
        );
    }

    fn on_container_select(&mut self, e: &ContainerSelectEvent) {
        let _ = writeln!(
            self.writer,
            "[container] at {:.1}ms key={}",
            self.host_ms(e.at),
            e.key,
        );
    }

    fn on_map_moved(&mut self, e: &MapMovedEvent) {
        let _ = writeln!(
            self.writer,
            "[map:moved] at {:.1}ms revision={}",
            self.host_ms(e.at),
            e.render_revision,
        );
    }

    fn on_visibility_changes(&mut self, at: HostTime, changes: &[VisibilityChange]) {
        let shown = changes.iter().filter(|c| c.visible).count();
        let _ = writeln!(
            self.writer,
            "[visibility] at {:.1}ms shown={shown} hidden={}",
            self.host_ms(at),
            changes.len() - shown,
        );
    }
}
