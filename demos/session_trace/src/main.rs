// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted carousel session that exercises the tracing and diagnostics
//! pipeline.
//!
//! Drives hovers, clicks, a drag, a map pan and a container click against a
//! [`SimulatedMap`](carousel_harness::SimulatedMap), printing every event
//! through a [`PrettyPrintSink`] while a [`RecorderSink`] captures the same
//! stream, then exports a Chrome trace JSON file.
//!
//! Pass `--compat` to run with the revert-on-leave snapshot policy.

use std::fs::File;
use std::io::{self, BufWriter};

use kurbo::Vec2;

use carousel_core::config::CarouselConfig;
use carousel_core::layer::LayerSet;
use carousel_core::time::HostTime;
use carousel_core::trace::{
    ClickSuppressedEvent, CommitEvent, ContainerSelectEvent, MapMovedEvent, PressEvent,
    PreviewBeginEvent, PreviewEndEvent, ReleaseEvent, TraceSink, Tracer, UnresolvedTargetEvent,
    VisibilityChange,
};
use carousel_debug::pretty::PrettyPrintSink;
use carousel_debug::recorder::RecorderSink;
use carousel_harness::{ManualClock, Session};

const TRACE_PATH: &str = "carousel_trace.json";

fn main() -> io::Result<()> {
    let config = if std::env::args().any(|a| a == "--compat") {
        CarouselConfig::compat()
    } else {
        CarouselConfig::new()
    };
    let timebase = ManualClock::TIMEBASE;

    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(io::stdout()), timebase);
    let mut recorder = RecorderSink::new();

    // -- layers ------------------------------------------------------------
    let mut layers = LayerSet::new();
    layers.push_layer("osm", true);
    let topo = layers.push_layer("topo", false);
    let ortho = layers.push_group("ortho", false);
    layers.push_child(ortho, "ortho-2019", false);
    layers.push_child(ortho, "ortho-2022", false);
    layers.push_layer("satellite", false);

    let mut session = Session::new(layers, config);

    // -- scripted session --------------------------------------------------
    {
        let mut tee = Tee {
            a: &mut pretty,
            b: &mut recorder,
        };
        let t = &mut Tracer::new(&mut tee);

        // Browse without committing.
        let _ = session.hover("topo", t);
        session.wait_ms(400);
        let _ = session.leave(t);
        session.wait_ms(150);

        // Hover the group and commit it with a quick click.
        let _ = session.hover("ortho", t);
        session.wait_ms(600);
        let _ = session.click("ortho", 90, t);
        session.wait_ms(50);
        let _ = session.leave(t);
        session.wait_ms(300);

        // Swipe across the strip: the click that ends it is a drag.
        let _ = session.hover("satellite", t);
        let _ = session.click("satellite", 420, t);
        let _ = session.leave(t);
        session.wait_ms(200);

        // Pan the map twice; thumbnails follow.
        let _ = session.pan(Vec2::new(25_000.0, 0.0), t);
        session.wait_ms(16);
        let _ = session.pan(Vec2::new(0.0, -10_000.0), t);
        session.wait_ms(500);

        // Container-level selection and an event from outside any slide.
        let _ = session.click_container(topo, 60, t);
        session.wait_ms(100);
        let _ = session.hover("not-a-layer", t);
    }

    println!(
        "selections: {:?}",
        session
            .selections()
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
    );
    println!(
        "visible:    {:?}",
        session
            .visible_keys()
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
    );
    println!("rerenders:  {}", session.rerenders());

    // -- export Chrome trace -----------------------------------------------
    let file = File::create(TRACE_PATH)?;
    let mut writer = BufWriter::new(file);
    carousel_debug::chrome::export(recorder.as_bytes(), timebase, &mut writer)?;

    println!("Wrote {TRACE_PATH} ({} bytes recorded)", recorder.as_bytes().len());
    Ok(())
}

/// Forwards every event to two sinks.
struct Tee<'a> {
    a: &'a mut dyn TraceSink,
    b: &'a mut dyn TraceSink,
}

impl TraceSink for Tee<'_> {
    fn on_press(&mut self, e: &PressEvent) {
        self.a.on_press(e);
        self.b.on_press(e);
    }

    fn on_release(&mut self, e: &ReleaseEvent) {
        self.a.on_release(e);
        self.b.on_release(e);
    }

    fn on_click_suppressed(&mut self, e: &ClickSuppressedEvent) {
        self.a.on_click_suppressed(e);
        self.b.on_click_suppressed(e);
    }

    fn on_unresolved_target(&mut self, e: &UnresolvedTargetEvent) {
        self.a.on_unresolved_target(e);
        self.b.on_unresolved_target(e);
    }

    fn on_preview_begin(&mut self, e: &PreviewBeginEvent) {
        self.a.on_preview_begin(e);
        self.b.on_preview_begin(e);
    }

    fn on_preview_end(&mut self, e: &PreviewEndEvent) {
        self.a.on_preview_end(e);
        self.b.on_preview_end(e);
    }

    fn on_commit(&mut self, e: &CommitEvent) {
        self.a.on_commit(e);
        self.b.on_commit(e);
    }

    fn on_container_select(&mut self, e: &ContainerSelectEvent) {
        self.a.on_container_select(e);
        self.b.on_container_select(e);
    }

    fn on_map_moved(&mut self, e: &MapMovedEvent) {
        self.a.on_map_moved(e);
        self.b.on_map_moved(e);
    }

    fn on_visibility_changes(&mut self, at: HostTime, changes: &[VisibilityChange]) {
        self.a.on_visibility_changes(at, changes);
        self.b.on_visibility_changes(at, changes);
    }
}
