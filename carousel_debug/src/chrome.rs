// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Presses and hover-previews become duration slices (`B`/`E` pairs) on their
//! own tracks; everything else is an instant event. Commits close or open
//! the preview slice depending on their snapshot policy, see [`export`].
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use carousel_core::config::SnapshotPolicy;
use carousel_core::layer::LayerKey;
use carousel_core::time::{HostTime, Timebase};

use crate::recorder::{RecordedEvent, decode};

const TID_GESTURE: u32 = 0;
const TID_PREVIEW: u32 = 1;
const TID_SELECTION: u32 = 2;
const TID_MAP: u32 = 3;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Timestamps are converted to microseconds using the provided [`Timebase`].
///
/// The preview track holds at most one open slice, and every `B` on it gets
/// a matching `E`:
///
/// - A preview that begins while another is open closes the open one first.
/// - A [`LockOnCommit`](SnapshotPolicy::LockOnCommit) commit closes the open
///   preview; the leave that follows restores nothing and is not recorded.
/// - A [`RevertOnLeave`](SnapshotPolicy::RevertOnLeave) commit opens a
///   preview if none is open, since the next leave will restore from it.
/// - A preview end with nothing open becomes an instant event.
pub fn export(bytes: &[u8], timebase: Timebase, writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let ts = |t: HostTime| ticks_to_us(t.ticks(), timebase);
    let mut preview_open = false;

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Press(e) => events.push(json!({
                "ph": "B",
                "name": "Press",
                "cat": "Gesture",
                "ts": ts(e.at),
                "pid": 0,
                "tid": TID_GESTURE,
            })),
            RecordedEvent::Release(e) => events.push(json!({
                "ph": "E",
                "name": "Press",
                "cat": "Gesture",
                "ts": ts(e.at),
                "pid": 0,
                "tid": TID_GESTURE,
                "args": {
                    "held_us": ticks_to_us(e.duration.ticks(), timebase),
                    "drag": e.drag,
                }
            })),
            RecordedEvent::ClickSuppressed(e) => events.push(json!({
                "ph": "i",
                "name": "ClickSuppressed",
                "cat": "Gesture",
                "ts": ts(e.at),
                "pid": 0,
                "tid": TID_GESTURE,
                "s": "t",
                "args": {
                    "held_us": e.duration.map(|d| ticks_to_us(d.ticks(), timebase)),
                }
            })),
            RecordedEvent::UnresolvedTarget(e) => events.push(json!({
                "ph": "i",
                "name": "UnresolvedTarget",
                "cat": "Selection",
                "ts": ts(e.at),
                "pid": 0,
                "tid": TID_SELECTION,
                "s": "t",
                "args": {
                    "key": key_arg(e.key.as_ref()),
                }
            })),
            RecordedEvent::PreviewBegin(e) => {
                if preview_open {
                    events.push(preview_slice("E", ts(e.at), json!({ "replaced": true })));
                }
                events.push(preview_slice(
                    "B",
                    ts(e.at),
                    json!({
                        "key": e.key.as_str(),
                        "snapshot": key_arg(e.snapshot.as_ref()),
                    }),
                ));
                preview_open = true;
            }
            RecordedEvent::PreviewEnd(e) => {
                let args = json!({ "restored": key_arg(e.restored.as_ref()) });
                if preview_open {
                    events.push(preview_slice("E", ts(e.at), args));
                    preview_open = false;
                } else {
                    events.push(json!({
                        "ph": "i",
                        "name": "PreviewEnd",
                        "cat": "Preview",
                        "ts": ts(e.at),
                        "pid": 0,
                        "tid": TID_PREVIEW,
                        "s": "t",
                        "args": args,
                    }));
                }
            }
            RecordedEvent::Commit(e) => {
                match (e.policy, preview_open) {
                    (SnapshotPolicy::LockOnCommit, true) => {
                        events.push(preview_slice(
                            "E",
                            ts(e.at),
                            json!({ "committed": e.key.as_str() }),
                        ));
                        preview_open = false;
                    }
                    (SnapshotPolicy::RevertOnLeave, false) => {
                        events.push(preview_slice(
                            "B",
                            ts(e.at),
                            json!({ "key": e.key.as_str(), "from_commit": true }),
                        ));
                        preview_open = true;
                    }
                    (SnapshotPolicy::LockOnCommit, false)
                    | (SnapshotPolicy::RevertOnLeave, true) => {}
                }
                events.push(json!({
                    "ph": "i",
                    "name": "Commit",
                    "cat": "Selection",
                    "ts": ts(e.at),
                    "pid": 0,
                    "tid": TID_SELECTION,
                    "s": "g",
                    "args": {
                        "key": e.key.as_str(),
                        "policy": format!("{:?}", e.policy),
                    }
                }));
            }
            RecordedEvent::ContainerSelect(e) => events.push(json!({
                "ph": "i",
                "name": "ContainerSelect",
                "cat": "Selection",
                "ts": ts(e.at),
                "pid": 0,
                "tid": TID_SELECTION,
                "s": "g",
                "args": {
                    "key": e.key.as_str(),
                }
            })),
            RecordedEvent::MapMoved(e) => events.push(json!({
                "ph": "i",
                "name": "MapMoved",
                "cat": "Map",
                "ts": ts(e.at),
                "pid": 0,
                "tid": TID_MAP,
                "s": "t",
                "args": {
                    "render_revision": e.render_revision,
                }
            })),
            RecordedEvent::VisibilityCounts { at, shown, hidden } => events.push(json!({
                "ph": "i",
                "name": "Visibility",
                "cat": "Rich",
                "ts": ts(at),
                "pid": 0,
                "tid": TID_MAP,
                "s": "p",
                "args": {
                    "shown": shown,
                    "hidden": hidden,
                }
            })),
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn preview_slice(ph: &str, ts: f64, args: Value) -> Value {
    json!({
        "ph": ph,
        "name": "Preview",
        "cat": "Preview",
        "ts": ts,
        "pid": 0,
        "tid": TID_PREVIEW,
        "args": args,
    })
}

fn key_arg(key: Option<&LayerKey>) -> Value {
    key.map_or(Value::Null, |k| Value::from(k.as_str()))
}

fn ticks_to_us(ticks: u64, timebase: Timebase) -> f64 {
    timebase.ticks_to_nanos(ticks) as f64 / 1000.0
}
