// Copyright 2026 the Mullion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON event-log exporter.
//!
//! [`export`] reads recorded bytes from a
//! [`RecorderSink`](super::recorder::RecorderSink) and writes them as a JSON
//! array, one object per event in recording order. Every object has an
//! `"event"` name and a `"flush"` index where the event belongs to a flush.

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as a pretty-printed JSON array.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let events: Vec<Value> = decode(bytes).map(to_value).collect();
    serde_json::to_writer_pretty(&mut *writer, &events).map_err(io::Error::other)?;
    writer.flush()
}

fn to_value(recorded: RecordedEvent) -> Value {
    match recorded {
        RecordedEvent::FlushBegin(e) => json!({
            "event": "FlushBegin",
            "flush": e.flush_index,
            "registered": e.registered,
        }),
        RecordedEvent::PassBegin(e) => json!({
            "event": "PassBegin",
            "flush": e.flush_index,
            "pass": format!("{:?}", e.pass),
            "components": e.components,
        }),
        RecordedEvent::PassEnd(e) => json!({
            "event": "PassEnd",
            "flush": e.flush_index,
            "pass": format!("{:?}", e.pass),
            "components": e.components,
        }),
        RecordedEvent::FlushSummary(s) => json!({
            "event": "FlushSummary",
            "flush": s.flush_index,
            "parsed": s.parsed,
            "laid_out": s.laid_out,
            "inner": s.inner,
            "stale": s.stale,
        }),
        RecordedEvent::FontRequest(e) => json!({
            "event": "FontRequest",
            "component": e.component_index,
            "kind": format!("{:?}", e.kind),
            "serial": e.serial,
        }),
        RecordedEvent::FontResolved(e) => json!({
            "event": "FontResolved",
            "component": e.component_index,
            "kind": format!("{:?}", e.kind),
            "serial": e.serial,
            "installed": e.installed,
        }),
        RecordedEvent::StateWarning {
            component_index,
            state,
        } => json!({
            "event": "StateWarning",
            "component": component_index,
            "state": state,
        }),
    }
}
