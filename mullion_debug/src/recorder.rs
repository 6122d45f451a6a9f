// Copyright 2026 the Mullion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as little-endian records, one tag byte followed by the event
//! fields. [`decode`] reads them back as an iterator of [`RecordedEvent`].
//!
//! State names in [`on_state_warning`](TraceSink::on_state_warning) are
//! stored length-prefixed (`u32` byte count, then UTF-8 bytes).

use mullion_core::font::FontKind;
use mullion_core::trace::{
    FlushBeginEvent, FlushSummary, FontRequestEvent, FontResolvedEvent, PassEvent,
    StateWarningEvent, TraceSink, UpdatePass,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_FLUSH_BEGIN: u8 = 1;
const TAG_PASS_BEGIN: u8 = 2;
const TAG_PASS_END: u8 = 3;
const TAG_FLUSH_SUMMARY: u8 = 4;
const TAG_FONT_REQUEST: u8 = 5;
const TAG_FONT_RESOLVED: u8 = 6;
const TAG_STATE_WARNING: u8 = 7;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_str(&mut self, s: &str) {
        let len = u32::try_from(s.len()).unwrap_or(u32::MAX);
        self.write_u32(len);
        let take = usize::try_from(len).unwrap_or(usize::MAX);
        self.buf.extend(s.as_bytes().iter().take(take));
    }

    fn write_pass(&mut self, p: UpdatePass) {
        self.write_u8(match p {
            UpdatePass::Parsing => 0,
            UpdatePass::Layout => 1,
            UpdatePass::Inner => 2,
        });
    }

    fn write_kind(&mut self, k: FontKind) {
        self.write_u8(match k {
            FontKind::Family => 0,
            FontKind::Texture => 1,
        });
    }

    fn write_pass_event(&mut self, tag: u8, e: &PassEvent) {
        self.write_u8(tag);
        self.write_u64(e.flush_index);
        self.write_pass(e.pass);
        self.write_u32(e.components);
    }
}

impl TraceSink for RecorderSink {
    fn on_flush_begin(&mut self, e: &FlushBeginEvent) {
        self.write_u8(TAG_FLUSH_BEGIN);
        self.write_u64(e.flush_index);
        self.write_u32(e.registered);
    }

    fn on_pass_begin(&mut self, e: &PassEvent) {
        self.write_pass_event(TAG_PASS_BEGIN, e);
    }

    fn on_pass_end(&mut self, e: &PassEvent) {
        self.write_pass_event(TAG_PASS_END, e);
    }

    fn on_flush_summary(&mut self, s: &FlushSummary) {
        self.write_u8(TAG_FLUSH_SUMMARY);
        self.write_u64(s.flush_index);
        self.write_u32(s.parsed);
        self.write_u32(s.laid_out);
        self.write_u32(s.inner);
        self.write_u32(s.stale);
    }

    fn on_font_request(&mut self, e: &FontRequestEvent) {
        self.write_u8(TAG_FONT_REQUEST);
        self.write_u32(e.component_index);
        self.write_kind(e.kind);
        self.write_u64(e.serial);
    }

    fn on_font_resolved(&mut self, e: &FontResolvedEvent) {
        self.write_u8(TAG_FONT_RESOLVED);
        self.write_u32(e.component_index);
        self.write_kind(e.kind);
        self.write_u64(e.serial);
        self.write_u8(u8::from(e.installed));
    }

    fn on_state_warning(&mut self, e: &StateWarningEvent<'_>) {
        self.write_u8(TAG_STATE_WARNING);
        self.write_u32(e.component_index);
        self.write_str(e.state);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A [`FlushBeginEvent`].
    FlushBegin(FlushBeginEvent),
    /// A [`PassEvent`] at the start of a pass.
    PassBegin(PassEvent),
    /// A [`PassEvent`] at the end of a pass.
    PassEnd(PassEvent),
    /// A [`FlushSummary`].
    FlushSummary(FlushSummary),
    /// A [`FontRequestEvent`].
    FontRequest(FontRequestEvent),
    /// A [`FontResolvedEvent`].
    FontResolved(FontResolvedEvent),
    /// A [`StateWarningEvent`] with an owned state name.
    StateWarning {
        /// Slot index of the component.
        component_index: u32,
        /// The unknown state name.
        state: String,
    },
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
///
/// Stops at the first unknown tag or truncated record.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_bytes(&mut self, n: usize) -> Option<&[u8]> {
        if self.remaining() < n {
            return None;
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        Some(self.read_bytes(1)?[0])
    }

    fn read_u32(&mut self) -> Option<u32> {
        Some(u32::from_le_bytes(self.read_bytes(4)?.try_into().ok()?))
    }

    fn read_u64(&mut self) -> Option<u64> {
        Some(u64::from_le_bytes(self.read_bytes(8)?.try_into().ok()?))
    }

    fn read_string(&mut self) -> Option<String> {
        let len = usize::try_from(self.read_u32()?).ok()?;
        let bytes = self.read_bytes(len)?;
        Some(String::from_utf8_lossy(bytes).into_owned())
    }

    fn read_pass(&mut self) -> Option<UpdatePass> {
        Some(match self.read_u8()? {
            0 => UpdatePass::Parsing,
            1 => UpdatePass::Layout,
            _ => UpdatePass::Inner,
        })
    }

    fn read_kind(&mut self) -> Option<FontKind> {
        Some(match self.read_u8()? {
            0 => FontKind::Family,
            _ => FontKind::Texture,
        })
    }

    fn decode_flush_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::FlushBegin(FlushBeginEvent {
            flush_index: self.read_u64()?,
            registered: self.read_u32()?,
        }))
    }

    fn decode_pass(&mut self) -> Option<PassEvent> {
        Some(PassEvent {
            flush_index: self.read_u64()?,
            pass: self.read_pass()?,
            components: self.read_u32()?,
        })
    }

    fn decode_flush_summary(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::FlushSummary(FlushSummary {
            flush_index: self.read_u64()?,
            parsed: self.read_u32()?,
            laid_out: self.read_u32()?,
            inner: self.read_u32()?,
            stale: self.read_u32()?,
        }))
    }

    fn decode_font_request(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::FontRequest(FontRequestEvent {
            component_index: self.read_u32()?,
            kind: self.read_kind()?,
            serial: self.read_u64()?,
        }))
    }

    fn decode_font_resolved(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::FontResolved(FontResolvedEvent {
            component_index: self.read_u32()?,
            kind: self.read_kind()?,
            serial: self.read_u64()?,
            installed: self.read_u8()? != 0,
        }))
    }

    fn decode_state_warning(&mut self) -> Option<RecordedEvent> {
        let component_index = self.read_u32()?;
        let state = self.read_string()?;
        Some(RecordedEvent::StateWarning {
            component_index,
            state,
        })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_FLUSH_BEGIN => self.decode_flush_begin(),
            TAG_PASS_BEGIN => self.decode_pass().map(RecordedEvent::PassBegin),
            TAG_PASS_END => self.decode_pass().map(RecordedEvent::PassEnd),
            TAG_FLUSH_SUMMARY => self.decode_flush_summary(),
            TAG_FONT_REQUEST => self.decode_font_request(),
            TAG_FONT_RESOLVED => self.decode_font_resolved(),
            TAG_STATE_WARNING => self.decode_state_warning(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    use mullion_core::attributes::Attribute;
    use mullion_core::collaborator::UpdatePasses;
    use mullion_core::component::{ComponentTree, Roles};
    use mullion_core::trace::Tracer;

    struct Passes;
    impl UpdatePasses for Passes {}

    #[test]
    fn records_a_traced_flush_in_pass_order() {
        let mut tree = ComponentTree::new();
        let a = tree.create(Roles::block());
        tree.set(a, [Attribute::FontSize(0.2)]);

        let mut rec = RecorderSink::new();
        tree.update_traced(&mut Passes, &mut Tracer::new(&mut rec));

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert!(matches!(events[0], RecordedEvent::FlushBegin(e) if e.registered == 1));
        let passes: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::PassBegin(p) => Some(p.pass),
                _ => None,
            })
            .collect();
        assert_eq!(
            passes,
            [UpdatePass::Parsing, UpdatePass::Layout, UpdatePass::Inner]
        );
        match events.last() {
            Some(RecordedEvent::FlushSummary(s)) => {
                assert_eq!(s.laid_out, 1);
                assert_eq!(s.parsed, 0);
            }
            other => panic!("expected FlushSummary, got {other:?}"),
        }
    }

    #[test]
    fn state_warning_keeps_its_name() {
        let mut rec = RecorderSink::new();
        rec.on_state_warning(&StateWarningEvent {
            component_index: 4,
            state: "pressed",
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(
            events,
            [RecordedEvent::StateWarning {
                component_index: 4,
                state: "pressed".into(),
            }]
        );
    }

    #[test]
    fn font_events_carry_ticket_serials() {
        let mut rec = RecorderSink::new();
        rec.on_font_request(&FontRequestEvent {
            component_index: 2,
            kind: FontKind::Family,
            serial: 17,
        });
        rec.on_font_resolved(&FontResolvedEvent {
            component_index: 2,
            kind: FontKind::Family,
            serial: 17,
            installed: true,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 2);
        match &events[1] {
            RecordedEvent::FontResolved(e) => {
                assert_eq!(e.serial, 17);
                assert!(e.installed);
            }
            other => panic!("expected FontResolved, got {other:?}"),
        }
    }

    #[test]
    fn truncated_recording_stops_cleanly() {
        let mut rec = RecorderSink::new();
        rec.on_flush_begin(&FlushBeginEvent {
            flush_index: 1,
            registered: 3,
        });
        rec.on_flush_begin(&FlushBeginEvent {
            flush_index: 2,
            registered: 3,
        });
        let bytes = rec.into_bytes();
        let events: Vec<_> = decode(&bytes[..bytes.len() - 2]).collect();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn unknown_tag_stops_iteration() {
        assert_eq!(decode(&[0xff, 0, 0, 0]).count(), 0);
    }
}
