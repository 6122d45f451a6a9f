// Copyright 2026 the Mullion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use mullion_core::font::FontKind;
use mullion_core::trace::{
    FlushBeginEvent, FlushSummary, FontRequestEvent, FontResolvedEvent, PassEvent,
    StateWarningEvent, TraceSink, UpdatePass,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn pass_name(pass: UpdatePass) -> &'static str {
    match pass {
        UpdatePass::Parsing => "parsing",
        UpdatePass::Layout => "layout",
        UpdatePass::Inner => "inner",
    }
}

fn kind_name(kind: FontKind) -> &'static str {
    match kind {
        FontKind::Family => "family",
        FontKind::Texture => "texture",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_flush_begin(&mut self, e: &FlushBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[flush] #{} registered={}",
            e.flush_index, e.registered,
        );
    }

    fn on_pass_begin(&mut self, e: &PassEvent) {
        let _ = writeln!(
            self.writer,
            "[pass:begin] flush={} {} components={}",
            e.flush_index,
            pass_name(e.pass),
            e.components,
        );
    }

    fn on_pass_end(&mut self, e: &PassEvent) {
        let _ = writeln!(
            self.writer,
            "[pass:end] flush={} {}",
            e.flush_index,
            pass_name(e.pass),
        );
    }

    fn on_flush_summary(&mut self, s: &FlushSummary) {
        let _ = writeln!(
            self.writer,
            "[summary] flush={} parsed={} laid_out={} inner={} stale={}",
            s.flush_index, s.parsed, s.laid_out, s.inner, s.stale,
        );
    }

    fn on_font_request(&mut self, e: &FontRequestEvent) {
        let _ = writeln!(
            self.writer,
            "[font:request] component={} {} ticket={}",
            e.component_index,
            kind_name(e.kind),
            e.serial,
        );
    }

    fn on_font_resolved(&mut self, e: &FontResolvedEvent) {
        let outcome = if e.installed { "installed" } else { "refused" };
        let _ = writeln!(
            self.writer,
            "[font:resolved] component={} {} ticket={} {outcome}",
            e.component_index,
            kind_name(e.kind),
            e.serial,
        );
    }

    fn on_state_warning(&mut self, e: &StateWarningEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[state:warn] component={} unknown state {:?}",
            e.component_index, e.state,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_line_per_event() {
        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        sink.on_flush_begin(&FlushBeginEvent {
            flush_index: 3,
            registered: 12,
        });
        sink.on_pass_begin(&PassEvent {
            flush_index: 3,
            pass: UpdatePass::Layout,
            components: 2,
        });
        sink.on_state_warning(&StateWarningEvent {
            component_index: 5,
            state: "hover",
        });

        let text = String::from_utf8(sink.into_writer()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "[flush] #3 registered=12",
                "[pass:begin] flush=3 layout components=2",
                "[state:warn] component=5 unknown state \"hover\"",
            ]
        );
    }

    #[test]
    fn font_resolution_outcome_is_spelled_out() {
        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        sink.on_font_resolved(&FontResolvedEvent {
            component_index: 1,
            kind: FontKind::Texture,
            serial: 9,
            installed: false,
        });
        let text = String::from_utf8(sink.into_writer()).unwrap();
        assert_eq!(text, "[font:resolved] component=1 texture ticket=9 refused\n");
    }
}
