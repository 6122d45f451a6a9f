// Copyright 2026 the Mullion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the update loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! the tree calls while flushing updates, resolving fonts, and switching
//! states. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` enables the `Tracer` method bodies (one branch per call).

use crate::font::FontKind;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which pass of a flush is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpdatePass {
    /// Content tokenization.
    Parsing,
    /// Box sizing and placement.
    Layout,
    /// Inner visuals.
    Inner,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a flush starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlushBeginEvent {
    /// Monotonic flush counter.
    pub flush_index: u64,
    /// Registered components at flush start.
    pub registered: u32,
}

/// Emitted at the start and at the end of each pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassEvent {
    /// Flush counter.
    pub flush_index: u64,
    /// Which pass.
    pub pass: UpdatePass,
    /// Components processed by the pass.
    pub components: u32,
}

/// Per-flush summary, emitted after the inner pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlushSummary {
    /// Flush counter.
    pub flush_index: u64,
    /// Components parsed.
    pub parsed: u32,
    /// Components laid out.
    pub laid_out: u32,
    /// Components whose inner visuals were rebuilt.
    pub inner: u32,
    /// Drained entries skipped because their component was gone.
    pub stale: u32,
}

/// Emitted when a component asks the font system for a resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontRequestEvent {
    /// Slot index of the requesting component.
    pub component_index: u32,
    /// Family or texture.
    pub kind: FontKind,
    /// Ticket serial of the request.
    pub serial: u64,
}

/// Emitted when the font system reports a resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontResolvedEvent {
    /// Slot index of the component the ticket names.
    pub component_index: u32,
    /// Family or texture.
    pub kind: FontKind,
    /// Ticket serial.
    pub serial: u64,
    /// Whether the resource was installed (`false` for superseded tickets
    /// and dead components).
    pub installed: bool,
}

/// Emitted when a component is asked to enter a state it never registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateWarningEvent<'a> {
    /// Slot index of the component.
    pub component_index: u32,
    /// The unknown state name.
    pub state: &'a str,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the update loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a flush starts.
    fn on_flush_begin(&mut self, e: &FlushBeginEvent) {
        _ = e;
    }

    /// Called when a pass starts.
    fn on_pass_begin(&mut self, e: &PassEvent) {
        _ = e;
    }

    /// Called when a pass ends.
    fn on_pass_end(&mut self, e: &PassEvent) {
        _ = e;
    }

    /// Called with the summary of a finished flush.
    fn on_flush_summary(&mut self, s: &FlushSummary) {
        _ = s;
    }

    /// Called when a font request is queued.
    fn on_font_request(&mut self, e: &FontRequestEvent) {
        _ = e;
    }

    /// Called when a font resolution arrives.
    fn on_font_resolved(&mut self, e: &FontResolvedEvent) {
        _ = e;
    }

    /// Called when an unknown state is requested.
    fn on_state_warning(&mut self, e: &StateWarningEvent<'_>) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

macro_rules! dispatch {
    ($self:ident, $method:ident, $event:expr) => {{
        #[cfg(feature = "trace")]
        if let Some(s) = &mut $self.sink {
            s.$method($event);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = $event;
        }
    }};
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`FlushBeginEvent`].
    #[inline]
    pub fn flush_begin(&mut self, e: &FlushBeginEvent) {
        dispatch!(self, on_flush_begin, e);
    }

    /// Emits a pass-begin [`PassEvent`].
    #[inline]
    pub fn pass_begin(&mut self, e: &PassEvent) {
        dispatch!(self, on_pass_begin, e);
    }

    /// Emits a pass-end [`PassEvent`].
    #[inline]
    pub fn pass_end(&mut self, e: &PassEvent) {
        dispatch!(self, on_pass_end, e);
    }

    /// Emits a [`FlushSummary`].
    #[inline]
    pub fn flush_summary(&mut self, s: &FlushSummary) {
        dispatch!(self, on_flush_summary, s);
    }

    /// Emits a [`FontRequestEvent`].
    #[inline]
    pub fn font_request(&mut self, e: &FontRequestEvent) {
        dispatch!(self, on_font_request, e);
    }

    /// Emits a [`FontResolvedEvent`].
    #[inline]
    pub fn font_resolved(&mut self, e: &FontResolvedEvent) {
        dispatch!(self, on_font_resolved, e);
    }

    /// Emits a [`StateWarningEvent`].
    #[inline]
    pub fn state_warning(&mut self, e: &StateWarningEvent<'_>) {
        dispatch!(self, on_state_warning, e);
    }
}

/// Saturating `usize` -> `u32` for event counters.
pub(crate) fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_sink_accepts_everything() {
        let mut sink = NoopSink;
        sink.on_flush_begin(&FlushBeginEvent {
            flush_index: 0,
            registered: 3,
        });
        sink.on_state_warning(&StateWarningEvent {
            component_index: 1,
            state: "hover",
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.pass_begin(&PassEvent {
            flush_index: 0,
            pass: UpdatePass::Layout,
            components: 2,
        });
    }

    #[test]
    fn count_saturates() {
        assert_eq!(count(7), 7);
        #[cfg(target_pointer_width = "64")]
        assert_eq!(count(usize::MAX), u32::MAX);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::string::String;
        use alloc::vec::Vec;

        struct RecordingSink {
            warnings: Vec<String>,
        }
        impl TraceSink for RecordingSink {
            fn on_state_warning(&mut self, e: &StateWarningEvent<'_>) {
                self.warnings.push(String::from(e.state));
            }
        }

        let mut sink = RecordingSink {
            warnings: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.state_warning(&StateWarningEvent {
            component_index: 0,
            state: "pressed",
        });
        drop(tracer);
        assert_eq!(sink.warnings, ["pressed"]);
    }
}
