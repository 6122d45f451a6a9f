// Copyright 2026 the Mullion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and JSON export for mullion diagnostics.
//!
//! This crate provides [`TraceSink`](mullion_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`json::export`]: writes a JSON array of events from recorded bytes.

pub mod json;
pub mod pretty;
pub mod recorder;
