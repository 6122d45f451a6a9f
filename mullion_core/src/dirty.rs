// Copyright 2026 the Mullion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Update-class channel constants.
//!
//! Every scheduled recomputation belongs to one of three independent update
//! classes, each backed by an [`understory_dirty`] channel. A component is
//! either dirty on a channel or not; marking twice before a flush is the same
//! as marking once.
//!
//! # Pass order
//!
//! A flush drains [`PARSING`] first, then [`LAYOUT`], then [`INNER`], each
//! across the whole dirty set. Layout reads tokenized content produced by
//! parsing, and inner visuals are placed against the finished layout.
//!
//! None of the channels propagate through the tree on their own. Callers that
//! need a subtree or the highest ancestor re-laid out mark those components
//! explicitly.

use understory_dirty::Channel;

/// Content must be re-tokenized (text, inline-block sizing).
pub const PARSING: Channel = Channel::new(0);

/// Box sizes and child placement must be recomputed.
pub const LAYOUT: Channel = Channel::new(1);

/// Inner visuals (colors, opacities, backgrounds, z-offset) must be rebuilt.
pub const INNER: Channel = Channel::new(2);
