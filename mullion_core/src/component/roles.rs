// Copyright 2026 the Mullion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Role capability sets.

use core::fmt;
use core::ops::{BitOr, BitOrAssign};

/// The roles a node plays in the UI.
///
/// Roles are capabilities rather than a closed kind: a text span is both
/// [`TEXT`](Self::TEXT) and [`INLINE`](Self::INLINE), and an inline-block is
/// both [`INLINE_BLOCK`](Self::INLINE_BLOCK) and [`INLINE`](Self::INLINE).
/// Nodes without [`UI`](Self::UI) are plain host-graph objects.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Roles(u8);

impl Roles {
    /// A plain host-graph object.
    pub const NONE: Self = Self(0);
    /// Participates in attribute cascading and update scheduling.
    pub const UI: Self = Self(1 << 0);
    /// Lays out children and may clip them.
    pub const BLOCK: Self = Self(1 << 1);
    /// Carries tokenized text content.
    pub const TEXT: Self = Self(1 << 2);
    /// Flows inline inside its parent rather than being placed independently.
    pub const INLINE: Self = Self(1 << 3);
    /// An inline element with its own box (image, icon).
    pub const INLINE_BLOCK: Self = Self(1 << 4);

    /// Roles of a block container.
    #[must_use]
    pub const fn block() -> Self {
        Self(Self::UI.0 | Self::BLOCK.0)
    }

    /// Roles of a text span.
    #[must_use]
    pub const fn text() -> Self {
        Self(Self::UI.0 | Self::TEXT.0 | Self::INLINE.0)
    }

    /// Roles of an inline-block.
    #[must_use]
    pub const fn inline_block() -> Self {
        Self(Self::UI.0 | Self::INLINE_BLOCK.0 | Self::INLINE.0)
    }

    /// Returns whether every role in `other` is present.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Shorthand for `contains(Roles::UI)`.
    #[inline]
    #[must_use]
    pub const fn is_ui(self) -> bool {
        self.contains(Self::UI)
    }
}

impl BitOr for Roles {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Roles {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Roles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(Roles, &str); 5] = [
            (Roles::UI, "UI"),
            (Roles::BLOCK, "BLOCK"),
            (Roles::TEXT, "TEXT"),
            (Roles::INLINE, "INLINE"),
            (Roles::INLINE_BLOCK, "INLINE_BLOCK"),
        ];
        let mut set = f.debug_set();
        for (role, name) in NAMES {
            if self.contains(role) {
                let _ = set.entry(&format_args!("{name}"));
            }
        }
        set.finish()
    }
}
