// Copyright 2026 the Mullion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Component and payload identity types.

use core::fmt;

/// Sentinel value indicating "no component" in index fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to a node in a [`ComponentTree`](super::ComponentTree).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after a node is removed and the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId {
    /// Slot index into the tree's arrays.
    pub(crate) idx: u32,
    /// Generation counter; must match the tree's generation for this slot.
    pub(crate) generation: u32,
}

impl ComponentId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentId({}@gen{})", self.idx, self.generation)
    }
}

/// An opaque reference to a host-side renderable object (mesh group, frame).
///
/// A node carrying `Some(ContainerId)` anchors the visuals of every UI
/// descendant that has no payload of its own.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(pub u32);

impl fmt::Debug for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContainerId({})", self.0)
    }
}

/// An opaque reference to a texture owned by the host renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// An opaque reference to a loaded font family (glyph metrics and atlas
/// layout) owned by the font system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontFamilyId(pub u32);
