// Copyright 2026 the Mullion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coalescing update scheduler.
//!
//! The [`UpdateScheduler`] keeps the set of live (registered) components and,
//! for each, which of the three update classes are pending. It holds
//! generational [`ComponentId`]s only, never the components themselves, so a
//! component the tree has destroyed can never be updated through a stale
//! registration.
//!
//! Requests OR into the pending set: once a class is pending for a
//! component, requesting it again before the next [`flush`] changes nothing.
//! A flush drains every class and hands the work out pass by pass (see
//! [`dirty`](crate::dirty)).
//!
//! [`flush`]: UpdateScheduler::flush

use alloc::vec::Vec;
use core::ops::{BitOr, BitOrAssign};

use hashbrown::HashMap;
use understory_dirty::{Channel, CycleHandling, DirtyTracker};

use crate::component::ComponentId;
use crate::dirty;

/// Which update classes a request asks for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct UpdateFlags {
    /// Re-tokenize content.
    pub parsing: bool,
    /// Recompute box sizes and placement.
    pub layout: bool,
    /// Rebuild inner visuals.
    pub inner: bool,
}

impl UpdateFlags {
    /// No update.
    pub const NONE: Self = Self::new(false, false, false);
    /// Parsing only.
    pub const PARSING: Self = Self::new(true, false, false);
    /// Layout only.
    pub const LAYOUT: Self = Self::new(false, true, false);
    /// Inner visuals only.
    pub const INNER: Self = Self::new(false, false, true);
    /// Every class.
    pub const ALL: Self = Self::new(true, true, true);

    /// Creates a flag set from its three classes.
    #[must_use]
    pub const fn new(parsing: bool, layout: bool, inner: bool) -> Self {
        Self {
            parsing,
            layout,
            inner,
        }
    }

    /// Returns whether no class is requested.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        !(self.parsing || self.layout || self.inner)
    }
}

impl BitOr for UpdateFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::new(
            self.parsing || rhs.parsing,
            self.layout || rhs.layout,
            self.inner || rhs.inner,
        )
    }
}

impl BitOrAssign for UpdateFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

/// The work drained by one [`UpdateScheduler::flush`].
///
/// Each list is in ascending slot order and contains a component at most
/// once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateBatch {
    /// Components due for parsing.
    pub parsing: Vec<ComponentId>,
    /// Components due for layout.
    pub layout: Vec<ComponentId>,
    /// Components due for inner-visual updates.
    pub inner: Vec<ComponentId>,
    /// Drained entries whose component was no longer registered.
    pub stale: u32,
}

impl UpdateBatch {
    /// Clears all lists.
    pub fn clear(&mut self) {
        self.parsing.clear();
        self.layout.clear();
        self.inner.clear();
        self.stale = 0;
    }

    /// Returns whether the batch holds no work.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parsing.is_empty() && self.layout.is_empty() && self.inner.is_empty()
    }
}

/// Registry of live components and their pending update classes.
#[derive(Debug)]
pub struct UpdateScheduler {
    /// Slot index -> generation of the registered component.
    live: HashMap<u32, u32>,
    dirty: DirtyTracker<u32>,
}

impl Default for UpdateScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateScheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            live: HashMap::new(),
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
        }
    }

    /// Adds a component to the live set.
    ///
    /// Returns `false` if it was already registered. A registration left
    /// behind by a previous occupant of the same slot is replaced.
    pub fn register(&mut self, id: ComponentId) -> bool {
        match self.live.insert(id.idx, id.generation) {
            Some(generation) if generation == id.generation => false,
            Some(_) => {
                self.dirty.remove_key(id.idx);
                true
            }
            None => true,
        }
    }

    /// Returns whether `id` is in the live set.
    #[must_use]
    pub fn is_registered(&self, id: ComponentId) -> bool {
        self.live.get(&id.idx) == Some(&id.generation)
    }

    /// Number of registered components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Returns whether no component is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Marks the requested classes pending for `id`.
    ///
    /// Returns `false`, and does nothing, if `id` is not registered.
    pub fn request_update(&mut self, id: ComponentId, flags: UpdateFlags) -> bool {
        if !self.is_registered(id) {
            return false;
        }
        if flags.parsing {
            self.dirty.mark(id.idx, dirty::PARSING);
        }
        if flags.layout {
            self.dirty.mark(id.idx, dirty::LAYOUT);
        }
        if flags.inner {
            self.dirty.mark(id.idx, dirty::INNER);
        }
        true
    }

    /// Removes `id` from the live set, discarding its pending classes.
    ///
    /// Returns `false`, and does nothing, if `id` is not registered.
    pub fn dispose(&mut self, id: ComponentId) -> bool {
        if !self.is_registered(id) {
            return false;
        }
        self.live.remove(&id.idx);
        self.dirty.remove_key(id.idx);
        true
    }

    /// Drains every pending class.
    pub fn flush(&mut self) -> UpdateBatch {
        let mut batch = UpdateBatch::default();
        self.flush_into(&mut batch);
        batch
    }

    /// Like [`flush`](Self::flush), but reuses a caller-provided buffer.
    pub fn flush_into(&mut self, batch: &mut UpdateBatch) {
        batch.clear();
        batch.stale += self.drain_channel(dirty::PARSING, &mut batch.parsing);
        batch.stale += self.drain_channel(dirty::LAYOUT, &mut batch.layout);
        batch.stale += self.drain_channel(dirty::INNER, &mut batch.inner);
    }

    /// Drains one channel into `out`, returning how many entries were stale.
    fn drain_channel(&mut self, channel: Channel, out: &mut Vec<ComponentId>) -> u32 {
        let mut drained: Vec<u32> = self.dirty.drain(channel).deterministic().run().collect();
        drained.sort_unstable();
        let mut stale = 0;
        for idx in drained {
            match self.live.get(&idx) {
                Some(&generation) => out.push(ComponentId { idx, generation }),
                None => stale += 1,
            }
        }
        stale
    }
}
