// Copyright 2026 the Mullion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute resolution and update scheduling for retained-mode 3D UI.
//!
//! `mullion_core` is the part of a spatial UI toolkit that decides *what* a
//! component looks like (cascading attribute lookup), *when* it must be
//! recomputed (a coalescing three-class update scheduler), and *where* it is
//! visible (clip planes composed from ancestor overflow). Text layout, mesh
//! building, and font loading plug in through traits. It is `no_std`
//! compatible (with `alloc`) and uses struct-of-arrays storage with index
//! handles.
//!
//! # Architecture
//!
//! Application code mutates attributes; the tree turns the mutations into
//! pending update classes and drains them once per frame:
//!
//! ```text
//!   set() / set_state() / add()
//!       │
//!       ▼
//!   Attributes ──► UpdateScheduler (PARSING │ LAYOUT │ INNER)
//!       ▲                  │
//!       │                  ▼  ComponentTree::update()
//!   resolve_font()     parse ─► layout ─► update_inner   (UpdatePasses)
//!       ▲
//!   FontLibrary ◄── take_font_requests()
//! ```
//!
//! **[`component`]**: Struct-of-arrays component tree with generational
//! handles, resolver getters, attribute dispatch, named states, and clipping
//! planes.
//!
//! **[`attributes`]**: Attribute vocabulary, value types, and per-component
//! override storage.
//!
//! **[`defaults`]**: The default table every resolver falls back to.
//!
//! **[`scheduler`]**: Registration and coalescing of update requests.
//!
//! **[`dirty`]**: The three update-class channels and their pass order.
//!
//! **[`collaborator`]**: The [`UpdatePasses`](collaborator::UpdatePasses)
//! and [`ResourceDisposer`](collaborator::ResourceDisposer) traits that
//! layout and rendering implement.
//!
//! **[`font`]**: Asynchronous font requests, tickets, and a caching
//! [`FontLibrary`](font::FontLibrary).
//!
//! **[`transform`]**: 3D affine transform type for world composition and
//! plane mapping.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! update-loop instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod attributes;
pub mod collaborator;
pub mod component;
pub mod defaults;
pub mod dirty;
pub mod font;
pub mod scheduler;
pub mod trace;
pub mod transform;

#[cfg(test)]
mod tests {
    //! End-to-end scenarios across resolver, dispatch, states, and teardown.

    use alloc::vec;
    use alloc::vec::Vec;

    use crate::attributes::{Attribute, Color};
    use crate::collaborator::{ResourceKey, UpdatePasses, VisualResource};
    use crate::component::{ComponentId, ComponentTree, Roles, StateBundle, StateError};
    use crate::defaults::Defaults;
    use crate::scheduler::UpdateFlags;

    /// Reads live values during the passes, as a layout engine would.
    #[derive(Default)]
    struct SizeProbe {
        log: Vec<(&'static str, ComponentId, f64)>,
    }

    impl UpdatePasses for SizeProbe {
        fn parse(&mut self, tree: &ComponentTree, id: ComponentId) {
            self.log.push(("parse", id, tree.font_size(id)));
        }

        fn layout(&mut self, tree: &ComponentTree, id: ComponentId) {
            self.log.push(("layout", id, tree.font_size(id)));
        }

        fn update_inner(&mut self, tree: &ComponentTree, id: ComponentId) {
            self.log.push(("inner", id, tree.font_size(id)));
        }
    }

    #[test]
    fn fresh_block_resolves_defaults() {
        let mut tree = ComponentTree::new();
        let a = tree.create(Roles::block());
        assert_eq!(tree.font_size(a), Defaults::default().font_size);
    }

    #[test]
    fn child_inherits_and_only_parent_is_pending() {
        let mut tree = ComponentTree::new();
        let a = tree.create(Roles::block());
        let b = tree.create(Roles::block());
        tree.add(a, &[b]);

        tree.set(a, [Attribute::FontSize(12.0)]);
        tree.set(b, []);
        assert_eq!(tree.font_size(b), 12.0);

        let mut probe = SizeProbe::default();
        tree.update(&mut probe);
        assert_eq!(probe.log, vec![("layout", a, 12.0)]);
    }

    #[test]
    fn hover_state_sets_background_and_inner_pass() {
        let mut tree = ComponentTree::new();
        let a = tree.create(Roles::block());
        tree.setup_state(
            a,
            "hover",
            StateBundle::new([Attribute::BackgroundColor("#f00".parse().unwrap())]),
        );
        tree.set_state(a, "hover").unwrap();
        assert_eq!(tree.background_color(a), Color::from_hex(0xff0000));

        let batch = tree.update(&mut SizeProbe::default());
        assert_eq!(batch.inner, vec![a]);
    }

    #[test]
    fn unknown_state_sets_no_flags() {
        let mut tree = ComponentTree::new();
        let a = tree.create(Roles::block());
        assert!(matches!(
            tree.set_state(a, "unknown"),
            Err(StateError::Unknown { .. })
        ));
        assert_eq!(tree.current_state(a), None);
        assert!(tree.update(&mut SizeProbe::default()).is_empty());
    }

    #[test]
    fn passes_read_values_current_at_flush() {
        let mut tree = ComponentTree::new();
        let a = tree.create(Roles::block());
        tree.set(a, [Attribute::FontSize(0.1)]);
        tree.set(a, [Attribute::FontSize(0.2)]);

        let mut probe = SizeProbe::default();
        tree.update(&mut probe);
        assert_eq!(probe.log, vec![("layout", a, 0.2)]);
    }

    #[test]
    fn parsing_finishes_everywhere_before_layout_starts() {
        let mut tree = ComponentTree::new();
        let parent = tree.create(Roles::block());
        let child = tree.create(Roles::block());
        tree.add(parent, &[child]);
        tree.request_update(child, UpdateFlags::ALL);
        tree.request_update(parent, UpdateFlags::ALL);

        let mut probe = SizeProbe::default();
        tree.update(&mut probe);
        let stages: Vec<_> = probe.log.iter().map(|(stage, _, _)| *stage).collect();
        assert_eq!(
            stages,
            vec!["parse", "parse", "layout", "layout", "inner", "inner"]
        );
    }

    #[test]
    fn teardown_silences_the_whole_subtree() {
        let mut tree = ComponentTree::new();
        let root = tree.create(Roles::block());
        let panel = tree.create(Roles::block());
        let label = tree.create(Roles::text());
        tree.add(root, &[panel]);
        tree.add(panel, &[label]);
        tree.attach_visual(label, VisualResource::Geometry(ResourceKey(11)));

        let mut released = 0;
        tree.clear(panel, &mut |_: ComponentId, _: VisualResource| released += 1);
        assert_eq!(released, 1);

        for id in [panel, label] {
            assert!(!tree.request_update(id, UpdateFlags::ALL));
        }
        let batch = tree.update(&mut SizeProbe::default());
        assert!(batch.is_empty());
    }

    #[test]
    fn removed_subtree_leaves_no_registrations() {
        let mut tree = ComponentTree::new();
        let root = tree.create(Roles::block());
        let panel = tree.create(Roles::block());
        let label = tree.create(Roles::text());
        tree.add(root, &[panel]);
        tree.add(panel, &[label]);
        tree.set(label, [Attribute::Content("x".into())]);

        tree.remove(panel);
        assert_eq!(tree.scheduler().len(), 1);
        let batch = tree.update(&mut SizeProbe::default());
        assert_eq!(batch.layout, vec![root]);
        assert!(batch.parsing.is_empty());
    }
}
