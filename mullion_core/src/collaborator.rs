// Copyright 2026 the Mullion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contracts for the layout, rendering, and resource collaborators.
//!
//! `mullion_core` decides *what* must be recomputed and *when*. The work
//! itself belongs to collaborators that plug in through these traits:
//!
//! - **Update passes** implement [`UpdatePasses`]. The tree drives them once
//!   per frame from [`ComponentTree::update`], in pass order.
//! - **Resource disposal** implements [`ResourceDisposer`]. Teardown via
//!   [`ComponentTree::clear`] hands every owned geometry and material to it.
//! - **Font loading** implements [`FontLoader`](crate::font::FontLoader).
//!
//! # Frame loop pseudocode
//!
//! ```rust,ignore
//! fn on_frame(tree: &mut ComponentTree) {
//!     // Application code mutates attributes.
//!     tree.set(button, [Attribute::BackgroundColor(hover_color)]);
//!
//!     // Hand new font requests to the loader; install finished ones.
//!     fonts.service(tree);
//!
//!     // Parsing, then layout, then inner visuals.
//!     tree.update(&mut passes);
//!
//!     // Rendering reads clip planes on demand.
//!     for id in visible { renderer.draw(id, &tree.clipping_planes(id)); }
//! }
//! ```
//!
//! [`ComponentTree::update`]: crate::component::ComponentTree::update
//! [`ComponentTree::clear`]: crate::component::ComponentTree::clear

use core::fmt;

use crate::component::{ComponentId, ComponentTree};

/// Recomputes component visuals when the scheduler says so.
///
/// Every method receives the tree by shared reference and reads the current
/// attribute values through the resolver getters; the values at request time
/// are never replayed. All methods default to no-ops.
pub trait UpdatePasses {
    /// Re-tokenizes the content of `id`.
    fn parse(&mut self, tree: &ComponentTree, id: ComponentId) {
        _ = (tree, id);
    }

    /// Recomputes the box and child placement of `id`.
    fn layout(&mut self, tree: &ComponentTree, id: ComponentId) {
        _ = (tree, id);
    }

    /// Rebuilds the inner visuals of `id`.
    fn update_inner(&mut self, tree: &ComponentTree, id: ComponentId) {
        _ = (tree, id);
    }
}

/// An opaque handle to a renderer-managed resource.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceKey(pub u64);

impl fmt::Debug for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceKey({})", self.0)
    }
}

/// A visual resource owned by one component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisualResource {
    /// Mesh geometry (background frame, glyph quads).
    Geometry(ResourceKey),
    /// Shader material.
    Material(ResourceKey),
}

/// Releases visual resources during teardown.
pub trait ResourceDisposer {
    /// Releases `resource`, which belonged to `component`.
    fn dispose(&mut self, component: ComponentId, resource: VisualResource);
}

impl<F: FnMut(ComponentId, VisualResource)> ResourceDisposer for F {
    fn dispose(&mut self, component: ComponentId, resource: VisualResource) {
        self(component, resource);
    }
}
