// Copyright 2026 the Mullion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Component tree data model.
//!
//! A *component* is a node of the host scene graph. UI components (those
//! with [`Roles::UI`]) additionally carry:
//!
//! - An identity ([`ComponentId`]): a generational handle that becomes stale
//!   when the component is removed, preventing use-after-free bugs at the API
//!   level.
//! - Topology: parent, first-child, and sibling links forming an ordered tree.
//!   Plain (non-UI) nodes take part in the topology and in world transforms
//!   but interrupt attribute cascading.
//! - **Attributes** assigned through [`set`](ComponentTree::set) and read
//!   through the resolver getters ([`font_size`](ComponentTree::font_size),
//!   [`background_color`](ComponentTree::background_color), ...).
//! - **States**: named attribute bundles entered with
//!   [`set_state`](ComponentTree::set_state).
//! - **Clipping planes** derived on demand from ancestor overflow with
//!   [`clipping_planes`](ComponentTree::clipping_planes).
//!
//! Components are stored in struct-of-arrays layout with index-based handles.
//!
//! # Scheduling
//!
//! Attribute changes request update classes (see [`dirty`](crate::dirty))
//! from the tree's [`UpdateScheduler`](crate::scheduler::UpdateScheduler).
//! [`update`](ComponentTree::update) drains them once per frame:
//!
//! - **PARSING** for content, break characters, and inline-block sizing.
//! - **LAYOUT** for anything that moves or resizes boxes; the highest
//!   parent is always re-laid out along with the component.
//! - **INNER** for colors, opacities, backgrounds, and z offset.

mod clip;
mod dispatch;
mod id;
mod resolve;
mod roles;
mod state;
mod traverse;
mod tree;

pub use clip::ClipPlane;
pub use id::{ComponentId, ContainerId, FontFamilyId, INVALID, TextureId};
pub use roles::Roles;
pub use state::{StateBundle, StateError, StateTable};
pub use traverse::{Children, Subtree};
pub use tree::ComponentTree;
