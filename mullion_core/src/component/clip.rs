// Copyright 2026 the Mullion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clipping planes derived from ancestor overflow.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::transform::{Transform3d, Vec3, dot};

use super::id::ComponentId;
use super::roles::Roles;
use super::tree::ComponentTree;

/// A half-space `normal · p + constant >= 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipPlane {
    /// Unit normal pointing into the kept half-space.
    pub normal: Vec3,
    /// Signed offset along the normal.
    pub constant: f64,
}

impl ClipPlane {
    /// Creates a plane from its normal and constant.
    #[must_use]
    pub const fn new(normal: Vec3, constant: f64) -> Self {
        Self { normal, constant }
    }

    /// Signed distance from the plane to `p` (positive inside).
    #[must_use]
    pub const fn distance_to_point(&self, p: Vec3) -> f64 {
        dot(self.normal, p) + self.constant
    }

    /// Returns whether `p` is kept by this plane. Points on the plane are kept.
    #[must_use]
    pub const fn contains(&self, p: Vec3) -> bool {
        self.distance_to_point(p) >= 0.0
    }

    /// Maps the plane through `transform`.
    ///
    /// Returns `None` if the transform collapses the plane (singular linear
    /// block).
    #[must_use]
    pub fn transformed(&self, transform: &Transform3d) -> Option<Self> {
        let n = self.normal;
        let len_sq = dot(n, n);
        if len_sq == 0.0 {
            return None;
        }
        let k = -self.constant / len_sq;
        let on_plane = transform.transform_point([n[0] * k, n[1] * k, n[2] * k]);
        let normal = transform.transform_normal(n)?;
        Some(Self::new(normal, -dot(on_plane, normal)))
    }
}

/// The four planes bounding `rect` in the z = 0 plane: bottom, top, left,
/// right.
fn box_planes(rect: Rect) -> [ClipPlane; 4] {
    [
        ClipPlane::new([0.0, 1.0, 0.0], -rect.y0),
        ClipPlane::new([0.0, -1.0, 0.0], rect.y1),
        ClipPlane::new([1.0, 0.0, 0.0], -rect.x0),
        ClipPlane::new([-1.0, 0.0, 0.0], rect.x1),
    ]
}

impl ComponentTree {
    /// Computes the world-space clipping planes of a component.
    ///
    /// Walks up the UI parents. At each level, if the current component is a
    /// block and its parent hides overflow, the parent's content box (size
    /// minus padding, centered on its origin) contributes four planes mapped
    /// through the parent's live world transform. The nearest parent's
    /// planes come first.
    ///
    /// Parents without both a width and a height contribute nothing, and
    /// planes a singular transform collapses are dropped. Recomputed on every
    /// call; nothing is cached.
    #[must_use]
    pub fn clipping_planes(&self, id: ComponentId) -> Vec<ClipPlane> {
        let mut planes = Vec::new();
        self.clipping_planes_into(id, &mut planes);
        planes
    }

    /// Like [`clipping_planes`](Self::clipping_planes), but appends to a
    /// caller-provided buffer.
    pub fn clipping_planes_into(&self, id: ComponentId, out: &mut Vec<ClipPlane>) {
        self.validate(id);
        let mut at = id.idx;
        while let Some(parent) = self.ui_parent_idx(at) {
            if self.roles[at as usize].contains(Roles::BLOCK) {
                self.push_overflow_planes(parent, out);
            }
            at = parent;
        }
    }

    fn push_overflow_planes(&self, parent: u32, out: &mut Vec<ClipPlane>) {
        let attrs = &self.attributes[parent as usize];
        if !attrs.hidden_overflow.unwrap_or(self.defaults.hidden_overflow) {
            return;
        }
        let (Some(width), Some(height)) = (attrs.width, attrs.height) else {
            return;
        };
        let padding = attrs.padding.unwrap_or(0.0);
        let content = Rect::from_center_size(Point::ORIGIN, Size::new(width, height))
            .inset(-padding);
        let world = self.world_transform_at(parent);
        out.extend(
            box_planes(content)
                .iter()
                .filter_map(|plane| plane.transformed(&world)),
        );
    }
}
