// Copyright 2026 the Mullion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column-major 4×4 affine transform for host-graph nodes.
//!
//! Components sit inside a 3-D scene graph, so their placement is a full
//! affine transform. Only the operations the clipping compositor needs are
//! provided: composition, point mapping, and normal mapping.

use core::ops::Mul;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// A 3-D point or direction.
pub type Vec3 = [f64; 3];

/// A column-major 4×4 affine transform stored as `[[f64; 4]; 4]`.
///
/// Each inner array is one *column* of the matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform3d {
    /// Four columns, each a 4-element array `[x, y, z, w]`.
    pub cols: [[f64; 4]; 4],
}

impl Transform3d {
    /// The 4×4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Creates a pure translation transform.
    #[inline]
    #[must_use]
    pub const fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [x, y, z, 1.0],
            ],
        }
    }

    /// Creates a non-uniform scale transform.
    #[inline]
    #[must_use]
    pub const fn from_scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            cols: [
                [sx, 0.0, 0.0, 0.0],
                [0.0, sy, 0.0, 0.0],
                [0.0, 0.0, sz, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Creates a rotation around the Z axis (radians).
    #[inline]
    #[must_use]
    pub fn from_rotation_z(radians: f64) -> Self {
        #[cfg(feature = "std")]
        let (s, c) = radians.sin_cos();
        #[cfg(not(feature = "std"))]
        let (s, c) = (radians.sin(), radians.cos());
        Self {
            cols: [
                [c, s, 0.0, 0.0],
                [-s, c, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Maps a point through this transform (translation included).
    #[inline]
    #[must_use]
    pub const fn transform_point(&self, p: Vec3) -> Vec3 {
        let c = &self.cols;
        [
            c[0][0] * p[0] + c[1][0] * p[1] + c[2][0] * p[2] + c[3][0],
            c[0][1] * p[0] + c[1][1] * p[1] + c[2][1] * p[2] + c[3][1],
            c[0][2] * p[0] + c[1][2] * p[1] + c[2][2] * p[2] + c[3][2],
        ]
    }

    /// Maps a surface normal through this transform.
    ///
    /// Normals transform by the inverse transpose of the linear block, so
    /// non-uniform scales keep them perpendicular to their surface. The
    /// result is unit length. Returns `None` when the linear block is
    /// singular.
    #[must_use]
    pub fn transform_normal(&self, n: Vec3) -> Option<Vec3> {
        let [a0, a1, a2] = self.linear_columns();
        // Columns of det(A) * A^-T.
        let c0 = cross(a1, a2);
        let c1 = cross(a2, a0);
        let c2 = cross(a0, a1);
        let det = dot(a0, c0);
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let m = [
            (c0[0] * n[0] + c1[0] * n[1] + c2[0] * n[2]) / det,
            (c0[1] * n[0] + c1[1] * n[1] + c2[1] * n[2]) / det,
            (c0[2] * n[0] + c1[2] * n[1] + c2[2] * n[2]) / det,
        ];
        let len = dot(m, m).sqrt();
        if len == 0.0 {
            return None;
        }
        Some([m[0] / len, m[1] / len, m[2] / len])
    }

    const fn linear_columns(&self) -> [Vec3; 3] {
        let c = &self.cols;
        [
            [c[0][0], c[0][1], c[0][2]],
            [c[1][0], c[1][1], c[1][2]],
            [c[2][0], c[2][1], c[2][2]],
        ]
    }
}

impl Default for Transform3d {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform3d {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let a = &self.cols;
        let b = &rhs.cols;
        let mut out = [[0.0_f64; 4]; 4];
        let mut j = 0;
        while j < 4 {
            let mut i = 0;
            while i < 4 {
                out[j][i] =
                    a[0][i] * b[j][0] + a[1][i] * b[j][1] + a[2][i] * b[j][2] + a[3][i] * b[j][3];
                i += 1;
            }
            j += 1;
        }
        Self { cols: out }
    }
}

/// Dot product of two 3-vectors.
#[inline]
#[must_use]
pub const fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
const fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}
