#![cfg_attr(target_arch = "spirv", no_std)]

//! Types shared between the `transform` vertex shader and the host pipeline.
//!
//! Matrices are stored column-major and applied as `M·v`. A host that keeps
//! its matrices row-major must transpose before upload
//! ([`Transform::from_rows_array`] does this).

#[cfg(not(target_arch = "spirv"))]
use bytemuck::cast;

pub use spirv_std::glam;

use glam::{Mat4, Vec4};

/// Homogeneous object-space position, `a_position`.
pub type Position = Vec4;

/// RGBA vertex color, `a_color`. Not clamped.
pub type Color = Vec4;

/// Homogeneous clip-space position, `gl_Position`.
pub type ClipPosition = Vec4;

/// Color forwarded to the rasterizer, `v_color`.
pub type VaryingColor = Vec4;

/// The `u_transform` uniform: composed model/view/projection matrix.
#[cfg_attr(not(target_arch = "spirv"), derive(Debug, PartialEq))]
#[derive(Clone, Copy)]
#[repr(C)]
pub struct Transform {
    pub matrix: Mat4,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        matrix: Mat4::IDENTITY,
    };

    pub fn new(matrix: Mat4) -> Self {
        Self { matrix }
    }

    pub fn apply(&self, position: Position) -> ClipPosition {
        self.matrix * position
    }
}

#[cfg(not(target_arch = "spirv"))]
impl Transform {
    /// Sixteen floats, one column after another (`m[12..15]` is the translation).
    pub fn from_cols_array(m: &[f32; 16]) -> Self {
        Self::new(Mat4::from_cols_array(m))
    }

    /// Sixteen floats, one row after another. Transposed into column-major storage.
    pub fn from_rows_array(m: &[f32; 16]) -> Self {
        Self::new(Mat4::from_cols_array(m).transpose())
    }

    pub fn to_cols_array(&self) -> [f32; 16] {
        self.matrix.to_cols_array()
    }

    /// Byte image of the uniform slot: sixteen native-endian `f32`, column-major.
    pub fn as_buffer(&self) -> [u8; TRANSFORM_SIZE] {
        cast::<[f32; 16], [u8; TRANSFORM_SIZE]>(self.to_cols_array())
    }

    pub fn from_buffer(bytes: &[u8; TRANSFORM_SIZE]) -> Self {
        Self::from_cols_array(&cast::<[u8; TRANSFORM_SIZE], [f32; 16]>(*bytes))
    }
}

#[cfg(not(target_arch = "spirv"))]
impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg_attr(not(target_arch = "spirv"), derive(Debug, Default, PartialEq))]
#[derive(Clone, Copy)]
#[repr(C)]
pub struct VertexOutput {
    pub clip_position: ClipPosition,
    pub color: VaryingColor,
}

/// One vertex invocation. Pure: reads only its arguments, writes only its result.
pub fn vertex_stage(position: Position, color: Color, transform: &Transform) -> VertexOutput {
    VertexOutput {
        clip_position: transform.apply(position),
        color,
    }
}

#[cfg(not(target_arch = "spirv"))]
pub const TRANSFORM_SIZE: usize = size_of::<[f32; 16]>();
