use koi_gpu::{TRANSFORM_SIZE, Transform};

use crate::error::UniformError;

pub const U_TRANSFORM: &str = "u_transform";

/// Storage order of a flat 16-float matrix handed in by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixLayout {
    /// `m[0..4]` is the first column. The order the shader consumes.
    #[default]
    ColumnMajor,
    RowMajor,
}

/// Per-draw uniform values. Read by value when a draw starts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Uniforms {
    transform: Option<Transform>,
}

impl Uniforms {
    pub fn set_transform(&mut self, transform: Transform) -> &mut Self {
        self.transform = Some(transform);
        self
    }

    pub fn set_transform_array(&mut self, m: &[f32; 16], layout: MatrixLayout) -> &mut Self {
        let transform = match layout {
            MatrixLayout::ColumnMajor => Transform::from_cols_array(m),
            MatrixLayout::RowMajor => Transform::from_rows_array(m),
        };
        self.set_transform(transform)
    }

    /// Raw uniform-slot bytes, column-major.
    pub fn set_transform_buffer(&mut self, bytes: &[u8]) -> Result<&mut Self, UniformError> {
        let bytes: &[u8; TRANSFORM_SIZE] =
            bytes.try_into().map_err(|_| UniformError::BufferSize {
                name: U_TRANSFORM,
                expected: TRANSFORM_SIZE,
                actual: bytes.len(),
            })?;
        Ok(self.set_transform(Transform::from_buffer(bytes)))
    }

    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    pub fn clear(&mut self) {
        self.transform = None;
    }
}
