//! Vertex buffer layouts and attribute fetch.
//!
//! Attributes narrower than four components are widened with the default
//! `(0, 0, 0, 1)`, so a three-float position gets `w = 1` and an RGB color gets
//! an opaque alpha. `Unorm8` channels are mapped to `[0, 1]`; nothing else is
//! converted or clamped.

use bytemuck::pod_read_unaligned;
use koi_gpu::glam::Vec4;

const DEFAULT_ATTRIBUTE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Float32,
    Float32x2,
    Float32x3,
    Float32x4,
    Unorm8x3,
    Unorm8x4,
}

impl Format {
    pub const fn components(self) -> usize {
        match self {
            Self::Float32 => 1,
            Self::Float32x2 => 2,
            Self::Float32x3 | Self::Unorm8x3 => 3,
            Self::Float32x4 | Self::Unorm8x4 => 4,
        }
    }

    pub const fn size(self) -> usize {
        match self {
            Self::Float32 | Self::Float32x2 | Self::Float32x3 | Self::Float32x4 => {
                self.components() * size_of::<f32>()
            }
            Self::Unorm8x3 | Self::Unorm8x4 => self.components(),
        }
    }

    /// `bytes` must hold at least [`Format::size`] bytes.
    fn read(self, bytes: &[u8]) -> Vec4 {
        let mut value = DEFAULT_ATTRIBUTE;
        let components = self.components();

        match self {
            Self::Float32 | Self::Float32x2 | Self::Float32x3 | Self::Float32x4 => {
                for (slot, chunk) in value
                    .iter_mut()
                    .zip(bytes.chunks_exact(size_of::<f32>()).take(components))
                {
                    *slot = pod_read_unaligned::<f32>(chunk);
                }
            }
            Self::Unorm8x3 | Self::Unorm8x4 => {
                for (slot, byte) in value.iter_mut().zip(bytes.iter().take(components)) {
                    *slot = *byte as f32 / u8::MAX as f32;
                }
            }
        }

        Vec4::from_array(value)
    }
}

/// One buffer slot. A `stride` of zero means tightly packed: the stride is
/// the end of the furthest attribute sourced from this binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub binding: u32,
    pub stride: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub location: u32,
    pub binding: u32,
    pub format: Format,
    pub offset: u32,
}

impl Attribute {
    /// First byte past the attribute. `None` if it does not fit in `u32`.
    pub fn end(&self) -> Option<u32> {
        self.offset.checked_add(self.format.size() as u32)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    pub bindings: Vec<Binding>,
    pub attributes: Vec<Attribute>,
}

impl Layout {
    pub fn binding(mut self, binding: u32, stride: u32) -> Self {
        self.bindings.push(Binding { binding, stride });
        self
    }

    pub fn attribute(mut self, location: u32, binding: u32, format: Format, offset: u32) -> Self {
        self.attributes.push(Attribute {
            location,
            binding,
            format,
            offset,
        });
        self
    }

    pub fn find_binding(&self, binding: u32) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.binding == binding)
    }

    pub fn find_attribute(&self, location: u32) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.location == location)
    }

    /// Bytes covered by one vertex on `binding`.
    pub fn extent(&self, binding: u32) -> u32 {
        self.attributes
            .iter()
            .filter(|a| a.binding == binding)
            .filter_map(Attribute::end)
            .max()
            .unwrap_or(0)
    }

    pub fn stride(&self, binding: u32) -> u32 {
        match self.find_binding(binding) {
            Some(b) if b.stride > 0 => b.stride,
            _ => self.extent(binding),
        }
    }

    /// Whole vertices a buffer of `len` bytes holds on `binding`.
    pub fn capacity(&self, binding: u32, len: usize) -> u64 {
        let extent = self.extent(binding) as u64;
        let stride = self.stride(binding) as u64;
        let len = len as u64;

        if extent == 0 || stride == 0 || len < extent {
            return 0;
        }
        (len - extent) / stride + 1
    }

    /// Reads `attribute` for vertex `index`. `buffers` is indexed by binding number.
    pub fn fetch(&self, attribute: &Attribute, buffers: &[&[u8]], index: u32) -> Option<Vec4> {
        let buffer = buffers.get(attribute.binding as usize)?;
        let start = index as usize * self.stride(attribute.binding) as usize
            + attribute.offset as usize;
        let bytes = buffer.get(start..start + attribute.format.size())?;
        Some(attribute.format.read(bytes))
    }
}
