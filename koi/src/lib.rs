//! Host-side reference pipeline for the `transform` vertex shader.
//!
//! A [`program::Program`] checks a vertex [`vertex::Layout`] against the
//! shader interface, a [`pipeline::Pipeline`] runs draws over host buffers
//! with the per-draw [`uniform::Uniforms`].

pub mod error;
pub mod pipeline;
pub mod program;
pub mod settings;
pub mod uniform;
pub mod vertex;

pub use koi_gpu as gpu;
