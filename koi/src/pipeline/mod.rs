//! Draw dispatch: one `transform` invocation per vertex.
//!
//! Invocations never see each other. They share only the `Transform`
//! captured when the draw starts, so results are identical for serial and
//! parallel dispatch and come back in invocation order.

use koi_gpu::{Color, Position, Transform, VertexOutput, vertex_stage};
use log::{debug, trace};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    error::{DrawError, PipelineError},
    program::Program,
    settings::{Dispatch, Settings},
    uniform::{U_TRANSFORM, Uniforms},
};

#[cfg(feature = "spirv")]
pub const TRANSFORM_SHADER: &[u8] = include_bytes!(env!("transform.spv"));

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexInput {
    pub position: Position,
    pub color: Color,
}

pub trait VertexShader: Sync {
    fn exec(&self, input: VertexInput) -> VertexOutput;
}

/// The `transform` stage bound to one draw's uniforms.
#[derive(Debug, Clone, Copy)]
pub struct TransformShader {
    transform: Transform,
}

impl TransformShader {
    pub fn new(transform: Transform) -> Self {
        Self { transform }
    }

    pub fn bind(uniforms: &Uniforms) -> Result<Self, DrawError> {
        uniforms
            .transform()
            .copied()
            .map(Self::new)
            .ok_or(DrawError::UnboundUniform(U_TRANSFORM))
    }
}

impl VertexShader for TransformShader {
    fn exec(&self, input: VertexInput) -> VertexOutput {
        vertex_stage(input.position, input.color, &self.transform)
    }
}

pub struct Pipeline {
    program: Program,
    settings: Settings,
    #[cfg(feature = "parallel")]
    pool: Option<rayon::ThreadPool>,
}

impl Pipeline {
    pub fn new(program: Program, settings: Settings) -> Result<Self, PipelineError> {
        #[cfg(not(feature = "parallel"))]
        if settings.dispatch == Dispatch::Parallel {
            return Err(PipelineError::ParallelUnavailable);
        }

        #[cfg(feature = "parallel")]
        let pool = match (settings.dispatch, settings.threads) {
            (Dispatch::Parallel, Some(threads)) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("koi-vertex-{i}"))
                    .build()?,
            ),
            _ => None,
        };

        debug!(
            "koi::pipeline - created with {:?} dispatch, threads {:?}, chunk size {}",
            settings.dispatch, settings.threads, settings.chunk_size
        );

        Ok(Self {
            program,
            settings,
            #[cfg(feature = "parallel")]
            pool,
        })
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Non-indexed draw of vertices `first_vertex..first_vertex + vertex_count`.
    /// `buffers` is indexed by binding number.
    pub fn draw(
        &self,
        buffers: &[&[u8]],
        uniforms: &Uniforms,
        first_vertex: u32,
        vertex_count: u32,
    ) -> Result<Vec<VertexOutput>, DrawError> {
        let shader = TransformShader::bind(uniforms)?;

        let end = first_vertex
            .checked_add(vertex_count)
            .ok_or(DrawError::VertexRangeOverflow {
                first: first_vertex,
                count: vertex_count,
            })?;

        let available = self.available_vertices(buffers)?;
        if vertex_count > 0 && end as u64 > available {
            return Err(DrawError::BufferTooSmall {
                required: end as u64,
                available,
            });
        }

        let indices: Vec<u32> = (first_vertex..end).collect();
        self.run(&shader, buffers, &indices)
    }

    /// One invocation per entry of `indices`, outputs in the same order.
    pub fn draw_indexed(
        &self,
        buffers: &[&[u8]],
        uniforms: &Uniforms,
        indices: &[u32],
    ) -> Result<Vec<VertexOutput>, DrawError> {
        let shader = TransformShader::bind(uniforms)?;

        let available = self.available_vertices(buffers)?;
        if let Some(&index) = indices.iter().find(|&&index| index as u64 >= available) {
            return Err(DrawError::IndexOutOfRange { index, available });
        }

        self.run(&shader, buffers, indices)
    }

    /// Runs `shader` over `indices` without validating `buffers`; a fetch
    /// that falls outside them fails the whole draw.
    pub fn run<S: VertexShader>(
        &self,
        shader: &S,
        buffers: &[&[u8]],
        indices: &[u32],
    ) -> Result<Vec<VertexOutput>, DrawError> {
        trace!(
            "koi::pipeline - {} invocations, {:?} dispatch",
            indices.len(),
            self.settings.dispatch
        );

        let invoke = |&index: &u32| self.invoke(shader, buffers, index);

        let outputs: Option<Vec<VertexOutput>> = match self.settings.dispatch {
            #[cfg(feature = "parallel")]
            Dispatch::Parallel => {
                let job = || {
                    indices
                        .par_iter()
                        .with_min_len(self.settings.chunk_size)
                        .map(invoke)
                        .collect::<Option<Vec<_>>>()
                };
                match &self.pool {
                    Some(pool) => pool.install(job),
                    None => job(),
                }
            }
            _ => indices.iter().map(invoke).collect(),
        };

        outputs.ok_or(DrawError::OutOfBounds)
    }

    fn invoke<S: VertexShader>(
        &self,
        shader: &S,
        buffers: &[&[u8]],
        index: u32,
    ) -> Option<VertexOutput> {
        let layout = self.program.layout();
        let position = layout.fetch(self.program.position(), buffers, index)?;
        let color = layout.fetch(self.program.color(), buffers, index)?;
        Some(shader.exec(VertexInput { position, color }))
    }

    /// Vertices every binding the shader reads can back.
    fn available_vertices(&self, buffers: &[&[u8]]) -> Result<u64, DrawError> {
        let layout = self.program.layout();
        let mut available = u64::MAX;
        for binding in self.program.used_bindings() {
            let buffer = buffers
                .get(binding as usize)
                .ok_or(DrawError::MissingBuffer(binding))?;
            available = available.min(layout.capacity(binding, buffer.len()));
        }
        Ok(available)
    }
}
