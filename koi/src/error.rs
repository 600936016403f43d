use thiserror::Error;

/// Rejected vertex layouts. Raised once by [`crate::program::Program::link`],
/// before any vertex is processed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("attribute `{name}` (location {location}) is not declared in the vertex layout")]
    MissingAttribute { name: &'static str, location: u32 },
    #[error("location {0} is declared more than once")]
    DuplicateLocation(u32),
    #[error("binding {0} is declared more than once")]
    DuplicateBinding(u32),
    #[error("attribute at location {location} refers to undeclared binding {binding}")]
    UndeclaredBinding { location: u32, binding: u32 },
    #[error("attribute at location {location} at offset {offset} overflows the address range")]
    AttributeOffsetOverflow { location: u32, offset: u32 },
    #[error("attribute at location {location} ends at byte {end}, past stride {stride} of binding {binding}")]
    AttributeOutsideStride {
        location: u32,
        binding: u32,
        end: u32,
        stride: u32,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UniformError {
    #[error("uniform `{name}` expects {expected} bytes, got {actual}")]
    BufferSize {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Host-side draw failures. All of them are detected before the first invocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("uniform `{0}` is not bound")]
    UnboundUniform(&'static str),
    #[error("no buffer bound at binding {0}")]
    MissingBuffer(u32),
    #[error("vertex range {first}+{count} overflows")]
    VertexRangeOverflow { first: u32, count: u32 },
    #[error("draw needs {required} vertices, bound buffers hold {available}")]
    BufferTooSmall { required: u64, available: u64 },
    #[error("index {index} is out of range, bound buffers hold {available} vertices")]
    IndexOutOfRange { index: u32, available: u64 },
    #[error("attribute fetch out of bounds")]
    OutOfBounds,
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[cfg(feature = "parallel")]
    #[error("failed to build vertex thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[cfg(not(feature = "parallel"))]
    #[error("parallel dispatch requested but the `parallel` feature is disabled")]
    ParallelUnavailable,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid dispatch mode `{0}`, expected `serial` or `parallel`")]
    InvalidDispatch(String),
    #[error("invalid thread count `{0}`, expected a positive integer")]
    InvalidThreads(String),
}
