//! Error types for morphrec

use thiserror::Error;

/// Main error type for morphrec operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid grid dimensions: shape {shape:?} holds {expected} cells, got {actual} values")]
    InvalidDimensions {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    #[error("Unsupported dimensionality: {0} (grids must be 2-D or 3-D)")]
    UnsupportedDimensionality(usize),

    #[error("Index out of bounds: {coord:?} in grid of shape {shape:?}")]
    IndexOutOfBounds {
        coord: Vec<usize>,
        shape: Vec<usize>,
    },

    #[error("Grid shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Dimension mismatch: expected {expected}-D, got {actual}-D")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid connectivity: {adjacency} is not a valid adjacency for {dims}-D grids")]
    InvalidConnectivity { adjacency: u8, dims: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}

/// Result type alias for morphrec operations
pub type Result<T> = std::result::Result<T, Error>;
