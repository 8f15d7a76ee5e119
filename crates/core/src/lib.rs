//! # morphrec Core
//!
//! Core types and traits for the morphrec geodesic reconstruction library.
//!
//! This crate provides:
//! - `Grid<T>`: dense 2-D / 3-D sample grid in raster order
//! - `Sample`: trait bounding the scalar types the algorithms accept
//! - `Connectivity`: 4/8 (2-D) and 6/26 (3-D) neighbour offsets, split by scan order
//! - `Lattice`: shape arithmetic shared by both dimensionalities
//! - Algorithm trait for consistent API

pub mod error;
pub mod grid;

pub use error::{Error, Result};
pub use grid::{Connectivity, Grid, Lattice, Offset, PackedSample, Sample};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::grid::{Connectivity, Grid, Lattice, PackedSample, Sample};
    pub use crate::Algorithm;
}

/// Core trait for all algorithms in morphrec.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(
        &self,
        input: Self::Input,
        params: Self::Params,
    ) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(
        &self,
        input: Self::Input,
    ) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
