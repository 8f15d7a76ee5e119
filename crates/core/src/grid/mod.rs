//! Grid data structures and lattice neighbourhoods

mod connectivity;
mod dense;
mod lattice;
mod sample;

pub use connectivity::{Connectivity, Offset};
pub use dense::{Grid, GridStatistics};
pub use lattice::Lattice;
pub use sample::{PackedSample, Sample};
