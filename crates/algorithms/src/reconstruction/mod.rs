//! Morphological geodesic reconstruction
//!
//! - **Reconstruction by dilation**: propagate marker maxima, bounded above by the mask
//! - **Reconstruction by erosion**: propagate marker minima, bounded below by the mask
//!
//! Both run on one engine for every sample type, 2-D and 3-D grids, and
//! 4/8/6/26 connectivity.

mod control;
mod hybrid;
mod kind;
mod reconstruct;

pub use control::{Control, ProgressFn};
pub use hybrid::ReconstructionStats;
pub use kind::ReconstructionKind;
pub use reconstruct::{
    reconstruct, reconstruct_by_dilation, reconstruct_by_erosion, reconstruct_with, Reconstruct,
    ReconstructParams, Reconstruction,
};
