//! # morphrec Algorithms
//!
//! Geodesic reconstruction and the grid routines built alongside it.
//!
//! ## Available Algorithm Categories
//!
//! - **reconstruction**: reconstruction by dilation / erosion (hybrid engine)
//! - **labeling**: flood fill, connected-component labeling

pub mod labeling;
mod maybe_rayon;
pub mod reconstruction;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::labeling::{flood_fill, label_components, ComponentLabels, LabelComponents};
    pub use crate::reconstruction::{
        reconstruct, reconstruct_by_dilation, reconstruct_by_erosion, reconstruct_with, Control,
        Reconstruct, ReconstructParams, Reconstruction, ReconstructionKind, ReconstructionStats,
    };
    pub use morphrec_core::prelude::*;
}
