//! Flood fill and connected-component labeling
//!
//! These routines share [`Grid`](morphrec_core::Grid) and
//! [`Connectivity`](morphrec_core::Connectivity) with the reconstruction
//! engine but need no worklist revisits: every cell is settled on first visit.

mod components;
mod flood_fill;

pub use components::{label_components, ComponentLabels, LabelComponents, LabelParams};
pub use flood_fill::flood_fill;
