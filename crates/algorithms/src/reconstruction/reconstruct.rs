//! Geodesic reconstruction of a marker grid under a mask grid
//!
//! Reconstruction by dilation repeatedly dilates the marker while keeping it
//! below the mask, until stability; reconstruction by erosion is the dual.
//! The fixpoint is reached directly by the hybrid engine in [`super::hybrid`].

use std::marker::PhantomData;

use morphrec_core::{Algorithm, Connectivity, Error, Grid, Result, Sample};

use crate::maybe_rayon::*;

use super::control::Control;
use super::hybrid::{Engine, ReconstructionStats};
use super::kind::ReconstructionKind;

/// Parameters for geodesic reconstruction
#[derive(Debug, Clone, Default)]
pub struct ReconstructParams {
    /// Dilation (default) or erosion
    pub kind: ReconstructionKind,
    /// Neighbourhood; `None` selects face connectivity for the grid's rank
    pub connectivity: Option<Connectivity>,
    /// Optional region of interest; cells outside it are never written
    pub roi: Option<Grid<bool>>,
}

/// Reconstructed grid together with the engine's counters
#[derive(Debug, Clone)]
pub struct Reconstruction<T> {
    pub grid: Grid<T>,
    pub stats: ReconstructionStats,
}

/// Geodesic reconstruction algorithm over `(marker, mask)` pairs
pub struct Reconstruct<T>(PhantomData<fn() -> T>);

impl<T> Reconstruct<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Reconstruct<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Reconstruct<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Reconstruct<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Reconstruct")
    }
}

impl<T: Sample> Algorithm for Reconstruct<T> {
    type Input = (Grid<T>, Grid<T>);
    type Output = Grid<T>;
    type Params = ReconstructParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Reconstruct"
    }

    fn description(&self) -> &'static str {
        "Geodesic reconstruction of a marker under a mask (hybrid scan and FIFO propagation)"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let (marker, mask) = input;
        let connectivity = match params.connectivity {
            Some(connectivity) => connectivity,
            None => Connectivity::default_for(marker.dims())?,
        };
        reconstruct(&marker, &mask, params.kind, &connectivity, params.roi.as_ref())
    }
}

/// Geodesic reconstruction of `marker` under `mask`.
///
/// For [`ReconstructionKind::Dilation`] the result is the largest grid below
/// `mask` reachable by propagating marker values through `connectivity`;
/// erosion is the dual (smallest grid above `mask`).
///
/// When `roi` is given, only cells where it is `true` are initialised and
/// updated. The others keep their marker value and still act as neighbours;
/// that value is not clamped by the mask, so an out-of-ROI marker cell is an
/// unconstrained seed for its in-ROI neighbours (which are still clamped by
/// their own mask values).
///
/// With the `parallel` feature (on by default) the NaN check and the
/// per-cell initialisation run on the rayon global pool; the scans and the
/// worklist drain always run on the calling thread. The call blocks until
/// the result is complete.
///
/// # Errors
/// - [`Error::ShapeMismatch`] if mask or roi differ in shape from marker
/// - [`Error::DimensionMismatch`] if `connectivity` is for another rank
/// - [`Error::InvalidInput`] if marker or mask contain NaN
///
/// All checks run before any output is allocated.
pub fn reconstruct<T: Sample>(
    marker: &Grid<T>,
    mask: &Grid<T>,
    kind: ReconstructionKind,
    connectivity: &Connectivity,
    roi: Option<&Grid<bool>>,
) -> Result<Grid<T>> {
    reconstruct_with(marker, mask, kind, connectivity, roi, &Control::new())
        .map(|reconstruction| reconstruction.grid)
}

/// [`reconstruct`] with progress and cancellation hooks, returning counters.
///
/// # Errors
/// As [`reconstruct`], plus [`Error::Cancelled`] when the control's flag is
/// raised. A cancelled run yields no grid.
pub fn reconstruct_with<T: Sample>(
    marker: &Grid<T>,
    mask: &Grid<T>,
    kind: ReconstructionKind,
    connectivity: &Connectivity,
    roi: Option<&Grid<bool>>,
    control: &Control<'_>,
) -> Result<Reconstruction<T>> {
    validate(marker, mask, connectivity, roi)?;
    control.checkpoint()?;

    let engine = Engine::new(marker, mask, kind, connectivity, roi, *control);
    let (values, stats) = engine.run()?;

    tracing::debug!(
        ?kind,
        adjacency = connectivity.adjacency(),
        shape = ?marker.shape(),
        writes = stats.writes(),
        enqueued = stats.enqueued,
        "reconstruction complete"
    );

    Ok(Reconstruction {
        grid: Grid::from_vec(marker.shape(), values)?,
        stats,
    })
}

/// Reconstruction by dilation without a region of interest
pub fn reconstruct_by_dilation<T: Sample>(
    marker: &Grid<T>,
    mask: &Grid<T>,
    connectivity: &Connectivity,
) -> Result<Grid<T>> {
    reconstruct(marker, mask, ReconstructionKind::Dilation, connectivity, None)
}

/// Reconstruction by erosion without a region of interest
pub fn reconstruct_by_erosion<T: Sample>(
    marker: &Grid<T>,
    mask: &Grid<T>,
    connectivity: &Connectivity,
) -> Result<Grid<T>> {
    reconstruct(marker, mask, ReconstructionKind::Erosion, connectivity, None)
}

fn validate<T: Sample>(
    marker: &Grid<T>,
    mask: &Grid<T>,
    connectivity: &Connectivity,
    roi: Option<&Grid<bool>>,
) -> Result<()> {
    marker.ensure_same_shape(mask)?;
    if let Some(roi) = roi {
        marker.ensure_same_shape(roi)?;
    }
    if connectivity.dims() != marker.dims() {
        return Err(Error::DimensionMismatch {
            expected: connectivity.dims(),
            actual: marker.dims(),
        });
    }
    ensure_orderable("marker", marker)?;
    ensure_orderable("mask", mask)
}

fn ensure_orderable<T: Sample>(name: &str, grid: &Grid<T>) -> Result<()> {
    if !T::is_float() {
        return Ok(());
    }
    let values = grid.as_slice();
    let first_nan = (0..values.len())
        .into_par_iter()
        .filter(|&i| !values[i].is_orderable())
        .min();
    match first_nan {
        Some(index) => Err(Error::InvalidInput(format!(
            "{} contains NaN at {:?}",
            name,
            grid.coord_of(index)
        ))),
        None => Ok(()),
    }
}
