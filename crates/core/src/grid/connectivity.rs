//! Lattice connectivities and their scan-order partitions
//!
//! A connectivity is the set of unit offsets that make two cells adjacent:
//! 4 or 8 in 2-D, 6 or 26 in 3-D. Offsets are split by their lexicographic
//! sign on `(z, y, x)`:
//! - **forward**: negative offsets, i.e. neighbours visited *before* the
//!   current cell by a raster scan
//! - **backward**: positive offsets, visited before the current cell by an
//!   anti-raster scan
//! - **full**: both halves

use crate::error::{Error, Result};

/// A neighbour offset `(dz, dy, dx)`. 2-D connectivities always have `dz == 0`.
pub type Offset = [isize; 3];

/// Neighbour offsets for one adjacency, precomputed once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connectivity {
    adjacency: u8,
    dims: usize,
    forward: Vec<Offset>,
    backward: Vec<Offset>,
    full: Vec<Offset>,
}

impl Connectivity {
    /// Create a connectivity from its adjacency number.
    ///
    /// Valid `(dims, adjacency)` pairs are (2, 4), (2, 8), (3, 6) and (3, 26).
    pub fn new(adjacency: u8, dims: usize) -> Result<Self> {
        match (dims, adjacency) {
            (2, 4) | (2, 8) | (3, 6) | (3, 26) => Ok(Self::generate(adjacency, dims)),
            _ => Err(Error::InvalidConnectivity { adjacency, dims }),
        }
    }

    /// 2-D face connectivity
    pub fn c4() -> Self {
        Self::generate(4, 2)
    }

    /// 2-D face, edge and corner connectivity
    pub fn c8() -> Self {
        Self::generate(8, 2)
    }

    /// 3-D face connectivity
    pub fn c6() -> Self {
        Self::generate(6, 3)
    }

    /// 3-D face, edge and corner connectivity
    pub fn c26() -> Self {
        Self::generate(26, 3)
    }

    /// Face connectivity for the given dimensionality (4 in 2-D, 6 in 3-D)
    pub fn default_for(dims: usize) -> Result<Self> {
        match dims {
            2 => Ok(Self::c4()),
            3 => Ok(Self::c6()),
            _ => Err(Error::UnsupportedDimensionality(dims)),
        }
    }

    fn generate(adjacency: u8, dims: usize) -> Self {
        let face_only = matches!(adjacency, 4 | 6);
        let dz_range = if dims == 3 { -1..=1 } else { 0..=0 };

        let mut full = Vec::with_capacity(adjacency as usize);
        for dz in dz_range {
            for dy in -1isize..=1 {
                for dx in -1isize..=1 {
                    let nonzero = [dz, dy, dx].iter().filter(|&&d| d != 0).count();
                    if nonzero == 0 || (face_only && nonzero != 1) {
                        continue;
                    }
                    full.push([dz, dy, dx]);
                }
            }
        }

        // full is in lexicographic order, so the forward half is a prefix
        let (forward, backward): (Vec<Offset>, Vec<Offset>) =
            full.iter().partition(|offset| is_lex_negative(offset));

        Self {
            adjacency,
            dims,
            forward,
            backward,
            full,
        }
    }

    /// Adjacency number (4, 8, 6 or 26)
    pub fn adjacency(&self) -> u8 {
        self.adjacency
    }

    /// Dimensionality this connectivity applies to
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Offsets preceding the centre in raster order
    pub fn forward(&self) -> &[Offset] {
        &self.forward
    }

    /// Offsets following the centre in raster order
    pub fn backward(&self) -> &[Offset] {
        &self.backward
    }

    /// All offsets, in lexicographic order
    pub fn full(&self) -> &[Offset] {
        &self.full
    }
}

fn is_lex_negative(offset: &Offset) -> bool {
    offset
        .iter()
        .find(|&&d| d != 0)
        .is_some_and(|&d| d < 0)
}
