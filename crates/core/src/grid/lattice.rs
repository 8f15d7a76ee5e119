//! Shape arithmetic shared by 2-D and 3-D grids
//!
//! A [`Lattice`] normalises any supported shape to three extents
//! `(depth, rows, cols)`; 2-D grids have a depth of one. Linear indices are
//! row-major, so increasing index is raster order on `(z, y, x)`.

use crate::error::{Error, Result};

use super::connectivity::Offset;

/// Normalised extents and strides of a dense grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lattice {
    depth: usize,
    rows: usize,
    cols: usize,
}

impl Lattice {
    /// Build from a grid shape (`[rows, cols]` or `[depth, rows, cols]`)
    pub fn from_shape(shape: &[usize]) -> Result<Self> {
        match *shape {
            [rows, cols] => Ok(Self {
                depth: 1,
                rows,
                cols,
            }),
            [depth, rows, cols] => Ok(Self { depth, rows, cols }),
            _ => Err(Error::UnsupportedDimensionality(shape.len())),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.depth * self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of scan lines (rows across all planes)
    pub fn scan_lines(&self) -> usize {
        self.depth * self.rows
    }

    /// Linear index of `(z, y, x)`; the caller guarantees it is in bounds
    #[inline]
    pub fn index(&self, z: usize, y: usize, x: usize) -> usize {
        (z * self.rows + y) * self.cols + x
    }

    /// Inverse of [`Lattice::index`]
    #[inline]
    pub fn coord(&self, index: usize) -> [usize; 3] {
        let x = index % self.cols;
        let rest = index / self.cols;
        [rest / self.rows, rest % self.rows, x]
    }

    /// Linear index of `(z, y, x) + offset`, or `None` outside the grid
    #[inline]
    pub fn neighbor(&self, z: usize, y: usize, x: usize, offset: &Offset) -> Option<usize> {
        let nz = shift(z, offset[0], self.depth)?;
        let ny = shift(y, offset[1], self.rows)?;
        let nx = shift(x, offset[2], self.cols)?;
        Some(self.index(nz, ny, nx))
    }
}

#[inline]
fn shift(pos: usize, delta: isize, extent: usize) -> Option<usize> {
    let moved = pos.checked_add_signed(delta)?;
    (moved < extent).then_some(moved)
}
