//! Main Grid type

use crate::error::{Error, Result};
use crate::grid::{Lattice, PackedSample, Sample};
use ndarray::{ArrayD, ArrayViewD, IxDyn};

/// A dense 2-D or 3-D grid of samples.
///
/// `Grid<T>` stores values of type `T` in row-major (raster) order. The shape
/// is `[rows, cols]` for 2-D grids and `[depth, rows, cols]` for 3-D grids,
/// and coordinates follow the same axis order.
///
/// # Example
///
/// ```
/// use morphrec_core::Grid;
///
/// let mut grid: Grid<u8> = Grid::zeros(&[4, 5])?;
/// grid.set(&[2, 3], 42)?;
/// assert_eq!(grid.get(&[2, 3])?, 42);
/// # Ok::<(), morphrec_core::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    /// Values in row-major order
    data: Vec<T>,
    shape: Vec<usize>,
    lattice: Lattice,
}

impl<T: Copy> Grid<T> {
    /// Create a grid filled with a specific value
    pub fn filled(shape: &[usize], value: T) -> Result<Self> {
        let lattice = Lattice::from_shape(shape)?;
        Ok(Self {
            data: vec![value; lattice.len()],
            shape: shape.to_vec(),
            lattice,
        })
    }

    /// Create a grid from existing row-major data
    pub fn from_vec(shape: &[usize], data: Vec<T>) -> Result<Self> {
        let lattice = Lattice::from_shape(shape)?;
        if data.len() != lattice.len() {
            return Err(Error::InvalidDimensions {
                shape: shape.to_vec(),
                expected: lattice.len(),
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            shape: shape.to_vec(),
            lattice,
        })
    }

    /// Create a grid by evaluating `f` at every coordinate, in raster order
    pub fn from_fn(shape: &[usize], mut f: impl FnMut(&[usize]) -> T) -> Result<Self> {
        let lattice = Lattice::from_shape(shape)?;
        let dims = shape.len();
        let data = (0..lattice.len())
            .map(|index| {
                let zyx = lattice.coord(index);
                f(&zyx[3 - dims..])
            })
            .collect();
        Ok(Self {
            data,
            shape: shape.to_vec(),
            lattice,
        })
    }

    /// Create a grid from an ndarray of rank 2 or 3
    pub fn from_array(array: ArrayD<T>) -> Result<Self> {
        let shape = array.shape().to_vec();
        let data = array.iter().copied().collect();
        Self::from_vec(&shape, data)
    }

    /// Create a grid with the same shape, filled with a value
    pub fn like<U: Copy>(&self, fill_value: U) -> Grid<U> {
        Grid {
            data: vec![fill_value; self.data.len()],
            shape: self.shape.clone(),
            lattice: self.lattice,
        }
    }

    /// Apply `f` to every value
    pub fn map<U: Copy>(&self, f: impl FnMut(T) -> U) -> Grid<U> {
        Grid {
            data: self.data.iter().copied().map(f).collect(),
            shape: self.shape.clone(),
            lattice: self.lattice,
        }
    }

    // Dimensions

    /// Extent along each axis
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of axes (2 or 3)
    pub fn dims(&self) -> usize {
        self.shape.len()
    }

    /// Shape normalised to `(depth, rows, cols)`
    pub fn lattice(&self) -> Lattice {
        self.lattice
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether both grids have identical shapes
    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.shape == other.shape
    }

    /// Fail with [`Error::ShapeMismatch`] unless `other` has this grid's shape
    pub fn ensure_same_shape<U>(&self, other: &Grid<U>) -> Result<()> {
        if self.same_shape(other) {
            Ok(())
        } else {
            Err(Error::ShapeMismatch {
                expected: self.shape.clone(),
                actual: other.shape.clone(),
            })
        }
    }

    // Data access

    /// Linear index of a coordinate, or `None` if it lies outside the grid
    pub fn index_of(&self, coord: &[usize]) -> Option<usize> {
        if coord.len() != self.shape.len() || coord.iter().zip(&self.shape).any(|(c, s)| c >= s) {
            return None;
        }
        Some(match *coord {
            [y, x] => self.lattice.index(0, y, x),
            [z, y, x] => self.lattice.index(z, y, x),
            _ => return None,
        })
    }

    /// Coordinate of a linear index, in this grid's axis order
    pub fn coord_of(&self, index: usize) -> Vec<usize> {
        let zyx = self.lattice.coord(index);
        zyx[3 - self.dims()..].to_vec()
    }

    /// Get value at a coordinate
    pub fn get(&self, coord: &[usize]) -> Result<T> {
        self.index_of(coord)
            .map(|index| self.data[index])
            .ok_or_else(|| self.out_of_bounds(coord))
    }

    /// Get value at a coordinate without bounds checking
    ///
    /// # Safety
    /// `coord` must have `self.dims()` components, each below its extent
    pub unsafe fn get_unchecked(&self, coord: &[usize]) -> T {
        let index = self.unchecked_index(coord);
        unsafe { *self.data.get_unchecked(index) }
    }

    /// Set value at a coordinate
    pub fn set(&mut self, coord: &[usize], value: T) -> Result<()> {
        let index = self.index_of(coord).ok_or_else(|| self.out_of_bounds(coord))?;
        self.data[index] = value;
        Ok(())
    }

    /// Set value at a coordinate without bounds checking
    ///
    /// # Safety
    /// `coord` must have `self.dims()` components, each below its extent
    pub unsafe fn set_unchecked(&mut self, coord: &[usize], value: T) {
        let index = self.unchecked_index(coord);
        unsafe { *self.data.get_unchecked_mut(index) = value }
    }

    fn unchecked_index(&self, coord: &[usize]) -> usize {
        if coord.len() == 3 {
            self.lattice.index(coord[0], coord[1], coord[2])
        } else {
            self.lattice.index(0, coord[0], coord[1])
        }
    }

    fn out_of_bounds(&self, coord: &[usize]) -> Error {
        Error::IndexOutOfBounds {
            coord: coord.to_vec(),
            shape: self.shape.clone(),
        }
    }

    /// Values in raster order
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable values in raster order
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Get an ndarray view of the data
    pub fn view(&self) -> Result<ArrayViewD<'_, T>> {
        ArrayViewD::from_shape(IxDyn(&self.shape), &self.data)
            .map_err(|e| Error::Other(e.to_string()))
    }

    /// Consume the grid and return an ndarray
    pub fn into_array(self) -> Result<ArrayD<T>> {
        ArrayD::from_shape_vec(IxDyn(&self.shape), self.data)
            .map_err(|e| Error::Other(e.to_string()))
    }
}

impl<T: Sample> Grid<T> {
    /// Create a grid filled with zeros
    pub fn zeros(shape: &[usize]) -> Result<Self> {
        Self::filled(shape, T::zero())
    }

    /// Calculate basic statistics (min, max, mean over orderable cells)
    pub fn statistics(&self) -> GridStatistics<T> {
        let mut min: Option<T> = None;
        let mut max: Option<T> = None;
        let mut sum: f64 = 0.0;
        let mut count: usize = 0;

        for &value in self.data.iter().filter(|v| v.is_orderable()) {
            if min.map_or(true, |m| value < m) {
                min = Some(value);
            }
            if max.map_or(true, |m| value > m) {
                max = Some(value);
            }
            if let Some(v) = value.to_f64() {
                sum += v;
                count += 1;
            }
        }

        let mean = if count > 0 {
            Some(sum / count as f64)
        } else {
            None
        };

        GridStatistics {
            min,
            max,
            mean,
            count,
        }
    }
}

impl<T: PackedSample> Grid<T> {
    /// Decode a grid from 32-bit storage words, masking each to `T::BITS` bits
    pub fn from_packed_words(shape: &[usize], words: &[i32]) -> Result<Self> {
        Self::from_vec(shape, words.iter().map(|&w| T::from_word(w)).collect())
    }

    /// Encode as non-negative 32-bit storage words, in raster order
    pub fn to_packed_words(&self) -> Vec<i32> {
        self.data.iter().map(|&v| v.to_word()).collect()
    }
}

/// Basic statistics for a grid
#[derive(Debug, Clone)]
pub struct GridStatistics<T> {
    pub min: Option<T>,
    pub max: Option<T>,
    pub mean: Option<f64>,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_grid_creation() {
        let grid: Grid<f32> = Grid::zeros(&[100, 200]).unwrap();
        assert_eq!(grid.shape(), &[100, 200]);
        assert_eq!(grid.dims(), 2);
        assert_eq!(grid.len(), 20_000);

        let volume: Grid<u8> = Grid::zeros(&[4, 5, 6]).unwrap();
        assert_eq!(volume.dims(), 3);
        assert_eq!(volume.lattice().scan_lines(), 20);
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(matches!(
            Grid::<u8>::zeros(&[5]),
            Err(Error::UnsupportedDimensionality(1))
        ));
        assert!(matches!(
            Grid::from_vec(&[2, 3], vec![0u8; 5]),
            Err(Error::InvalidDimensions { expected: 6, actual: 5, .. })
        ));
    }

    #[test]
    fn test_grid_access() {
        let mut grid: Grid<f32> = Grid::zeros(&[10, 10]).unwrap();
        grid.set(&[5, 5], 42.0).unwrap();
        assert_eq!(grid.get(&[5, 5]).unwrap(), 42.0);
        assert!(grid.get(&[10, 0]).is_err());
        assert!(grid.get(&[0, 0, 0]).is_err());
        assert!(grid.set(&[0, 10], 1.0).is_err());
        assert_eq!(unsafe { grid.get_unchecked(&[5, 5]) }, 42.0);
    }

    #[test]
    fn test_unchecked_roundtrip() {
        let mut volume: Grid<i16> = Grid::zeros(&[2, 3, 4]).unwrap();
        unsafe { volume.set_unchecked(&[1, 2, 3], -7) };
        assert_eq!(volume.get(&[1, 2, 3]).unwrap(), -7);
        assert_eq!(volume.as_slice()[23], -7);

        let mut plane: Grid<u8> = Grid::zeros(&[3, 4]).unwrap();
        unsafe { plane.set_unchecked(&[2, 1], 9) };
        assert_eq!(unsafe { plane.get_unchecked(&[2, 1]) }, 9);
        assert_eq!(plane.index_of(&[2, 1]), Some(9));
        assert_eq!(plane.as_slice().iter().filter(|&&v| v != 0).count(), 1);
    }

    #[test]
    fn test_raster_order() {
        let grid = Grid::from_fn(&[2, 3, 4], |c| (c[0] * 100 + c[1] * 10 + c[2]) as i32).unwrap();
        assert_eq!(grid.as_slice()[0], 0);
        assert_eq!(grid.as_slice()[1], 1);
        assert_eq!(grid.as_slice()[4], 10);
        assert_eq!(grid.as_slice()[12], 100);
        assert_eq!(grid.index_of(&[1, 2, 3]), Some(23));
        assert_eq!(grid.coord_of(23), vec![1, 2, 3]);
    }

    #[test]
    fn test_ndarray_roundtrip() {
        let grid = Grid::from_fn(&[3, 4], |c| (c[0] * 4 + c[1]) as u16).unwrap();
        let array = grid.clone().into_array().unwrap();
        assert_eq!(array[&[2, 1][..]], 9);
        assert_eq!(grid.view().unwrap()[&[1, 3][..]], 7);
        assert_eq!(Grid::from_array(array).unwrap(), grid);
    }

    #[test]
    fn test_shape_checks() {
        let a: Grid<u8> = Grid::zeros(&[3, 4]).unwrap();
        let b: Grid<bool> = Grid::filled(&[3, 4], true).unwrap();
        let c: Grid<u8> = Grid::zeros(&[4, 3]).unwrap();
        assert!(a.ensure_same_shape(&b).is_ok());
        assert_eq!(
            a.ensure_same_shape(&c),
            Err(Error::ShapeMismatch {
                expected: vec![3, 4],
                actual: vec![4, 3]
            })
        );
    }

    #[test]
    fn test_packed_words() {
        let grid: Grid<u16> = Grid::from_packed_words(&[1, 3], &[-1, 0x1_0005, 300]).unwrap();
        assert_eq!(grid.as_slice(), &[65535, 5, 300]);
        assert_eq!(grid.to_packed_words(), vec![65535, 5, 300]);
    }

    #[test]
    fn test_grid_statistics() {
        let grid = Grid::from_fn(&[10, 10], |c| (c[0] * 10 + c[1]) as f32).unwrap();
        let stats = grid.statistics();
        assert_eq!(stats.min, Some(0.0));
        assert_eq!(stats.max, Some(99.0));
        assert_eq!(stats.count, 100);
        assert_relative_eq!(stats.mean.unwrap(), 49.5, epsilon = 1e-10);
    }
}
