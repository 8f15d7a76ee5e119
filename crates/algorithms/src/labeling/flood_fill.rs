//! Single-pass flood fill
//!
//! Breadth-first fill of the connected region around a seed whose values
//! satisfy a predicate. Each cell is examined at most once, so the fill
//! terminates even when the new value itself satisfies the predicate.

use std::collections::VecDeque;

use morphrec_core::{Connectivity, Error, Grid, Lattice, Result};

/// Replace every cell connected to `seed` whose value satisfies `predicate`
/// with `new_value`.
///
/// Connectivity is followed only through cells that satisfy the predicate.
/// Returns the number of cells written; a seed that fails the predicate
/// writes nothing.
///
/// # Errors
/// - [`Error::DimensionMismatch`] if `connectivity` is for another rank
/// - [`Error::IndexOutOfBounds`] if `seed` lies outside the grid
pub fn flood_fill<T: Copy>(
    grid: &mut Grid<T>,
    seed: &[usize],
    predicate: impl Fn(T) -> bool,
    new_value: T,
    connectivity: &Connectivity,
) -> Result<usize> {
    if connectivity.dims() != grid.dims() {
        return Err(Error::DimensionMismatch {
            expected: connectivity.dims(),
            actual: grid.dims(),
        });
    }
    let start = grid.index_of(seed).ok_or_else(|| Error::IndexOutOfBounds {
        coord: seed.to_vec(),
        shape: grid.shape().to_vec(),
    })?;

    let lattice = grid.lattice();
    let mut visited = vec![false; grid.len()];
    let mut queue = VecDeque::new();
    Ok(fill_from(
        grid.as_mut_slice(),
        lattice,
        start,
        &predicate,
        new_value,
        connectivity,
        &mut visited,
        &mut queue,
    ))
}

/// Breadth-first fill from `start` over caller-owned scratch.
///
/// Cells already marked in `visited` are never entered, so one bitmap can be
/// shared by successive fills over disjoint regions. `queue` is left empty.
#[allow(clippy::too_many_arguments)]
pub(crate) fn fill_from<T: Copy>(
    values: &mut [T],
    lattice: Lattice,
    start: usize,
    predicate: &impl Fn(T) -> bool,
    new_value: T,
    connectivity: &Connectivity,
    visited: &mut [bool],
    queue: &mut VecDeque<usize>,
) -> usize {
    if visited[start] || !predicate(values[start]) {
        return 0;
    }

    visited[start] = true;
    queue.push_back(start);
    let mut filled = 0;

    while let Some(index) = queue.pop_front() {
        values[index] = new_value;
        filled += 1;

        let [z, y, x] = lattice.coord(index);
        for offset in connectivity.full() {
            let Some(n) = lattice.neighbor(z, y, x, offset) else {
                continue;
            };
            if !visited[n] && predicate(values[n]) {
                visited[n] = true;
                queue.push_back(n);
            }
        }
    }

    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[rustfmt::skip]
    fn test_fill_region_4_vs_8() {
        let source = Grid::from_vec(&[3, 3], vec![
            1u8, 0, 0,
            0, 1, 0,
            0, 0, 1,
        ])
        .unwrap();

        let mut grid = source.clone();
        let n = flood_fill(&mut grid, &[0, 0], |v| v == 1, 7, &Connectivity::c4()).unwrap();
        assert_eq!(n, 1);
        assert_eq!(grid.get(&[1, 1]).unwrap(), 1);

        let mut grid = source;
        let n = flood_fill(&mut grid, &[0, 0], |v| v == 1, 7, &Connectivity::c8()).unwrap();
        assert_eq!(n, 3);
        assert_eq!(grid.as_slice(), &[7, 0, 0, 0, 7, 0, 0, 0, 7]);
    }

    #[test]
    fn test_fill_with_value_matching_predicate() {
        let mut grid: Grid<u8> = Grid::filled(&[4, 4], 3).unwrap();
        let n = flood_fill(&mut grid, &[2, 2], |v| v >= 3, 5, &Connectivity::c4()).unwrap();
        assert_eq!(n, 16);
        assert!(grid.as_slice().iter().all(|&v| v == 5));
    }

    #[test]
    fn test_fill_3d() {
        let mut grid: Grid<i32> = Grid::zeros(&[3, 3, 3]).unwrap();
        grid.set(&[1, 1, 1], -1).unwrap();
        let n = flood_fill(&mut grid, &[0, 0, 0], |v| v == 0, 4, &Connectivity::c6()).unwrap();
        assert_eq!(n, 26);
        assert_eq!(grid.get(&[1, 1, 1]).unwrap(), -1);
        assert_eq!(grid.get(&[2, 2, 2]).unwrap(), 4);
    }

    #[test]
    fn test_seed_failing_predicate() {
        let mut grid: Grid<u8> = Grid::zeros(&[2, 2]).unwrap();
        let n = flood_fill(&mut grid, &[0, 1], |v| v == 9, 1, &Connectivity::c8()).unwrap();
        assert_eq!(n, 0);
        assert!(grid.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_errors() {
        let mut grid: Grid<u8> = Grid::zeros(&[2, 2]).unwrap();
        assert!(matches!(
            flood_fill(&mut grid, &[2, 0], |_| true, 1, &Connectivity::c4()),
            Err(Error::IndexOutOfBounds { .. })
        ));
        assert!(matches!(
            flood_fill(&mut grid, &[0, 0], |_| true, 1, &Connectivity::c26()),
            Err(Error::DimensionMismatch { expected: 3, actual: 2 })
        ));
    }
}
