//! Connected-component labeling by repeated flood fill

use morphrec_core::{Algorithm, Connectivity, Error, Grid, Result, Sample};

use std::collections::VecDeque;

use super::flood_fill::fill_from;

const UNLABELED: u32 = u32::MAX;

/// Parameters for component labeling
#[derive(Debug, Clone, Default)]
pub struct LabelParams {
    /// Neighbourhood; `None` selects face connectivity for the grid's rank
    pub connectivity: Option<Connectivity>,
}

/// Labels of every foreground component
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentLabels {
    /// 0 for background, `1..=count` for foreground cells
    pub labels: Grid<u32>,
    /// Number of components found
    pub count: u32,
}

/// Component labeling algorithm
#[derive(Debug, Clone, Default)]
pub struct LabelComponents;

impl Algorithm for LabelComponents {
    type Input = Grid<u8>;
    type Output = ComponentLabels;
    type Params = LabelParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "LabelComponents"
    }

    fn description(&self) -> &'static str {
        "Label connected foreground regions by repeated flood fill"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let connectivity = match params.connectivity {
            Some(connectivity) => connectivity,
            None => Connectivity::default_for(input.dims())?,
        };
        label_components(&input, &connectivity)
    }
}

/// Label the connected components of the non-zero cells of `grid`.
///
/// Components are numbered from 1 in raster order of their first cell.
///
/// # Errors
/// - [`Error::DimensionMismatch`] if `connectivity` is for another rank
/// - [`Error::InvalidParameter`] if the grid holds more components than fit in a `u32` label
pub fn label_components<T: Sample>(
    grid: &Grid<T>,
    connectivity: &Connectivity,
) -> Result<ComponentLabels> {
    if connectivity.dims() != grid.dims() {
        return Err(Error::DimensionMismatch {
            expected: connectivity.dims(),
            actual: grid.dims(),
        });
    }

    let mut labels = grid.map(|v| if v.is_zero() { 0 } else { UNLABELED });
    let lattice = labels.lattice();
    let values = labels.as_mut_slice();
    let mut visited = vec![false; values.len()];
    let mut queue = VecDeque::new();
    let mut count: u32 = 0;

    for index in 0..values.len() {
        if values[index] != UNLABELED {
            continue;
        }
        if count == UNLABELED - 1 {
            return Err(Error::InvalidParameter {
                name: "grid",
                value: format!("shape {:?}", grid.shape()),
                reason: "too many components for 32-bit labels".to_string(),
            });
        }
        count += 1;
        fill_from(
            values,
            lattice,
            index,
            &|v: u32| v == UNLABELED,
            count,
            connectivity,
            &mut visited,
            &mut queue,
        );
    }

    tracing::debug!(count, adjacency = connectivity.adjacency(), "components labeled");

    Ok(ComponentLabels { labels, count })
}
