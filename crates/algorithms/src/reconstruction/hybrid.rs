//! Hybrid scan-and-propagate engine (Vincent, 1993)
//!
//! Three sweeps over a result buffer initialised to `bound(marker, mask)`:
//! 1. raster scan pulling from forward neighbours
//! 2. anti-raster scan pulling from backward neighbours, seeding a FIFO with
//!    every backward neighbour the updated cell can still raise
//! 3. FIFO drain over the full neighbourhood until nothing changes
//!
//! Every write strictly increases a cell (in the kind's direction) and never
//! passes its mask value. Candidate values are always drawn from existing
//! cell or mask values, so each cell is written a bounded number of times and
//! the queue empties.

use std::collections::VecDeque;

use morphrec_core::{Connectivity, Grid, Lattice, Offset, Result, Sample};

use crate::maybe_rayon::*;

use super::control::Control;
use super::kind::ReconstructionKind;

/// Worklist pops between cancellation checks and progress reports
pub(crate) const DRAIN_BATCH: usize = 4096;

/// Counters collected during one reconstruction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconstructionStats {
    /// Cells raised by the raster scan
    pub forward_updates: usize,
    /// Cells raised by the anti-raster scan
    pub backward_updates: usize,
    /// Worklist insertions
    pub enqueued: usize,
    /// Worklist removals
    pub dequeued: usize,
    /// Cells raised while draining the worklist
    pub drain_updates: usize,
}

impl ReconstructionStats {
    /// Total number of writes after initialisation
    pub fn writes(&self) -> usize {
        self.forward_updates + self.backward_updates + self.drain_updates
    }
}

pub(crate) struct Engine<'a, T> {
    mask: &'a [T],
    roi: Option<&'a [bool]>,
    result: Vec<T>,
    lattice: Lattice,
    kind: ReconstructionKind,
    connectivity: &'a Connectivity,
    control: Control<'a>,
    queue: VecDeque<usize>,
    stats: ReconstructionStats,
}

impl<'a, T: Sample> Engine<'a, T> {
    /// Phase 1: `bound(marker, mask)` inside the ROI, the marker value outside.
    ///
    /// Shapes must already have been validated.
    pub(crate) fn new(
        marker: &'a Grid<T>,
        mask: &'a Grid<T>,
        kind: ReconstructionKind,
        connectivity: &'a Connectivity,
        roi: Option<&'a Grid<bool>>,
        control: Control<'a>,
    ) -> Self {
        let marker_values = marker.as_slice();
        let mask_values = mask.as_slice();
        let roi = roi.map(Grid::as_slice);

        let result: Vec<T> = (0..marker_values.len())
            .into_par_iter()
            .map(|i| {
                if roi.map_or(true, |r| r[i]) {
                    kind.bound(marker_values[i], mask_values[i])
                } else {
                    marker_values[i]
                }
            })
            .collect();

        Self {
            mask: mask_values,
            roi,
            result,
            lattice: marker.lattice(),
            kind,
            connectivity,
            control,
            queue: VecDeque::new(),
            stats: ReconstructionStats::default(),
        }
    }

    pub(crate) fn run(mut self) -> Result<(Vec<T>, ReconstructionStats)> {
        self.forward_pass()?;
        self.backward_pass()?;
        self.drain()?;
        Ok((self.result, self.stats))
    }

    /// Phase 2: raster order, forward neighbours only, no enqueueing
    fn forward_pass(&mut self) -> Result<()> {
        let lattice = self.lattice;
        let connectivity = self.connectivity;
        let offsets = connectivity.forward();
        let total = lattice.scan_lines();
        let mut line = 0;

        for z in 0..lattice.depth() {
            for y in 0..lattice.rows() {
                self.control.checkpoint()?;
                for x in 0..lattice.cols() {
                    let index = lattice.index(z, y, x);
                    if !self.in_roi(index) {
                        continue;
                    }
                    if self.propagate([z, y, x], index, offsets).is_some() {
                        self.stats.forward_updates += 1;
                    }
                }
                line += 1;
                self.control.report("forward", line, total);
            }
        }

        tracing::debug!(updates = self.stats.forward_updates, "forward pass done");
        Ok(())
    }

    /// Phase 3: anti-raster order, backward neighbours, seeds the worklist
    fn backward_pass(&mut self) -> Result<()> {
        let lattice = self.lattice;
        let connectivity = self.connectivity;
        let offsets = connectivity.backward();
        let total = lattice.scan_lines();
        let mut line = 0;

        for z in (0..lattice.depth()).rev() {
            for y in (0..lattice.rows()).rev() {
                self.control.checkpoint()?;
                for x in (0..lattice.cols()).rev() {
                    let index = lattice.index(z, y, x);
                    if !self.in_roi(index) {
                        continue;
                    }
                    if let Some(value) = self.propagate([z, y, x], index, offsets) {
                        self.stats.backward_updates += 1;
                        // Backward neighbours were settled earlier in this scan
                        // and will not look at this cell again.
                        self.enqueue_improvable([z, y, x], value, offsets);
                    }
                }
                line += 1;
                self.control.report("backward", line, total);
            }
        }

        tracing::debug!(
            updates = self.stats.backward_updates,
            queued = self.queue.len(),
            "backward pass done"
        );
        Ok(())
    }

    /// Phase 4: FIFO drain over the full neighbourhood
    fn drain(&mut self) -> Result<()> {
        let lattice = self.lattice;
        let connectivity = self.connectivity;
        let offsets = connectivity.full();
        let mut processed = 0;

        while let Some(index) = self.queue.pop_front() {
            if processed % DRAIN_BATCH == 0 {
                self.control.checkpoint()?;
                self.control
                    .report("drain", processed, processed + self.queue.len() + 1);
            }
            processed += 1;

            let zyx = lattice.coord(index);
            if let Some(value) = self.propagate(zyx, index, offsets) {
                self.stats.drain_updates += 1;
                self.enqueue_improvable(zyx, value, offsets);
            }
        }

        self.stats.dequeued = processed;
        self.control.report("drain", processed, processed);
        tracing::debug!(
            dequeued = processed,
            updates = self.stats.drain_updates,
            "worklist drained"
        );
        Ok(())
    }

    #[inline]
    fn in_roi(&self, index: usize) -> bool {
        self.roi.map_or(true, |r| r[index])
    }

    /// Raise `index` to the most extreme of itself and its `offsets`
    /// neighbours, clamped by the mask. Returns the new value if it changed.
    #[inline]
    fn propagate(
        &mut self,
        [z, y, x]: [usize; 3],
        index: usize,
        offsets: &[Offset],
    ) -> Option<T> {
        let current = self.result[index];
        let mut best = current;
        for offset in offsets {
            if let Some(n) = self.lattice.neighbor(z, y, x, offset) {
                best = self.kind.extreme(best, self.result[n]);
            }
        }
        let best = self.kind.bound(best, self.mask[index]);
        if self.kind.exceeds(best, current) {
            self.result[index] = best;
            Some(best)
        } else {
            None
        }
    }

    /// Queue every `offsets` neighbour that `value` could still raise
    #[inline]
    fn enqueue_improvable(&mut self, [z, y, x]: [usize; 3], value: T, offsets: &[Offset]) {
        for offset in offsets {
            let Some(n) = self.lattice.neighbor(z, y, x, offset) else {
                continue;
            };
            let current = self.result[n];
            if self.in_roi(n)
                && self.kind.exceeds(value, current)
                && self.kind.exceeds(self.mask[n], current)
            {
                self.queue.push_back(n);
                self.stats.enqueued += 1;
            }
        }
    }
}
