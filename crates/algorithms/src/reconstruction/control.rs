//! Progress reporting and cooperative cancellation
//!
//! Both hooks are injected per call. Neither affects the result of a run that
//! completes.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use morphrec_core::{Error, Result};

/// Progress callback: `(phase, current, total)`
pub type ProgressFn<'a> = &'a (dyn Fn(&str, usize, usize) + 'a);

/// Hooks polled by the engine at scan-line and worklist-batch boundaries
#[derive(Clone, Copy, Default)]
pub struct Control<'a> {
    progress: Option<ProgressFn<'a>>,
    cancel: Option<&'a AtomicBool>,
}

impl<'a> Control<'a> {
    /// No progress reporting, never cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Report progress through `progress`.
    ///
    /// Phases are `"forward"` and `"backward"` (counted in scan lines) and
    /// `"drain"` (counted in dequeued cells).
    pub fn with_progress(mut self, progress: ProgressFn<'a>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Abort with [`Error::Cancelled`] once `flag` is set
    pub fn with_cancel_flag(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub(crate) fn report(&self, phase: &str, current: usize, total: usize) {
        if let Some(progress) = self.progress {
            progress(phase, current, total);
        }
    }

    pub(crate) fn checkpoint(&self) -> Result<()> {
        match self.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => {
                tracing::trace!("reconstruction cancelled");
                Err(Error::Cancelled)
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for Control<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("progress", &self.progress.is_some())
            .field("cancel", &self.cancel)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_default_never_cancels() {
        let control = Control::new();
        assert!(control.checkpoint().is_ok());
        control.report("forward", 1, 2);
    }

    #[test]
    fn test_cancel_flag() {
        let flag = AtomicBool::new(false);
        let control = Control::new().with_cancel_flag(&flag);
        assert!(control.checkpoint().is_ok());
        flag.store(true, Ordering::Relaxed);
        assert_eq!(control.checkpoint(), Err(Error::Cancelled));
    }

    #[test]
    fn test_progress_forwarding() {
        let seen = RefCell::new(Vec::new());
        let progress = |phase: &str, current: usize, total: usize| {
            seen.borrow_mut().push((phase.to_string(), current, total));
        };
        let control = Control::new().with_progress(&progress);
        control.report("drain", 3, 10);
        assert_eq!(seen.into_inner(), vec![("drain".to_string(), 3, 10)]);
    }
}
