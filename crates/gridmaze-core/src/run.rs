//! Driving step sequences: [`CancelToken`], [`Throttle`] and [`drive`].
//!
//! Maze generators and search replays both produce a pull-based sequence of
//! small batches. Callers animate them by pulling a few batches, yielding to
//! their frame loop, and checking a cancellation token before continuing.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

// ---------------------------------------------------------------------------
// CancelToken
// ---------------------------------------------------------------------------

/// Stop flag checked by [`drive`] before it pulls the next maze step or
/// replay frame.
///
/// Clones share one flag, so an input handler can stop a carve or replay
/// that another clone is driving.
#[derive(Clone, Debug)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a new, non-cancelled token.
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Throttle
// ---------------------------------------------------------------------------

/// How many steps to apply between two frame boundaries.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Throttle {
    steps_per_frame: usize,
}

impl Throttle {
    /// Cell budget used by [`for_grid`](Self::for_grid).
    pub const BUDGET: usize = 2000;

    /// Throttle with an explicit step count (at least 1).
    pub fn new(steps_per_frame: usize) -> Self {
        Self {
            steps_per_frame: steps_per_frame.max(1),
        }
    }

    /// Throttle scaled inversely with the grid area.
    pub fn for_grid(width: i32, height: i32) -> Self {
        let area = (width.max(1) as usize) * (height.max(1) as usize);
        Self::new(Self::BUDGET / area)
    }

    /// Steps between frame boundaries.
    #[inline]
    pub fn steps_per_frame(self) -> usize {
        self.steps_per_frame
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(1)
    }
}

// ---------------------------------------------------------------------------
// drive
// ---------------------------------------------------------------------------

/// How a [`drive`] call ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DriveOutcome {
    /// The sequence ran dry.
    Completed { steps: usize },
    /// The token was cancelled; `steps` items had been applied.
    Cancelled { steps: usize },
}

impl DriveOutcome {
    /// Number of items applied.
    pub fn steps(self) -> usize {
        match self {
            Self::Completed { steps } | Self::Cancelled { steps } => steps,
        }
    }

    /// Whether the run was cut short.
    pub fn is_cancelled(self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Pull every item from `steps`, handing each to `apply`.
///
/// The token is checked before each item is pulled, so a cancelled run
/// never applies a batch it had not started. After every
/// `throttle.steps_per_frame()` items `on_frame` is called; that is where a
/// caller renders and waits for the next frame.
pub fn drive<I, T>(
    steps: I,
    throttle: Throttle,
    token: &CancelToken,
    mut on_frame: impl FnMut(),
    mut apply: impl FnMut(T),
) -> DriveOutcome
where
    I: IntoIterator<Item = T>,
{
    let mut applied = 0usize;
    let mut since_frame = 0usize;
    let mut iter = steps.into_iter();

    loop {
        if token.is_cancelled() {
            log::debug!("drive cancelled after {applied} steps");
            return DriveOutcome::Cancelled { steps: applied };
        }
        let Some(item) = iter.next() else {
            break;
        };
        apply(item);
        applied += 1;
        since_frame += 1;
        if since_frame >= throttle.steps_per_frame() {
            since_frame = 0;
            on_frame();
        }
    }

    if since_frame > 0 {
        on_frame();
    }
    log::debug!("drive completed after {applied} steps");
    DriveOutcome::Completed { steps: applied }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_clones_share_flag() {
        let a = CancelToken::new();
        let b = a.clone();
        assert!(!b.is_cancelled());
        a.cancel();
        assert!(b.is_cancelled());
    }

    #[test]
    fn throttle_scales_inversely() {
        assert_eq!(Throttle::for_grid(10, 10).steps_per_frame(), 20);
        assert_eq!(Throttle::for_grid(100, 100).steps_per_frame(), 1);
        assert!(
            Throttle::for_grid(5, 5).steps_per_frame()
                > Throttle::for_grid(20, 20).steps_per_frame()
        );
        assert_eq!(Throttle::new(0).steps_per_frame(), 1);
    }

    #[test]
    fn drive_runs_to_completion() {
        let token = CancelToken::new();
        let mut frames = 0;
        let mut seen = Vec::new();
        let out = drive(0..7, Throttle::new(3), &token, || frames += 1, |x| seen.push(x));
        assert_eq!(out, DriveOutcome::Completed { steps: 7 });
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5, 6]);
        // 3 + 3 + trailing 1.
        assert_eq!(frames, 3);
    }

    #[test]
    fn cancelled_before_start_applies_nothing() {
        let token = CancelToken::new();
        token.cancel();
        let mut seen = Vec::new();
        let out = drive(0..5, Throttle::new(1), &token, || {}, |x| seen.push(x));
        assert_eq!(out, DriveOutcome::Cancelled { steps: 0 });
        assert!(seen.is_empty());
    }

    #[test]
    fn cancel_at_frame_boundary_stops_next_batch() {
        let token = CancelToken::new();
        let cancel = token.clone();
        let mut seen = Vec::new();
        let out = drive(0..10, Throttle::new(4), &token, || cancel.cancel(), |x| seen.push(x));
        assert!(out.is_cancelled());
        assert_eq!(out.steps(), 4);
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }
}
