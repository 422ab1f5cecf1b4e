//! Page-level slide navigation
//!
//! The [`SlideController`] owns the ordered slides, the current index and
//! the transition procedure. Interested components subscribe to
//! [`SlideChanged`] notifications instead of polling.

mod engine;
mod position;
mod subscriber;

pub use engine::SlideController;
pub use position::{SlideChanged, SlidePhase};
pub use subscriber::SlideSubscriber;

/// Result of a `goto` request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GotoOutcome {
    /// A transition is now running
    Started { from: usize, to: usize },
    /// The request was dropped
    Ignored(IgnoreReason),
}

impl GotoOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, GotoOutcome::Started { .. })
    }
}

/// Why a `goto` request was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Target index outside `[0, N-1]`
    OutOfRange,
    /// Some owner holds the gesture lock
    Locked,
    /// A transition is already running
    Transitioning,
}
