use serde::{Deserialize, Serialize};

use crate::gesture::TransitionIntent;

/// Whether the slide machine can accept a new transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlidePhase {
    /// No transition in flight
    Settled,
    /// Animating from one slide to another
    Transitioning { from: usize, to: usize },
}

/// Broadcast once a transition settles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideChanged {
    /// The slide that is now current
    pub index: usize,
    /// The slide that was current before the transition
    pub previous: usize,
    /// Direction of travel
    pub direction: TransitionIntent,
}
