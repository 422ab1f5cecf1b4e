//! Animation sequencing: easing curves, timeline descriptions, and the
//! scheduler that evaluates them against a clock.

mod easing;
mod sequencer;
mod timeline;

pub use easing::Ease;
pub use sequencer::{Sequencer, TimelineId};
pub use timeline::{Continuation, Property, Target, Timeline, Tween};
