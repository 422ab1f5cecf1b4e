//! Coordination context shared by every controller on a mounted page

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::animation::{Continuation, Property, Sequencer, Target, Timeline, TimelineId};
use crate::lock::LockCoordinator;
use crate::settings::MotionSettings;

/// Whether the carousel is currently capturing gestures.
///
/// Anyone may read it; only the carousel controller writes it.
#[derive(Debug, Default)]
pub struct HorizontalCapture {
    active: AtomicBool,
}

impl HorizontalCapture {
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub(crate) fn set(&self, active: bool) {
        let was = self.active.swap(active, Ordering::AcqRel);
        if was != active {
            tracing::debug!("horizontal capture {}", if active { "on" } else { "off" });
        }
    }
}

/// State shared between the slide controller, the carousel, and intros
pub struct CoordinationContext {
    /// Gesture lock
    pub lock: LockCoordinator,

    /// Animation scheduler and property store
    pub sequencer: Arc<Mutex<Sequencer>>,

    /// Carousel capture flag
    pub capture: HorizontalCapture,

    /// Motion settings
    pub settings: MotionSettings,
}

impl CoordinationContext {
    pub fn new(settings: MotionSettings) -> Self {
        Self {
            lock: LockCoordinator::new(),
            sequencer: Arc::new(Mutex::new(Sequencer::new())),
            capture: HorizontalCapture::default(),
            settings,
        }
    }

    /// Schedule a timeline on the shared sequencer
    pub fn play(&self, timeline: Timeline) -> TimelineId {
        self.sequencer.lock().play(timeline)
    }

    /// Write a value immediately
    pub fn set(&self, target: Target, property: Property, value: f32) {
        self.sequencer.lock().set(target, property, value);
    }

    /// Current value of an animated property, or its resting default
    pub fn value(&self, target: Target, property: Property) -> f32 {
        self.sequencer.lock().value_or_default(target, property)
    }

    /// Fast-forward a timeline, returning its continuation to run once the
    /// sequencer is free
    pub fn finish(&self, id: TimelineId) -> Option<Continuation> {
        self.sequencer.lock().finish(id)
    }

    /// Advance the clock and run settled continuations, including those
    /// scheduled by continuations that settle at the same instant
    pub fn advance(&self, now: Duration) {
        for _ in 0..MAX_SETTLE_ROUNDS {
            let continuations = self.sequencer.lock().advance(now);
            if continuations.is_empty() {
                return;
            }
            for continuation in continuations {
                continuation();
            }
        }
        tracing::warn!("continuations still pending after {} rounds at {:?}", MAX_SETTLE_ROUNDS, now);
    }
}

const MAX_SETTLE_ROUNDS: usize = 16;
