//! Slide controller implementation

use super::{GotoOutcome, IgnoreReason, SlideChanged, SlidePhase, SlideSubscriber};
use crate::animation::{Property, Target, Timeline, Tween};
use crate::context::CoordinationContext;
use crate::gesture::TransitionIntent;
use crate::lock::{LockOwner, LockToken};
use parking_lot::RwLock;
use std::sync::{Arc, Weak};

/// Slide state stored internally
#[derive(Debug, Clone)]
struct SlideState {
    current: usize,
    phase: SlidePhase,
    slide_count: usize,
}

/// The page-level slide state machine. Clones share the same state.
#[derive(Clone)]
pub struct SlideController {
    ctx: Arc<CoordinationContext>,
    state: Arc<RwLock<SlideState>>,
    subscribers: Arc<RwLock<Vec<Weak<dyn SlideSubscriber>>>>,
}

impl SlideController {
    /// Create a controller over `slide_count` stacked slides, starting on the
    /// first one. Slides after the first are parked below the viewport.
    pub fn new(ctx: Arc<CoordinationContext>, slide_count: usize) -> Self {
        for index in 0..slide_count {
            let y_percent = if index == 0 { 0.0 } else { 100.0 };
            ctx.set(Target::Slide(index), Property::YPercent, y_percent);
        }

        let state = SlideState {
            current: 0,
            phase: SlidePhase::Settled,
            slide_count,
        };

        Self {
            ctx,
            state: Arc::new(RwLock::new(state)),
            subscribers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Current slide index
    pub fn current(&self) -> usize {
        self.state.read().current
    }

    pub fn phase(&self) -> SlidePhase {
        self.state.read().phase
    }

    pub fn slide_count(&self) -> usize {
        self.state.read().slide_count
    }

    /// Start a transition to `target`.
    ///
    /// Out-of-range targets, a held lock, or a transition already in flight
    /// make this a no-op.
    pub fn goto(&self, target: isize, direction: TransitionIntent) -> GotoOutcome {
        let slide_count = self.slide_count();
        if target < 0 || target as usize >= slide_count {
            tracing::debug!("goto({}) ignored: outside 0..{}", target, slide_count);
            return GotoOutcome::Ignored(IgnoreReason::OutOfRange);
        }
        let target = target as usize;

        if self.ctx.lock.is_locked() {
            tracing::debug!("goto({}) ignored: locked by {:?}", target, self.ctx.lock.holders());
            return GotoOutcome::Ignored(IgnoreReason::Locked);
        }

        let mut state = self.state.write();
        if let SlidePhase::Transitioning { from, to } = state.phase {
            tracing::debug!("goto({}) ignored: {} -> {} in flight", target, from, to);
            return GotoOutcome::Ignored(IgnoreReason::Transitioning);
        }
        let from = state.current;
        state.phase = SlidePhase::Transitioning { from, to: target };
        drop(state);

        let token = self.ctx.lock.acquire(LockOwner::SlideTransition);
        let controller = self.clone();
        let timeline = self
            .transition_timeline(from, target, direction)
            .then(move || controller.settle(target, direction, token));
        self.ctx.play(timeline);

        tracing::info!("slide transition {} -> {} ({:?})", from, target, direction);
        GotoOutcome::Started { from, to: target }
    }

    /// Step one slide in the direction of `intent`
    pub fn advance_intent(&self, intent: TransitionIntent) -> GotoOutcome {
        let target = self.current() as isize + intent.sign();
        self.goto(target, intent)
    }

    /// Jump straight to a slide, travelling in whichever direction it lies
    pub fn jump_to(&self, index: usize) -> GotoOutcome {
        let direction = if index > self.current() {
            TransitionIntent::Advance
        } else {
            TransitionIntent::Retreat
        };
        self.goto(index as isize, direction)
    }

    /// Add a subscriber
    pub fn add_subscriber(&self, subscriber: Arc<dyn SlideSubscriber>) {
        let mut subscribers = self.subscribers.write();
        subscribers.push(Arc::downgrade(&subscriber));
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// Forget every subscriber
    pub fn clear_subscribers(&self) {
        self.subscribers.write().clear();
    }

    fn transition_timeline(&self, from: usize, to: usize, direction: TransitionIntent) -> Timeline {
        let duration = self.ctx.settings.slide_duration;
        let ease = self.ctx.settings.slide_ease;
        // Advancing pushes the current slide up and pulls the next one in from below
        let travel = 100.0 * direction.sign() as f32;

        let incoming = Tween::from_to(Target::Slide(to), Property::YPercent, travel, 0.0)
            .duration(duration)
            .ease(ease);

        let timeline = Timeline::new("slide-transition");
        if from == to {
            return timeline.add(incoming);
        }

        timeline
            .add(
                Tween::to(Target::Slide(from), Property::YPercent, -travel)
                    .duration(duration)
                    .ease(ease),
            )
            .add(incoming)
    }

    fn settle(&self, index: usize, direction: TransitionIntent, token: LockToken) {
        let mut state = self.state.write();
        let previous = state.current;
        state.current = index;
        state.phase = SlidePhase::Settled;
        drop(state);

        tracing::debug!("slide {} settled", index);
        self.notify_subscribers(&SlideChanged {
            index,
            previous,
            direction,
        });

        // Listeners that started an intro hold their own token by now
        let buffer = Timeline::delay("slide-release-buffer", self.ctx.settings.release_buffer)
            .then(move || token.release());
        self.ctx.play(buffer);
    }

    /// Notify all subscribers of a settled transition
    fn notify_subscribers(&self, event: &SlideChanged) {
        let live: Vec<Arc<dyn SlideSubscriber>> = {
            let mut subscribers = self.subscribers.write();

            // Remove any dead weak references
            subscribers.retain(|weak| weak.strong_count() > 0);
            subscribers.iter().filter_map(Weak::upgrade).collect()
        };

        for subscriber in live {
            subscriber.on_slide_changed(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MotionSettings;
    use parking_lot::Mutex;
    use std::time::Duration;

    struct Recorder {
        events: Mutex<Vec<SlideChanged>>,
    }

    impl SlideSubscriber for Recorder {
        fn on_slide_changed(&self, event: &SlideChanged) {
            self.events.lock().push(*event);
        }
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn setup() -> (Arc<CoordinationContext>, SlideController, Arc<Recorder>) {
        let ctx = Arc::new(CoordinationContext::new(MotionSettings::default()));
        let controller = SlideController::new(Arc::clone(&ctx), 4);
        let recorder = Arc::new(Recorder {
            events: Mutex::new(Vec::new()),
        });
        controller.add_subscriber(recorder.clone());
        (ctx, controller, recorder)
    }

    #[test]
    fn test_initial_state() {
        let (ctx, controller, _) = setup();
        assert_eq!(controller.current(), 0);
        assert_eq!(controller.phase(), SlidePhase::Settled);
        assert_eq!(ctx.value(Target::Slide(0), Property::YPercent), 0.0);
        assert_eq!(ctx.value(Target::Slide(3), Property::YPercent), 100.0);
    }

    #[test]
    fn test_advance_locks_then_settles_and_releases() {
        let (ctx, controller, recorder) = setup();

        let outcome = controller.advance_intent(TransitionIntent::Advance);
        assert_eq!(outcome, GotoOutcome::Started { from: 0, to: 1 });
        assert!(ctx.lock.is_locked());
        assert_eq!(controller.phase(), SlidePhase::Transitioning { from: 0, to: 1 });

        ctx.advance(ms(500));
        assert_eq!(controller.current(), 0);
        assert!(recorder.events.lock().is_empty());

        ctx.advance(ms(1000));
        assert_eq!(controller.current(), 1);
        assert_eq!(controller.phase(), SlidePhase::Settled);
        assert_eq!(ctx.value(Target::Slide(0), Property::YPercent), -100.0);
        assert_eq!(ctx.value(Target::Slide(1), Property::YPercent), 0.0);
        // Still inside the release buffer
        assert!(ctx.lock.is_locked());

        ctx.advance(ms(1050));
        assert!(!ctx.lock.is_locked());

        let events = recorder.events.lock();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].index, 1);
        assert_eq!(events[0].previous, 0);
    }

    #[test]
    fn test_goto_every_index_emits_once() {
        for target in 0..4 {
            let (ctx, controller, recorder) = setup();
            assert!(controller.goto(target as isize, TransitionIntent::Advance).is_started());
            ctx.advance(ms(2000));
            ctx.advance(ms(2100));

            assert_eq!(controller.current(), target);
            let events = recorder.events.lock();
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].index, target);
            assert!(!ctx.lock.is_locked());
        }
    }

    #[test]
    fn test_goto_while_locked_is_noop() {
        let (ctx, controller, _) = setup();
        controller.goto(1, TransitionIntent::Advance);
        let holders = ctx.lock.holder_count();

        let outcome = controller.goto(2, TransitionIntent::Advance);
        assert_eq!(outcome, GotoOutcome::Ignored(IgnoreReason::Locked));
        assert_eq!(controller.current(), 0);
        assert_eq!(ctx.lock.holder_count(), holders);
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let (ctx, controller, recorder) = setup();
        assert_eq!(
            controller.goto(-1, TransitionIntent::Retreat),
            GotoOutcome::Ignored(IgnoreReason::OutOfRange)
        );
        assert_eq!(
            controller.goto(4, TransitionIntent::Advance),
            GotoOutcome::Ignored(IgnoreReason::OutOfRange)
        );
        assert!(!ctx.lock.is_locked());
        ctx.advance(ms(2000));
        assert!(recorder.events.lock().is_empty());
        assert_eq!(controller.current(), 0);
    }

    #[test]
    fn test_retreat_brings_previous_from_above() {
        let (ctx, controller, _) = setup();
        controller.goto(2, TransitionIntent::Advance);
        ctx.advance(ms(2000));
        ctx.advance(ms(2100));

        assert!(controller.advance_intent(TransitionIntent::Retreat).is_started());
        ctx.advance(ms(3100));
        assert_eq!(controller.current(), 1);
        assert_eq!(ctx.value(Target::Slide(2), Property::YPercent), 100.0);
        assert_eq!(ctx.value(Target::Slide(1), Property::YPercent), 0.0);
    }

    #[test]
    fn test_subscriber_lock_outlives_release_buffer() {
        struct Intro {
            ctx: Arc<CoordinationContext>,
        }

        impl SlideSubscriber for Intro {
            fn on_slide_changed(&self, _event: &SlideChanged) {
                let token = self.ctx.lock.acquire(LockOwner::Intro("test"));
                self.ctx.play(Timeline::delay("intro", 1.0).then(move || token.release()));
            }
        }

        let (ctx, controller, _) = setup();
        let intro = Arc::new(Intro { ctx: Arc::clone(&ctx) });
        controller.add_subscriber(intro.clone());

        controller.goto(1, TransitionIntent::Advance);
        ctx.advance(ms(1000));
        ctx.advance(ms(1100));
        assert!(ctx.lock.is_locked());
        assert_eq!(ctx.lock.holders(), vec![LockOwner::Intro("test")]);

        ctx.advance(ms(2000));
        assert!(!ctx.lock.is_locked());
    }

    #[test]
    fn test_dead_subscribers_are_pruned() {
        let (ctx, controller, _recorder) = setup();
        {
            let temporary = Arc::new(Recorder {
                events: Mutex::new(Vec::new()),
            });
            controller.add_subscriber(temporary);
        }
        controller.goto(1, TransitionIntent::Advance);
        ctx.advance(ms(1000));
        assert_eq!(controller.subscriber_count(), 1);
    }

    #[test]
    fn test_jump_to_picks_direction() {
        let (ctx, controller, recorder) = setup();
        controller.jump_to(3);
        ctx.advance(ms(2000));
        ctx.advance(ms(2100));
        controller.jump_to(1);
        ctx.advance(ms(4000));

        let events = recorder.events.lock();
        assert_eq!(events[0].direction, TransitionIntent::Advance);
        assert_eq!(events[1].direction, TransitionIntent::Retreat);
        assert_eq!(controller.current(), 1);
    }
}
