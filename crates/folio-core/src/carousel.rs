//! Horizontal project carousel embedded in one slide
//!
//! While its host slide is current and its reveal has finished, the carousel
//! captures gestures and steps between cards. Stepping past either end hands
//! control back to the slide controller.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::animation::{Ease, Property, Target, Timeline, Tween};
use crate::context::CoordinationContext;
use crate::gesture::TransitionIntent;
use crate::lock::LockOwner;
use crate::navigation::{GotoOutcome, SlideChanged, SlideController, SlideSubscriber};

/// A card's natural frame, before the strip is translated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardFrame {
    pub left: f32,
    pub width: f32,
}

impl CardFrame {
    pub fn center(&self) -> f32 {
        self.left + self.width / 2.0
    }
}

/// Geometry the carousel recenters against
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CardLayout {
    pub viewport_width: f32,
    pub cards: Vec<CardFrame>,
}

impl CardLayout {
    /// Equal-width cards laid out left to right after a leading spacer
    pub fn uniform(viewport_width: f32, count: usize, card_width: f32, gap: f32, leading: f32) -> Self {
        let cards = (0..count)
            .map(|i| CardFrame {
                left: leading + i as f32 * (card_width + gap),
                width: card_width,
            })
            .collect();
        Self { viewport_width, cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Strip translation that puts card `index` in the middle of the viewport
    pub fn center_offset(&self, index: usize) -> f32 {
        self.cards
            .get(index)
            .map(|card| self.viewport_width / 2.0 - card.center())
            .unwrap_or(0.0)
    }
}

/// Result of a carousel step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The active card changed
    Moved { from: usize, to: usize },
    /// The step ran off an end and was handed to the slide controller
    Delegated { slide: isize, outcome: GotoOutcome },
    Ignored(StepIgnored),
}

/// Why a step was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepIgnored {
    /// The carousel is not capturing gestures
    Inactive,
    /// Some owner holds the gesture lock
    Locked,
}

#[derive(Debug)]
struct CarouselState {
    index: usize,
    layout: CardLayout,
}

/// Card carousel hosted by one slide
pub struct CarouselController {
    ctx: Arc<CoordinationContext>,
    slides: SlideController,
    host_slide: usize,
    state: RwLock<CarouselState>,
}

impl CarouselController {
    /// Create the carousel in its hidden pre-reveal state
    pub fn new(
        ctx: Arc<CoordinationContext>,
        slides: SlideController,
        host_slide: usize,
        layout: CardLayout,
    ) -> Self {
        ctx.set(Target::Header, Property::Opacity, 0.0);
        ctx.set(Target::Header, Property::X, -50.0);
        ctx.set(Target::Track, Property::Opacity, 0.0);
        ctx.set(Target::Caption, Property::Opacity, 0.0);
        ctx.set(Target::Caption, Property::Y, 20.0);
        for card in 0..layout.len() {
            ctx.set(Target::Card(card), Property::Scale, 0.9);
            ctx.set(Target::Card(card), Property::Opacity, 0.0);
        }

        Self {
            ctx,
            slides,
            host_slide,
            state: RwLock::new(CarouselState { index: 0, layout }),
        }
    }

    /// Active card
    pub fn index(&self) -> usize {
        self.state.read().index
    }

    pub fn card_count(&self) -> usize {
        self.state.read().layout.len()
    }

    pub fn host_slide(&self) -> usize {
        self.host_slide
    }

    pub fn is_capturing(&self) -> bool {
        self.ctx.capture.is_active()
    }

    /// Replace the card geometry, keeping the active card centered
    pub fn set_layout(&self, layout: CardLayout) {
        let mut state = self.state.write();
        state.index = state.index.min(layout.len().saturating_sub(1));
        state.layout = layout;
        let offset = state.layout.center_offset(state.index);
        drop(state);

        self.ctx.set(Target::Track, Property::X, offset);
    }

    /// Step one card in the direction of `intent`, or hand off to the page
    /// when the step would leave the strip. An empty strip hands off every
    /// step.
    pub fn step(&self, intent: TransitionIntent) -> StepOutcome {
        if !self.ctx.capture.is_active() {
            return StepOutcome::Ignored(StepIgnored::Inactive);
        }
        if self.ctx.lock.is_locked() {
            tracing::trace!("carousel step ignored: locked by {:?}", self.ctx.lock.holders());
            return StepOutcome::Ignored(StepIgnored::Locked);
        }

        let mut state = self.state.write();
        let count = state.layout.len();
        let from = state.index;
        let next = from as isize + intent.sign();
        if next < 0 || next >= count as isize {
            drop(state);
            return self.delegate(intent);
        }

        let to = next as usize;
        state.index = to;
        let offset = state.layout.center_offset(to);
        drop(state);

        let token = self.ctx.lock.acquire(LockOwner::CarouselStep);
        self.ctx.play(self.focus_timeline(to, count, offset));
        let guard = self.ctx.settings.carousel.step_guard;
        self.ctx
            .play(Timeline::delay("carousel-step-guard", guard).then(move || token.release()));

        tracing::debug!("carousel card {} -> {}", from, to);
        StepOutcome::Moved { from, to }
    }

    fn delegate(&self, intent: TransitionIntent) -> StepOutcome {
        self.ctx.capture.set(false);
        let slide = self.host_slide as isize + intent.sign();
        let outcome = self.slides.goto(slide, intent);
        if !outcome.is_started() {
            // Nowhere to go; keep the strip in charge
            self.ctx.capture.set(true);
        }

        let token = self.ctx.lock.acquire(LockOwner::CarouselStep);
        let guard = self.ctx.settings.carousel.boundary_guard;
        self.ctx
            .play(Timeline::delay("carousel-boundary-guard", guard).then(move || token.release()));

        tracing::info!("carousel handed off to slide {} ({:?})", slide, outcome);
        StepOutcome::Delegated { slide, outcome }
    }

    /// Strip recenter plus card emphasis
    fn focus_timeline(&self, active: usize, count: usize, offset: f32) -> Timeline {
        let timing = &self.ctx.settings.carousel;
        let timeline = Timeline::new("carousel-focus").add(
            Tween::to(Target::Track, Property::X, offset)
                .duration(timing.track_duration)
                .ease(timing.track_ease),
        );
        self.emphasis(timeline, active, count, 0.0)
    }

    fn emphasis(&self, mut timeline: Timeline, active: usize, count: usize, at: f32) -> Timeline {
        let timing = &self.ctx.settings.carousel;
        for card in 0..count {
            let (scale, opacity) = if card == active {
                (timing.active_scale, 1.0)
            } else {
                (timing.idle_scale, timing.idle_opacity)
            };
            timeline = timeline
                .add(
                    Tween::to(Target::Card(card), Property::Scale, scale)
                        .duration(timing.card_duration)
                        .ease(timing.card_ease)
                        .at(at),
                )
                .add(
                    Tween::to(Target::Card(card), Property::Opacity, opacity)
                        .duration(timing.card_duration)
                        .ease(timing.card_ease)
                        .at(at),
                );
        }
        timeline
    }

    fn reveal(&self) {
        let token = self.ctx.lock.acquire(LockOwner::Intro("projects"));

        let state = self.state.read();
        let (active, count) = (state.index, state.layout.len());
        let offset = state.layout.center_offset(active);
        drop(state);

        // Pre-center so the strip fades in already aligned
        self.ctx.set(Target::Track, Property::X, offset);

        let timeline = Timeline::new("carousel-reveal")
            .add(Tween::to(Target::Header, Property::Opacity, 1.0).duration(1.0).ease(Ease::Power3Out).at(0.2))
            .add(Tween::to(Target::Header, Property::X, 0.0).duration(1.0).ease(Ease::Power3Out).at(0.2))
            .add(Tween::to(Target::Track, Property::Opacity, 1.0).duration(0.6).ease(Ease::Power2Out).at(0.3))
            .add(Tween::to(Target::Caption, Property::Opacity, 1.0).duration(0.6).ease(Ease::Power2Out).at(0.7))
            .add(Tween::to(Target::Caption, Property::Y, 0.0).duration(0.6).ease(Ease::Power2Out).at(0.7));
        let timeline = self.emphasis(timeline, active, count, 0.5);

        let ctx = Arc::clone(&self.ctx);
        self.ctx.play(timeline.then(move || {
            ctx.capture.set(true);
            token.release();
        }));
        tracing::debug!("carousel reveal started on card {}", active);
    }

    fn hide(&self) {
        self.ctx.capture.set(false);
        self.ctx.play(
            Timeline::new("carousel-hide")
                .add(Tween::to(Target::Header, Property::Opacity, 0.0).duration(0.5))
                .add(Tween::to(Target::Header, Property::X, -50.0).duration(0.5))
                .add(Tween::to(Target::Track, Property::Opacity, 0.0).duration(0.4))
                .add(Tween::to(Target::Caption, Property::Opacity, 0.0).duration(0.4))
                .add(Tween::to(Target::Caption, Property::Y, 20.0).duration(0.4)),
        );
    }
}

impl SlideSubscriber for CarouselController {
    fn on_slide_changed(&self, event: &SlideChanged) {
        if event.index == self.host_slide {
            self.reveal();
        } else {
            self.hide();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::IgnoreReason;
    use crate::settings::MotionSettings;
    use std::time::Duration;

    const HOST: usize = 2;
    const CARDS: usize = 7;

    struct Harness {
        ctx: Arc<CoordinationContext>,
        slides: SlideController,
        carousel: Arc<CarouselController>,
        clock: u64,
    }

    impl Harness {
        fn new() -> Self {
            Self::hosted(HOST, CARDS)
        }

        fn hosted(host: usize, cards: usize) -> Self {
            let ctx = Arc::new(CoordinationContext::new(MotionSettings::default()));
            let slides = SlideController::new(Arc::clone(&ctx), 4);
            let layout = CardLayout::uniform(1000.0, cards, 300.0, 50.0, 100.0);
            let carousel = Arc::new(CarouselController::new(Arc::clone(&ctx), slides.clone(), host, layout));
            slides.add_subscriber(carousel.clone());
            Self { ctx, slides, carousel, clock: 0 }
        }

        fn wait(&mut self, millis: u64) {
            self.clock += millis;
            self.ctx.advance(Duration::from_millis(self.clock));
        }

        /// Land on the host slide and let the reveal finish
        fn activate(&mut self) {
            let host = self.carousel.host_slide() as isize;
            assert!(self.slides.goto(host, TransitionIntent::Advance).is_started());
            self.wait(1000);
            self.wait(1400);
            assert!(self.carousel.is_capturing());
            assert!(!self.ctx.lock.is_locked());
        }
    }

    #[test]
    fn test_center_offset_recenters_cards() {
        let layout = CardLayout::uniform(1000.0, 3, 300.0, 50.0, 100.0);
        assert_eq!(layout.center_offset(0), 250.0);
        assert_eq!(layout.center_offset(1), -100.0);

        let uneven = CardLayout {
            viewport_width: 800.0,
            cards: vec![CardFrame { left: 0.0, width: 200.0 }, CardFrame { left: 240.0, width: 500.0 }],
        };
        assert_eq!(uneven.center_offset(1), 400.0 - 490.0);
        assert_eq!(uneven.center_offset(5), 0.0);
    }

    #[test]
    fn test_inactive_until_reveal_completes() {
        let mut h = Harness::new();
        assert_eq!(h.carousel.step(TransitionIntent::Advance), StepOutcome::Ignored(StepIgnored::Inactive));

        h.slides.goto(HOST as isize, TransitionIntent::Advance);
        h.wait(1000);
        assert!(!h.carousel.is_capturing());
        assert!(h.ctx.lock.holders().contains(&LockOwner::Intro("projects")));
        assert_eq!(h.ctx.value(Target::Track, Property::X), 250.0);

        h.wait(1400);
        assert!(h.carousel.is_capturing());
        assert_eq!(h.ctx.value(Target::Card(0), Property::Scale), 1.1);
        assert_eq!(h.ctx.value(Target::Card(1), Property::Opacity), 0.5);
    }

    #[test]
    fn test_step_moves_and_recenters() {
        let mut h = Harness::new();
        h.activate();

        assert_eq!(h.carousel.step(TransitionIntent::Advance), StepOutcome::Moved { from: 0, to: 1 });
        assert_eq!(h.carousel.index(), 1);
        assert_eq!(h.carousel.step(TransitionIntent::Advance), StepOutcome::Ignored(StepIgnored::Locked));

        h.wait(800);
        assert_eq!(h.ctx.value(Target::Track, Property::X), -100.0);
        assert_eq!(h.ctx.value(Target::Card(1), Property::Scale), 1.1);
        assert_eq!(h.ctx.value(Target::Card(0), Property::Scale), 0.9);
    }

    #[test]
    fn test_guard_reopens_before_strip_settles() {
        let mut h = Harness::new();
        h.activate();

        h.carousel.step(TransitionIntent::Advance);
        h.wait(400);
        assert!(!h.ctx.lock.is_locked());
        assert_eq!(h.carousel.step(TransitionIntent::Advance), StepOutcome::Moved { from: 1, to: 2 });

        h.wait(800);
        assert_eq!(h.ctx.value(Target::Track, Property::X), 250.0 - 700.0);
    }

    #[test]
    fn test_every_in_bounds_step_increments() {
        let mut h = Harness::new();
        h.activate();

        for j in 0..CARDS - 1 {
            assert_eq!(h.carousel.step(TransitionIntent::Advance), StepOutcome::Moved { from: j, to: j + 1 });
            h.wait(400);
        }
        assert_eq!(h.carousel.index(), CARDS - 1);
    }

    #[test]
    fn test_last_card_delegates_to_next_slide() {
        let mut h = Harness::new();
        h.activate();
        for _ in 0..CARDS - 1 {
            h.carousel.step(TransitionIntent::Advance);
            h.wait(400);
        }

        let outcome = h.carousel.step(TransitionIntent::Advance);
        assert_eq!(
            outcome,
            StepOutcome::Delegated {
                slide: 3,
                outcome: GotoOutcome::Started { from: 2, to: 3 }
            }
        );
        assert!(!h.carousel.is_capturing());
        assert_eq!(h.carousel.index(), CARDS - 1);

        h.wait(1000);
        assert_eq!(h.slides.current(), 3);
        // Hide runs from the settle
        h.wait(400);
        assert_eq!(h.carousel.index(), CARDS - 1);
        assert_eq!(h.ctx.value(Target::Track, Property::Opacity), 0.0);
        assert!(!h.ctx.lock.is_locked());
    }

    #[test]
    fn test_first_card_delegates_to_previous_slide() {
        let mut h = Harness::new();
        h.activate();

        let outcome = h.carousel.step(TransitionIntent::Retreat);
        assert_eq!(
            outcome,
            StepOutcome::Delegated {
                slide: 1,
                outcome: GotoOutcome::Started { from: 2, to: 1 }
            }
        );
        assert_eq!(h.carousel.index(), 0);

        h.wait(1100);
        assert_eq!(h.slides.current(), 1);
    }

    #[test]
    fn test_empty_strip_hands_off_both_ways() {
        let mut h = Harness::hosted(HOST, 0);
        h.activate();

        assert_eq!(
            h.carousel.step(TransitionIntent::Advance),
            StepOutcome::Delegated {
                slide: 3,
                outcome: GotoOutcome::Started { from: 2, to: 3 }
            }
        );
        assert_eq!(h.carousel.index(), 0);
        h.wait(1000);
        h.wait(400);
        assert_eq!(h.slides.current(), 3);

        assert!(h.slides.goto(HOST as isize, TransitionIntent::Retreat).is_started());
        h.wait(1000);
        h.wait(1400);
        assert!(h.carousel.is_capturing());
        assert_eq!(
            h.carousel.step(TransitionIntent::Retreat),
            StepOutcome::Delegated {
                slide: 1,
                outcome: GotoOutcome::Started { from: 2, to: 1 }
            }
        );
    }

    #[test]
    fn test_refused_handoff_keeps_capture() {
        // Last slide hosts the strip, so there is no slide after it
        let mut h = Harness::hosted(3, 2);
        h.activate();
        h.carousel.step(TransitionIntent::Advance);
        h.wait(400);

        assert_eq!(
            h.carousel.step(TransitionIntent::Advance),
            StepOutcome::Delegated {
                slide: 4,
                outcome: GotoOutcome::Ignored(IgnoreReason::OutOfRange)
            }
        );
        assert!(h.carousel.is_capturing());
        assert_eq!(h.carousel.index(), 1);
        assert_eq!(h.slides.current(), 3);
        assert!(h.ctx.lock.holders().contains(&LockOwner::CarouselStep));

        h.wait(800);
        assert!(!h.ctx.lock.is_locked());
        assert_eq!(h.carousel.step(TransitionIntent::Retreat), StepOutcome::Moved { from: 1, to: 0 });
    }

    #[test]
    fn test_return_visit_resumes_on_last_card() {
        let mut h = Harness::new();
        h.activate();
        h.carousel.step(TransitionIntent::Advance);
        h.wait(400);
        h.carousel.step(TransitionIntent::Retreat);
        h.wait(400);
        h.carousel.step(TransitionIntent::Advance);
        h.wait(400);
        h.carousel.step(TransitionIntent::Advance);
        h.wait(400);
        assert_eq!(h.carousel.index(), 2);

        // Leave and come back from below
        h.slides.goto(3, TransitionIntent::Advance);
        assert_eq!(h.slides.goto(1, TransitionIntent::Retreat), GotoOutcome::Ignored(IgnoreReason::Locked));
        h.wait(1100);
        h.wait(100);
        assert!(h.slides.goto(2, TransitionIntent::Retreat).is_started());
        h.wait(1000);
        assert_eq!(h.ctx.value(Target::Track, Property::X), 250.0 - 700.0);
        h.wait(1400);
        assert!(h.carousel.is_capturing());
        assert_eq!(h.carousel.index(), 2);
    }

    #[test]
    fn test_relayout_keeps_active_card_centered() {
        let mut h = Harness::new();
        h.activate();
        h.carousel.step(TransitionIntent::Advance);
        h.wait(800);

        h.carousel.set_layout(CardLayout::uniform(600.0, CARDS, 200.0, 20.0, 40.0));
        assert_eq!(h.carousel.index(), 1);
        assert_eq!(h.ctx.value(Target::Track, Property::X), 300.0 - (40.0 + 220.0 + 100.0));
    }
}
