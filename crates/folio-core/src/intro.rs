//! Slide intro choreographies
//!
//! Intros play the first time their slide is reached and hold an
//! [`LockOwner::Intro`] token until they finish, so slide navigation waits for
//! them.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::animation::{Ease, Property, Target, Timeline, TimelineId, Tween};
use crate::context::CoordinationContext;
use crate::lock::LockOwner;
use crate::navigation::{SlideChanged, SlideSubscriber};

/// Word counts for the hero title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    /// Words of the opening line (name)
    pub first_words: usize,
    /// Words of the closing line (role)
    pub second_words: usize,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            first_words: 2,
            second_words: 2,
        }
    }
}

/// Mount intro of the hero slide: the name rises in, holds, lifts away, and
/// the role flips in followed by the rule line and subtitle.
pub fn hero_timeline(config: &HeroConfig) -> Timeline {
    let mut timeline = Timeline::new("hero-intro").stagger(config.first_words, 0.1, |i| {
        Tween::from_to(Target::Group("hero-word-1", i), Property::Y, 100.0, 0.0)
            .duration(0.6)
            .ease(Ease::Power4Out)
            .at(0.1)
            .immediate()
    });
    timeline = timeline.stagger(config.first_words, 0.1, |i| {
        Tween::from_to(Target::Group("hero-word-1", i), Property::Opacity, 0.0, 1.0)
            .duration(0.6)
            .ease(Ease::Power4Out)
            .at(0.1)
            .immediate()
    });
    timeline = timeline.hold(0.4);

    let out_at = timeline.duration() + 0.1;
    for (property, to) in [(Property::Y, -100.0), (Property::Opacity, 0.0)] {
        timeline = timeline.stagger(config.first_words, 0.05, |i| {
            Tween::to(Target::Group("hero-word-1", i), property, to)
                .duration(0.5)
                .ease(Ease::Power3In)
                .at(out_at)
        });
    }

    let step_two_at = timeline.duration();
    timeline = timeline.add(
        Tween::from_to(Target::Element("hero-step-2"), Property::Opacity, 0.0, 1.0)
            .at(step_two_at)
            .immediate(),
    );

    let flip_at = (step_two_at - 0.2).max(0.0);
    let flips = [
        (Property::Y, 100.0, 0.0),
        (Property::RotationX, -90.0, 0.0),
        (Property::Opacity, 0.0, 1.0),
    ];
    for (property, from, to) in flips {
        timeline = timeline.stagger(config.second_words, 0.1, |i| {
            Tween::from_to(Target::Group("hero-word-2", i), property, from, to)
                .duration(0.7)
                .ease(Ease::Power3Out)
                .at(flip_at)
                .immediate()
        });
    }

    timeline = timeline.append(
        Tween::from_to(Target::Element("hero-line"), Property::ScaleX, 0.0, 1.0)
            .duration(0.6)
            .ease(Ease::Power3InOut)
            .immediate(),
        -0.4,
    );

    let sub_at = (timeline.duration() - 0.3).max(0.0);
    timeline
        .add(
            Tween::from_to(Target::Element("hero-sub"), Property::Y, 32.0, 0.0)
                .duration(0.6)
                .ease(Ease::Power2Out)
                .at(sub_at)
                .immediate(),
        )
        .add(
            Tween::from_to(Target::Element("hero-sub"), Property::Opacity, 0.0, 1.0)
                .duration(0.6)
                .ease(Ease::Power2Out)
                .at(sub_at)
                .immediate(),
        )
}

/// Entrance of the about slide: a typed headline, then the biography, the
/// skills headings, and the skill list.
///
/// A `reveal_chars` of zero skips the typewriter.
pub fn about_timeline(reveal_chars: usize, skill_count: usize) -> Timeline {
    let mut timeline = Timeline::new("about-intro");
    if reveal_chars > 0 {
        timeline = timeline.add(
            Tween::from_to(Target::Element("typed-headline"), Property::Reveal, 0.0, 1.0)
                .duration(2.0)
                .immediate(),
        );
    }

    for (property, from, to) in [(Property::Opacity, 0.0, 1.0), (Property::Y, 20.0, 0.0)] {
        timeline = timeline.add(
            Tween::from_to(Target::Element("about-paragraph"), property, from, to)
                .duration(1.0)
                .ease(Ease::Power3Out)
                .at(2.3)
                .immediate(),
        );
    }

    for (i, heading) in ["skills-title", "skills-subtitle"].into_iter().enumerate() {
        let at = 2.6 + 0.2 * i as f32;
        timeline = timeline
            .add(
                Tween::from_to(Target::Element(heading), Property::Opacity, 0.0, 1.0)
                    .duration(1.0)
                    .ease(Ease::Power3Out)
                    .at(at)
                    .immediate(),
            )
            .add(
                Tween::from_to(Target::Element(heading), Property::Y, 50.0, 0.0)
                    .duration(1.0)
                    .ease(Ease::Power3Out)
                    .at(at)
                    .immediate(),
            );
    }

    timeline
        .stagger(skill_count, 0.02, |i| {
            Tween::from_to(Target::Group("skill", i), Property::Opacity, 0.0, 1.0)
                .duration(0.6)
                .ease(Ease::Power2Out)
                .at(3.0)
                .immediate()
        })
        .stagger(skill_count, 0.02, |i| {
            Tween::from_to(Target::Group("skill", i), Property::Y, 20.0, 0.0)
                .duration(0.6)
                .ease(Ease::Power2Out)
                .at(3.0)
                .immediate()
        })
}

/// Characters of a `total`-long text shown at typewriter progress `reveal`
pub fn revealed_chars(reveal: f32, total: usize) -> usize {
    ((reveal.clamp(0.0, 1.0) * total as f32).floor() as usize).min(total)
}

/// Builds a fresh copy of an intro timeline
pub type TimelineFactory = Box<dyn Fn() -> Timeline + Send + Sync>;

/// Lifecycle of a one-shot intro
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroPhase {
    Pending,
    Running(TimelineId),
    Done,
}

/// Intro that plays once, the first time its slide becomes current
pub struct OneShotIntro {
    ctx: Arc<CoordinationContext>,
    slide: usize,
    name: &'static str,
    make: TimelineFactory,
    phase: Arc<Mutex<IntroPhase>>,
}

impl OneShotIntro {
    /// Create the intro and write its starting values so the slide is staged
    /// before it is ever shown
    pub fn new(
        ctx: Arc<CoordinationContext>,
        slide: usize,
        name: &'static str,
        make: impl Fn() -> Timeline + Send + Sync + 'static,
    ) -> Self {
        let intro = Self {
            ctx,
            slide,
            name,
            make: Box::new(make),
            phase: Arc::new(Mutex::new(IntroPhase::Pending)),
        };
        intro.stage();
        intro
    }

    pub fn slide(&self) -> usize {
        self.slide
    }

    pub fn phase(&self) -> IntroPhase {
        *self.phase.lock()
    }

    /// Play the intro if it has not played yet
    pub fn start(&self) -> Option<TimelineId> {
        let mut phase = self.phase.lock();
        if *phase != IntroPhase::Pending {
            return None;
        }

        let token = self.ctx.lock.acquire(LockOwner::Intro(self.name));
        let done = Arc::clone(&self.phase);
        let name = self.name;
        let id = self.ctx.play((self.make)().then(move || {
            *done.lock() = IntroPhase::Done;
            token.release();
            tracing::debug!("intro '{}' complete", name);
        }));
        *phase = IntroPhase::Running(id);

        tracing::info!("intro '{}' started on slide {}", self.name, self.slide);
        Some(id)
    }

    /// Jump a running intro to its final frame
    pub fn fast_forward(&self) {
        let IntroPhase::Running(id) = self.phase() else {
            return;
        };

        match self.ctx.finish(id) {
            Some(continuation) => continuation(),
            None => {
                // Superseded mid-flight; its token went with the continuation
                self.settle_values();
                *self.phase.lock() = IntroPhase::Done;
            }
        }
        tracing::debug!("intro '{}' fast-forwarded", self.name);
    }

    fn stage(&self) {
        let mut tweens = (self.make)().tweens().to_vec();
        // Latest first so the earliest start value is the one left standing
        tweens.sort_by(|a, b| b.offset.total_cmp(&a.offset));
        for tween in tweens {
            if let Some(from) = tween.from {
                self.ctx.set(tween.target, tween.property, from);
            }
        }
    }

    fn settle_values(&self) {
        let mut tweens = (self.make)().tweens().to_vec();
        tweens.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        for tween in tweens {
            self.ctx.set(tween.target, tween.property, tween.to);
        }
    }
}

impl SlideSubscriber for OneShotIntro {
    fn on_slide_changed(&self, event: &SlideChanged) {
        if event.index != self.slide {
            self.fast_forward();
            return;
        }
        match self.phase() {
            IntroPhase::Pending => {
                self.start();
            }
            IntroPhase::Done => self.settle_values(),
            IntroPhase::Running(_) => {}
        }
    }
}
