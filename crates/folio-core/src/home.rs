//! The landing page: four stacked slides with a carousel on the third
//!
//! [`HomePage`] owns one [`CoordinationContext`] and wires the slide
//! controller, the carousel and the intros to it. Hosts feed it raw input and
//! a clock; everything else is read back through [`HomePage::property`].

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::{Property, Target};
use crate::carousel::{CardLayout, CarouselController, StepOutcome};
use crate::context::CoordinationContext;
use crate::gesture::{GestureNormalizer, InputEvent, SwipeAxis};
use crate::intro::{about_timeline, hero_timeline, HeroConfig, OneShotIntro};
use crate::navigation::{GotoOutcome, SlideController, SlidePhase};
use crate::settings::MotionSettings;

/// Slides of the landing page, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HomeSlide {
    Hero,
    About,
    Projects,
    Contact,
}

impl HomeSlide {
    pub const ALL: [HomeSlide; 4] = [HomeSlide::Hero, HomeSlide::About, HomeSlide::Projects, HomeSlide::Contact];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Label shown next to the navigation dot
    pub fn label(self) -> &'static str {
        match self {
            HomeSlide::Hero => "Home",
            HomeSlide::About => "About",
            HomeSlide::Projects => "Projects",
            HomeSlide::Contact => "Contact",
        }
    }
}

/// Where an input event ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Dropped(DropReason),
    /// Routed to the slide controller
    Slide(GotoOutcome),
    /// Routed to the carousel
    Carousel(StepOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Below threshold, or only half of a swipe
    NoIntent,
    Locked,
    Unmounted,
}

/// Text-dependent sizes of the intros
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroCopy {
    pub hero: HeroConfig,
    /// Length of the typed about headline
    pub headline_chars: usize,
    /// Number of skills listed on the about slide
    pub skill_count: usize,
}

impl Default for IntroCopy {
    fn default() -> Self {
        Self {
            hero: HeroConfig::default(),
            headline_chars: 32,
            skill_count: 8,
        }
    }
}

/// A mounted landing page
pub struct HomePage {
    ctx: Arc<CoordinationContext>,
    slides: SlideController,
    carousel: Arc<CarouselController>,
    intros: Vec<Arc<OneShotIntro>>,
    normalizer: GestureNormalizer,
    mounted: bool,
}

impl HomePage {
    /// Mount with default intro copy
    pub fn mount(settings: MotionSettings, card_layout: CardLayout) -> Self {
        Self::mount_with(settings, card_layout, IntroCopy::default())
    }

    /// Build the page, stage every slide and start the hero intro
    pub fn mount_with(settings: MotionSettings, card_layout: CardLayout, copy: IntroCopy) -> Self {
        let normalizer = GestureNormalizer::new(settings.gestures);
        let ctx = Arc::new(CoordinationContext::new(settings));
        let slides = SlideController::new(Arc::clone(&ctx), HomeSlide::ALL.len());

        let carousel = Arc::new(CarouselController::new(
            Arc::clone(&ctx),
            slides.clone(),
            HomeSlide::Projects.index(),
            card_layout,
        ));
        let hero = Arc::new(OneShotIntro::new(
            Arc::clone(&ctx),
            HomeSlide::Hero.index(),
            "hero",
            move || hero_timeline(&copy.hero),
        ));
        let about = Arc::new(OneShotIntro::new(
            Arc::clone(&ctx),
            HomeSlide::About.index(),
            "about",
            move || about_timeline(copy.headline_chars, copy.skill_count),
        ));

        slides.add_subscriber(carousel.clone());
        slides.add_subscriber(hero.clone());
        slides.add_subscriber(about.clone());

        hero.start();
        tracing::info!("home page mounted with {} cards", carousel.card_count());

        Self {
            ctx,
            slides,
            carousel,
            intros: vec![hero, about],
            normalizer,
            mounted: true,
        }
    }

    /// Normalize one raw event and route it to whichever controller owns
    /// gestures right now
    pub fn handle_input(&mut self, event: InputEvent) -> Dispatch {
        if !self.mounted {
            return Dispatch::Dropped(DropReason::Unmounted);
        }

        let capturing = self.ctx.capture.is_active() && self.slides.current() == self.carousel.host_slide();
        let axis = if capturing {
            SwipeAxis::Horizontal
        } else {
            SwipeAxis::Vertical
        };

        let Some(intent) = self.normalizer.feed(event, axis) else {
            return Dispatch::Dropped(DropReason::NoIntent);
        };
        if self.ctx.lock.is_locked() {
            tracing::trace!("{:?} dropped while locked", intent);
            return Dispatch::Dropped(DropReason::Locked);
        }

        if capturing {
            Dispatch::Carousel(self.carousel.step(intent))
        } else {
            Dispatch::Slide(self.slides.advance_intent(intent))
        }
    }

    /// Advance animations to `now` (time since mount)
    pub fn tick(&self, now: Duration) {
        if self.mounted {
            self.ctx.advance(now);
        }
    }

    /// Navigation-dot jump
    pub fn jump_to(&self, index: usize) -> GotoOutcome {
        self.slides.jump_to(index)
    }

    pub fn current_slide(&self) -> usize {
        self.slides.current()
    }

    pub fn slide_phase(&self) -> SlidePhase {
        self.slides.phase()
    }

    pub fn slide_count(&self) -> usize {
        self.slides.slide_count()
    }

    pub fn is_locked(&self) -> bool {
        self.ctx.lock.is_locked()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Current animated value
    pub fn property(&self, target: Target, property: Property) -> f32 {
        self.ctx.value(target, property)
    }

    pub fn carousel(&self) -> &CarouselController {
        &self.carousel
    }

    /// Recenter the carousel after a resize
    pub fn set_card_layout(&self, layout: CardLayout) {
        self.carousel.set_layout(layout);
    }

    pub fn settings(&self) -> &MotionSettings {
        &self.ctx.settings
    }

    /// Stop every animation and detach listeners. Running intros jump to
    /// their final frame; other held tokens are released with the timelines
    /// that owned them.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;

        for intro in &self.intros {
            intro.fast_forward();
        }
        self.ctx.sequencer.lock().clear();
        self.ctx.capture.set(false);
        self.slides.clear_subscribers();
        self.intros.clear();
        self.normalizer.reset();

        if self.ctx.lock.is_locked() {
            tracing::warn!("lock still held after unmount: {:?}", self.ctx.lock.holders());
        }
        tracing::info!("home page unmounted");
    }
}

impl Drop for HomePage {
    fn drop(&mut self) {
        self.unmount();
    }
}
