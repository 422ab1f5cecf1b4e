//! Coordination core for the portfolio landing page
//!
//! This crate owns everything that decides *when* the page moves: gesture
//! normalization, the slide and carousel state machines, the gesture lock and
//! the animation sequencer. It draws nothing; hosts read animated values back
//! and render them however they like.

pub mod animation;
pub mod carousel;
pub mod context;
pub mod gesture;
pub mod home;
pub mod intro;
pub mod lock;
pub mod navigation;
pub mod settings;

// Re-export commonly used types
pub use animation::{Ease, Property, Sequencer, Target, Timeline, TimelineId, Tween};
pub use carousel::{CardFrame, CardLayout, CarouselController, StepIgnored, StepOutcome};
pub use context::{CoordinationContext, HorizontalCapture};
pub use gesture::{GestureNormalizer, GestureThresholds, InputEvent, Point, SwipeAxis, TransitionIntent};
pub use home::{Dispatch, DropReason, HomePage, HomeSlide, IntroCopy};
pub use intro::{HeroConfig, IntroPhase, OneShotIntro};
pub use lock::{LockCoordinator, LockOwner, LockToken};
pub use navigation::{GotoOutcome, IgnoreReason, SlideChanged, SlideController, SlidePhase, SlideSubscriber};
pub use settings::{CarouselTiming, MotionSettings, SettingsError};
