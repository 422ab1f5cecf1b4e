//! Declarative timeline descriptions
//!
//! A [`Timeline`] is an ordered list of tweens, each with its own start
//! offset, plus one continuation that runs when the whole timeline settles.

use std::fmt;

use super::Ease;

/// Something on screen that carries animated properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// A top-level slide, by index
    Slide(usize),
    /// The horizontal card strip
    Track,
    /// One carousel card
    Card(usize),
    /// The carousel section heading
    Header,
    /// The description panel under the carousel
    Caption,
    /// A singleton decoration inside a slide
    Element(&'static str),
    /// One member of a repeated group inside a slide
    Group(&'static str, usize),
}

/// Animatable property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// Vertical offset in percent of the viewport height
    YPercent,
    /// Horizontal offset in logical pixels
    X,
    /// Vertical offset in logical pixels
    Y,
    Opacity,
    Scale,
    ScaleX,
    /// Rotation about the horizontal axis, in degrees
    RotationX,
    /// Revealed fraction of a typed-out text, `0..=1`
    Reveal,
}

impl Property {
    /// Value assumed for a property that was never written
    pub fn default_value(self) -> f32 {
        match self {
            Property::Opacity | Property::Scale | Property::ScaleX => 1.0,
            _ => 0.0,
        }
    }
}

/// One property animation
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub target: Target,
    pub property: Property,
    /// Start value; `None` starts from the current value
    pub from: Option<f32>,
    pub to: f32,
    /// Seconds
    pub duration: f32,
    pub ease: Ease,
    /// Seconds after the timeline starts
    pub offset: f32,
    /// Write `from` as soon as the timeline is played
    pub immediate: bool,
}

impl Tween {
    /// Animate from the current value to `to`
    pub fn to(target: Target, property: Property, to: f32) -> Self {
        Self {
            target,
            property,
            from: None,
            to,
            duration: 0.0,
            ease: Ease::Linear,
            offset: 0.0,
            immediate: false,
        }
    }

    /// Animate from an explicit start
    pub fn from_to(target: Target, property: Property, from: f32, to: f32) -> Self {
        Self {
            from: Some(from),
            ..Self::to(target, property, to)
        }
    }

    pub fn duration(mut self, seconds: f32) -> Self {
        self.duration = seconds.max(0.0);
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn at(mut self, offset: f32) -> Self {
        self.offset = offset.max(0.0);
        self
    }

    /// Hold the start value on screen until the tween begins
    pub fn immediate(mut self) -> Self {
        self.immediate = true;
        self
    }

    /// Offset at which the tween settles
    pub fn end(&self) -> f32 {
        self.offset + self.duration
    }
}

/// Work run once the timeline settles
pub type Continuation = Box<dyn FnOnce() + Send + 'static>;

/// Ordered tween set with a single continuation
pub struct Timeline {
    label: &'static str,
    tweens: Vec<Tween>,
    min_duration: f32,
    continuation: Option<Continuation>,
}

impl Timeline {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            tweens: Vec::new(),
            min_duration: 0.0,
            continuation: None,
        }
    }

    /// A timeline with no tweens that settles after `seconds`
    pub fn delay(label: &'static str, seconds: f32) -> Self {
        let mut timeline = Self::new(label);
        timeline.min_duration = seconds.max(0.0);
        timeline
    }

    /// Add a tween at its own absolute offset
    pub fn add(mut self, tween: Tween) -> Self {
        self.tweens.push(tween);
        self
    }

    /// Add a tween after everything so far, shifted by `gap` seconds
    /// (negative gaps overlap the previous tail)
    pub fn append(self, tween: Tween, gap: f32) -> Self {
        let offset = (self.duration() + gap).max(0.0);
        self.add(Tween { offset, ..tween })
    }

    /// Repeat `make(i)` for each member, each starting `each` seconds after
    /// the previous one
    pub fn stagger(mut self, count: usize, each: f32, make: impl Fn(usize) -> Tween) -> Self {
        for i in 0..count {
            let tween = make(i);
            let offset = tween.offset + each * i as f32;
            self.tweens.push(Tween { offset, ..tween });
        }
        self
    }

    /// Extend the timeline by an idle stretch
    pub fn hold(mut self, seconds: f32) -> Self {
        self.min_duration = self.duration() + seconds.max(0.0);
        self
    }

    /// Run `f` once every tween has settled
    pub fn then(mut self, f: impl FnOnce() + Send + 'static) -> Self {
        self.continuation = Some(Box::new(f));
        self
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    /// Total length in seconds
    pub fn duration(&self) -> f32 {
        self.tweens
            .iter()
            .map(Tween::end)
            .fold(self.min_duration, f32::max)
    }

    pub(crate) fn into_parts(self) -> (&'static str, Vec<Tween>, f32, Option<Continuation>) {
        let duration = self.duration();
        (self.label, self.tweens, duration, self.continuation)
    }
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("label", &self.label)
            .field("tweens", &self.tweens.len())
            .field("duration", &self.duration())
            .field("has_continuation", &self.continuation.is_some())
            .finish()
    }
}
