//! Clock-driven timeline scheduler
//!
//! The sequencer owns every animated value on the page. Hosts call
//! [`Sequencer::advance`] once per frame with the time since mount and run the
//! continuations it hands back after letting go of the sequencer.

use std::time::Duration;

use ahash::AHashMap;

use super::timeline::{Continuation, Property, Target, Timeline, Tween};

/// Seconds of slack when deciding whether a timeline has settled
const SETTLE_TOLERANCE: f64 = 1e-6;

/// Handle for a played timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimelineId(u64);

#[derive(Debug)]
struct ActiveTween {
    tween: Tween,
    start_value: Option<f32>,
}

struct ActiveTimeline {
    id: TimelineId,
    label: &'static str,
    started_at: Duration,
    duration: f32,
    tweens: Vec<ActiveTween>,
    continuation: Option<Continuation>,
}

/// Scheduler and property store
pub struct Sequencer {
    clock: Duration,
    values: AHashMap<(Target, Property), f32>,
    timelines: Vec<ActiveTimeline>,
    next_id: u64,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequencer {
    pub fn new() -> Self {
        Self {
            clock: Duration::ZERO,
            values: AHashMap::new(),
            timelines: Vec::new(),
            next_id: 0,
        }
    }

    /// Time of the last advance
    pub fn now(&self) -> Duration {
        self.clock
    }

    /// Start a timeline at the current clock.
    ///
    /// Any tween of another active timeline that animates the same
    /// target/property pair is removed, and that timeline loses its
    /// continuation.
    pub fn play(&mut self, timeline: Timeline) -> TimelineId {
        let id = TimelineId(self.next_id);
        self.next_id += 1;

        let (label, mut tweens, duration, continuation) = timeline.into_parts();
        tweens.sort_by(|a, b| a.offset.total_cmp(&b.offset));

        for tween in &tweens {
            self.overwrite(tween.target, tween.property, true);
        }
        for tween in tweens.iter().filter(|t| t.immediate) {
            if let Some(from) = tween.from {
                self.values.insert((tween.target, tween.property), from);
            }
        }

        tracing::trace!("playing timeline '{}' ({:.2}s)", label, duration);
        self.timelines.push(ActiveTimeline {
            id,
            label,
            started_at: self.clock,
            duration,
            tweens: tweens
                .into_iter()
                .map(|tween| ActiveTween { tween, start_value: None })
                .collect(),
            continuation,
        });
        id
    }

    /// Write a value now, stopping any tween on that pair
    pub fn set(&mut self, target: Target, property: Property, value: f32) {
        self.overwrite(target, property, false);
        self.values.insert((target, property), value);
    }

    /// Current value, if it was ever written
    pub fn value(&self, target: Target, property: Property) -> Option<f32> {
        self.values.get(&(target, property)).copied()
    }

    /// Current value, or `default` if it was never written
    pub fn value_or(&self, target: Target, property: Property, default: f32) -> f32 {
        self.value(target, property).unwrap_or(default)
    }

    /// Current value or the property's resting default
    pub fn value_or_default(&self, target: Target, property: Property) -> f32 {
        self.value_or(target, property, property.default_value())
    }

    pub fn is_active(&self, id: TimelineId) -> bool {
        self.timelines.iter().any(|t| t.id == id)
    }

    pub fn active_count(&self) -> usize {
        self.timelines.len()
    }

    /// Move the clock forward and return the continuations of every timeline
    /// that settled, in settle order. A `now` earlier than the clock is
    /// treated as the current clock.
    pub fn advance(&mut self, now: Duration) -> Vec<Continuation> {
        if now > self.clock {
            self.clock = now;
        }

        let clock = self.clock;
        let values = &mut self.values;
        for timeline in &mut self.timelines {
            let elapsed = clock.saturating_sub(timeline.started_at).as_secs_f32();
            for active in &mut timeline.tweens {
                let local = elapsed - active.tween.offset;
                if local < 0.0 {
                    continue;
                }
                let key = (active.tween.target, active.tween.property);
                let start = match active.start_value {
                    Some(start) => start,
                    None => {
                        let start = active
                            .tween
                            .from
                            .or_else(|| values.get(&key).copied())
                            .unwrap_or_else(|| key.1.default_value());
                        active.start_value = Some(start);
                        start
                    }
                };
                let progress = if active.tween.duration > 0.0 {
                    local / active.tween.duration
                } else {
                    1.0
                };
                let value = if progress >= 1.0 {
                    active.tween.to
                } else {
                    let eased = active.tween.ease.apply(progress);
                    start + (active.tween.to - start) * eased
                };
                values.insert(key, value);
            }
        }

        let mut settled: Vec<(Duration, TimelineId)> = self
            .timelines
            .iter()
            .filter_map(|t| {
                let elapsed = clock.saturating_sub(t.started_at).as_secs_f64();
                (elapsed >= t.duration as f64 - SETTLE_TOLERANCE)
                    .then_some((t.started_at + Duration::from_secs_f32(t.duration), t.id))
            })
            .collect();
        settled.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut continuations = Vec::new();
        for (_, id) in settled {
            if let Some(position) = self.timelines.iter().position(|t| t.id == id) {
                let timeline = self.timelines.remove(position);
                for active in &timeline.tweens {
                    self.values
                        .insert((active.tween.target, active.tween.property), active.tween.to);
                }
                tracing::trace!("timeline '{}' settled", timeline.label);
                if let Some(continuation) = timeline.continuation {
                    continuations.push(continuation);
                }
            }
        }
        continuations
    }

    /// Jump a timeline to its end values and hand back its continuation
    pub fn finish(&mut self, id: TimelineId) -> Option<Continuation> {
        let position = self.timelines.iter().position(|t| t.id == id)?;
        let timeline = self.timelines.remove(position);
        for active in &timeline.tweens {
            self.values
                .insert((active.tween.target, active.tween.property), active.tween.to);
        }
        tracing::debug!("timeline '{}' fast-forwarded", timeline.label);
        timeline.continuation
    }

    /// Stop a timeline where it is; its continuation is dropped
    pub fn kill(&mut self, id: TimelineId) {
        self.timelines.retain(|t| t.id != id);
    }

    /// Drop every timeline and continuation
    pub fn clear(&mut self) {
        self.timelines.clear();
    }

    fn overwrite(&mut self, target: Target, property: Property, supersede: bool) {
        for timeline in &mut self.timelines {
            let before = timeline.tweens.len();
            timeline
                .tweens
                .retain(|a| a.tween.target != target || a.tween.property != property);
            if supersede && timeline.tweens.len() != before && timeline.continuation.take().is_some() {
                tracing::debug!(
                    "timeline '{}' superseded on {:?}/{:?}",
                    timeline.label,
                    target,
                    property
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Ease;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn run(continuations: Vec<Continuation>) -> usize {
        let count = continuations.len();
        for c in continuations {
            c();
        }
        count
    }

    #[test]
    fn test_tween_interpolates_and_settles() {
        let mut sequencer = Sequencer::new();
        sequencer.play(
            Timeline::new("fade")
                .add(Tween::from_to(Target::Header, Property::Opacity, 0.0, 1.0).duration(1.0)),
        );

        sequencer.advance(ms(500));
        let mid = sequencer.value(Target::Header, Property::Opacity).unwrap();
        assert!((mid - 0.5).abs() < 1e-3);

        sequencer.advance(ms(1000));
        assert_eq!(sequencer.value(Target::Header, Property::Opacity), Some(1.0));
        assert_eq!(sequencer.active_count(), 0);
    }

    #[test]
    fn test_continuation_runs_exactly_once_after_all_tweens() {
        let mut sequencer = Sequencer::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);

        sequencer.play(
            Timeline::new("pair")
                .add(Tween::to(Target::Slide(0), Property::YPercent, -100.0).duration(1.0))
                .add(Tween::from_to(Target::Slide(1), Property::YPercent, 100.0, 0.0).duration(0.8).at(0.1))
                .then(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
        );

        assert_eq!(run(sequencer.advance(ms(950))), 0);
        assert_eq!(run(sequencer.advance(ms(1000))), 1);
        assert_eq!(run(sequencer.advance(ms(2000))), 0);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_retarget_drops_older_continuation() {
        let mut sequencer = Sequencer::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);

        sequencer.play(
            Timeline::new("first")
                .add(Tween::to(Target::Track, Property::X, -400.0).duration(0.8).ease(Ease::Power3InOut))
                .then(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
        );
        sequencer.advance(ms(400));
        let partial = sequencer.value(Target::Track, Property::X).unwrap();

        sequencer.play(Timeline::new("second").add(Tween::to(Target::Track, Property::X, -800.0).duration(0.8)));
        run(sequencer.advance(ms(1200)));

        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(sequencer.value(Target::Track, Property::X), Some(-800.0));
        assert!(partial < 0.0 && partial > -400.0);
    }

    #[test]
    fn test_relative_tween_starts_from_current_value() {
        let mut sequencer = Sequencer::new();
        sequencer.set(Target::Card(0), Property::Scale, 0.9);
        sequencer.play(Timeline::new("grow").add(Tween::to(Target::Card(0), Property::Scale, 1.1).duration(0.5).at(0.5)));

        sequencer.advance(ms(250));
        assert_eq!(sequencer.value(Target::Card(0), Property::Scale), Some(0.9));
        assert_eq!(sequencer.value_or(Target::Card(1), Property::Scale, 0.5), 0.5);
        sequencer.advance(ms(1000));
        assert_eq!(sequencer.value(Target::Card(0), Property::Scale), Some(1.1));
    }

    #[test]
    fn test_immediate_tween_writes_start_on_play() {
        let mut sequencer = Sequencer::new();
        sequencer.play(
            Timeline::new("reveal")
                .add(Tween::from_to(Target::Group("word", 0), Property::Y, 100.0, 0.0).duration(0.6).at(0.3).immediate()),
        );
        assert_eq!(sequencer.value(Target::Group("word", 0), Property::Y), Some(100.0));
    }

    #[test]
    fn test_delay_timeline_settles_on_time() {
        let mut sequencer = Sequencer::new();
        sequencer.advance(ms(100));
        let id = sequencer.play(Timeline::delay("buffer", 0.05).then(|| {}));

        assert_eq!(run(sequencer.advance(ms(140))), 0);
        assert!(sequencer.is_active(id));
        assert_eq!(run(sequencer.advance(ms(150))), 1);
        assert!(!sequencer.is_active(id));
    }

    #[test]
    fn test_finish_jumps_to_end_values() {
        let mut sequencer = Sequencer::new();
        let id = sequencer.play(
            Timeline::new("intro")
                .add(Tween::from_to(Target::Element("title"), Property::Opacity, 0.0, 1.0).duration(1.0).at(2.0))
                .then(|| {}),
        );
        sequencer.advance(ms(100));

        assert!(sequencer.finish(id).is_some());
        assert_eq!(sequencer.value(Target::Element("title"), Property::Opacity), Some(1.0));
        assert!(sequencer.finish(id).is_none());
    }

    #[test]
    fn test_clock_is_monotonic() {
        let mut sequencer = Sequencer::new();
        sequencer.advance(ms(500));
        sequencer.advance(ms(200));
        assert_eq!(sequencer.now(), ms(500));
    }
}
