//! Gesture normalization
//!
//! Turns raw wheel deltas and touch/pointer swipes into a directionless
//! [`TransitionIntent`]. Nothing here touches shared state.

use serde::{Deserialize, Serialize};

/// Normalized navigation intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionIntent {
    /// Move to the next slide or card
    Advance,
    /// Move to the previous slide or card
    Retreat,
}

impl TransitionIntent {
    /// +1 for advance, -1 for retreat
    pub fn sign(self) -> isize {
        match self {
            TransitionIntent::Advance => 1,
            TransitionIntent::Retreat => -1,
        }
    }

    /// Intent for a signed step, `None` for zero
    pub fn from_sign(value: f32) -> Option<Self> {
        if value > 0.0 {
            Some(TransitionIntent::Advance)
        } else if value < 0.0 {
            Some(TransitionIntent::Retreat)
        } else {
            None
        }
    }
}

/// A screen-space point in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Raw input as delivered by the host window
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Wheel or trackpad scroll, positive values scroll down/right
    Wheel { dx: f32, dy: f32 },
    TouchStart(Point),
    TouchEnd(Point),
    PointerDown(Point),
    PointerUp(Point),
}

/// Which axis a swipe must travel along to count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeAxis {
    /// Carousel capture: leftward swipe advances
    Horizontal,
    /// Page level: upward swipe advances
    Vertical,
}

/// Noise thresholds, in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureThresholds {
    /// Minimum dominant-axis wheel delta
    pub wheel_tolerance: f32,
    /// Minimum horizontal travel for a carousel swipe (exclusive)
    pub swipe_min_distance: f32,
    /// Minimum vertical travel for a page swipe
    pub vertical_swipe_tolerance: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            wheel_tolerance: 20.0,
            swipe_min_distance: 50.0,
            vertical_swipe_tolerance: 20.0,
        }
    }
}

impl GestureThresholds {
    /// Map a wheel delta to an intent using its dominant axis
    pub fn normalize_wheel(&self, dx: f32, dy: f32) -> Option<TransitionIntent> {
        let delta = if dx.abs() > dy.abs() { dx } else { dy };
        if delta.abs() < self.wheel_tolerance {
            return None;
        }
        TransitionIntent::from_sign(delta)
    }

    /// Map a completed swipe to an intent
    pub fn normalize_swipe(&self, start: Point, end: Point, axis: SwipeAxis) -> Option<TransitionIntent> {
        let dx = end.x - start.x;
        let dy = end.y - start.y;

        match axis {
            SwipeAxis::Horizontal => {
                if dx.abs() > self.swipe_min_distance && dx.abs() > dy.abs() {
                    // Finger travels left to reveal the next card
                    TransitionIntent::from_sign(-dx)
                } else {
                    None
                }
            }
            SwipeAxis::Vertical => {
                if dy.abs() >= self.vertical_swipe_tolerance && dy.abs() > dx.abs() {
                    TransitionIntent::from_sign(-dy)
                } else {
                    None
                }
            }
        }
    }
}

/// Stateful front end remembering where the current swipe began
#[derive(Debug, Clone, Default)]
pub struct GestureNormalizer {
    thresholds: GestureThresholds,
    swipe_start: Option<Point>,
}

impl GestureNormalizer {
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self {
            thresholds,
            swipe_start: None,
        }
    }

    pub fn thresholds(&self) -> &GestureThresholds {
        &self.thresholds
    }

    /// Feed one raw event; at most one intent per discrete gesture
    pub fn feed(&mut self, event: InputEvent, axis: SwipeAxis) -> Option<TransitionIntent> {
        match event {
            InputEvent::Wheel { dx, dy } => self.thresholds.normalize_wheel(dx, dy),
            InputEvent::TouchStart(point) | InputEvent::PointerDown(point) => {
                self.swipe_start = Some(point);
                None
            }
            InputEvent::TouchEnd(end) | InputEvent::PointerUp(end) => {
                let start = self.swipe_start.take()?;
                self.thresholds.normalize_swipe(start, end, axis)
            }
        }
    }

    /// Forget a half-finished swipe
    pub fn reset(&mut self) {
        self.swipe_start = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_below_tolerance_is_noise() {
        let t = GestureThresholds::default();
        assert_eq!(t.normalize_wheel(0.0, 19.9), None);
        assert_eq!(t.normalize_wheel(-19.0, 5.0), None);
    }

    #[test]
    fn test_wheel_at_tolerance_follows_sign() {
        let t = GestureThresholds::default();
        assert_eq!(t.normalize_wheel(0.0, 20.0), Some(TransitionIntent::Advance));
        assert_eq!(t.normalize_wheel(0.0, -20.0), Some(TransitionIntent::Retreat));
        assert_eq!(t.normalize_wheel(-45.0, 10.0), Some(TransitionIntent::Retreat));
    }

    #[test]
    fn test_wheel_uses_dominant_axis() {
        let t = GestureThresholds::default();
        // Horizontal dominates but is negative even though vertical is positive
        assert_eq!(t.normalize_wheel(-30.0, 25.0), Some(TransitionIntent::Retreat));
        // Small dominant axis is still noise
        assert_eq!(t.normalize_wheel(15.0, 10.0), None);
    }

    #[test]
    fn test_horizontal_swipe_thresholds() {
        let t = GestureThresholds::default();
        let origin = Point::new(200.0, 300.0);

        assert_eq!(t.normalize_swipe(origin, Point::new(151.0, 300.0), SwipeAxis::Horizontal), None);
        assert_eq!(
            t.normalize_swipe(origin, Point::new(149.0, 300.0), SwipeAxis::Horizontal),
            Some(TransitionIntent::Advance)
        );
        assert_eq!(
            t.normalize_swipe(origin, Point::new(251.0, 300.0), SwipeAxis::Horizontal),
            Some(TransitionIntent::Retreat)
        );
    }

    #[test]
    fn test_horizontal_swipe_rejects_vertical_dominance() {
        let t = GestureThresholds::default();
        let origin = Point::new(200.0, 300.0);
        assert_eq!(t.normalize_swipe(origin, Point::new(149.0, 360.0), SwipeAxis::Horizontal), None);
    }

    #[test]
    fn test_vertical_swipe_up_advances() {
        let t = GestureThresholds::default();
        let origin = Point::new(200.0, 300.0);
        assert_eq!(
            t.normalize_swipe(origin, Point::new(205.0, 200.0), SwipeAxis::Vertical),
            Some(TransitionIntent::Advance)
        );
        assert_eq!(
            t.normalize_swipe(origin, Point::new(205.0, 400.0), SwipeAxis::Vertical),
            Some(TransitionIntent::Retreat)
        );
        assert_eq!(t.normalize_swipe(origin, Point::new(300.0, 250.0), SwipeAxis::Vertical), None);
    }

    #[test]
    fn test_normalizer_pairs_start_and_end() {
        let mut normalizer = GestureNormalizer::default();

        assert_eq!(normalizer.feed(InputEvent::TouchEnd(Point::new(0.0, 0.0)), SwipeAxis::Horizontal), None);

        assert_eq!(normalizer.feed(InputEvent::TouchStart(Point::new(300.0, 100.0)), SwipeAxis::Horizontal), None);
        assert_eq!(
            normalizer.feed(InputEvent::TouchEnd(Point::new(200.0, 110.0)), SwipeAxis::Horizontal),
            Some(TransitionIntent::Advance)
        );

        // The start was consumed
        assert_eq!(normalizer.feed(InputEvent::TouchEnd(Point::new(100.0, 110.0)), SwipeAxis::Horizontal), None);
    }
}
