use serde::{Deserialize, Serialize};

/// Easing curves used by the page choreography
///
/// `PowerN` curves follow the usual motion-library convention where power 1
/// is quadratic, so `Power3` raises progress to the fourth power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ease {
    Linear,
    Power2Out,
    Power3In,
    Power3Out,
    Power3InOut,
    Power4Out,
}

impl Ease {
    /// Map linear progress in `[0, 1]` to eased progress
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2Out => ease_out(t, 3),
            Ease::Power3In => t.powi(4),
            Ease::Power3Out => ease_out(t, 4),
            Ease::Power3InOut => ease_in_out(t, 4),
            Ease::Power4Out => ease_out(t, 5),
        }
    }
}

fn ease_out(t: f32, exponent: i32) -> f32 {
    1.0 - (1.0 - t).powi(exponent)
}

fn ease_in_out(t: f32, exponent: i32) -> f32 {
    if t < 0.5 {
        (2.0 * t).powi(exponent) / 2.0
    } else {
        1.0 - (2.0 * (1.0 - t)).powi(exponent) / 2.0
    }
}
