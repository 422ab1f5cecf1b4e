//! Slide change subscriber trait

use super::SlideChanged;

/// Trait for components that react when the current slide changes
pub trait SlideSubscriber: Send + Sync {
    /// Called after a transition settles, before the lock buffer elapses
    fn on_slide_changed(&self, event: &SlideChanged);
}
