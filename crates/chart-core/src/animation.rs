// File: crates/chart-core/src/animation.rs
// Summary: Per-chart easing of the Y axis maximum toward the current boundary max.

use crate::types::SPEED;

/// Moves an animated maximum toward a target in fixed increments of
/// `(target - previous_target) / speed` per frame.
///
/// The animated value itself lives in the state store; this struct remembers
/// the last target it settled on, which fixes the step size of a transition.
#[derive(Clone, Debug)]
pub struct MaxAnimator {
    speed: f64,
    previous_target: Option<f64>,
}

impl Default for MaxAnimator {
    fn default() -> Self { Self::new(SPEED) }
}

impl MaxAnimator {
    pub fn new(speed: f64) -> Self {
        Self { speed: speed.max(1.0), previous_target: None }
    }

    pub fn previous_target(&self) -> Option<f64> { self.previous_target }

    /// Advance one frame. Returns the new animated value, or `None` when
    /// `current` is already settled on `target`.
    ///
    /// Rising values never overshoot: the last step lands exactly on `target`.
    /// A target below the current value is adopted immediately.
    pub fn advance(&mut self, current: Option<f64>, target: f64) -> Option<f64> {
        let (Some(current), Some(previous)) = (current, self.previous_target) else {
            self.previous_target = Some(target);
            return Some(target);
        };

        if current < target {
            let step = (target - previous) / self.speed;
            let next = if step > 0.0 { (current + step).min(target) } else { target };
            if next >= target {
                self.previous_target = Some(target);
            }
            return Some(next);
        }

        if current > target {
            self.previous_target = Some(target);
            return Some(target);
        }

        // current == target (or NaN on either side)
        if previous != target && current == target {
            self.previous_target = Some(target);
        }
        None
    }
}
