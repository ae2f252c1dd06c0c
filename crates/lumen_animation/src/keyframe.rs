//! Keyframes and segment interpolation

use lumen_core::math::lerp;

use crate::easing::Easing;

/// Value of a property at a point in time
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    /// Milliseconds from the start of the track
    pub time_ms: f64,
    pub value: f32,
    /// Easing used when transitioning TO this keyframe
    pub easing: Easing,
}

impl Keyframe {
    pub fn new(time_ms: f64, value: f32) -> Self {
        Self {
            time_ms,
            value,
            easing: Easing::Linear,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

impl From<(f64, f32)> for Keyframe {
    fn from((time_ms, value): (f64, f32)) -> Self {
        Keyframe::new(time_ms, value)
    }
}

impl From<[f64; 2]> for Keyframe {
    fn from([time_ms, value]: [f64; 2]) -> Self {
        Keyframe::new(time_ms, value as f32)
    }
}

/// Sample a time-ordered keyframe list at `elapsed` milliseconds.
///
/// Before the first keyframe the first value holds, after the last one the
/// last value holds. In between, the bracketing pair `t0 <= elapsed <= t1`
/// is blended with the easing of the later keyframe. Returns `None` for an
/// empty list.
pub fn sample(keyframes: &[Keyframe], elapsed: f64) -> Option<f32> {
    let first = keyframes.first()?;
    let last = keyframes.last()?;

    if elapsed < first.time_ms {
        return Some(first.value);
    }
    if elapsed > last.time_ms {
        return Some(last.value);
    }

    // First keyframe at or after `elapsed`.
    let next = keyframes.partition_point(|k| k.time_ms < elapsed);
    if next == 0 {
        return Some(first.value);
    }

    let from = &keyframes[next - 1];
    let to = &keyframes[next];
    let progress = ((elapsed - from.time_ms) / (to.time_ms - from.time_ms)) as f32;

    Some(lerp(from.value, to.value, to.easing.apply(progress)))
}
