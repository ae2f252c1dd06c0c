//! Keyframe tracks
//!
//! A [`Track`] animates any number of named properties on one target. Each
//! call to [`Track::update`] maps the clock time to the track's local time
//! and writes one interpolated value per property.

use indexmap::IndexMap;
use tracing::warn;

use crate::clock::Clock;
use crate::error::{AnimationError, Result};
use crate::easing::Easing;
use crate::keyframe::{self, Keyframe};
use crate::target::SharedTarget;

/// Duration of a track that does not set one
pub const DEFAULT_DURATION_MS: f64 = 2000.0;

/// Where a track is in its playback at a given clock time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackPhase {
    /// The clock has not reached the start time
    Idle,
    /// Within the duration, or looping
    Running,
    /// A one-shot track past its duration; values stay pinned
    Finished,
}

/// A set of keyframed properties driving one target
pub struct Track {
    target: SharedTarget,
    start_ms: f64,
    duration_ms: f64,
    repeat: bool,
    properties: IndexMap<String, Vec<Keyframe>>,
}

impl Track {
    /// Start configuring a track for `target`
    pub fn builder(target: SharedTarget) -> TrackBuilder {
        TrackBuilder::new(target)
    }

    pub fn start_ms(&self) -> f64 {
        self.start_ms
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn repeats(&self) -> bool {
        self.repeat
    }

    pub fn target(&self) -> &SharedTarget {
        &self.target
    }

    /// Keyframes per property, in the order they were configured
    pub fn properties(&self) -> impl Iterator<Item = (&str, &[Keyframe])> {
        self.properties
            .iter()
            .map(|(name, frames)| (name.as_str(), frames.as_slice()))
    }

    /// Move the start time, e.g. to replay a finished one-shot track
    pub fn restart_at(&mut self, start_ms: f64) {
        self.start_ms = start_ms;
    }

    /// Local playback time at clock time `now`.
    ///
    /// Looping tracks wrap with a truncating remainder, so times before the
    /// start stay negative and clamp to the first keyframe.
    pub fn elapsed(&self, now: f64) -> f64 {
        let elapsed = now - self.start_ms;
        if self.repeat {
            elapsed % self.duration_ms
        } else {
            elapsed
        }
    }

    pub fn phase(&self, now: f64) -> TrackPhase {
        let elapsed = now - self.start_ms;
        if elapsed < 0.0 {
            TrackPhase::Idle
        } else if !self.repeat && elapsed >= self.duration_ms {
            TrackPhase::Finished
        } else {
            TrackPhase::Running
        }
    }

    /// Value of `property` at local time `elapsed`
    pub fn value_at(&self, property: &str, elapsed: f64) -> Option<f32> {
        keyframe::sample(self.properties.get(property)?, elapsed)
    }

    /// Every property's value at clock time `now`, without touching the
    /// target
    pub fn sample(&self, now: f64) -> impl Iterator<Item = (&str, f32)> + '_ {
        let elapsed = self.elapsed(now);
        self.properties.iter().filter_map(move |(name, frames)| {
            keyframe::sample(frames, elapsed).map(|value| (name.as_str(), value))
        })
    }

    /// Write every property's value at clock time `now` into the target.
    ///
    /// The frame is skipped if the target is borrowed elsewhere.
    pub fn update(&self, now: f64) {
        let Ok(mut target) = self.target.try_borrow_mut() else {
            warn!(now, "animation target is already borrowed, skipping frame");
            return;
        };
        for (name, value) in self.sample(now) {
            target.set_property(name, value);
        }
    }
}

impl std::fmt::Debug for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Track")
            .field("start_ms", &self.start_ms)
            .field("duration_ms", &self.duration_ms)
            .field("repeat", &self.repeat)
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Track`]
///
/// Defaults: starts at 0, lasts [`DEFAULT_DURATION_MS`], loops.
pub struct TrackBuilder {
    target: SharedTarget,
    start_ms: f64,
    duration_ms: f64,
    repeat: bool,
    properties: IndexMap<String, Vec<Keyframe>>,
}

impl TrackBuilder {
    pub fn new(target: SharedTarget) -> Self {
        Self {
            target,
            start_ms: 0.0,
            duration_ms: DEFAULT_DURATION_MS,
            repeat: true,
            properties: IndexMap::new(),
        }
    }

    /// Clock time at which local time 0 begins
    pub fn start_at(mut self, start_ms: f64) -> Self {
        self.start_ms = start_ms;
        self
    }

    /// Start at the clock's current time
    pub fn start_at_clock(self, clock: &impl Clock) -> Self {
        self.start_at(clock.now_ms())
    }

    pub fn duration(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    /// Play once and hold the final values
    pub fn once(self) -> Self {
        self.repeat(false)
    }

    /// Append a keyframe to `property`
    pub fn keyframe(self, property: &str, time_ms: f64, value: f32) -> Self {
        self.push(property, Keyframe::new(time_ms, value))
    }

    /// Append a keyframe reached with a specific easing
    pub fn keyframe_with_ease(
        self,
        property: &str,
        time_ms: f64,
        value: f32,
        easing: Easing,
    ) -> Self {
        self.push(property, Keyframe::new(time_ms, value).with_easing(easing))
    }

    /// Replace `property`'s keyframes with `(time_ms, value)` pairs
    pub fn property<I>(mut self, property: &str, keyframes: I) -> Self
    where
        I: IntoIterator<Item = (f64, f32)>,
    {
        self.properties.insert(
            property.to_owned(),
            keyframes.into_iter().map(Keyframe::from).collect(),
        );
        self
    }

    fn push(mut self, property: &str, keyframe: Keyframe) -> Self {
        self.properties
            .entry(property.to_owned())
            .or_default()
            .push(keyframe);
        self
    }

    /// Validate and build
    pub fn build(self) -> Result<Track> {
        let invalid = |msg: String| Err(AnimationError::InvalidConfiguration(msg));

        if !self.start_ms.is_finite() {
            return invalid(format!("start time {} is not finite", self.start_ms));
        }
        if !self.duration_ms.is_finite() || self.duration_ms < 0.0 {
            return invalid(format!("duration {} ms is not usable", self.duration_ms));
        }
        if self.repeat && self.duration_ms <= 0.0 {
            return invalid("a repeating track needs a positive duration".to_owned());
        }
        if self.properties.is_empty() {
            return invalid("track animates no properties".to_owned());
        }

        for (name, frames) in &self.properties {
            if frames.is_empty() {
                return invalid(format!("property `{name}` has no keyframes"));
            }
            for frame in frames {
                if !frame.time_ms.is_finite() || frame.time_ms < 0.0 {
                    return invalid(format!(
                        "property `{name}` has keyframe time {} ms",
                        frame.time_ms
                    ));
                }
            }
            if let Some(pair) = frames.windows(2).find(|w| w[1].time_ms <= w[0].time_ms) {
                return invalid(format!(
                    "property `{name}` keyframes are not strictly increasing ({} ms then {} ms)",
                    pair[0].time_ms, pair[1].time_ms
                ));
            }
        }

        Ok(Track {
            target: self.target,
            start_ms: self.start_ms,
            duration_ms: self.duration_ms,
            repeat: self.repeat,
            properties: self.properties,
        })
    }
}
