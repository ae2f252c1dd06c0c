//! Lumen Animation System
//!
//! Keyframe tracks driven by a caller-supplied clock.
//!
//! # Features
//!
//! - **Keyframes**: `(time, value)` samples per named property, blended
//!   linearly or with an [`Easing`]
//! - **Tracks**: write interpolated values into a shared target each frame,
//!   optionally looping
//! - **Compositions**: a tree of tracks updated with a single call, held in
//!   an arena by [`AnimationScheduler`]
//! - **Clocks**: wall-clock and manually stepped time sources
//!
//! # Example
//!
//! ```rust
//! use lumen_animation::{shared, AnimationScheduler, PropertyMap, Track};
//!
//! let star = shared(PropertyMap::new());
//! let track = Track::builder(star.clone())
//!     .once()
//!     .duration(1000.0)
//!     .keyframe("alpha", 0.0, 0.0)
//!     .keyframe("alpha", 1000.0, 1.0)
//!     .build()
//!     .unwrap();
//!
//! let mut scheduler = AnimationScheduler::new();
//! let root = scheduler.add_composition();
//! let node = scheduler.add_track(track);
//! scheduler.add(root, node).unwrap();
//!
//! scheduler.tick(500.0);
//! assert_eq!(star.borrow().get("alpha"), Some(0.5));
//! ```

pub mod clock;
pub mod easing;
pub mod error;
pub mod keyframe;
pub mod scheduler;
pub mod target;
pub mod track;

pub use clock::{Clock, ManualClock, SystemClock};
pub use easing::Easing;
pub use error::{AnimationError, Result};
pub use keyframe::Keyframe;
pub use scheduler::{AnimationScheduler, NodeId};
pub use target::{shared, AnimationTarget, PropertyMap, SharedTarget};
pub use track::{Track, TrackBuilder, TrackPhase, DEFAULT_DURATION_MS};
