//! Easing curves applied within a keyframe segment

/// Shape of the blend between two keyframes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    /// Hold the previous value until the segment ends
    Step,
}

impl Easing {
    /// Map segment progress `t` (0.0 to 1.0) to blend weight.
    ///
    /// Every curve fixes both endpoints: `apply(0.0) == 0.0` and
    /// `apply(1.0) == 1.0`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => t * (2.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 1.0 - t;
                    1.0 - 4.0 * u * u * u
                }
            }
            Easing::Step => {
                if t >= 1.0 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 8] = [
        Easing::Linear,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::Step,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?}");
        }
    }

    #[test]
    fn symmetric_curves_meet_at_half() {
        assert!((Easing::EaseInOutQuad.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Easing::EaseInOutCubic.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn ease_in_lags_and_ease_out_leads() {
        assert!(Easing::EaseInQuad.apply(0.3) < 0.3);
        assert!(Easing::EaseOutQuad.apply(0.3) > 0.3);
        assert!(Easing::EaseInCubic.apply(0.3) < Easing::EaseInQuad.apply(0.3));
    }

    #[test]
    fn step_holds_until_the_end() {
        assert_eq!(Easing::Step.apply(0.99), 0.0);
        assert_eq!(Easing::Step.apply(1.0), 1.0);
    }

    #[test]
    fn progress_outside_unit_range_is_clamped() {
        assert_eq!(Easing::Linear.apply(-0.5), 0.0);
        assert_eq!(Easing::EaseOutCubic.apply(2.0), 1.0);
    }
}
