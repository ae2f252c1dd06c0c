//! Closed-form curve generators
//!
//! Small function builders used to shape vertex data (wave surfaces) and to
//! blend keyframe values.

/// Unclamped linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Line through `(ax, ay)` and `(bx, by)` as `y = kx + b`.
///
/// A vertical line (`ax == bx`) has no slope; the returned function then
/// yields non-finite values.
pub fn linear(ax: f32, ay: f32, bx: f32, by: f32) -> impl Fn(f32) -> f32 {
    let k = (by - ay) / (bx - ax);
    let b = ay - ax * k;
    move |x| k * x + b
}

/// Sine wave `a * sin(omega * x + phi)`
pub fn sine(amplitude: f32, omega: f32, phi: f32) -> impl Fn(f32) -> f32 {
    move |x| amplitude * (omega * x + phi).sin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn linear_passes_through_both_points() {
        let f = linear(1.0, 3.0, 5.0, 11.0);
        assert!((f(1.0) - 3.0).abs() < 1e-6);
        assert!((f(5.0) - 11.0).abs() < 1e-6);
        assert!((f(3.0) - 7.0).abs() < 1e-6);
    }

    #[test]
    fn vertical_line_is_not_finite() {
        let f = linear(2.0, 0.0, 2.0, 1.0);
        assert!(!f(2.0).is_finite());
    }

    #[test]
    fn sine_respects_amplitude_and_phase() {
        let f = sine(2.0, 1.0, 0.0);
        assert!((f(FRAC_PI_2) - 2.0).abs() < 1e-6);

        let shifted = sine(1.0, 1.0, FRAC_PI_2);
        assert!((shifted(0.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn lerp_extrapolates() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 1.5), 15.0);
    }
}
