//! Easing curve used by camera tweens.

/// Cubic ease-in-out.
///
/// `4t³` on the first half, `1 - (-2t + 2)³ / 2` on the second. Both halves
/// meet at 0.5 with value 0.5 and slope 3, and the curve has zero slope at
/// both ends. Input is clamped to [0.0, 1.0].
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
    }

    #[test]
    fn stays_in_unit_range() {
        for i in 0..=1000 {
            let t = i as f32 / 1000.0;
            let v = ease_in_out_cubic(t);
            assert!((0.0..=1.0).contains(&v), "t={t} gave {v}");
        }
    }

    #[test]
    fn continuous_at_midpoint() {
        let below = ease_in_out_cubic(0.5 - 1e-4);
        let at = ease_in_out_cubic(0.5);
        let above = ease_in_out_cubic(0.5 + 1e-4);
        assert!((at - 0.5).abs() < 1e-6);
        assert!((below - at).abs() < 1e-3);
        assert!((above - at).abs() < 1e-3);
    }

    #[test]
    fn monotonic_non_decreasing() {
        let mut prev = 0.0;
        for i in 1..=200 {
            let v = ease_in_out_cubic(i as f32 / 200.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn clamps_out_of_range_input() {
        assert_eq!(ease_in_out_cubic(-0.5), 0.0);
        assert_eq!(ease_in_out_cubic(1.5), 1.0);
    }
}
