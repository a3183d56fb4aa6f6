// Turns relative mouse motion into an absolute, screen-bounded pointer.
// Visual: the cursor moves at 2/3 of the raw mouse speed and stops dead at
// the screen edges instead of wrapping.
use crate::types::{InputSample, PointerState, POINTER_MAX_X, POINTER_MAX_Y};

/// Integrate one sample into the pointer position. Pure.
pub fn integrate(current: PointerState, sample: &InputSample) -> PointerState {
    PointerState::new(
        integrate_axis(current.x(), sample.dx, POINTER_MAX_X),
        integrate_axis(current.y(), sample.dy, POINTER_MAX_Y),
    )
}

/// The edge test looks at the *raw* delta, while the step actually taken is
/// damped to `(2 * delta) / 3`. Near an edge the pointer can therefore park a
/// few pixels short of it until a big enough move snaps it onto the bound.
fn integrate_axis(current: u8, delta: i8, upper: u8) -> u8 {
    let current = i16::from(current);
    let delta = i16::from(delta);
    let upper = i16::from(upper);

    let next = if delta < 0 && current + delta < 0 {
        0
    } else if delta > 0 && current + delta > upper {
        upper
    } else {
        // |damped| <= |delta|, so this stays inside [0, upper]
        current + (2 * delta) / 3
    };

    next as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: u8, y: u8) -> PointerState {
        PointerState::new(x, y)
    }

    #[test]
    fn negative_overshoot_clamps_to_zero() {
        let p = integrate(at(0, 50), &InputSample::motion(-5, 0));
        assert_eq!(p.x(), 0);
    }

    #[test]
    fn positive_overshoot_clamps_to_right_edge() {
        let p = integrate(at(250, 50), &InputSample::motion(10, 0));
        assert_eq!(p.x(), 255);
    }

    #[test]
    fn in_range_motion_is_damped() {
        let p = integrate(at(100, 50), &InputSample::motion(9, 0));
        assert_eq!(p.x(), 106);
    }

    #[test]
    fn damping_truncates_toward_zero() {
        // 2 * -1 / 3 == 0, 2 * -2 / 3 == -1
        assert_eq!(integrate(at(100, 100), &InputSample::motion(-1, -2)), at(100, 99));
        assert_eq!(integrate(at(100, 100), &InputSample::motion(1, 2)), at(100, 101));
    }

    #[test]
    fn bottom_edge_uses_row_bound() {
        let p = integrate(at(10, 185), &InputSample::motion(0, 7));
        assert_eq!(p.y(), 191);
        let p = integrate(at(10, 3), &InputSample::motion(0, -4));
        assert_eq!(p.y(), 0);
    }

    #[test]
    fn raw_edge_test_lets_pointer_park_short_of_the_bound() {
        // 250 + 5 is not past 255, so the damped step (3) is taken.
        let p = integrate(at(250, 0), &InputSample::motion(5, 0));
        assert_eq!(p.x(), 253);
        // 3 - 3 == 0 is not below 0: damped step of -2.
        let p = integrate(at(3, 0), &InputSample::motion(-3, 0));
        assert_eq!(p.x(), 1);
    }

    #[test]
    fn axes_are_independent() {
        let p = integrate(at(0, 100), &InputSample::motion(-20, 30));
        assert_eq!(p, at(0, 120));
    }

    #[test]
    fn every_start_and_delta_stays_in_bounds() {
        for start in 0..=255u8 {
            for delta in i8::MIN..=i8::MAX {
                let x = integrate_axis(start, delta, POINTER_MAX_X);
                assert!(x <= POINTER_MAX_X);

                let y = integrate_axis(start.min(POINTER_MAX_Y), delta, POINTER_MAX_Y);
                assert!(y <= POINTER_MAX_Y, "start {start} delta {delta} gave {y}");
            }
        }
    }
}
