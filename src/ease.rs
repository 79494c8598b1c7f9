//! Easing curves for the smooth scroll animation.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
/// Maps linear animation progress onto a curved progress.
pub enum Ease {
    /// Constant speed.
    Linear,
    /// Decelerates into the target.
    OutCubic,
    #[default]
    /// Accelerates away from the start and decelerates into the target.
    InOutCubic,
}

impl Ease {
    #[must_use]
    /// Eased progress for `t`, clamped to `0.0..=1.0`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 3] = [Ease::Linear, Ease::OutCubic, Ease::InOutCubic];

    #[test]
    fn endpoints_are_stable() {
        for ease in ALL {
            assert!(ease.apply(0.0).abs() < f64::EPSILON);
            assert!((ease.apply(1.0) - 1.0).abs() < f64::EPSILON);
            assert!((ease.apply(7.0) - 1.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn monotonic_spot_check() {
        for ease in ALL {
            let a = ease.apply(0.25);
            let b = ease.apply(0.5);
            let c = ease.apply(0.75);
            assert!(a < b);
            assert!(b < c);
        }
    }
}
