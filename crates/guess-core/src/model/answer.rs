use core::fmt;

/// Answers with a magnitude below this are treated as "don't know".
pub const UNKNOWN_THRESHOLD: f64 = 0.01;

/// A user answer on the symmetric scale from -1.0 (no) to 1.0 (yes).
///
/// Values are clamped on construction, so an `Answer` is always in range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Answer(f64);

impl Answer {
    pub const YES: Answer = Answer(1.0);
    pub const PROBABLY_YES: Answer = Answer(0.5);
    pub const UNKNOWN: Answer = Answer(0.0);
    pub const PROBABLY_NO: Answer = Answer(-0.5);
    pub const NO: Answer = Answer(-1.0);

    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value.clamp(-1.0, 1.0))
        } else {
            Self(0.0)
        }
    }

    pub const fn value(self) -> f64 {
        self.0
    }

    /// True when the answer carries no discriminating information.
    pub fn is_unknown(self) -> bool {
        self.0.abs() < UNKNOWN_THRESHOLD
    }

    pub fn negated(self) -> Self {
        Self(-self.0)
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Answer;

    #[test]
    fn construction_clamps_to_range() {
        assert_eq!(Answer::new(3.5).value(), 1.0);
        assert_eq!(Answer::new(-7.0).value(), -1.0);
        assert_eq!(Answer::new(0.5).value(), 0.5);
    }

    #[test]
    fn non_finite_input_becomes_unknown() {
        assert!(Answer::new(f64::NAN).is_unknown());
        assert!(Answer::new(f64::INFINITY).value() <= 1.0);
    }

    #[test]
    fn unknown_detection_uses_threshold() {
        assert!(Answer::UNKNOWN.is_unknown());
        assert!(Answer::new(0.009).is_unknown());
        assert!(!Answer::new(0.011).is_unknown());
        assert!(!Answer::NO.is_unknown());
    }

    #[test]
    fn negation_mirrors_the_scale() {
        assert_eq!(Answer::YES.negated(), Answer::NO);
        assert_eq!(Answer::PROBABLY_NO.negated(), Answer::PROBABLY_YES);
    }
}
