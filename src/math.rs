//! Epsilon-bounded float comparisons.
//!
//! Widths and offsets are never compared with exact equality.

/// Global tolerance for "numerically zero".
pub const EPS: f64 = 1e-6;

/// `a` and `b` are equal within [`EPS`].
#[must_use]
pub fn equal(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPS
}

/// `x` is strictly greater than [`EPS`].
#[must_use]
pub fn is_positive(x: f64) -> bool {
    x > EPS
}

/// Snap `value` to the nearest multiple of `quantum`. A non-positive quantum leaves it unchanged.
#[must_use]
pub fn snap(value: f64, quantum: f64) -> f64 {
    if quantum > 0.0 {
        (value / quantum).round() * quantum
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_within_eps() {
        assert!(equal(1.0, 1.0 + EPS / 2.0));
        assert!(!equal(1.0, 1.0 + EPS * 10.0));
    }

    #[test]
    fn test_is_positive() {
        assert!(is_positive(0.1));
        assert!(!is_positive(EPS / 2.0));
        assert!(!is_positive(-1.0));
    }

    #[test]
    fn test_snap() {
        assert!(equal(snap(1.26, 0.5), 1.5));
        assert!(equal(snap(-0.74, 0.5), -0.5));
        assert!(equal(snap(3.3, 0.0), 3.3));
    }
}
