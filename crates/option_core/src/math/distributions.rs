//! Standard normal distribution functions.
//!
//! This module provides:
//! - `norm_cdf`: Cumulative distribution function (CDF)
//! - `norm_pdf`: Probability density function (PDF)
//!
//! The CDF is built on a full double-precision complementary error
//! function, which keeps finite-difference checks of the Greeks meaningful
//! down to small bump sizes.

use statrs::function::erf::erfc;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Standard normal cumulative distribution function.
///
/// # Mathematical Definition
/// Φ(x) = (1/2) * erfc(-x / sqrt(2))
///
/// Using `erfc` rather than `1 - erf` keeps full relative accuracy in the
/// lower tail.
///
/// # Examples
/// ```
/// use option_core::math::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
/// assert!((norm_cdf(1.0) - 0.841_344_746_068_542_9).abs() < 1e-14);
/// assert!(norm_cdf(-40.0) >= 0.0);
/// ```
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / std::f64::consts::SQRT_2)
}

/// Standard normal probability density function.
///
/// # Mathematical Definition
/// φ(x) = (1 / sqrt(2π)) * exp(-x² / 2)
///
/// # Examples
/// ```
/// use option_core::math::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0) - 0.3989422804014327).abs() < 1e-15);
/// assert!((norm_pdf(1.0) - 0.2419707245191434).abs() < 1e-15);
/// ```
#[inline]
pub fn norm_pdf(x: f64) -> f64 {
    FRAC_1_SQRT_2PI * (-0.5 * x * x).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_cdf_reference_values() {
        assert_relative_eq!(norm_cdf(-1.96), 0.024_997_895_148_220_435, epsilon = 1e-14);
        assert_relative_eq!(norm_cdf(1.96), 0.975_002_104_851_779_6, epsilon = 1e-14);
        assert_relative_eq!(norm_cdf(3.0), 0.998_650_101_968_369_9, epsilon = 1e-14);
    }

    #[test]
    fn test_cdf_symmetry() {
        for &x in &[0.1, 0.5, 1.0, 2.5, 5.0] {
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_cdf_lower_tail_relative_accuracy() {
        // Φ(-10) ≈ 7.6198530241605e-24
        assert_relative_eq!(norm_cdf(-10.0), 7.619_853_024_160_5e-24, max_relative = 1e-10);
    }

    #[test]
    fn test_cdf_monotonic() {
        let mut prev = norm_cdf(-8.0);
        let mut x = -8.0;
        while x < 8.0 {
            x += 0.25;
            let cur = norm_cdf(x);
            assert!(cur >= prev);
            prev = cur;
        }
    }

    #[test]
    fn test_pdf_is_derivative_of_cdf() {
        let h = 1e-5;
        for &x in &[-2.0, -0.3, 0.0, 0.7, 1.8] {
            let fd = (norm_cdf(x + h) - norm_cdf(x - h)) / (2.0 * h);
            assert_relative_eq!(fd, norm_pdf(x), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_pdf_symmetry_and_positivity() {
        for &x in &[0.0, 0.5, 1.0, 3.0, 10.0] {
            assert_eq!(norm_pdf(x), norm_pdf(-x));
            assert!(norm_pdf(x) >= 0.0);
        }
    }

    proptest! {
        #[test]
        fn prop_cdf_bounded_and_symmetric(x in -30.0f64..30.0) {
            let p = norm_cdf(x);
            prop_assert!((0.0..=1.0).contains(&p));
            prop_assert!((p + norm_cdf(-x) - 1.0).abs() < 1e-14);
        }
    }
}
