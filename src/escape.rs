//! The escape-time evaluator: how fast does a point of the complex
//! plane leave the circle of radius two when squared and re-added?

use num::Complex;

/// Iterates `z = z * z + c`, starting from `z = c`, and returns the
/// number of iterations completed before `|z|^2` exceeded four, or
/// `limit` if it never did.
///
/// Starting the recurrence at `c` rather than the textbook zero is a
/// deliberate convention of this renderer; the first squaring happens
/// one step earlier, so iteration counts are shifted relative to the
/// usual definition, and the image depends on that shift.  All
/// arithmetic is single precision and the escape test is a strict
/// comparison on the squared magnitude.
pub fn escape_count(c: Complex<f32>, limit: u32) -> u32 {
    let mut z = c;

    for i in 0..limit {
        if z.norm_sqr() > 4.0 {
            return i;
        }
        z = z * z + c;
    }

    limit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_never_escapes() {
        assert_eq!(escape_count(Complex::new(0.0, 0.0), 1), 1);
        assert_eq!(escape_count(Complex::new(0.0, 0.0), 256), 256);
        assert_eq!(escape_count(Complex::new(0.0, 0.0), 100_000), 100_000);
    }

    #[test]
    fn two_escapes_after_one_squaring() {
        // |2|^2 is exactly four, which does not pass the strict test;
        // the point escapes on the next look after z becomes six.
        assert_eq!(escape_count(Complex::new(2.0, 0.0), 256), 1);
    }

    #[test]
    fn far_exterior_escapes_immediately() {
        assert_eq!(escape_count(Complex::new(10.0, 10.0), 256), 0);
        assert_eq!(escape_count(Complex::new(0.0, -3.0), 256), 0);
    }

    #[test]
    fn zero_limit_is_zero() {
        assert_eq!(escape_count(Complex::new(0.1, 0.1), 0), 0);
    }

    #[test]
    fn interior_point_runs_to_the_cap() {
        // Well inside the main cardioid.
        assert_eq!(escape_count(Complex::new(-0.1, 0.05), 512), 512);
    }

    #[test]
    fn near_boundary_point_escapes_late() {
        let count = escape_count(Complex::new(-0.75, 0.05), 512);
        assert!(count > 20 && count < 512, "count = {}", count);
    }
}
