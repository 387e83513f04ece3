//! The visible rectangle of the complex plane.  Whatever convention a
//! caller starts from (origin plus extent, or two corners), it is
//! normalized here to origin plus extent and never changes afterward.

use num::Complex;

/// An axis-aligned rectangle of the complex plane.  The real axis is
/// `x` and the imaginary axis is `y`; `(x, y)` is the corner mapped
/// to pixel `(0, 0)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Window {
    /// Real coordinate of the origin corner.
    pub x: f32,
    /// Imaginary coordinate of the origin corner.
    pub y: f32,
    /// Extent along the real axis.
    pub width: f32,
    /// Extent along the imaginary axis.
    pub height: f32,
}

impl Window {
    /// A window from an origin corner and an extent.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Window {
        Window {
            x,
            y,
            width,
            height,
        }
    }

    /// A window from its two corners, left-lower and right-upper.
    pub fn from_corners(leftlower: Complex<f32>, rightupper: Complex<f32>) -> Window {
        Window {
            x: leftlower.re,
            y: leftlower.im,
            width: rightupper.re - leftlower.re,
            height: rightupper.im - leftlower.im,
        }
    }

    /// Maps normalized image coordinates in `[0,1]` to the plane
    /// point they cover.
    pub fn point_at(&self, u: f32, v: f32) -> Complex<f32> {
        Complex::new(u * self.width + self.x, v * self.height + self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_normalize_to_origin_and_extent() {
        let w = Window::from_corners(Complex::new(-2.0, -1.0), Complex::new(1.0, 1.0));
        assert_eq!(w, Window::new(-2.0, -1.0, 3.0, 2.0));
    }

    #[test]
    fn point_at_spans_the_window() {
        let w = Window::new(-2.0, -1.0, 3.0, 2.0);
        assert_eq!(w.point_at(0.0, 0.0), Complex::new(-2.0, -1.0));
        assert_eq!(w.point_at(1.0, 1.0), Complex::new(1.0, 1.0));
        assert_eq!(w.point_at(0.5, 0.5), Complex::new(-0.5, 0.0));
    }
}
