//! Scalar types a Hamiltonian can be filled with.

use nalgebra::ComplexField;
use num_complex::Complex;

/// Matrix element type shared by real and complex models.
///
/// Every fill goes through [`Element::from_parts`]; real instantiations
/// discard the imaginary part, so one code path serves both.
pub trait Element: ComplexField<RealField = f64> + Copy + Send + Sync {
    /// Whether the type carries an imaginary part.
    const IS_COMPLEX: bool;

    fn from_parts(re: f64, im: f64) -> Self;

    fn from_re(re: f64) -> Self {
        Self::from_parts(re, 0.0)
    }
}

impl Element for f64 {
    const IS_COMPLEX: bool = false;

    #[inline]
    fn from_parts(re: f64, _im: f64) -> Self {
        re
    }
}

impl Element for Complex<f64> {
    const IS_COMPLEX: bool = true;

    #[inline]
    fn from_parts(re: f64, im: f64) -> Self {
        Complex::new(re, im)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_drops_imaginary() {
        assert_eq!(<f64 as Element>::from_parts(1.5, 2.0), 1.5);
        assert!(!<f64 as Element>::IS_COMPLEX);
    }

    #[test]
    fn test_complex_keeps_both() {
        let z = <Complex<f64> as Element>::from_parts(1.5, -2.0);
        assert_eq!(z, Complex::new(1.5, -2.0));
        assert_eq!(z.conjugate(), Complex::new(1.5, 2.0));
        assert!(<Complex<f64> as Element>::IS_COMPLEX);
    }
}
