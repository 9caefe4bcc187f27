//! Mathematical utilities: polynomial basis, least squares, trend smoothing.

pub mod basis;
pub mod ols;
pub mod trend;

pub use basis::*;
pub use ols::*;
pub use trend::*;

/// Round to one decimal place; exact ties go to the even digit.
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round_ties_even() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round1_rounds_ties_to_even() {
        assert_eq!(round1(12.34), 12.3);
        assert_eq!(round1(12.36), 12.4);
        assert_eq!(round1(4.25), 4.2);
        assert_eq!(round1(4.75), 4.8);
        assert_eq!(round1(-0.25), -0.2);
        assert_eq!(round1(0.04), 0.0);
    }
}
