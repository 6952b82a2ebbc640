#[macro_use]
pub mod macros;

pub mod consumption;
pub mod distance;
pub mod emissions;
pub mod proportions;

/// Round half to even to the given number of decimal places.
#[must_use]
pub fn round(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::quantity::distance::Kilometers;

    #[test]
    fn test_round() {
        assert_abs_diff_eq!(round(10.708_372_781, 2), 10.71);
        assert_abs_diff_eq!(round(0.083_290_202, 4), 0.0833);
        assert_abs_diff_eq!(round(234.5, 1), 234.5);
        assert_abs_diff_eq!(round(-1.005, 0), -1.0);
    }

    #[test]
    fn test_round_ties_to_even() {
        assert_abs_diff_eq!(round(1.125, 2), 1.12);
        assert_abs_diff_eq!(round(0.125, 2), 0.12);
        assert_abs_diff_eq!(round(0.375, 2), 0.38);
        assert_abs_diff_eq!(round(2.5, 0), 2.0);
    }

    #[test]
    fn test_ordering() {
        assert!(Kilometers(1.0) < Kilometers(2.0));
        assert_eq!(Kilometers(2.0).max(Kilometers(1.0)), Kilometers(2.0));
        assert_eq!([Kilometers(1.5), Kilometers(2.5)].into_iter().sum::<Kilometers>(), Kilometers(4.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Kilometers(90_485.75).to_string(), "90485.75 km");
        assert_eq!(Kilometers(0.5).to_string(), "0.50 km");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("12.5".parse::<Kilometers>().unwrap(), Kilometers(12.5));
        assert!("twelve".parse::<Kilometers>().is_err());
    }
}
