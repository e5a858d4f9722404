//! Fixed-point conversion between descriptor components and field integers.

/// Quantizes a real value to `precision` fractional bits.
///
/// Ties are rounded to even so that every implementation of the protocol
/// produces bit-identical encodings; all parties compute over the quantized
/// value, not the float. The caller is responsible for rejecting non-finite
/// input; out-of-range values saturate.
pub fn quantize(value: f64, precision: u32) -> i64 {
    (value * (1u64 << precision) as f64).round_ties_even() as i64
}

/// Reverses [`quantize`] on a plain (non-accumulated) value.
pub fn dequantize(value: i64, precision: u32) -> f64 {
    value as f64 / (1u64 << precision) as f64
}

/// Rescales an accumulated product of two quantized values, such as a sum of
/// squares, which carries twice the fractional bits.
pub fn dequantize_squared(value: u64, precision: u32) -> f64 {
    value as f64 / (1u64 << (2 * precision)) as f64
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{dequantize, dequantize_squared, quantize};

    #[rstest]
    #[case(0.5, 8)]
    #[case(-0.73, 8)]
    #[case(0.3, 16)]
    #[case(123.456, 10)]
    #[case(0.0, 1)]
    fn test_round_trip(#[case] value: f64, #[case] precision: u32) {
        let back = dequantize(quantize(value, precision), precision);
        assert!((back - value).abs() <= 1.0 / (1u64 << precision) as f64);
    }

    #[test]
    fn test_ties_round_to_even() {
        // 0.25 * 2 = 0.5 and 0.75 * 2 = 1.5 are exact ties.
        assert_eq!(quantize(0.25, 1), 0);
        assert_eq!(quantize(0.75, 1), 2);
        assert_eq!(quantize(-0.25, 1), 0);
        assert_eq!(quantize(-0.75, 1), -2);
    }

    #[test]
    fn test_squared_accumulator_scale() {
        assert_eq!(dequantize_squared(1 << 16, 8), 1.0);
        assert_eq!(dequantize_squared(1 << 31, 16), 0.5);
    }
}
