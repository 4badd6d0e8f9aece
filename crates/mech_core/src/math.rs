//! Fixed-point math utilities for deterministic construction math.
//!
//! All weights, multipliers and ratings use fixed-point arithmetic so that
//! half-ton rounding is exact and every calculation produces the same bits
//! on every platform. Fractional constants are written as integer ratios.

use fixed::types::I32F32;

/// Fixed-point number type for all rules math.
///
/// Uses 32 bits for integer part and 32 bits for fractional part.
pub type Fixed = I32F32;

/// Half a ton, the dominant rounding step in construction rules.
pub const HALF: Fixed = Fixed::from_bits(1 << 31);

/// Build an exact ratio `numerator / denominator`.
#[must_use]
pub fn ratio(numerator: i32, denominator: i32) -> Fixed {
    Fixed::from_num(numerator) / Fixed::from_num(denominator)
}

/// Build a fixed-point value from a whole number of hundredths.
#[must_use]
pub fn hundredths(value: i32) -> Fixed {
    ratio(value, 100)
}

/// Round `value` up to the nearest multiple of `step`.
///
/// A non-positive step returns the value unchanged. `None` when the rounded
/// value is out of range.
#[must_use]
pub fn round_up_to(value: Fixed, step: Fixed) -> Option<Fixed> {
    if step <= Fixed::ZERO {
        return Some(value);
    }
    value.checked_div(step)?.checked_ceil()?.checked_mul(step)
}

/// Round `value` up to the nearest half ton.
#[must_use]
pub fn ceil_half(value: Fixed) -> Option<Fixed> {
    round_up_to(value, HALF)
}

/// Round half away from zero and convert to an integer.
#[must_use]
pub fn round_to_i64(value: Fixed) -> i64 {
    match value.checked_round() {
        Some(rounded) => rounded.to_num::<i64>(),
        // only the top half unit of the range fails to round
        None => i64::from(i32::MAX) + 1,
    }
}

/// Convert an integer, clamping to the fixed-point range.
#[must_use]
pub fn saturating_fixed(value: u32) -> Fixed {
    Fixed::saturating_from_num(value)
}

/// Sum of fixed-point values, clamped to the range.
pub fn saturating_sum(values: impl IntoIterator<Item = Fixed>) -> Fixed {
    values
        .into_iter()
        .fold(Fixed::ZERO, |acc, v| acc.saturating_add(v))
}

/// Serde support for fixed-point numbers.
///
/// Serializes fixed-point numbers as plain decimals. Construction values are
/// half-ton multiples or short ratios, which round-trip through `f64` exactly.
pub mod fixed_serde {
    use super::Fixed;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a fixed-point number as a decimal.
    pub fn serialize<S>(value: &Fixed, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.to_num::<f64>().serialize(serializer)
    }

    /// Deserialize a fixed-point number from a decimal.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Fixed, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Fixed::checked_from_num(value)
            .ok_or_else(|| serde::de::Error::custom(format!("value {value} out of fixed range")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_constant() {
        assert_eq!(HALF * Fixed::from_num(2), Fixed::ONE);
    }

    #[test]
    fn test_ceil_half() {
        assert_eq!(ceil_half(Fixed::from_num(5)), Some(Fixed::from_num(5)));
        assert_eq!(ceil_half(ratio(51, 10)), Some(ratio(11, 2)));
        assert_eq!(ceil_half(ratio(56, 10)), Some(Fixed::from_num(6)));
        assert_eq!(ceil_half(Fixed::ZERO), Some(Fixed::ZERO));
    }

    #[test]
    fn test_ceil_half_out_of_range() {
        assert_eq!(ceil_half(Fixed::MAX), None);
        assert_eq!(round_up_to(Fixed::MAX - Fixed::ONE, Fixed::from_num(1000)), None);
    }

    #[test]
    fn test_round_up_to_ignores_bad_step() {
        let v = ratio(7, 3);
        assert_eq!(round_up_to(v, Fixed::ZERO), Some(v));
    }

    #[test]
    fn test_round_to_i64() {
        assert_eq!(round_to_i64(ratio(5, 2)), 3);
        assert_eq!(round_to_i64(ratio(12, 5)), 2);
        assert_eq!(round_to_i64(Fixed::MAX), i64::from(i32::MAX) + 1);
    }

    #[test]
    fn test_saturating_helpers() {
        assert_eq!(saturating_fixed(u32::MAX), Fixed::MAX);
        assert_eq!(saturating_fixed(50), Fixed::from_num(50));
        assert_eq!(saturating_sum([Fixed::MAX, Fixed::ONE]), Fixed::MAX);
        assert_eq!(saturating_sum([HALF, HALF]), Fixed::ONE);
    }

    #[test]
    fn test_fixed_determinism() {
        let a = ratio(1, 3);
        let b = ratio(1, 3);
        assert_eq!(a * Fixed::from_num(7), b * Fixed::from_num(7));
    }
}
