// ============================================================================
// Fixed-Point Scalar
// Deterministic binary fixed-point arithmetic on a 32-bit raw value
// ============================================================================

use super::errors::{NumericError, NumericResult};
use rust_decimal::Decimal;
use std::fmt;

/// Fractional bits used when a precision is not specified.
pub const DEFAULT_FBITS: u8 = 16;

/// Upper bound on fractional bits (the raw representation is 32 bits wide).
pub const MAX_FBITS: u8 = 31;

/// Binary fixed-point number.
///
/// Interprets a raw `i32` as `raw / 2^fbits`. All arithmetic is integer
/// arithmetic on the raw value, so identical inputs produce identical
/// results on every platform. Binary operations require both operands to
/// carry the same `fbits`; mixing precisions is an error, never an
/// implicit conversion.
///
/// # Value Range
/// With `DEFAULT_FBITS` (16):
/// - Minimum: -32768.0
/// - Maximum: +32767.99998474121
/// - Resolution: 2^-16 (~0.0000153)
///
/// # Example
/// ```
/// use fixed_point_engine::numeric::{FixedPoint, DEFAULT_FBITS};
///
/// let a = FixedPoint::integral(2).unwrap();
/// let b = FixedPoint::ratio(1, 2).unwrap();
/// let sum = a.add(b).unwrap();
/// assert_eq!(sum.materialize(), 2.5);
/// assert_eq!(sum.fbits(), DEFAULT_FBITS);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FixedPoint {
    raw: i32,
    fbits: u8,
}

// ============================================================================
// Raw Arithmetic
// ============================================================================

#[inline]
fn check_fbits(fbits: u8) -> NumericResult<()> {
    if fbits > MAX_FBITS {
        return Err(NumericError::InvalidFbits(fbits));
    }
    Ok(())
}

/// Raw representation of 1.0 at the given precision.
#[inline]
fn one_raw(fbits: u8) -> NumericResult<i32> {
    i32::try_from(1i64 << fbits).map_err(|_| NumericError::Overflow)
}

/// `(lhs * rhs) >> fbits` in 64-bit, truncating toward negative infinity.
#[inline]
fn mul_raw(lhs: i32, rhs: i32, fbits: u8) -> NumericResult<i32> {
    let wide = i64::from(lhs) * i64::from(rhs);
    i32::try_from(wide >> fbits).map_err(|_| NumericError::Overflow)
}

/// `(lhs << fbits) / rhs` in 64-bit, truncating toward zero.
#[inline]
fn div_raw(lhs: i32, rhs: i32, fbits: u8) -> NumericResult<i32> {
    if rhs == 0 {
        return Err(NumericError::DivisionByZero);
    }
    let wide = i64::from(lhs) << fbits;
    i32::try_from(wide / i64::from(rhs)).map_err(|_| NumericError::Overflow)
}

impl FixedPoint {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from a raw scaled value.
    ///
    /// # Errors
    /// Returns `InvalidFbits` if `fbits` exceeds [`MAX_FBITS`].
    #[inline]
    pub fn from_raw(raw: i32, fbits: u8) -> NumericResult<Self> {
        check_fbits(fbits)?;
        Ok(Self { raw, fbits })
    }

    /// Create from an integer value (`value << fbits`).
    ///
    /// # Errors
    /// Returns `Overflow` if the scaled value does not fit the raw range,
    /// `InvalidFbits` if `fbits` exceeds [`MAX_FBITS`].
    #[inline]
    pub fn from_integral(value: i64, fbits: u8) -> NumericResult<Self> {
        check_fbits(fbits)?;
        let raw = value
            .checked_mul(1i64 << fbits)
            .and_then(|wide| i32::try_from(wide).ok())
            .ok_or(NumericError::Overflow)?;
        Ok(Self { raw, fbits })
    }

    /// Create from an integer ratio, `numerator / denominator`.
    ///
    /// Both sides are scaled before the division, so each must fit the
    /// representable integer range on its own.
    ///
    /// # Errors
    /// Returns `DivisionByZero` when `denominator == 0`, `Overflow` when
    /// either side does not fit.
    #[inline]
    pub fn from_ratio(numerator: i64, denominator: i64, fbits: u8) -> NumericResult<Self> {
        let num = Self::from_integral(numerator, fbits)?;
        let den = Self::from_integral(denominator, fbits)?;
        num.div(den)
    }

    /// `from_integral` at [`DEFAULT_FBITS`].
    #[inline]
    pub fn integral(value: i64) -> NumericResult<Self> {
        Self::from_integral(value, DEFAULT_FBITS)
    }

    /// `from_ratio` at [`DEFAULT_FBITS`].
    #[inline]
    pub fn ratio(numerator: i64, denominator: i64) -> NumericResult<Self> {
        Self::from_ratio(numerator, denominator, DEFAULT_FBITS)
    }

    /// Zero at the given precision.
    #[inline]
    pub fn zero(fbits: u8) -> NumericResult<Self> {
        Self::from_raw(0, fbits)
    }

    /// One at the given precision.
    #[inline]
    pub fn one(fbits: u8) -> NumericResult<Self> {
        Self::from_integral(1, fbits)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get the raw scaled value.
    #[inline]
    pub const fn raw_value(self) -> i32 {
        self.raw
    }

    /// Get the number of fractional bits.
    #[inline]
    pub const fn fbits(self) -> u8 {
        self.fbits
    }

    /// Check if the value is zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.raw == 0
    }

    /// Check if the value is positive.
    #[inline]
    pub const fn is_positive(self) -> bool {
        self.raw > 0
    }

    /// Check if the value is negative.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.raw < 0
    }

    /// Nearest `f64`, `raw / 2^fbits`.
    ///
    /// This is the only place the engine produces a float; everything else
    /// stays on the raw integers.
    #[inline]
    pub fn materialize(self) -> f64 {
        (self.raw as f64) / ((1i64 << self.fbits) as f64)
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Checked addition.
    ///
    /// # Errors
    /// Returns `InvalidPrecision` on an fbits mismatch, `Overflow` if the
    /// result leaves the raw range.
    #[inline]
    pub fn add(self, rhs: Self) -> NumericResult<Self> {
        self.require_same_fbits(rhs)?;
        let raw = self.raw.checked_add(rhs.raw).ok_or(NumericError::Overflow)?;
        Ok(Self { raw, fbits: self.fbits })
    }

    /// Checked subtraction.
    ///
    /// # Errors
    /// Returns `InvalidPrecision` on an fbits mismatch, `Overflow` if the
    /// result leaves the raw range.
    #[inline]
    pub fn sub(self, rhs: Self) -> NumericResult<Self> {
        self.require_same_fbits(rhs)?;
        let raw = self.raw.checked_sub(rhs.raw).ok_or(NumericError::Overflow)?;
        Ok(Self { raw, fbits: self.fbits })
    }

    /// Checked multiplication.
    ///
    /// Computes the product in 64-bit and shifts back down, truncating
    /// toward negative infinity. Note the asymmetry with [`FixedPoint::div`],
    /// which truncates toward zero; the two differ on negative results.
    ///
    /// # Errors
    /// Returns `InvalidPrecision` on an fbits mismatch, `Overflow` if the
    /// result leaves the raw range.
    #[inline]
    pub fn mul(self, rhs: Self) -> NumericResult<Self> {
        self.require_same_fbits(rhs)?;
        let raw = mul_raw(self.raw, rhs.raw, self.fbits)?;
        Ok(Self { raw, fbits: self.fbits })
    }

    /// Checked division.
    ///
    /// Scales the dividend up by `2^fbits` in 64-bit before the integer
    /// division, truncating toward zero.
    ///
    /// # Errors
    /// Returns `InvalidPrecision` on an fbits mismatch, `DivisionByZero`
    /// when `rhs` is zero, `Overflow` if the result leaves the raw range.
    #[inline]
    pub fn div(self, rhs: Self) -> NumericResult<Self> {
        self.require_same_fbits(rhs)?;
        let raw = div_raw(self.raw, rhs.raw, self.fbits)?;
        Ok(Self { raw, fbits: self.fbits })
    }

    /// Checked negation.
    ///
    /// # Errors
    /// Returns `Overflow` for the raw minimum, which has no positive
    /// counterpart.
    #[inline]
    pub fn neg(self) -> NumericResult<Self> {
        let raw = self.raw.checked_neg().ok_or(NumericError::Overflow)?;
        Ok(Self { raw, fbits: self.fbits })
    }

    /// Bitwise complement of the raw value.
    ///
    /// This is not a reciprocal; it flips every bit of the raw
    /// representation, precision included in the interpretation.
    #[inline]
    pub const fn inv(self) -> Self {
        Self { raw: !self.raw, fbits: self.fbits }
    }

    /// Absolute value.
    ///
    /// # Errors
    /// Returns `Overflow` for the raw minimum.
    #[inline]
    pub fn abs(self) -> NumericResult<Self> {
        let raw = self.raw.checked_abs().ok_or(NumericError::Overflow)?;
        Ok(Self { raw, fbits: self.fbits })
    }

    /// Exponential function via a truncated Maclaurin series on the raw
    /// representation.
    ///
    /// Terms are accumulated as `term_n = term_{n-1} * (x / n)` with the
    /// engine's own `mul`/`div`, so results are bit-identical everywhere.
    /// Negative inputs are computed as `1 / exp(|x|)`.
    ///
    /// # Errors
    /// Returns `Overflow` once the series leaves the raw range (around
    /// `exp(10.4)` at the default precision).
    pub fn exp(self) -> NumericResult<Self> {
        let one = one_raw(self.fbits)?;
        let value = self.raw.checked_abs().ok_or(NumericError::Overflow)?;
        let mut result = value.checked_add(one).ok_or(NumericError::Overflow)?;
        let mut term = value;
        for n in 2i64..30 {
            let divisor =
                i32::try_from(n << self.fbits).map_err(|_| NumericError::Overflow)?;
            term = mul_raw(term, div_raw(value, divisor, self.fbits)?, self.fbits)?;
            result = result.checked_add(term).ok_or(NumericError::Overflow)?;
            // Tail cutoff; the thresholds are part of the numeric contract.
            if term < 500 && (n > 15 || term < 20) {
                break;
            }
        }
        let raw = if self.raw < 0 {
            div_raw(one, result, self.fbits)?
        } else {
            result
        };
        Ok(Self { raw, fbits: self.fbits })
    }

    #[inline]
    fn require_same_fbits(self, rhs: Self) -> NumericResult<()> {
        if self.fbits != rhs.fbits {
            return Err(NumericError::InvalidPrecision {
                expected: self.fbits,
                got: rhs.fbits,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Debug for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedPoint({}, raw={}, fbits={})", self, self.raw, self.fbits)
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

// ============================================================================
// Conversion from rust_decimal (for API boundaries)
// ============================================================================

impl FixedPoint {
    /// Convert from `rust_decimal::Decimal`.
    ///
    /// This is intended for API boundaries only (parsing user input). The
    /// value is scaled by `2^fbits` and rounded to the nearest raw unit.
    ///
    /// # Errors
    /// Returns `Overflow` if the scaled value does not fit the raw range,
    /// `InvalidFbits` if `fbits` exceeds [`MAX_FBITS`].
    pub fn from_decimal(value: Decimal, fbits: u8) -> NumericResult<Self> {
        use rust_decimal::prelude::ToPrimitive;

        check_fbits(fbits)?;
        let scale = Decimal::from(1i64 << fbits);
        let scaled = value.checked_mul(scale).ok_or(NumericError::Overflow)?;
        let raw = scaled.round().to_i32().ok_or(NumericError::Overflow)?;
        Ok(Self { raw, fbits })
    }

    /// Convert to `rust_decimal::Decimal`.
    ///
    /// Exact at the default precision; past `Decimal`'s 28 fractional
    /// digits the expansion is rounded. Intended for display and
    /// debugging.
    pub fn to_decimal(self) -> Decimal {
        Decimal::from(self.raw) / Decimal::from(1i64 << self.fbits)
    }
}

// ============================================================================
// String Parsing
// ============================================================================

impl std::str::FromStr for FixedPoint {
    type Err = NumericError;

    /// Parse a decimal string at [`DEFAULT_FBITS`].
    ///
    /// # Examples
    /// - "2.5" -> raw 163840
    /// - "-0.5" -> raw -32768
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(NumericError::InvalidInput);
        }
        let value: Decimal = trimmed.parse().map_err(|_| NumericError::InvalidInput)?;
        Self::from_decimal(value, DEFAULT_FBITS)
    }
}

// ============================================================================
// Tests
// ============================================================================
