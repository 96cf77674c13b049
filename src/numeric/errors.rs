// ============================================================================
// Numeric Errors
// Error types for fixed-point arithmetic and array operations
// ============================================================================

use std::fmt;

/// Errors that can occur during fixed-point arithmetic and array operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Operand precisions disagree (binary operations require equal fbits)
    InvalidPrecision {
        /// Fractional bits of the left operand
        expected: u8,
        /// Fractional bits of the offending operand
        got: u8,
    },
    /// Requested fractional-bit count outside 0..=31
    InvalidFbits(u8),
    /// Attempted division by zero
    DivisionByZero,
    /// Result left the representable i32 raw range
    Overflow,
    /// Incompatible operand shapes
    ShapeMismatch {
        /// Shape of the left operand
        lhs: Vec<usize>,
        /// Shape of the right operand
        rhs: Vec<usize>,
    },
    /// Index past the end of axis 0
    IndexOutOfRange {
        /// The requested index
        index: usize,
        /// Length of the indexed axis
        len: usize,
    },
    /// Operand rank outside the ranks the operation is defined for
    UnsupportedRank(usize),
    /// Input string or value is invalid
    InvalidInput,
}

impl NumericError {
    /// Build a `ShapeMismatch` from two dimension slices.
    #[inline]
    pub fn shape_mismatch(lhs: &[usize], rhs: &[usize]) -> Self {
        NumericError::ShapeMismatch {
            lhs: lhs.to_vec(),
            rhs: rhs.to_vec(),
        }
    }
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::InvalidPrecision { expected, got } => write!(
                f,
                "precision mismatch: expected {} fractional bits, got {}",
                expected, got
            ),
            NumericError::InvalidFbits(fbits) => write!(
                f,
                "invalid precision: {} fractional bits exceeds the 31-bit raw width",
                fbits
            ),
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: result exceeded the 32-bit raw range")
            },
            NumericError::ShapeMismatch { lhs, rhs } => {
                write!(f, "shape mismatch: {:?} is not compatible with {:?}", lhs, rhs)
            },
            NumericError::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for axis of length {}", index, len)
            },
            NumericError::UnsupportedRank(rank) => {
                write!(f, "unsupported operand rank: {}", rank)
            },
            NumericError::InvalidInput => write!(f, "invalid input: empty or unparseable value"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
