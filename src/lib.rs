// ============================================================================
// Fixed-Point Engine Library
// Deterministic fixed-point arithmetic, broadcasting, and training
// ============================================================================

//! # Fixed-Point Engine
//!
//! A deterministic numeric engine built on 32-bit fixed-point scalars.
//!
//! ## Features
//!
//! - **Deterministic arithmetic** on `i32` raw values with explicit
//!   fractional-bit precision, bit-identical on every platform
//! - **Homogeneous value trees** of any rank with numpy-style broadcasting
//! - **Reductions and linear algebra**: sum, product, transpose, split,
//!   concatenation, matrix product
//! - **Gradient-descent training** of a single-layer logistic model
//! - **Exact decimal conversion** for construction and display, with
//!   serialization behind the `serde` feature
//!
//! ## Example
//!
//! ```rust
//! use fixed_point_engine::prelude::*;
//!
//! // Scalars carry 16 fractional bits by default
//! let half = FixedPoint::ratio(1, 2).unwrap();
//! assert_eq!(half.add(half).unwrap(), FixedPoint::one(DEFAULT_FBITS).unwrap());
//!
//! // Values broadcast per element
//! let row = Value::from_scalars(vec![
//!     FixedPoint::integral(1).unwrap(),
//!     FixedPoint::integral(2).unwrap(),
//!     FixedPoint::integral(3).unwrap(),
//! ])
//! .unwrap();
//! let two = Value::scalar(FixedPoint::integral(2).unwrap());
//! let doubled = row.mul(&two).unwrap();
//! assert_eq!(
//!     sum(&doubled).unwrap(),
//!     Value::scalar(FixedPoint::integral(12).unwrap())
//! );
//!
//! // Inner product of two vectors
//! assert_eq!(
//!     dot(&row, &row).unwrap(),
//!     Value::scalar(FixedPoint::integral(14).unwrap())
//! );
//!
//! // Everything materializes back to floats for inspection
//! assert_eq!(doubled.materialize().as_vec().unwrap(), vec![2.0, 4.0, 6.0]);
//! ```

pub mod array;
pub mod linalg;
pub mod numeric;
pub mod ops;
pub mod train;

// Re-exports for convenience
pub mod prelude {
    pub use crate::array::{ArrayValue, Real, Shape, Value};
    pub use crate::linalg::{
        concat, dot, full, hsplit, ones, ones_with, product, reduce, repeat, split, sum,
        transpose, zeros, zeros_with,
    };
    pub use crate::numeric::{FixedPoint, NumericError, NumericResult, DEFAULT_FBITS, MAX_FBITS};
    pub use crate::ops::{align_ranks, binop, shape_compatible, unop, ScalarBinOp, ScalarUnOp};
    pub use crate::train::{predict, sigmoid, sigmoid_derivative, train, Trainer};
}
