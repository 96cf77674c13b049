// ============================================================================
// Numeric Module
// Deterministic fixed-point arithmetic on 32-bit raw values
// ============================================================================
//
// This module provides:
// - FixedPoint: binary fixed-point scalar with runtime precision (fbits)
// - NumericError: error types shared by every operation in the engine
// - DEFAULT_FBITS/MAX_FBITS: precision bounds
//
// Design principles:
// - No floating-point operations outside materialize()
// - All arithmetic returns Result (no panics)
// - Operands never mix precisions implicitly
// - Identical inputs give bit-identical results on every platform

mod errors;
mod fixed;

pub use errors::{NumericError, NumericResult};
pub use fixed::{FixedPoint, DEFAULT_FBITS, MAX_FBITS};
