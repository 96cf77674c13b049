// ============================================================================
// Array Module
// Shapes and the tagged scalar/array value tree
// ============================================================================
//
// This module provides:
// - Shape: dimension lists with broadcast alignment
// - Value/ArrayValue: homogeneous n-d trees of FixedPoint leaves
// - Real: the f64 mirror produced by materialize()
//
// Design principles:
// - Invariants (uniform child shape, uniform fbits) hold by construction
// - Empty arrays carry their shape explicitly instead of deriving it
// - Values are immutable; operations build new trees

mod shape;
mod value;

pub use shape::Shape;
pub use value::{ArrayValue, Real, Value};
