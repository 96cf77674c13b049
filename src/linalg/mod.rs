// ============================================================================
// Linalg Module
// Reductions, axis surgery, and dot products over value trees
// ============================================================================
//
// Everything here is a free function over &Value, mirroring the
// elementwise layer: reductions fold through the broadcasting binop,
// and the dot product dispatches on operand ranks.

mod matrix;
mod reduce;

pub use matrix::{dot, hsplit, transpose};
pub use reduce::{
    concat, full, ones, ones_with, product, reduce, repeat, split, sum, zeros, zeros_with,
};
