// ============================================================================
// Ops Module
// Broadcasting-aware elementwise operations
// ============================================================================
//
// Scalar operations are plain function values (ScalarBinOp/ScalarUnOp);
// binop/unop walk two value trees in lockstep and apply them at the
// leaves. Value::{add, sub, mul, div, exp, neg, inv} are thin wrappers
// over that machinery.

mod broadcast;

pub use broadcast::{align_ranks, binop, shape_compatible, unop, ScalarBinOp, ScalarUnOp};

pub(crate) use broadcast::wrap_in_axis;
