// ============================================================================
// Matrix Operations
// Transpose and rank-dispatched dot products
// ============================================================================

use super::reduce::{split, sum};
use crate::array::{Shape, Value};
use crate::numeric::{NumericError, NumericResult};
use crate::ops::wrap_in_axis;

/// Transpose a value.
///
/// Rank 2 swaps the axes through an index permutation; ranks 0 and 1
/// come back unchanged. Works on empty matrices, where it swaps a
/// `[0, c]` shape into `[c, 0]`.
///
/// # Errors
/// Returns `UnsupportedRank` above rank 2.
pub fn transpose(value: &Value) -> NumericResult<Value> {
    let arr = match value {
        Value::Scalar(_) => return Ok(value.clone()),
        Value::Array(arr) => arr,
    };
    match arr.shape().rank() {
        1 => Ok(value.clone()),
        2 => {
            let dims = arr.shape().dims();
            let (rows, cols) = (dims[0], dims[1]);
            let mut out = Vec::with_capacity(cols);
            for col in 0..cols {
                let mut items = Vec::with_capacity(rows);
                for row in 0..rows {
                    items.push(value.getitem(&[row, col])?);
                }
                out.push(Value::from_parts(Shape::vector(rows), items));
            }
            Ok(Value::from_parts(Shape::matrix(cols, rows), out))
        },
        rank => Err(NumericError::UnsupportedRank(rank)),
    }
}

/// Split along axis 1: transpose, [`split`] at `index`, transpose both
/// halves back.
///
/// On a vector the transposes are identities, so this degenerates to an
/// axis-0 split, matching the numpy behavior.
pub fn hsplit(index: usize, value: &Value) -> NumericResult<(Value, Value)> {
    let (prefix, suffix) = split(index, &transpose(value)?)?;
    Ok((transpose(&prefix)?, transpose(&suffix)?))
}

/// Generalized dot product, dispatched on operand ranks.
///
/// - any scalar operand: broadcast elementwise multiplication;
/// - vector · vector: inner product, `sum(mul(lhs, rhs))`;
/// - vector · matrix: the vector is promoted to a single-row matrix and
///   the result flattened back to a vector;
/// - matrix · vector: the vector is promoted to a column and the result
///   flattened back to a vector;
/// - matrix · matrix: matrix multiplication.
///
/// # Errors
/// Returns `ShapeMismatch` when the inner dimensions disagree and
/// `UnsupportedRank` above rank 2.
pub fn dot(lhs: &Value, rhs: &Value) -> NumericResult<Value> {
    if lhs.is_scalar() || rhs.is_scalar() {
        return lhs.mul(rhs);
    }
    match (lhs.ndim(), rhs.ndim()) {
        (1, 1) => sum(&lhs.mul(rhs)?),
        (1, 2) => {
            let promoted = wrap_in_axis(lhs.clone());
            matmul(&promoted, rhs)?.getitem(&[0])
        },
        (2, 1) => {
            let promoted = transpose(&wrap_in_axis(rhs.clone()))?;
            transpose(&matmul(lhs, &promoted)?)?.getitem(&[0])
        },
        (2, 2) => matmul(lhs, rhs),
        (a, b) => Err(NumericError::UnsupportedRank(a.max(b))),
    }
}

/// `(n, m) · (m, p) -> (n, p)` by inner products of `lhs` rows against
/// the transposed `rhs` rows. Callers guarantee both operands are rank 2.
fn matmul(lhs: &Value, rhs: &Value) -> NumericResult<Value> {
    let lshape = lhs.shape();
    let rshape = rhs.shape();
    if lshape.dims()[1] != rshape.dims()[0] {
        return Err(NumericError::shape_mismatch(lshape.dims(), rshape.dims()));
    }
    let (rows, cols) = (lshape.dims()[0], rshape.dims()[1]);
    let flipped = transpose(rhs)?;
    let mut columns = Vec::with_capacity(cols);
    for j in 0..cols {
        columns.push(flipped.getitem(&[j])?);
    }
    let mut out = Vec::with_capacity(rows);
    for i in 0..rows {
        let row = lhs.getitem(&[i])?;
        let cells = columns
            .iter()
            .map(|col| sum(&row.mul(col)?))
            .collect::<NumericResult<Vec<_>>>()?;
        out.push(Value::from_parts(Shape::vector(cols), cells));
    }
    Ok(Value::from_parts(Shape::matrix(rows, cols), out))
}

// ============================================================================
// Tests
// ============================================================================
