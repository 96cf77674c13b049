// ============================================================================
// Reductions and Axis-0 Surgery
// Folds, concatenation, splitting, and filled constructors
// ============================================================================

use crate::array::{Shape, Value};
use crate::numeric::{FixedPoint, NumericError, NumericResult, DEFAULT_FBITS};
use crate::ops::{binop, ScalarBinOp};

/// Fold an operation over axis 0, associating to the right.
///
/// Each fold step goes through the broadcasting [`binop`], so reducing a
/// matrix combines its rows elementwise and yields a vector; reducing a
/// vector yields a scalar. A single-element axis comes back as that
/// element.
///
/// # Errors
/// Returns `UnsupportedRank(0)` for a scalar operand and
/// `IndexOutOfRange` for an empty axis (the fold has no identity
/// element), plus whatever `op` itself reports.
pub fn reduce(op: ScalarBinOp, value: &Value) -> NumericResult<Value> {
    let arr = match value {
        Value::Array(arr) => arr,
        Value::Scalar(_) => return Err(NumericError::UnsupportedRank(0)),
    };
    let (last, rest) = arr
        .items
        .split_last()
        .ok_or(NumericError::IndexOutOfRange { index: 0, len: 0 })?;
    let mut acc = last.clone();
    for item in rest.iter().rev() {
        acc = binop(op, item, &acc)?;
    }
    Ok(acc)
}

/// Sum over axis 0: `reduce` with checked addition.
pub fn sum(value: &Value) -> NumericResult<Value> {
    reduce(FixedPoint::add, value)
}

/// Product over axis 0: `reduce` with checked multiplication.
pub fn product(value: &Value) -> NumericResult<Value> {
    reduce(FixedPoint::mul, value)
}

/// Concatenate arrays along axis 0.
///
/// Every part must agree on the element shape (everything below axis 0)
/// and on precision; empty parts contribute nothing but still take part
/// in the shape agreement.
///
/// # Errors
/// Returns `InvalidInput` for an empty part list, `UnsupportedRank(0)`
/// for a scalar part, `ShapeMismatch`/`InvalidPrecision` on disagreement.
pub fn concat(parts: &[Value]) -> NumericResult<Value> {
    let first = parts.first().ok_or(NumericError::InvalidInput)?;
    let first_arr = match first {
        Value::Array(arr) => arr,
        Value::Scalar(_) => return Err(NumericError::UnsupportedRank(0)),
    };
    let inner = first_arr.shape().inner();
    let mut fbits = first.fbits();
    let mut len = first_arr.len();
    for part in &parts[1..] {
        let arr = match part {
            Value::Array(arr) => arr,
            Value::Scalar(_) => return Err(NumericError::UnsupportedRank(0)),
        };
        if arr.shape().inner() != inner {
            return Err(NumericError::shape_mismatch(
                first_arr.shape().dims(),
                arr.shape().dims(),
            ));
        }
        match (fbits, part.fbits()) {
            (Some(expected), Some(got)) if expected != got => {
                return Err(NumericError::InvalidPrecision { expected, got });
            },
            (None, Some(got)) => fbits = Some(got),
            _ => {},
        }
        len += arr.len();
    }
    let mut items = Vec::with_capacity(len);
    for part in parts {
        if let Value::Array(arr) = part {
            items.extend(arr.iter().cloned());
        }
    }
    Ok(Value::from_parts(inner.prepend(len), items))
}

/// Partition axis 0 at `index` into a prefix and a suffix.
///
/// The cut point is clamped to the axis length, so an index past the end
/// returns the whole array and an empty suffix; the empty side still
/// carries the element shape.
///
/// # Errors
/// Returns `UnsupportedRank(0)` for a scalar operand.
pub fn split(index: usize, value: &Value) -> NumericResult<(Value, Value)> {
    let arr = match value {
        Value::Array(arr) => arr,
        Value::Scalar(_) => return Err(NumericError::UnsupportedRank(0)),
    };
    let cut = index.min(arr.len());
    let inner = arr.shape().inner();
    let prefix = arr.items[..cut].to_vec();
    let suffix = arr.items[cut..].to_vec();
    Ok((
        Value::from_parts(inner.prepend(cut), prefix),
        Value::from_parts(inner.prepend(arr.len() - cut), suffix),
    ))
}

/// A vector of `len` copies of one scalar.
///
/// # Errors
/// Returns `InvalidInput` when `len` is zero.
pub fn full(len: usize, value: FixedPoint) -> NumericResult<Value> {
    if len == 0 {
        return Err(NumericError::InvalidInput);
    }
    Ok(Value::from_parts(
        Shape::vector(len),
        vec![Value::Scalar(value); len],
    ))
}

/// A vector of zeros at [`DEFAULT_FBITS`].
pub fn zeros(len: usize) -> NumericResult<Value> {
    zeros_with(len, DEFAULT_FBITS)
}

/// A vector of zeros at the given precision.
pub fn zeros_with(len: usize, fbits: u8) -> NumericResult<Value> {
    full(len, FixedPoint::zero(fbits)?)
}

/// A vector of ones at [`DEFAULT_FBITS`].
pub fn ones(len: usize) -> NumericResult<Value> {
    ones_with(len, DEFAULT_FBITS)
}

/// A vector of ones at the given precision.
pub fn ones_with(len: usize, fbits: u8) -> NumericResult<Value> {
    full(len, FixedPoint::one(fbits)?)
}

/// Repeat each axis-0 element `count` times in place.
///
/// `repeat(2, [a, b])` is `[a, a, b, b]`; a scalar repeats into a
/// vector; a count of zero produces the empty array.
pub fn repeat(count: usize, value: &Value) -> NumericResult<Value> {
    match value {
        Value::Scalar(v) => {
            if count == 0 {
                return Ok(Value::from_parts(Shape::vector(0), vec![]));
            }
            full(count, *v)
        },
        Value::Array(arr) => {
            let mut items = Vec::with_capacity(arr.len() * count);
            for item in arr.iter() {
                for _ in 0..count {
                    items.push(item.clone());
                }
            }
            Ok(Value::from_parts(
                arr.shape().inner().prepend(arr.len() * count),
                items,
            ))
        },
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(value: i64) -> FixedPoint {
        FixedPoint::integral(value).unwrap()
    }

    fn vector(values: &[i64]) -> Value {
        Value::from_scalars(values.iter().map(|&v| fp(v)).collect()).unwrap()
    }

    fn matrix(rows: &[&[i64]]) -> Value {
        Value::array(rows.iter().map(|row| vector(row)).collect()).unwrap()
    }

    #[test]
    fn test_sum_vector() {
        assert_eq!(sum(&vector(&[1, 2, 3])).unwrap(), Value::scalar(fp(6)));
    }

    #[test]
    fn test_sum_matrix_combines_rows() {
        let m = matrix(&[&[1, 2], &[3, 4], &[5, 6]]);
        assert_eq!(sum(&m).unwrap(), vector(&[9, 12]));
    }

    #[test]
    fn test_product_vector() {
        assert_eq!(product(&vector(&[2, 3, 4])).unwrap(), Value::scalar(fp(24)));
    }

    #[test]
    fn test_reduce_single_element() {
        let m = matrix(&[&[1, 2]]);
        assert_eq!(reduce(FixedPoint::add, &m).unwrap(), vector(&[1, 2]));
    }

    #[test]
    fn test_reduce_associates_to_the_right() {
        // 10 - (3 - 2) = 9; a left fold would give 5.
        let v = vector(&[10, 3, 2]);
        assert_eq!(reduce(FixedPoint::sub, &v).unwrap(), Value::scalar(fp(9)));
    }

    #[test]
    fn test_reduce_rejects_scalar_and_empty() {
        assert_eq!(
            sum(&Value::scalar(fp(1))),
            Err(NumericError::UnsupportedRank(0))
        );
        let (_, empty) = split(3, &vector(&[1, 2, 3])).unwrap();
        assert_eq!(
            sum(&empty),
            Err(NumericError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_concat_vectors() {
        let joined = concat(&[vector(&[1, 2]), vector(&[3])]).unwrap();
        assert_eq!(joined, vector(&[1, 2, 3]));
    }

    #[test]
    fn test_concat_matrices() {
        let joined = concat(&[matrix(&[&[1, 2]]), matrix(&[&[3, 4], &[5, 6]])]).unwrap();
        assert_eq!(joined, matrix(&[&[1, 2], &[3, 4], &[5, 6]]));
        assert_eq!(joined.shape(), Shape::matrix(3, 2));
    }

    #[test]
    fn test_concat_empty_part() {
        let (_, empty) = split(9, &vector(&[1, 2])).unwrap();
        let joined = concat(&[vector(&[1, 2]), empty]).unwrap();
        assert_eq!(joined, vector(&[1, 2]));
    }

    #[test]
    fn test_concat_errors() {
        assert_eq!(concat(&[]), Err(NumericError::InvalidInput));
        assert_eq!(
            concat(&[vector(&[1]), Value::scalar(fp(2))]),
            Err(NumericError::UnsupportedRank(0))
        );
        assert_eq!(
            concat(&[vector(&[1, 2]), matrix(&[&[1, 2]])]),
            Err(NumericError::shape_mismatch(&[2], &[1, 2]))
        );

        let coarse = Value::from_scalars(vec![FixedPoint::from_integral(1, 8).unwrap()]).unwrap();
        assert_eq!(
            concat(&[vector(&[1]), coarse]),
            Err(NumericError::InvalidPrecision { expected: 16, got: 8 })
        );
    }

    #[test]
    fn test_split_middle() {
        let (prefix, suffix) = split(1, &matrix(&[&[1, 2], &[3, 4]])).unwrap();
        assert_eq!(prefix, matrix(&[&[1, 2]]));
        assert_eq!(suffix, matrix(&[&[3, 4]]));
    }

    #[test]
    fn test_split_bounds() {
        let v = vector(&[1, 2, 3]);

        let (prefix, suffix) = split(0, &v).unwrap();
        assert_eq!(prefix.shape(), Shape::vector(0));
        assert_eq!(suffix, v);

        // Past the end: clamped, empty suffix still shaped.
        let (prefix, suffix) = split(7, &v).unwrap();
        assert_eq!(prefix, v);
        assert_eq!(suffix.shape(), Shape::vector(0));
        assert_eq!(suffix.size(), 0);
    }

    #[test]
    fn test_split_suffix_keeps_element_shape() {
        let m = matrix(&[&[1, 2], &[3, 4]]);
        let (_, suffix) = split(5, &m).unwrap();
        assert_eq!(suffix.shape(), Shape::matrix(0, 2));
    }

    #[test]
    fn test_split_scalar_rejected() {
        assert_eq!(
            split(0, &Value::scalar(fp(1))),
            Err(NumericError::UnsupportedRank(0))
        );
    }

    #[test]
    fn test_split_concat_round_trip() {
        let v = vector(&[1, 2, 3, 4]);
        for cut in 0..=5 {
            let (prefix, suffix) = split(cut, &v).unwrap();
            assert_eq!(concat(&[prefix, suffix]).unwrap(), v);
        }
    }

    #[test]
    fn test_fills() {
        assert_eq!(ones(3).unwrap(), vector(&[1, 1, 1]));
        assert_eq!(zeros(2).unwrap(), vector(&[0, 0]));
        assert_eq!(
            full(2, FixedPoint::ratio(1, 2).unwrap()).unwrap().materialize().as_vec().unwrap(),
            vec![0.5, 0.5]
        );
        assert_eq!(full(0, fp(1)), Err(NumericError::InvalidInput));

        let coarse = ones_with(2, 8).unwrap();
        assert_eq!(coarse.fbits(), Some(8));
    }

    #[test]
    fn test_repeat_vector() {
        assert_eq!(repeat(2, &vector(&[1, 2])).unwrap(), vector(&[1, 1, 2, 2]));
        assert_eq!(repeat(1, &vector(&[1, 2])).unwrap(), vector(&[1, 2]));
    }

    #[test]
    fn test_repeat_scalar() {
        assert_eq!(repeat(3, &Value::scalar(fp(5))).unwrap(), vector(&[5, 5, 5]));
    }

    #[test]
    fn test_repeat_zero() {
        let empty = repeat(0, &vector(&[1, 2])).unwrap();
        assert_eq!(empty.shape(), Shape::vector(0));
        let empty = repeat(0, &Value::scalar(fp(1))).unwrap();
        assert_eq!(empty.shape(), Shape::vector(0));
    }

    #[test]
    fn test_repeat_matrix_rows() {
        let m = matrix(&[&[1, 2], &[3, 4]]);
        assert_eq!(
            repeat(2, &m).unwrap(),
            matrix(&[&[1, 2], &[1, 2], &[3, 4], &[3, 4]])
        );
    }
}
