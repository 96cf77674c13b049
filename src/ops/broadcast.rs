// ============================================================================
// Broadcasting
// Elementwise operator application over aligned value trees
// ============================================================================

use crate::array::Value;
use crate::numeric::{FixedPoint, NumericError, NumericResult};

/// A scalar binary operation, passed to [`binop`] as a plain function value.
pub type ScalarBinOp = fn(FixedPoint, FixedPoint) -> NumericResult<FixedPoint>;

/// A scalar unary operation, passed to [`unop`] as a plain function value.
pub type ScalarUnOp = fn(FixedPoint) -> NumericResult<FixedPoint>;

/// Apply a scalar operation across two values with broadcasting.
///
/// Dispatch, most specific case first:
/// 1. scalar ⊕ scalar applies `op` directly;
/// 2. array ⊕ scalar (either order) pushes the scalar into every element;
/// 3. arrays of unequal rank are aligned by wrapping the lower-ranked side
///    in singleton axes, then redispatched;
/// 4. arrays of equal rank pair up axis-0 elements, stretching a
///    length-1 axis across the other side.
///
/// # Errors
/// Returns `ShapeMismatch` when the shapes do not broadcast, plus
/// whatever `op` itself reports (precision mismatch, overflow, ...).
pub fn binop(op: ScalarBinOp, lhs: &Value, rhs: &Value) -> NumericResult<Value> {
    match (lhs, rhs) {
        (Value::Scalar(a), Value::Scalar(b)) => op(*a, *b).map(Value::Scalar),
        (Value::Array(arr), Value::Scalar(_)) => {
            let items = arr
                .iter()
                .map(|item| binop(op, item, rhs))
                .collect::<NumericResult<Vec<_>>>()?;
            Ok(Value::from_parts(arr.shape().clone(), items))
        },
        (Value::Scalar(_), Value::Array(arr)) => {
            let items = arr
                .iter()
                .map(|item| binop(op, lhs, item))
                .collect::<NumericResult<Vec<_>>>()?;
            Ok(Value::from_parts(arr.shape().clone(), items))
        },
        (Value::Array(a), Value::Array(b)) => {
            if a.shape().rank() != b.shape().rank() {
                let (wl, wr) = align_ranks(lhs, rhs);
                return binop(op, &wl, &wr);
            }
            // Validates every axis pair up front; the arms below only
            // decide which side stretches.
            let shape = a.shape().broadcast_with(b.shape())?;
            let items = match (a.len(), b.len()) {
                (x, y) if x == y => a
                    .iter()
                    .zip(b.iter())
                    .map(|(l, r)| binop(op, l, r))
                    .collect::<NumericResult<Vec<_>>>()?,
                (1, _) => {
                    let single = &a.items[0];
                    b.iter()
                        .map(|item| binop(op, single, item))
                        .collect::<NumericResult<Vec<_>>>()?
                },
                (_, 1) => {
                    let single = &b.items[0];
                    a.iter()
                        .map(|item| binop(op, item, single))
                        .collect::<NumericResult<Vec<_>>>()?
                },
                _ => {
                    return Err(NumericError::shape_mismatch(
                        a.shape().dims(),
                        b.shape().dims(),
                    ))
                },
            };
            Ok(Value::from_parts(shape, items))
        },
    }
}

/// Apply a scalar operation to every leaf, preserving the shape.
pub fn unop(op: ScalarUnOp, value: &Value) -> NumericResult<Value> {
    match value {
        Value::Scalar(v) => op(*v).map(Value::Scalar),
        Value::Array(arr) => {
            let items = arr
                .iter()
                .map(|item| unop(op, item))
                .collect::<NumericResult<Vec<_>>>()?;
            Ok(Value::from_parts(arr.shape().clone(), items))
        },
    }
}

/// Bring two values to the same rank by wrapping the lower-ranked one in
/// outer singleton axes.
pub fn align_ranks(lhs: &Value, rhs: &Value) -> (Value, Value) {
    let lr = lhs.ndim();
    let rr = rhs.ndim();
    if lr < rr {
        (wrap_to_rank(lhs, rr), rhs.clone())
    } else if rr < lr {
        (lhs.clone(), wrap_to_rank(rhs, lr))
    } else {
        (lhs.clone(), rhs.clone())
    }
}

/// Whether two values broadcast together.
pub fn shape_compatible(lhs: &Value, rhs: &Value) -> bool {
    lhs.shape().compatible(&rhs.shape())
}

/// Wrap a value in one singleton outer axis.
pub(crate) fn wrap_in_axis(value: Value) -> Value {
    let shape = value.shape().prepend(1);
    Value::from_parts(shape, vec![value])
}

fn wrap_to_rank(value: &Value, rank: usize) -> Value {
    let mut wrapped = value.clone();
    while wrapped.ndim() < rank {
        wrapped = wrap_in_axis(wrapped);
    }
    wrapped
}

fn invert(value: FixedPoint) -> NumericResult<FixedPoint> {
    Ok(value.inv())
}

// ============================================================================
// Elementwise Value Operations
// ============================================================================

impl Value {
    /// Elementwise checked addition with broadcasting.
    pub fn add(&self, rhs: &Value) -> NumericResult<Value> {
        binop(FixedPoint::add, self, rhs)
    }

    /// Elementwise checked subtraction with broadcasting.
    pub fn sub(&self, rhs: &Value) -> NumericResult<Value> {
        binop(FixedPoint::sub, self, rhs)
    }

    /// Elementwise checked multiplication with broadcasting.
    pub fn mul(&self, rhs: &Value) -> NumericResult<Value> {
        binop(FixedPoint::mul, self, rhs)
    }

    /// Elementwise checked division with broadcasting.
    pub fn div(&self, rhs: &Value) -> NumericResult<Value> {
        binop(FixedPoint::div, self, rhs)
    }

    /// Elementwise exponential.
    pub fn exp(&self) -> NumericResult<Value> {
        unop(FixedPoint::exp, self)
    }

    /// Elementwise checked negation.
    pub fn neg(&self) -> NumericResult<Value> {
        unop(FixedPoint::neg, self)
    }

    /// Elementwise bitwise complement of the raw representations.
    pub fn inv(&self) -> NumericResult<Value> {
        unop(invert, self)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::Shape;

    fn fp(value: i64) -> FixedPoint {
        FixedPoint::integral(value).unwrap()
    }

    fn vector(values: &[i64]) -> Value {
        Value::from_scalars(values.iter().map(|&v| fp(v)).collect()).unwrap()
    }

    fn matrix(rows: &[&[i64]]) -> Value {
        Value::array(rows.iter().map(|row| vector(row)).collect()).unwrap()
    }

    fn as_vec(value: &Value) -> Vec<f64> {
        value.materialize().as_vec().unwrap()
    }

    fn as_matrix(value: &Value) -> Vec<Vec<f64>> {
        value.materialize().as_matrix().unwrap()
    }

    #[test]
    fn test_scalar_scalar() {
        let a = Value::scalar(fp(2));
        let b = Value::scalar(fp(5));
        assert_eq!(a.add(&b).unwrap(), Value::scalar(fp(7)));
        assert_eq!(a.sub(&b).unwrap(), Value::scalar(fp(-3)));
        assert_eq!(a.mul(&b).unwrap(), Value::scalar(fp(10)));
    }

    #[test]
    fn test_vector_scalar_broadcast() {
        let v = vector(&[1, 2, 3]);
        let k = Value::scalar(fp(10));
        assert_eq!(as_vec(&v.add(&k).unwrap()), vec![11.0, 12.0, 13.0]);
        assert_eq!(as_vec(&v.mul(&k).unwrap()), vec![10.0, 20.0, 30.0]);
        // The scalar can sit on either side.
        assert_eq!(as_vec(&k.sub(&v).unwrap()), vec![9.0, 8.0, 7.0]);
    }

    #[test]
    fn test_vector_vector_elementwise() {
        let a = vector(&[1, 2, 3]);
        let b = vector(&[10, 20, 30]);
        assert_eq!(as_vec(&a.add(&b).unwrap()), vec![11.0, 22.0, 33.0]);
        assert_eq!(as_vec(&b.div(&a).unwrap()), vec![10.0, 10.0, 10.0]);
    }

    #[test]
    fn test_matrix_vector_rank_alignment() {
        let m = matrix(&[&[1, 2], &[3, 4]]);
        let row = vector(&[10, 20]);
        assert_eq!(
            as_matrix(&m.add(&row).unwrap()),
            vec![vec![11.0, 22.0], vec![13.0, 24.0]]
        );
    }

    #[test]
    fn test_matrix_column_broadcast() {
        let m = matrix(&[&[1, 2], &[3, 4]]);
        let col = matrix(&[&[10], &[20]]);
        assert_eq!(
            as_matrix(&m.add(&col).unwrap()),
            vec![vec![11.0, 12.0], vec![23.0, 24.0]]
        );
    }

    #[test]
    fn test_singleton_axis_stretches() {
        let single = matrix(&[&[1, 2]]);
        let m = matrix(&[&[10, 20], &[30, 40]]);
        assert_eq!(
            as_matrix(&single.add(&m).unwrap()),
            vec![vec![11.0, 22.0], vec![31.0, 42.0]]
        );
    }

    #[test]
    fn test_shape_mismatch() {
        let a = vector(&[1, 2, 3]);
        let b = vector(&[1, 2, 3, 4]);
        assert_eq!(
            a.add(&b),
            Err(NumericError::shape_mismatch(&[3], &[4]))
        );
        assert!(!shape_compatible(&a, &b));
        assert!(shape_compatible(&a, &vector(&[7])));
    }

    #[test]
    fn test_align_ranks() {
        let v = vector(&[1, 2]);
        let m = matrix(&[&[1, 2], &[3, 4]]);
        let (wl, wr) = align_ranks(&v, &m);
        assert_eq!(wl.shape(), Shape::matrix(1, 2));
        assert_eq!(wr, m);

        let (sl, sr) = align_ranks(&m, &m);
        assert_eq!((sl, sr), (m.clone(), m));
    }

    #[test]
    fn test_unop_elementwise() {
        let v = vector(&[0, 1]);
        let e = v.exp().unwrap();
        let reals = as_vec(&e);
        assert_eq!(reals[0], 1.0);
        assert!((reals[1] - std::f64::consts::E).abs() < 1e-3);

        assert_eq!(as_vec(&v.neg().unwrap()), vec![0.0, -1.0]);
        assert_eq!(
            v.inv().unwrap(),
            Value::from_scalars(vec![
                FixedPoint::from_raw(-1, 16).unwrap(),
                FixedPoint::from_raw(!65536, 16).unwrap(),
            ])
            .unwrap()
        );
    }

    #[test]
    fn test_shape_preserved_through_unop() {
        let m = matrix(&[&[1, 2, 3], &[4, 5, 6]]);
        assert_eq!(m.neg().unwrap().shape(), Shape::matrix(2, 3));
    }

    #[test]
    fn test_empty_axis_broadcast() {
        let empty = Value::from_parts(Shape::vector(0), vec![]);
        let k = Value::scalar(fp(3));
        let result = empty.add(&k).unwrap();
        assert_eq!(result.shape(), Shape::vector(0));
        assert_eq!(result.size(), 0);

        // Length 0 against length 1 stays length 0.
        let single = vector(&[5]);
        assert_eq!(empty.add(&single).unwrap().shape(), Shape::vector(0));
    }

    #[test]
    fn test_precision_mismatch_propagates() {
        let a = Value::from_scalars(vec![FixedPoint::from_integral(1, 16).unwrap()]).unwrap();
        let b = Value::from_scalars(vec![FixedPoint::from_integral(1, 8).unwrap()]).unwrap();
        assert_eq!(
            a.add(&b),
            Err(NumericError::InvalidPrecision { expected: 16, got: 8 })
        );
    }

    #[test]
    fn test_overflow_propagates_from_leaf() {
        let v = Value::from_scalars(vec![
            fp(1),
            FixedPoint::from_raw(i32::MAX, 16).unwrap(),
        ])
        .unwrap();
        assert_eq!(v.add(&Value::scalar(fp(1))), Err(NumericError::Overflow));
    }

    // ── proptest ─────────────────────────────────────────────────────────

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn broadcast_add_matches_per_element(
                raws in proptest::collection::vec(-(1i32 << 30)..(1i32 << 30), 1..8),
                k in -(1i32 << 30)..(1i32 << 30),
            ) {
                let scalars: Vec<FixedPoint> = raws
                    .iter()
                    .map(|&r| FixedPoint::from_raw(r, 16).unwrap())
                    .collect();
                let v = Value::from_scalars(scalars.clone()).unwrap();
                let key = FixedPoint::from_raw(k, 16).unwrap();
                let sum = v.add(&Value::scalar(key)).unwrap();
                for (i, &s) in scalars.iter().enumerate() {
                    let got = sum.getitem(&[i]).unwrap().as_scalar().unwrap();
                    prop_assert_eq!(got, s.add(key).unwrap());
                }
            }
        }
    }
}
