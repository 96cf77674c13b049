// ============================================================================
// Value Tree
// Tagged scalar/array values with validated shape and precision
// ============================================================================

use super::shape::Shape;
use crate::numeric::{FixedPoint, NumericError, NumericResult};
use std::fmt;

/// A fixed-point value: either a single scalar or an n-dimensional array.
///
/// Arrays are trees: each axis-0 element is itself a [`Value`], and every
/// constructor validates that siblings share one shape and one precision.
/// Anything the public API hands out therefore satisfies the standing
/// invariants; operations dispatch on the variant and never re-validate.
///
/// # Example
/// ```
/// use fixed_point_engine::array::Value;
/// use fixed_point_engine::numeric::FixedPoint;
///
/// let row = Value::from_scalars(vec![
///     FixedPoint::integral(1).unwrap(),
///     FixedPoint::integral(2).unwrap(),
/// ]).unwrap();
/// assert_eq!(row.shape().dims(), &[2]);
/// assert_eq!(row.getitem(&[1]).unwrap().as_scalar().unwrap().materialize(), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Value {
    /// A single fixed-point number
    Scalar(FixedPoint),
    /// A non-scalar value with at least one axis
    Array(ArrayValue),
}

/// The array payload of a [`Value`].
///
/// Carries its shape explicitly so that empty arrays (the suffix of a
/// `split` past the end, a `repeat` count of zero) still know the shape
/// of the elements they do not have.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ArrayValue {
    pub(crate) shape: Shape,
    pub(crate) items: Vec<Value>,
}

impl ArrayValue {
    /// Shape of the whole array.
    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Number of axis-0 elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether axis 0 is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The axis-0 element at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Iterate over the axis-0 elements.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }
}

impl Value {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Wrap a scalar.
    #[inline]
    pub fn scalar(value: FixedPoint) -> Self {
        Value::Scalar(value)
    }

    /// Assemble an array from its axis-0 elements.
    ///
    /// # Errors
    /// Returns `InvalidInput` for an empty element list, `ShapeMismatch`
    /// when the elements disagree on shape, `InvalidPrecision` when they
    /// disagree on fractional bits.
    pub fn array(items: Vec<Value>) -> NumericResult<Self> {
        let first = items.first().ok_or(NumericError::InvalidInput)?;
        let child_shape = first.shape();
        let child_fbits = first.fbits();
        for item in &items[1..] {
            let shape = item.shape();
            if shape != child_shape {
                return Err(NumericError::shape_mismatch(child_shape.dims(), shape.dims()));
            }
            if let (Some(expected), Some(got)) = (child_fbits, item.fbits()) {
                if expected != got {
                    return Err(NumericError::InvalidPrecision { expected, got });
                }
            }
        }
        let shape = child_shape.prepend(items.len());
        Ok(Value::Array(ArrayValue { shape, items }))
    }

    /// Rank-1 array from a list of scalars.
    pub fn from_scalars(values: Vec<FixedPoint>) -> NumericResult<Self> {
        Self::array(values.into_iter().map(Value::Scalar).collect())
    }

    /// Shape `(n, 1)` column from a list of scalars.
    pub fn column(values: Vec<FixedPoint>) -> NumericResult<Self> {
        let rows = values
            .into_iter()
            .map(|v| Self::array(vec![Value::Scalar(v)]))
            .collect::<NumericResult<Vec<_>>>()?;
        Self::array(rows)
    }

    /// Assemble from parts already known to satisfy the invariants.
    ///
    /// Used by operations whose result shape is derived from validated
    /// inputs; the only way to build an empty array.
    pub(crate) fn from_parts(shape: Shape, items: Vec<Value>) -> Self {
        debug_assert_eq!(shape.len_axis0(), items.len());
        Value::Array(ArrayValue { shape, items })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Shape of the value; scalars have the rank-0 shape.
    pub fn shape(&self) -> Shape {
        match self {
            Value::Scalar(_) => Shape::scalar(),
            Value::Array(arr) => arr.shape.clone(),
        }
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        match self {
            Value::Scalar(_) => 0,
            Value::Array(arr) => arr.shape.rank(),
        }
    }

    /// Length of axis 0; scalars report 0.
    pub fn size(&self) -> usize {
        match self {
            Value::Scalar(_) => 0,
            Value::Array(arr) => arr.items.len(),
        }
    }

    /// Whether this is a scalar.
    #[inline]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    /// The scalar payload, if this is one.
    pub fn as_scalar(&self) -> Option<FixedPoint> {
        match self {
            Value::Scalar(v) => Some(*v),
            Value::Array(_) => None,
        }
    }

    /// The array payload, if this is one.
    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Value::Scalar(_) => None,
            Value::Array(arr) => Some(arr),
        }
    }

    /// Fractional bits shared by every leaf.
    ///
    /// `None` only for arrays with no leaves at all (an empty axis).
    pub fn fbits(&self) -> Option<u8> {
        match self {
            Value::Scalar(v) => Some(v.fbits()),
            Value::Array(arr) => arr.items.first().and_then(Value::fbits),
        }
    }

    // ========================================================================
    // Indexing and Materialization
    // ========================================================================

    /// Index along successive outermost axes.
    ///
    /// Each index selects one axis-0 element and strips one dimension; an
    /// empty index list returns the value unchanged.
    ///
    /// # Errors
    /// Returns `IndexOutOfRange` when an index reaches past axis 0.
    /// Scalars have no axes, so any index into one fails with `len: 0`.
    pub fn getitem(&self, indices: &[usize]) -> NumericResult<Value> {
        let mut current = self;
        for &index in indices {
            current = match current {
                Value::Scalar(_) => {
                    return Err(NumericError::IndexOutOfRange { index, len: 0 });
                },
                Value::Array(arr) => {
                    arr.items.get(index).ok_or(NumericError::IndexOutOfRange {
                        index,
                        len: arr.items.len(),
                    })?
                },
            };
        }
        Ok(current.clone())
    }

    /// Convert the whole tree to nested `f64`s.
    pub fn materialize(&self) -> Real {
        match self {
            Value::Scalar(v) => Real::Num(v.materialize()),
            Value::Array(arr) => Real::List(arr.items.iter().map(Value::materialize).collect()),
        }
    }
}

// ============================================================================
// Materialized Values
// ============================================================================

/// Float mirror of a [`Value`] tree, produced by [`Value::materialize`].
///
/// Only a reporting surface: nothing in the engine consumes a `Real`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Real {
    /// A materialized scalar
    Num(f64),
    /// A materialized axis
    List(Vec<Real>),
}

impl Real {
    /// The number, for a rank-0 value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Real::Num(v) => Some(*v),
            Real::List(_) => None,
        }
    }

    /// A flat vector, for a rank-1 value.
    pub fn as_vec(&self) -> Option<Vec<f64>> {
        match self {
            Real::Num(_) => None,
            Real::List(items) => items.iter().map(Real::as_f64).collect(),
        }
    }

    /// Rows of numbers, for a rank-2 value.
    pub fn as_matrix(&self) -> Option<Vec<Vec<f64>>> {
        match self {
            Real::Num(_) => None,
            Real::List(items) => items.iter().map(Real::as_vec).collect(),
        }
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Real::Num(v) => write!(f, "{}", v),
            Real::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            },
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
