// ============================================================================
// Shape
// Dimension lists for the value tree, with broadcast alignment
// ============================================================================

use crate::numeric::{NumericError, NumericResult};
use smallvec::SmallVec;
use std::fmt;

/// Dimension sizes of a value: empty = scalar, `[n]` = vector,
/// `[m, n]` = matrix, and so on.
///
/// Ranks up to 4 live inline; deeper nestings spill to the heap.
/// Shapes compare structurally and display as `[2, 3]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Shape(SmallVec<[usize; 4]>);

impl Shape {
    /// The scalar shape (rank 0).
    #[inline]
    pub fn scalar() -> Self {
        Shape(SmallVec::new())
    }

    /// A vector shape (rank 1).
    #[inline]
    pub fn vector(len: usize) -> Self {
        Shape(SmallVec::from_slice(&[len]))
    }

    /// A matrix shape (rank 2).
    #[inline]
    pub fn matrix(rows: usize, cols: usize) -> Self {
        Shape(SmallVec::from_slice(&[rows, cols]))
    }

    /// Build from an explicit dimension list.
    pub fn from_dims(dims: impl IntoIterator<Item = usize>) -> Self {
        Shape(dims.into_iter().collect())
    }

    /// Number of dimensions.
    #[inline]
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the rank-0 shape.
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.0.is_empty()
    }

    /// The dimension sizes.
    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    /// Length of axis 0; scalars report 0.
    #[inline]
    pub fn len_axis0(&self) -> usize {
        self.0.first().copied().unwrap_or(0)
    }

    /// The shape of each axis-0 element (everything after the first axis).
    pub fn inner(&self) -> Shape {
        Shape(self.0.get(1..).unwrap_or(&[]).iter().copied().collect())
    }

    /// A new shape with `len` prepended as the outermost axis.
    pub fn prepend(&self, len: usize) -> Shape {
        let mut dims = self.0.clone();
        dims.insert(0, len);
        Shape(dims)
    }

    /// Left-pad with singleton axes up to `rank` (broadcast alignment).
    pub fn left_pad_to(&self, rank: usize) -> Shape {
        if self.rank() >= rank {
            return self.clone();
        }
        let pad = rank - self.rank();
        Shape(
            std::iter::repeat(1)
                .take(pad)
                .chain(self.0.iter().copied())
                .collect(),
        )
    }

    /// Broadcast two shapes together.
    ///
    /// Shapes are right-aligned; on each axis the sizes must be equal or
    /// one of them 1, which stretches to the other side. A length-0 axis
    /// broadcast against a singleton stays length 0.
    ///
    /// # Errors
    /// Returns `ShapeMismatch` (carrying the original, unpadded shapes)
    /// when any axis pair is incompatible.
    pub fn broadcast_with(&self, other: &Shape) -> NumericResult<Shape> {
        let rank = self.rank().max(other.rank());
        let lhs = self.left_pad_to(rank);
        let rhs = other.left_pad_to(rank);
        let mut dims: SmallVec<[usize; 4]> = SmallVec::with_capacity(rank);
        for (&a, &b) in lhs.0.iter().zip(rhs.0.iter()) {
            if a == b {
                dims.push(a);
            } else if a == 1 {
                dims.push(b);
            } else if b == 1 {
                dims.push(a);
            } else {
                return Err(NumericError::shape_mismatch(self.dims(), other.dims()));
            }
        }
        Ok(Shape(dims))
    }

    /// Whether the two shapes broadcast together.
    pub fn compatible(&self, other: &Shape) -> bool {
        self.broadcast_with(other).is_ok()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}]",
            self.0
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(Shape::scalar().rank(), 0);
        assert!(Shape::scalar().is_scalar());
        assert_eq!(Shape::vector(10).dims(), &[10]);
        assert_eq!(Shape::matrix(3, 4).dims(), &[3, 4]);
        assert_eq!(Shape::from_dims([2, 3, 4]).rank(), 3);
    }

    #[test]
    fn test_axis_accessors() {
        assert_eq!(Shape::scalar().len_axis0(), 0);
        assert_eq!(Shape::matrix(3, 4).len_axis0(), 3);
        assert_eq!(Shape::matrix(3, 4).inner(), Shape::vector(4));
        assert_eq!(Shape::vector(3).inner(), Shape::scalar());
        assert_eq!(Shape::scalar().inner(), Shape::scalar());
        assert_eq!(Shape::vector(4).prepend(2), Shape::matrix(2, 4));
    }

    #[test]
    fn test_left_pad() {
        assert_eq!(Shape::vector(3).left_pad_to(3), Shape::from_dims([1, 1, 3]));
        assert_eq!(Shape::matrix(2, 3).left_pad_to(2), Shape::matrix(2, 3));
        assert_eq!(Shape::matrix(2, 3).left_pad_to(1), Shape::matrix(2, 3));
    }

    #[test]
    fn test_broadcast_equal_and_stretch() {
        let a = Shape::matrix(2, 3);
        assert_eq!(a.broadcast_with(&a).unwrap(), a);

        let row = Shape::vector(3);
        assert_eq!(a.broadcast_with(&row).unwrap(), a);
        assert_eq!(row.broadcast_with(&a).unwrap(), a);

        let col = Shape::matrix(2, 1);
        assert_eq!(a.broadcast_with(&col).unwrap(), a);

        let scalar = Shape::scalar();
        assert_eq!(scalar.broadcast_with(&a).unwrap(), a);
    }

    #[test]
    fn test_broadcast_mismatch() {
        let a = Shape::vector(3);
        let b = Shape::vector(4);
        assert_eq!(
            a.broadcast_with(&b),
            Err(NumericError::shape_mismatch(&[3], &[4]))
        );
        assert!(!a.compatible(&b));
        assert!(a.compatible(&Shape::vector(1)));
    }

    #[test]
    fn test_broadcast_zero_axis() {
        // An empty axis against a singleton stays empty.
        let empty = Shape::vector(0);
        let one = Shape::vector(1);
        assert_eq!(empty.broadcast_with(&one).unwrap(), empty);
        assert_eq!(one.broadcast_with(&empty).unwrap(), empty);
        assert_eq!(
            empty.broadcast_with(&Shape::vector(3)),
            Err(NumericError::shape_mismatch(&[0], &[3]))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Shape::scalar().to_string(), "[]");
        assert_eq!(Shape::vector(5).to_string(), "[5]");
        assert_eq!(Shape::matrix(2, 3).to_string(), "[2, 3]");
    }
}
