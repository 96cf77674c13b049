// ============================================================================
// Training Module
// Logistic regression by gradient descent, entirely in fixed point
// ============================================================================

mod gradient;

pub use gradient::{predict, sigmoid, sigmoid_derivative, train, Trainer};
