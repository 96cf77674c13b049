// ============================================================================
// Gradient Trainer
// Single-layer logistic training loop over fixed-point values
// ============================================================================

use crate::array::Value;
use crate::linalg::{dot, transpose};
use crate::numeric::{FixedPoint, NumericError, NumericResult};

/// Logistic function `1 / (1 + exp(-v))`, elementwise.
///
/// The constant 1 is broadcast at the operand's own precision.
///
/// # Errors
/// Anything the underlying `exp`/`div` report; an array with no leaves
/// has no precision to work at and fails with `InvalidInput`.
pub fn sigmoid(value: &Value) -> NumericResult<Value> {
    let fbits = value.fbits().ok_or(NumericError::InvalidInput)?;
    let one = Value::scalar(FixedPoint::one(fbits)?);
    one.div(&one.add(&value.neg()?.exp()?)?)
}

/// Derivative of the logistic function in terms of its output,
/// `y * (1 - y)`, elementwise.
pub fn sigmoid_derivative(output: &Value) -> NumericResult<Value> {
    let fbits = output.fbits().ok_or(NumericError::InvalidInput)?;
    let one = Value::scalar(FixedPoint::one(fbits)?);
    output.mul(&one.sub(output)?)
}

/// Single-layer gradient-descent trainer.
///
/// Holds an `(n, features)` sample matrix and an `(n, 1)` column of
/// observed outcomes. [`Trainer::train`] runs the configured number of
/// gradient steps from an all-ones weight column and returns the
/// `(features, 1)` weights; [`Trainer::predict`] trains and then applies
/// the weights to a new sample.
///
/// All validation happens in [`Trainer::new`]: a constructed trainer
/// cannot fail on shapes or precision mid-loop, only on arithmetic
/// overflow.
#[derive(Debug, Clone)]
pub struct Trainer {
    samples: Value,
    observations: Value,
    iterations: usize,
}

impl Trainer {
    /// Validate the training set and build a trainer.
    ///
    /// # Errors
    /// Returns `UnsupportedRank` when either input is not a matrix,
    /// `InvalidInput` for a degenerate (zero-row or zero-feature) sample
    /// matrix, `ShapeMismatch` when the observation column does not line
    /// up with the samples, `InvalidPrecision` when the two disagree on
    /// fractional bits.
    pub fn new(samples: Value, observations: Value, iterations: usize) -> NumericResult<Self> {
        let sshape = samples.shape();
        if sshape.rank() != 2 {
            return Err(NumericError::UnsupportedRank(sshape.rank()));
        }
        let rows = sshape.dims()[0];
        let features = sshape.dims()[1];
        if rows == 0 || features == 0 {
            return Err(NumericError::InvalidInput);
        }
        let oshape = observations.shape();
        if oshape.rank() != 2 {
            return Err(NumericError::UnsupportedRank(oshape.rank()));
        }
        if oshape.dims()[0] != rows || oshape.dims()[1] != 1 {
            return Err(NumericError::shape_mismatch(sshape.dims(), oshape.dims()));
        }
        if let (Some(expected), Some(got)) = (samples.fbits(), observations.fbits()) {
            if expected != got {
                return Err(NumericError::InvalidPrecision { expected, got });
            }
        }
        tracing::debug!(
            "trainer ready: {} samples x {} features, {} iterations",
            rows,
            features,
            iterations
        );
        Ok(Self { samples, observations, iterations })
    }

    /// Run the training loop from an all-ones weight column.
    pub fn train(&self) -> NumericResult<Value> {
        let features = self.samples.shape().dims()[1];
        let fbits = self.samples.fbits().ok_or(NumericError::InvalidInput)?;
        let one = FixedPoint::one(fbits)?;
        self.train_from(Value::column(vec![one; features])?)
    }

    /// Run the training loop from explicit initial weights.
    ///
    /// Each step computes the sigmoid outputs for every sample, weighs
    /// the prediction error by the sigmoid slope at that output, and
    /// folds the per-sample contributions back through the transposed
    /// samples into a weight adjustment. Zero iterations return the
    /// initial weights untouched.
    ///
    /// # Errors
    /// Returns `ShapeMismatch`/`InvalidPrecision` if the weights do not
    /// line up with the samples, `Overflow` if the loop arithmetic
    /// leaves the raw range.
    pub fn train_from(&self, weights: Value) -> NumericResult<Value> {
        let features = self.samples.shape().dims()[1];
        let wshape = weights.shape();
        if wshape.rank() != 2 || wshape.dims()[0] != features || wshape.dims()[1] != 1 {
            return Err(NumericError::shape_mismatch(
                self.samples.shape().dims(),
                wshape.dims(),
            ));
        }
        if let (Some(expected), Some(got)) = (self.samples.fbits(), weights.fbits()) {
            if expected != got {
                return Err(NumericError::InvalidPrecision { expected, got });
            }
        }
        let mut weights = weights;
        for step in 0..self.iterations {
            let output = sigmoid(&dot(&self.samples, &weights)?)?;
            let error = self.observations.sub(&output)?;
            let contribution = error.mul(&sigmoid_derivative(&output)?)?;
            let adjustment = dot(&transpose(&self.samples)?, &contribution)?;
            weights = weights.add(&adjustment)?;
            tracing::trace!("gradient step {} applied", step);
        }
        tracing::debug!("training complete after {} iterations", self.iterations);
        Ok(weights)
    }

    /// Train, then apply the weights to a new sample.
    ///
    /// A rank-1 sample of `features` values yields a length-1 vector; a
    /// `(k, features)` batch yields a `(k, 1)` column.
    pub fn predict(&self, sample: &Value) -> NumericResult<Value> {
        let weights = self.train()?;
        dot(sample, &weights)
    }
}

/// Train in one call; see [`Trainer::train`].
pub fn train(samples: &Value, observations: &Value, iterations: usize) -> NumericResult<Value> {
    Trainer::new(samples.clone(), observations.clone(), iterations)?.train()
}

/// Train and predict in one call; see [`Trainer::predict`].
pub fn predict(
    samples: &Value,
    observations: &Value,
    iterations: usize,
    sample: &Value,
) -> NumericResult<Value> {
    Trainer::new(samples.clone(), observations.clone(), iterations)?.predict(sample)
}

// ============================================================================
// Tests
// ============================================================================
