//! Leaky rectifier used by the perceptron.

/// Slope applied to non-positive inputs.
pub const LEAKY_SLOPE: f64 = 0.01;

#[inline]
pub fn leaky_relu(x: f64) -> f64 {
    if x > 0.0 {
        x
    } else {
        LEAKY_SLOPE * x
    }
}

/// Two-branch derivative used for the weight update: `1` for `x > 0`,
/// `LEAKY_SLOPE` otherwise (including exactly at 0).
#[inline]
pub fn leaky_relu_derivative(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else {
        LEAKY_SLOPE
    }
}
