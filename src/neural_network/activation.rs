use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Slope used by `Activation::LeakyReLU` for negative inputs
const LEAKY_RELU_SLOPE: f64 = 0.01;

/// Pre-activations are clipped to this magnitude before `exp` to prevent overflow
const EXP_CLIP: f64 = 500.0;

/// Activation function enum used by the gates, the memory cell and the output head
///
/// `Sigmoid` and `HardSigmoid` are bounded to \[0, 1\] and are the only choices accepted
/// for the input, forget and output gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    Sigmoid,
    HardSigmoid,
    Tanh,
    LeakyReLU,
    Identity,
}

impl Activation {
    /// Applies the activation to a single pre-activation value
    #[inline]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => {
                let clipped_x = x.clamp(-EXP_CLIP, EXP_CLIP);
                1.0 / (1.0 + (-clipped_x).exp())
            }
            Activation::HardSigmoid => (0.2 * x + 0.5).clamp(0.0, 1.0),
            Activation::Tanh => x.tanh(),
            Activation::LeakyReLU => {
                if x > 0.0 {
                    x
                } else {
                    LEAKY_RELU_SLOPE * x
                }
            }
            Activation::Identity => x,
        }
    }

    /// Derivative of the activation, expressed through its activated output `a`
    ///
    /// Every supported activation is monotonic, so the derivative can be recovered from
    /// the output alone and the backward pass only needs the cached activations.
    #[inline]
    pub fn derivative(self, a: f64) -> f64 {
        match self {
            Activation::Sigmoid => a * (1.0 - a),
            Activation::HardSigmoid => {
                if a > 0.0 && a < 1.0 {
                    0.2
                } else {
                    0.0
                }
            }
            Activation::Tanh => 1.0 - a * a,
            Activation::LeakyReLU => {
                if a > 0.0 {
                    1.0
                } else {
                    LEAKY_RELU_SLOPE
                }
            }
            Activation::Identity => 1.0,
        }
    }

    /// Returns `true` when every output of the activation lies in \[0, 1\]
    pub fn is_bounded(self) -> bool {
        matches!(self, Activation::Sigmoid | Activation::HardSigmoid)
    }

    /// Applies the activation elementwise to a pre-activation vector
    pub fn apply_activation(self, z: &Array1<f64>) -> Array1<f64> {
        z.mapv(|x| self.apply(x))
    }

    /// Computes elementwise derivatives from an activated vector
    pub fn activation_derivative(self, activation_output: &Array1<f64>) -> Array1<f64> {
        activation_output.mapv(|a| self.derivative(a))
    }
}
