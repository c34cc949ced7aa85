use super::*;

#[test]
fn test_sigmoid_values_and_derivative() {
    assert_relative_eq!(Activation::Sigmoid.apply(0.0), 0.5);
    assert_relative_eq!(Activation::Sigmoid.apply(0.5), 0.6224593312018546, epsilon = 1e-12);

    let a = Activation::Sigmoid.apply(0.3);
    assert_relative_eq!(Activation::Sigmoid.derivative(a), a * (1.0 - a));
}

#[test]
fn test_sigmoid_saturates_without_nan() {
    let high = Activation::Sigmoid.apply(1e6);
    let low = Activation::Sigmoid.apply(-1e6);
    assert!(high.is_finite() && low.is_finite());
    assert_relative_eq!(high, 1.0);
    assert!(low >= 0.0 && low < 1e-200);
}

#[test]
fn test_hard_sigmoid() {
    assert_relative_eq!(Activation::HardSigmoid.apply(0.0), 0.5);
    assert_eq!(Activation::HardSigmoid.apply(10.0), 1.0);
    assert_eq!(Activation::HardSigmoid.apply(-10.0), 0.0);
    assert_relative_eq!(Activation::HardSigmoid.derivative(0.5), 0.2);
    assert_eq!(Activation::HardSigmoid.derivative(1.0), 0.0);
}

#[test]
fn test_tanh_and_leaky_relu() {
    let a = Activation::Tanh.apply(0.5);
    assert_relative_eq!(a, 0.46211715726000974, epsilon = 1e-12);
    assert_relative_eq!(Activation::Tanh.derivative(a), 1.0 - a * a);

    assert_eq!(Activation::LeakyReLU.apply(2.0), 2.0);
    assert_relative_eq!(Activation::LeakyReLU.apply(-2.0), -0.02);
    assert_eq!(Activation::LeakyReLU.derivative(2.0), 1.0);
    assert_relative_eq!(Activation::LeakyReLU.derivative(-0.02), 0.01);
}

#[test]
fn test_only_sigmoid_family_is_bounded() {
    assert!(Activation::Sigmoid.is_bounded());
    assert!(Activation::HardSigmoid.is_bounded());
    assert!(!Activation::Tanh.is_bounded());
    assert!(!Activation::LeakyReLU.is_bounded());
    assert!(!Activation::Identity.is_bounded());
}

#[test]
fn test_vector_helpers() {
    let z = array![-1.0, 0.0, 1.0];
    let a = Activation::Tanh.apply_activation(&z);
    let d = Activation::Tanh.activation_derivative(&a);
    for i in 0..3 {
        assert_relative_eq!(a[i], z[i].tanh());
        assert_relative_eq!(d[i], 1.0 - z[i].tanh().powi(2));
    }
}
