use super::*;

const SIGMOID_HALF: f64 = 0.6224593312018546;
const TANH_HALF: f64 = 0.46211715726000974;

#[test]
fn test_fixture_forward_trace() {
    let mut cell = fixture_cell(1, 1);
    let mut state = cell.zero_state();

    let output = cell.forward(array![1.0].view(), &mut state).unwrap();

    let cache = cell.cache().unwrap();
    assert_relative_eq!(cache.input_gate[0], SIGMOID_HALF, epsilon = 1e-12);
    assert_relative_eq!(cache.forget_gate[0], SIGMOID_HALF, epsilon = 1e-12);
    assert_relative_eq!(cache.output_gate[0], SIGMOID_HALF, epsilon = 1e-12);
    assert_relative_eq!(cache.cell_gate[0], TANH_HALF, epsilon = 1e-12);

    // c = i * g, h = o * tanh(c)
    assert_relative_eq!(state.cell()[0], 0.28764913664496794, epsilon = 1e-12);
    assert_relative_eq!(state.hidden()[0], 0.17426971865610508, epsilon = 1e-12);
    assert_relative_eq!(output[0], 0.17426971865610508, epsilon = 1e-12);
}

#[test]
fn test_fixture_output_weights_two_hidden_units() {
    let mut cell = fixture_cell_with_head(1, 2, array![[0.3, -0.7]]);
    let mut state = cell.zero_state();

    let output = cell.forward(array![1.0].view(), &mut state).unwrap();

    let h = 0.17426971865610508;
    assert_relative_eq!(state.hidden()[0], h, epsilon = 1e-12);
    assert_relative_eq!(state.hidden()[1], h, epsilon = 1e-12);
    assert_relative_eq!(output[0], 0.3 * h - 0.7 * h, epsilon = 1e-12);

    // unit weights sum the hidden units
    let mut summing = fixture_cell(1, 2);
    let mut summing_state = summing.zero_state();
    let output = summing.forward(array![1.0].view(), &mut summing_state).unwrap();
    assert_relative_eq!(output[0], 2.0 * h, epsilon = 1e-12);
}

#[test]
fn test_fixture_second_step_carries_memory() {
    let mut cell = fixture_cell(1, 1);
    let mut state = cell.zero_state();

    cell.forward(array![1.0].view(), &mut state).unwrap();
    let output = cell.forward(array![1.0].view(), &mut state).unwrap();

    // c2 = f * c1 + i * g
    assert_relative_eq!(state.cell()[0], 0.4666990258617856, epsilon = 1e-12);
    assert_relative_eq!(output[0], 0.2710986763902479, epsilon = 1e-12);
}

#[test]
fn test_output_and_state_shapes() {
    let mut cell = seeded_cell(3, 5, 2, 11);
    let output = cell.step(array![0.1, -0.2, 0.3].view()).unwrap();

    assert_eq!(output.len(), 2);
    assert_eq!(cell.state().hidden().len(), 5);
    assert_eq!(cell.state().cell().len(), 5);
    assert!(cell.state().is_finite());
    assert_eq!(cell.parameters().output_weight().dim(), (2, 5));
    assert_eq!(cell.parameters().input_gate().kernel().dim(), (5, 3));
    assert_eq!(cell.parameters().input_gate().recurrent_kernel().dim(), (5, 5));
}

#[test]
fn test_initialization_is_deterministic_for_a_seed() {
    let a = seeded_cell(2, 4, 1, 42);
    let b = seeded_cell(2, 4, 1, 42);
    let c = seeded_cell(2, 4, 1, 43);

    assert_eq!(a.parameters(), b.parameters());
    assert_ne!(a.parameters(), c.parameters());
}

#[test]
fn test_forward_is_deterministic() {
    let mut a = seeded_cell(2, 4, 1, 5);
    let mut b = seeded_cell(2, 4, 1, 5);
    let inputs = [array![0.1, 0.2], array![0.3, -0.1], array![0.0, 0.5]];

    for x in &inputs {
        let ya = a.step(x.view()).unwrap();
        let yb = b.step(x.view()).unwrap();
        assert_eq!(ya, yb);
    }
    assert_eq!(a.state(), b.state());
}

#[test]
fn test_biases_start_at_constant() {
    let cell = seeded_cell(2, 3, 2, 9);
    let parameters = cell.parameters();
    for gate in [
        parameters.input_gate(),
        parameters.forget_gate(),
        parameters.cell_gate(),
        parameters.output_gate(),
    ] {
        assert!(gate.bias().iter().all(|&b| b == BIAS_INIT_VALUE));
    }
    assert!(parameters.output_bias().iter().all(|&b| b == BIAS_INIT_VALUE));
}

#[test]
fn test_zero_sizes_are_rejected() {
    assert!(matches!(LSTMCell::new(0, 4, 1), Err(ModelError::InvalidInput(_))));
    assert!(matches!(LSTMCell::new(1, 0, 1), Err(ModelError::InvalidInput(_))));
    assert!(matches!(LSTMCell::new(1, 4, 0), Err(ModelError::InvalidInput(_))));
}

#[test]
fn test_unbounded_gate_activation_is_rejected() {
    let config = CellConfig {
        gate_activation: Activation::Tanh,
        ..CellConfig::default()
    };
    assert!(matches!(
        LSTMCell::with_config(1, 2, 1, config),
        Err(ModelError::InvalidInput(_))
    ));
}

#[test]
fn test_wrong_input_length_is_shape_mismatch() {
    let mut cell = seeded_cell(2, 3, 1, 1);
    let mut state = cell.zero_state();

    let result = cell.forward(array![1.0].view(), &mut state);
    assert!(matches!(result, Err(ModelError::ShapeMismatch(_))));
    assert_eq!(state, cell.zero_state());
}

#[test]
fn test_wrong_state_length_is_shape_mismatch() {
    let mut cell = seeded_cell(1, 3, 1, 1);
    let mut state = RecurrentState::zeros(2);

    let result = cell.forward(array![1.0].view(), &mut state);
    assert!(matches!(result, Err(ModelError::ShapeMismatch(_))));
    assert!(matches!(
        cell.set_state(RecurrentState::zeros(4)),
        Err(ModelError::ShapeMismatch(_))
    ));
}

#[test]
fn test_nan_input_leaves_state_untouched() {
    let mut cell = seeded_cell(1, 4, 1, 3);
    cell.step(array![0.4].view()).unwrap();
    let before = cell.state().clone();

    let result = cell.step(array![f64::NAN].view());
    assert!(matches!(result, Err(ModelError::InvalidInput(_))));

    let after = cell.state();
    for (a, b) in before.hidden().iter().zip(after.hidden().iter()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
    for (a, b) in before.cell().iter().zip(after.cell().iter()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
    assert!(cell.cache().is_none());
}

#[test]
fn test_infinite_input_is_invalid() {
    let mut cell = seeded_cell(2, 2, 1, 3);
    let result = cell.step(array![0.0, f64::INFINITY].view());
    assert!(matches!(result, Err(ModelError::InvalidInput(_))));
}

#[test]
fn test_overflowing_output_is_numeric_divergence() {
    let mut cell = fixture_cell(1, 8);
    cell.parameters_mut().output_weight.fill(f64::MAX);

    let result = cell.step(array![1.0].view());
    assert!(matches!(result, Err(ModelError::NumericDivergence(_))));
    assert_eq!(cell.state(), &cell.zero_state());
}

#[test]
fn test_backward_without_forward_is_rejected() {
    let mut cell = seeded_cell(1, 2, 1, 8);
    assert!(matches!(
        cell.compute_gradients(array![0.5].view()),
        Err(ModelError::ProcessingError(_))
    ));

    cell.step(array![0.5].view()).unwrap();
    cell.compute_gradients(array![0.5].view()).unwrap();
    assert!(matches!(
        cell.compute_gradients(array![0.5].view()),
        Err(ModelError::ProcessingError(_))
    ));
}

#[test]
fn test_wrong_target_length_keeps_cache() {
    let mut cell = seeded_cell(1, 2, 1, 8);
    cell.step(array![0.5].view()).unwrap();

    assert!(matches!(
        cell.compute_gradients(array![0.5, 0.1].view()),
        Err(ModelError::ShapeMismatch(_))
    ));
    assert!(cell.compute_gradients(array![0.5].view()).is_ok());
}

#[test]
fn test_predict_matches_forward_without_cache() {
    let mut cell = seeded_cell(2, 3, 1, 21);
    let x = array![0.2, -0.4];

    let mut predict_state = cell.zero_state();
    let predicted = cell.predict(x.view(), &mut predict_state).unwrap();
    assert!(cell.cache().is_none());

    let mut forward_state = cell.zero_state();
    let forwarded = cell.forward(x.view(), &mut forward_state).unwrap();
    assert_eq!(predicted, forwarded);
    assert_eq!(predict_state, forward_state);
}

#[test]
fn test_reset_state_zeroes_running_state() {
    let mut cell = seeded_cell(1, 3, 1, 2);
    cell.step(array![0.9].view()).unwrap();
    assert!(cell.state().hidden().iter().any(|&h| h != 0.0));

    cell.reset_state();
    assert_eq!(cell.state(), &RecurrentState::zeros(3));
}

#[test]
fn test_backward_reduces_loss_on_a_fixed_pattern() {
    let mut cell = seeded_cell(1, 4, 1, 17);
    let x = array![0.5];
    let t = array![0.8];

    cell.reset_state();
    let first = cell.backward(x.view(), t.view(), 0.05).unwrap();
    let mut last = first;
    for _ in 0..200 {
        cell.reset_state();
        last = cell.backward(x.view(), t.view(), 0.05).unwrap();
    }
    assert!(last < first);
    assert!(last < 1e-3);
}

#[test]
fn test_backward_rejects_bad_learning_rate_before_stepping() {
    let mut cell = seeded_cell(1, 2, 1, 4);
    let before = cell.parameters().clone();

    let result = cell.backward(array![0.1].view(), array![0.2].view(), -0.1);
    assert!(matches!(result, Err(ModelError::InvalidInput(_))));
    assert_eq!(cell.parameters(), &before);
    assert_eq!(cell.state(), &cell.zero_state());
}

#[test]
fn test_large_cell_matches_reference_computation() {
    // 64 * (8 + 64) is above the parallel gate threshold
    let mut cell = seeded_cell(8, 64, 2, 99);
    let x = Array1::from_shape_fn(8, |i| (i as f64 - 3.5) * 0.1);
    let mut state = cell.zero_state();
    cell.forward(x.view(), &mut state).unwrap();
    let output = cell.forward(x.view(), &mut state).unwrap();

    let p = cell.parameters();
    let gate = |g: &Gate, h: &Array1<f64>| {
        Array1::from_shape_fn(64, |u| {
            let mut z = g.bias()[u];
            for i in 0..8 {
                z += g.kernel()[[u, i]] * x[i];
            }
            for j in 0..64 {
                z += g.recurrent_kernel()[[u, j]] * h[j];
            }
            z
        })
    };
    let sigmoid = |v: Array1<f64>| v.mapv(|z| 1.0 / (1.0 + (-z).exp()));

    let mut h = Array1::<f64>::zeros(64);
    let mut c = Array1::<f64>::zeros(64);
    for _ in 0..2 {
        let i = sigmoid(gate(p.input_gate(), &h));
        let f = sigmoid(gate(p.forget_gate(), &h));
        let g = gate(p.cell_gate(), &h).mapv(f64::tanh);
        let o = sigmoid(gate(p.output_gate(), &h));
        c = &f * &c + &i * &g;
        h = &o * &c.mapv(f64::tanh);
    }
    let expected = p.output_weight().dot(&h) + p.output_bias();

    for k in 0..2 {
        assert_relative_eq!(output[k], expected[k], epsilon = 1e-10);
    }
}
