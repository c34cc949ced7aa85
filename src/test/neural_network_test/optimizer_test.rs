use super::*;

fn filled_gradients(value: f64) -> LSTMGradients {
    let mut gradients = LSTMGradients::zeros(1, 2, 1);
    gradients.values_mut().for_each(|g| *g = value);
    gradients
}

#[test]
fn test_sgd_rejects_invalid_hyperparameters() {
    assert!(matches!(SGD::new(0.0, 5.0), Err(ModelError::InvalidInput(_))));
    assert!(matches!(SGD::new(f64::NAN, 5.0), Err(ModelError::InvalidInput(_))));
    assert!(matches!(SGD::new(0.01, -1.0), Err(ModelError::InvalidInput(_))));
    assert!(matches!(SGD::new(0.01, f64::INFINITY), Err(ModelError::InvalidInput(_))));
}

#[test]
fn test_clip_bounds_every_component() {
    let mut gradients = LSTMGradients::zeros(2, 3, 2);
    for (k, g) in gradients.values_mut().enumerate() {
        *g = if k % 2 == 0 { 100.0 } else { -100.0 };
    }
    SGD::clip(&mut gradients, 5.0).unwrap();

    assert!(gradients.values().all(|g| g.abs() <= 5.0));
    assert_relative_eq!(gradients.max_abs(), 5.0);
}

#[test]
fn test_clip_bounds_every_component_of_a_large_cell() {
    // 4 * (128 + 128 * 128 + 128) + 128 + 1 components, enough for the parallel path
    let mut gradients = LSTMGradients::zeros(1, 128, 1);
    assert!(gradients.len() >= 65536);
    for (k, g) in gradients.values_mut().enumerate() {
        *g = match k % 3 {
            0 => 1e6,
            1 => -1e6,
            _ => 0.25,
        };
    }

    SGD::clip(&mut gradients, 5.0).unwrap();

    for (k, g) in gradients.values().enumerate() {
        let expected = match k % 3 {
            0 => 5.0,
            1 => -5.0,
            _ => 0.25,
        };
        assert_eq!(*g, expected);
    }
}

#[test]
fn test_clip_keeps_components_inside_the_range() {
    let mut gradients = filled_gradients(0.3);
    gradients.output_bias[0] = -4.9;
    let before = gradients.clone();

    SGD::clip(&mut gradients, 5.0).unwrap();
    assert_eq!(gradients, before);
}

#[test]
fn test_clip_rejects_invalid_threshold() {
    let mut gradients = filled_gradients(1.0);
    assert!(matches!(
        SGD::clip(&mut gradients, 0.0),
        Err(ModelError::InvalidInput(_))
    ));
}

#[test]
fn test_apply_subtracts_scaled_gradient() {
    let mut cell = seeded_cell(1, 2, 1, 31);
    let before: Vec<f64> = cell.parameters().values().copied().collect();
    let gradients = filled_gradients(2.0);

    let sgd = SGD::new(0.1, 5.0).unwrap();
    sgd.apply(cell.parameters_mut(), &gradients).unwrap();

    for (old, new) in before.iter().zip(cell.parameters().values()) {
        assert_relative_eq!(*new, old - 0.2, epsilon = 1e-12);
    }
}

#[test]
fn test_update_clips_before_applying() {
    let mut cell = seeded_cell(1, 2, 1, 32);
    let before: Vec<f64> = cell.parameters().values().copied().collect();
    let mut gradients = filled_gradients(50.0);

    let sgd = SGD::new(0.1, 1.0).unwrap();
    sgd.update(cell.parameters_mut(), &mut gradients).unwrap();

    for (old, new) in before.iter().zip(cell.parameters().values()) {
        assert_relative_eq!(*new, old - 0.1, epsilon = 1e-12);
    }
}

#[test]
fn test_apply_rejects_mismatched_gradients() {
    let mut cell = seeded_cell(1, 2, 1, 33);
    let before = cell.parameters().clone();
    let gradients = LSTMGradients::zeros(1, 3, 1);

    let sgd = SGD::new(0.1, 5.0).unwrap();
    assert!(matches!(
        sgd.apply(cell.parameters_mut(), &gradients),
        Err(ModelError::ShapeMismatch(_))
    ));
    assert_eq!(cell.parameters(), &before);
}

#[test]
fn test_gradient_accumulate_and_scale() {
    let mut total = filled_gradients(1.0);
    total.accumulate(&filled_gradients(3.0)).unwrap();
    total.scale(0.5);
    assert!(total.values().all(|&g| g == 2.0));

    assert!(matches!(
        total.accumulate(&LSTMGradients::zeros(2, 2, 1)),
        Err(ModelError::ShapeMismatch(_))
    ));
}
