use super::*;
use crate::metric::ConfusionMatrix;

// Output of `fixture_cell(1, 1)` for input [1.0] from a zero state
const FIXTURE_OUTPUT: f64 = 0.17426971865610508;

#[test]
fn test_direction_classify() {
    assert_eq!(Direction::classify(10.5, 10.0, 0.2), Direction::Up);
    assert_eq!(Direction::classify(9.5, 10.0, 0.2), Direction::Down);
    assert_eq!(Direction::classify(10.1, 10.0, 0.2), Direction::Flat);
    assert_eq!(Direction::classify(10.0, 10.0, 0.0), Direction::Flat);
}

#[test]
fn test_clamp_prediction_band() {
    assert_relative_eq!(clamp_prediction(200.0, 100.0), 110.0, epsilon = 1e-12);
    assert_relative_eq!(clamp_prediction(10.0, 100.0), 90.0, epsilon = 1e-12);
    assert_eq!(clamp_prediction(105.0, 100.0), 105.0);
    // a negative reference value still yields an ordered band
    assert_relative_eq!(clamp_prediction(0.0, -100.0), -90.0, epsilon = 1e-12);
}

#[test]
fn test_predict_direction_up_within_band() {
    let cell = fixture_cell(1, 1);
    let mut state = cell.zero_state();

    let result = predict_direction(&cell, &mut state, array![1.0].view(), 0.17, 0.001).unwrap();
    assert_relative_eq!(result.raw_prediction, FIXTURE_OUTPUT, epsilon = 1e-12);
    assert_relative_eq!(result.prediction, FIXTURE_OUTPUT, epsilon = 1e-12);
    assert_eq!(result.direction, Direction::Up);
    assert_ne!(state, cell.zero_state());
}

#[test]
fn test_predict_direction_clamps_runaway_prediction() {
    let cell = fixture_cell(1, 1);
    let mut state = cell.zero_state();

    let result = predict_direction(&cell, &mut state, array![1.0].view(), 1.0, 0.05).unwrap();
    assert_relative_eq!(result.prediction, 0.9, epsilon = 1e-12);
    assert_eq!(result.direction, Direction::Down);
    assert_relative_eq!(result.change(), -0.1, epsilon = 1e-12);
}

#[test]
fn test_predict_direction_validates_reference() {
    let cell = fixture_cell(1, 1);
    let mut state = cell.zero_state();

    assert!(matches!(
        predict_direction(&cell, &mut state, array![1.0].view(), f64::NAN, 0.0),
        Err(ModelError::InvalidInput(_))
    ));
    assert!(matches!(
        predict_direction(&cell, &mut state, array![1.0].view(), 1.0, -0.1),
        Err(ModelError::InvalidInput(_))
    ));
}

#[test]
fn test_confusion_matrix_counts() {
    let cell = fixture_cell(1, 1);
    let samples = vec![
        // predicted Up, realized Up
        DirectionSample::new(array![1.0], 0.17, 0.2),
        // predicted Down (clamped to 0.9), realized Up
        DirectionSample::new(array![1.0], 1.0, 1.2),
        // predicted Down, realized Down
        DirectionSample::new(array![1.0], 1.0, 0.5),
    ];

    // every sample starts from a zero state so the fixture output stays known
    let (mut tp, mut fp, mut tn, mut fn_) = (0, 0, 0, 0);
    for sample in &samples {
        let mut state = cell.zero_state();
        let partial =
            confusion_matrix(&cell, &mut state, std::slice::from_ref(sample), 0.001).unwrap();
        let counts = partial.get_counts();
        tp += counts.0;
        fp += counts.1;
        tn += counts.2;
        fn_ += counts.3;
    }
    let matrix = ConfusionMatrix::from_counts(tp, fp, tn, fn_);

    assert_eq!(matrix.get_counts(), (1, 0, 1, 1));
    assert_relative_eq!(matrix.precision(), 1.0);
    assert_relative_eq!(matrix.recall(), 0.5);
}

#[test]
fn test_confusion_matrix_does_not_touch_parameters() {
    let cell = seeded_cell(1, 3, 1, 14);
    let before = cell.parameters().clone();
    let samples: Vec<DirectionSample> = (0..5)
        .map(|i| DirectionSample::new(array![i as f64 * 0.1], 1.0, 1.0 + i as f64 * 0.01))
        .collect();

    let mut state = cell.zero_state();
    let matrix = confusion_matrix(&cell, &mut state, &samples, 0.0).unwrap();
    assert_eq!(matrix.total(), 5);
    assert_eq!(cell.parameters(), &before);
}

#[test]
fn test_confusion_matrix_rejects_non_finite_next_value() {
    let cell = fixture_cell(1, 1);
    let mut state = cell.zero_state();
    let samples = vec![DirectionSample::new(array![1.0], 1.0, f64::INFINITY)];

    assert!(matches!(
        confusion_matrix(&cell, &mut state, &samples, 0.0),
        Err(ModelError::InvalidInput(_))
    ));
}

#[test]
fn test_forecast_feeds_predictions_back() {
    let cell = seeded_cell(1, 4, 1, 6);
    let mut state = cell.zero_state();

    let predictions = forecast(&cell, &mut state, array![1.0].view(), 5, 0.0).unwrap();
    assert_eq!(predictions.len(), 5);
    assert_relative_eq!(predictions[0].last_value, 1.0);
    for pair in predictions.windows(2) {
        assert_eq!(pair[1].last_value, pair[0].prediction);
    }
    for p in &predictions {
        let lo = p.last_value * 0.9;
        let hi = p.last_value * 1.1;
        assert!(p.prediction >= lo.min(hi) - 1e-12 && p.prediction <= lo.max(hi) + 1e-12);
    }
}

#[test]
fn test_forecast_requires_matching_sizes() {
    let cell = seeded_cell(2, 4, 1, 6);
    let mut state = cell.zero_state();
    assert!(matches!(
        forecast(&cell, &mut state, array![1.0, 2.0].view(), 3, 0.0),
        Err(ModelError::ShapeMismatch(_))
    ));
}
