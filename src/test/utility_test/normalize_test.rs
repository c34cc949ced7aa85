use super::*;

#[test]
fn test_fit_computes_column_bounds() {
    let data = array![[1.0, 10.0], [3.0, 5.0], [2.0, 7.0]];
    let bounds = NormalizationBounds::fit(&data).unwrap();

    assert_eq!(bounds.min(), &[1.0, 5.0]);
    assert_eq!(bounds.max(), &[3.0, 10.0]);
    assert_eq!(bounds.n_features(), 2);
}

#[test]
fn test_normalize_and_denormalize() {
    let data = array![[1.0, 10.0], [3.0, 5.0], [2.0, 7.0]];
    let bounds = NormalizationBounds::fit(&data).unwrap();

    let scaled = bounds.normalize(&data).unwrap();
    assert_relative_eq!(scaled[[0, 0]], 0.0);
    assert_relative_eq!(scaled[[1, 0]], 1.0);
    assert_relative_eq!(scaled[[2, 1]], 0.4);

    let restored = bounds.denormalize(&scaled).unwrap();
    for (a, b) in restored.iter().zip(data.iter()) {
        assert_relative_eq!(*a, *b, epsilon = 1e-12);
    }
}

#[test]
fn test_constant_column_maps_to_midpoint() {
    let data = array![[4.0, 1.0], [4.0, 2.0]];
    let bounds = NormalizationBounds::fit(&data).unwrap();
    let scaled = bounds.normalize(&data).unwrap();

    assert_eq!(scaled.column(0).to_vec(), vec![0.5, 0.5]);
    assert_eq!(bounds.normalize_value(0, 100.0).unwrap(), 0.5);
}

#[test]
fn test_out_of_range_values_are_clamped() {
    let bounds = NormalizationBounds::new(vec![0.0], vec![10.0]).unwrap();
    assert_eq!(bounds.normalize_value(0, 20.0).unwrap(), 1.0);
    assert_eq!(bounds.normalize_value(0, -5.0).unwrap(), 0.0);
    assert_relative_eq!(bounds.denormalize_value(0, 0.25).unwrap(), 2.5);
}

#[test]
fn test_invalid_bounds_and_inputs() {
    assert!(matches!(
        NormalizationBounds::new(vec![0.0, 1.0], vec![1.0]),
        Err(ModelError::ShapeMismatch(_))
    ));
    assert!(matches!(
        NormalizationBounds::new(vec![2.0], vec![1.0]),
        Err(ModelError::InvalidInput(_))
    ));
    assert!(matches!(
        NormalizationBounds::fit(&Array2::<f64>::zeros((0, 2))),
        Err(ModelError::InvalidInput(_))
    ));
    assert!(matches!(
        NormalizationBounds::fit(&array![[1.0], [f64::NAN]]),
        Err(ModelError::InvalidInput(_))
    ));

    let bounds = NormalizationBounds::new(vec![0.0], vec![1.0]).unwrap();
    assert!(matches!(
        bounds.normalize(&array![[1.0, 2.0]]),
        Err(ModelError::ShapeMismatch(_))
    ));
    assert!(matches!(
        bounds.normalize_value(3, 1.0),
        Err(ModelError::ShapeMismatch(_))
    ));
}
