use super::*;

#[test]
fn test_chronological_split_keeps_order() {
    let data = Array2::from_shape_fn((10, 2), |(i, j)| (i * 10 + j) as f64);
    let (train, test) = chronological_split(&data, 0.6).unwrap();

    assert_eq!(train.nrows(), 6);
    assert_eq!(test.nrows(), 4);
    assert_eq!(train.row(5), data.row(5));
    assert_eq!(test.row(0), data.row(6));
}

#[test]
fn test_chronological_split_floors_the_index() {
    let data = Array2::from_shape_fn((7, 1), |(i, _)| i as f64);
    let (train, test) = chronological_split(&data, 0.5).unwrap();
    assert_eq!(train.nrows(), 3);
    assert_eq!(test.nrows(), 4);
}

#[test]
fn test_chronological_split_validation() {
    let data = array![[1.0], [2.0]];
    assert!(matches!(
        chronological_split(&data, 1.0),
        Err(ModelError::InvalidInput(_))
    ));
    assert!(matches!(
        chronological_split(&data, 0.0),
        Err(ModelError::InvalidInput(_))
    ));
    assert!(matches!(
        chronological_split(&Array2::<f64>::zeros((0, 1)), 0.5),
        Err(ModelError::InvalidInput(_))
    ));
}

#[test]
fn test_chronological_split_rejects_empty_parts() {
    assert!(matches!(
        chronological_split(&array![[1.0, 2.0]], 0.5),
        Err(ModelError::InvalidInput(_))
    ));
    // floor(3 * 0.2) == 0
    assert!(matches!(
        chronological_split(&array![[1.0], [2.0], [3.0]], 0.2),
        Err(ModelError::InvalidInput(_))
    ));
    // floor(3 * 0.99) == 2, still leaves one test row
    let (train, test) = chronological_split(&array![[1.0], [2.0], [3.0]], 0.99).unwrap();
    assert_eq!((train.nrows(), test.nrows()), (2, 1));
}

#[test]
fn test_samples_from_rows_uses_last_column_as_target() {
    let data = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
    let samples = samples_from_rows(&data).unwrap();

    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].input, array![1.0, 2.0]);
    assert_eq!(samples[0].target, array![3.0]);
    assert_eq!(samples[1].target, array![6.0]);

    assert!(matches!(
        samples_from_rows(&array![[1.0], [2.0]]),
        Err(ModelError::InvalidInput(_))
    ));
}

#[test]
fn test_samples_from_series_pairs_consecutive_values() {
    let series = array![1.0, 2.0, 4.0];
    let samples = samples_from_series(series.view()).unwrap();

    assert_eq!(samples.len(), 2);
    assert_eq!(samples[1].input, array![2.0]);
    assert_eq!(samples[1].target, array![4.0]);
    assert_relative_eq!(samples[1].reference_value(0).unwrap(), 2.0);

    assert!(matches!(
        samples_from_series(array![1.0].view()),
        Err(ModelError::InvalidInput(_))
    ));
}
