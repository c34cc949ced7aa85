use super::*;

#[test]
fn test_squared_error_is_summed() {
    let loss_fn = SquaredError::new();
    let y_true = array![1.0, 2.0, 3.0];
    let y_pred = array![1.5, 2.0, 1.0];

    let loss = loss_fn.compute_loss(y_true.view(), y_pred.view());
    assert_relative_eq!(loss, 0.25 + 0.0 + 4.0);
}

#[test]
fn test_squared_error_gradient() {
    let loss_fn = SquaredError::new();
    let y_true = array![1.0, -1.0];
    let y_pred = array![0.5, 0.0];

    let grad = loss_fn.compute_grad(y_true.view(), y_pred.view());
    // -2 (t - y)
    assert_relative_eq!(grad[0], -1.0);
    assert_relative_eq!(grad[1], 2.0);
}
