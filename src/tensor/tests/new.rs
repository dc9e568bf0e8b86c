use crate::assert_panic;
use crate::tensor::Tensor;

#[test]
fn test_new_row_major_layout() {
    let data: Vec<f32> = (0..12).map(|x| x as f32).collect();
    let tensor = Tensor::new(&data, (2, 2, 3));
    assert_eq!(tensor.shape(), &[2, 2, 3]);
    assert_eq!(tensor.channels(), 2);
    assert_eq!(tensor.height(), 2);
    assert_eq!(tensor.width(), 3);
    assert_eq!(tensor[[0, 0, 0]], 0.);
    assert_eq!(tensor[[0, 1, 2]], 5.);
    assert_eq!(tensor[[1, 0, 0]], 6.);
    assert_eq!(tensor[[1, 1, 2]], 11.);
}

#[test]
fn test_new_with_wrong_length() {
    assert_panic!(Tensor::new(&[1., 2., 3.], (1, 2, 2)));
}

#[test]
fn test_filled_and_min_max() {
    let tensor = Tensor::filled(0.5, (3, 4, 4));
    assert_eq!(tensor.size(), 48);
    assert!(tensor.is_filled_with(0.5, 0.));
    assert_eq!(tensor.min_max(), Some((0.5, 0.5)));

    let tensor = Tensor::new(&[3., -1., 2., 7.], (1, 2, 2));
    assert_eq!(tensor.min_max(), Some((-1., 7.)));
    assert_eq!(Tensor::zeros((0, 2, 2)).min_max(), None);
}

#[test]
fn test_map() {
    let tensor = Tensor::new(&[-1., 2., -3., 4.], (1, 2, 2));
    let relu = tensor.map(|x| x.max(0.));
    assert_eq!(relu, Tensor::new(&[0., 2., 0., 4.], (1, 2, 2)));
}
