use crate::assert_err;
use crate::errors::NetError;
use crate::vision::Vision;
use approx::assert_abs_diff_eq;
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

/// 宽2、高3的测试图：像素(x, y) = [10x, 20y, 255]
fn gradient_image() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(2, 3, |x, y| {
        Rgb([(10 * x) as u8, (20 * y) as u8, 255])
    }))
}

#[test]
fn test_image_to_tensor_layout() {
    let tensor = Vision::image_to_tensor(&gradient_image());
    assert_eq!(tensor.shape(), &[3, 3, 2]);
    for y in 0..3 {
        for x in 0..2 {
            assert_abs_diff_eq!(tensor[[0, y, x]], (10 * x) as f32 / 255., epsilon = 1e-7);
            assert_abs_diff_eq!(tensor[[1, y, x]], (20 * y) as f32 / 255., epsilon = 1e-7);
            assert_abs_diff_eq!(tensor[[2, y, x]], 1., epsilon = 1e-7);
        }
    }
}

#[test]
fn test_image_to_tensor_drops_alpha() {
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([51, 102, 153, 0])));
    let tensor = Vision::image_to_tensor(&image);
    assert_eq!(tensor.shape(), &[3, 4, 4]);
    assert_abs_diff_eq!(tensor[[0, 1, 1]], 0.2, epsilon = 1e-6);
    assert_abs_diff_eq!(tensor[[1, 2, 3]], 0.4, epsilon = 1e-6);
    assert_abs_diff_eq!(tensor[[2, 0, 0]], 0.6, epsilon = 1e-6);
}

#[test]
fn test_load_image() -> Result<(), NetError> {
    let path = std::env::temp_dir().join(format!("caffe_feat_vision_{}.png", std::process::id()));
    gradient_image().save(&path)?;
    let loaded = Vision::load_image(&path);
    std::fs::remove_file(&path)?;
    assert_eq!(loaded?, Vision::image_to_tensor(&gradient_image()));
    Ok(())
}

#[test]
fn test_load_image_missing_file() {
    let result = Vision::load_image("./no/such/image.png");
    assert_err!(result, NetError::FileNotFound(path) if path.ends_with("image.png"));
}
