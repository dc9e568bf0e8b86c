/*
 * @Author       : 老董
 * @Date         : 2023-08-30 19:16:48
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-13
 * @Description  : 本模块负责图像与特征张量之间的转换。
 *                 在本模块中，不严谨地说：
 *                 1. 所谓的image/图像是指RGB格式的图像（带alpha的会先丢弃alpha）；
 *                 2. “灰度”（图）等同于英文中luma、luminance、grey、gray的概念。
 */

use crate::errors::NetError;
use crate::tensor::Tensor;
use image::{DynamicImage, GrayImage, Luma};
use std::path::Path;

#[cfg(test)]
mod tests;

pub struct Vision {
    // ...
}
impl Vision {
    /// 把图像转成[3, H, W]、取值[0, 1]的张量（通道顺序为RGB）
    pub fn image_to_tensor(image: &DynamicImage) -> Tensor {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        let (h, w) = (height as usize, width as usize);
        let mut data = vec![0.; 3 * h * w];
        for (x, y, pixel) in rgb.enumerate_pixels() {
            let (i, j) = (y as usize, x as usize);
            for c in 0..3 {
                data[(c * h + i) * w + j] = f32::from(pixel[c]) / 255.;
            }
        }
        Tensor::new(&data, (3, h, w))
    }

    /// 将本地的图像加载为张量，见[`Vision::image_to_tensor`]
    pub fn load_image<P: AsRef<Path>>(path: P) -> Result<Tensor, NetError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(NetError::FileNotFound(path.to_path_buf()));
        }
        let image = image::open(path)?;
        Ok(Self::image_to_tensor(&image))
    }

    /// 把特征图的第`channel`个通道线性拉伸为灰度图，便于肉眼查看。
    /// 取值区间至少为[-eps, eps]，以免近乎常数的通道被噪声放大；
    /// `positive`为真时下界固定为0（适用于ReLU之后的特征）。
    pub fn channel_to_gray(
        feature: &Tensor,
        channel: usize,
        eps: f32,
        positive: bool,
    ) -> Result<GrayImage, NetError> {
        let plane = feature.slice_channels(channel..channel + 1)?;
        let (lo, hi) = plane.min_max().unwrap_or((0., 0.));
        let max = hi.max(eps);
        let min = if positive { 0. } else { lo.min(-eps) };
        let range = max - min;
        if range <= 0. {
            return Err(NetError::InvalidInput(format!(
                "通道{channel}的取值区间为空：[{min}, {max}]"
            )));
        }

        let (h, w) = (plane.height(), plane.width());
        Ok(GrayImage::from_fn(w as u32, h as u32, |x, y| {
            let v = plane[[0, y as usize, x as usize]];
            let scaled = ((v - min) / range).clamp(0., 1.) * 255.;
            Luma([scaled.round() as u8])
        }))
    }
}
