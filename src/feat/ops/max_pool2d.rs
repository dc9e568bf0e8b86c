/*
 * @Author       : 老董
 * @Date         : 2026-03-09
 * @Description  : 2D 最大池化（无填充）
 *
 * 输入 [C, H, W]，输出 [C, H', W']，H' = ceil((H - kH) / s) + 1；
 * 与卷积不同，末尾不足一个窗口的部分也会产出一个（截断后的）窗口
 */

use crate::errors::NetError;
use crate::feat::{TraitTransform, check_channels, window_output_size};
use crate::tensor::Tensor;
use ndarray::{Array3, s};

#[derive(Debug, Clone)]
pub struct MaxPool2d {
    channels: usize,
    kernel_size: (usize, usize),
    stride: usize,
}

impl MaxPool2d {
    pub fn new(channels: usize, kernel_size: (usize, usize), stride: usize) -> Self {
        Self {
            channels,
            kernel_size,
            stride,
        }
    }
}

impl TraitTransform for MaxPool2d {
    fn in_channels(&self) -> usize {
        self.channels
    }

    fn out_channels(&self) -> usize {
        self.channels
    }

    fn apply(&self, input: &Tensor) -> Result<Tensor, NetError> {
        check_channels("MaxPool2d", self.channels, input)?;
        let (kh, kw) = self.kernel_size;
        let (out_h, out_w) = window_output_size("MaxPool2d", input, (kh, kw), self.stride, true)?;
        let (h, w) = (input.height(), input.width());
        let s = self.stride;
        let x = input.view();

        // 末尾窗口截断到输入内
        let data = Array3::from_shape_fn((self.channels, out_h, out_w), |(c, i, j)| {
            x.slice(s![c, i * s..(i * s + kh).min(h), j * s..(j * s + kw).min(w)])
                .fold(f32::NEG_INFINITY, |m, &v| m.max(v))
        });
        Ok(Tensor::from_array(data))
    }

    fn describe(&self) -> String {
        let (kh, kw) = self.kernel_size;
        format!("MaxPool2d({}, {kh}x{kw}/{})", self.channels, self.stride)
    }
}
