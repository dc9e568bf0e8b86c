/*
 * @Author       : 老董
 * @Date         : 2026-03-08
 * @Description  : 2D 卷积（无填充）
 *
 * 约定：
 * - 输入 [C_in, H, W]，卷积核 [C_out, C_in, kH, kW]，输出 [C_out, H', W']
 * - 计算的是互相关（核不翻转），与 Blob 解码时不翻转的约定保持一致
 * - 使用 Rayon 在输出通道维度并行
 */

use crate::errors::NetError;
use crate::feat::{TraitTransform, check_channels, window_output_size};
use crate::tensor::Tensor;
use ndarray::{Array3, Array4, Axis};
use rayon::prelude::*;

#[derive(Debug, Clone)]
pub struct Conv2d {
    kernel: Array4<f32>,
    stride: usize,
}

impl Conv2d {
    pub fn new(kernel: Array4<f32>, stride: usize) -> Self {
        Self { kernel, stride }
    }

    /// 卷积核尺寸 (kH, kW)
    pub fn kernel_size(&self) -> (usize, usize) {
        let (_, _, kh, kw) = self.kernel.dim();
        (kh, kw)
    }

    pub const fn stride(&self) -> usize {
        self.stride
    }
}

impl TraitTransform for Conv2d {
    fn in_channels(&self) -> usize {
        self.kernel.dim().1
    }

    fn out_channels(&self) -> usize {
        self.kernel.dim().0
    }

    fn apply(&self, input: &Tensor) -> Result<Tensor, NetError> {
        check_channels("Conv2d", self.in_channels(), input)?;
        let (kh, kw) = self.kernel_size();
        let (out_h, out_w) = window_output_size("Conv2d", input, (kh, kw), self.stride, false)?;
        let s = self.stride;
        let x = input.view();

        // 每个输出通道一个平面，行优先展平
        let planes: Vec<Vec<f32>> = (0..self.out_channels())
            .into_par_iter()
            .map(|oc| {
                let k = self.kernel.index_axis(Axis(0), oc);
                let mut plane = Vec::with_capacity(out_h * out_w);
                for oy in 0..out_h {
                    for ox in 0..out_w {
                        let mut sum = 0.0f32;
                        for ((ic, ky, kx), &weight) in k.indexed_iter() {
                            sum += weight * x[[ic, oy * s + ky, ox * s + kx]];
                        }
                        plane.push(sum);
                    }
                }
                plane
            })
            .collect();

        let data = Array3::from_shape_fn((planes.len(), out_h, out_w), |(c, i, j)| {
            planes[c][i * out_w + j]
        });
        Ok(Tensor::from_array(data))
    }

    fn describe(&self) -> String {
        let (kh, kw) = self.kernel_size();
        format!(
            "Conv2d({}->{}, {kh}x{kw}/{})",
            self.in_channels(),
            self.out_channels(),
            self.stride
        )
    }
}
