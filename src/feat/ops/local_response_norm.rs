/*
 * @Author       : 老董
 * @Date         : 2026-03-09
 * @Description  : 跨通道局部响应归一化（LRN）
 *
 * 数学：output[c] = input[c] / (k + scale * Σ input[c']²)^beta
 * 其中 c' 取以 c 为中心、宽为 size 的通道窗口（越界部分忽略），
 * scale = alpha / size，k 固定为 1。
 */

use crate::errors::NetError;
use crate::feat::{TraitTransform, check_channels};
use crate::tensor::Tensor;
use ndarray::{Array3, Axis, Zip, s};

#[derive(Debug, Clone)]
pub struct LocalResponseNorm {
    channels: usize,
    size: usize,
    scale: f32,
    beta: f32,
    k: f32,
}

impl LocalResponseNorm {
    /// `alpha`为未除以`size`的原始系数
    pub fn new(channels: usize, size: usize, alpha: f32, beta: f32) -> Self {
        Self {
            channels,
            size,
            scale: alpha / size as f32,
            beta,
            k: 1.,
        }
    }
}

impl TraitTransform for LocalResponseNorm {
    fn in_channels(&self) -> usize {
        self.channels
    }

    fn out_channels(&self) -> usize {
        self.channels
    }

    fn apply(&self, input: &Tensor) -> Result<Tensor, NetError> {
        check_channels("LocalResponseNorm", self.channels, input)?;
        let x = input.view();
        let squares = x.mapv(|v| v * v);
        let pre = (self.size - 1) / 2;

        let mut out = Array3::zeros(x.raw_dim());
        for (c, mut plane) in out.axis_iter_mut(Axis(0)).enumerate() {
            let lo = c.saturating_sub(pre);
            let hi = (c + self.size - pre).min(self.channels);
            let sum = squares.slice(s![lo..hi, .., ..]).sum_axis(Axis(0));
            Zip::from(&mut plane)
                .and(x.index_axis(Axis(0), c))
                .and(&sum)
                .for_each(|o, &v, &sq| *o = v / (self.k + self.scale * sq).powf(self.beta));
        }
        Ok(Tensor::from_array(out))
    }

    fn describe(&self) -> String {
        format!(
            "LocalResponseNorm({}, size={}, beta={})",
            self.channels, self.size, self.beta
        )
    }
}
