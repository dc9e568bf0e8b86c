/*
 * @Author       : 老董
 * @Date         : 2026-03-12
 * @Description  : 面向使用方的特征：编译好的变换 + 下采样率，
 *                 以及与参照实现（如外部 Caffe 进程）的对拍
 */

use super::{TraitTransform, Transform, compile};
use crate::errors::NetError;
use crate::net::{Network, layer_rate, subset_for_output};
use crate::tensor::Tensor;
use crate::vision::Vision;
use image::DynamicImage;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// 参照实现：对一批图像在网络`net`上求张量`output`的值。
/// 具体如何调用（子进程、临时文件、序列化格式）由实现方决定。
pub trait ReferenceExtractor {
    fn extract(
        &self,
        images: &[DynamicImage],
        output: &str,
        net: &Network,
    ) -> Result<Vec<Tensor>, NetError>;
}

/// 逐元素比较的容差：|x - y| ≤ eps_rel·|x| 或 |x - y| ≤ eps_abs 即视为相等
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub eps_rel: f32,
    pub eps_abs: f32,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            eps_rel: 1e-6,
            eps_abs: 1e-6,
        }
    }
}

/// 比较期望值`want`与实际值`got`，逐个记录不相等的位置
pub fn compare(want: &Tensor, got: &Tensor, tolerance: Tolerance) -> bool {
    if !want.is_same_shape(got) {
        warn!("形状不一致：期望{:?}，实际{:?}", want.shape(), got.shape());
        return false;
    }
    let mut equal = true;
    for ((index, &x), &y) in want.view().indexed_iter().zip(got.view().iter()) {
        let diff = (x - y).abs();
        if diff <= tolerance.eps_rel * x.abs() || diff <= tolerance.eps_abs {
            continue;
        }
        warn!("{:?}处不同：期望{}，实际{}", index, x, y);
        equal = false;
    }
    equal
}

/// 编译好的特征
#[derive(Debug, Clone)]
pub struct Feature {
    output: String,
    transform: Transform,
    /// 计算`output`所需的子网络，供按需求下采样率
    net: Network,
}

impl Feature {
    /// 把网络中张量`output`编译为特征。
    /// 下采样率不在此处计算（见[`Feature::rate`]），因此凡是能编译的张量都能构造特征。
    pub fn from_net(net: &Network, output: &str, mean: [f32; 3]) -> Result<Self, NetError> {
        let transform = compile(net, output, mean)?;
        let net = subset_for_output(net, output)?;
        info!(
            "特征`{}`：输出{}通道，{}",
            output,
            transform.out_channels(),
            transform.describe()
        );
        Ok(Self {
            output: output.to_string(),
            transform,
            net,
        })
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// 累计下采样率。链路上须只含卷积、池化、LRN（原地ReLU不影响），否则报错
    pub fn rate(&self) -> Result<usize, NetError> {
        layer_rate(&self.net, &self.output)
    }

    /// 计算`output`所需的子网络
    pub fn net(&self) -> &Network {
        &self.net
    }

    pub fn channels(&self) -> usize {
        self.transform.out_channels()
    }

    /// 作用于已转换为[3, H, W]、取值[0, 1]的图像张量
    pub fn apply_tensor(&self, input: &Tensor) -> Result<Tensor, NetError> {
        self.transform.apply(input)
    }

    pub fn apply(&self, image: &DynamicImage) -> Result<Tensor, NetError> {
        self.apply_tensor(&Vision::image_to_tensor(image))
    }

    /// 并行处理多张图像
    pub fn map(&self, images: &[DynamicImage]) -> Result<Vec<Tensor>, NetError> {
        images.par_iter().map(|image| self.apply(image)).collect()
    }

    /// 与参照实现对拍：参照实现只拿到计算`output`所需的子网络`subset`
    pub fn check_against<R: ReferenceExtractor>(
        &self,
        reference: &R,
        subset: &Network,
        image: &DynamicImage,
        tolerance: Tolerance,
    ) -> Result<bool, NetError> {
        let want = reference
            .extract(std::slice::from_ref(image), &self.output, subset)?
            .into_iter()
            .next()
            .ok_or_else(|| NetError::Reference("参照实现没有返回结果".to_string()))?;
        let got = self.apply(image)?;
        Ok(compare(&want, &got, tolerance))
    }
}
