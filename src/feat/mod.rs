/*
 * @Author       : 老董
 * @Date         : 2026-03-08
 * @Description  : 可执行的特征变换（Transform）
 *
 * 每个变换把一张[C_in, H, W]特征图映射为[C_out, H', W']特征图；
 * 变换一经编译即不可变，可跨线程共享。
 */

mod compiler;
mod feature;
mod ops;

pub use compiler::compile;
pub use feature::{Feature, ReferenceExtractor, Tolerance, compare};
pub use ops::{
    ChannelBiasAdd, Conv2d, GroupedConv2d, LocalResponseNorm, MaxPool2d, Preprocess, Relu,
    Sequence,
};

use crate::errors::NetError;
use crate::net::pooled_len;
use crate::tensor::Tensor;
use enum_dispatch::enum_dispatch;

#[cfg(test)]
mod tests;

#[enum_dispatch]
pub trait TraitTransform {
    /// 声明的输入通道数
    fn in_channels(&self) -> usize;

    /// 声明的输出通道数
    fn out_channels(&self) -> usize;

    /// 对单张特征图求值
    fn apply(&self, input: &Tensor) -> Result<Tensor, NetError>;

    /// 简短描述（用于日志）
    fn describe(&self) -> String;
}

#[enum_dispatch(TraitTransform)]
#[derive(Debug, Clone)]
pub enum Transform {
    Preprocess(Preprocess),
    Sequence(Sequence),
    Conv2d(Conv2d),
    GroupedConv2d(GroupedConv2d),
    ChannelBiasAdd(ChannelBiasAdd),
    LocalResponseNorm(LocalResponseNorm),
    MaxPool2d(MaxPool2d),
    Relu(Relu),
}

/// 校验输入通道数，各算子在`apply`开头调用
pub(crate) fn check_channels(op: &str, expected: usize, input: &Tensor) -> Result<(), NetError> {
    if input.channels() != expected {
        return Err(NetError::InvalidInput(format!(
            "{op}需要{expected}个输入通道，实际形状为{:?}",
            input.shape()
        )));
    }
    Ok(())
}

/// 校验窗口能放入输入并给出输出尺寸。
/// 默认只取完整窗口 ((H - kH) / s + 1, (W - kW) / s + 1)；
/// `ceil_mode`下按池化的习惯向上取整，见[`pooled_len`]。
pub(crate) fn window_output_size(
    op: &str,
    input: &Tensor,
    kernel: (usize, usize),
    stride: usize,
    ceil_mode: bool,
) -> Result<(usize, usize), NetError> {
    let (kh, kw) = kernel;
    let (h, w) = (input.height(), input.width());
    if h < kh || w < kw {
        return Err(NetError::InvalidInput(format!(
            "{op}的窗口{kh}x{kw}超出输入尺寸{h}x{w}"
        )));
    }
    let len = |n: usize, k: usize| {
        if ceil_mode {
            pooled_len(n, k, stride)
        } else {
            (n - k) / stride + 1
        }
    };
    Ok((len(h, kh), len(w, kw)))
}
