mod model_io;
mod topology;

use super::{ConvolutionParam, Layer, LayerKind, LrnParam, PoolingParam, ReluParam};

/// 单输入单输出的卷积层（不含blob）
pub(super) fn conv(
    name: &str,
    bottom: &str,
    num_output: usize,
    kernel: usize,
    stride: usize,
) -> Layer {
    let param = ConvolutionParam::new(num_output, kernel, stride);
    Layer::new(name, LayerKind::Convolution(param), &[bottom], &[name])
}

pub(super) fn max_pool(name: &str, bottom: &str, kernel: usize, stride: usize) -> Layer {
    let param = PoolingParam::max(kernel, stride);
    Layer::new(name, LayerKind::Pooling(param), &[bottom], &[name])
}

pub(super) fn lrn(name: &str, bottom: &str) -> Layer {
    Layer::new(name, LayerKind::Lrn(LrnParam::default()), &[bottom], &[name])
}

/// 挂在`tensor`上的原地ReLU
pub(super) fn relu_on(name: &str, tensor: &str) -> Layer {
    Layer::new(name, LayerKind::Relu(ReluParam::default()), &[tensor], &[tensor])
}
