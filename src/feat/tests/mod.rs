
use crate::net::{Blob, ConvolutionParam, Layer, LayerKind, PoolingParam, ReluParam};
use rand::Rng;

/// 带权重的卷积层：权重头部为 (out, in / group, k, k)
pub(super) fn conv_layer(
    name: &str,
    bottom: &str,
    param: ConvolutionParam,
    in_channels: usize,
    weights: Vec<f32>,
    bias: Vec<f32>,
) -> Layer {
    let k = param.kernel().0;
    let header = [param.num_output, in_channels / param.group, k, k];
    Layer::new(name, LayerKind::Convolution(param), &[bottom], &[name])
        .with_blobs(vec![Blob::new(header, weights), Blob::vector(bias)])
}

pub(super) fn max_pool(name: &str, bottom: &str, kernel: usize, stride: usize) -> Layer {
    let param = PoolingParam::max(kernel, stride);
    Layer::new(name, LayerKind::Pooling(param), &[bottom], &[name])
}

pub(super) fn relu_on(name: &str, tensor: &str) -> Layer {
    Layer::new(name, LayerKind::Relu(ReluParam::default()), &[tensor], &[tensor])
}

pub(super) fn random_vec(len: usize) -> Vec<f32> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect()
}
