/*
 * @Author       : 老董
 * @Date         : 2026-03-11
 * @Description  : 把网络中的某个张量编译为可执行的特征变换
 *
 * 与子图提取相同的反向遍历：
 * - 输入张量：预处理变换，输出3通道
 * - 其他张量：先编译唯一输入得到 inner，再编译生产者层得到 own；
 *   若该张量上挂有原地层，则 own 之后再接原地层（通道数不得改变）；
 *   结果为 inner -> own [-> 原地层]
 * 以张量名做记忆化，并用显式的“访问中”集合报告环。
 */

use super::ops::{
    ChannelBiasAdd, Conv2d, GroupedConv2d, LocalResponseNorm, MaxPool2d, Preprocess, Relu,
    Sequence,
};
use super::{TraitTransform, Transform};
use crate::errors::NetError;
use crate::net::{
    ConvolutionParam, Layer, LayerKind, LrnParam, NetIndex, Network, NormRegion, PoolMethod,
    PoolingParam, ReluParam,
};
use ndarray::s;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// 像素输入固定为3通道
const PIXEL_CHANNELS: usize = 3;

/// 把张量`output`编译为变换；`mean`为预处理时（按RGB顺序）减去的均值
pub fn compile(net: &Network, output: &str, mean: [f32; 3]) -> Result<Transform, NetError> {
    if net.input.len() != 1 {
        return Err(NetError::malformed(
            &net.name,
            format!("网络须恰有一个输入，实际为{:?}", net.input),
        ));
    }
    if let Some(channels) = net.input_channels() {
        if channels != PIXEL_CHANNELS {
            return Err(NetError::unsupported(
                &net.input[0],
                format!("输入须为{PIXEL_CHANNELS}通道像素，实际声明为{channels}通道"),
            ));
        }
    }
    let mut compiler = Compiler {
        index: NetIndex::new(net)?,
        mean,
        memo: HashMap::new(),
        visiting: HashSet::new(),
    };
    compiler.compile_tensor(output)
}

struct Compiler<'a> {
    index: NetIndex<'a>,
    mean: [f32; 3],
    memo: HashMap<&'a str, Transform>,
    visiting: HashSet<&'a str>,
}

impl<'a> Compiler<'a> {
    fn compile_tensor(&mut self, name: &'a str) -> Result<Transform, NetError> {
        if self.index.is_input(name) {
            return Ok(Preprocess::new(self.mean).into());
        }
        if let Some(done) = self.memo.get(name) {
            return Ok(done.clone());
        }
        if !self.visiting.insert(name) {
            return Err(NetError::malformed(name, "反向遍历时遇到环"));
        }

        let (layer, bottom) = self.index.single_input_producer(name)?;
        let inner = self.compile_tensor(bottom)?;
        let own = compile_layer(layer, inner.out_channels())?;
        let last = match self.index.in_place_followup(name) {
            Some(followup) => {
                let channels = own.out_channels();
                let after = compile_layer(followup, channels)?;
                if after.out_channels() != channels {
                    return Err(NetError::dimension(
                        &followup.name,
                        &[channels],
                        &[after.out_channels()],
                        "原地层不得改变通道数",
                    ));
                }
                Sequence::new(own, after, &followup.name)?.into()
            }
            None => own,
        };
        let transform: Transform = Sequence::new(inner, last, &layer.name)?.into();
        debug!("编译`{}`：{}", name, transform.describe());

        self.visiting.remove(name);
        self.memo.insert(name, transform.clone());
        Ok(transform)
    }
}

/// 按层类型把单层编译为变换，`in_channels`为输入通道数
fn compile_layer(layer: &Layer, in_channels: usize) -> Result<Transform, NetError> {
    debug!(
        "层`{}`（{}）：输入{}通道",
        layer.name,
        layer.kind.type_name(),
        in_channels
    );
    match &layer.kind {
        LayerKind::Convolution(param) => compile_conv(layer, param, in_channels),
        LayerKind::Lrn(param) => compile_lrn(layer, param, in_channels),
        LayerKind::Pooling(param) => compile_pool(layer, param, in_channels),
        LayerKind::Relu(param) => compile_relu(layer, param, in_channels),
        LayerKind::Unsupported(type_name) => Err(NetError::unsupported(
            &layer.name,
            format!("不支持的层类型：{type_name}"),
        )),
    }
}

fn compile_conv(
    layer: &Layer,
    param: &ConvolutionParam,
    in_channels: usize,
) -> Result<Transform, NetError> {
    let name = layer.name.as_str();
    if param.pad != 0 {
        return Err(NetError::unsupported(name, format!("不支持填充：pad={}", param.pad)));
    }
    let (kh, kw) = param.kernel();
    if param.stride == 0 || kh == 0 || kw == 0 {
        return Err(NetError::unsupported(
            name,
            format!("步长与核尺寸须为正，实际步长{}、核{kh}x{kw}", param.stride),
        ));
    }
    let [weights, bias] = layer.blobs.as_slice() else {
        return Err(NetError::dimension(
            name,
            &[2],
            &[layer.blobs.len()],
            "卷积层须恰有2个blob（权重、偏置）",
        ));
    };

    let groups = param.group;
    let out_channels = param.num_output;
    if groups == 0 || in_channels % groups != 0 || out_channels % groups != 0 {
        return Err(NetError::dimension(
            name,
            &[in_channels, out_channels],
            &[groups],
            "输入、输出通道数须能被分组数整除",
        ));
    }

    let bank = weights.to_filter_bank(name)?;
    let expected = [out_channels, in_channels / groups, kh, kw];
    if weights.header() != expected {
        return Err(NetError::dimension(
            name,
            &expected,
            &weights.header(),
            "权重blob的头部维度与层配置不符",
        ));
    }
    let bias = bias.to_bias(name)?;
    if bias.len() != out_channels {
        return Err(NetError::dimension(
            name,
            &[out_channels],
            &[bias.len()],
            "偏置长度与输出通道数不符",
        ));
    }

    let conv: Transform = if groups == 1 {
        Conv2d::new(bank, param.stride).into()
    } else {
        let step = out_channels / groups;
        let banks = (0..groups)
            .map(|j| {
                let part = bank.slice(s![j * step..(j + 1) * step, .., .., ..]);
                Conv2d::new(part.to_owned(), param.stride)
            })
            .collect();
        GroupedConv2d::new(banks)?.into()
    };
    Ok(Sequence::new(conv, ChannelBiasAdd::new(bias).into(), name)?.into())
}

fn compile_lrn(layer: &Layer, param: &LrnParam, in_channels: usize) -> Result<Transform, NetError> {
    if param.norm_region != NormRegion::AcrossChannels {
        return Err(NetError::unsupported(
            &layer.name,
            format!("LRN仅支持跨通道模式，实际为{:?}", param.norm_region),
        ));
    }
    if param.local_size % 2 == 0 {
        return Err(NetError::unsupported(
            &layer.name,
            format!("LRN窗口须为正奇数，实际为{}", param.local_size),
        ));
    }
    Ok(LocalResponseNorm::new(in_channels, param.local_size, param.alpha, param.beta).into())
}

fn compile_pool(
    layer: &Layer,
    param: &PoolingParam,
    in_channels: usize,
) -> Result<Transform, NetError> {
    if param.pool != PoolMethod::Max {
        return Err(NetError::unsupported(
            &layer.name,
            format!("仅支持最大池化，实际为{:?}", param.pool),
        ));
    }
    if param.pad != 0 {
        return Err(NetError::unsupported(
            &layer.name,
            format!("不支持填充：pad={}", param.pad),
        ));
    }
    let (kh, kw) = param.kernel();
    if param.stride == 0 || kh == 0 || kw == 0 {
        return Err(NetError::unsupported(
            &layer.name,
            format!(
                "步长与窗口尺寸须为正，实际步长{}、窗口{kh}x{kw}",
                param.stride
            ),
        ));
    }
    Ok(MaxPool2d::new(in_channels, (kh, kw), param.stride).into())
}

fn compile_relu(
    layer: &Layer,
    param: &ReluParam,
    in_channels: usize,
) -> Result<Transform, NetError> {
    if param.negative_slope != 0. {
        return Err(NetError::unsupported(
            &layer.name,
            format!("不支持leaky ReLU：negative_slope={}", param.negative_slope),
        ));
    }
    Ok(Relu::new(in_channels).into())
}
