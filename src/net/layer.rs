/*
 * @Author       : 老董
 * @Date         : 2026-03-04
 * @Description  : 层（Layer）及其类型相关参数
 *
 * 层类型是一个封闭集合：卷积、池化、LRN、ReLU。
 * 网络定义里出现的其他类型统一落入`Unsupported`，由使用方在匹配时显式处理。
 */

use super::Blob;
use serde::{Deserialize, Serialize};

/// 网络中的一层
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// 层名（网络内唯一）
    pub name: String,
    pub kind: LayerKind,
    /// 输入张量名
    #[serde(default)]
    pub bottom: Vec<String>,
    /// 输出张量名
    #[serde(default)]
    pub top: Vec<String>,
    /// 训练得到的参数
    #[serde(default)]
    pub blobs: Vec<Blob>,
}

/// 层类型及其参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayerKind {
    Convolution(ConvolutionParam),
    Pooling(PoolingParam),
    #[serde(rename = "LRN")]
    Lrn(LrnParam),
    #[serde(rename = "ReLU")]
    Relu(ReluParam),
    /// 本库不处理的层类型，保留其类型名用于报错
    Unsupported(String),
}

impl LayerKind {
    /// 类型名（用于日志与报错）
    pub fn type_name(&self) -> &str {
        match self {
            Self::Convolution(_) => "Convolution",
            Self::Pooling(_) => "Pooling",
            Self::Lrn(_) => "LRN",
            Self::Relu(_) => "ReLU",
            Self::Unsupported(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvolutionParam {
    pub num_output: usize,
    /// 正方形卷积核边长；未设置时使用`kernel_h`/`kernel_w`
    #[serde(default)]
    pub kernel_size: Option<usize>,
    #[serde(default)]
    pub kernel_h: usize,
    #[serde(default)]
    pub kernel_w: usize,
    #[serde(default = "one")]
    pub stride: usize,
    #[serde(default)]
    pub pad: usize,
    #[serde(default = "one")]
    pub group: usize,
}

impl ConvolutionParam {
    pub fn new(num_output: usize, kernel_size: usize, stride: usize) -> Self {
        Self {
            num_output,
            kernel_size: Some(kernel_size),
            kernel_h: 0,
            kernel_w: 0,
            stride,
            pad: 0,
            group: 1,
        }
    }

    /// 卷积核尺寸 (kH, kW)
    pub fn kernel(&self) -> (usize, usize) {
        kernel_of(self.kernel_size, self.kernel_h, self.kernel_w)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PoolMethod {
    #[default]
    Max,
    Ave,
    Stochastic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolingParam {
    #[serde(default)]
    pub pool: PoolMethod,
    #[serde(default)]
    pub kernel_size: Option<usize>,
    #[serde(default)]
    pub kernel_h: usize,
    #[serde(default)]
    pub kernel_w: usize,
    #[serde(default = "one")]
    pub stride: usize,
    #[serde(default)]
    pub pad: usize,
}

impl PoolingParam {
    pub fn max(kernel_size: usize, stride: usize) -> Self {
        Self {
            pool: PoolMethod::Max,
            kernel_size: Some(kernel_size),
            kernel_h: 0,
            kernel_w: 0,
            stride,
            pad: 0,
        }
    }

    /// 池化窗口尺寸 (kH, kW)
    pub fn kernel(&self) -> (usize, usize) {
        kernel_of(self.kernel_size, self.kernel_h, self.kernel_w)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NormRegion {
    #[default]
    AcrossChannels,
    WithinChannel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LrnParam {
    #[serde(default = "default_local_size")]
    pub local_size: usize,
    #[serde(default = "default_alpha")]
    pub alpha: f32,
    #[serde(default = "default_beta")]
    pub beta: f32,
    #[serde(default)]
    pub norm_region: NormRegion,
}

impl Default for LrnParam {
    fn default() -> Self {
        Self {
            local_size: default_local_size(),
            alpha: default_alpha(),
            beta: default_beta(),
            norm_region: NormRegion::AcrossChannels,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReluParam {
    #[serde(default)]
    pub negative_slope: f32,
}

impl Layer {
    pub fn new(name: &str, kind: LayerKind, bottom: &[&str], top: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind,
            bottom: bottom.iter().map(|s| s.to_string()).collect(),
            top: top.iter().map(|s| s.to_string()).collect(),
            blobs: Vec::new(),
        }
    }

    pub fn with_blobs(mut self, blobs: Vec<Blob>) -> Self {
        self.blobs = blobs;
        self
    }

    /// 是否为原地层：唯一输入与唯一输出同名
    pub fn is_in_place(&self) -> bool {
        self.bottom.len() == 1 && self.top.len() == 1 && self.bottom[0] == self.top[0]
    }

    /// 是否为`tensor`上的原地层
    pub fn is_loop_on(&self, tensor: &str) -> bool {
        self.is_in_place() && self.top[0] == tensor
    }

    /// 是否以非原地方式产出`tensor`
    pub fn produces(&self, tensor: &str) -> bool {
        !self.is_in_place() && self.top.iter().any(|t| t == tensor)
    }
}

fn kernel_of(size: Option<usize>, h: usize, w: usize) -> (usize, usize) {
    match size {
        Some(p) => (p, p),
        None => (h, w),
    }
}

const fn one() -> usize {
    1
}

const fn default_local_size() -> usize {
    5
}

const fn default_alpha() -> f32 {
    1.
}

const fn default_beta() -> f32 {
    0.75
}
