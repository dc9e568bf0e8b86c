/*
 * @Author       : 老董
 * @Date         : 2026-03-04
 * @Description  : 网络（Network）的描述与查询
 *
 * 网络是层的有序列表加上声明的输入张量名，一经构建即不再修改。
 * 张量名是边：生产者层的top与消费者层的bottom共用同一个名字。
 * 唯一例外是原地层（bottom == top），它“修改”而非“创建”张量。
 */

mod blob;
mod index;
mod layer;
mod model_io;
mod subset;
mod topology;

pub use blob::Blob;
pub use index::NetIndex;
pub use layer::{
    ConvolutionParam, Layer, LayerKind, LrnParam, NormRegion, PoolMethod, PoolingParam, ReluParam,
};
pub use model_io::{load_mean_npy, parse_mean};
pub use subset::subset_for_output;
pub use topology::{layer_field, layer_rate, layer_size, rate_and_field};
pub(crate) use topology::pooled_len;

use crate::errors::NetError;
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// 网络描述
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Network {
    #[serde(default)]
    pub name: String,
    /// 声明的输入张量名
    #[serde(default)]
    pub input: Vec<String>,
    /// 输入维度 [N, C, H, W]（可选，空表示未声明）
    #[serde(default)]
    pub input_dim: Vec<usize>,
    #[serde(default)]
    pub layers: Vec<Layer>,
}

impl Network {
    pub fn new(name: &str, input: &[&str], layers: Vec<Layer>) -> Self {
        Self {
            name: name.to_string(),
            input: input.iter().map(|s| s.to_string()).collect(),
            input_dim: Vec::new(),
            layers,
        }
    }

    pub fn is_input(&self, name: &str) -> bool {
        self.input.iter().any(|input| input == name)
    }

    pub fn layer_by_name(&self, name: &str) -> Result<&Layer, NetError> {
        self.layers
            .iter()
            .find(|layer| layer.name == name)
            .ok_or_else(|| NetError::malformed(name, "找不到该层"))
    }

    /// 以非原地方式产出`tensor`的层
    pub fn producer_of(&self, tensor: &str) -> Result<&Layer, NetError> {
        let producers: Vec<_> = self.layers.iter().filter(|l| l.produces(tensor)).collect();
        match producers.as_slice() {
            [layer] => Ok(*layer),
            [] => Err(NetError::malformed(tensor, "找不到产出该张量的层")),
            [first, second, ..] => Err(NetError::malformed(
                tensor,
                format!("该张量有多个生产者：{}、{}", first.name, second.name),
            )),
        }
    }

    /// `tensor`上唯一的原地层（bottom == top == tensor）。多于一个时报错
    pub fn loop_layer_for(&self, tensor: &str) -> Result<Option<&Layer>, NetError> {
        let loops: Vec<_> = self.layers.iter().filter(|l| l.is_loop_on(tensor)).collect();
        match loops.as_slice() {
            [] => Ok(None),
            [layer] => Ok(Some(*layer)),
            [first, second, ..] => Err(NetError::malformed(
                tensor,
                format!("张量上有多个原地层：{}、{}", first.name, second.name),
            )),
        }
    }

    /// 输入的通道数（仅当`input_dim`声明了 [N, C, H, W] 时可知）
    pub fn input_channels(&self) -> Option<usize> {
        (self.input_dim.len() == 4).then(|| self.input_dim[1])
    }

    /// 按层名把`weights`中同名层的blob整体替换进来，返回新网络。
    /// 找不到同名层的保持原样（通常为空），不报错。
    pub fn with_weights_from(&self, weights: &Network) -> Self {
        let mut merged = self.clone();
        for layer in &mut merged.layers {
            if let Some(src) = weights.layers.iter().find(|l| l.name == layer.name) {
                layer.blobs = src.blobs.clone();
            }
        }
        merged
    }
}
