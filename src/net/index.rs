/*
 * @Author       : 老董
 * @Date         : 2026-03-05
 * @Description  : 网络索引：一次性校验网络并建立“张量名 -> 生产者层 / 原地后续层”的映射，
 *                 之后的反向遍历只查表，不再按名字重复扫描层列表
 */

use super::{Layer, Network};
use crate::errors::NetError;
use std::collections::{HashMap, HashSet};

#[derive(Debug)]
pub struct NetIndex<'a> {
    net: &'a Network,
    /// 张量名 -> 生产者层在`net.layers`中的下标
    producers: HashMap<&'a str, usize>,
    /// 张量名 -> 挂在其上的原地层下标
    in_place_followups: HashMap<&'a str, usize>,
}

impl<'a> NetIndex<'a> {
    /// 校验并建立索引：
    /// - 层名必须唯一
    /// - 每个张量至多一个（非原地）生产者
    /// - 每个张量至多一个原地层
    pub fn new(net: &'a Network) -> Result<Self, NetError> {
        let mut names = HashSet::new();
        let mut producers = HashMap::new();
        let mut in_place_followups = HashMap::new();

        for (i, layer) in net.layers.iter().enumerate() {
            if !names.insert(layer.name.as_str()) {
                return Err(NetError::malformed(&layer.name, "层名重复"));
            }
            if layer.is_in_place() {
                let tensor = layer.top[0].as_str();
                if let Some(prev) = in_place_followups.insert(tensor, i) {
                    return Err(NetError::malformed(
                        tensor,
                        format!(
                            "张量上有多个原地层：{}、{}",
                            net.layers[prev].name, layer.name
                        ),
                    ));
                }
                continue;
            }
            for tensor in &layer.top {
                if let Some(prev) = producers.insert(tensor.as_str(), i) {
                    return Err(NetError::malformed(
                        tensor,
                        format!(
                            "该张量有多个生产者：{}、{}",
                            net.layers[prev].name, layer.name
                        ),
                    ));
                }
            }
        }

        Ok(Self {
            net,
            producers,
            in_place_followups,
        })
    }

    pub fn net(&self) -> &'a Network {
        self.net
    }

    pub fn is_input(&self, tensor: &str) -> bool {
        self.net.is_input(tensor)
    }

    /// 产出`tensor`的层
    pub fn producer(&self, tensor: &str) -> Result<&'a Layer, NetError> {
        self.producers
            .get(tensor)
            .map(|&i| &self.net.layers[i])
            .ok_or_else(|| NetError::malformed(tensor, "找不到产出该张量的层"))
    }

    /// 产出`tensor`且只有唯一输入的层，返回 (层, 输入张量名)
    pub fn single_input_producer(&self, tensor: &str) -> Result<(&'a Layer, &'a str), NetError> {
        let layer = self.producer(tensor)?;
        match layer.bottom.as_slice() {
            [bottom] => Ok((layer, bottom.as_str())),
            bottoms => Err(NetError::malformed(
                &layer.name,
                format!("该层须恰有一个输入，实际为{bottoms:?}"),
            )),
        }
    }

    /// 挂在`tensor`上的原地层（如有）
    pub fn in_place_followup(&self, tensor: &str) -> Option<&'a Layer> {
        self.in_place_followups
            .get(tensor)
            .map(|&i| &self.net.layers[i])
    }
}
