/*
 * @Author       : 老董
 * @Date         : 2026-03-03
 * @Description  : 通道维上的切片、拼接与重排
 */

use super::Tensor;
use crate::errors::NetError;
use ndarray::{Axis, concatenate, s};
use std::ops::Range;

impl Tensor {
    /// 取出通道区间`channels`对应的子张量（拷贝）
    pub fn slice_channels(&self, channels: Range<usize>) -> Result<Self, NetError> {
        if channels.start > channels.end || channels.end > self.channels() {
            return Err(NetError::InvalidInput(format!(
                "通道区间{channels:?}超出范围[0, {})",
                self.channels()
            )));
        }
        Ok(Self {
            data: self.data.slice(s![channels, .., ..]).to_owned(),
        })
    }

    /// 沿通道维依次拼接；各部分的高、宽必须一致
    pub fn concat_channels(parts: &[Self]) -> Result<Self, NetError> {
        if parts.is_empty() {
            return Err(NetError::InvalidInput("待拼接的张量列表为空".to_string()));
        }
        let views: Vec<_> = parts.iter().map(Tensor::view).collect();
        let data = concatenate(Axis(0), &views).map_err(|e| {
            NetError::InvalidInput(format!(
                "无法沿通道拼接形状为{:?}的张量：{e}",
                parts.iter().map(|p| p.shape().to_vec()).collect::<Vec<_>>()
            ))
        })?;
        Ok(Self { data })
    }

    /// 按`order`重排通道：输出的第k个通道取自输入的第`order[k]`个通道
    pub fn permute_channels(&self, order: &[usize]) -> Result<Self, NetError> {
        if let Some(&bad) = order.iter().find(|&&k| k >= self.channels()) {
            return Err(NetError::InvalidInput(format!(
                "通道序号{bad}超出范围[0, {})",
                self.channels()
            )));
        }
        let views: Vec<_> = order
            .iter()
            .map(|&k| self.data.slice(s![k..k + 1, .., ..]))
            .collect();
        let data = concatenate(Axis(0), &views)
            .map_err(|e| NetError::InvalidInput(format!("通道重排失败：{e}")))?;
        Ok(Self { data })
    }
}
