/*
 * @Author       : 老董
 * @Date         : 2026-03-04
 * @Description  : Blob：层上挂载的训练参数（4D f32数组）及其解码
 *
 * 元素按 (out, in, row, col) 行优先排列，解码时原样拷贝、不做空间翻转，
 * 对应的卷积实现是互相关（见 feat::ops::conv2d）。
 */

use crate::errors::NetError;
use ndarray::{Array1, Array4};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blob {
    /// 输出数（outCount）
    pub num: usize,
    /// 输入通道数（inCount）
    pub channels: usize,
    pub height: usize,
    pub width: usize,
    pub data: Vec<f32>,
}

impl Blob {
    pub fn new(header: [usize; 4], data: Vec<f32>) -> Self {
        let [num, channels, height, width] = header;
        Self {
            num,
            channels,
            height,
            width,
            data,
        }
    }

    /// 一维的偏置blob，头部为 (1, 1, 1, n)
    pub fn vector(data: Vec<f32>) -> Self {
        Self::new([1, 1, 1, data.len()], data)
    }

    /// 头部维度 (out, in, h, w)
    pub fn header(&self) -> [usize; 4] {
        [self.num, self.channels, self.height, self.width]
    }

    /// 检查元素个数是否恰为 `w·h·in·out`
    pub fn check_len(&self, layer: &str) -> Result<(), NetError> {
        let expected = self.header().iter().product::<usize>();
        if self.data.len() != expected {
            return Err(NetError::dimension(
                layer,
                &[expected],
                &[self.data.len()],
                format!("blob{:?}的元素个数不对", self.header()),
            ));
        }
        Ok(())
    }

    /// 解码为卷积核组，形状 [out, in, kH, kW]
    pub fn to_filter_bank(&self, layer: &str) -> Result<Array4<f32>, NetError> {
        self.check_len(layer)?;
        let [out, inp, h, w] = self.header();
        let data = &self.data;
        Ok(Array4::from_shape_fn((out, inp, h, w), |(i, p, v, u)| {
            data[((i * inp + p) * h + v) * w + u]
        }))
    }

    /// 解码为偏置向量
    pub fn to_bias(&self, layer: &str) -> Result<Array1<f32>, NetError> {
        self.check_len(layer)?;
        Ok(Array1::from_vec(self.data.clone()))
    }
}
