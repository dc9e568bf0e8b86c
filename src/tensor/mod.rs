/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 特征图张量。固定为3阶[C, H, W]（通道、行、列），
 *                 仅服务于单张图像的前向计算，不含 batch 维
 */

use ndarray::{Array3, ArrayView3};
use std::ops::Index;

mod property;
mod slice;

#[cfg(test)]
mod tests;

/// 形状为[C, H, W]的f32特征图
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    data: Array3<f32>,
}

impl Tensor {
    /// 按行优先（C, H, W）顺序由`data`创建张量。
    /// `data`的长度必须等于`c * h * w`，否则会panic。
    pub fn new(data: &[f32], shape: (usize, usize, usize)) -> Self {
        let (c, h, w) = shape;
        assert_eq!(
            data.len(),
            c * h * w,
            "数据长度{}与形状{:?}不符",
            data.len(),
            shape
        );
        Self {
            data: Array3::from_shape_fn(shape, |(k, i, j)| data[(k * h + i) * w + j]),
        }
    }

    /// 所有元素均为`value`的张量
    pub fn filled(value: f32, shape: (usize, usize, usize)) -> Self {
        Self {
            data: Array3::from_elem(shape, value),
        }
    }

    pub fn zeros(shape: (usize, usize, usize)) -> Self {
        Self::filled(0., shape)
    }

    pub fn from_array(data: Array3<f32>) -> Self {
        Self { data }
    }

    pub fn into_array(self) -> Array3<f32> {
        self.data
    }

    pub fn view(&self) -> ArrayView3<'_, f32> {
        self.data.view()
    }

    /// 逐元素映射，返回新张量
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            data: self.data.mapv(f),
        }
    }
}

impl Index<[usize; 3]> for Tensor {
    type Output = f32;

    fn index(&self, index: [usize; 3]) -> &f32 {
        &self.data[index]
    }
}
