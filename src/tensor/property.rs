/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 本文件仅包含一些属性方法，不包含任何运算方法，所以不会需要用到mut
 */

use super::Tensor;

impl Tensor {
    /// 形状，恒为[C, H, W]
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn channels(&self) -> usize {
        self.data.dim().0
    }

    pub fn height(&self) -> usize {
        self.data.dim().1
    }

    pub fn width(&self) -> usize {
        self.data.dim().2
    }

    /// 张量中所有元素的数量
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_same_shape(&self, other: &Self) -> bool {
        self.shape() == other.shape()
    }

    /// 所有元素是否都等于`value`（误差在`eps`以内）
    pub fn is_filled_with(&self, value: f32, eps: f32) -> bool {
        self.data.iter().all(|x| (x - value).abs() <= eps)
    }

    /// 全局最小值与最大值；空张量返回None
    pub fn min_max(&self) -> Option<(f32, f32)> {
        let mut iter = self.data.iter();
        let first = *iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), &x| (lo.min(x), hi.max(x))))
    }
}
