/*
 * @Author       : 老董
 * @Date         : 2026-03-10
 * @Description  : 输入预处理：把[0, 1]范围的RGB像素转成网络期望的输入
 *
 * 顺序不可调换：
 * 1. 乘以 255
 * 2. 减去（按原通道顺序给出的）均值
 * 3. 交换第一与最后一个通道（RGB -> BGR）
 */

use crate::errors::NetError;
use crate::feat::{TraitTransform, check_channels};
use crate::tensor::Tensor;
use ndarray::Axis;

const RAW_SCALE: f32 = 255.;
const CHANNEL_SWAP: [usize; 3] = [2, 1, 0];

#[derive(Debug, Clone)]
pub struct Preprocess {
    mean: [f32; 3],
}

impl Preprocess {
    pub fn new(mean: [f32; 3]) -> Self {
        Self { mean }
    }

    pub fn mean(&self) -> [f32; 3] {
        self.mean
    }
}

impl TraitTransform for Preprocess {
    fn in_channels(&self) -> usize {
        3
    }

    fn out_channels(&self) -> usize {
        3
    }

    fn apply(&self, input: &Tensor) -> Result<Tensor, NetError> {
        check_channels("Preprocess", 3, input)?;
        let mut shifted = input.map(|x| x * RAW_SCALE).into_array();
        for (c, mean) in self.mean.iter().enumerate() {
            let mut plane = shifted.index_axis_mut(Axis(0), c);
            plane -= *mean;
        }
        Tensor::from_array(shifted).permute_channels(&CHANNEL_SWAP)
    }

    fn describe(&self) -> String {
        format!("Preprocess(x255, -{:?}, swap RB)", self.mean)
    }
}
