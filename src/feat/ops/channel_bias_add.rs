/*
 * @Author       : 老董
 * @Date         : 2026-03-09
 * @Description  : ChannelBiasAdd - 卷积层的通道级偏置
 *
 * 数学：output[c, h, w] = input[c, h, w] + bias[c]
 */

use crate::errors::NetError;
use crate::feat::{TraitTransform, check_channels};
use crate::tensor::Tensor;
use ndarray::{Array1, Axis};

#[derive(Debug, Clone)]
pub struct ChannelBiasAdd {
    bias: Array1<f32>,
}

impl ChannelBiasAdd {
    pub fn new(bias: Array1<f32>) -> Self {
        Self { bias }
    }
}

impl TraitTransform for ChannelBiasAdd {
    fn in_channels(&self) -> usize {
        self.bias.len()
    }

    fn out_channels(&self) -> usize {
        self.bias.len()
    }

    fn apply(&self, input: &Tensor) -> Result<Tensor, NetError> {
        check_channels("ChannelBiasAdd", self.in_channels(), input)?;
        let mut data = input.clone().into_array();
        for (mut plane, &b) in data.axis_iter_mut(Axis(0)).zip(self.bias.iter()) {
            plane += b;
        }
        Ok(Tensor::from_array(data))
    }

    fn describe(&self) -> String {
        format!("ChannelBiasAdd({})", self.bias.len())
    }
}
