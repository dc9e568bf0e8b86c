/*
 * @Author       : 老董
 * @Date         : 2026-03-09
 * @Description  : 分组卷积
 *
 * g 组时，输入通道被均分为 g 段连续区间 [j·in/g, (j+1)·in/g)，
 * 第 j 组卷积核只作用于第 j 段，各组输出按组号顺序沿通道拼接。
 */

use super::Conv2d;
use crate::errors::NetError;
use crate::feat::{TraitTransform, check_channels};
use crate::tensor::Tensor;

#[derive(Debug, Clone)]
pub struct GroupedConv2d {
    banks: Vec<Conv2d>,
}

impl GroupedConv2d {
    /// 各组的输入、输出通道数以及核尺寸、步长必须一致
    pub fn new(banks: Vec<Conv2d>) -> Result<Self, NetError> {
        let Some(first) = banks.first() else {
            return Err(NetError::InvalidInput("分组卷积至少需要1组".to_string()));
        };
        let signature = |c: &Conv2d| {
            [
                c.in_channels(),
                c.out_channels(),
                c.kernel_size().0,
                c.kernel_size().1,
                c.stride(),
            ]
        };
        let expected = signature(first);
        if let Some(bad) = banks.iter().find(|c| signature(*c) != expected) {
            return Err(NetError::InvalidInput(format!(
                "分组卷积各组配置不一致：{} 与 {}",
                first.describe(),
                bad.describe()
            )));
        }
        Ok(Self { banks })
    }

    pub fn groups(&self) -> usize {
        self.banks.len()
    }
}

impl TraitTransform for GroupedConv2d {
    fn in_channels(&self) -> usize {
        self.banks.iter().map(|c| c.in_channels()).sum()
    }

    fn out_channels(&self) -> usize {
        self.banks.iter().map(|c| c.out_channels()).sum()
    }

    fn apply(&self, input: &Tensor) -> Result<Tensor, NetError> {
        check_channels("GroupedConv2d", self.in_channels(), input)?;
        let step = self.banks[0].in_channels();
        let parts = self
            .banks
            .iter()
            .enumerate()
            .map(|(j, bank)| bank.apply(&input.slice_channels(j * step..(j + 1) * step)?))
            .collect::<Result<Vec<_>, _>>()?;
        Tensor::concat_channels(&parts)
    }

    fn describe(&self) -> String {
        format!("GroupedConv2d({} x {})", self.groups(), self.banks[0].describe())
    }
}
