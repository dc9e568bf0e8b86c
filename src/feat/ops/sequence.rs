/*
 * @Author       : 老董
 * @Date         : 2026-03-10
 * @Description  : 变换的串联：先内层（inner）后外层（outer）
 */

use crate::errors::NetError;
use crate::feat::{TraitTransform, Transform};
use crate::tensor::Tensor;

#[derive(Debug, Clone)]
pub struct Sequence {
    inner: Box<Transform>,
    outer: Box<Transform>,
}

impl Sequence {
    /// `outer`的输入通道数必须等于`inner`的输出通道数；`layer`仅用于报错
    pub fn new(inner: Transform, outer: Transform, layer: &str) -> Result<Self, NetError> {
        if outer.in_channels() != inner.out_channels() {
            return Err(NetError::dimension(
                layer,
                &[inner.out_channels()],
                &[outer.in_channels()],
                format!(
                    "串联时通道数不一致：{} 之后接 {}",
                    inner.describe(),
                    outer.describe()
                ),
            ));
        }
        Ok(Self {
            inner: Box::new(inner),
            outer: Box::new(outer),
        })
    }

    pub fn inner(&self) -> &Transform {
        &self.inner
    }

    pub fn outer(&self) -> &Transform {
        &self.outer
    }
}

impl TraitTransform for Sequence {
    fn in_channels(&self) -> usize {
        self.inner.in_channels()
    }

    fn out_channels(&self) -> usize {
        self.outer.out_channels()
    }

    fn apply(&self, input: &Tensor) -> Result<Tensor, NetError> {
        let hidden = self.inner.apply(input)?;
        self.outer.apply(&hidden)
    }

    fn describe(&self) -> String {
        format!("{} -> {}", self.inner.describe(), self.outer.describe())
    }
}
