use crate::errors::NetError;
use crate::feat::{TraitTransform, check_channels};
use crate::tensor::Tensor;

/// 取正部：output = max(input, 0)
#[derive(Debug, Clone)]
pub struct Relu {
    channels: usize,
}

impl Relu {
    pub fn new(channels: usize) -> Self {
        Self { channels }
    }
}

impl TraitTransform for Relu {
    fn in_channels(&self) -> usize {
        self.channels
    }

    fn out_channels(&self) -> usize {
        self.channels
    }

    fn apply(&self, input: &Tensor) -> Result<Tensor, NetError> {
        check_channels("Relu", self.channels, input)?;
        Ok(input.map(|x| x.max(0.)))
    }

    fn describe(&self) -> String {
        format!("Relu({})", self.channels)
    }
}
