mod channel_bias_add;
mod conv2d;
mod grouped_conv2d;
mod local_response_norm;
mod max_pool2d;
mod preprocess;
mod relu;
mod sequence;

pub use channel_bias_add::ChannelBiasAdd;
pub use conv2d::Conv2d;
pub use grouped_conv2d::GroupedConv2d;
pub use local_response_norm::LocalResponseNorm;
pub use max_pool2d::MaxPool2d;
pub use preprocess::Preprocess;
pub use relu::Relu;
pub use sequence::Sequence;
