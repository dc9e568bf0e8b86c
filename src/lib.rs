//! # Caffe Feat
//!
//! `caffe_feat`把[Caffe](https://caffe.berkeleyvision.org)风格的分层卷积网络描述
//! 编译成纯rust的特征变换：给定网络中的某个张量名，得到一个把RGB图像映射为该张量的函数，
//! 同时给出该张量相对输入的下采样率与感受野，以及计算它所需的最小子网络。
//!
//! - [`net`]：网络描述、拓扑分析（rate/field）、子图提取与模型读写；
//! - [`feat`]：编译器与可执行的变换；
//! - [`tensor`]：[C, H, W]特征图；
//! - [`vision`]：图像与张量之间的转换。
//!

pub mod errors;
pub mod feat;
pub mod net;
pub mod tensor;
pub mod utils;
pub mod vision;
