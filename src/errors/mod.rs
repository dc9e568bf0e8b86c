/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 网络分析、编译与执行阶段共用的错误类型
 *
 * 分类：
 * - MalformedGraph：网络结构本身有问题（缺层、多个原地层、输入数不对、成环……）
 * - UnsupportedConfiguration：结构合法，但本库不支持该配置（填充、均值池化、leaky ReLU……）
 * - DimensionMismatch：blob/通道数等与结构推导出的期望不一致
 * 以上三类都是编译期的致命错误，不做任何默认值兜底或截断。
 */

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetError {
    /// `name`为出错的层名或张量名
    #[error("网络结构错误（{name}）：{message}")]
    MalformedGraph { name: String, message: String },

    #[error("层`{layer}`的配置不受支持：{message}")]
    UnsupportedConfiguration { layer: String, message: String },

    #[error("层`{layer}`维度不匹配：{message}，期望{expected:?}，实际{got:?}")]
    DimensionMismatch {
        layer: String,
        expected: Vec<usize>,
        got: Vec<usize>,
        message: String,
    },

    /// 运行期：送入变换的张量不符合要求
    #[error("输入无效：{0}")]
    InvalidInput(String),

    /// 参照实现（外部进程等）返回失败
    #[error("参照实现出错：{0}")]
    Reference(String),

    #[error("文件未找到: {0}")]
    FileNotFound(PathBuf),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bincode 错误: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("读取npy失败: {0}")]
    Npy(#[from] ndarray_npy::ReadNpyError),

    #[error("图像错误: {0}")]
    Image(#[from] image::ImageError),
}

impl NetError {
    pub(crate) fn malformed(name: &str, message: impl Into<String>) -> Self {
        Self::MalformedGraph {
            name: name.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn unsupported(layer: &str, message: impl Into<String>) -> Self {
        Self::UnsupportedConfiguration {
            layer: layer.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn dimension(
        layer: &str,
        expected: &[usize],
        got: &[usize],
        message: impl Into<String>,
    ) -> Self {
        Self::DimensionMismatch {
            layer: layer.to_string(),
            expected: expected.to_vec(),
            got: got.to_vec(),
            message: message.into(),
        }
    }
}
