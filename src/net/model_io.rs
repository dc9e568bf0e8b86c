/*
 * @Author       : 老董
 * @Date         : 2026-03-06
 * @Description  : 网络的保存与加载（JSON 描述 / bincode 含权重），以及均值的读取
 *
 * 原始网络定义与权重文件的解码不在本库范围内；这里只负责把已解码的
 * `Network`在本库自己的格式之间往返。
 */

use super::Network;
use crate::errors::NetError;
use ndarray::{Array3, Axis};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

impl Network {
    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String, NetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, NetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// 以 bincode 格式（含blob）保存到本地
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), NetError> {
        let writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(writer, self)?;
        Ok(())
    }

    /// 从本地加载 bincode 格式的网络
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, NetError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(NetError::FileNotFound(path.to_path_buf()));
        }
        let reader = BufReader::new(File::open(path)?);
        Ok(bincode::deserialize_from(reader)?)
    }
}

/// 解析形如"104,117,123"的三通道均值
pub fn parse_mean(s: &str) -> Result<[f32; 3], NetError> {
    let parts: Vec<&str> = s.split(',').collect();
    let [r, g, b] = parts.as_slice() else {
        return Err(NetError::InvalidInput(format!(
            "均值须恰有3个元素，实际为{}个",
            parts.len()
        )));
    };
    let parse = |x: &str| {
        x.trim()
            .parse::<f32>()
            .map_err(|e| NetError::InvalidInput(format!("无法解析均值`{x}`：{e}")))
    };
    Ok([parse(*r)?, parse(*g)?, parse(*b)?])
}

/// 从形状为 [3, H, W] 的`.npy`均值图像中求各通道的空间均值
pub fn load_mean_npy<P: AsRef<Path>>(path: P) -> Result<[f32; 3], NetError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(NetError::FileNotFound(path.to_path_buf()));
    }
    let image: Array3<f64> = ndarray_npy::read_npy(path)?;
    if image.dim().0 != 3 {
        return Err(NetError::InvalidInput(format!(
            "均值图像须为3通道，实际形状为{:?}",
            image.shape()
        )));
    }
    let mean = image
        .mean_axis(Axis(2))
        .and_then(|rows| rows.mean_axis(Axis(1)))
        .ok_or_else(|| NetError::InvalidInput("均值图像为空".to_string()))?;
    Ok([mean[0] as f32, mean[1] as f32, mean[2] as f32])
}
