/*
 * @Author       : 老董
 * @Date         : 2026-03-05
 * @Description  : 拓扑分析：从某个张量沿唯一输入链反向走到声明的输入，
 *                 计算累计下采样率（rate）与感受野（field）
 *
 * 递推（每个空间轴独立）：
 *   rate  = k * rate_c
 *   field = (p - 1) * rate_c + field_c
 * 其中 k 为该层步长，p 为该层核尺寸，(rate_c, field_c) 为其输入张量的结果。
 * 仅支持卷积、池化与LRN（LRN 视为 k = 1, p = 1）；原地层不参与计算。
 */

use super::{LayerKind, NetIndex, Network};
use crate::errors::NetError;
use std::collections::HashSet;

/// 同时计算下采样率与感受野 (fieldH, fieldW)
pub fn rate_and_field(net: &Network, name: &str) -> Result<(usize, (usize, usize)), NetError> {
    let index = NetIndex::new(net)?;
    rate_field_helper(&index, name, &mut HashSet::new())
}

/// 累计下采样率
pub fn layer_rate(net: &Network, name: &str) -> Result<usize, NetError> {
    rate_and_field(net, name).map(|(rate, _)| rate)
}

/// 感受野 (fieldH, fieldW)
pub fn layer_field(net: &Network, name: &str) -> Result<(usize, usize), NetError> {
    rate_and_field(net, name).map(|(_, field)| field)
}

/// 输入尺寸为`input`（H, W）时，张量`name`的输出尺寸。
/// 卷积与LRN只取完整窗口：floor((n - p) / k) + 1；池化按[`pooled_len`]向上取整。
pub fn layer_size(
    net: &Network,
    name: &str,
    input: (usize, usize),
) -> Result<(usize, usize), NetError> {
    let index = NetIndex::new(net)?;
    size_helper(&index, name, input, &mut HashSet::new())
}

/// 每层的 (步长k, 核尺寸p)
fn stride_and_kernel(index: &NetIndex, name: &str) -> Result<(usize, (usize, usize)), NetError> {
    let (layer, _) = index.single_input_producer(name)?;
    let (k, (ph, pw)) = match &layer.kind {
        LayerKind::Convolution(param) => (param.stride, param.kernel()),
        LayerKind::Pooling(param) => (param.stride, param.kernel()),
        LayerKind::Lrn(_) => (1, (1, 1)),
        LayerKind::Relu(_) | LayerKind::Unsupported(_) => {
            return Err(NetError::unsupported(
                &layer.name,
                format!("拓扑分析不处理该层类型：{}", layer.kind.type_name()),
            ));
        }
    };
    if k == 0 || ph == 0 || pw == 0 {
        return Err(NetError::unsupported(
            &layer.name,
            format!("步长与核尺寸须为正，实际步长{k}、核{ph}x{pw}"),
        ));
    }
    Ok((k, (ph, pw)))
}

fn enter<'a>(visiting: &mut HashSet<&'a str>, name: &'a str) -> Result<(), NetError> {
    if !visiting.insert(name) {
        return Err(NetError::malformed(name, "反向遍历时遇到环"));
    }
    Ok(())
}

fn rate_field_helper<'a>(
    index: &NetIndex<'a>,
    name: &'a str,
    visiting: &mut HashSet<&'a str>,
) -> Result<(usize, (usize, usize)), NetError> {
    if index.is_input(name) {
        return Ok((1, (1, 1)));
    }
    enter(visiting, name)?;
    let (k, (ph, pw)) = stride_and_kernel(index, name)?;
    let (_, bottom) = index.single_input_producer(name)?;
    let (rate, (fh, fw)) = rate_field_helper(index, bottom, visiting)?;
    Ok((k * rate, ((ph - 1) * rate + fh, (pw - 1) * rate + fw)))
}

fn size_helper<'a>(
    index: &NetIndex<'a>,
    name: &'a str,
    input: (usize, usize),
    visiting: &mut HashSet<&'a str>,
) -> Result<(usize, usize), NetError> {
    if index.is_input(name) {
        return Ok(input);
    }
    enter(visiting, name)?;
    let (k, (ph, pw)) = stride_and_kernel(index, name)?;
    let (layer, bottom) = index.single_input_producer(name)?;
    let (h, w) = size_helper(index, bottom, input, visiting)?;
    if h < ph || w < pw {
        return Err(NetError::dimension(
            &layer.name,
            &[ph, pw],
            &[h, w],
            "输入尺寸小于核尺寸",
        ));
    }
    let len = |n: usize, p: usize| match layer.kind {
        LayerKind::Pooling(_) => pooled_len(n, p, k),
        _ => (n - p) / k + 1,
    };
    Ok((len(h, ph), len(w, pw)))
}

/// 池化输出长度：ceil((n - p) / k) + 1，末尾窗口越界的部分截掉；
/// 若最后一个窗口的起点已落在输入之外，则舍去该窗口。要求 n ≥ p、k > 0。
pub(crate) fn pooled_len(n: usize, p: usize, k: usize) -> usize {
    let len = (n - p).div_ceil(k) + 1;
    if (len - 1) * k >= n { len - 1 } else { len }
}
