/*
 * @Author       : 老董
 * @Date         : 2026-03-05
 * @Description  : 子图提取：计算出某个张量所需的最小层集合（祖先层 + 挂在其上的原地层），
 *                 按原网络中的相对顺序输出一个新网络，不修改原网络
 */

use super::{NetIndex, Network};
use crate::errors::NetError;
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

struct Walk<'a> {
    index: NetIndex<'a>,
    marks: HashMap<&'a str, Mark>,
    layers: HashSet<&'a str>,
}

/// 取出计算`output`所需的子网络
pub fn subset_for_output(net: &Network, output: &str) -> Result<Network, NetError> {
    let mut walk = Walk {
        index: NetIndex::new(net)?,
        marks: HashMap::new(),
        layers: HashSet::new(),
    };
    walk.visit(output)?;

    let layers: Vec<_> = net
        .layers
        .iter()
        .filter(|layer| walk.layers.contains(layer.name.as_str()))
        .cloned()
        .collect();
    debug!(
        "`{}`的子网络保留{}/{}层：{:?}",
        output,
        layers.len(),
        net.layers.len(),
        layers.iter().map(|l| l.name.as_str()).collect::<Vec<_>>()
    );

    Ok(Network {
        layers,
        ..net.clone_without_layers()
    })
}

impl<'a> Walk<'a> {
    fn visit(&mut self, name: &'a str) -> Result<(), NetError> {
        if self.index.is_input(name) {
            return Ok(());
        }
        match self.marks.get(name) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                return Err(NetError::malformed(name, "反向遍历时遇到环"));
            }
            None => {}
        }
        self.marks.insert(name, Mark::Visiting);

        let layer = self.index.producer(name)?;
        self.layers.insert(&layer.name);
        for bottom in &layer.bottom {
            self.visit(bottom)?;
        }
        // 原地层视为该张量的一部分，随宿主层一并纳入
        if let Some(followup) = self.index.in_place_followup(name) {
            self.layers.insert(&followup.name);
        }

        self.marks.insert(name, Mark::Done);
        Ok(())
    }
}

impl Network {
    /// 复制除层列表外的所有字段
    fn clone_without_layers(&self) -> Self {
        Self {
            name: self.name.clone(),
            input: self.input.clone(),
            input_dim: self.input_dim.clone(),
            layers: Vec::new(),
        }
    }
}
