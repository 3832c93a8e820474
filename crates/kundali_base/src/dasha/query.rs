//! Active-period lookup in a dasha tree.

use serde::Serialize;

use super::tree::DashaTree;
use super::types::{DashaLevel, DashaLord, DashaNode, DashaSystem};

/// One active period, without its subtree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActivePeriod {
    pub lord: DashaLord,
    pub level: DashaLevel,
    pub start_jd: f64,
    pub end_jd: f64,
}

impl From<&DashaNode> for ActivePeriod {
    fn from(node: &DashaNode) -> Self {
        Self {
            lord: node.lord,
            level: node.level,
            start_jd: node.start_jd,
            end_jd: node.end_jd,
        }
    }
}

/// Active periods at a specific date, outermost first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashaSnapshot {
    pub system: DashaSystem,
    pub query_jd: f64,
    /// periods[0] = active mahadasha, [1] = active antardasha, ...
    /// Empty when the query falls outside the tree.
    pub periods: Vec<ActivePeriod>,
}

impl DashaSnapshot {
    /// Active lord at `level`, if the tree reaches that deep.
    pub fn lord_at(&self, level: DashaLevel) -> Option<DashaLord> {
        self.periods.get(level as usize).map(|p| p.lord)
    }
}

/// Walk down from `nodes`, picking the unique node with `start <= jd < end`
/// at each level.
pub fn active_periods(nodes: &[DashaNode], jd: f64) -> Vec<ActivePeriod> {
    let mut out = Vec::new();
    let mut level = nodes;
    while let Some(node) = level.iter().find(|n| n.contains(jd)) {
        out.push(ActivePeriod::from(node));
        level = &node.children;
    }
    out
}

/// All nodes at one level, in time order.
pub fn periods_at_level(nodes: &[DashaNode], level: DashaLevel) -> Vec<&DashaNode> {
    let mut out = Vec::new();
    collect_level(nodes, level, &mut out);
    out
}

fn collect_level<'a>(nodes: &'a [DashaNode], level: DashaLevel, out: &mut Vec<&'a DashaNode>) {
    for node in nodes {
        if node.level == level {
            out.push(node);
        } else if node.level < level {
            collect_level(&node.children, level, out);
        }
    }
}

impl DashaTree {
    /// Active periods at `jd`.
    pub fn snapshot(&self, jd: f64) -> DashaSnapshot {
        DashaSnapshot {
            system: self.system,
            query_jd: jd,
            periods: active_periods(&self.periods, jd),
        }
    }

    /// All nodes at `level`, in time order.
    pub fn level(&self, level: DashaLevel) -> Vec<&DashaNode> {
        periods_at_level(&self.periods, level)
    }
}
