use serde::Serialize;

use super::super::index::{IndexStats, QuadtreeIndex};
use super::super::node::SpatialNode;
use super::super::point::Point;
use super::super::region::Region;

/// 用于JSON序列化的树结构
#[derive(Debug, Serialize)]
pub struct TreeVisualization {
    /// 世界区域
    pub world: Region,
    pub capacity: usize,
    pub stats: IndexStats,
    pub root: NodeVisualization,
}

/// 用于JSON序列化的节点结构
#[derive(Debug, Serialize)]
pub struct NodeVisualization {
    pub region: Region,
    pub depth: u32,
    /// 直接存放在该节点上的点
    pub points: Vec<Point>,
    /// 子节点（按 NW、NE、SW、SE 顺序，叶子节点为空）
    pub children: Vec<NodeVisualization>,
}

impl QuadtreeIndex {
    /// 导出树结构为JSON格式
    ///
    /// 返回包含完整树结构的JSON字符串，用于前端可视化
    pub fn export_to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.create_tree_visualization())
    }

    fn create_tree_visualization(&self) -> TreeVisualization {
        TreeVisualization {
            world: *self.world(),
            capacity: self.options().capacity,
            stats: self.stats(),
            root: create_node_visualization(self.root()),
        }
    }
}

/// 递归创建节点的可视化结构
fn create_node_visualization(node: &SpatialNode) -> NodeVisualization {
    NodeVisualization {
        region: *node.region(),
        depth: node.depth(),
        points: node.points().to_vec(),
        children: node
            .children()
            .map(|children| children.iter().map(create_node_visualization).collect())
            .unwrap_or_default(),
    }
}
