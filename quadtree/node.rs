use serde::{Deserialize, Serialize};

use super::point::Point;
use super::region::Region;

/// 象限，固定顺序 NW、NE、SW、SE
///
/// y 轴向下，"北"为 y 较小的一半。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quadrant {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Quadrant {
    /// 插入与查询时访问子节点的顺序
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// 节点形态
///
/// 叶子节点只有自身的点缓冲区；内部节点额外拥有四个子节点。
/// 节点只能从叶子变为内部节点，不存在反向转换。
#[derive(Debug, Clone)]
pub enum NodeKind {
    Leaf,
    Internal(Box<[SpatialNode; 4]>),
}

/// 四叉树节点
///
/// 拥有一个区域、一个最多容纳 `capacity` 个点的缓冲区，
/// 以及细分之后的四个子节点（每个覆盖父区域的一个象限）。
#[derive(Debug, Clone)]
pub struct SpatialNode {
    /// 节点覆盖的区域
    pub(crate) region: Region,

    /// 细分前直接存放的最大点数
    pub(crate) capacity: usize,

    /// 节点深度，根节点为 0
    pub(crate) depth: u32,

    /// 节点允许的最大深度，到达后不再细分
    pub(crate) max_depth: u32,

    /// 直接存放在该节点上的点，按插入顺序排列
    ///
    /// 细分后这些点仍留在父节点上，不会下推到子节点。
    pub(crate) points: Vec<Point>,

    pub(crate) kind: NodeKind,
}

impl SpatialNode {
    /// 创建新的空叶子节点
    pub fn new(region: Region, capacity: usize, max_depth: u32) -> Self {
        Self::with_depth(region, capacity, 0, max_depth)
    }

    pub(crate) fn with_depth(region: Region, capacity: usize, depth: u32, max_depth: u32) -> Self {
        SpatialNode {
            region,
            capacity,
            depth,
            max_depth,
            points: Vec::with_capacity(capacity),
            kind: NodeKind::Leaf,
        }
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// 直接存放在该节点上的点
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_subdivided(&self) -> bool {
        matches!(self.kind, NodeKind::Internal(_))
    }

    /// 子节点（仅内部节点）
    pub fn children(&self) -> Option<&[SpatialNode; 4]> {
        match &self.kind {
            NodeKind::Leaf => None,
            NodeKind::Internal(children) => Some(&**children),
        }
    }

    /// 指定象限的子节点（仅内部节点）
    pub fn child(&self, quadrant: Quadrant) -> Option<&SpatialNode> {
        self.children().map(|children| &children[quadrant.index()])
    }

    /// 判断点是否属于该节点的区域（半开区间）
    pub fn contains(&self, point: &Point) -> bool {
        self.region.contains_point(point)
    }

    /// 判断查询范围是否与该节点的区域相交（闭区间）
    pub fn intersects(&self, range: &Region) -> bool {
        self.region.intersects(range)
    }

    /// 子树中的点总数
    pub fn len(&self) -> usize {
        self.points.len()
            + self
                .children()
                .map_or(0, |children| children.iter().map(SpatialNode::len).sum())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 子树中的节点总数（包括自身）
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .map_or(0, |children| children.iter().map(SpatialNode::node_count).sum())
    }

    /// 子树中的叶子节点数
    pub fn leaf_count(&self) -> usize {
        match self.children() {
            None => 1,
            Some(children) => children.iter().map(SpatialNode::leaf_count).sum(),
        }
    }

    /// 子树高度，单个叶子节点为 1
    pub fn height(&self) -> usize {
        1 + self.children().map_or(0, |children| {
            children.iter().map(SpatialNode::height).max().unwrap_or(0)
        })
    }
}
