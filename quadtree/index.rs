use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::IndexError;
use super::node::SpatialNode;
use super::point::Point;
use super::region::Region;

/// 构建时对世界区域之外的点的处理策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutOfBoundsPolicy {
    /// 丢弃并计数（记录一条警告日志）
    #[default]
    Drop,
    /// 遇到第一个越界点即构建失败
    Reject,
}

/// 索引构建参数
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    /// 每个节点细分前直接存放的最大点数
    pub capacity: usize,
    /// 最大深度，到达后节点不再细分
    pub max_depth: u32,
    pub out_of_bounds: OutOfBoundsPolicy,
}

impl BuildOptions {
    pub const DEFAULT_CAPACITY: usize = 4;
    pub const DEFAULT_MAX_DEPTH: u32 = 32;

    pub fn new(capacity: usize) -> Self {
        BuildOptions {
            capacity,
            ..Default::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_out_of_bounds(mut self, policy: OutOfBoundsPolicy) -> Self {
        self.out_of_bounds = policy;
        self
    }

    fn validate(&self) -> Result<(), IndexError> {
        if self.capacity == 0 {
            return Err(IndexError::invalid("capacity must be a positive integer"));
        }
        if self.max_depth == 0 {
            return Err(IndexError::invalid("max_depth must be a positive integer"));
        }
        Ok(())
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            capacity: Self::DEFAULT_CAPACITY,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            out_of_bounds: OutOfBoundsPolicy::Drop,
        }
    }
}

/// 索引统计信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub points: usize,
    pub dropped: usize,
    pub nodes: usize,
    pub leaves: usize,
    pub height: usize,
}

/// 四叉树索引主结构
///
/// 一次性由点序列构建，构建后不可变，可以被任意多次、任意多个线程同时查询。
#[derive(Debug, Clone)]
pub struct QuadtreeIndex {
    /// 根节点，覆盖整个世界区域
    root: SpatialNode,
    world: Region,
    options: BuildOptions,
    /// 构建时被丢弃的越界点数量
    dropped: usize,
}

impl QuadtreeIndex {
    /// 使用默认策略（丢弃越界点并计数）构建索引
    pub fn build<I>(points: I, world: Region, capacity: usize) -> Result<Self, IndexError>
    where
        I: IntoIterator<Item = Point>,
    {
        Self::build_with(points, world, &BuildOptions::new(capacity))
    }

    /// 使用指定参数构建索引
    ///
    /// 按输入顺序逐个插入。任何失败都会丢弃整棵树，不存在部分构建成功的索引。
    pub fn build_with<I>(
        points: I,
        world: Region,
        options: &BuildOptions,
    ) -> Result<Self, IndexError>
    where
        I: IntoIterator<Item = Point>,
    {
        options.validate()?;

        let mut root = SpatialNode::new(world, options.capacity, options.max_depth);
        let mut dropped = 0;

        for point in points {
            if root.insert(point)? {
                continue;
            }
            match options.out_of_bounds {
                OutOfBoundsPolicy::Drop => dropped += 1,
                OutOfBoundsPolicy::Reject => return Err(IndexError::OutOfBounds { point, world }),
            }
        }

        let index = QuadtreeIndex {
            root,
            world,
            options: options.clone(),
            dropped,
        };

        if dropped > 0 {
            warn!(dropped, world = %world, "dropped points outside the world region");
        }
        let stats = index.stats();
        info!(
            points = stats.points,
            nodes = stats.nodes,
            height = stats.height,
            capacity = options.capacity,
            "built quadtree index"
        );

        Ok(index)
    }

    pub fn root(&self) -> &SpatialNode {
        &self.root
    }

    /// 构建时使用的世界区域
    pub fn world(&self) -> &Region {
        &self.world
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// 已存储的点数
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// 构建时被丢弃的越界点数量
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            points: self.len(),
            dropped: self.dropped,
            nodes: self.root.node_count(),
            leaves: self.root.leaf_count(),
            height: self.root.height(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadtree::node::NodeKind;

    fn world() -> Region {
        Region::new(0.0, 0.0, 100.0, 100.0).unwrap()
    }

    fn points(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().copied().map(Point::from).collect()
    }

    /// 递归检查每个节点：点在区域内、容量未超限、子节点恰好铺满父区域
    fn check_node(node: &SpatialNode) {
        for p in node.points() {
            assert!(node.contains(p), "{} outside {}", p, node.region());
        }
        if !node.is_subdivided() && node.depth() < BuildOptions::DEFAULT_MAX_DEPTH {
            assert!(node.points().len() <= node.capacity());
        }

        if let Some(children) = node.children() {
            assert_eq!(node.points().len(), node.capacity());

            let parent_area = node.region().area();
            let child_area: f64 = children.iter().map(|c| c.region().area()).sum();
            assert!((parent_area - child_area).abs() <= parent_area * 1e-12);

            for (i, a) in children.iter().enumerate() {
                assert!(
                    node.region().intersection_area(a.region()) > 0.0,
                    "child {} lies outside its parent",
                    a.region()
                );
                for b in &children[i + 1..] {
                    assert_eq!(a.region().intersection_area(b.region()), 0.0);
                }
                check_node(a);
            }
        }
    }

    #[test]
    fn test_round_trip_scenario() {
        let index = QuadtreeIndex::build(
            points(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0), (4.0, 4.0), (5.0, 5.0)]),
            world(),
            4,
        )
        .unwrap();

        assert_eq!(index.len(), 5);
        assert_eq!(index.dropped(), 0);
        assert!(index.root().is_subdivided());
        assert!(matches!(index.root().kind(), NodeKind::Internal(_)));
    }

    #[test]
    fn test_empty_input() {
        let index = QuadtreeIndex::build(Vec::new(), world(), 4).unwrap();

        assert!(index.is_empty());
        assert!(!index.root().is_subdivided());
        assert_eq!(
            index.stats(),
            IndexStats {
                points: 0,
                dropped: 0,
                nodes: 1,
                leaves: 1,
                height: 1,
            }
        );
    }

    #[test]
    fn test_invalid_options() {
        assert!(matches!(
            QuadtreeIndex::build(Vec::new(), world(), 0),
            Err(IndexError::InvalidArgument(_))
        ));
        let options = BuildOptions::new(4).with_max_depth(0);
        assert!(QuadtreeIndex::build_with(Vec::new(), world(), &options).is_err());
    }

    #[test]
    fn test_out_of_bounds_dropped_and_counted() {
        let input = points(&[(1.0, 1.0), (100.0, 50.0), (-0.5, 3.0), (99.9, 99.9)]);
        let index = QuadtreeIndex::build(input, world(), 4).unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.dropped(), 2);
        assert_eq!(index.stats().dropped, 2);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let input = points(&[(1.0, 1.0), (150.0, 50.0), (-0.5, 3.0)]);
        let options = BuildOptions::new(4).with_out_of_bounds(OutOfBoundsPolicy::Reject);

        let err = QuadtreeIndex::build_with(input, world(), &options).unwrap_err();
        assert_eq!(
            err,
            IndexError::OutOfBounds {
                point: Point::new(150.0, 50.0),
                world: world(),
            }
        );
    }

    #[test]
    fn test_tree_invariants_hold_for_dense_input() {
        // 规则网格 + 重复点，覆盖切分线上的点
        let mut input = Vec::new();
        for i in 0..40 {
            for j in 0..40 {
                input.push(Point::new(i as f64 * 2.5, j as f64 * 2.5));
            }
        }
        input.extend(std::iter::repeat(Point::new(50.0, 50.0)).take(20));

        let index = QuadtreeIndex::build(input.clone(), world(), 3).unwrap();
        assert_eq!(index.len(), input.len());
        assert_eq!(index.dropped(), 0);
        check_node(index.root());
    }

    #[test]
    fn test_stats_count_nodes() {
        let input = points(&[(10.0, 10.0), (60.0, 10.0), (10.0, 60.0)]);
        let index = QuadtreeIndex::build(input, world(), 1).unwrap();

        let stats = index.stats();
        assert_eq!(stats.points, 3);
        assert_eq!(stats.nodes, 5);
        assert_eq!(stats.leaves, 4);
        assert_eq!(stats.height, 2);
    }
}
