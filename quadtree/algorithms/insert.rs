use tracing::trace;

use super::super::error::IndexError;
use super::super::node::{NodeKind, Quadrant, SpatialNode};
use super::super::point::Point;

/// 插入操作相关算法
impl SpatialNode {
    /// 插入一个点
    ///
    /// # 返回值
    /// - `Ok(true)` - 点已存入该节点或其某个子节点
    /// - `Ok(false)` - 点不在该节点的区域内，未存储
    /// - `Err(InvariantViolation)` - 区域内的点被四个子节点全部拒绝
    ///
    /// 缓冲区未满时直接追加；已满时先细分（仅第一次），
    /// 再按 NW、NE、SW、SE 的顺序交给第一个接受它的子节点。
    pub fn insert(&mut self, point: Point) -> Result<bool, IndexError> {
        if !self.contains(&point) {
            return Ok(false);
        }

        if self.points.len() < self.capacity {
            self.points.push(point);
            return Ok(true);
        }

        if matches!(self.kind, NodeKind::Leaf) {
            self.subdivide();
        }

        match &mut self.kind {
            NodeKind::Internal(children) => {
                debug_assert!(
                    children.iter().any(|child| child.contains(&point)),
                    "no quadrant of {} contains {}",
                    self.region,
                    point
                );

                for quadrant in Quadrant::ALL {
                    if children[quadrant.index()].insert(point)? {
                        return Ok(true);
                    }
                }

                Err(IndexError::InvariantViolation {
                    point,
                    region: self.region,
                })
            }
            // 已到最大深度（或区域小到无法再切分），只能继续追加
            NodeKind::Leaf => {
                self.points.push(point);
                Ok(true)
            }
        }
    }

    /// 细分为四个子节点
    ///
    /// 到达最大深度或区域无法再切分时不做任何改变，返回 `false`。
    fn subdivide(&mut self) -> bool {
        if self.is_subdivided() {
            return true;
        }
        if self.depth >= self.max_depth {
            return false;
        }
        let Some([nw, ne, sw, se]) = self.region.quadrants() else {
            return false;
        };

        let (capacity, depth, max_depth) = (self.capacity, self.depth + 1, self.max_depth);
        let child = move |region| SpatialNode::with_depth(region, capacity, depth, max_depth);
        self.kind = NodeKind::Internal(Box::new([child(nw), child(ne), child(sw), child(se)]));

        trace!(region = %self.region, depth = self.depth, "subdivided node");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadtree::region::Region;

    fn world() -> Region {
        Region::new(0.0, 0.0, 100.0, 100.0).unwrap()
    }

    #[test]
    fn test_insert_outside_region_is_rejected() {
        let mut node = SpatialNode::new(world(), 4, 8);
        assert_eq!(node.insert(Point::new(100.0, 5.0)), Ok(false));
        assert_eq!(node.insert(Point::new(-1.0, 5.0)), Ok(false));
        assert_eq!(node.insert(Point::new(f64::NAN, 5.0)), Ok(false));
        assert!(node.is_empty());
    }

    #[test]
    fn test_insert_keeps_insertion_order() {
        let mut node = SpatialNode::new(world(), 4, 8);
        let points = [
            Point::new(90.0, 90.0),
            Point::new(1.0, 1.0),
            Point::new(50.0, 2.0),
        ];
        for p in points {
            assert_eq!(node.insert(p), Ok(true));
        }
        assert_eq!(node.points(), &points);
        assert!(!node.is_subdivided());
    }

    #[test]
    fn test_overflow_subdivides_and_routes_to_quadrant() {
        let mut node = SpatialNode::new(world(), 2, 8);
        node.insert(Point::new(1.0, 1.0)).unwrap();
        node.insert(Point::new(2.0, 2.0)).unwrap();
        assert!(!node.is_subdivided());

        // 第三个点触发细分，落入 SE 象限
        assert_eq!(node.insert(Point::new(75.0, 75.0)), Ok(true));
        assert!(node.is_subdivided());
        assert_eq!(node.points().len(), 2);

        let se = node.child(Quadrant::SouthEast).unwrap();
        assert_eq!(se.points(), &[Point::new(75.0, 75.0)]);
        assert_eq!(se.depth(), 1);
        for q in [Quadrant::NorthWest, Quadrant::NorthEast, Quadrant::SouthWest] {
            assert!(node.child(q).unwrap().is_empty());
        }
        assert_eq!(node.len(), 3);
    }

    #[test]
    fn test_midline_points_go_east_and_south() {
        let mut node = SpatialNode::new(world(), 1, 8);
        node.insert(Point::new(10.0, 10.0)).unwrap();
        node.insert(Point::new(50.0, 10.0)).unwrap();
        node.insert(Point::new(10.0, 50.0)).unwrap();
        node.insert(Point::new(50.0, 50.0)).unwrap();

        assert_eq!(
            node.child(Quadrant::NorthEast).unwrap().points(),
            &[Point::new(50.0, 10.0)]
        );
        assert_eq!(
            node.child(Quadrant::SouthWest).unwrap().points(),
            &[Point::new(10.0, 50.0)]
        );
        assert_eq!(
            node.child(Quadrant::SouthEast).unwrap().points(),
            &[Point::new(50.0, 50.0)]
        );
    }

    #[test]
    fn test_subdivision_is_permanent() {
        let mut node = SpatialNode::new(world(), 1, 8);
        node.insert(Point::new(1.0, 1.0)).unwrap();
        node.insert(Point::new(99.0, 99.0)).unwrap();
        assert!(node.is_subdivided());
        assert_eq!(node.node_count(), 5);

        // 后续插入不会让节点回到叶子状态，也不会重复细分
        node.insert(Point::new(60.0, 10.0)).unwrap();
        assert!(node.is_subdivided());
        assert_eq!(node.node_count(), 5);
    }

    #[test]
    fn test_duplicates_stop_at_max_depth() {
        let mut node = SpatialNode::new(world(), 2, 3);
        for _ in 0..10 {
            assert_eq!(node.insert(Point::new(5.0, 5.0)), Ok(true));
        }
        assert_eq!(node.len(), 10);
        assert_eq!(node.height(), 4);

        let mut deepest = &node;
        while let Some(child) = deepest.child(Quadrant::NorthWest) {
            deepest = child;
        }
        assert_eq!(deepest.depth(), 3);
        assert!(!deepest.is_subdivided());
        assert_eq!(deepest.points().len(), 10 - 2 * 3);
    }
}
