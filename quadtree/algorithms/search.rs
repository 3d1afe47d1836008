use tracing::debug;

use super::super::error::IndexError;
use super::super::index::QuadtreeIndex;
use super::super::node::{Quadrant, SpatialNode};
use super::super::point::Point;
use super::super::region::Region;

/// 查询操作相关算法
impl SpatialNode {
    /// 递归范围查询
    ///
    /// 节点区域与查询范围不相交（闭区间判断）时直接返回；
    /// 否则把缓冲区中落在范围内（半开区间判断）的点追加到 `found`，
    /// 再按 NW、NE、SW、SE 的顺序无条件访问四个子节点。
    pub fn query(&self, range: &Region, found: &mut Vec<Point>) {
        if !self.intersects(range) {
            return;
        }

        found.extend(self.points.iter().filter(|p| range.contains_point(p)));

        if let Some(children) = self.children() {
            for quadrant in Quadrant::ALL {
                children[quadrant.index()].query(range, found);
            }
        }
    }
}

/// 索引级别的查询接口
impl QuadtreeIndex {
    /// 返回落在 `range` 内的所有点
    ///
    /// 与世界区域不相交的范围得到空结果，而不是错误。
    pub fn query_range(&self, range: &Region) -> Vec<Point> {
        let mut found = Vec::new();
        self.root().query(range, &mut found);
        found
    }

    /// 计算某个缩放级别的可见窗口
    ///
    /// 窗口锚定在世界原点，宽高为世界宽高除以缩放级别。
    /// 缩放级别必须为正的有限值。
    ///
    /// 窗口边界溢出为无穷大时截断到世界边界，查询结果不变；
    /// 窗口小到舍入后不再有面积时返回 `None`。
    pub fn visible_window(&self, zoom_level: f64) -> Result<Option<Region>, IndexError> {
        if !(zoom_level > 0.0 && zoom_level.is_finite()) {
            return Err(IndexError::invalid(format!(
                "zoom level must be a positive finite number, got {}",
                zoom_level
            )));
        }

        let world = self.world();
        let edge = |origin: f64, size: f64, world_max: f64| {
            let max = origin + size / zoom_level;
            if max.is_finite() {
                max
            } else {
                world_max
            }
        };
        let max_x = edge(world.origin_x(), world.width(), world.max_x());
        let max_y = edge(world.origin_y(), world.height(), world.max_y());

        if !(world.origin_x() < max_x && world.origin_y() < max_y) {
            return Ok(None);
        }
        Region::from_edges(world.origin_x(), world.origin_y(), max_x, max_y).map(Some)
    }

    /// 细节层次查询：返回当前缩放级别可见窗口内的点
    pub fn query_level_of_detail(&self, zoom_level: f64) -> Result<Vec<Point>, IndexError> {
        let Some(window) = self.visible_window(zoom_level)? else {
            debug!(zoom_level, "visible window encloses no area");
            return Ok(Vec::new());
        };
        let found = self.query_range(&window);
        debug!(zoom_level, window = %window, points = found.len(), "level of detail query");
        Ok(found)
    }
}
