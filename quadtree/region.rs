use std::fmt;

use serde::Serialize;

use super::error::IndexError;
use super::point::Point;

/// 轴对齐矩形区域
///
/// 以 `(origin_x, origin_y, width, height)` 描述，内部保存最小/最大边。
/// 点归属采用半开区间：`min <= p < max`。宽高必须为正且有限。
///
/// 最大边只在构造时计算一次，相邻区域共享同一个 `f64` 边界值，
/// 因此细分后的四个象限之间不会因为舍入产生缝隙或重叠。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Region {
    pub(crate) min: [f64; 2], // [x_min, y_min]
    pub(crate) max: [f64; 2], // [x_max, y_max]
}

impl Region {
    /// 创建新的区域
    ///
    /// 原点非有限、宽高非正或非有限时返回 `InvalidArgument`。
    pub fn new(origin_x: f64, origin_y: f64, width: f64, height: f64) -> Result<Self, IndexError> {
        if !origin_x.is_finite() || !origin_y.is_finite() {
            return Err(IndexError::invalid(format!(
                "region origin ({}, {}) must be finite",
                origin_x, origin_y
            )));
        }
        if !(width > 0.0 && width.is_finite()) || !(height > 0.0 && height.is_finite()) {
            return Err(IndexError::invalid(format!(
                "region size {} x {} must be positive and finite",
                width, height
            )));
        }
        Self::from_edges(origin_x, origin_y, origin_x + width, origin_y + height)
    }

    /// 由最小/最大边创建区域
    pub fn from_edges(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self, IndexError> {
        // 原点数值过大时 origin + size 可能被舍入回 origin
        if !(min_x < max_x && min_y < max_y) || !max_x.is_finite() || !max_y.is_finite() {
            return Err(IndexError::invalid(format!(
                "region edges [{}, {}) x [{}, {}) enclose no area",
                min_x, max_x, min_y, max_y
            )));
        }
        Ok(Region {
            min: [min_x, min_y],
            max: [max_x, max_y],
        })
    }

    pub fn origin_x(&self) -> f64 {
        self.min[0]
    }

    pub fn origin_y(&self) -> f64 {
        self.min[1]
    }

    pub fn max_x(&self) -> f64 {
        self.max[0]
    }

    pub fn max_y(&self) -> f64 {
        self.max[1]
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    /// 计算区域面积
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// 区域中点，即细分时的切分线
    pub fn center(&self) -> Point {
        Point::new(
            self.min[0] + self.width() / 2.0,
            self.min[1] + self.height() / 2.0,
        )
    }

    /// 判断点是否属于该区域（半开区间）
    ///
    /// NaN 坐标永远不属于任何区域。
    pub fn contains_point(&self, point: &Point) -> bool {
        self.min[0] <= point.x
            && point.x < self.max[0]
            && self.min[1] <= point.y
            && point.y < self.max[1]
    }

    /// 判断两个区域是否相交（闭区间）
    ///
    /// 只有当一个区域完全位于另一个的左、右、上、下方时才不相交，
    /// 边界恰好接触也算相交，这样边界上的点不会被漏掉。
    pub fn intersects(&self, other: &Region) -> bool {
        !(other.min[0] > self.max[0]
            || other.max[0] < self.min[0]
            || other.min[1] > self.max[1]
            || other.max[1] < self.min[1])
    }

    /// 计算两个区域的交集面积，边界接触时为 0
    pub fn intersection_area(&self, other: &Region) -> f64 {
        if !self.intersects(other) {
            return 0.0;
        }

        let x_overlap = self.max[0].min(other.max[0]) - self.min[0].max(other.min[0]);
        let y_overlap = self.max[1].min(other.max[1]) - self.min[1].max(other.min[1]);

        x_overlap.max(0.0) * y_overlap.max(0.0)
    }

    /// 切分为四个象限，顺序为 NW、NE、SW、SE
    ///
    /// 在每个轴的中点切分（y 轴向下，"北"为 y 较小的一半）。
    /// 区域已小到中点与边界重合时返回 `None`。
    pub(crate) fn quadrants(&self) -> Option<[Region; 4]> {
        let mid = self.center();
        if !(self.min[0] < mid.x && mid.x < self.max[0])
            || !(self.min[1] < mid.y && mid.y < self.max[1])
        {
            return None;
        }

        let (x0, x1, x2) = (self.min[0], mid.x, self.max[0]);
        let (y0, y1, y2) = (self.min[1], mid.y, self.max[1]);
        Some([
            Region { min: [x0, y0], max: [x1, y1] },
            Region { min: [x1, y0], max: [x2, y1] },
            Region { min: [x0, y1], max: [x1, y2] },
            Region { min: [x1, y1], max: [x2, y2] },
        ])
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {} x {}]",
            self.min[0],
            self.min[1],
            self.width(),
            self.height()
        )
    }
}
