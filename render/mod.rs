//! 渲染接口
//!
//! 索引本身不关心点如何被绘制；细节层次流程只把每一级的点集和标签交给 `Renderer`。

pub mod geojson;
pub mod summary;

pub use self::geojson::GeoJsonRenderer;
pub use self::summary::SummaryRenderer;

use crate::quadtree::Point;

/// 渲染错误类型
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// 点集渲染接口
pub trait Renderer {
    fn render(&mut self, points: &[Point], label: &str) -> Result<(), RenderError>;
}

/// 计算点集的包围盒 `(min, max)`，空点集返回 `None`
pub(crate) fn bounding_box(points: &[Point]) -> Option<(Point, Point)> {
    let first = points.first()?;
    Some(points.iter().fold((*first, *first), |(min, max), p| {
        (
            Point::new(min.x.min(p.x), min.y.min(p.y)),
            Point::new(max.x.max(p.x), max.y.max(p.y)),
        )
    }))
}
