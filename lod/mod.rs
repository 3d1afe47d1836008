//! 细节层次（LOD）流程
//!
//! 先渲染不做任何筛选的完整点集，再对每个缩放级别计算可见窗口、
//! 查询索引并渲染缩减后的点集。

use tracing::{debug, info};

use crate::quadtree::{Point, QuadtreeIndex, Region};
use crate::render::Renderer;

/// 默认缩放级别
pub const DEFAULT_ZOOM_LEVELS: [f64; 5] = [1.0, 2.0, 4.0, 8.0, 16.0];

/// 完整点集的渲染标签
pub const FULL_SET_LABEL: &str = "Without Level of Detail";

/// 单个缩放级别的查询结果
#[derive(Debug, Clone, PartialEq)]
pub struct LodLevel {
    pub zoom: f64,
    /// 可见窗口，窗口舍入后没有面积时为 `None`
    pub window: Option<Region>,
    pub points: Vec<Point>,
}

impl LodLevel {
    pub fn label(&self) -> String {
        level_label(self.zoom)
    }
}

/// 缩放级别的渲染标签
pub fn level_label(zoom: f64) -> String {
    format!("With Level of Detail (Zoom Level {})", zoom)
}

/// 细节层次流程
#[derive(Debug)]
pub struct LodPipeline<'a> {
    index: &'a QuadtreeIndex,
    zoom_levels: Vec<f64>,
}

impl<'a> LodPipeline<'a> {
    pub fn new(index: &'a QuadtreeIndex) -> Self {
        LodPipeline {
            index,
            zoom_levels: DEFAULT_ZOOM_LEVELS.to_vec(),
        }
    }

    pub fn with_zoom_levels(mut self, zoom_levels: impl Into<Vec<f64>>) -> Self {
        self.zoom_levels = zoom_levels.into();
        self
    }

    pub fn zoom_levels(&self) -> &[f64] {
        &self.zoom_levels
    }

    /// 逐级查询，不做渲染
    ///
    /// 任一缩放级别非法时整个流程失败。
    pub fn levels(&self) -> crate::Result<Vec<LodLevel>> {
        self.zoom_levels
            .iter()
            .map(|&zoom| -> crate::Result<LodLevel> {
                let window = self.index.visible_window(zoom)?;
                let points = window
                    .map(|window| self.index.query_range(&window))
                    .unwrap_or_default();
                debug!(zoom, points = points.len(), "resolved level");
                Ok(LodLevel {
                    zoom,
                    window,
                    points,
                })
            })
            .collect()
    }

    /// 运行完整流程：先渲染 `all_points`，再逐级渲染
    pub fn run<R: Renderer + ?Sized>(
        &self,
        all_points: &[Point],
        renderer: &mut R,
    ) -> crate::Result<Vec<LodLevel>> {
        // 先校验全部缩放级别，避免渲染到一半才失败
        let levels = self.levels()?;

        renderer.render(all_points, FULL_SET_LABEL)?;
        for level in &levels {
            renderer.render(&level.points, &level.label())?;
            info!(
                zoom = level.zoom,
                visible = level.points.len(),
                total = all_points.len(),
                "rendered level of detail"
            );
        }

        Ok(levels)
    }
}
