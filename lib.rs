//! # quadlod
//!
//! 基于四叉树的二维点集空间索引，用于大规模点渲染时的细节层次（LOD）选择：
//! 每个缩放级别只取出可见窗口内的点，而不是渲染全部点。
//!
//! ```rust
//! use quadlod::{Point, QuadtreeIndex, Region};
//!
//! let world = Region::new(0.0, 0.0, 100.0, 100.0).unwrap();
//! let points = vec![Point::new(1.0, 1.0), Point::new(60.0, 60.0)];
//! let index = QuadtreeIndex::build(points, world, 4).unwrap();
//!
//! // 缩放级别 2：可见窗口为 (0, 0, 50, 50)
//! let visible = index.query_level_of_detail(2.0).unwrap();
//! assert_eq!(visible, vec![Point::new(1.0, 1.0)]);
//! ```

pub mod config;
pub mod dataset;
pub mod lod;
pub mod quadtree;
pub mod render;

use std::error::Error;

// 重新导出主要的公共接口
pub use config::LodConfig;
pub use dataset::{PointSource, UniformPointSource};
pub use lod::{LodLevel, LodPipeline};
pub use quadtree::{
    BuildOptions, IndexError, IndexStats, OutOfBoundsPolicy, Point, QuadtreeIndex, Quadrant,
    Region, SpatialNode,
};
pub use render::{GeoJsonRenderer, RenderError, Renderer, SummaryRenderer};

pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;
