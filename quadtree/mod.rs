pub mod algorithms;
pub mod error;
pub mod index;
pub mod node;
pub mod point;
pub mod region;

// 重新导出主要类型
pub use error::IndexError;
pub use index::{BuildOptions, IndexStats, OutOfBoundsPolicy, QuadtreeIndex};
pub use node::{NodeKind, Quadrant, SpatialNode};
pub use point::Point;
pub use region::Region;
