//! 点集数据源
//!
//! 随机数生成器由调用方显式传入种子，不依赖任何进程级的全局随机状态，
//! 相同种子总是产生相同的点集。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::quadtree::{IndexError, Point};

/// 点集生成接口
pub trait PointSource {
    /// 生成 `count` 个点，坐标位于 `[range_min, range_max)` 内
    fn produce(
        &mut self,
        count: usize,
        range_min: f64,
        range_max: f64,
    ) -> Result<Vec<Point>, IndexError>;
}

/// 均匀分布的随机点源
#[derive(Debug, Clone)]
pub struct UniformPointSource {
    rng: StdRng,
}

impl UniformPointSource {
    pub fn new(seed: u64) -> Self {
        UniformPointSource {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl PointSource for UniformPointSource {
    fn produce(
        &mut self,
        count: usize,
        range_min: f64,
        range_max: f64,
    ) -> Result<Vec<Point>, IndexError> {
        if !range_min.is_finite() || !range_max.is_finite() || range_min >= range_max {
            return Err(IndexError::invalid(format!(
                "point range [{}, {}) is empty or not finite",
                range_min, range_max
            )));
        }

        let points = (0..count)
            .map(|_| {
                Point::new(
                    self.rng.gen_range(range_min..range_max),
                    self.rng.gen_range(range_min..range_max),
                )
            })
            .collect();
        Ok(points)
    }
}
