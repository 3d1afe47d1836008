use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::lod::DEFAULT_ZOOM_LEVELS;
use crate::quadtree::{BuildOptions, IndexError, OutOfBoundsPolicy, Region};

/// quadlod 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LodConfig {
    /// 世界区域
    pub world: WorldConfig,

    /// 索引构建参数
    pub index: IndexConfig,

    /// 随机点集
    pub dataset: DatasetConfig,

    /// 细节层次
    pub lod: LevelConfig,

    /// 渲染输出
    pub output: OutputConfig,

    /// 日志配置
    pub logging: LoggingConfig,
}

/// 世界区域配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    #[serde(default)]
    pub origin_x: f64,

    #[serde(default)]
    pub origin_y: f64,

    #[serde(default = "default_world_size")]
    pub width: f64,

    #[serde(default = "default_world_size")]
    pub height: f64,
}

/// 索引构建配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// 节点细分前直接存放的最大点数
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// 最大深度
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    /// 越界点处理策略：drop, reject
    #[serde(default)]
    pub out_of_bounds: OutOfBoundsPolicy,
}

/// 随机点集配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// 点的数量
    #[serde(default = "default_point_count")]
    pub count: usize,

    /// 坐标下界（包含）
    #[serde(default)]
    pub range_min: f64,

    /// 坐标上界（不包含）
    #[serde(default = "default_world_size")]
    pub range_max: f64,

    /// 随机种子
    #[serde(default = "default_seed")]
    pub seed: u64,
}

/// 细节层次配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelConfig {
    #[serde(default = "default_zoom_levels")]
    pub zoom_levels: Vec<f64>,
}

/// 渲染输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 输出格式：summary, geojson
    #[serde(default = "default_output_format")]
    pub format: String,

    /// GeoJSON 输出目录
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别：trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 日志输出：stdout, file
    #[serde(default = "default_log_output")]
    pub output: String,

    /// 日志文件路径（当 output = file 时）
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// 默认值函数
// ============================================================================

fn default_world_size() -> f64 {
    100.0
}

fn default_capacity() -> usize {
    BuildOptions::DEFAULT_CAPACITY
}

fn default_max_depth() -> u32 {
    BuildOptions::DEFAULT_MAX_DEPTH
}

fn default_point_count() -> usize {
    1_000_000
}

fn default_seed() -> u64 {
    42
}

fn default_zoom_levels() -> Vec<f64> {
    DEFAULT_ZOOM_LEVELS.to_vec()
}

fn default_output_format() -> String {
    "summary".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./lod-output")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_output() -> String {
    "stdout".to_string()
}

// ============================================================================
// 实现
// ============================================================================

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig {
                origin_x: 0.0,
                origin_y: 0.0,
                width: default_world_size(),
                height: default_world_size(),
            },
            index: IndexConfig {
                capacity: default_capacity(),
                max_depth: default_max_depth(),
                out_of_bounds: OutOfBoundsPolicy::default(),
            },
            dataset: DatasetConfig {
                count: default_point_count(),
                range_min: 0.0,
                range_max: default_world_size(),
                seed: default_seed(),
            },
            lod: LevelConfig {
                zoom_levels: default_zoom_levels(),
            },
            output: OutputConfig {
                format: default_output_format(),
                dir: default_output_dir(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                output: default_log_output(),
                log_file: None,
            },
        }
    }
}

impl LodConfig {
    /// 从文件加载配置
    ///
    /// 配置加载顺序（优先级从低到高）：
    /// 1. 默认配置（内嵌的 default.toml）
    /// 2. 用户配置文件（可选）
    /// 3. 环境变量（QUADLOD__ 前缀，使用双下划线分隔嵌套）
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use quadlod::config::LodConfig;
    ///
    /// // 加载配置（如果文件不存在，使用默认配置）
    /// let config = LodConfig::from_file("quadlod.toml").unwrap();
    /// ```
    pub fn from_file(path: &str) -> crate::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(
                include_str!("default.toml"),
                config::FileFormat::Toml,
            ))
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("QUADLOD").separator("__"))
            .build()
            .map_err(|e| format!("Failed to load config: {}", e))?;

        Ok(settings
            .try_deserialize()
            .map_err(|e| format!("Failed to parse config: {}", e))?)
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, path: &str) -> crate::Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        std::fs::write(path, toml_string)
            .map_err(|e| format!("Failed to write config file: {}", e))?;
        Ok(())
    }

    /// 世界区域
    pub fn world_region(&self) -> Result<Region, IndexError> {
        Region::new(
            self.world.origin_x,
            self.world.origin_y,
            self.world.width,
            self.world.height,
        )
    }

    /// 索引构建参数
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions::new(self.index.capacity)
            .with_max_depth(self.index.max_depth)
            .with_out_of_bounds(self.index.out_of_bounds)
    }

    /// 验证配置
    ///
    /// 检查配置的合法性，包括：
    /// - 世界区域
    /// - 节点容量与最大深度
    /// - 随机点集的坐标范围
    /// - 缩放级别
    /// - 输出格式与日志
    pub fn validate(&self) -> Result<(), String> {
        self.world_region()
            .map_err(|e| format!("Invalid world region: {}", e))?;

        if self.index.capacity == 0 {
            return Err("Index capacity must be a positive integer".to_string());
        }
        if self.index.max_depth == 0 {
            return Err("Index max_depth must be a positive integer".to_string());
        }

        let (min, max) = (self.dataset.range_min, self.dataset.range_max);
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(format!("Invalid dataset range: [{}, {})", min, max));
        }

        if self.lod.zoom_levels.is_empty() {
            return Err("At least one zoom level is required".to_string());
        }
        if let Some(zoom) = self
            .lod
            .zoom_levels
            .iter()
            .find(|z| !(**z > 0.0 && z.is_finite()))
        {
            return Err(format!(
                "Invalid zoom level: {}. Zoom levels must be positive",
                zoom
            ));
        }

        match self.output.format.as_str() {
            "summary" | "geojson" => {}
            _ => {
                return Err(format!(
                    "Invalid output format: '{}'. Must be one of: summary, geojson",
                    self.output.format
                ))
            }
        }

        // 验证日志级别
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(format!(
                    "Invalid log level: '{}'. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                ))
            }
        }

        if self.logging.output == "file" && self.logging.log_file.is_none() {
            return Err("Log output is 'file' but log_file path is not specified".to_string());
        }

        Ok(())
    }

    /// 打印配置摘要
    pub fn print_summary(&self) {
        println!("📋 quadlod Configuration:");
        println!(
            "   World:       ({}, {}) {} x {}",
            self.world.origin_x, self.world.origin_y, self.world.width, self.world.height
        );
        println!("   Capacity:    {}", self.index.capacity);
        println!("   Max Depth:   {}", self.index.max_depth);
        println!("   Out of Bounds: {:?}", self.index.out_of_bounds);
        println!();
        println!("   Points:      {}", self.dataset.count);
        println!(
            "   Range:       [{}, {})",
            self.dataset.range_min, self.dataset.range_max
        );
        println!("   Seed:        {}", self.dataset.seed);
        println!("   Zoom Levels: {:?}", self.lod.zoom_levels);
        println!();
        println!("   Output:      {}", self.output.format);
        if self.output.format == "geojson" {
            println!("   Output Dir:  {}", self.output.dir.display());
        }
        println!("   Log Level:   {}", self.logging.level);
        println!("   Log Output:  {}", self.logging.output);
        if let Some(ref log_file) = self.logging.log_file {
            println!("   Log File:    {}", log_file.display());
        }
        println!();
    }
}
