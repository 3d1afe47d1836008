use clap::Parser;
use quadlod::config::LoggingConfig;
use quadlod::{
    GeoJsonRenderer, LodConfig, LodPipeline, PointSource, QuadtreeIndex, Renderer, Result,
    SummaryRenderer, UniformPointSource,
};
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 配置文件路径
    #[arg(short, long, default_value = "quadlod.toml")]
    config: String,

    /// 生成默认配置文件并退出
    #[arg(long)]
    generate_config: bool,

    /// Number of random points (overrides config file)
    #[arg(short = 'n', long)]
    points: Option<usize>,

    /// Random seed (overrides config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Node capacity (overrides config file)
    #[arg(long)]
    capacity: Option<usize>,

    /// Zoom level, repeatable (overrides config file)
    #[arg(short, long = "zoom")]
    zoom: Vec<f64>,

    /// Output format: summary, geojson (overrides config file)
    #[arg(short, long)]
    format: Option<String>,

    /// GeoJSON output directory (overrides config file)
    #[arg(long)]
    output_dir: Option<String>,

    /// 导出树结构 JSON 到指定文件
    #[arg(long)]
    dump_tree: Option<String>,

    /// Log level (overrides config file)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 生成默认配置文件
    if args.generate_config {
        let config = LodConfig::default();
        config.save_to_file(&args.config)?;
        println!("✅ Generated default configuration: {}", args.config);
        return Ok(());
    }

    // 加载配置
    let mut config = LodConfig::from_file(&args.config)?;

    // 命令行参数覆盖配置文件
    if let Some(points) = args.points {
        config.dataset.count = points;
    }
    if let Some(seed) = args.seed {
        config.dataset.seed = seed;
    }
    if let Some(capacity) = args.capacity {
        config.index.capacity = capacity;
    }
    if !args.zoom.is_empty() {
        config.lod.zoom_levels = args.zoom;
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }
    if let Some(dir) = args.output_dir {
        config.output.dir = dir.into();
    }
    if let Some(log_level) = args.log_level {
        config.logging.level = log_level;
    }

    // 验证配置
    config.validate()?;

    // 初始化日志系统
    init_logging(&config.logging)?;

    info!("🚀 Starting quadlod v{}", env!("CARGO_PKG_VERSION"));
    config.print_summary();

    let points = UniformPointSource::new(config.dataset.seed).produce(
        config.dataset.count,
        config.dataset.range_min,
        config.dataset.range_max,
    )?;
    info!(points = points.len(), seed = config.dataset.seed, "generated points");

    let index = QuadtreeIndex::build_with(
        points.iter().copied(),
        config.world_region()?,
        &config.build_options(),
    )?;

    if let Some(path) = &args.dump_tree {
        std::fs::write(path, index.export_to_json()?)?;
        info!("🌲 Tree structure written to {}", path);
    }

    let mut renderer: Box<dyn Renderer> = match config.output.format.as_str() {
        "geojson" => Box::new(GeoJsonRenderer::new(&config.output.dir)?),
        _ => Box::new(SummaryRenderer::stdout()),
    };

    let levels = LodPipeline::new(&index)
        .with_zoom_levels(config.lod.zoom_levels.clone())
        .run(&points, renderer.as_mut())?;

    let stats = index.stats();
    info!(
        "✅ Rendered {} levels from {} points ({} dropped, {} nodes, height {})",
        levels.len(),
        stats.points,
        stats.dropped,
        stats.nodes,
        stats.height
    );

    Ok(())
}

/// 初始化日志系统
fn init_logging(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = match config.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    match (config.output.as_str(), &config.log_file) {
        ("file", Some(log_file)) => {
            // 确保日志目录存在
            if let Some(parent) = log_file.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)?;

            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::sync::Mutex::new(file))
                        .with_ansi(false)
                        .with_target(false),
                )
                .with(tracing_subscriber::filter::LevelFilter::from_level(filter))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(tracing_subscriber::fmt::layer().with_target(false))
                .with(tracing_subscriber::filter::LevelFilter::from_level(filter))
                .init();
        }
    }

    Ok(())
}
