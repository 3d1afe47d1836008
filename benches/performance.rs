//! 四叉树性能基准测试
//!
//! 构建、区域查询与细节层次查询
//! 当前测试规模：100,000 个点

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use quadlod::{BuildOptions, Point, QuadtreeIndex, Region};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BENCHMARK_SIZE: usize = 100_000;
const WORLD_SIZE: f64 = 1000.0;

/// 性能测试配置
struct BenchConfig {
    size: usize,
    capacity: usize,
    seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            size: BENCHMARK_SIZE,
            capacity: 16,
            seed: 42,
        }
    }
}

fn world() -> Region {
    Region::new(0.0, 0.0, WORLD_SIZE, WORLD_SIZE).unwrap()
}

/// 生成测试数据
fn generate_test_data(count: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Point::new(rng.gen_range(0.0..WORLD_SIZE), rng.gen_range(0.0..WORLD_SIZE)))
        .collect()
}

/// 生成查询矩形
fn generate_query_rects(count: usize, coverage_percent: f64, seed: u64) -> Vec<Region> {
    let mut rng = StdRng::seed_from_u64(seed + 1000);

    // 根据覆盖率计算查询矩形的大小
    let query_size = WORLD_SIZE * (coverage_percent / 100.0).sqrt();

    (0..count)
        .map(|_| {
            let x = rng.gen_range(0.0..(WORLD_SIZE - query_size));
            let y = rng.gen_range(0.0..(WORLD_SIZE - query_size));
            Region::new(x, y, query_size, query_size).unwrap()
        })
        .collect()
}

fn build_index(config: &BenchConfig, data: &[Point]) -> QuadtreeIndex {
    QuadtreeIndex::build_with(
        data.iter().copied(),
        world(),
        &BuildOptions::new(config.capacity),
    )
    .unwrap()
}

/// 构建性能测试
fn bench_build(c: &mut Criterion) {
    let config = BenchConfig::default();
    let test_data = generate_test_data(config.size, config.seed);

    c.bench_function("build", |b| {
        b.iter(|| build_index(&config, black_box(&test_data)));
    });
}

/// 区域查询性能测试
fn bench_query_range(c: &mut Criterion) {
    let config = BenchConfig::default();
    let test_data = generate_test_data(config.size, config.seed);
    let index = build_index(&config, &test_data);

    let test_cases = vec![
        ("query_1%", 1.0),
        ("query_5%", 5.0),
        ("query_10%", 10.0),
    ];

    for (name, coverage) in test_cases {
        let queries = generate_query_rects(1_000, coverage, config.seed);

        c.bench_function(name, |b| {
            b.iter(|| {
                let mut total_results = 0;
                for query in &queries {
                    total_results += index.query_range(query).len();
                }
                total_results
            });
        });
    }
}

/// 细节层次查询性能测试
fn bench_level_of_detail(c: &mut Criterion) {
    let config = BenchConfig::default();
    let test_data = generate_test_data(config.size, config.seed);
    let index = build_index(&config, &test_data);

    for zoom in [1.0, 4.0, 16.0] {
        c.bench_function(&format!("lod_zoom_{}", zoom), |b| {
            b.iter(|| index.query_level_of_detail(black_box(zoom)).unwrap().len());
        });
    }
}

criterion_group!(benches, bench_build, bench_query_range, bench_level_of_detail);
criterion_main!(benches);
