use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use ::geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use tracing::info;

use super::{bounding_box, RenderError, Renderer};
use crate::quadtree::Point;

/// GeoJSON 文件渲染
///
/// 每次渲染写出一个 `FeatureCollection`，每个点是一个 `Point` 要素，
/// 标签保存在顶层的 `"label"` 成员中。文件名由标签转换而来。
#[derive(Debug)]
pub struct GeoJsonRenderer {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl GeoJsonRenderer {
    /// 输出目录不存在时自动创建
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, RenderError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(GeoJsonRenderer {
            dir,
            written: Vec::new(),
        })
    }

    /// 已写出的文件
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// 把标签转换为文件名，如 `With Level of Detail (Zoom Level 2)` ->
    /// `with-level-of-detail-zoom-level-2.geojson`
    pub fn file_name(label: &str) -> String {
        let slug = label
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|part| !part.is_empty())
            .map(str::to_ascii_lowercase)
            .collect::<Vec<_>>()
            .join("-");
        let slug = if slug.is_empty() { "points".to_string() } else { slug };
        format!("{}.geojson", slug)
    }

    fn feature_collection(points: &[Point], label: &str) -> FeatureCollection {
        let features = points
            .iter()
            .map(|p| Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![p.x, p.y]))),
                id: None,
                properties: None,
                foreign_members: None,
            })
            .collect();

        let mut members = JsonObject::new();
        members.insert("label".to_string(), label.into());

        FeatureCollection {
            bbox: bounding_box(points).map(|(min, max)| vec![min.x, min.y, max.x, max.y]),
            features,
            foreign_members: Some(members),
        }
    }
}

impl Renderer for GeoJsonRenderer {
    fn render(&mut self, points: &[Point], label: &str) -> Result<(), RenderError> {
        let path = self.dir.join(Self::file_name(label));
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer(&mut writer, &Self::feature_collection(points, label))?;
        writer.flush()?;

        info!(path = %path.display(), points = points.len(), "wrote {}", label);
        self.written.push(path);
        Ok(())
    }
}
