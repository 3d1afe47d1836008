use std::io::{self, Write};

use colored::*;

use super::{bounding_box, RenderError, Renderer};
use crate::quadtree::Point;

/// 终端摘要渲染：每次渲染输出一行（标签、点数、包围盒）
#[derive(Debug)]
pub struct SummaryRenderer<W: Write> {
    out: W,
}

impl SummaryRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        SummaryRenderer { out: io::stdout() }
    }
}

impl<W: Write> SummaryRenderer<W> {
    pub fn new(out: W) -> Self {
        SummaryRenderer { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn format_line(points: &[Point], label: &str) -> String {
        let bounds = match bounding_box(points) {
            Some((min, max)) => format!("bounds {} - {}", min, max).normal(),
            None => "(no points)".yellow(),
        };
        format!(
            "{} {} {}",
            format!("{}:", label).bold(),
            format!("{} points", points.len()).cyan(),
            bounds
        )
    }
}

impl<W: Write> Renderer for SummaryRenderer<W> {
    fn render(&mut self, points: &[Point], label: &str) -> Result<(), RenderError> {
        writeln!(self.out, "{}", Self::format_line(points, label))?;
        self.out.flush()?;
        Ok(())
    }
}
