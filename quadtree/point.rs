use derive_more::Display;
use serde::{Deserialize, Serialize};

/// 二维点
///
/// 只由坐标决定，没有其他标识；重复的点会被分别存储。
#[derive(Debug, Display, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[display(fmt = "({}, {})", x, y)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_conversions() {
        let p: Point = (1.5, -2.0).into();
        assert_eq!(p, Point::new(1.5, -2.0));
        assert_eq!(<(f64, f64)>::from(p), (1.5, -2.0));
        assert_eq!(p.to_string(), "(1.5, -2)");
    }
}
