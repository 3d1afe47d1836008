use super::point::Point;
use super::region::Region;

/// 四叉树索引错误类型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IndexError {
    /// 参数不合法：区域宽高非正、容量为 0、缩放级别非正等
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// 构建时遇到世界区域之外的点（仅在 `OutOfBoundsPolicy::Reject` 下出现）
    #[error("Point {point} lies outside the world region {world}")]
    OutOfBounds { point: Point, world: Region },

    /// 区域内的点被四个子节点全部拒绝，说明区域划分存在缺口
    #[error("Invariant violation: point {point} rejected by every quadrant of {region}")]
    InvariantViolation { point: Point, region: Region },
}

impl IndexError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        IndexError::InvalidArgument(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let world = Region::new(0.0, 0.0, 10.0, 10.0).unwrap();
        let err = IndexError::OutOfBounds {
            point: Point::new(11.0, 2.0),
            world,
        };
        assert_eq!(
            err.to_string(),
            "Point (11, 2) lies outside the world region [0, 0, 10 x 10]"
        );

        let err = IndexError::invalid("capacity must be positive");
        assert_eq!(err.to_string(), "Invalid argument: capacity must be positive");
    }
}
