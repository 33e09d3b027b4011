//! # 线性插值
//!
//! ## 依赖关系
//! - 被 `analysis/compare.rs` 使用

/// 在严格递增的 `xs` 上线性插值；x 超出范围时返回 None
pub fn linear_at(xs: &[f64], ys: &[f64], x: f64) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n == 0 || x < xs[0] || x > xs[n - 1] {
        return None;
    }

    // 第一个 > x 的下标
    let upper = xs[..n].partition_point(|&v| v <= x);
    if upper == 0 {
        return Some(ys[0]);
    }
    if upper == n {
        return Some(ys[n - 1]);
    }

    let lower = upper - 1;
    let (x0, x1) = (xs[lower], xs[upper]);
    let (y0, y1) = (ys[lower], ys[upper]);
    let t = (x - x0) / (x1 - x0);
    Some(y0 + t * (y1 - y0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_at() {
        let xs = [0.0, 1.0, 3.0];
        let ys = [0.0, 2.0, 0.0];

        assert_eq!(linear_at(&xs, &ys, 0.0), Some(0.0));
        assert_eq!(linear_at(&xs, &ys, 0.5), Some(1.0));
        assert_eq!(linear_at(&xs, &ys, 1.0), Some(2.0));
        assert_eq!(linear_at(&xs, &ys, 2.0), Some(1.0));
        assert_eq!(linear_at(&xs, &ys, 3.0), Some(0.0));
        assert_eq!(linear_at(&xs, &ys, -0.1), None);
        assert_eq!(linear_at(&xs, &ys, 3.1), None);
        assert_eq!(linear_at(&[], &[], 0.0), None);
    }
}
