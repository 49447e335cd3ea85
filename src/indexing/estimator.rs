//! # 晶格常数估计
//!
//! 对每个 (hkl) 与每个 d 间距：a = d · sqrt(h² + k² + l²)。
//!
//! 结果为 P×M 矩阵（行：指数，列：d 间距），行优先存储。
//! 此阶段不做任何舍入。
//!
//! ## 依赖关系
//! - 被 `indexing/pipeline.rs`, `indexing/ranking.rs` 使用
//! - 被 `report/plot.rs` 读取

use crate::error::{CubindexError, Result};
use crate::indexing::MillerIndex;

/// 晶格常数矩阵
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeParameterMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl LatticeParameterMatrix {
    /// 从行优先数据构造，长度必须等于 rows × cols
    pub fn from_row_major(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self> {
        if values.len() != rows * cols {
            return Err(CubindexError::ShapeMismatch {
                context: format!("lattice parameter matrix {}x{}", rows, cols),
                expected: rows * cols,
                found: values.len(),
            });
        }
        Ok(Self { rows, cols, values })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.values[start..start + self.cols]
    }

    /// 第 col 列（同一 d 间距对应的所有估计值）
    pub fn column(&self, col: usize) -> Vec<f64> {
        (0..self.rows).map(|r| self.values[r * self.cols + col]).collect()
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.rows).map(move |r| self.row(r))
    }

    /// (最小值, 最大值)，空矩阵返回 None
    pub fn value_range(&self) -> Option<(f64, f64)> {
        if self.values.is_empty() {
            return None;
        }
        let min = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self
            .values
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}

/// 晶格常数估计器
pub struct LatticeParameterEstimator;

impl LatticeParameterEstimator {
    /// 计算 P×M 晶格常数矩阵
    ///
    /// P = 0 或 M = 0 时返回空矩阵而不是错误。
    pub fn estimate(spacings: &[f64], indices: &[MillerIndex]) -> Result<LatticeParameterMatrix> {
        let values: Vec<f64> = indices
            .iter()
            .flat_map(|plane| {
                let g = plane.reciprocal_magnitude();
                spacings.iter().map(move |d| d * g)
            })
            .collect();

        LatticeParameterMatrix::from_row_major(indices.len(), spacings.len(), values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planes(list: &[[i32; 3]]) -> Vec<MillerIndex> {
        list.iter().copied().map(MillerIndex::from).collect()
    }

    #[test]
    fn test_estimate_values() {
        let spacings = [2.0, 1.0];
        let indices = planes(&[[0, 0, 1], [1, 1, 1]]);
        let m = LatticeParameterEstimator::estimate(&spacings, &indices).unwrap();

        assert_eq!(m.shape(), (2, 2));
        assert!((m.row(0)[0] - 2.0).abs() < 1e-12);
        assert!((m.row(0)[1] - 1.0).abs() < 1e-12);
        assert!((m.row(1)[0] - 2.0 * 3.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(m.row(1).len(), 2);
        assert_eq!(m.column(0).len(), 2);
    }

    #[test]
    fn test_estimate_shape_invariant() {
        let spacings = [1.1, 1.2, 1.3, 1.4];
        for p in 0..6 {
            let indices: Vec<MillerIndex> =
                (1..=p).map(|i| MillerIndex::new(0, 0, i as i32)).collect();
            let m = LatticeParameterEstimator::estimate(&spacings, &indices).unwrap();
            assert_eq!(m.shape(), (p, spacings.len()));
        }
    }

    #[test]
    fn test_estimate_empty_axes() {
        let indices = planes(&[[1, 1, 1]]);
        let m = LatticeParameterEstimator::estimate(&[], &indices).unwrap();
        assert_eq!(m.shape(), (1, 0));
        assert!(m.is_empty());

        let m = LatticeParameterEstimator::estimate(&[1.0, 2.0], &[]).unwrap();
        assert_eq!(m.shape(), (0, 2));
        assert!(m.is_empty());
        assert!(m.value_range().is_none());
    }

    #[test]
    fn test_from_row_major_mismatch() {
        let err = LatticeParameterMatrix::from_row_major(2, 2, vec![1.0; 3]).unwrap_err();
        assert!(matches!(
            err,
            CubindexError::ShapeMismatch {
                expected: 4,
                found: 3,
                ..
            }
        ));
    }
}
