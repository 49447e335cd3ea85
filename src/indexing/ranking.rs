//! # 按倒格矢模长排序与截断
//!
//! 1. 对每一行计算 g_hkl = sqrt(h² + k² + l²)
//! 2. 按 g_hkl 升序稳定排序（相等时保持分类器输出顺序）
//! 3. 保留前 K 行（低阶反射）
//!
//! 排序只在全部行计算完成后进行一次。
//!
//! ## 依赖关系
//! - 被 `indexing/pipeline.rs` 调用
//! - 结果被 `report/` 下的表格、CSV 导出使用

use crate::error::{CubindexError, Result};
use crate::indexing::{LatticeParameterMatrix, MillerIndex, Structure};

/// 默认保留的反射数
pub const DEFAULT_TOP_K: usize = 9;

/// 排序后的一行
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRow {
    pub index: MillerIndex,
    pub g_hkl: f64,
    /// 各 d 间距对应的晶格常数估计
    pub lattice_params: Vec<f64>,
}

/// 排序、截断后的结果
#[derive(Debug, Clone)]
pub struct RankedResult {
    /// 列键：与 lattice_params 对齐的 d 间距
    pub spacings: Vec<f64>,
    pub rows: Vec<RankedRow>,
}

impl RankedResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn top(&self) -> Option<&RankedRow> {
        self.rows.first()
    }
}

/// 倒格矢模长排序器
#[derive(Debug, Clone, Copy)]
pub struct ReciprocalMagnitudeRanker {
    top_k: usize,
}

impl Default for ReciprocalMagnitudeRanker {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

impl ReciprocalMagnitudeRanker {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    /// 排序并截断
    ///
    /// `indices` 必须与矩阵的行一一对应，否则返回 `ShapeMismatch`。
    /// `structure` 只用于错误上下文。
    pub fn rank(
        &self,
        structure: Structure,
        spacings: &[f64],
        matrix: &LatticeParameterMatrix,
        indices: &[MillerIndex],
    ) -> Result<RankedResult> {
        if indices.len() != matrix.rows() {
            return Err(CubindexError::ShapeMismatch {
                context: format!("{} ranking (index labels vs matrix rows)", structure),
                expected: matrix.rows(),
                found: indices.len(),
            });
        }
        if spacings.len() != matrix.cols() {
            return Err(CubindexError::ShapeMismatch {
                context: format!("{} ranking (spacings vs matrix columns)", structure),
                expected: matrix.cols(),
                found: spacings.len(),
            });
        }

        let mut rows: Vec<RankedRow> = indices
            .iter()
            .zip(matrix.iter_rows())
            .map(|(plane, values)| RankedRow {
                index: *plane,
                g_hkl: plane.reciprocal_magnitude(),
                lattice_params: values.to_vec(),
            })
            .collect();

        // sort_by 为稳定排序
        rows.sort_by(|a, b| a.g_hkl.total_cmp(&b.g_hkl));
        rows.truncate(self.top_k);

        Ok(RankedResult {
            spacings: spacings.to_vec(),
            rows,
        })
    }
}
