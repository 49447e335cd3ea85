//! # 指标化管线
//!
//! 对一个数据集执行一次前向计算：
//! 1. Bragg 定律求 d 间距（两种晶格共用，失败则整体失败）
//! 2. 生成候选指数并按奇偶性分类
//! 3. 对每种晶格分别估计晶格常数并排序
//!
//! 每种晶格的结果各自携带 `Result`，一种失败不影响另一种。
//!
//! ## 依赖关系
//! - 被 `commands/index.rs` 调用
//! - 使用 `indexing/` 下的全部组件

use crate::error::Result;
use crate::indexing::{
    BraggSpacingSolver, CandidateIndexGenerator, LatticeParameterEstimator,
    LatticeParameterMatrix, MillerIndex, ParityClassifier, RankedResult,
    ReciprocalMagnitudeRanker, Structure, DEFAULT_TOP_K,
};
use crate::models::DiffractionDataset;

/// 默认指数上界（分量取 0..5）
pub const DEFAULT_MAX_INDEX: u16 = 5;

/// 管线配置
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// 指数上界 N
    pub max_index: u16,
    /// 保留的反射数 K
    pub top_k: usize,
    /// 需要计算的晶格类型
    pub structures: Vec<Structure>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_index: DEFAULT_MAX_INDEX,
            top_k: DEFAULT_TOP_K,
            structures: Structure::ALL.to_vec(),
        }
    }
}

/// 单一晶格的计算结果
#[derive(Debug, Clone)]
pub struct StructureResult {
    pub structure: Structure,
    /// 经过消光规则筛选的规范指数（分类器输出顺序）
    pub indices: Vec<MillerIndex>,
    /// 完整（未排序）的晶格常数矩阵，供绘图使用
    pub matrix: LatticeParameterMatrix,
    pub ranked: RankedResult,
}

/// 一个数据集的完整结果
#[derive(Debug)]
pub struct IndexingReport {
    pub dataset_name: String,
    pub wavelength: f64,
    pub two_thetas: Vec<f64>,
    pub spacings: Vec<f64>,
    pub structures: Vec<(Structure, Result<StructureResult>)>,
}

/// 指标化管线
pub struct IndexingPipeline {
    config: PipelineConfig,
}

impl IndexingPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// 运行管线
    pub fn run(&self, dataset: &DiffractionDataset) -> Result<IndexingReport> {
        let solver = BraggSpacingSolver::new(dataset.wavelength)?;
        let two_thetas = dataset.two_thetas();
        let spacings = solver.solve(&two_thetas)?;

        let candidates = CandidateIndexGenerator::new(self.config.max_index).generate();
        let classified = ParityClassifier::classify(&candidates);
        let ranker = ReciprocalMagnitudeRanker::new(self.config.top_k);

        let structures = self
            .config
            .structures
            .iter()
            .map(|&structure| {
                let result = Self::run_structure(
                    structure,
                    &spacings,
                    classified.get(structure),
                    &ranker,
                );
                (structure, result)
            })
            .collect();

        Ok(IndexingReport {
            dataset_name: dataset.name.clone(),
            wavelength: dataset.wavelength,
            two_thetas,
            spacings,
            structures,
        })
    }

    fn run_structure(
        structure: Structure,
        spacings: &[f64],
        indices: &[MillerIndex],
        ranker: &ReciprocalMagnitudeRanker,
    ) -> Result<StructureResult> {
        let matrix = LatticeParameterEstimator::estimate(spacings, indices)?;
        let ranked = ranker.rank(structure, spacings, &matrix, indices)?;

        Ok(StructureResult {
            structure,
            indices: indices.to_vec(),
            matrix,
            ranked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CubindexError;

    fn structure_result(report: &IndexingReport, structure: Structure) -> Option<&StructureResult> {
        report
            .structures
            .iter()
            .find(|(s, _)| *s == structure)
            .and_then(|(_, r)| r.as_ref().ok())
    }

    #[test]
    fn test_end_to_end_fcc_top_row() {
        let dataset = DiffractionDataset::new("pt", vec![10.378, 19.955], 0.41);
        let pipeline = IndexingPipeline::new(PipelineConfig {
            max_index: 3,
            ..PipelineConfig::default()
        });

        let report = pipeline.run(&dataset).unwrap();
        assert_eq!(report.spacings.len(), 2);

        let fcc = structure_result(&report, Structure::Fcc).unwrap();
        assert_eq!(fcc.matrix.shape(), (4, 2));
        assert_eq!(fcc.ranked.len(), 4);

        let top = fcc.ranked.top().unwrap();
        assert_eq!(top.index, MillerIndex::new(1, 1, 1));

        let d0 = 0.41 / (2.0 * (10.378_f64 / 2.0).to_radians().sin());
        assert!((top.lattice_params[0] - d0 * 3.0_f64.sqrt()).abs() < 1e-12);
        // Pt 的晶格常数约 3.92 Å
        assert!((top.lattice_params[0] - 3.92).abs() < 0.02);
    }

    #[test]
    fn test_end_to_end_bcc_top_row() {
        let dataset = DiffractionDataset::new("pt", vec![10.378, 19.955], 0.41);
        let pipeline = IndexingPipeline::new(PipelineConfig {
            max_index: 3,
            ..PipelineConfig::default()
        });

        let report = pipeline.run(&dataset).unwrap();
        let bcc = structure_result(&report, Structure::Bcc).unwrap();
        assert_eq!(bcc.ranked.top().unwrap().index, MillerIndex::new(0, 1, 1));
    }

    #[test]
    fn test_run_domain_error() {
        let dataset = DiffractionDataset::new("bad", vec![10.0, 0.0], 0.41);
        let err = IndexingPipeline::new(PipelineConfig::default())
            .run(&dataset)
            .unwrap_err();
        assert!(matches!(err, CubindexError::NumericDomainError { .. }));
    }

    #[test]
    fn test_run_selected_structure_only() {
        let dataset = DiffractionDataset::new("x", vec![20.0], 1.5406);
        let pipeline = IndexingPipeline::new(PipelineConfig {
            structures: vec![Structure::Bcc],
            ..PipelineConfig::default()
        });

        let report = pipeline.run(&dataset).unwrap();
        assert_eq!(report.structures.len(), 1);
        assert!(structure_result(&report, Structure::Fcc).is_none());
        assert!(structure_result(&report, Structure::Bcc).is_some());
    }

    #[test]
    fn test_run_zero_bound_gives_empty_results() {
        let dataset = DiffractionDataset::new("x", vec![20.0, 30.0], 1.5406);
        let pipeline = IndexingPipeline::new(PipelineConfig {
            max_index: 0,
            ..PipelineConfig::default()
        });

        let report = pipeline.run(&dataset).unwrap();
        for (_, result) in &report.structures {
            let result = result.as_ref().unwrap();
            assert!(result.ranked.is_empty());
            assert_eq!(result.matrix.shape(), (0, 2));
        }
    }
}
