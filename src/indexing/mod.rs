//! # 立方晶格指标化模块
//!
//! 从粉末衍射角推断 FCC / BCC 晶格常数的计算核心。
//!
//! ## 子模块
//! - `miller`: 候选 Miller 指数生成与规范化
//! - `parity`: FCC / BCC 消光规则分类
//! - `bragg`: Bragg 定律求 d 间距
//! - `estimator`: 晶格常数矩阵
//! - `ranking`: 按 g_hkl 排序与截断
//! - `pipeline`: 组合以上步骤
//!
//! 本模块只返回数据结构，不做任何输出。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/dataset.rs`

pub mod bragg;
pub mod estimator;
pub mod miller;
pub mod parity;
pub mod pipeline;
pub mod ranking;

pub use bragg::BraggSpacingSolver;
pub use estimator::{LatticeParameterEstimator, LatticeParameterMatrix};
pub use miller::{CandidateIndexGenerator, MillerIndex};
pub use parity::{ParityClassifier, Structure};
pub use pipeline::{IndexingPipeline, IndexingReport, PipelineConfig, StructureResult};
pub use ranking::{RankedResult, ReciprocalMagnitudeRanker, DEFAULT_TOP_K};
