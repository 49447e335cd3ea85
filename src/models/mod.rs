//! # 数据模型模块
//!
//! 定义衍射测量、数据集与辐射源波长。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `indexing/` 和 `commands/` 使用
//! - 子模块: dataset, radiation

pub mod dataset;
pub mod radiation;

pub use dataset::DiffractionDataset;
pub use radiation::parse_wavelength;
