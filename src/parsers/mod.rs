//! # 解析器模块
//!
//! 读取衍射角数据文件。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: dataset

pub mod dataset;

pub use dataset::{dataset_name, parse_dataset_file};

/// 批量模式默认匹配的数据文件
pub const DEFAULT_PATTERN: &str = "*.xy,*.dat,*.csv,*.txt";
