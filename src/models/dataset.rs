//! # 衍射数据集模型
//!
//! 一次测量 = (2θ, 波长)；一个数据集是共享同一波长的有序测量序列。
//!
//! ## 依赖关系
//! - 被 `parsers/dataset.rs` 构造
//! - 被 `indexing/pipeline.rs`, `commands/` 使用

use serde::{Deserialize, Serialize};

/// 单次衍射测量
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiffractionMeasurement {
    /// 衍射角 2θ（度）
    pub two_theta: f64,
    /// 波长（Å）
    pub wavelength: f64,
}

/// 衍射数据集
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffractionDataset {
    /// 数据集名称（文件名或 "cli"）
    pub name: String,
    /// 各峰 2θ（度），保持测量顺序
    pub angles: Vec<f64>,
    /// 共享波长（Å）
    pub wavelength: f64,
}

impl DiffractionDataset {
    pub fn new(name: impl Into<String>, angles: Vec<f64>, wavelength: f64) -> Self {
        DiffractionDataset {
            name: name.into(),
            angles,
            wavelength,
        }
    }

    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    pub fn two_thetas(&self) -> Vec<f64> {
        self.angles.clone()
    }

    /// 逐条测量
    pub fn measurements(&self) -> impl Iterator<Item = DiffractionMeasurement> + '_ {
        self.angles.iter().map(|&two_theta| DiffractionMeasurement {
            two_theta,
            wavelength: self.wavelength,
        })
    }
}
