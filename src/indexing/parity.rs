//! # 立方晶系系统消光规则
//!
//! - FCC: h, k, l 全奇或全偶
//! - BCC: h + k + l 为偶数
//!
//! 同一个三元组可以同时出现在两个子集中。
//!
//! ## 依赖关系
//! - 被 `indexing/pipeline.rs`, `commands/hkl.rs` 使用
//! - 使用 `indexing/miller.rs` 的 MillerIndex

use crate::indexing::MillerIndex;

use std::fmt;

/// 立方晶格类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Structure {
    /// 面心立方
    Fcc,
    /// 体心立方
    Bcc,
}

impl Structure {
    pub const ALL: [Structure; 2] = [Structure::Fcc, Structure::Bcc];

    /// 该晶格是否允许此反射
    pub fn allows(&self, plane: &MillerIndex) -> bool {
        match self {
            Structure::Fcc => is_fcc_allowed(plane),
            Structure::Bcc => is_bcc_allowed(plane),
        }
    }

    /// 文件名用的小写标识
    pub fn slug(&self) -> &'static str {
        match self {
            Structure::Fcc => "fcc",
            Structure::Bcc => "bcc",
        }
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Structure::Fcc => write!(f, "FCC"),
            Structure::Bcc => write!(f, "BCC"),
        }
    }
}

pub fn is_fcc_allowed(plane: &MillerIndex) -> bool {
    let odd = plane
        .components()
        .iter()
        .filter(|&&c| c % 2 != 0)
        .count();
    odd == 0 || odd == 3
}

pub fn is_bcc_allowed(plane: &MillerIndex) -> bool {
    (plane.h + plane.k + plane.l) % 2 == 0
}

/// FCC / BCC 分类结果
#[derive(Debug, Clone, Default)]
pub struct ClassifiedIndices {
    pub fcc: Vec<MillerIndex>,
    pub bcc: Vec<MillerIndex>,
}

impl ClassifiedIndices {
    pub fn get(&self, structure: Structure) -> &[MillerIndex] {
        match structure {
            Structure::Fcc => &self.fcc,
            Structure::Bcc => &self.bcc,
        }
    }
}

/// 奇偶性分类器
pub struct ParityClassifier;

impl ParityClassifier {
    /// 筛选某一晶格允许的指数，保持输入顺序
    pub fn filter(structure: Structure, indices: &[MillerIndex]) -> Vec<MillerIndex> {
        indices
            .iter()
            .filter(|plane| structure.allows(plane))
            .copied()
            .collect()
    }

    pub fn classify(indices: &[MillerIndex]) -> ClassifiedIndices {
        ClassifiedIndices {
            fcc: Self::filter(Structure::Fcc, indices),
            bcc: Self::filter(Structure::Bcc, indices),
        }
    }
}
