//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `index`: 由衍射角推断 FCC / BCC 晶格常数
//! - `hkl`: 列出候选 Miller 指数及消光标记
//! - `spacing`: 仅计算 d 间距
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: index, hkl, spacing

pub mod hkl;
pub mod index;
pub mod spacing;

use crate::indexing::Structure;

use clap::{Parser, Subcommand, ValueEnum};

/// cubindex - 立方晶格粉末衍射指标化工具
#[derive(Parser)]
#[command(name = "cubindex")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Cubic (FCC/BCC) lattice indexing from powder diffraction angles", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Estimate FCC/BCC lattice parameters from 2θ angles
    Index(index::IndexArgs),

    /// List canonical candidate Miller indices with FCC/BCC extinction flags
    Hkl(hkl::HklArgs),

    /// Convert 2θ angles to d-spacings with Bragg's law
    Spacing(spacing::SpacingArgs),
}

/// 晶格类型选择
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum StructureChoice {
    /// Face-centred cubic only
    Fcc,
    /// Body-centred cubic only
    Bcc,
    /// Both FCC and BCC
    #[default]
    Both,
}

impl StructureChoice {
    pub fn structures(&self) -> Vec<Structure> {
        match self {
            StructureChoice::Fcc => vec![Structure::Fcc],
            StructureChoice::Bcc => vec![Structure::Bcc],
            StructureChoice::Both => Structure::ALL.to_vec(),
        }
    }
}

impl std::fmt::Display for StructureChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StructureChoice::Fcc => write!(f, "fcc"),
            StructureChoice::Bcc => write!(f, "bcc"),
            StructureChoice::Both => write!(f, "both"),
        }
    }
}
