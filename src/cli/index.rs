//! # index 子命令 CLI 定义
//!
//! 单文件 / 命令行角度 / 批量目录三种输入方式。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/index.rs`

use crate::cli::StructureChoice;
use crate::indexing::pipeline::DEFAULT_MAX_INDEX;
use crate::indexing::DEFAULT_TOP_K;
use crate::models::parse_wavelength;
use crate::parsers::DEFAULT_PATTERN;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 图像输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum PlotFormat {
    /// PNG image
    #[default]
    Png,
    /// SVG vector image
    Svg,
}

impl PlotFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            PlotFormat::Png => "png",
            PlotFormat::Svg => "svg",
        }
    }
}

/// index 子命令参数
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Input: diffraction data file or directory of data files (batch mode)
    pub input: Option<PathBuf>,

    /// 2θ angles in degrees, comma separated (used when no input file is given)
    #[arg(short, long, value_delimiter = ',')]
    pub angles: Vec<f64>,

    /// X-ray wavelength: source name (cu-ka, mo-ka, etc.) or value in Å; overrides the file header
    #[arg(short, long, value_parser = parse_wavelength)]
    pub wavelength: Option<f64>,

    /// Miller index bound N: each of h, k, l ranges over 0..N
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_INDEX)]
    pub max_index: u16,

    /// Number of lowest-order reflections kept in the ranked tables
    #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Lattice types to evaluate
    #[arg(short, long, value_enum, default_value_t = StructureChoice::Both)]
    pub structure: StructureChoice,

    /// Output directory for CSV tables and plots
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Plot image format
    #[arg(long, value_enum, default_value = "png")]
    pub plot_format: PlotFormat,

    /// Skip plot generation
    #[arg(long, default_value_t = false)]
    pub no_plot: bool,

    /// Skip CSV export
    #[arg(long, default_value_t = false)]
    pub no_export: bool,

    /// Figure width in pixels (PNG) or points (SVG)
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Figure height in pixels (PNG) or points (SVG)
    #[arg(long, default_value_t = 500)]
    pub height: u32,

    // ─────────────────────────────────────────────────────────────
    // 批量处理参数
    // ─────────────────────────────────────────────────────────────
    /// Glob pattern for input files (batch mode, e.g., "*.xy,*.csv")
    #[arg(long, default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// Number of parallel jobs (0 = auto, batch mode only)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Recurse into subdirectories (batch mode)
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Overwrite existing output files (batch mode)
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
