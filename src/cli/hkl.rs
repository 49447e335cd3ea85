//! # hkl 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/hkl.rs`

use crate::cli::StructureChoice;
use crate::indexing::pipeline::DEFAULT_MAX_INDEX;

use clap::Args;

/// hkl 子命令参数
#[derive(Args, Debug)]
pub struct HklArgs {
    /// Miller index bound N: each of h, k, l ranges over 0..N
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_INDEX)]
    pub max_index: u16,

    /// Only list indices allowed for this lattice type
    #[arg(short, long, value_enum, default_value_t = StructureChoice::Both)]
    pub structure: StructureChoice,

    /// Sort by g_hkl instead of generation order
    #[arg(long, default_value_t = false)]
    pub sorted: bool,
}
