//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `indexing/`, `report/`, `utils/`
//! - 子模块: index, hkl, spacing

pub mod hkl;
pub mod index;
pub mod spacing;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Index(args) => index::execute(args),
        Commands::Hkl(args) => hkl::execute(args),
        Commands::Spacing(args) => spacing::execute(args),
    }
}
