//! # cubindex - 立方晶格粉末衍射指标化工具
//!
//! 由粉末 X 射线衍射角计算 FCC / BCC 候选晶格常数。
//!
//! ## 子命令
//! - `index`   - 计算 d 间距、晶格常数矩阵并按 g_hkl 排序
//! - `hkl`     - 列出候选 Miller 指数
//! - `spacing` - 仅计算 d 间距
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (数据文件解析)
//!   │     ├── indexing/  (指标化计算核心)
//!   │     ├── report/    (表格、CSV、图像输出)
//!   │     ├── batch/     (批量并行处理)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod indexing;
mod models;
mod parsers;
mod report;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
