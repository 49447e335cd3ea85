//! # spacing 子命令 CLI 定义
//!
//! 正向：2θ → d；逆向：d → 2θ。两种输入二选一。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/spacing.rs`

use crate::models::parse_wavelength;

use clap::{ArgGroup, Args};

/// spacing 子命令参数
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["angles", "d_spacings"])))]
pub struct SpacingArgs {
    /// 2θ angles in degrees, comma separated
    #[arg(short, long, value_delimiter = ',')]
    pub angles: Vec<f64>,

    /// d-spacings in Å, comma separated; prints the matching 2θ instead
    #[arg(short = 'd', long, value_delimiter = ',')]
    pub d_spacings: Vec<f64>,

    /// X-ray wavelength: source name (cu-ka, mo-ka, etc.) or value in Å
    #[arg(short, long, value_parser = parse_wavelength)]
    pub wavelength: f64,
}
