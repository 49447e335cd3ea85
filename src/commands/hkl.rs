//! # hkl 子命令实现
//!
//! 列出候选规范 Miller 指数，并标记 FCC / BCC 是否允许。
//!
//! ## 依赖关系
//! - 使用 `cli/hkl.rs` 定义的 HklArgs
//! - 使用 `indexing/miller.rs`, `indexing/parity.rs`
//! - 使用 `report/table.rs` 打印表格

use crate::cli::hkl::HklArgs;
use crate::error::Result;
use crate::indexing::{CandidateIndexGenerator, MillerIndex, Structure};
use crate::report;
use crate::utils::output;

/// 执行 hkl 命令
pub fn execute(args: HklArgs) -> Result<()> {
    output::print_header("Candidate Miller Indices");

    let generator = CandidateIndexGenerator::new(args.max_index);
    let structures = args.structure.structures();

    let mut indices: Vec<MillerIndex> = generator
        .generate()
        .into_iter()
        .filter(|plane| structures.iter().any(|s: &Structure| s.allows(plane)))
        .collect();

    if args.sorted {
        indices.sort_by_key(MillerIndex::squared_sum);
    }

    if indices.is_empty() {
        output::print_warning(&format!(
            "No candidate indices for bound N = {} (need N >= 2)",
            args.max_index
        ));
        return Ok(());
    }

    println!("{}", report::table::candidate_table(&indices));
    output::print_success(&format!(
        "{} indices listed ({} lattice, at most {} canonical candidates)",
        indices.len(),
        args.structure,
        generator.max_candidates()
    ));

    Ok(())
}
