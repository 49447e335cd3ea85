//! # CSV 数据导出
//!
//! ## 支持内容
//! - d 间距表：two_theta, d_hkl
//! - 排序后的晶格常数表：hkl, g_hkl, d=..., d=...
//!
//! 写入器对任意 `io::Write` 泛型，文件版本只是包装。
//!
//! ## 文件命名
//! - `<name>_dspacing.csv`
//! - `<name>_fcc.csv` / `<name>_bcc.csv`
//!
//! 批量收集时用 `is_export_file` 排除这些文件。
//!
//! ## 依赖关系
//! - 被 `commands/index.rs` 调用
//! - 使用 `csv` + `serde` 写入记录

use crate::error::{CubindexError, Result};
use crate::indexing::{RankedResult, Structure};
use crate::report::spacing_labels;

use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const SPACING_SUFFIX: &str = "_dspacing.csv";

/// d 间距表文件名
pub fn spacing_file_name(name: &str) -> String {
    format!("{}{}", name, SPACING_SUFFIX)
}

/// 排序结果表文件名
pub fn ranked_file_name(name: &str, structure: Structure) -> String {
    format!("{}_{}.csv", name, structure.slug())
}

/// 文件名是否为本工具导出的 CSV
pub fn is_export_file(file_name: &str) -> bool {
    file_name.ends_with(SPACING_SUFFIX)
        || Structure::ALL
            .iter()
            .any(|s| file_name.ends_with(&ranked_file_name("", *s)))
}

#[derive(Debug, Serialize)]
struct SpacingRecord {
    two_theta: String,
    d_hkl: String,
}

/// 写出 d 间距表
pub fn write_spacings<W: Write>(writer: W, two_thetas: &[f64], spacings: &[f64]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    for (t, d) in two_thetas.iter().zip(spacings) {
        wtr.serialize(SpacingRecord {
            two_theta: format!("{:.6}", t),
            d_hkl: format!("{:.6}", d),
        })?;
    }

    wtr.flush()
        .map_err(|e| CubindexError::Other(format!("CSV flush failed: {}", e)))?;
    Ok(())
}

/// 写出排序后的晶格常数表
pub fn write_ranked<W: Write>(writer: W, result: &RankedResult) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["hkl".to_string(), "g_hkl".to_string()];
    header.extend(spacing_labels(&result.spacings));
    wtr.write_record(&header)?;

    for row in &result.rows {
        let mut record = vec![row.index.to_string(), format!("{:.6}", row.g_hkl)];
        record.extend(row.lattice_params.iter().map(|a| format!("{:.6}", a)));
        wtr.write_record(&record)?;
    }

    wtr.flush()
        .map_err(|e| CubindexError::Other(format!("CSV flush failed: {}", e)))?;
    Ok(())
}

/// 导出 d 间距表到文件
pub fn spacings_to_csv(two_thetas: &[f64], spacings: &[f64], output_path: &Path) -> Result<()> {
    let file = create_file(output_path)?;
    write_spacings(file, two_thetas, spacings)
}

/// 导出排序结果到文件
pub fn ranked_to_csv(result: &RankedResult, output_path: &Path) -> Result<()> {
    let file = create_file(output_path)?;
    write_ranked(file, result)
}

fn create_file(output_path: &Path) -> Result<File> {
    File::create(output_path).map_err(|e| CubindexError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })
}
