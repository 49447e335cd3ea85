//! # 终端表格
//!
//! 使用 `tabled` 打印 d 间距表与排序后的晶格常数表。
//!
//! ## 依赖关系
//! - 被 `commands/index.rs`, `commands/spacing.rs`, `commands/hkl.rs` 调用

use crate::indexing::{parity, MillerIndex, RankedResult};
use crate::report::spacing_labels;

use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct SpacingRow {
    #[tabled(rename = "2θ (°)")]
    two_theta: String,
    #[tabled(rename = "d_hkl (Å)")]
    d_spacing: String,
}

#[derive(Tabled)]
struct CandidateRow {
    #[tabled(rename = "(hkl)")]
    hkl: String,
    #[tabled(rename = "h²+k²+l²")]
    squared: i64,
    #[tabled(rename = "g_hkl")]
    g_hkl: String,
    #[tabled(rename = "FCC")]
    fcc: &'static str,
    #[tabled(rename = "BCC")]
    bcc: &'static str,
}

/// d 间距表
pub fn spacing_table(two_thetas: &[f64], spacings: &[f64]) -> String {
    let rows: Vec<SpacingRow> = two_thetas
        .iter()
        .zip(spacings)
        .map(|(t, d)| SpacingRow {
            two_theta: format!("{:.3}", t),
            d_spacing: format!("{:.6}", d),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    table.to_string()
}

/// 排序后的晶格常数表：(hkl) | g_hkl | d=... 各列
pub fn ranked_table(result: &RankedResult) -> String {
    let mut builder = Builder::default();

    let mut header = vec!["(hkl)".to_string(), "g_hkl".to_string()];
    header.extend(spacing_labels(&result.spacings));
    builder.push_record(header);

    for row in &result.rows {
        let mut record = vec![row.index.to_string(), format!("{:.4}", row.g_hkl)];
        record.extend(row.lattice_params.iter().map(|a| format!("{:.4}", a)));
        builder.push_record(record);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// 候选指数表（带消光标记）
pub fn candidate_table(indices: &[MillerIndex]) -> String {
    let mark = |allowed: bool| if allowed { "yes" } else { "-" };

    let rows: Vec<CandidateRow> = indices
        .iter()
        .map(|plane| CandidateRow {
            hkl: plane.to_string(),
            squared: plane.squared_sum(),
            g_hkl: format!("{:.4}", plane.reciprocal_magnitude()),
            fcc: mark(parity::is_fcc_allowed(plane)),
            bcc: mark(parity::is_bcc_allowed(plane)),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexing::{LatticeParameterEstimator, ReciprocalMagnitudeRanker, Structure};

    #[test]
    fn test_ranked_table_contains_labels() {
        let indices = vec![MillerIndex::new(0, 0, 2), MillerIndex::new(1, 1, 1)];
        let spacings = [2.2666];
        let matrix = LatticeParameterEstimator::estimate(&spacings, &indices).unwrap();
        let ranked = ReciprocalMagnitudeRanker::default()
            .rank(Structure::Fcc, &spacings, &matrix, &indices)
            .unwrap();

        let text = ranked_table(&ranked);
        assert!(text.contains("(1, 1, 1)"));
        assert!(text.contains("d=2.2666"));
        assert!(text.find("(1, 1, 1)") < text.find("(0, 0, 2)"));
    }

    #[test]
    fn test_candidate_table_marks() {
        let text = candidate_table(&[MillerIndex::new(1, 1, 1)]);
        assert!(text.contains("yes"));
        assert!(text.contains("1.7321"));
    }
}
