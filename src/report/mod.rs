//! # 报告输出模块
//!
//! 消费指标化结果的输出端：终端表格、CSV 导出、散点图。
//! 这些模块只读取 `indexing/` 返回的数据结构，互不依赖。
//!
//! ## 子模块
//! - `table`: 终端表格（tabled）
//! - `export`: CSV 导出
//! - `plot`: 晶格常数散点图（plotters）
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `indexing/` 的 RankedResult, StructureResult

pub mod export;
pub mod plot;
pub mod table;

use std::collections::HashMap;

/// d 间距列名
pub fn spacing_label(d: f64) -> String {
    format!("d={:.4}", d)
}

/// 全部 d 间距列名，保证互不相同
///
/// 四位小数后重名的列追加 `#<列号>`（从 1 开始）。
pub fn spacing_labels(spacings: &[f64]) -> Vec<String> {
    let labels: Vec<String> = spacings.iter().map(|&d| spacing_label(d)).collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in &labels {
        *counts.entry(label.as_str()).or_default() += 1;
    }

    labels
        .iter()
        .enumerate()
        .map(|(col, label)| {
            if counts.get(label.as_str()).copied().unwrap_or(0) > 1 {
                format!("{}#{}", label, col + 1)
            } else {
                label.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacing_labels_distinct() {
        assert_eq!(spacing_labels(&[2.0, 1.0]), vec!["d=2.0000", "d=1.0000"]);
        assert_eq!(
            spacing_labels(&[2.00001, 1.5, 2.00002]),
            vec!["d=2.0000#1", "d=1.5000", "d=2.0000#3"]
        );
    }
}
