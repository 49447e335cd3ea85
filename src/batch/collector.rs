//! # 数据文件收集器
//!
//! 根据输入路径和模式收集待处理的衍射数据文件。
//!
//! ## 功能
//! - 支持单文件和目录输入
//! - 逗号分隔的多个 glob 模式
//! - 递归目录搜索
//! - 结果按路径排序，保证批量输出顺序稳定
//! - 可排除指定文件名（如本工具自己的导出文件）
//! - 检测会写到同一输出名的输入文件
//!
//! ## 依赖关系
//! - 被 `commands/index.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{CubindexError, Result};

use glob::Pattern;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    /// 输入路径
    input: PathBuf,
    /// 匹配模式列表
    patterns: Vec<Pattern>,
    /// 是否递归
    recursive: bool,
    /// 文件名排除规则
    exclude: Option<fn(&str) -> bool>,
}

impl FileCollector {
    /// 创建新的文件收集器（默认匹配所有文件）
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: Vec::new(),
            recursive: false,
            exclude: None,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.patterns = pattern
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                Pattern::new(s).map_err(|e| {
                    CubindexError::InvalidArgument(format!("Invalid pattern '{}': {}", s, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self)
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 排除文件名满足 `predicate` 的文件
    pub fn exclude(mut self, predicate: fn(&str) -> bool) -> Self {
        self.exclude = Some(predicate);
        self
    }

    /// 收集所有匹配的文件
    pub fn collect(&self) -> Vec<PathBuf> {
        if self.input.is_file() {
            return vec![self.input.clone()];
        }

        if !self.input.is_dir() {
            return vec![];
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut files: Vec<PathBuf> = WalkDir::new(&self.input)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|entry| self.matches_patterns(entry.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        files
    }

    /// 检查文件名是否匹配任一模式
    fn matches_patterns(&self, path: &Path) -> bool {
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };

        if self.exclude.is_some_and(|excluded| excluded(filename)) {
            return false;
        }

        self.patterns.is_empty() || self.patterns.iter().any(|p| p.matches(filename))
    }
}

/// 按输出名分组，返回被多个输入共用的名称
///
/// `name_of` 给出每个文件的输出名，结果按名称排序。
pub fn shared_output_names<F>(files: &[PathBuf], name_of: F) -> Vec<(String, Vec<PathBuf>)>
where
    F: Fn(&Path) -> String,
{
    let mut groups: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for file in files {
        groups.entry(name_of(file)).or_default().push(file.clone());
    }

    groups
        .into_iter()
        .filter(|(_, paths)| paths.len() > 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::{dataset_name, DEFAULT_PATTERN};
    use crate::report::export::is_export_file;

    #[test]
    fn test_pattern_matching() {
        let collector = FileCollector::new(PathBuf::from("."))
            .with_pattern(DEFAULT_PATTERN)
            .unwrap();

        assert!(collector.matches_patterns(Path::new("data/pt.xy")));
        assert!(collector.matches_patterns(Path::new("run_01.csv")));
        assert!(collector.matches_patterns(Path::new("scan.dat")));
        assert!(!collector.matches_patterns(Path::new("pt_fcc.png")));
    }

    #[test]
    fn test_exported_files_excluded() {
        let collector = FileCollector::new(PathBuf::from("."))
            .with_pattern(DEFAULT_PATTERN)
            .unwrap()
            .exclude(is_export_file);

        assert!(collector.matches_patterns(Path::new("out/pt.csv")));
        assert!(!collector.matches_patterns(Path::new("out/pt_dspacing.csv")));
        assert!(!collector.matches_patterns(Path::new("out/pt_fcc.csv")));
        assert!(!collector.matches_patterns(Path::new("out/pt_bcc.csv")));
    }

    #[test]
    fn test_shared_output_names() {
        let files: Vec<PathBuf> = ["runs/au.xy", "runs/pt.csv", "runs/pt.xy", "runs/sub/pt.xy"]
            .iter()
            .map(PathBuf::from)
            .collect();

        let shared = shared_output_names(&files, dataset_name);
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].0, "pt");
        assert_eq!(shared[0].1.len(), 3);

        assert!(shared_output_names(&files[..2], dataset_name).is_empty());
    }

    #[test]
    fn test_empty_pattern_matches_all() {
        let collector = FileCollector::new(PathBuf::from("."))
            .with_pattern(" , ")
            .unwrap();
        assert!(collector.matches_patterns(Path::new("anything.bin")));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(FileCollector::new(PathBuf::from("."))
            .with_pattern("[")
            .is_err());
    }
}
