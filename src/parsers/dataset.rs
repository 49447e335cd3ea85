//! # 衍射数据文件解析器
//!
//! 读取包含 2θ 峰位的纯文本数据文件（.xy / .dat / .csv / .txt）。
//!
//! ## 格式说明
//! ```text
//! # wavelength: 0.41        <- 可选，也可写辐射源名称，如 cu-ka
//! two_theta, intensity      <- 可选表头（仅允许出现在第一条数据行）
//! 10.378, 100
//! 11.992  45
//! ```
//! - `#` 开头为注释
//! - 字段以空白、逗号或分号分隔，只取第一列作为 2θ（度）
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs`, `commands/index.rs` 使用
//! - 使用 `models/dataset.rs`, `models/radiation.rs`
//! - 使用 `regex` 解析波长注释与字段分隔

use crate::error::{CubindexError, Result};
use crate::models::{parse_wavelength, DiffractionDataset};

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

const FORMAT: &str = "diffraction data";

/// 编译一次，批量模式下各线程共享
fn cached_regex(
    cell: &'static OnceLock<std::result::Result<Regex, regex::Error>>,
    pattern: &str,
) -> Result<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern))
        .as_ref()
        .map_err(|e| CubindexError::Other(format!("invalid regex '{}': {}", pattern, e)))
}

/// `# wavelength: <value>` 注释
fn header_regex() -> Result<&'static Regex> {
    static RE: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    cached_regex(&RE, r"(?i)^#\s*(?:wavelength|lambda)\s*[:=]\s*(\S+)")
}

/// 字段分隔符
fn separator_regex() -> Result<&'static Regex> {
    static RE: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    cached_regex(&RE, r"[\s,;]+")
}

/// 从数据文件读取出的原始内容（波长可能缺失）
#[derive(Debug, Clone, PartialEq)]
pub struct RawDataset {
    pub name: String,
    pub angles: Vec<f64>,
    /// 文件内 `# wavelength:` 注释给出的波长
    pub wavelength: Option<f64>,
}

impl RawDataset {
    /// 结合命令行波长得到完整数据集（命令行优先）
    pub fn into_dataset(self, override_wavelength: Option<f64>) -> Result<DiffractionDataset> {
        let wavelength = override_wavelength.or(self.wavelength).ok_or_else(|| {
            CubindexError::ConfigurationError(format!(
                "no wavelength for dataset '{}': pass --wavelength or add a '# wavelength:' header",
                self.name
            ))
        })?;
        Ok(DiffractionDataset::new(self.name, self.angles, wavelength))
    }
}

/// 解析数据文件
pub fn parse_dataset_file(path: &Path) -> Result<RawDataset> {
    let content = fs::read_to_string(path).map_err(|e| CubindexError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_dataset_content(&content, &path.display().to_string(), &dataset_name(path))
}

/// 数据集名称（文件名去掉扩展名），也是输出文件的前缀
pub fn dataset_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset")
        .to_string()
}

/// 从字符串内容解析
pub fn parse_dataset_content(content: &str, source: &str, name: &str) -> Result<RawDataset> {
    let header_re = header_regex()?;
    let sep_re = separator_regex()?;

    let parse_error = |reason: String| CubindexError::ParseError {
        format: FORMAT.to_string(),
        path: source.to_string(),
        reason,
    };

    let mut wavelength = None;
    let mut angles = Vec::new();
    let mut seen_data_line = false;

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('#') {
            if let Some(caps) = header_re.captures(line) {
                let value = parse_wavelength(&caps[1])
                    .map_err(|e| parse_error(format!("line {}: {}", line_no + 1, e)))?;
                wavelength = Some(value);
            }
            continue;
        }

        let first = sep_re
            .split(line)
            .find(|field| !field.is_empty())
            .unwrap_or_default();

        match first.parse::<f64>() {
            Ok(angle) => angles.push(angle),
            // 第一条数据行允许是列名
            Err(_) if !seen_data_line => {}
            Err(_) => {
                return Err(parse_error(format!(
                    "line {}: '{}' is not a 2θ value",
                    line_no + 1,
                    first
                )))
            }
        }
        seen_data_line = true;
    }

    if angles.is_empty() {
        return Err(parse_error("no 2θ values found".to_string()));
    }

    Ok(RawDataset {
        name: name.to_string(),
        angles,
        wavelength,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_xy_with_header() {
        let content = r#"# Pt powder, synchrotron
# wavelength: 0.41
two_theta intensity
10.378  100
11.992  45.2

16.999  30
"#;
        let raw = parse_dataset_content(content, "pt.xy", "pt").unwrap();
        assert_eq!(raw.name, "pt");
        assert_eq!(raw.angles, vec![10.378, 11.992, 16.999]);
        assert_eq!(raw.wavelength, Some(0.41));
    }

    #[test]
    fn test_parse_csv_and_named_source() {
        let content = "# Wavelength = cu-ka1\n38.2,100\n44.4;52\n";
        let raw = parse_dataset_content(content, "x.csv", "x").unwrap();
        assert_eq!(raw.angles, vec![38.2, 44.4]);
        assert_eq!(raw.wavelength, Some(1.5406));
    }

    #[test]
    fn test_parse_rejects_late_garbage() {
        let content = "10.0\nabc\n";
        let err = parse_dataset_content(content, "bad.xy", "bad").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_parse_empty_is_error() {
        assert!(parse_dataset_content("# nothing here\n", "e.xy", "e").is_err());
    }

    #[test]
    fn test_regexes_compiled_once() {
        let a = header_regex().unwrap();
        let b = header_regex().unwrap();
        assert!(std::ptr::eq(a, b));
        assert!(std::ptr::eq(separator_regex().unwrap(), separator_regex().unwrap()));
        assert!(a.is_match("# lambda = 0.41"));
    }

    #[test]
    fn test_wavelength_precedence() {
        let raw = parse_dataset_content("# wavelength: 0.41\n10.0\n", "a", "a").unwrap();
        let ds = raw.clone().into_dataset(Some(1.5406)).unwrap();
        assert_eq!(ds.wavelength, 1.5406);
        let ds = raw.into_dataset(None).unwrap();
        assert_eq!(ds.wavelength, 0.41);

        let raw = parse_dataset_content("10.0\n", "b", "b").unwrap();
        assert!(matches!(
            raw.into_dataset(None),
            Err(CubindexError::ConfigurationError(_))
        ));
    }
}
