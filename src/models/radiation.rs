//! # X 射线辐射源波长
//!
//! 预定义常见靶材特征谱线波长，并解析用户输入（名称或数值）。
//!
//! ## 依赖关系
//! - 被 `cli/`, `parsers/dataset.rs` 使用

/// 预定义辐射源波长 (Å)
pub fn get_predefined_wavelength(name: &str) -> Option<f64> {
    match name.to_lowercase().as_str() {
        "cu-ka" | "cuka" => Some(1.5418),
        "cu-ka1" | "cuka1" => Some(1.5406),
        "cu-ka2" | "cuka2" => Some(1.5444),
        "cu-kb1" | "cukb1" => Some(1.3922),
        "mo-ka" | "moka" => Some(0.7107),
        "mo-ka1" | "moka1" => Some(0.7093),
        "co-ka" | "coka" => Some(1.7903),
        "fe-ka" | "feka" => Some(1.9373),
        "cr-ka" | "crka" => Some(2.2910),
        "ag-ka" | "agka" => Some(0.5609),
        _ => None,
    }
}

/// 解析波长输入（辐射源名称或数值）
pub fn parse_wavelength(input: &str) -> Result<f64, String> {
    let input = input.trim();
    if let Some(wl) = get_predefined_wavelength(input) {
        return Ok(wl);
    }
    let value = input.parse::<f64>().map_err(|_| {
        format!(
            "Invalid wavelength '{}'. Use a number (e.g., 0.41) or a name: cu-ka, mo-ka, co-ka, fe-ka, cr-ka, ag-ka",
            input
        )
    })?;
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("Wavelength must be positive, got '{}'", input));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wavelength() {
        assert_eq!(parse_wavelength("cu-ka1"), Ok(1.5406));
        assert_eq!(parse_wavelength("MoKa"), Ok(0.7107));
        assert_eq!(parse_wavelength(" 0.41 "), Ok(0.41));
        assert!(parse_wavelength("xx").is_err());
        assert!(parse_wavelength("-1").is_err());
        assert!(parse_wavelength("0").is_err());
    }
}
