//! # Bragg 定律求解 d 间距
//!
//! λ = 2d·sin(θ)，θ = 2θ / 2。
//!
//! 输入角度顺序原样保留，不排序、不去重。θ 必须严格位于 (0°, 90°)，
//! 否则返回 `NumericDomainError`，不让无穷大流入下游。
//!
//! ## 依赖关系
//! - 被 `indexing/pipeline.rs`, `commands/spacing.rs` 使用

use crate::error::{CubindexError, Result};

/// Bragg d 间距求解器
#[derive(Debug, Clone, Copy)]
pub struct BraggSpacingSolver {
    /// X 射线波长（Å）
    wavelength: f64,
}

impl BraggSpacingSolver {
    /// 创建求解器，波长必须为有限正数
    pub fn new(wavelength: f64) -> Result<Self> {
        if !wavelength.is_finite() || wavelength <= 0.0 {
            return Err(CubindexError::ConfigurationError(format!(
                "wavelength must be a positive finite number, got {}",
                wavelength
            )));
        }
        Ok(Self { wavelength })
    }

    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    /// 单个 2θ（度）→ d
    pub fn spacing(&self, two_theta: f64) -> Result<f64> {
        if !two_theta.is_finite() {
            return Err(CubindexError::NumericDomainError {
                two_theta,
                reason: "angle is not a finite number".to_string(),
            });
        }

        let theta = two_theta / 2.0;
        if theta <= 0.0 || theta >= 90.0 {
            return Err(CubindexError::NumericDomainError {
                two_theta,
                reason: format!("half-angle {}° is outside (0°, 90°)", theta),
            });
        }

        Ok(self.wavelength / (2.0 * theta.to_radians().sin()))
    }

    /// 2θ 序列 → d 序列（一一对应）
    pub fn solve(&self, two_thetas: &[f64]) -> Result<Vec<f64>> {
        two_thetas.iter().map(|&t| self.spacing(t)).collect()
    }

    /// 逆关系：d → 2θ（度）
    pub fn two_theta(&self, spacing: f64) -> Result<f64> {
        let sin_theta = self.wavelength / (2.0 * spacing);
        if !sin_theta.is_finite() || sin_theta <= 0.0 || sin_theta > 1.0 {
            return Err(CubindexError::NumericDomainError {
                two_theta: f64::NAN,
                reason: format!(
                    "d = {} is unreachable at λ = {} (sin θ = {})",
                    spacing, self.wavelength, sin_theta
                ),
            });
        }
        Ok(2.0 * sin_theta.asin().to_degrees())
    }
}
