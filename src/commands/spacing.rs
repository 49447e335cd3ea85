//! # spacing 子命令实现
//!
//! 使用 Bragg 定律在 2θ 与 d 间距之间换算并打印。
//!
//! ## 依赖关系
//! - 使用 `cli/spacing.rs` 定义的 SpacingArgs
//! - 使用 `indexing/bragg.rs`

use crate::cli::spacing::SpacingArgs;
use crate::error::Result;
use crate::indexing::BraggSpacingSolver;
use crate::models::DiffractionDataset;
use crate::report;
use crate::utils::output;

/// 执行 spacing 命令
pub fn execute(args: SpacingArgs) -> Result<()> {
    output::print_header("d-spacings (Bragg's law)");

    let (two_thetas, spacings) = if args.d_spacings.is_empty() {
        spacings_from_angles(args.angles, args.wavelength)?
    } else {
        angles_from_spacings(args.d_spacings, args.wavelength)?
    };

    output::print_info(&format!("Using wavelength: {:.5} Å", args.wavelength));
    println!("{}", report::table::spacing_table(&two_thetas, &spacings));

    Ok(())
}

/// 2θ → d
fn spacings_from_angles(angles: Vec<f64>, wavelength: f64) -> Result<(Vec<f64>, Vec<f64>)> {
    let dataset = DiffractionDataset::new("cli", angles, wavelength);
    let solver = BraggSpacingSolver::new(dataset.wavelength)?;

    let mut two_thetas = Vec::with_capacity(dataset.len());
    let mut spacings = Vec::with_capacity(dataset.len());
    for measurement in dataset.measurements() {
        spacings.push(solver.spacing(measurement.two_theta)?);
        two_thetas.push(measurement.two_theta);
    }
    Ok((two_thetas, spacings))
}

/// d → 2θ
fn angles_from_spacings(spacings: Vec<f64>, wavelength: f64) -> Result<(Vec<f64>, Vec<f64>)> {
    let solver = BraggSpacingSolver::new(wavelength)?;
    let two_thetas = spacings
        .iter()
        .map(|&d| solver.two_theta(d))
        .collect::<Result<Vec<f64>>>()?;
    Ok((two_thetas, spacings))
}
