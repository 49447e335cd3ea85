//! # 晶格常数散点图
//!
//! 使用 `plotters` 绘制 a 对 (hkl) 的散点图，每个 d 间距一个系列。
//! 横轴为分类器输出顺序的 (hkl) 标签。
//!
//! ## 依赖关系
//! - 被 `commands/index.rs` 调用
//! - 使用 `indexing/pipeline.rs` 的 StructureResult

use crate::error::{CubindexError, Result};
use crate::indexing::StructureResult;
use crate::report::spacing_labels;

use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// 图像尺寸与格式
#[derive(Debug, Clone, Copy)]
pub struct PlotOptions {
    pub width: u32,
    pub height: u32,
    pub use_svg: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 500,
            use_svg: false,
        }
    }
}

/// 生成晶格常数散点图
pub fn generate_lattice_plot(
    result: &StructureResult,
    output_path: &Path,
    title: &str,
    options: PlotOptions,
) -> Result<()> {
    if result.matrix.is_empty() {
        return Err(CubindexError::PlotError(format!(
            "nothing to plot for {}: no index/spacing pairs",
            result.structure
        )));
    }

    if options.use_svg {
        let root = SVGBackend::new(output_path, (options.width, options.height))
            .into_drawing_area();
        draw_lattice_chart(&root, result, title)?;
        root.present()
            .map_err(|e| CubindexError::PlotError(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, (options.width, options.height))
            .into_drawing_area();
        draw_lattice_chart(&root, result, title)?;
        root.present()
            .map_err(|e| CubindexError::PlotError(e.to_string()))?;
    }
    Ok(())
}

/// 绘图核心逻辑
fn draw_lattice_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    result: &StructureResult,
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| CubindexError::PlotError(format!("{:?}", e)))?;

    let labels: Vec<String> = result.indices.iter().map(|p| p.to_string()).collect();
    let n = labels.len();

    let (y_min, y_max) = result.matrix.value_range().unwrap_or((0.0, 1.0));
    let pad = ((y_max - y_min) * 0.05).max(0.1);

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 24).into_font())
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), (y_min - pad)..(y_max + pad))
        .map_err(|e| CubindexError::PlotError(format!("{:?}", e)))?;

    let label_formatter = |x: &f64| {
        let pos = x.round();
        if (x - pos).abs() > 1e-6 || pos < 0.0 {
            return String::new();
        }
        labels.get(pos as usize).cloned().unwrap_or_default()
    };

    chart
        .configure_mesh()
        .x_labels(n)
        .x_label_formatter(&label_formatter)
        .x_desc("(h k l)")
        .y_desc("Lattice parameter, a (Å)")
        .x_label_style(("sans-serif", 12))
        .y_label_style(("sans-serif", 14))
        .axis_desc_style(("sans-serif", 16))
        .disable_x_mesh()
        .draw()
        .map_err(|e| CubindexError::PlotError(format!("{:?}", e)))?;

    let series_labels = spacing_labels(&result.ranked.spacings);
    for (col, label) in series_labels.into_iter().enumerate() {
        let color = Palette99::pick(col).mix(1.0);
        let values = result.matrix.column(col);

        chart
            .draw_series(
                values
                    .iter()
                    .enumerate()
                    .map(|(row, &a)| Cross::new((row as f64, a), 5, color.stroke_width(2))),
            )
            .map_err(|e| CubindexError::PlotError(format!("{:?}", e)))?
            .label(label)
            .legend(move |(x, y)| Cross::new((x + 8, y), 5, color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .label_font(("sans-serif", 12))
        .draw()
        .map_err(|e| CubindexError::PlotError(format!("{:?}", e)))?;

    Ok(())
}
