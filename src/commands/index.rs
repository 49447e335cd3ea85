//! # index 子命令实现
//!
//! 由衍射角推断 FCC / BCC 晶格常数。
//!
//! ## 功能
//! - 支持命令行角度、单文件和批量目录三种输入
//! - 并行批量处理（rayon）
//! - 终端表格、CSV 导出、散点图 (PNG/SVG)
//! - 单一晶格失败时仍输出另一晶格的结果（计算、CSV、绘图各阶段）
//! - 批量模式拒绝会写到同一输出名的输入文件，并跳过本工具的导出文件
//!
//! ## 依赖关系
//! - 使用 `cli/index.rs` 定义的 IndexArgs
//! - 使用 `batch/` 模块进行批量处理
//! - 使用 `indexing/` 模块进行计算
//! - 使用 `report/` 模块输出结果

use crate::batch::{collector, BatchRunner, FileCollector, ProcessResult};
use crate::cli::index::{IndexArgs, PlotFormat};
use crate::error::{CubindexError, Result};
use crate::indexing::{
    IndexingPipeline, IndexingReport, PipelineConfig, Structure, StructureResult,
};
use crate::models::DiffractionDataset;
use crate::parsers;
use crate::report::{self, plot::PlotOptions};
use crate::utils::output;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 输出配置
struct OutputOptions {
    output_dir: PathBuf,
    export: bool,
    plot: Option<(PlotOptions, PlotFormat)>,
}

impl OutputOptions {
    fn from_args(args: &IndexArgs) -> Self {
        let plot = if args.no_plot {
            None
        } else {
            Some((
                PlotOptions {
                    width: args.width,
                    height: args.height,
                    use_svg: args.plot_format == PlotFormat::Svg,
                },
                args.plot_format,
            ))
        };

        OutputOptions {
            output_dir: args.output_dir.clone(),
            export: !args.no_export,
            plot,
        }
    }

    fn spacing_csv_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(report::export::spacing_file_name(name))
    }

    fn ranked_csv_path(&self, name: &str, result: &StructureResult) -> PathBuf {
        self.output_dir
            .join(report::export::ranked_file_name(name, result.structure))
    }

    fn plot_path(&self, name: &str, result: &StructureResult, format: PlotFormat) -> PathBuf {
        self.output_dir.join(format!(
            "{}_{}.{}",
            name,
            result.structure.slug(),
            format.extension()
        ))
    }
}

/// 单一晶格某个输出阶段的失败
struct SinkFailure {
    structure: Structure,
    stage: &'static str,
    error: CubindexError,
}

impl fmt::Display for SinkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.structure, self.stage, self.error)
    }
}

/// 写出结果：已写文件与各晶格的失败
#[derive(Default)]
struct OutputSummary {
    written: Vec<PathBuf>,
    failures: Vec<SinkFailure>,
}

/// 计算或输出任一阶段失败的晶格
fn failed_structures(outcome: &IndexingReport, summary: &OutputSummary) -> Vec<Structure> {
    let mut failed: Vec<Structure> = outcome
        .structures
        .iter()
        .filter(|(_, r)| r.is_err())
        .map(|(s, _)| *s)
        .collect();
    for failure in &summary.failures {
        if !failed.contains(&failure.structure) {
            failed.push(failure.structure);
        }
    }
    failed
}

/// 执行 index 命令
pub fn execute(args: IndexArgs) -> Result<()> {
    output::print_header("Cubic Lattice Indexing (FCC / BCC)");

    let config = PipelineConfig {
        max_index: args.max_index,
        top_k: args.top_k,
        structures: args.structure.structures(),
    };

    match &args.input {
        Some(path) if path.is_file() => execute_single_file(path, &args, config),
        Some(path) if path.is_dir() => execute_batch(path, &args, config),
        Some(path) => Err(CubindexError::FileNotFound {
            path: path.display().to_string(),
        }),
        None => execute_cli_angles(&args, config),
    }
}

/// 命令行角度模式
fn execute_cli_angles(args: &IndexArgs, config: PipelineConfig) -> Result<()> {
    if args.angles.is_empty() {
        return Err(CubindexError::ConfigurationError(
            "no input: pass a data file, a directory, or --angles".to_string(),
        ));
    }
    let wavelength = args.wavelength.ok_or_else(|| {
        CubindexError::ConfigurationError("--wavelength is required with --angles".to_string())
    })?;

    let dataset = DiffractionDataset::new("cli", args.angles.clone(), wavelength);
    run_and_report(&dataset, args, config)
}

/// 单文件模式
fn execute_single_file(path: &Path, args: &IndexArgs, config: PipelineConfig) -> Result<()> {
    output::print_info(&format!("Single file mode: '{}'", path.display()));

    let dataset = parsers::parse_dataset_file(path)?.into_dataset(args.wavelength)?;
    output::print_success(&format!(
        "Loaded dataset '{}' ({} peaks)",
        dataset.name,
        dataset.len()
    ));

    run_and_report(&dataset, args, config)
}

/// 运行管线并输出表格、CSV 与图像
fn run_and_report(
    dataset: &DiffractionDataset,
    args: &IndexArgs,
    config: PipelineConfig,
) -> Result<()> {
    output::print_info(&format!(
        "Miller index range: 0..{} | keeping {} lowest-order reflections",
        config.max_index, config.top_k
    ));

    let outcome = IndexingPipeline::new(config).run(dataset)?;
    output::print_info(&format!("Using wavelength: {:.5} Å", outcome.wavelength));

    output::print_header("d-spacings (Bragg's law)");
    println!(
        "{}",
        report::table::spacing_table(&outcome.two_thetas, &outcome.spacings)
    );

    for (structure, result) in &outcome.structures {
        match result {
            Ok(result) => {
                output::print_header(&format!("{} Measurements", structure));
                if result.ranked.is_empty() {
                    output::print_warning(&format!(
                        "No {} reflections in range 0..{}",
                        structure, args.max_index
                    ));
                } else {
                    let (rows, cols) = result.matrix.shape();
                    output::print_info(&format!(
                        "{} allowed indices × {} d-spacings, showing {} lowest-order rows",
                        rows,
                        cols,
                        result.ranked.len()
                    ));
                    println!("{}", report::table::ranked_table(&result.ranked));
                    if let Some(top) = result.ranked.top() {
                        output::print_info(&format!(
                            "Lowest-order {} reflection: {} (g_hkl = {:.4})",
                            structure, top.index, top.g_hkl
                        ));
                    }
                }
            }
            Err(e) => {
                output::print_error(&format!("{} indexing: {}", structure, e));
            }
        }
    }

    let options = OutputOptions::from_args(args);
    let summary = write_outputs(&outcome, &options)?;
    if !summary.written.is_empty() {
        output::print_separator();
        for path in &summary.written {
            output::print_written("saved", &path.display().to_string());
        }
    }
    for failure in &summary.failures {
        output::print_error(&failure.to_string());
    }

    let failed = failed_structures(&outcome, &summary);
    if !failed.is_empty() && failed.len() == outcome.structures.len() {
        return Err(CubindexError::Other(
            "indexing failed for every lattice type".to_string(),
        ));
    }

    Ok(())
}

/// 写出 CSV 与图像
///
/// 输出目录和 d 间距表属于整个数据集，失败即返回错误；
/// 各晶格的 CSV 与图像失败只记录在 `failures` 中，不影响另一晶格。
fn write_outputs(outcome: &IndexingReport, options: &OutputOptions) -> Result<OutputSummary> {
    let mut summary = OutputSummary::default();

    if !options.export && options.plot.is_none() {
        return Ok(summary);
    }

    fs::create_dir_all(&options.output_dir).map_err(|e| CubindexError::FileWriteError {
        path: options.output_dir.display().to_string(),
        source: e,
    })?;

    let name = &outcome.dataset_name;

    if options.export {
        let path = options.spacing_csv_path(name);
        report::export::spacings_to_csv(&outcome.two_thetas, &outcome.spacings, &path)?;
        summary.written.push(path);
    }

    for result in outcome.structures.iter().filter_map(|(_, r)| r.as_ref().ok()) {
        if options.export {
            let path = options.ranked_csv_path(name, result);
            match report::export::ranked_to_csv(&result.ranked, &path) {
                Ok(()) => summary.written.push(path),
                Err(error) => summary.failures.push(SinkFailure {
                    structure: result.structure,
                    stage: "CSV export",
                    error,
                }),
            }
        }

        if let Some((plot_options, format)) = options.plot {
            if result.matrix.is_empty() {
                continue;
            }
            let path = options.plot_path(name, result, format);
            let title = format!("{}: {} Measurements", name, result.structure);
            match report::plot::generate_lattice_plot(result, &path, &title, plot_options) {
                Ok(()) => summary.written.push(path),
                Err(error) => summary.failures.push(SinkFailure {
                    structure: result.structure,
                    stage: "plot",
                    error,
                }),
            }
        }
    }

    Ok(summary)
}

/// 批量处理模式
fn execute_batch(dir: &Path, args: &IndexArgs, config: PipelineConfig) -> Result<()> {
    output::print_info(&format!("Batch mode: directory '{}'", dir.display()));

    let files = FileCollector::new(dir.to_path_buf())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .exclude(report::export::is_export_file)
        .collect();

    if files.is_empty() {
        output::print_warning(&format!(
            "No matching files found with pattern '{}'",
            args.pattern
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} data files", files.len()));

    let shared_names = collector::shared_output_names(&files, parsers::dataset_name);
    if !shared_names.is_empty() {
        for (name, paths) in &shared_names {
            let list: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
            output::print_error(&format!("'{}' is produced by: {}", name, list.join(", ")));
        }
        return Err(CubindexError::InvalidArgument(format!(
            "{} dataset name(s) are shared by several input files and their outputs would overwrite each other; rename the files or narrow --pattern",
            shared_names.len()
        )));
    }

    let shared = Arc::new(BatchIndexConfig {
        pipeline: IndexingPipeline::new(config),
        options: OutputOptions::from_args(args),
        wavelength: args.wavelength,
        overwrite: args.overwrite,
    });

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!("Running on {} threads", runner.jobs()));
    let result = runner.run(files, |file| process_batch_file(file, &shared));

    for msg in &result.successes {
        output::print_success(msg);
    }
    for reason in &result.skips {
        output::print_skip(reason);
    }

    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} files ({} success, {} skipped, {} failed)",
        result.total(),
        result.success,
        result.skipped,
        result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

/// 批量处理共享配置
struct BatchIndexConfig {
    pipeline: IndexingPipeline,
    options: OutputOptions,
    wavelength: Option<f64>,
    overwrite: bool,
}

/// 处理批量模式中的单个文件
fn process_batch_file(input: &PathBuf, config: &Arc<BatchIndexConfig>) -> ProcessResult {
    let source = input.display().to_string();

    let dataset = match parsers::parse_dataset_file(input)
        .and_then(|raw| raw.into_dataset(config.wavelength))
    {
        Ok(d) => d,
        Err(e) => return ProcessResult::Failed(source, e.to_string()),
    };

    let marker = config.options.spacing_csv_path(&dataset.name);
    if marker.exists() && !config.overwrite {
        return ProcessResult::Skipped(format!("Output exists, skipping: {}", marker.display()));
    }

    let outcome = match config.pipeline.run(&dataset) {
        Ok(r) => r,
        Err(e) => return ProcessResult::Failed(source, e.to_string()),
    };

    let mut failures: Vec<String> = outcome
        .structures
        .iter()
        .filter_map(|(s, r)| r.as_ref().err().map(|e| format!("{} indexing: {}", s, e)))
        .collect();

    if !failures.is_empty() && failures.len() == outcome.structures.len() {
        return ProcessResult::Failed(source, failures.join("; "));
    }

    let summary = match write_outputs(&outcome, &config.options) {
        Ok(summary) => summary,
        Err(e) => return ProcessResult::Failed(source, e.to_string()),
    };
    failures.extend(summary.failures.iter().map(SinkFailure::to_string));

    let failed = failed_structures(&outcome, &summary);
    if !failed.is_empty() && failed.len() == outcome.structures.len() {
        return ProcessResult::Failed(source, failures.join("; "));
    }

    if failures.is_empty() {
        ProcessResult::Success(format!("{} -> {} files", source, summary.written.len()))
    } else {
        ProcessResult::Success(format!(
            "{} -> {} files ({})",
            source,
            summary.written.len(),
            failures.join("; ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cubindex-{}-{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn pt_outcome() -> IndexingReport {
        let dataset = DiffractionDataset::new("pt", vec![10.378, 19.955], 0.41);
        IndexingPipeline::new(PipelineConfig {
            max_index: 3,
            ..PipelineConfig::default()
        })
        .run(&dataset)
        .unwrap()
    }

    #[test]
    fn test_csv_failure_isolated_to_one_structure() {
        let dir = scratch_dir("sink");
        // 目录占住 FCC 的输出文件名，使其无法创建
        fs::create_dir_all(dir.join("pt_fcc.csv")).unwrap();

        let options = OutputOptions {
            output_dir: dir.clone(),
            export: true,
            plot: None,
        };
        let outcome = pt_outcome();
        let summary = write_outputs(&outcome, &options).unwrap();

        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].structure, Structure::Fcc);
        assert_eq!(summary.failures[0].stage, "CSV export");
        assert!(summary.failures[0].to_string().starts_with("FCC CSV export: "));

        assert!(dir.join("pt_dspacing.csv").is_file());
        assert!(dir.join("pt_bcc.csv").is_file());
        assert_eq!(summary.written.len(), 2);
        assert_eq!(failed_structures(&outcome, &summary), vec![Structure::Fcc]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_no_outputs_requested() {
        let options = OutputOptions {
            output_dir: PathBuf::from("unused"),
            export: false,
            plot: None,
        };
        let outcome = pt_outcome();
        let summary = write_outputs(&outcome, &options).unwrap();
        assert!(summary.written.is_empty());
        assert!(failed_structures(&outcome, &summary).is_empty());
    }

    #[test]
    fn test_batch_rejects_shared_dataset_names() {
        let dir = scratch_dir("shared");
        fs::write(dir.join("pt.xy"), "10.378\n19.955\n").unwrap();
        fs::write(dir.join("pt.csv"), "11.992\n").unwrap();

        let cli = crate::cli::Cli::try_parse_from([
            "cubindex",
            "index",
            dir.to_str().unwrap(),
            "-w",
            "0.41",
            "--no-plot",
            "-o",
            dir.to_str().unwrap(),
        ])
        .unwrap();
        let args = match cli.command {
            crate::cli::Commands::Index(args) => args,
            _ => panic!("expected index subcommand"),
        };

        let err = execute(args).unwrap_err();
        assert!(matches!(err, CubindexError::InvalidArgument(_)));
        assert!(!dir.join("pt_dspacing.csv").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_batch_ignores_own_exports() {
        let dir = scratch_dir("rerun");
        fs::write(dir.join("pt.xy"), "10.378\n19.955\n").unwrap();

        let run = || {
            let cli = crate::cli::Cli::try_parse_from([
                "cubindex",
                "index",
                dir.to_str().unwrap(),
                "-w",
                "0.41",
                "-n",
                "3",
                "--no-plot",
                "--overwrite",
                "-o",
                dir.to_str().unwrap(),
            ])
            .unwrap();
            match cli.command {
                crate::cli::Commands::Index(args) => execute(args),
                _ => panic!("expected index subcommand"),
            }
        };

        run().unwrap();
        assert!(dir.join("pt_fcc.csv").is_file());

        // 第二次运行不能把 pt_dspacing.csv 等导出文件当成输入
        run().unwrap();
        assert!(!dir.join("pt_dspacing_dspacing.csv").exists());
        assert!(!dir.join("pt_fcc_dspacing.csv").exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
