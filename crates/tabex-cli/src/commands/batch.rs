//! Batch processing command for multiple OCR results.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use tabex_core::{CommodityPipeline, ExtractionResult, Summary};

use super::extract::{format_result, OutputFormat, PipelineArgs};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input glob pattern (e.g., "scans/*.json")
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    #[command(flatten)]
    pipeline: PipelineArgs,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    result: Option<ExtractionResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::config::load(config_path)?;
    args.pipeline.apply(&mut config);
    let pipeline = Arc::new(CommodityPipeline::new(&config)?);

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "json" | "txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut handles = Vec::with_capacity(files.len());

    for path in files {
        let semaphore = semaphore.clone();
        let pipeline = pipeline.clone();
        let reader = args.pipeline.clone();

        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;

            let file_start = Instant::now();
            let task_path = path.clone();
            let outcome = tokio::task::spawn_blocking(move || {
                let ocr = reader.read_input(&task_path)?;
                Ok::<_, anyhow::Error>(pipeline.process_result(&ocr))
            })
            .await?;

            Ok::<_, anyhow::Error>((path, outcome, file_start.elapsed().as_millis() as u64))
        }));
    }

    let mut results = Vec::with_capacity(handles.len());

    for handle in handles {
        let (path, outcome, processing_time_ms) = handle.await??;

        match outcome {
            Ok(result) => {
                results.push(ProcessResult {
                    path,
                    result: Some(result),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        result: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_and_clear();

    if let Some(output_dir) = &args.output_dir {
        for processed in &results {
            if let Some(result) = &processed.result {
                write_output(output_dir, &processed.path, result, args.format)?;
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let extracted = results
        .iter()
        .filter(|r| r.result.as_ref().is_some_and(ExtractionResult::is_success))
        .count();
    let empty = results
        .iter()
        .filter(|r| r.result.as_ref().is_some_and(|res| !res.is_success()))
        .count();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} extracted, {} without data, {} failed",
        style(extracted).green(),
        style(empty).yellow(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for processed in &failed {
            println!(
                "  - {}: {}",
                processed.path.display(),
                processed.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn write_output(
    output_dir: &Path,
    input: &Path,
    result: &ExtractionResult,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let output_name = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("result");

    let output_path = output_dir.join(format!("{}.{}", output_name, format.extension()));
    fs::write(&output_path, format_result(result, format)?)?;
    debug!("Wrote output to {}", output_path.display());

    Ok(())
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "path",
        "tables",
        "rows",
        "commodity_column",
        "products",
        "commodities",
        "quantities",
        "weights",
        "prices",
        "processing_time_ms",
        "error",
    ])?;

    for processed in results {
        let filename = processed
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let time = processed.processing_time_ms.to_string();

        let Some(result) = &processed.result else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                &time,
                processed.error.as_deref().unwrap_or(""),
            ])?;
            continue;
        };

        let mut record = vec![filename.to_string()];
        match result.summary() {
            Some(Summary::Table(s)) => record.extend([
                "success".to_string(),
                "table".to_string(),
                s.total_tables.to_string(),
                s.total_rows.to_string(),
                s.commodity_column_found.to_string(),
                s.product_names_count.to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ]),
            Some(Summary::Text(s)) => record.extend([
                "success".to_string(),
                "text".to_string(),
                String::new(),
                String::new(),
                String::new(),
                s.total_products.to_string(),
                s.total_commodities.to_string(),
                s.total_quantities.to_string(),
                s.total_weights.to_string(),
                s.total_prices.to_string(),
            ]),
            None => {
                record.extend(["failure".to_string()]);
                record.extend(std::iter::repeat(String::new()).take(9));
            }
        }
        record.push(time);
        record.push(result.reason().unwrap_or_default());

        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
