//! Extract command - run the commodity pipeline on a single OCR result.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use tabex_core::{
    ColumnAddressing, CommodityPipeline, ExtractionResult, Measurement, OcrResult, TableExtraction,
    TabexConfig, TextExtraction,
};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (OCR result JSON, or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    #[command(flatten)]
    pipeline: PipelineArgs,
}

/// Pipeline options shared by the extract and batch commands.
#[derive(Args, Clone)]
pub struct PipelineArgs {
    /// Treat input files as recognized plain text
    #[arg(long)]
    plain_text: bool,

    /// How product cells are located within a row
    #[arg(long, value_enum)]
    addressing: Option<Addressing>,

    /// Build one table per page
    #[arg(long)]
    per_page: bool,

    /// Mine the text when the document structure holds no rows
    #[arg(long)]
    fallback_to_text: bool,
}

impl PipelineArgs {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut TabexConfig) {
        if let Some(addressing) = self.addressing {
            config.table.column_addressing = addressing.into();
        }
        if self.per_page {
            config.table.table_per_page = true;
        }
        if self.fallback_to_text {
            config.pipeline.fallback_to_text = true;
        }
    }

    /// Read an input file as plain text or as an OCR result.
    ///
    /// `.txt` files are always read as plain text.
    pub fn read_input(&self, path: &Path) -> anyhow::Result<OcrResult> {
        let content = fs::read_to_string(path)?;

        let is_text = self.plain_text
            || path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("txt"));

        let mut ocr = if is_text {
            OcrResult::from_text(content)
        } else {
            OcrResult::from_json(&content)
                .map_err(|e| anyhow::anyhow!("Invalid OCR result in {}: {}", path.display(), e))?
        };

        if ocr.file_name.is_none() {
            ocr.file_name = path.file_name().and_then(|n| n.to_str()).map(String::from);
        }

        Ok(ocr)
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Addressing {
    /// By order of appearance within the row (default)
    Positional,
    /// By the column span a word starts in
    Aligned,
}

impl From<Addressing> for ColumnAddressing {
    fn from(addressing: Addressing) -> Self {
        match addressing {
            Addressing::Positional => ColumnAddressing::Positional,
            Addressing::Aligned => ColumnAddressing::Aligned,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for outputs of this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::config::load(config_path)?;
    args.pipeline.apply(&mut config);

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Reading OCR result...");
    let ocr = args.pipeline.read_input(&args.input)?;

    pb.set_message("Extracting commodities...");
    let pipeline = CommodityPipeline::new(&config)?;
    let result = pipeline.process_result(&ocr);

    pb.finish_and_clear();

    if let Some(reason) = result.reason() {
        eprintln!("{} No data extracted: {}", style("⚠").yellow(), reason);
    }

    let output = format_result(&result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Render an extraction result in the requested format.
pub fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    match result {
        ExtractionResult::Table(table) => {
            wtr.write_record([
                "product_name",
                "table_index",
                "row_index",
                "confidence",
                "context",
            ])?;
            for product in &table.products {
                wtr.write_record([
                    product.name.as_str(),
                    &product.table_index.to_string(),
                    &product.row_index.to_string(),
                    &format!("{:.2}", product.confidence),
                    &product.context,
                ])?;
            }
        }
        ExtractionResult::Text(text) => {
            wtr.write_record([
                "name",
                "quantity",
                "quantity_unit",
                "weight",
                "weight_unit",
                "price",
                "price_unit",
                "line_number",
            ])?;
            for line in &text.commodities {
                let (quantity, quantity_unit) = measure_columns(line.quantity.as_ref());
                let (weight, weight_unit) = measure_columns(line.weight.as_ref());
                let (price, price_unit) = measure_columns(line.price.as_ref());

                wtr.write_record([
                    line.name.as_str(),
                    &quantity,
                    &quantity_unit,
                    &weight,
                    &weight_unit,
                    &price,
                    &price_unit,
                    &line.line_number.to_string(),
                ])?;
            }
        }
        ExtractionResult::Failure(reason) => {
            wtr.write_record(["status", "reason"])?;
            wtr.write_record(["failure".to_string(), reason.to_string()])?;
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn measure_columns(measurement: Option<&Measurement>) -> (String, String) {
    measurement
        .map(|m| (m.value.to_string(), m.unit.clone().unwrap_or_default()))
        .unwrap_or_default()
}

fn measure(m: &Measurement) -> String {
    match &m.unit {
        Some(unit) => format!("{} {}", m.value, unit),
        None => m.value.to_string(),
    }
}

fn format_text(result: &ExtractionResult) -> String {
    match result {
        ExtractionResult::Table(table) => format_table_text(table),
        ExtractionResult::Text(text) => format_text_text(text),
        ExtractionResult::Failure(reason) => format!("No data extracted: {}\n", reason),
    }
}

fn format_table_text(extraction: &TableExtraction) -> String {
    let summary = &extraction.summary;
    let mut output = String::new();

    output.push_str(&format!(
        "Tables: {} ({} rows, {} columns)\n",
        summary.total_tables, summary.total_rows, summary.total_columns
    ));

    match &extraction.commodity_column {
        Some(column) => output.push_str(&format!(
            "Commodity column: {} (table {}, column {})\n",
            column.header_text, column.table_index, column.column_index
        )),
        None => output.push_str("Commodity column: not found\n"),
    }
    output.push('\n');

    output.push_str(&format!("Products ({}):\n", extraction.products.len()));
    for product in &extraction.products {
        output.push_str(&format!(
            "  - {} [table {}, row {}, confidence {:.2}]\n",
            product.name, product.table_index, product.row_index, product.confidence
        ));
    }

    for (index, table) in extraction.tables.iter().enumerate() {
        output.push('\n');
        match table.page_index {
            Some(page) => output.push_str(&format!("Table {} (page {}):\n", index, page + 1)),
            None => output.push_str(&format!("Table {}:\n", index)),
        }

        let headers: Vec<&str> = table.headers.iter().map(|h| h.text.as_str()).collect();
        output.push_str(&format!("  {}\n", headers.join(" ")));

        for row in table.grid() {
            let cells: Vec<String> = row
                .into_iter()
                .map(|cell| cell.map(|c| c.text).unwrap_or_default())
                .collect();
            output.push_str(&format!("  {}\n", cells.join(" | ")));
        }
    }

    output
}

fn format_text_text(extraction: &TextExtraction) -> String {
    let mut output = String::new();

    if let Some(name) = &extraction.metadata.file_name {
        output.push_str(&format!("File: {}\n\n", name));
    }

    output.push_str(&format!("Commodities ({}):\n", extraction.commodities.len()));
    for line in &extraction.commodities {
        let mut details = Vec::new();
        if let Some(q) = &line.quantity {
            details.push(format!("qty {}", measure(q)));
        }
        if let Some(w) = &line.weight {
            details.push(format!("weight {}", measure(w)));
        }
        if let Some(p) = &line.price {
            details.push(format!("price {}", measure(p)));
        }

        if details.is_empty() {
            output.push_str(&format!("  - {}\n", line.name));
        } else {
            output.push_str(&format!("  - {} [{}]\n", line.name, details.join(", ")));
        }
    }
    output.push('\n');

    output.push_str(&format!("Products ({}):\n", extraction.products.len()));
    for product in &extraction.products {
        output.push_str(&format!("  - {} ({:.2})\n", product.name, product.confidence));
    }
    output.push('\n');

    for (label, matches) in [
        ("Quantities", &extraction.quantities),
        ("Weights", &extraction.weights),
        ("Prices", &extraction.prices),
    ] {
        let values: Vec<String> = matches.iter().map(|m| measure(&m.value)).collect();
        output.push_str(&format!("{}: {}\n", label, values.join(", ")));
    }

    output
}
