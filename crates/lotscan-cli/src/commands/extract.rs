//! Extract command - build one lot table from a directory of catalogs.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::{stream, StreamExt};
use glob::{glob, Pattern};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use lotscan_core::catalog::source_name;
use lotscan_core::error::DocumentError;
use lotscan_core::table::create_writer;
use lotscan_core::{
    DocumentOutcome, DocumentReader, FileDocumentReader, LotscanConfig, LotscanError,
    RecordAssembler, RunReport, TableFormat,
};

use super::{load_config, ExtractionOverrides};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Directory containing catalog documents
    #[arg(required = true)]
    input: PathBuf,

    /// Output table (default: output.file_name from the config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output table format
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Number of documents processed in parallel
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Document extension to include (repeatable, replaces the configured list)
    #[arg(long = "ext", value_name = "EXT")]
    extensions: Vec<String>,

    /// Descend into subdirectories
    #[arg(short, long)]
    recursive: bool,

    #[command(flatten)]
    extraction: ExtractionOverrides,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FormatArg {
    /// Comma-separated table with a header row
    Csv,
    /// {"columns": [...], "rows": [...]}
    Json,
}

impl From<FormatArg> for TableFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Csv => TableFormat::Csv,
            FormatArg::Json => TableFormat::Json,
        }
    }
}

type DocumentResult = (String, Result<DocumentOutcome, DocumentError>);

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    args.extraction.apply(&mut config.extraction);
    if !args.extensions.is_empty() {
        config.input.extensions = args.extensions.clone();
    }

    if !args.input.is_dir() {
        return Err(LotscanError::InputNotFound(args.input.clone()).into());
    }

    let files = discover_documents(&args.input, &config.input.extensions, args.recursive)?;
    if files.is_empty() {
        return Err(LotscanError::NoDocuments(format!(
            "no {} files in {}",
            config.input.extensions.join("/"),
            args.input.display()
        ))
        .into());
    }

    println!(
        "{} Found {} catalog documents",
        style("ℹ").blue(),
        files.len()
    );

    let format: TableFormat = args.format.map(Into::into).unwrap_or(config.output.format);
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&config, format));

    let assembler = Arc::new(RecordAssembler::new(&config.extraction)?);
    let results = process_documents(assembler, files, args.jobs).await?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = create_writer(format, &output_path)?;
    let report = RecordAssembler::finish(results, writer.as_mut())?;
    drop(writer);

    print_summary(&report);
    println!(
        "{} Wrote {} records to {} in {:?}",
        style("✓").green(),
        report.total_records,
        output_path.display(),
        start.elapsed()
    );

    Ok(())
}

/// Documents directly in `dir` (or below it) with a matching extension, sorted by path.
fn discover_documents(dir: &Path, extensions: &[String], recursive: bool) -> anyhow::Result<Vec<PathBuf>> {
    let base = Pattern::escape(&dir.to_string_lossy());
    let pattern = if recursive {
        format!("{}/**/*", base)
    } else {
        format!("{}/*", base)
    };
    debug!("Discovering documents with pattern {}", pattern);

    let mut files: Vec<PathBuf> = glob(&pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            extensions.iter().any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
        .collect();
    files.sort();

    Ok(files)
}

/// Read and extract documents on blocking workers, keeping discovery order.
async fn process_documents(
    assembler: Arc<RecordAssembler>,
    files: Vec<PathBuf>,
    jobs: usize,
) -> anyhow::Result<Vec<DocumentResult>> {
    let reader: Arc<dyn DocumentReader> = Arc::new(FileDocumentReader::new());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents {msg}")?
            .progress_chars("=>-"),
    );

    let handles = files.into_iter().map(|path| {
        let assembler = Arc::clone(&assembler);
        let reader = Arc::clone(&reader);
        let pb = pb.clone();
        tokio::task::spawn_blocking(move || {
            let source = source_name(&path);
            pb.set_message(source.clone());
            let result = assembler.process_document(&path, reader.as_ref());
            pb.inc(1);
            (source, result)
        })
    });

    let joined: Vec<_> = stream::iter(handles).buffered(jobs.max(1)).collect().await;
    pb.finish_and_clear();

    let mut results = Vec::with_capacity(joined.len());
    for handle in joined {
        results.push(handle?);
    }

    info!("Processed {} documents with {} workers", results.len(), jobs.max(1));
    Ok(results)
}

fn default_output(config: &LotscanConfig, format: TableFormat) -> PathBuf {
    Path::new(&config.output.file_name).with_extension(format.extension())
}

fn print_summary(report: &RunReport) {
    println!();
    for document in &report.documents {
        println!(
            "  {} {}: {} records ({} segments, {} discarded, {} skipped)",
            style("•").cyan(),
            document.source,
            style(document.records).green(),
            document.segments,
            document.discarded,
            document.skipped
        );
    }

    if !report.failed.is_empty() {
        println!();
        println!("{}", style("Failed documents:").red());
        for failed in &report.failed {
            println!("  - {}: {}", failed.source, failed.reason);
        }
    }
    println!();
}
