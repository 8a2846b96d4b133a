//! Inspect command - show how one catalog is normalized, segmented and extracted.

use std::io;
use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use lotscan_core::catalog::source_name;
use lotscan_core::{
    AuctionRecord, CsvTableWriter, DocumentReader, FieldProvenance, FileDocumentReader,
    LotscanError, RecordAssembler, TableWriter, COLUMNS,
};

use super::{load_config, ExtractionOverrides};

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Catalog document (PDF or text export)
    #[arg(required = true)]
    input: PathBuf,

    /// Print the normalized text
    #[arg(long)]
    normalized: bool,

    /// Print every segment's text
    #[arg(long)]
    segments: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    #[command(flatten)]
    extraction: ExtractionOverrides,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report with rule provenance
    Text,
    /// Full report as JSON
    Json,
    /// Records that pass the validity gate, as a CSV table
    Csv,
}

/// Everything learned about one segment.
#[derive(Serialize)]
struct SegmentReport {
    index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    admitted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<AuctionRecord>,
    provenance: Vec<FieldProvenance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct InspectReport {
    source: String,
    pages: usize,
    boundaries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    normalized: Option<String>,
    segments: Vec<SegmentReport>,
}

pub async fn run(args: InspectArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    args.extraction.apply(&mut config.extraction);

    if !args.input.is_file() {
        return Err(LotscanError::InputNotFound(args.input.clone()).into());
    }

    info!("Inspecting {}", args.input.display());
    let pages = FileDocumentReader::new().extract_page_texts(&args.input)?;
    let assembler = RecordAssembler::new(&config.extraction)?;

    let text = assembler.normalizer().normalize(&pages);
    let segments = assembler.segmenter().segment(&text);

    let mut report = InspectReport {
        source: source_name(&args.input),
        pages: pages.len(),
        boundaries: text.boundary_count(),
        normalized: args.normalized.then(|| text.to_string()),
        segments: Vec::with_capacity(segments.len()),
    };

    for segment in &segments {
        let mut entry = SegmentReport {
            index: segment.index(),
            text: args.segments.then(|| segment.text().to_string()),
            admitted: false,
            record: None,
            provenance: Vec::new(),
            error: None,
        };

        match assembler.extractor().extract(segment) {
            Ok(extraction) => {
                let record = extraction.record;
                entry.admitted = assembler.gate().admits(&record.artist, &record.title);
                entry.record = Some(record);
                entry.provenance = extraction.provenance;
            }
            Err(e) => entry.error = Some(e.to_string()),
        }

        report.segments.push(entry);
    }

    match args.format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Csv => {
            let records: Vec<AuctionRecord> = report
                .segments
                .into_iter()
                .filter(|s| s.admitted)
                .filter_map(|s| s.record)
                .collect();
            let mut writer = CsvTableWriter::new(io::stdout().lock());
            writer.write_table(&records)?;
        }
    }

    Ok(())
}

fn print_text(report: &InspectReport) {
    println!(
        "{} {}: {} pages, {} lot boundaries, {} segments",
        style("ℹ").blue(),
        report.source,
        report.pages,
        report.boundaries,
        report.segments.len()
    );

    if let Some(normalized) = &report.normalized {
        println!();
        println!("{}", style("Normalized text:").bold());
        println!("{}", normalized);
    }

    for segment in &report.segments {
        println!();
        let status = match (&segment.error, segment.admitted) {
            (Some(_), _) => style("skipped").red(),
            (None, true) => style("kept").green(),
            (None, false) => style("discarded").yellow(),
        };
        println!("{} {}", style(format!("Segment {}", segment.index)).bold(), status);

        if let Some(text) = &segment.text {
            println!("  {}", style(text).dim());
        }
        if let Some(error) = &segment.error {
            println!("  {}", style(error).red());
        }
        if let Some(record) = &segment.record {
            print_record(record, &segment.provenance);
        }
    }
}

fn print_record(record: &AuctionRecord, provenance: &[FieldProvenance]) {
    let fields = [
        ("artist", &COLUMNS[0..1]),
        ("title", &COLUMNS[1..2]),
        ("medium", &COLUMNS[2..3]),
        ("year", &COLUMNS[3..4]),
        ("dimensions", &COLUMNS[4..8]),
        ("sale", &COLUMNS[8..11]),
        ("estimate_price", &COLUMNS[11..12]),
        ("sold_price", &COLUMNS[12..13]),
    ];
    let row = record.to_row();

    let mut column = 0;
    for (field, columns) in fields {
        let rule = provenance
            .iter()
            .find(|p| p.field == field)
            .map(|p| format!("{} (tier {})", p.rule, p.tier));

        for name in columns {
            let value = row[column];
            column += 1;
            match &rule {
                Some(rule) => println!("  {:<15} {}  {}", name, value, style(rule).dim()),
                None => println!("  {:<15} {}", name, style("-").dim()),
            }
        }
    }
}
