use crate::risk::{AnalysisReport, InterfaceMetrics, RiskLevel};
use anyhow::Result;
use colored::*;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
    top: Option<usize>,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W, top: Option<usize>) -> Self {
        Self { writer, top }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> Result<()> {
        self.write_header()?;
        self.write_summary(report)?;
        self.write_weights(report)?;
        self.write_rankings(report)?;
        self.write_distribution(report)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self) -> Result<()> {
        writeln!(self.writer, "# Interface Poisoning Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &AnalysisReport) -> Result<()> {
        let summary = &report.summary;
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Classes | {} |", summary.total_classes)?;
        writeln!(self.writer, "| Interfaces | {} |", summary.total_interfaces)?;
        writeln!(self.writer, "| Max call depth | {} |", summary.max_call_depth)?;
        writeln!(self.writer, "| Average IPI | {:.3} |", summary.average_ipi)?;
        writeln!(
            self.writer,
            "| Single-implementation interfaces | {} |",
            summary.single_implementation_count
        )?;
        writeln!(
            self.writer,
            "| Zero-usage interfaces | {} |",
            summary.zero_usage_count
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_weights(&mut self, report: &AnalysisReport) -> Result<()> {
        let weights = &report.weights;
        writeln!(self.writer, "## Weights")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "α (SIR) = {}, β (UUR) = {}, γ (UMR) = {}, δ (NCD) = {}",
            weights.alpha, weights.beta, weights.gamma, weights.delta
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_rankings(&mut self, report: &AnalysisReport) -> Result<()> {
        writeln!(self.writer, "## Interfaces by poisoning index")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Interface | IC | SIR | IU | UUR | UMR | CD | NCD | IPI | Risk |"
        )?;
        writeln!(
            self.writer,
            "|-----------|----|-----|----|-----|-----|----|-----|-----|------|"
        )?;
        for record in limited(report, self.top) {
            writeln!(
                self.writer,
                "| {} | {} | {:.3} | {} | {:.3} | {:.3} | {} | {:.3} | {:.3} | {} |",
                record.name,
                record.implementer_count,
                record.sir,
                record.usage_count,
                record.uur,
                record.umr,
                record.call_depth,
                record.ncd,
                record.ipi,
                record.risk.display_name()
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_distribution(&mut self, report: &AnalysisReport) -> Result<()> {
        let distribution = &report.distribution;
        writeln!(self.writer, "## Risk distribution")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "- HIGH: {} ({:.1}%)",
            distribution.high_count, distribution.high_percent
        )?;
        writeln!(
            self.writer,
            "- MEDIUM: {} ({:.1}%)",
            distribution.medium_count, distribution.medium_percent
        )?;
        writeln!(
            self.writer,
            "- LOW: {} ({:.1}%)",
            distribution.low_count, distribution.low_percent
        )?;
        Ok(())
    }
}

pub struct TerminalWriter {
    top: Option<usize>,
}

impl TerminalWriter {
    pub fn new(top: Option<usize>) -> Self {
        Self { top }
    }
}

impl OutputWriter for TerminalWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> Result<()> {
        print_header();
        print_summary(report);
        print_rankings(report, self.top);
        print_distribution(report);
        print_high_risk(report);
        Ok(())
    }
}

fn print_header() {
    println!("{}", "Interface Poisoning Report".bold().blue());
    println!("{}", "==========================".blue());
    println!();
}

fn print_summary(report: &AnalysisReport) {
    let summary = &report.summary;
    println!("Summary:");
    println!("  Classes: {}", summary.total_classes);
    println!("  Interfaces: {}", summary.total_interfaces);
    println!("  Max call depth: {}", summary.max_call_depth);
    println!(
        "  IPI average: {:.3} (min {:.3}, max {:.3})",
        summary.average_ipi, summary.min_ipi, summary.max_ipi
    );
    println!(
        "  Single-implementation interfaces: {}",
        summary.single_implementation_count
    );
    println!("  Zero-usage interfaces: {}", summary.zero_usage_count);
    println!();
}

fn print_rankings(report: &AnalysisReport, top: Option<usize>) {
    println!(
        "{:<30} {:>4} {:>6} {:>4} {:>6} {:>6} {:>4} {:>6} {:>7}  {}",
        "Interface".bold(),
        "IC",
        "SIR",
        "IU",
        "UUR",
        "UMR",
        "CD",
        "NCD",
        "IPI",
        "Risk".bold()
    );
    for record in limited(report, top) {
        println!(
            "{:<30} {:>4} {:>6.3} {:>4} {:>6.3} {:>6.3} {:>4} {:>6.3} {:>7.3}  {}",
            record.name,
            record.implementer_count,
            record.sir,
            record.usage_count,
            record.uur,
            record.umr,
            record.call_depth,
            record.ncd,
            record.ipi,
            risk_label(record.risk)
        );
    }
    println!();
}

fn print_distribution(report: &AnalysisReport) {
    let distribution = &report.distribution;
    println!("Risk distribution:");
    println!(
        "  {}: {} ({:.1}%)",
        "HIGH".red().bold(),
        distribution.high_count,
        distribution.high_percent
    );
    println!(
        "  {}: {} ({:.1}%)",
        "MEDIUM".yellow(),
        distribution.medium_count,
        distribution.medium_percent
    );
    println!(
        "  {}: {} ({:.1}%)",
        "LOW".green(),
        distribution.low_count,
        distribution.low_percent
    );
    println!();
}

fn print_high_risk(report: &AnalysisReport) {
    let worst: Vec<&InterfaceMetrics> = report.high_risk().take(5).collect();
    if worst.is_empty() {
        return;
    }
    println!("{}", "High-risk interfaces:".red().bold());
    for record in worst {
        println!("  - {} (IPI: {:.3})", record.name.yellow(), record.ipi);
    }
    println!();
}

fn risk_label(risk: RiskLevel) -> ColoredString {
    match risk {
        RiskLevel::High => "HIGH".red().bold(),
        RiskLevel::Medium => "MEDIUM".yellow(),
        RiskLevel::Low => "LOW".green(),
    }
}

fn limited<'a>(
    report: &'a AnalysisReport,
    top: Option<usize>,
) -> impl Iterator<Item = &'a InterfaceMetrics> {
    report.records.iter().take(top.unwrap_or(usize::MAX))
}

pub fn create_writer(
    format: OutputFormat,
    output: Option<&Path>,
    top: Option<usize>,
) -> Result<Box<dyn OutputWriter>> {
    let writer: Box<dyn OutputWriter> = match (format, output) {
        (OutputFormat::Json, Some(path)) => Box::new(JsonWriter::new(File::create(path)?)),
        (OutputFormat::Json, None) => Box::new(JsonWriter::new(std::io::stdout())),
        (OutputFormat::Markdown, Some(path)) => {
            Box::new(MarkdownWriter::new(File::create(path)?, top))
        }
        (OutputFormat::Markdown, None) => Box::new(MarkdownWriter::new(std::io::stdout(), top)),
        (OutputFormat::Terminal, _) => Box::new(TerminalWriter::new(top)),
    };
    Ok(writer)
}
