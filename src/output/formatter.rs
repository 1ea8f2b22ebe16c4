//! Output formatters for frequency and topic reports

use crate::config::OutputFormat;
use crate::error::{ExamAnalyzerError, Result};
use crate::output::report::*;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_frequencies(&self, report: &FrequencyReport) -> Result<String>;
    fn format_topics(&self, report: &TopicReport) -> Result<String>;
}

/// Console formatter with colored horizontal bar charts
pub struct ConsoleFormatter {
    use_colors: bool,
    bar_width: usize,
}

/// Structured key-value output (JSON) for downstream tools
pub struct StructuredFormatter {
    pretty: bool,
}

/// Plain sorted listing, one `key: value` line per entry
pub struct ListingFormatter;

/// HTML page with bar charts
pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    structured_formatter: StructuredFormatter,
    listing_formatter: ListingFormatter,
    html_formatter: HtmlFormatter,
}

struct HtmlBar {
    label: String,
    value: String,
    width: u32,
}

struct HtmlChart {
    name: String,
    bars: Vec<HtmlBar>,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        h1 { color: #007acc; border-bottom: 3px solid #007acc; padding-bottom: 10px; }
        h2 { color: #495057; margin-top: 30px; }
        .meta { color: #6c757d; font-size: 0.9em; }
        .row { display: flex; align-items: center; margin: 3px 0; }
        .label { width: 220px; text-align: right; padding-right: 10px; overflow: hidden; }
        .bar { background: #007acc; height: 16px; border-radius: 3px; }
        .value { padding-left: 8px; font-weight: bold; }
        .skipped { color: #dc3545; }
    </style>
    {% endif %}
</head>
<body>
    <h1>{{ title }}</h1>
    <p class="meta">Generated {{ generated_at }} | {{ document_count }} document(s) | {{ processing_time }}ms | v{{ version }}</p>
    {% for chart in charts %}
    <h2>{{ chart.name }}</h2>
    {% for bar in chart.bars %}
    <div class="row">
        <span class="label">{{ bar.label }}</span>
        <span class="bar" style="width: {{ bar.width }}%"></span>
        <span class="value">{{ bar.value }}</span>
    </div>
    {% endfor %}
    {% endfor %}
    {% if !skipped.is_empty() %}
    <h2>Skipped documents</h2>
    <ul>
    {% for reason in skipped %}
        <li class="skipped">{{ reason }}</li>
    {% endfor %}
    </ul>
    {% endif %}
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    title: String,
    generated_at: String,
    document_count: usize,
    processing_time: u64,
    version: String,
    charts: Vec<HtmlChart>,
    skipped: Vec<String>,
}

fn format_timestamp(metadata: &ReportMetadata) -> String {
    metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn skipped_lines(metadata: &ReportMetadata) -> Vec<String> {
    metadata
        .skipped
        .iter()
        .map(|s| format!("{}: {}", s.path.display(), s.reason))
        .collect()
}

/// Scale `value` against `max` into `0..=width` units, at least one unit for
/// any non-zero value.
fn scaled(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / max) * width as f64).round().max(1.0) as usize
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            bar_width: 40,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_bar_row(&self, label: &str, label_width: usize, units: usize, value: &str) -> String {
        let bar = "■".repeat(units);
        format!(
            "{:>width$} {} {}\n",
            label,
            self.colorize(&bar, Color::Cyan),
            value,
            width = label_width
        )
    }

    fn format_metadata(&self, metadata: &ReportMetadata) -> String {
        format!(
            "Generated: {} | Documents: {} | Processing time: {}ms\n",
            format_timestamp(metadata),
            metadata.documents.len(),
            metadata.processing_time_ms
        )
    }

    fn format_skipped(&self, metadata: &ReportMetadata) -> String {
        if metadata.skipped.is_empty() {
            return String::new();
        }
        let mut output = self.format_header("Skipped documents", 3);
        for line in skipped_lines(metadata) {
            output.push_str(&format!("  {} {}\n", self.colorize("✗", Color::Red), line));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_frequencies(&self, report: &FrequencyReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("WORD FREQUENCIES", 1));
        output.push_str(&self.format_metadata(&report.metadata));

        for named in &report.tables {
            output.push_str(&self.format_header(&named.name, 2));

            if named.table.is_empty() {
                output.push_str("  (no words counted)\n");
                continue;
            }

            let max = named.table.entries().first().map_or(0, |(_, c)| *c) as f64;
            let label_width = named.table.iter().map(|(w, _)| w.chars().count()).max().unwrap_or(0);

            for (word, count) in named.table.iter() {
                let units = scaled(count as f64, max, self.bar_width);
                output.push_str(&self.format_bar_row(word, label_width, units, &count.to_string()));
            }
        }

        output.push_str(&self.format_skipped(&report.metadata));
        Ok(output)
    }

    fn format_topics(&self, report: &TopicReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("TOPIC AFFINITY", 1));
        output.push_str(&self.format_metadata(&report.metadata));
        output.push_str(&format!("Target: {}\n", self.colorize(&report.target, Color::Cyan)));

        output.push_str(&self.format_header("Scores", 2));
        let label_width = report.topics.iter().map(|t| t.topic.chars().count()).max().unwrap_or(0);

        for topic in &report.topics {
            let units = scaled(topic.share, 1.0, self.bar_width);
            let value = format!("{} ({:.1}%)", topic.score, topic.share * 100.0);
            output.push_str(&self.format_bar_row(&topic.topic, label_width, units, &value));
        }

        match report.topics.first().filter(|t| t.score > 0) {
            Some(best) => output.push_str(&format!(
                "\nClosest topic: {}\n",
                self.colorize(&best.topic, Color::Green)
            )),
            None => output.push_str("\nNo vocabulary shared with any topic\n"),
        }

        output.push_str(&self.format_skipped(&report.metadata));
        Ok(output)
    }
}

impl StructuredFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for StructuredFormatter {
    fn format_frequencies(&self, report: &FrequencyReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_topics(&self, report: &TopicReport) -> Result<String> {
        self.to_json(report)
    }
}

impl OutputFormatter for ListingFormatter {
    fn format_frequencies(&self, report: &FrequencyReport) -> Result<String> {
        if let [single] = report.tables.as_slice() {
            return Ok(single.table.to_listing());
        }

        Ok(report
            .tables
            .iter()
            .map(|named| format!("[{}]\n{}", named.name, named.table.to_listing()))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn format_topics(&self, report: &TopicReport) -> Result<String> {
        Ok(report
            .topics
            .iter()
            .map(|t| format!("{}: {}\n", t.topic, t.score))
            .collect())
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn render(&self, title: &str, metadata: &ReportMetadata, charts: Vec<HtmlChart>) -> Result<String> {
        let template = HtmlTemplate {
            include_styles: self.include_styles,
            title: title.to_string(),
            generated_at: format_timestamp(metadata),
            document_count: metadata.documents.len(),
            processing_time: metadata.processing_time_ms,
            version: metadata.tool_version.clone(),
            charts,
            skipped: skipped_lines(metadata),
        };

        template
            .render()
            .map_err(|e| ExamAnalyzerError::OutputFormatting(e.to_string()))
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_frequencies(&self, report: &FrequencyReport) -> Result<String> {
        let charts = report
            .tables
            .iter()
            .map(|named| {
                let max = named.table.entries().first().map_or(0, |(_, c)| *c) as f64;
                HtmlChart {
                    name: named.name.clone(),
                    bars: named
                        .table
                        .iter()
                        .map(|(word, count)| HtmlBar {
                            label: word.to_string(),
                            value: count.to_string(),
                            width: scaled(count as f64, max, 100) as u32,
                        })
                        .collect(),
                }
            })
            .collect();

        self.render("Word Frequencies", &report.metadata, charts)
    }

    fn format_topics(&self, report: &TopicReport) -> Result<String> {
        let chart = HtmlChart {
            name: format!("Topic affinity of {}", report.target),
            bars: report
                .topics
                .iter()
                .map(|t| HtmlBar {
                    label: t.topic.clone(),
                    value: format!("{} ({:.1}%)", t.score, t.share * 100.0),
                    width: scaled(t.share, 1.0, 100) as u32,
                })
                .collect(),
        };

        self.render("Topic Scores", &report.metadata, vec![chart])
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true, true)
    }

    pub fn with_options(use_colors: bool, pretty_json: bool, include_html_styles: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            structured_formatter: StructuredFormatter::new(pretty_json),
            listing_formatter: ListingFormatter,
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    fn formatter(&self, format: &OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Structured => &self.structured_formatter,
            OutputFormat::Listing => &self.listing_formatter,
            OutputFormat::Html => &self.html_formatter,
        }
    }

    pub fn generate_frequency_report(&self, report: &FrequencyReport, format: &OutputFormat) -> Result<String> {
        self.formatter(format).format_frequencies(report)
    }

    pub fn generate_topic_report(&self, report: &TopicReport, format: &OutputFormat) -> Result<String> {
        self.formatter(format).format_topics(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, base_name: &str, timestamp: bool) -> String {
    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}{}.txt", base_name, timestamp_suffix),
        OutputFormat::Structured => format!("{}{}.json", base_name, timestamp_suffix),
        OutputFormat::Listing => format!("{}{}.txt", base_name, timestamp_suffix),
        OutputFormat::Html => format!("{}{}.html", base_name, timestamp_suffix),
    }
}
