//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::export::ExportDocument;
use colored::*;
use docket_domain::SummaryRecord;
use std::path::PathBuf;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Everything a run produced, ready for display.
pub struct Report<'a> {
    /// The export document (summary and entities)
    pub export: &'a ExportDocument<'a>,
    /// Synthesized filename
    pub new_name: &'a str,
    /// Where the JSON export was written
    pub export_path: Option<PathBuf>,
    /// Where the document now lives, if it was renamed
    pub renamed_to: Option<PathBuf>,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a run report.
    pub fn format_report(&self, report: &Report<'_>) -> Result<String> {
        match self.format {
            OutputFormat::Json => report.export.to_json(),
            OutputFormat::Table => Ok(self.format_report_table(report)),
            OutputFormat::Quiet => Ok(report.new_name.to_string()),
        }
    }

    /// Format the report as tables.
    fn format_report_table(&self, report: &Report<'_>) -> String {
        let mut out = String::new();
        out.push_str(&self.summary_table(&report.export.filename, report.export.summary, report.new_name));
        out.push('\n');
        out.push_str(&self.entity_table(report.export));

        if let Some(path) = &report.export_path {
            out.push('\n');
            out.push_str(&self.success(&format!("Exported {}", path.display())));
        }
        if let Some(path) = &report.renamed_to {
            out.push('\n');
            out.push_str(&self.success(&format!("Renamed to {}", path.display())));
        }
        out
    }

    fn summary_table(&self, source: &str, summary: &SummaryRecord, new_name: &str) -> String {
        let parties = if summary.parties_involved().is_empty() {
            "-".to_string()
        } else {
            summary
                .parties_involved()
                .iter()
                .map(|p| p.name())
                .collect::<Vec<_>>()
                .join("\n")
        };
        let date = summary
            .date_filed()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());

        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["Source", source]);
        builder.push_record(["Document type", summary.document_type().as_str()]);
        builder.push_record(["Parties", parties.as_str()]);
        builder.push_record(["Date filed", date.as_str()]);
        builder.push_record(["Filename", new_name]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    fn entity_table(&self, export: &ExportDocument<'_>) -> String {
        let mut rows = export.entities.iter().peekable();
        if rows.peek().is_none() {
            return self.warning("No entities found.");
        }

        let mut builder = Builder::default();
        builder.push_record(["Category", "Mentions"]);
        for (category, mentions) in rows {
            builder.push_record([category.to_string(), mentions.join("\n")]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use docket_domain::{
        DocumentType, Entity, EntityCategory, EntityMapping, Party, ProcessedDocument,
    };
    use std::path::Path;

    fn create_test_document() -> ProcessedDocument {
        let summary = SummaryRecord::new(
            DocumentType::Motion,
            vec![Party::new("Johnathan Mitchell")],
            NaiveDate::from_ymd_opt(2022, 7, 1),
        );
        let entities = EntityMapping::from_entities(vec![Entity::with_span(
            EntityCategory::Person,
            "Johnathan Mitchell",
            0,
            18,
        )]);
        ProcessedDocument::new(summary, entities)
    }

    const NAME: &str = "Johnathan Mitchell - Motion - Legal - 2022-07-01.pdf";

    #[test]
    fn test_json_format() {
        let doc = create_test_document();
        let export = ExportDocument::new(Path::new("scan.pdf"), &doc);
        let report = Report {
            export: &export,
            new_name: NAME,
            export_path: None,
            renamed_to: None,
        };
        let output = Formatter::new(OutputFormat::Json, false)
            .format_report(&report)
            .unwrap();
        assert!(output.contains("\"document_type\": \"Motion\""));
        assert!(output.contains("\"filename\": \"scan.pdf\""));
    }

    #[test]
    fn test_quiet_format() {
        let doc = create_test_document();
        let export = ExportDocument::new(Path::new("scan.pdf"), &doc);
        let report = Report {
            export: &export,
            new_name: NAME,
            export_path: None,
            renamed_to: None,
        };
        let output = Formatter::new(OutputFormat::Quiet, false)
            .format_report(&report)
            .unwrap();
        assert_eq!(output, NAME);
    }

    #[test]
    fn test_table_format() {
        let doc = create_test_document();
        let export = ExportDocument::new(Path::new("scan.pdf"), &doc);
        let report = Report {
            export: &export,
            new_name: NAME,
            export_path: Some(PathBuf::from("output/scan_entities.json")),
            renamed_to: None,
        };
        let output = Formatter::new(OutputFormat::Table, false)
            .format_report(&report)
            .unwrap();
        assert!(output.contains("Document type"));
        assert!(output.contains("2022-07-01"));
        assert!(output.contains("PERSON"));
        assert!(output.contains("✓ Exported output/scan_entities.json"));
    }

    #[test]
    fn test_empty_entities() {
        let doc = ProcessedDocument::new(SummaryRecord::empty(), EntityMapping::new());
        let export = ExportDocument::new(Path::new("blank.txt"), &doc);
        let report = Report {
            export: &export,
            new_name: "Unknown Party - Document - Legal - Undated.txt",
            export_path: None,
            renamed_to: None,
        };
        let output = Formatter::new(OutputFormat::Table, false)
            .format_report(&report)
            .unwrap();
        assert!(output.contains("No entities found"));
        assert!(output.contains("Unknown"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.warning("careful"), "⚠ careful");
    }
}
