//! Terminal and JSON rendering of command results.

use std::fmt::Write as _;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use lab_core::TextAnalysis;
use lab_knowledge::{KnowledgeSource, KnowledgeSummary};
use lab_model::{
    AnalysisReport, DiscardReason, ExtractionOutcome, ParameterValues, RiskLevel, Status,
};
use serde::Serialize;

/// Pretty-printed JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Extracted values followed by the discarded lines, if any.
pub fn render_extraction(outcome: &ExtractionOutcome) -> String {
    let mut out = String::new();
    if outcome.values.is_empty() {
        out.push_str("No lab values found.\n");
    } else {
        let _ = writeln!(out, "{}", values_table(&outcome.values));
    }
    let _ = writeln!(
        out,
        "Scanned {}: {}, {} discarded.",
        counted(outcome.lines_scanned, "line"),
        counted(outcome.values.len(), "value"),
        outcome.discarded_count()
    );
    if !outcome.discarded.is_empty() {
        let _ = writeln!(out, "{}", discard_table(outcome));
    }
    out
}

/// Comparison table, risk prediction, disease matches and summary.
pub fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();
    if report.comparison.is_empty() {
        out.push_str("No parameters to evaluate.\n");
    } else {
        let _ = writeln!(out, "{}", comparison_table(report));
    }

    let _ = writeln!(out, "Overall risk: {}", report.prediction.overall_risk);
    for risk in &report.prediction.risks {
        let _ = writeln!(out, "- {risk}");
    }

    if !report.diseases.possible_diseases.is_empty() {
        let _ = writeln!(out, "{}", disease_table(report));
        for disease in &report.diseases.possible_diseases {
            if !disease.recommendation.is_empty() {
                let _ = writeln!(out, "{}: {}", disease.name, disease.recommendation);
            }
        }
    }
    let _ = writeln!(out, "{}", report.diseases.summary);
    out
}

/// Extraction summary line plus the report.
pub fn render_text_analysis(analysis: &TextAnalysis) -> String {
    let extraction = &analysis.extraction;
    let mut out = format!(
        "Extracted {} from {} ({} discarded).\n",
        counted(extraction.values.len(), "value"),
        counted(extraction.lines_scanned, "line"),
        extraction.discarded_count()
    );
    out.push_str(&render_report(&analysis.report));
    out
}

pub fn render_knowledge(summary: &KnowledgeSummary) -> String {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Item"), header_cell("Value")]);
    apply_table_style(&mut table);

    let source = match &summary.source {
        KnowledgeSource::Builtin => "builtin".to_string(),
        KnowledgeSource::Directory(path) => path.display().to_string(),
        KnowledgeSource::Custom => "custom".to_string(),
    };
    table.add_row(vec![Cell::new("Source"), Cell::new(source)]);
    table.add_row(vec![
        Cell::new("Fingerprint"),
        match &summary.fingerprint {
            Some(fingerprint) => Cell::new(fingerprint),
            None => dim_cell("-"),
        },
    ]);
    table.add_row(vec![
        Cell::new("Parameters"),
        Cell::new(format!(
            "{} ({})",
            summary.parameter_count,
            summary.parameters.join(", ")
        )),
    ]);
    table.add_row(vec![Cell::new("Ranges"), Cell::new(summary.range_count)]);
    table.add_row(vec![
        Cell::new("Diseases"),
        Cell::new(format!(
            "{} ({})",
            summary.disease_count,
            summary.diseases.join(", ")
        )),
    ]);

    let mut out = format!("{table}\n");
    if summary.notes.is_empty() {
        out.push_str("No consistency notes.\n");
    } else {
        out.push_str("Notes:\n");
        for note in &summary.notes {
            let _ = writeln!(out, "- [{}] {}", note.kind, note.message);
        }
    }
    out
}

fn values_table(values: &ParameterValues) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Parameter"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (name, value) in values {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }
    table
}

fn discard_table(outcome: &ExtractionOutcome) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Line"),
        header_cell("Reason"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for line in &outcome.discarded {
        let (reason, detail) = match &line.reason {
            DiscardReason::NoPattern => ("no value", dim_cell("-")),
            DiscardReason::UnrecognizedLabel { label, suggestion } => (
                "unknown label",
                match suggestion {
                    Some(name) => Cell::new(format!("{label} (did you mean {name}?)")),
                    None => Cell::new(label),
                },
            ),
            DiscardReason::InvalidNumber { token } => {
                ("invalid number", Cell::new(token).fg(Color::Yellow))
            }
        };
        table.add_row(vec![Cell::new(line.line_number), dim_cell(reason), detail]);
    }
    table
}

fn comparison_table(report: &AnalysisReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Parameter"),
        header_cell("Value"),
        header_cell("Unit"),
        header_cell("Normal range"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for (name, result) in &report.comparison {
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            Cell::new(result.value),
            if result.unit.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(&result.unit)
            },
            Cell::new(result.normal_range.display()),
            status_cell(result.status),
        ]);
    }
    table
}

fn disease_table(report: &AnalysisReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Disease"),
        header_cell("Confidence"),
        header_cell("Risk"),
        header_cell("Matched indicators"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    for disease in &report.diseases.possible_diseases {
        let indicators = disease
            .matched_indicators
            .iter()
            .map(|m| m.condition.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            Cell::new(&disease.name).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.1}%", disease.confidence)),
            risk_cell(disease.risk_level),
            Cell::new(indicators),
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: Status) -> Cell {
    match status {
        Status::Low => Cell::new("Low")
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Status::High => Cell::new("High")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Status::Normal => Cell::new("Normal").fg(Color::Green),
        Status::Unknown => dim_cell("Unknown"),
    }
}

fn risk_cell(level: RiskLevel) -> Cell {
    let color = match level {
        RiskLevel::High => Color::Red,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::Low => Color::Green,
    };
    Cell::new(level.as_str()).fg(color)
}

/// `1 line`, `2 lines`.
fn counted(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
