// Report assembly: turns enriched campaign rows into the two-sheet document
// and writes it under a timestamped name.
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::layout::{Align, Cell, CellValue, DocumentBuilder, ReportDocument, Sheet, SheetBuilder};
use crate::output;
use crate::reports::{count_flagged, summarize};
use crate::types::{EnrichedRecord, SummaryStats};

pub const DETAILS_SHEET: &str = "Campaign Details";
pub const SUMMARY_SHEET: &str = "Executive Summary";

pub const SPEND_COL: usize = 1;
pub const CTR_COL: usize = 4;
pub const CPC_COL: usize = 5;

/// Labels of the summary metric rows, in display order.
pub const SUMMARY_LABELS: [&str; 5] = [
    "Total Spend",
    "Total Impressions",
    "Total Clicks",
    "Average CPC",
    "Overall CTR",
];

/// First row of the metric table on the summary sheet (after title,
/// subtitle, spacer and table header).
pub const SUMMARY_FIRST_METRIC_ROW: usize = 4;

#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub path: PathBuf,
    pub summary: SummaryStats,
    pub flagged: usize,
}

/// `<product>_Report_YYYY-MM-DD_HHMM.xlsx`, spaces in the product name
/// replaced by underscores.
pub fn report_filename(product_name: &str, generated_at: NaiveDateTime) -> String {
    format!(
        "{}_Report_{}.xlsx",
        product_name.replace(' ', "_"),
        generated_at.format("%Y-%m-%d_%H%M")
    )
}

pub fn details_headers(config: &ReportConfig) -> [String; 6] {
    let code = &config.style.currency_code;
    [
        "Campaign Name".to_string(),
        format!("Amount Spent ({})", code),
        "Link Clicks".to_string(),
        "Impressions".to_string(),
        "CTR (%)".to_string(),
        format!("CPC ({})", code),
    ]
}

pub fn build_details_sheet(records: &[EnrichedRecord], config: &ReportConfig) -> Sheet {
    let style = &config.style;
    let mut sheet = SheetBuilder::new(DETAILS_SHEET);
    sheet.push_row(details_headers(config));
    for r in records {
        sheet.push_row([
            CellValue::from(r.record.name.as_str()),
            CellValue::from(r.record.spend),
            CellValue::from(r.record.clicks),
            CellValue::from(r.record.impressions),
            CellValue::from(r.ctr),
            CellValue::from(r.cpc),
        ]);
    }
    sheet
        .apply_header_formatting(style)
        .apply_currency_formatting(&[SPEND_COL, CPC_COL], style)
        .apply_percentage_formatting(&[CTR_COL], style)
        .apply_cpc_highlighting(CPC_COL, config.cpc_threshold, style)
        .auto_adjust_column_widths(style);
    sheet.finish()
}

pub fn build_summary_sheet(
    summary: &SummaryStats,
    config: &ReportConfig,
    generated_at: NaiveDateTime,
) -> Sheet {
    let style = &config.style;
    let mut sheet = SheetBuilder::new(SUMMARY_SHEET);

    let mut title = Cell::new(format!("{} - Executive Summary", config.product_name));
    title.style.bold = true;
    title.style.font_size = Some(16.0);
    title.style.font_color = Some(style.accent_font_color);
    title.style.align = Some(Align::Center);
    sheet.push_styled_row(vec![title, Cell::new(CellValue::Empty)]);
    sheet.merge_row(0, 0, 1).set_row_height(0, 30.0);

    let mut subtitle = Cell::new(format!(
        "Report Generated: {}",
        generated_at.format("%-d %B %Y, %H:%M")
    ));
    subtitle.style.italic = true;
    subtitle.style.font_size = Some(10.0);
    subtitle.style.font_color = Some(style.muted_font_color);
    subtitle.style.align = Some(Align::Center);
    sheet.push_styled_row(vec![subtitle, Cell::new(CellValue::Empty)]);
    sheet.merge_row(1, 0, 1).set_row_height(1, 20.0);

    sheet.push_styled_row(Vec::new());
    sheet.set_row_height(2, 15.0);

    let header: Vec<Cell> = ["Metric", "Value"]
        .into_iter()
        .map(|label| {
            let mut cell = Cell::new(label);
            cell.style.bold = true;
            cell.style.fill = Some(style.summary_header_fill);
            cell.style.font_color = Some(style.header_font_color);
            cell.style.align = Some(Align::Center);
            cell.style.border = true;
            cell
        })
        .collect();
    sheet.push_styled_row(header);
    sheet.set_row_height(3, 25.0);

    let values = [
        (CellValue::from(summary.total_spend), style.currency_format(), true),
        (CellValue::from(summary.total_impressions), style.count_format(), false),
        (CellValue::from(summary.total_clicks), style.count_format(), false),
        (CellValue::from(summary.average_cpc), style.currency_format(), true),
        (CellValue::from(summary.overall_ctr), style.percentage_format(), false),
    ];
    for (label, (value, format, accent)) in SUMMARY_LABELS.iter().zip(values) {
        let mut label_cell = Cell::new(*label);
        label_cell.style.bold = true;
        label_cell.style.align = Some(Align::Left);
        label_cell.style.border = true;

        let mut value_cell = Cell::new(value);
        value_cell.style.fill = Some(style.summary_value_fill);
        value_cell.style.align = Some(Align::Right);
        value_cell.style.border = true;
        value_cell.style.num_format = Some(format);
        if accent {
            value_cell.style.bold = true;
            value_cell.style.font_color = Some(style.accent_font_color);
        }

        let row = sheet.row_count();
        sheet.push_styled_row(vec![label_cell, value_cell]);
        sheet.set_row_height(row, 22.0);
    }

    sheet.set_column_width(0, 25.0).set_column_width(1, 20.0);
    sheet.finish()
}

/// Build the complete two-sheet document from the rows and their summary.
/// Pure: the same inputs always produce the same document.
pub fn build_report(
    records: &[EnrichedRecord],
    summary: &SummaryStats,
    config: &ReportConfig,
    generated_at: NaiveDateTime,
) -> ReportDocument {
    DocumentBuilder::new()
        .add_sheet(build_details_sheet(records, config))
        .add_sheet(build_summary_sheet(summary, config, generated_at))
        .build()
}

/// Build the report and write it into `output_dir`, creating the directory
/// if needed. The artifact only appears under its final name once fully
/// written; an existing file of the same name is replaced.
pub fn generate_report(
    records: &[EnrichedRecord],
    config: &ReportConfig,
    output_dir: &Path,
) -> Result<ReportOutcome> {
    info!("Generating Excel report for {} campaigns", records.len());
    let summary = summarize(records)?;

    std::fs::create_dir_all(output_dir).map_err(|source| ReportError::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let generated_at = Local::now().naive_local();
    let filename = report_filename(&config.product_name, generated_at);
    info!("Generated timestamped filename: {}", filename);
    let path = output_dir.join(filename);

    let document = build_report(records, &summary, config, generated_at);
    output::write_report(&document, &path)?;

    info!(
        "Executive Summary created: total spend {:.2}, {} campaigns",
        summary.total_spend,
        records.len()
    );
    Ok(ReportOutcome {
        path,
        flagged: count_flagged(records, config.cpc_threshold),
        summary,
    })
}
