use std::io::Write;
use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use tabled::{settings::Style, Table, Tabled};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::StyleConfig;
use crate::error::{ReportError, Result};
use crate::layout::{Align, CellStyle, CellValue, ReportDocument, Sheet};
use crate::metrics::exceeds_threshold;
use crate::types::{EnrichedRecord, FlaggedPreviewRow, SummaryPreviewRow, SummaryStats};
use crate::util::{format_currency, format_int, format_number};

fn to_format(style: &CellStyle) -> Format {
    let mut format = Format::new();
    if style.bold {
        format = format.set_bold();
    }
    if style.italic {
        format = format.set_italic();
    }
    if let Some(size) = style.font_size {
        format = format.set_font_size(size);
    }
    if let Some(color) = style.font_color {
        format = format.set_font_color(Color::RGB(color));
    }
    if let Some(fill) = style.fill {
        format = format.set_background_color(Color::RGB(fill));
    }
    if let Some(num_format) = &style.num_format {
        format = format.set_num_format(num_format);
    }
    if let Some(align) = style.align {
        format = format.set_align(match align {
            Align::Left => FormatAlign::Left,
            Align::Center => FormatAlign::Center,
            Align::Right => FormatAlign::Right,
        });
        format = format.set_align(FormatAlign::VerticalCenter);
    }
    if style.border {
        format = format.set_border(FormatBorder::Thin);
    }
    format
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &Sheet) -> Result<()> {
    worksheet.set_name(&sheet.name)?;

    for merge in &sheet.merges {
        let Some(first) = sheet.cell(merge.row, merge.first_col) else {
            continue;
        };
        let text = match &first.value {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(v) => v.to_string(),
            CellValue::Integer(v) => v.to_string(),
            CellValue::Empty => String::new(),
        };
        worksheet.merge_range(
            merge.row as u32,
            merge.first_col as u16,
            merge.row as u32,
            merge.last_col as u16,
            &text,
            &to_format(&first.style),
        )?;
    }

    for (r, row) in sheet.rows.iter().enumerate() {
        let row_num = r as u32;
        if let Some(height) = row.height {
            worksheet.set_row_height(row_num, height)?;
        }
        for (c, cell) in row.cells.iter().enumerate() {
            let merged = sheet
                .merges
                .iter()
                .any(|m| m.row == r && (m.first_col..=m.last_col).contains(&c));
            if merged {
                continue;
            }
            let col = c as u16;
            let format = to_format(&cell.style);
            match &cell.value {
                CellValue::Text(s) => {
                    worksheet.write_string_with_format(row_num, col, s, &format)?;
                }
                CellValue::Number(v) => {
                    worksheet.write_number_with_format(row_num, col, *v, &format)?;
                }
                CellValue::Integer(v) => {
                    worksheet.write_number_with_format(row_num, col, *v as f64, &format)?;
                }
                CellValue::Empty => {
                    if cell.style != CellStyle::default() {
                        worksheet.write_blank(row_num, col, &format)?;
                    }
                }
            }
        }
    }

    for (c, width) in sheet.column_widths.iter().enumerate() {
        if let Some(width) = width {
            worksheet.set_column_width(c as u16, *width)?;
        }
    }
    Ok(())
}

/// Serialize the document model to xlsx bytes.
pub fn render_xlsx(document: &ReportDocument) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    for sheet in &document.sheets {
        debug!(sheet = %sheet.name, rows = sheet.rows.len(), "rendering worksheet");
        let worksheet = workbook.add_worksheet();
        write_sheet(worksheet, sheet)?;
    }
    Ok(workbook.save_to_buffer()?)
}

/// Render and write the document to `path`.
///
/// Bytes go to a temporary file in the destination directory which is
/// renamed onto `path` only after a successful write and sync. On any
/// failure the temporary file is removed and `path` is left untouched.
pub fn write_report(document: &ReportDocument, path: &Path) -> Result<()> {
    let buffer = render_xlsx(document)?;

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let write_err = |source: std::io::Error| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };

    info!("Saving report to: {}", path.display());
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(&buffer).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    info!("Report generated successfully: {}", path.display());
    Ok(())
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    if rows.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(rows).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

pub fn summary_preview_rows(summary: &SummaryStats, style: &StyleConfig) -> Vec<SummaryPreviewRow> {
    let symbol = &style.currency_symbol;
    [
        ("Total Spend", format_currency(symbol, summary.total_spend)),
        ("Total Impressions", format_int(summary.total_impressions)),
        ("Total Clicks", format_int(summary.total_clicks)),
        ("Average CPC", format_currency(symbol, summary.average_cpc)),
        ("Overall CTR", format!("{}%", format_number(summary.overall_ctr, 2))),
    ]
    .into_iter()
    .map(|(metric, value)| SummaryPreviewRow {
        metric: metric.to_string(),
        value,
    })
    .collect()
}

pub fn preview_summary(summary: &SummaryStats, style: &StyleConfig) {
    println!("Executive Summary\n");
    print_table(summary_preview_rows(summary, style));
}

/// Print up to `max_rows` campaigns whose CPC is above `threshold`, in input order.
pub fn preview_flagged(records: &[EnrichedRecord], threshold: f64, style: &StyleConfig, max_rows: usize) {
    let symbol = &style.currency_symbol;
    let rows: Vec<FlaggedPreviewRow> = records
        .iter()
        .filter(|r| exceeds_threshold(r.cpc, threshold))
        .take(max_rows)
        .map(|r| FlaggedPreviewRow {
            campaign: r.record.name.clone(),
            spend: format_currency(symbol, r.record.spend),
            clicks: format_int(r.record.clicks),
            cpc: format_currency(symbol, r.cpc),
        })
        .collect();
    println!("Campaigns with CPC > {}\n", format_currency(symbol, threshold));
    print_table(rows);
}
