// Styled document model and the builder that produces it.
//
// Nothing here knows about xlsx. A `SheetBuilder` accumulates rows and
// applies independent styling passes over them; `SheetBuilder::finish`
// freezes the result into a `Sheet`, and a `DocumentBuilder` collects
// sheets into a `ReportDocument` for the serializer in `output`.

use tracing::{debug, info};

use crate::config::StyleConfig;
use crate::metrics::exceeds_threshold;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Integer(i64),
    Empty,
}

impl CellValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            CellValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Approximate on-screen width, used for column sizing.
    fn display_len(&self) -> usize {
        match self {
            CellValue::Text(s) => s.chars().count(),
            CellValue::Number(v) => v.to_string().len(),
            CellValue::Integer(v) => v.to_string().len(),
            CellValue::Empty => 0,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Integer(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellStyle {
    pub bold: bool,
    pub italic: bool,
    pub font_size: Option<f64>,
    pub font_color: Option<u32>,
    pub fill: Option<u32>,
    pub num_format: Option<String>,
    pub align: Option<Align>,
    pub border: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
}

impl Cell {
    pub fn new(value: impl Into<CellValue>) -> Self {
        Self {
            value: value.into(),
            style: CellStyle::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub cells: Vec<Cell>,
    pub height: Option<f64>,
}

/// A horizontal merge within one row, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Merge {
    pub row: usize,
    pub first_col: usize,
    pub last_col: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Row>,
    pub column_widths: Vec<Option<f64>>,
    pub merges: Vec<Merge>,
}

impl Sheet {
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row)?.cells.get(col)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportDocument {
    pub sheets: Vec<Sheet>,
}

impl ReportDocument {
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

#[derive(Debug, Default)]
pub struct DocumentBuilder {
    sheets: Vec<Sheet>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sheet(mut self, sheet: Sheet) -> Self {
        self.sheets.push(sheet);
        self
    }

    pub fn build(self) -> ReportDocument {
        ReportDocument {
            sheets: self.sheets,
        }
    }
}

/// Accumulates the rows of the sheet currently being built.
///
/// Row 0 is treated as the header by the column-oriented passes; those
/// passes only ever touch rows `1..`.
#[derive(Debug)]
pub struct SheetBuilder {
    name: String,
    rows: Vec<Row>,
    column_widths: Vec<Option<f64>>,
    merges: Vec<Merge>,
}

impl SheetBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
            column_widths: Vec::new(),
            merges: Vec::new(),
        }
    }

    pub fn push_row<I, V>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let cells = values.into_iter().map(Cell::new).collect();
        self.rows.push(Row {
            cells,
            height: None,
        });
        self
    }

    pub fn push_styled_row(&mut self, cells: Vec<Cell>) -> &mut Self {
        self.rows.push(Row {
            cells,
            height: None,
        });
        self
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn set_row_height(&mut self, row: usize, height: f64) -> &mut Self {
        if let Some(r) = self.rows.get_mut(row) {
            r.height = Some(height);
        }
        self
    }

    pub fn set_column_width(&mut self, col: usize, width: f64) -> &mut Self {
        if self.column_widths.len() <= col {
            self.column_widths.resize(col + 1, None);
        }
        self.column_widths[col] = Some(width);
        self
    }

    pub fn merge_row(&mut self, row: usize, first_col: usize, last_col: usize) -> &mut Self {
        self.merges.push(Merge {
            row,
            first_col,
            last_col,
        });
        self
    }

    /// Bold text on the configured dark fill, centred, for every cell of row 0.
    pub fn apply_header_formatting(&mut self, style: &StyleConfig) -> &mut Self {
        debug!(sheet = %self.name, "applying header formatting");
        if let Some(header) = self.rows.first_mut() {
            for cell in &mut header.cells {
                cell.style.fill = Some(style.header_fill);
                cell.style.font_color = Some(style.header_font_color);
                cell.style.bold = style.header_bold;
                cell.style.align = Some(Align::Center);
            }
        }
        self
    }

    pub fn apply_currency_formatting(&mut self, columns: &[usize], style: &StyleConfig) -> &mut Self {
        let format = style.currency_format();
        for &col in columns {
            debug!(sheet = %self.name, col, "applying currency format");
            self.set_column_format(col, &format);
        }
        self
    }

    pub fn apply_percentage_formatting(&mut self, columns: &[usize], style: &StyleConfig) -> &mut Self {
        let format = style.percentage_format();
        for &col in columns {
            debug!(sheet = %self.name, col, "applying percentage format");
            self.set_column_format(col, &format);
        }
        self
    }

    /// Fill every cell of a data row whose value in `cpc_col` is strictly
    /// above `threshold`. Returns the builder; the flagged count is logged.
    pub fn apply_cpc_highlighting(
        &mut self,
        cpc_col: usize,
        threshold: f64,
        style: &StyleConfig,
    ) -> &mut Self {
        let mut highlighted = 0usize;
        for row in self.rows.iter_mut().skip(1) {
            let cpc = row.cells.get(cpc_col).and_then(|c| c.value.as_f64());
            if cpc.is_some_and(|v| exceeds_threshold(v, threshold)) {
                for cell in &mut row.cells {
                    cell.style.fill = Some(style.highlight_fill);
                }
                highlighted += 1;
            }
        }
        info!("Highlighted {} campaigns with CPC > {:.2}", highlighted, threshold);
        self
    }

    /// Size each column to its longest rendered value plus padding, capped
    /// at `style.max_column_width`.
    pub fn auto_adjust_column_widths(&mut self, style: &StyleConfig) -> &mut Self {
        let cols = self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0);
        for col in 0..cols {
            let longest = self
                .rows
                .iter()
                .filter_map(|r| r.cells.get(col))
                .map(|c| c.value.display_len())
                .max()
                .unwrap_or(0);
            let width = ((longest + 2) as f64).min(style.max_column_width);
            self.set_column_width(col, width);
        }
        self
    }

    pub fn finish(self) -> Sheet {
        Sheet {
            name: self.name,
            rows: self.rows,
            column_widths: self.column_widths,
            merges: self.merges,
        }
    }

    fn set_column_format(&mut self, col: usize, format: &str) {
        for row in self.rows.iter_mut().skip(1) {
            if let Some(cell) = row.cells.get_mut(col) {
                cell.style.num_format = Some(format.to_string());
            }
        }
    }
}
