// Report configuration.
//
// Colours are 0xRRGGBB values. Number format codes are derived from the
// currency symbol so the styling engine never embeds literals of its own.

/// CPC above which a campaign row is highlighted, in currency units.
pub const DEFAULT_CPC_THRESHOLD: f64 = 20.00;

pub const DEFAULT_PRODUCT_NAME: &str = "AdMetric Pro";

#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    pub header_fill: u32,
    pub header_font_color: u32,
    pub header_bold: bool,
    pub highlight_fill: u32,
    pub summary_header_fill: u32,
    pub summary_value_fill: u32,
    pub accent_font_color: u32,
    pub muted_font_color: u32,
    pub currency_symbol: String,
    pub currency_code: String,
    /// Upper bound applied by automatic column sizing.
    pub max_column_width: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            header_fill: 0x1F4E79,
            header_font_color: 0xFFFFFF,
            header_bold: true,
            highlight_fill: 0xFFC7CE,
            summary_header_fill: 0x2E75B6,
            summary_value_fill: 0xD6DCE4,
            accent_font_color: 0x1F4E79,
            muted_font_color: 0x666666,
            currency_symbol: "R".to_string(),
            currency_code: "ZAR".to_string(),
            max_column_width: 50.0,
        }
    }
}

impl StyleConfig {
    /// Two decimals, thousands separators, quoted currency symbol.
    pub fn currency_format(&self) -> String {
        format!("\"{}\" #,##0.00", self.currency_symbol)
    }

    /// CTR values are already scaled to 0..=100, so the percent sign is literal.
    pub fn percentage_format(&self) -> String {
        "0.00\"%\"".to_string()
    }

    pub fn count_format(&self) -> String {
        "#,##0".to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub product_name: String,
    pub cpc_threshold: f64,
    pub style: StyleConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            product_name: DEFAULT_PRODUCT_NAME.to_string(),
            cpc_threshold: DEFAULT_CPC_THRESHOLD,
            style: StyleConfig::default(),
        }
    }
}

impl ReportConfig {
    pub fn with_cpc_threshold(mut self, threshold: f64) -> Self {
        self.cpc_threshold = threshold;
        self
    }
}
