use serde::Deserialize;
use tabled::Tabled;

/// One row of a Meta Ads Manager export, before any validation.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Campaign Name")]
    pub campaign_name: Option<String>,
    #[serde(rename = "Amount Spent (ZAR)")]
    pub amount_spent: Option<String>,
    #[serde(rename = "Link Clicks")]
    pub link_clicks: Option<String>,
    #[serde(rename = "Impressions")]
    pub impressions: Option<String>,
}

/// A validated campaign row. Counts are signed so that out-of-contract
/// values from a bypassed loader flow through the formulas literally.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignRecord {
    pub name: String,
    pub spend: f64,
    pub clicks: i64,
    pub impressions: i64,
}

impl CampaignRecord {
    pub fn new(name: impl Into<String>, spend: f64, clicks: i64, impressions: i64) -> Self {
        Self {
            name: name.into(),
            spend,
            clicks,
            impressions,
        }
    }
}

/// A campaign row with its derived metrics attached.
///
/// `ctr` is a percentage in the 0..=100 range for well-formed input and
/// `cpc` is in currency units.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub record: CampaignRecord,
    pub ctr: f64,
    pub cpc: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryStats {
    pub total_spend: f64,
    pub total_impressions: i64,
    pub total_clicks: i64,
    pub average_cpc: f64,
    pub overall_ctr: f64,
}

#[derive(Debug, Tabled, Clone)]
pub struct SummaryPreviewRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Tabled, Clone)]
pub struct FlaggedPreviewRow {
    #[tabled(rename = "Campaign")]
    pub campaign: String,
    #[tabled(rename = "Spend")]
    pub spend: String,
    #[tabled(rename = "Clicks")]
    pub clicks: String,
    #[tabled(rename = "CPC")]
    pub cpc: String,
}
