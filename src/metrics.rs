// Per-campaign performance metrics.
//
// Zero denominators are a defined path: both ratios fall back to `0.0`.
// Negative inputs are not rejected here and flow through the formulas as-is.

use tracing::{debug, info};

use crate::error::{ReportError, Result};
use crate::types::{CampaignRecord, EnrichedRecord};

/// Click-through rate as a percentage: `(clicks / impressions) * 100`.
pub fn calculate_ctr(clicks: i64, impressions: i64) -> f64 {
    if impressions <= 0 {
        debug!(impressions, "no impressions, CTR is 0.0");
        return 0.0;
    }
    (clicks as f64 / impressions as f64) * 100.0
}

/// Cost per click in currency units: `spend / clicks`.
pub fn calculate_cpc(spend: f64, clicks: i64) -> f64 {
    if clicks <= 0 {
        debug!(clicks, "no clicks, CPC is 0.0");
        return 0.0;
    }
    spend / clicks as f64
}

/// Strict comparison: a CPC equal to the threshold is not flagged.
pub fn exceeds_threshold(cpc: f64, threshold: f64) -> bool {
    cpc > threshold
}

pub fn enrich(record: CampaignRecord) -> EnrichedRecord {
    let ctr = calculate_ctr(record.clicks, record.impressions);
    let cpc = calculate_cpc(record.spend, record.clicks);
    EnrichedRecord { record, ctr, cpc }
}

/// Enrich every record, preserving input order.
///
/// Fails the whole batch on the first record with a blank name or a
/// non-finite spend; a partially computed report is never produced.
pub fn enrich_all(records: Vec<CampaignRecord>) -> Result<Vec<EnrichedRecord>> {
    info!("Calculating CTR and CPC for {} campaigns", records.len());

    let mut out = Vec::with_capacity(records.len());
    for (idx, record) in records.into_iter().enumerate() {
        if record.name.trim().is_empty() {
            return Err(ReportError::malformed(idx + 1, "campaign name is blank"));
        }
        if !record.spend.is_finite() {
            return Err(ReportError::malformed(
                idx + 1,
                format!("spend for '{}' is not a finite number", record.name),
            ));
        }
        out.push(enrich(record));
    }

    if !out.is_empty() {
        let (ctr_min, ctr_max) = min_max(out.iter().map(|r| r.ctr));
        let (cpc_min, cpc_max) = min_max(out.iter().map(|r| r.cpc));
        info!(
            "Metrics calculated. CTR range: {:.2}% - {:.2}%, CPC range: {:.2} - {:.2}",
            ctr_min, ctr_max, cpc_min, cpc_max
        );
    }
    Ok(out)
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)))
}
