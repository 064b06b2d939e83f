use crate::error::{ReportError, Result};
use crate::metrics::exceeds_threshold;
use crate::types::{EnrichedRecord, SummaryStats};

/// Reduce the enriched rows to totals and ratio-of-sums averages.
///
/// `average_cpc` and `overall_ctr` are computed from the totals rather than
/// by averaging per-row values, so campaigns are weighted by volume.
/// An empty slice yields an all-zero summary. Count totals that overflow
/// `i64` fail with `MalformedRecord` naming the row that overflowed.
pub fn summarize(data: &[EnrichedRecord]) -> Result<SummaryStats> {
    let mut total_spend = 0.0;
    let mut total_impressions: i64 = 0;
    let mut total_clicks: i64 = 0;
    for (idx, r) in data.iter().enumerate() {
        total_spend += r.record.spend;
        total_impressions = total_impressions
            .checked_add(r.record.impressions)
            .ok_or_else(|| ReportError::malformed(idx + 1, "total impressions overflow"))?;
        total_clicks = total_clicks
            .checked_add(r.record.clicks)
            .ok_or_else(|| ReportError::malformed(idx + 1, "total clicks overflow"))?;
    }

    let average_cpc = if total_clicks > 0 {
        total_spend / total_clicks as f64
    } else {
        0.0
    };
    let overall_ctr = if total_impressions > 0 {
        (total_clicks as f64 / total_impressions as f64) * 100.0
    } else {
        0.0
    };

    Ok(SummaryStats {
        total_spend,
        total_impressions,
        total_clicks,
        average_cpc,
        overall_ctr,
    })
}

pub fn count_flagged(data: &[EnrichedRecord], threshold: f64) -> usize {
    data.iter()
        .filter(|r| exceeds_threshold(r.cpc, threshold))
        .count()
}
