use std::path::Path;

use csv::ReaderBuilder;
use tracing::{error, info};

use crate::error::{ReportError, Result};
use crate::types::{CampaignRecord, RawRow};
use crate::util::{parse_f64_safe, parse_i64_safe};

/// Columns a Meta Ads Manager export must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    "Campaign Name",
    "Amount Spent (ZAR)",
    "Link Clicks",
    "Impressions",
];

/// Read a Meta Ads CSV export into typed campaign records, in file order.
///
/// Extra columns are ignored. Campaign names are kept verbatim. Any value
/// that cannot be read as a number rejects the whole file; nothing is
/// coerced to zero.
pub fn load_campaigns(path: &Path) -> Result<Vec<CampaignRecord>> {
    info!("Checking file path: {}", path.display());
    if !path.exists() {
        error!("File not found: {}", path.display());
        return Err(ReportError::FileNotFound(path.to_path_buf()));
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    if !ext.eq_ignore_ascii_case("csv") {
        error!("Invalid file type: {:?} (expected .csv)", ext);
        return Err(ReportError::InvalidFileType(format!(".{}", ext)));
    }

    info!("Reading Meta Ads CSV file...");
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::Headers).from_path(path)?;
    let headers = rdr.headers()?.clone();
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        error!("CSV file is empty: {}", path.display());
        return Err(ReportError::EmptyFile(path.to_path_buf()));
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        error!("Missing required columns: {:?}", missing);
        return Err(ReportError::MissingColumns(missing));
    }

    let mut records = Vec::new();
    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        let row = result?;
        records.push(to_record(idx + 1, row)?);
    }

    info!("Loaded {} campaign records from CSV", records.len());
    Ok(records)
}

fn to_record(row: usize, raw: RawRow) -> Result<CampaignRecord> {
    let name = raw.campaign_name.unwrap_or_default();
    if name.trim().is_empty() {
        return Err(ReportError::malformed(row, "missing Campaign Name"));
    }
    let spend = parse_f64_safe(raw.amount_spent.as_deref()).ok_or_else(|| {
        ReportError::malformed(
            row,
            format!("Amount Spent (ZAR) is not numeric: {:?}", raw.amount_spent.unwrap_or_default()),
        )
    })?;
    let clicks = parse_i64_safe(raw.link_clicks.as_deref()).ok_or_else(|| {
        ReportError::malformed(
            row,
            format!("Link Clicks is not a whole number: {:?}", raw.link_clicks.unwrap_or_default()),
        )
    })?;
    let impressions = parse_i64_safe(raw.impressions.as_deref()).ok_or_else(|| {
        ReportError::malformed(
            row,
            format!("Impressions is not a whole number: {:?}", raw.impressions.unwrap_or_default()),
        )
    })?;
    Ok(CampaignRecord {
        name,
        spend,
        clicks,
        impressions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    const HEADER: &str = "Campaign Name,Amount Spent (ZAR),Link Clicks,Impressions";

    #[test]
    fn loads_rows_in_order() {
        let f = csv_file(&format!(
            "{}\nSummer Sale,1000.00,50,2500\nNULL,\"1,250.50\",12.0,\"10,000\"\n00,0,0,0\n",
            HEADER
        ));
        let records = load_campaigns(f.path()).unwrap();
        assert_eq!(
            records,
            vec![
                CampaignRecord::new("Summer Sale", 1000.0, 50, 2500),
                CampaignRecord::new("NULL", 1250.5, 12, 10_000),
                CampaignRecord::new("00", 0.0, 0, 0),
            ]
        );
    }

    #[test]
    fn extra_columns_and_order_are_ignored() {
        let f = csv_file(
            "Reach,Impressions,Campaign Name,Link Clicks,Amount Spent (ZAR)\n900,1000,A,10,100\n",
        );
        let records = load_campaigns(f.path()).unwrap();
        assert_eq!(records, vec![CampaignRecord::new("A", 100.0, 10, 1000)]);
    }

    #[test]
    fn header_only_is_empty_dataset() {
        let f = csv_file(&format!("{}\n", HEADER));
        assert!(load_campaigns(f.path()).unwrap().is_empty());
    }

    #[test]
    fn empty_file_is_rejected() {
        let f = csv_file("");
        assert!(matches!(load_campaigns(f.path()), Err(ReportError::EmptyFile(_))));
    }

    #[test]
    fn missing_columns_are_reported() {
        let f = csv_file("Campaign Name,Amount Spent (ZAR)\nA,10\n");
        match load_campaigns(f.path()) {
            Err(ReportError::MissingColumns(cols)) => {
                assert_eq!(cols, vec!["Link Clicks".to_string(), "Impressions".to_string()])
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn non_numeric_values_fail_the_load() {
        let f = csv_file(&format!("{}\nA,10,1,100\nB,abc,1,100\n", HEADER));
        match load_campaigns(f.path()) {
            Err(ReportError::MalformedRecord { row, reason }) => {
                assert_eq!(row, 2);
                assert!(reason.contains("Amount Spent"));
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }

        let f = csv_file(&format!("{}\nA,10,1.5,100\n", HEADER));
        assert!(matches!(
            load_campaigns(f.path()),
            Err(ReportError::MalformedRecord { row: 1, .. })
        ));
    }

    #[test]
    fn blank_name_is_malformed() {
        let f = csv_file(&format!("{}\n,10,1,100\n", HEADER));
        assert!(matches!(
            load_campaigns(f.path()),
            Err(ReportError::MalformedRecord { row: 1, .. })
        ));
    }

    #[test]
    fn whitespace_name_is_malformed_and_names_stay_verbatim() {
        let f = csv_file(&format!("{}\n\"  \",10,1,100\n", HEADER));
        assert!(matches!(
            load_campaigns(f.path()),
            Err(ReportError::MalformedRecord { row: 1, .. })
        ));

        let f = csv_file(&format!("{}\n\" Spring \",10,1,100\n", HEADER));
        let records = load_campaigns(f.path()).unwrap();
        assert_eq!(records[0].name, " Spring ");
    }

    #[test]
    fn missing_file_and_wrong_extension() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.csv");
        assert!(matches!(load_campaigns(&missing), Err(ReportError::FileNotFound(_))));

        let txt = dir.path().join("data.txt");
        std::fs::write(&txt, HEADER).unwrap();
        match load_campaigns(&txt) {
            Err(ReportError::InvalidFileType(ext)) => assert_eq!(ext, ".txt"),
            other => panic!("expected InvalidFileType, got {:?}", other),
        }
    }

    #[test]
    fn uppercase_extension_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("EXPORT.CSV");
        std::fs::write(&path, format!("{}\nA,1,1,1\n", HEADER)).unwrap();
        assert_eq!(load_campaigns(&path).unwrap().len(), 1);
    }
}
