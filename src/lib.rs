// AdMetric Pro: turns Meta Ads CSV exports into formatted Excel reports.
//
// The pipeline is `loader` -> `metrics` -> `reports` -> `layout` ->
// `assembler`, with `output` handling xlsx serialization and console
// previews.

pub mod assembler;
pub mod config;
pub mod error;
pub mod layout;
pub mod loader;
pub mod metrics;
pub mod output;
pub mod reports;
pub mod types;
pub mod util;

pub use config::{ReportConfig, StyleConfig};
pub use error::{ErrorKind, ReportError, Result};
pub use types::{CampaignRecord, EnrichedRecord, SummaryStats};
