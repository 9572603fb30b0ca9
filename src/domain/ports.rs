use crate::domain::model::{CasesType, CountryRecord, GlobalStats, HistoricalTimeline};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// What to do when a load from the statistics API fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchFailurePolicy {
    /// Return the error to the caller.
    #[default]
    Surface,
    /// Log and keep the previous state.
    Ignore,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn request_timeout_seconds(&self) -> u64;
    fn fetch_failure_policy(&self) -> FetchFailurePolicy;
    fn country(&self) -> &str;
    fn cases_type(&self) -> CasesType;
    fn table_rows(&self) -> usize;
    fn map_markers(&self) -> usize;
    fn graph_days(&self) -> u32;
    fn export_path(&self) -> Option<&str>;
    fn export_format(&self) -> ExportFormat;
}

/// Read-only access to the statistics API.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn load_global_stats(&self) -> Result<GlobalStats>;
    async fn load_all_countries(&self) -> Result<Vec<CountryRecord>>;
    async fn load_country(&self, code: &str) -> Result<CountryRecord>;
    async fn load_historical(&self, last_days: u32) -> Result<HistoricalTimeline>;
}
