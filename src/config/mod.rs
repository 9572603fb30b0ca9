pub mod toml_config;

#[cfg(feature = "cli")]
use crate::adapters::http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS};
#[cfg(feature = "cli")]
use crate::domain::model::CasesType;
#[cfg(feature = "cli")]
use crate::domain::ports::{ConfigProvider, ExportFormat, FetchFailurePolicy};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_TABLE_ROWS: usize = 10;
pub const DEFAULT_MAP_MARKERS: usize = 5;
pub const DEFAULT_GRAPH_DAYS: u32 = 120;
pub const MAX_GRAPH_DAYS: u32 = 1500;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "covid-tracker")]
#[command(about = "COVID-19 statistics dashboard for the terminal")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub api_base_url: String,

    #[arg(long, default_value = "worldwide", help = "ISO2 code, country name or 'worldwide'")]
    pub country: String,

    #[arg(long, value_enum, default_value_t = CasesType::Cases)]
    pub cases_type: CasesType,

    #[arg(long, default_value_t = DEFAULT_TABLE_ROWS)]
    pub table_rows: usize,

    #[arg(long, default_value_t = DEFAULT_MAP_MARKERS)]
    pub map_markers: usize,

    #[arg(long, default_value_t = DEFAULT_GRAPH_DAYS)]
    pub graph_days: u32,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    #[arg(long, help = "Log failed API loads and keep going")]
    pub ignore_fetch_errors: bool,

    #[arg(long, help = "Directory to write the sorted country table to")]
    pub export_path: Option<String>,

    #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
    pub export_format: ExportFormat,

    #[arg(long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn fetch_failure_policy(&self) -> FetchFailurePolicy {
        if self.ignore_fetch_errors {
            FetchFailurePolicy::Ignore
        } else {
            FetchFailurePolicy::Surface
        }
    }

    fn country(&self) -> &str {
        &self.country
    }

    fn cases_type(&self) -> CasesType {
        self.cases_type
    }

    fn table_rows(&self) -> usize {
        self.table_rows
    }

    fn map_markers(&self) -> usize {
        self.map_markers
    }

    fn graph_days(&self) -> u32 {
        self.graph_days
    }

    fn export_path(&self) -> Option<&str> {
        self.export_path.as_deref()
    }

    fn export_format(&self) -> ExportFormat {
        self.export_format
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_url("api_base_url", &self.api_base_url)?;
        validate_country_selector("country", &self.country)?;
        validate_positive_number("table_rows", self.table_rows, 1)?;
        validate_range("graph_days", self.graph_days, 2, MAX_GRAPH_DAYS)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, MAX_TIMEOUT_SECONDS)?;

        if let Some(path) = &self.export_path {
            validate_path("export_path", path)?;
        }

        Ok(())
    }
}
