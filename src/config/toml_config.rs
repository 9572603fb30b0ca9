use crate::adapters::http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS};
use crate::config::{
    DEFAULT_GRAPH_DAYS, DEFAULT_MAP_MARKERS, DEFAULT_TABLE_ROWS, MAX_GRAPH_DAYS,
    MAX_TIMEOUT_SECONDS,
};
use crate::domain::model::{CasesType, WORLDWIDE};
use crate::domain::ports::{ConfigProvider, ExportFormat, FetchFailurePolicy};
use crate::utils::error::{Result, TrackerError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: Option<SourceConfig>,
    pub dashboard: Option<DashboardConfig>,
    pub export: Option<ExportConfig>,
    pub error_handling: Option<ErrorHandlingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub country: Option<String>,
    pub cases_type: Option<CasesType>,
    pub table_rows: Option<usize>,
    pub map_markers: Option<usize>,
    pub graph_days: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_path: String,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    pub on_fetch_failure: Option<String>, // "surface" or "ignore"
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TrackerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TrackerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${COVID_API_URL})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TrackerError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    fn on_fetch_failure(&self) -> Option<&str> {
        self.error_handling
            .as_ref()
            .and_then(|e| e.on_fetch_failure.as_deref())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_url("source.base_url", self.api_base_url())?;
        validate_range(
            "source.timeout_seconds",
            self.request_timeout_seconds(),
            1,
            MAX_TIMEOUT_SECONDS,
        )?;
        validate_country_selector("dashboard.country", self.country())?;
        validate_positive_number("dashboard.table_rows", self.table_rows(), 1)?;
        validate_range("dashboard.graph_days", self.graph_days(), 2, MAX_GRAPH_DAYS)?;

        if let Some(export) = &self.export {
            validate_path("export.output_path", &export.output_path)?;
            if let Some(format) = &export.format {
                if ExportFormat::parse(format).is_none() {
                    return Err(TrackerError::InvalidConfigValueError {
                        field: "export.format".to_string(),
                        value: format.clone(),
                        reason: "Unsupported format. Valid formats: csv, json".to_string(),
                    });
                }
            }
        }

        if let Some(policy) = self.on_fetch_failure() {
            if !matches!(policy, "surface" | "ignore") {
                return Err(TrackerError::InvalidConfigValueError {
                    field: "error_handling.on_fetch_failure".to_string(),
                    value: policy.to_string(),
                    reason: "Valid values: surface, ignore".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn api_base_url(&self) -> &str {
        self.source
            .as_ref()
            .and_then(|s| s.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.source
            .as_ref()
            .and_then(|s| s.timeout_seconds)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn fetch_failure_policy(&self) -> FetchFailurePolicy {
        match self.on_fetch_failure() {
            Some("ignore") => FetchFailurePolicy::Ignore,
            _ => FetchFailurePolicy::Surface,
        }
    }

    fn country(&self) -> &str {
        self.dashboard
            .as_ref()
            .and_then(|d| d.country.as_deref())
            .unwrap_or(WORLDWIDE)
    }

    fn cases_type(&self) -> CasesType {
        self.dashboard
            .as_ref()
            .and_then(|d| d.cases_type)
            .unwrap_or_default()
    }

    fn table_rows(&self) -> usize {
        self.dashboard
            .as_ref()
            .and_then(|d| d.table_rows)
            .unwrap_or(DEFAULT_TABLE_ROWS)
    }

    fn map_markers(&self) -> usize {
        self.dashboard
            .as_ref()
            .and_then(|d| d.map_markers)
            .unwrap_or(DEFAULT_MAP_MARKERS)
    }

    fn graph_days(&self) -> u32 {
        self.dashboard
            .as_ref()
            .and_then(|d| d.graph_days)
            .unwrap_or(DEFAULT_GRAPH_DAYS)
    }

    fn export_path(&self) -> Option<&str> {
        self.export.as_ref().map(|e| e.output_path.as_str())
    }

    fn export_format(&self) -> ExportFormat {
        self.export
            .as_ref()
            .and_then(|e| e.format.as_deref())
            .and_then(ExportFormat::parse)
            .unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
