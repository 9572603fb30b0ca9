use crate::domain::model::{CountryRecord, GlobalStats, HistoricalTimeline};
use crate::domain::ports::{ConfigProvider, StatsSource};
use crate::utils::error::{Result, TrackerError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://disease.sh/v3/covid-19";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Client for the disease.sh v3 COVID-19 endpoints.
#[derive(Debug, Clone)]
pub struct DiseaseShClient {
    client: Client,
    base_url: String,
}

impl DiseaseShClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("covid-tracker/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(
            config.api_base_url(),
            Duration::from_secs(config.request_timeout_seconds()),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(TrackerError::HttpStatusError {
                url,
                status: status.as_u16(),
            });
        }

        // 先讀成文字，解析失敗時才能記錄原始內容
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::debug!("Unexpected payload from {}: {}", url, body);
            TrackerError::SerializationError(e)
        })
    }
}

#[async_trait]
impl StatsSource for DiseaseShClient {
    async fn load_global_stats(&self) -> Result<GlobalStats> {
        self.get_json("/all", &[]).await
    }

    async fn load_all_countries(&self) -> Result<Vec<CountryRecord>> {
        let countries: Vec<CountryRecord> = self.get_json("/countries", &[]).await?;
        tracing::debug!("Loaded {} countries", countries.len());
        Ok(countries)
    }

    async fn load_country(&self, code: &str) -> Result<CountryRecord> {
        let path = format!("/countries/{}", code);
        match self.get_json(&path, &[]).await {
            Err(TrackerError::HttpStatusError { status, .. })
                if status == StatusCode::NOT_FOUND.as_u16() =>
            {
                Err(TrackerError::CountryNotFound {
                    code: code.to_string(),
                })
            }
            other => other,
        }
    }

    async fn load_historical(&self, last_days: u32) -> Result<HistoricalTimeline> {
        self.get_json("/historical/all", &[("lastdays", last_days.to_string())])
            .await
    }
}
