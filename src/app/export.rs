use crate::domain::model::CountryRecord;
use crate::domain::ports::{ExportFormat, Storage};
use crate::utils::error::{Result, TrackerError};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    country: &'a str,
    iso2: Option<&'a str>,
    cases: Option<u64>,
    today_cases: Option<u64>,
    deaths: Option<u64>,
    today_deaths: Option<u64>,
    recovered: Option<u64>,
    today_recovered: Option<u64>,
}

impl<'a> From<&'a CountryRecord> for ExportRow<'a> {
    fn from(record: &'a CountryRecord) -> Self {
        Self {
            country: &record.name,
            iso2: record.iso_code(),
            cases: record.counts.cases,
            today_cases: record.counts.today_cases,
            deaths: record.counts.deaths,
            today_deaths: record.counts.today_deaths,
            recovered: record.counts.recovered,
            today_recovered: record.counts.today_recovered,
        }
    }
}

/// Writes the country table to storage in the table's order.
pub struct TableExporter<S: Storage> {
    storage: S,
}

impl<S: Storage> TableExporter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Returns the file name written, relative to the storage root.
    pub async fn export(&self, records: &[CountryRecord], format: ExportFormat) -> Result<String> {
        let filename = format!("countries.{}", format.extension());
        let data = match format {
            ExportFormat::Csv => to_csv(records)?,
            ExportFormat::Json => to_json(records)?,
        };

        tracing::debug!("Writing {} ({} bytes) to storage", filename, data.len());
        self.storage.write_file(&filename, &data).await?;
        tracing::info!("Exported {} countries to {}", records.len(), filename);
        Ok(filename)
    }
}

const CSV_HEADER: [&str; 8] = [
    "country",
    "iso2",
    "cases",
    "today_cases",
    "deaths",
    "today_deaths",
    "recovered",
    "today_recovered",
];

fn to_csv(records: &[CountryRecord]) -> Result<Vec<u8>> {
    // 空表也要輸出標題列
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.serialize(ExportRow::from(record))?;
    }
    writer
        .into_inner()
        .map_err(|e| TrackerError::ProcessingError {
            message: format!("Failed to finish CSV output: {}", e),
        })
}

fn to_json(records: &[CountryRecord]) -> Result<Vec<u8>> {
    let rows: Vec<ExportRow<'_>> = records.iter().map(ExportRow::from).collect();
    Ok(serde_json::to_vec_pretty(&rows)?)
}
