use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// 各項病例數字；API 缺欄位或回傳 null 時為 `None`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaseCounts {
    pub cases: Option<u64>,
    pub today_cases: Option<u64>,
    pub deaths: Option<u64>,
    pub today_deaths: Option<u64>,
    pub recovered: Option<u64>,
    pub today_recovered: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountryInfo {
    pub iso2: Option<String>,
    pub iso3: Option<String>,
    pub lat: f64,
    pub long: f64,
    pub flag: Option<String>,
}

/// One country's statistics snapshot as returned by `/countries`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    #[serde(rename = "country")]
    pub name: String,
    #[serde(rename = "countryInfo", default)]
    pub country_info: CountryInfo,
    #[serde(default)]
    pub updated: Option<i64>,
    #[serde(flatten)]
    pub counts: CaseCounts,
}

impl CountryRecord {
    pub fn iso_code(&self) -> Option<&str> {
        self.country_info.iso2.as_deref()
    }

    /// (latitude, longitude)
    pub fn coordinates(&self) -> (f64, f64) {
        (self.country_info.lat, self.country_info.long)
    }
}

/// Worldwide totals from `/all`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    #[serde(default)]
    pub updated: Option<i64>,
    #[serde(flatten)]
    pub counts: CaseCounts,
    #[serde(default)]
    pub affected_countries: Option<u64>,
}

/// Cumulative counts keyed by the API's `M/D/YY` date strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoricalTimeline {
    pub cases: BTreeMap<String, u64>,
    pub deaths: BTreeMap<String, u64>,
    pub recovered: BTreeMap<String, u64>,
}

impl HistoricalTimeline {
    pub fn series(&self, cases_type: CasesType) -> &BTreeMap<String, u64> {
        match cases_type {
            CasesType::Cases => &self.cases,
            CasesType::Recovered => &self.recovered,
            CasesType::Deaths => &self.deaths,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum CasesType {
    #[default]
    Cases,
    Recovered,
    Deaths,
}

impl CasesType {
    pub const ALL: [CasesType; 3] = [CasesType::Cases, CasesType::Recovered, CasesType::Deaths];

    pub fn as_str(&self) -> &'static str {
        match self {
            CasesType::Cases => "cases",
            CasesType::Recovered => "recovered",
            CasesType::Deaths => "deaths",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CasesType::Cases => "Coronavirus cases",
            CasesType::Recovered => "Recovered",
            CasesType::Deaths => "Deaths",
        }
    }

    pub fn total(&self, counts: &CaseCounts) -> Option<u64> {
        match self {
            CasesType::Cases => counts.cases,
            CasesType::Recovered => counts.recovered,
            CasesType::Deaths => counts.deaths,
        }
    }

    pub fn today(&self, counts: &CaseCounts) -> Option<u64> {
        match self {
            CasesType::Cases => counts.today_cases,
            CasesType::Recovered => counts.today_recovered,
            CasesType::Deaths => counts.today_deaths,
        }
    }

    pub fn map_color(&self) -> &'static str {
        match self {
            CasesType::Cases => "#CC1034",
            CasesType::Recovered => "#7DD71D",
            CasesType::Deaths => "#FB4443",
        }
    }

    pub fn map_multiplier(&self) -> f64 {
        match self {
            CasesType::Cases => 800.0,
            CasesType::Recovered => 1200.0,
            CasesType::Deaths => 2000.0,
        }
    }
}

impl fmt::Display for CasesType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CasesType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cases" => Ok(CasesType::Cases),
            "recovered" => Ok(CasesType::Recovered),
            "deaths" => Ok(CasesType::Deaths),
            other => Err(format!(
                "unknown cases type '{}', expected cases, recovered or deaths",
                other
            )),
        }
    }
}

pub const WORLDWIDE: &str = "worldwide";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Worldwide,
    Country(String),
}

impl Selection {
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case(WORLDWIDE) {
            Selection::Worldwide
        } else {
            Selection::Country(trimmed.to_string())
        }
    }

    pub fn is_worldwide(&self) -> bool {
        matches!(self, Selection::Worldwide)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Worldwide => f.write_str(WORLDWIDE),
            Selection::Country(code) => f.write_str(code),
        }
    }
}

/// Dropdown entry: display name plus the ISO code used to look the country up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryOption {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub lat: f64,
    pub lng: f64,
    pub zoom: u8,
}

impl MapView {
    pub const INITIAL: MapView = MapView {
        lat: 34.80746,
        lng: -40.4796,
        zoom: 3,
    };
    pub const COUNTRY_ZOOM: u8 = 4;

    pub fn centered_on(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            zoom: Self::COUNTRY_ZOOM,
        }
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::INITIAL
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub radius: f64,
    pub color: &'static str,
}

/// Daily new count for one date of the line graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub value: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_record_from_api_json() {
        let json = serde_json::json!({
            "updated": 1700000000000i64,
            "country": "Afghanistan",
            "countryInfo": {
                "_id": 4,
                "iso2": "AF",
                "iso3": "AFG",
                "lat": 33,
                "long": 65,
                "flag": "https://disease.sh/assets/img/flags/af.png"
            },
            "cases": 232637,
            "todayCases": 0,
            "deaths": 7998,
            "todayDeaths": 0,
            "recovered": null,
            "casesPerOneMillion": 5652.4
        });

        let record: CountryRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.name, "Afghanistan");
        assert_eq!(record.iso_code(), Some("AF"));
        assert_eq!(record.coordinates(), (33.0, 65.0));
        assert_eq!(record.counts.cases, Some(232637));
        assert_eq!(record.counts.today_cases, Some(0));
        assert_eq!(record.counts.recovered, None);
        assert_eq!(record.counts.today_recovered, None);
        assert_eq!(record.updated, Some(1700000000000));
    }

    #[test]
    fn test_country_record_with_null_iso_code() {
        let json = serde_json::json!({
            "country": "Diamond Princess",
            "countryInfo": {"_id": null, "iso2": null, "iso3": null, "lat": 0, "long": 0},
            "cases": 712
        });

        let record: CountryRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.iso_code(), None);
        assert_eq!(record.counts.cases, Some(712));
    }

    #[test]
    fn test_country_list_ignores_negative_unused_counts() {
        // 資料修正後 active 可能為負數，不應讓整份清單解碼失敗
        let json = serde_json::json!([
            {"country": "A", "countryInfo": {"iso2": "AA"}, "cases": 10, "active": 5},
            {"country": "B", "countryInfo": {"iso2": "BB"}, "cases": 20, "active": -3, "critical": -1}
        ]);

        let records: Vec<CountryRecord> = serde_json::from_value(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "B");
        assert_eq!(records[1].counts.cases, Some(20));
    }

    #[test]
    fn test_global_stats_from_api_json() {
        let json = serde_json::json!({
            "updated": 1700000000000i64,
            "cases": 700000000,
            "todayCases": 1234,
            "deaths": 7000000,
            "recovered": 600000000,
            "affectedCountries": 231
        });

        let stats: GlobalStats = serde_json::from_value(json).unwrap();
        assert_eq!(stats.counts.cases, Some(700000000));
        assert_eq!(stats.counts.today_cases, Some(1234));
        assert_eq!(stats.affected_countries, Some(231));
    }

    #[test]
    fn test_cases_type_accessors() {
        let counts = CaseCounts {
            cases: Some(10),
            today_cases: Some(1),
            deaths: Some(2),
            today_deaths: None,
            recovered: Some(5),
            today_recovered: Some(3),
            ..Default::default()
        };

        assert_eq!(CasesType::Cases.total(&counts), Some(10));
        assert_eq!(CasesType::Deaths.today(&counts), None);
        assert_eq!(CasesType::Recovered.today(&counts), Some(3));
    }

    #[test]
    fn test_cases_type_from_str() {
        assert_eq!("Deaths".parse::<CasesType>(), Ok(CasesType::Deaths));
        assert!("active".parse::<CasesType>().is_err());
    }

    #[test]
    fn test_selection_parse() {
        assert_eq!(Selection::parse("Worldwide"), Selection::Worldwide);
        assert_eq!(
            Selection::parse(" US "),
            Selection::Country("US".to_string())
        );
        assert_eq!(Selection::Worldwide.to_string(), "worldwide");
    }
}
