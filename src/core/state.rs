use crate::core::transform::{country_options, sort_by_cases};
use crate::domain::model::{
    CaseCounts, CasesType, CountryOption, CountryRecord, GlobalStats, MapView, Selection,
};

/// Everything the dashboard views are rendered from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub selection: Selection,
    pub selected_name: Option<String>,
    pub cases_type: CasesType,
    pub info: CaseCounts,
    pub updated: Option<i64>,
    pub countries: Vec<CountryOption>,
    /// Sorted by cases, for the table.
    pub table: Vec<CountryRecord>,
    /// API order, for the map.
    pub map_countries: Vec<CountryRecord>,
    pub map_view: MapView,
}

#[derive(Debug, Clone)]
pub enum DashboardEvent {
    GlobalStatsLoaded(GlobalStats),
    CountriesLoaded(Vec<CountryRecord>),
    CountrySelected(CountryRecord),
    WorldwideSelected(GlobalStats),
    CasesTypeChanged(CasesType),
}

impl DashboardState {
    pub fn new(cases_type: CasesType) -> Self {
        Self {
            cases_type,
            ..Default::default()
        }
    }

    pub fn apply(self, event: DashboardEvent) -> Self {
        match event {
            DashboardEvent::GlobalStatsLoaded(stats) => {
                // 已選國家時不覆蓋資訊卡
                if self.selection.is_worldwide() {
                    Self {
                        info: stats.counts,
                        updated: stats.updated,
                        ..self
                    }
                } else {
                    self
                }
            }
            DashboardEvent::CountriesLoaded(records) => Self {
                countries: country_options(&records),
                table: sort_by_cases(&records),
                map_countries: records,
                ..self
            },
            DashboardEvent::CountrySelected(record) => {
                let (lat, lng) = record.coordinates();
                let selection = match record.iso_code() {
                    Some(code) => Selection::Country(code.to_string()),
                    None => Selection::Country(record.name.clone()),
                };
                Self {
                    selection,
                    selected_name: Some(record.name),
                    info: record.counts,
                    updated: record.updated,
                    map_view: MapView::centered_on(lat, lng),
                    ..self
                }
            }
            DashboardEvent::WorldwideSelected(stats) => Self {
                selection: Selection::Worldwide,
                selected_name: None,
                info: stats.counts,
                updated: stats.updated,
                map_view: MapView::INITIAL,
                ..self
            },
            DashboardEvent::CasesTypeChanged(cases_type) => Self { cases_type, ..self },
        }
    }

    pub fn selected_label(&self) -> &str {
        match (&self.selection, &self.selected_name) {
            (Selection::Worldwide, _) => "Worldwide",
            (Selection::Country(_), Some(name)) => name,
            (Selection::Country(code), None) => code,
        }
    }
}
