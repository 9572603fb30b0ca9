use crate::core::state::{DashboardEvent, DashboardState};
use crate::core::transform::build_chart_data;
use crate::domain::model::{CasesType, ChartPoint, Selection};
use crate::domain::ports::{FetchFailurePolicy, StatsSource};
use crate::utils::error::{Result, TrackerError};

/// Drives [`DashboardState`] from a [`StatsSource`].
///
/// A failed load never touches the state. Whether the failure reaches the
/// caller depends on the [`FetchFailurePolicy`].
pub struct Dashboard<S: StatsSource> {
    source: S,
    state: DashboardState,
    policy: FetchFailurePolicy,
}

impl<S: StatsSource> Dashboard<S> {
    pub fn new(source: S, cases_type: CasesType, policy: FetchFailurePolicy) -> Self {
        Self {
            source,
            state: DashboardState::new(cases_type),
            policy,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn into_state(self) -> DashboardState {
        self.state
    }

    /// Initial load: worldwide totals and the country list, fetched concurrently.
    /// Each result is applied on its own, so one failing does not drop the other.
    pub async fn load(&mut self) -> Result<()> {
        tracing::info!("Loading worldwide statistics and country list");
        let (global, countries) = tokio::join!(
            self.source.load_global_stats(),
            self.source.load_all_countries()
        );

        let global_outcome = match global {
            Ok(stats) => {
                self.dispatch(DashboardEvent::GlobalStatsLoaded(stats));
                Ok(())
            }
            Err(e) => self.on_failure("worldwide statistics", e),
        };

        let countries_outcome = match countries {
            Ok(records) => {
                tracing::info!("Loaded {} countries", records.len());
                self.dispatch(DashboardEvent::CountriesLoaded(records));
                Ok(())
            }
            Err(e) => self.on_failure("country list", e),
        };

        global_outcome.and(countries_outcome)
    }

    pub async fn select(&mut self, selection: Selection) -> Result<()> {
        tracing::debug!("Selecting {}", selection);
        match selection {
            Selection::Worldwide => match self.source.load_global_stats().await {
                Ok(stats) => {
                    self.dispatch(DashboardEvent::WorldwideSelected(stats));
                    Ok(())
                }
                Err(e) => self.on_failure("worldwide statistics", e),
            },
            Selection::Country(code) => match self.source.load_country(&code).await {
                Ok(record) => {
                    tracing::info!("Selected {} ({})", record.name, code);
                    self.dispatch(DashboardEvent::CountrySelected(record));
                    Ok(())
                }
                Err(e) => self.on_failure(&format!("country '{}'", code), e),
            },
        }
    }

    pub fn select_cases_type(&mut self, cases_type: CasesType) {
        self.dispatch(DashboardEvent::CasesTypeChanged(cases_type));
    }

    /// Daily new counts of the current metric over the last `last_days` days.
    pub async fn chart(&self, last_days: u32) -> Result<Vec<ChartPoint>> {
        match self.source.load_historical(last_days).await {
            Ok(history) => Ok(build_chart_data(&history, self.state.cases_type)),
            Err(e) => self.on_failure("historical data", e).map(|_| Vec::new()),
        }
    }

    fn dispatch(&mut self, event: DashboardEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(event);
    }

    fn on_failure(&self, what: &str, error: TrackerError) -> Result<()> {
        match self.policy {
            FetchFailurePolicy::Surface => Err(error),
            FetchFailurePolicy::Ignore => {
                tracing::warn!("Ignoring failed load of {}: {}", what, error);
                Ok(())
            }
        }
    }
}
