use crate::adapters::http::DiseaseShClient;
use crate::adapters::storage::LocalStorage;
use crate::app::dashboard::Dashboard;
use crate::app::export::TableExporter;
use crate::app::render;
use crate::domain::model::Selection;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct RunOutput {
    pub rendered: String,
    /// Full path of the exported table, when an export path is configured.
    pub exported: Option<String>,
}

/// One full dashboard cycle: validate, load, select, chart, render, export.
pub async fn run<C: ConfigProvider + Validate>(config: &C) -> Result<RunOutput> {
    config.validate()?;

    let client = DiseaseShClient::from_config(config)?;
    tracing::info!("Using statistics API at {}", client.base_url());

    let mut dashboard = Dashboard::new(
        client,
        config.cases_type(),
        config.fetch_failure_policy(),
    );
    dashboard.load().await?;

    let selection = Selection::parse(config.country());
    if !selection.is_worldwide() {
        dashboard.select(selection).await?;
    }

    let chart = dashboard.chart(config.graph_days()).await?;
    let state = dashboard.into_state();

    let rendered = [
        render::render_header(&state),
        render::render_info_boxes(&state),
        render::render_map(&state, config.map_markers()),
        render::render_table(&state, config.table_rows()),
        render::render_chart(&chart, state.cases_type),
    ]
    .join("\n\n");

    let exported = match config.export_path() {
        Some(dir) => {
            let exporter = TableExporter::new(LocalStorage::new(dir.to_string()));
            let filename = exporter.export(&state.table, config.export_format()).await?;
            Some(Path::new(dir).join(filename).display().to_string())
        }
        None => None,
    };

    Ok(RunOutput { rendered, exported })
}
