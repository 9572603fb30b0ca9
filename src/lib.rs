pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{http::DiseaseShClient, storage::LocalStorage};
pub use crate::app::{dashboard::Dashboard, export::TableExporter, runner::run};
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::transform::{format_stat, sort_by_cases};
pub use crate::utils::error::{Result, TrackerError};
