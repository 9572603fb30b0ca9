pub mod dashboard;
pub mod export;
pub mod render;
pub mod runner;
