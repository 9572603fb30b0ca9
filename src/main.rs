use clap::Parser;
use covid_tracker::utils::error::ErrorSeverity;
use covid_tracker::utils::logger;
use covid_tracker::{CliConfig, TomlConfig, TrackerError};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting covid-tracker");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 指定 --config 時以 TOML 檔為準
    let outcome = match &config.config {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path);
            match TomlConfig::from_file(path) {
                Ok(toml_config) => covid_tracker::run(&toml_config).await,
                Err(e) => Err(e),
            }
        }
        None => covid_tracker::run(&config).await,
    };

    match outcome {
        Ok(output) => {
            println!("{}", output.rendered);
            if let Some(path) = output.exported {
                tracing::info!("📁 Table exported to: {}", path);
                println!("📁 Table exported to: {}", path);
            }
        }
        Err(e) => {
            report_failure(&e);

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 4,      // 查無國家
                ErrorSeverity::Medium => 2,   // API 暫時失敗
                ErrorSeverity::High => 1,     // 設定或資料錯誤
                ErrorSeverity::Critical => 3, // 系統錯誤
            };
            std::process::exit(exit_code);
        }
    }
}

fn report_failure(e: &TrackerError) {
    tracing::error!(
        "❌ Dashboard failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
}
