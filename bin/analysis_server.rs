// Quant Expense - analysis function server
//
// Serves POST /ai-analyze, forwarding expense summaries to Gemini with the
// key held in GEMINI_API_KEY.

use log::{info, warn};
use quant_expense::config::AnalysisConfig;
use quant_expense::llm::AnalysisService;
use quant_expense::server::router;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AnalysisConfig::from_env();
    let service = AnalysisService::new(&config);
    if !service.is_configured() {
        warn!("GEMINI_API_KEY is not set; analysis requests will answer 503");
    }

    let addr = std::env::var("ANALYSIS_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Analysis server listening on http://{} (model {})", addr, config.model);

    axum::serve(listener, router(service)).await?;
    Ok(())
}
