use dotenvy::dotenv;
use fishgpt_web::config::get_configuration;
use fishgpt_web::services::metrics::init_metrics;
use fishgpt_web::startup::Application;
use service_core::error::AppError;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let settings = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        AppError::from(e)
    })?;

    init_tracing(
        "fishgpt-web",
        &settings.observability.log_level,
        settings.observability.otlp_endpoint.as_deref(),
    );

    init_metrics().map_err(|e| anyhow::anyhow!("Failed to initialize metrics: {}", e))?;

    let app = Application::build(settings).await?;
    tracing::info!(port = app.port(), "Starting fishgpt-web");

    app.run_until_stopped().await?;

    Ok(())
}
