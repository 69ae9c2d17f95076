// Main entry point - Dependency injection and mode dispatch
use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use maritime_risk::application::assessment_service::{AssessmentService, RunSettings};
use maritime_risk::application::streaming_service::StreamingAssessmentService;
use maritime_risk::application::weather_provider::WeatherProvider;
use maritime_risk::infrastructure::config::{load_config, AppConfig, RunMode};
use maritime_risk::infrastructure::open_meteo::OpenMeteoProvider;
use maritime_risk::infrastructure::report_store::{write_file, ReportStore};
use maritime_risk::presentation::app_state::AppState;
use maritime_risk::presentation::handlers::router;
use maritime_risk::presentation::html_dashboard::render_dashboard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("maritime_risk=info,tower_http=info")),
        )
        .init();

    // Load configuration and resolve the scoring policy up front
    let config = load_config()?;
    let policy = config.selected_policy()?;
    tracing::info!(
        "Using scoring policy {} v{} (max score {})",
        policy.name,
        policy.version,
        policy.max_possible()
    );

    // Create provider (infrastructure layer)
    let provider: Arc<dyn WeatherProvider> = Arc::new(OpenMeteoProvider::new(
        config.provider.base_url.clone(),
        Duration::from_secs(config.provider.timeout_secs),
        config.provider.forecast_hours,
        config.provider.timezone.clone(),
    )?);

    // Create services (application layer)
    let settings = RunSettings {
        policy: Arc::new(policy),
        locations: Arc::new(config.locations()),
        max_concurrency: config.provider.max_concurrency,
        strategy: config.scoring.aggregation,
    };
    let assessment_service = AssessmentService::new(provider.clone(), settings.clone());

    match config.mode {
        RunMode::Report => run_report(&config, &assessment_service).await,
        RunMode::Serve => {
            let streaming_service = StreamingAssessmentService::new(provider, settings);
            serve(&config, assessment_service, streaming_service).await
        }
    }
}

async fn run_report(config: &AppConfig, service: &AssessmentService) -> anyhow::Result<()> {
    let run = service.run().await;

    let store = ReportStore::new(&config.output.directory, config.output.file_prefix.clone());
    store.save(&run).await?;

    let html_path = std::path::Path::new(&config.output.directory).join(&config.output.html_file);
    let html = render_dashboard(&run, &config.output.title);
    write_file(&html_path, html.as_bytes()).await?;
    tracing::info!("Saved HTML dashboard to {}", html_path.display());

    tracing::info!(
        "Global risk index: {} ({} risk)",
        run.summary.global_index,
        run.summary.global_level.as_str()
    );
    for line in run.summary.lines() {
        tracing::info!("{}", line);
    }
    Ok(())
}

async fn serve(
    config: &AppConfig,
    assessment_service: AssessmentService,
    streaming_service: StreamingAssessmentService,
) -> anyhow::Result<()> {
    let state = Arc::new(AppState {
        assessment_service,
        streaming_service,
        dashboard_title: config.output.title.clone(),
    });

    // Build router (presentation layer)
    let app = router(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config
        .server
        .addr
        .parse()
        .with_context(|| format!("Invalid server address {}", config.server.addr))?;
    tracing::info!("Starting maritime-risk service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
