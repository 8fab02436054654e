use rag_console::config::load_settings;
use rag_console::events::client::InngestClient;
use rag_console::events::dispatcher::EventDispatcher;
use rag_console::runs::client::HttpRunSource;
use rag_console::runs::poller::RunPoller;
use rag_console::storage::sink::FileSink;
use rag_console::ui::{build_router, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings()?;
    let bind_addr: SocketAddr = settings.bind_addr.parse()?;

    // One HTTP client for both engine APIs.
    let http_client = reqwest::Client::new();

    let sender = InngestClient::new(
        http_client.clone(),
        &settings.event_api_base,
        settings.effective_event_key(),
    );
    let runs = HttpRunSource::new(http_client, &settings.runs_api_base);

    let state = AppState {
        sink: Arc::new(FileSink::new(&settings.upload_dir)),
        dispatcher: EventDispatcher::new(Arc::new(sender)),
        poller: Arc::new(RunPoller::with_timing(
            Arc::new(runs),
            settings.poll_timeout(),
            settings.poll_interval(),
        )),
    };

    tracing::info!("Event API: {}", settings.event_api_base);
    tracing::info!("Runs API: {}", settings.runs_api_base);
    if settings.is_production {
        tracing::info!("Running in production mode");
    }

    tracing::info!("Uploads directory: {}", state.sink.directory().display());

    let app = build_router(state, settings.max_upload_bytes);

    tracing::info!("UI listening on {}", bind_addr);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
