use anyhow::Context;
use concierge::{
    api::routes::create_router, AppState, ConciergeService, Config, ContextStore, OllamaConnector,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(Config::from_env().map_err(|e| anyhow::anyhow!(e.to_string()))?);

    let contexts = Arc::new(ContextStore::new(config.chat.context_ttl()));
    let connector = Arc::new(OllamaConnector::new(&config.llm));
    let service = Arc::new(ConciergeService::new(contexts.clone(), connector));

    // Periodic sweep of idle conversation contexts, independent of request
    // handling.
    let sweep_store = contexts.clone();
    let sweep_interval = config.chat.cleanup_interval();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_interval);
        interval.tick().await; // first tick fires immediately
        loop {
            interval.tick().await;
            sweep_store.cleanup_expired();
            info!(live_contexts = sweep_store.len(), "context sweep complete");
        }
    });

    let state = AppState {
        config: config.clone(),
        contexts,
        service,
    };

    let app = create_router().with_state(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(model = %config.llm.model, %addr, "concierge server listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
