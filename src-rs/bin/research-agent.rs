use research_agent_rs::api::AgentServer;
use research_agent_rs::config::AppConfig;
use research_agent_rs::helpers::build_app_state;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "research_agent_rs=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    info!(model = %config.agent.model, "loaded configuration");

    // The blocking HTTP client must be built outside the async runtime.
    let state = {
        let config = config.clone();
        tokio::task::spawn_blocking(move || build_app_state(&config)).await??
    };

    let server = AgentServer::new(&config.host, config.port, state);
    server.start().await
}
