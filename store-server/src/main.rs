use store_server::core::{Config, Server, ServerState};
use store_server::utils::logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();

    let log_dir = format!("{}/logs", config.work_dir);
    std::fs::create_dir_all(&log_dir).ok();
    logger::init_logger_with_file(std::env::var("LOG_LEVEL").ok().as_deref(), Some(&log_dir));

    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        "store-server starting"
    );

    let state = ServerState::initialize(config).await?;
    Server::new(state).run().await?;
    Ok(())
}
