use std::sync::Arc;

use rollbookd::config::Config;
use rollbookd::db;
use rollbookd::http;
use rollbookd::service::RecordService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = Config::from_env_args(&args)?;
    if config.default_password_in_use {
        tracing::warn!("ADMIN_PASSWORD not set; using the default password");
    }

    let conn = db::open_db(&config.db_path)?;
    let service = Arc::new(RecordService::new(conn, config.admin_password.clone()));
    let app = http::router(service);

    tracing::info!(
        "listening on {} (database: {})",
        config.bind,
        config.db_path.display()
    );
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
