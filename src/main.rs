use rides::config::Config;
use rides::db::SqliteStore;
use rides::engine::Engine;
use rides::logging;
use rides::server::serve;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    logging::init(&config.log_level);

    let store = SqliteStore::connect(&config.database_url, config.max_connections).await?;

    let engine = Engine::new(store).await?;

    serve(engine, config.socket_addr()).await?;

    Ok(())
}
