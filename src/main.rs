use dotenvy::dotenv;
use estoque_bot::{
    bot::{self, BotData},
    config::{database, discord::DiscordConfig, inventory as seed_config},
    core::inventory,
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Discord credentials
    let discord_config = DiscordConfig::from_env()
        .inspect_err(|e| error!("Critical error loading Discord configuration: {e}"))?;

    // 4. Database and schema
    let db = database::create_connection(&database::get_database_url())
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 5. Seed initial stock from config.toml, if present
    let seeds = seed_config::load_default_config()
        .inspect_err(|e| error!("Failed to load config.toml: {e}"))?;
    let inserted = inventory::seed_items(&db, &seeds.items)
        .await
        .inspect_err(|e| error!("Failed to seed initial stock: {e}"))?;
    if inserted > 0 {
        info!("Seeded {inserted} item(s) from config.toml.");
    }

    // 6. Run the bot until it stops, then tear down the database
    let outcome = bot::run_bot(discord_config, BotData::new(db.clone())).await;

    if let Err(e) = db.close().await {
        error!("Failed to close database: {e}");
    }
    info!("Shutdown complete.");

    outcome
}
