use clap::Parser;
use dotenvy::dotenv;
use invoice_desk::{
    cli::{self, Cli, Context},
    config::{self, database},
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible); logs go to stderr so printed
    // documents on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file before parsing, so DATABASE_URL can come from it
    dotenv().ok(); // Non-fatal, env vars can be set externally
    let cli = Cli::parse();

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Critical error loading application configuration: {e}"))?;
    info!("Successfully processed application configuration.");

    // 4. Open the database
    let database_url = cli
        .database_url
        .clone()
        .unwrap_or_else(database::get_database_url);
    let db = database::connect(&database_url)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {e}"))?;

    // 5. Run the command
    let ctx = Context {
        config: &app_config,
        database: &db,
        today: chrono::Local::now().date_naive(),
    };
    let output = cli::run(cli.command, &ctx)
        .await
        .inspect_err(|e| error!("Command failed: {e}"))?;
    println!("{output}");

    Ok(())
}
