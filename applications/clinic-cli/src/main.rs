//! Clinic CLI - appointment booking from the command line
use clap::Parser;
use clinic_cli::{open_store, App, Cli, ClinicConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (stderr, so command output stays clean)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clinic_cli=info,clinic_storage=info,clinic_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ClinicConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let store = open_store(&config).await?;
    let app = App::new(store.clone(), config.auth.bcrypt_cost).with_json(cli.json);

    let mut stdout = std::io::stdout().lock();
    let result = app.execute(cli.command, &mut stdout).await;

    store.close().await;

    result?;
    Ok(())
}
