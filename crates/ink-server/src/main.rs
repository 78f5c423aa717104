use clap::Parser;

use ink_server::bootstrap;
use ink_server::cli::Cli;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("inkd error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = bootstrap::load_config(&cli)?;
    bootstrap::init_tracing(cli.level_override(), &config.logging)?;

    let state = bootstrap::build_state(&config).await?;
    let app = ink_server::router(state);

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(%address, "inkd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("inkd stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
