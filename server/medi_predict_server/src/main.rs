use std::sync::Arc;

use clap::Parser;
use env_logger::Env;
use medi_predict::ModelSet;
use medi_predict_server::{app, Cli, ServerConfig, StartupError};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    if let Err(e) = run(&cli).await {
        log::error!("{e}");
        std::process::exit(2);
    }
}

async fn run(cli: &Cli) -> Result<(), StartupError> {
    let config = ServerConfig::resolve(cli)?;
    let addr = config.socket_addr()?;

    // Fitted once; every request shares the same read-only models.
    let models = Arc::new(ModelSet::fit(&config.datasets, &config.training)?);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;
    log::info!("medi-predict-server listening on http://{addr}");

    axum::serve(listener, app(models))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("cannot listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    log::info!("shutting down");
}
