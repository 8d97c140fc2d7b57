use clap::Parser;
use std::process::ExitCode;

mod app_context;
mod cli;
mod geo;
mod health;
mod http;
mod logging;
mod nearby;
mod places;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::Args::parse();
    logging::init(&args);

    let app_context = match app_context::init(&args) {
        Ok(app_context) => app_context,
        Err(err) => {
            tracing::error!("Failed to initialize the place source: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let router = http::router::new(&args, app_context);

    let listener = match tokio::net::TcpListener::bind(args.listen_address).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("Failed to bind to {}: {}", args.listen_address, err);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Listening on {}.", args.listen_address);

    if let Err(err) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for the shutdown signal: {}", err);
    }
    tracing::info!("Shutting down.");
}
