use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payqr::application::service::PaymentService;
use payqr::domain::payload::Requisites;
use payqr::domain::ports::PaymentStoreArc;
use payqr::infrastructure::sqlite::SqlitePaymentStore;
use payqr::interfaces::http::{AppState, app_router};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DB_PATH_ENV: &str = "PAYMENTS_DB";
const DEFAULT_DB_PATH: &str = "payments.db";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the payments database. Falls back to the PAYMENTS_DB
    /// environment variable, then to "payments.db".
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:8000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "payqr=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let db_path = cli.db_path.unwrap_or_else(|| {
        env::var(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_PATH))
    });

    let store: PaymentStoreArc = Arc::new(SqlitePaymentStore::open(&db_path).into_diagnostic()?);
    let service = PaymentService::new(store, Requisites::default());
    let app = app_router(AppState::new(service));

    tracing::info!("payment QR service listening on {}", cli.bind);
    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .into_diagnostic()?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .into_diagnostic()?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C signal handler");
    tracing::info!("shutdown signal received");
}
