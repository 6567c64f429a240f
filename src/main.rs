//! # Debt Proposals
//!
//! Service entry point: loads configuration, wires repositories and serves
//! the HTTP API until interrupted.

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use debt_proposals::adapters::clock::SystemClock;
use debt_proposals::adapters::http::{app_router, AppState};
use debt_proposals::adapters::memory::{InMemoryDebtorRepository, InMemoryProposalRepository};
use debt_proposals::adapters::postgres::{
    run_migrations, PostgresDebtorRepository, PostgresProposalRepository,
};
use debt_proposals::config::{AppConfig, DatabaseConfig};
use debt_proposals::ports::{DebtorRepository, ProposalRepository};

type Repositories = (Arc<dyn DebtorRepository>, Arc<dyn ProposalRepository>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    init_tracing(&config);
    config.validate().context("validating configuration")?;

    info!("Starting Debt Proposals v{}", env!("CARGO_PKG_VERSION"));

    let (debtor_repository, proposal_repository) = match &config.database {
        Some(database) => connect(database).await?,
        None => {
            warn!("No database configured, proposals are kept in memory");
            in_memory()
        }
    };

    let state = AppState {
        debtor_repository,
        proposal_repository,
        clock: Arc::new(SystemClock),
        checklist_defaults: config.proposals.checklist_defaults(),
    };
    let app = app_router(state, config.server.request_timeout());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down Debt Proposals");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.pretty().init();
    }
}

async fn connect(database: &DatabaseConfig) -> anyhow::Result<Repositories> {
    let pool = database
        .connect()
        .await
        .context("connecting to PostgreSQL")?;

    if database.run_migrations {
        run_migrations(&pool).await?;
        info!("Database migrations applied");
    }

    let debtors: Arc<dyn DebtorRepository> = Arc::new(PostgresDebtorRepository::new(pool.clone()));
    let proposals: Arc<dyn ProposalRepository> = Arc::new(PostgresProposalRepository::new(pool));
    Ok((debtors, proposals))
}

fn in_memory() -> Repositories {
    let debtors: Arc<dyn DebtorRepository> = Arc::new(InMemoryDebtorRepository::new());
    let proposals: Arc<dyn ProposalRepository> = Arc::new(InMemoryProposalRepository::new());
    (debtors, proposals)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
}
