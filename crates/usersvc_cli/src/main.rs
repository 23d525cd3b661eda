//! Service entry point.
//!
//! # Responsibility
//! - Load configuration, start logging, pick the store once and serve HTTP.
//! - Shut down gracefully on Ctrl-C or SIGTERM.

mod config;

use anyhow::Context;
use clap::Parser;
use config::Config;
use log::{info, warn};
use std::sync::Arc;
use tokio::net::TcpListener;
use usersvc_api::{build_router, serve, AppState, IdPolicy};
use usersvc_core::{
    connect_pool, ensure_schema, init_logging, PgUserRepository, SampleUserRepository,
    UserRepository, UserService,
};

enum Store {
    Postgres(PgUserRepository),
    Sample(SampleUserRepository),
}

impl Store {
    async fn open(config: &Config) -> Self {
        if config.mock {
            info!("event=store_select module=cli status=ok backend=sample");
            return Self::Sample(SampleUserRepository::new());
        }

        let pool = connect_pool(&config.store_config());
        // Table creation failure is diagnostic only; requests report store errors.
        if let Err(err) = ensure_schema(&pool).await {
            warn!("event=store_select module=cli status=degraded backend=postgres error={err}");
        } else {
            info!("event=store_select module=cli status=ok backend=postgres");
        }
        Self::Postgres(PgUserRepository::new(pool))
    }

    fn repository(&self) -> Arc<dyn UserRepository> {
        match self {
            Self::Postgres(repo) => Arc::new(repo.clone()),
            Self::Sample(repo) => Arc::new(repo.clone()),
        }
    }

    async fn close(&self) {
        if let Self::Postgres(repo) = self {
            repo.pool().close().await;
            info!("event=db_close module=cli status=ok");
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::parse();

    init_logging(&config.log_level, config.log_dir.as_deref())
        .context("failed to initialize logging")?;

    let store = Store::open(&config).await;
    let service = UserService::new(store.repository());
    let state = AppState::new(service, IdPolicy::from_strict_flag(config.strict_ids));

    let addr = config.listen_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    let served = serve(listener, build_router(state), shutdown_signal()).await;
    store.close().await;
    served.context("server terminated with an error")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("event=signal_install module=cli status=error signal=ctrl_c error={err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!("event=signal_install module=cli status=error signal=sigterm error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("event=shutdown_requested module=cli status=ok");
}
