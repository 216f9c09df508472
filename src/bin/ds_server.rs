//! Design system web server
//!
//! Serves the public gallery, the tokens reference, the admin console and
//! the JSON API.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/virya \
//! DS_ADMIN_EMAIL=admin@example.com DS_ADMIN_PASSWORD=secret \
//!   cargo run --bin ds_server
//!
//! curl http://localhost:3000/api/health
//! ```
//!
//! Without `DATABASE_URL` the site still starts: public pages show an empty
//! catalog and the admin console explains how to configure the database.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use virya_ds::database::{ComponentStore, DatabaseManager, UnconfiguredStore};
use virya_ds::{build_router, AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "virya_ds=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Virya design system server");

    let config = AppConfig::from_env().context("invalid configuration")?;

    let store: Arc<dyn ComponentStore> = match &config.database {
        Some(db_config) => {
            let db = DatabaseManager::new(db_config)
                .await
                .context("database connection failed")?;
            if config.auto_migrate {
                db.apply_schema().await.context("applying schema failed")?;
            } else if !db.schema_exists().await.unwrap_or(false) {
                tracing::warn!("ds_components table not found; run ds_setup or open /admin/setup");
            }
            Arc::new(db.component_repository())
        }
        None => {
            tracing::warn!("DATABASE_URL not set; running with an unconfigured catalog");
            Arc::new(UnconfiguredStore)
        }
    };

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("cannot create upload dir {}", config.upload_dir.display()))?;

    let state = AppState::new(&config, store)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("cannot bind {}", config.bind_addr))?;
    tracing::info!("Server running on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
