//! Database setup tool
//!
//! Creates the `ds_components` table with its row-level security policies
//! and seeds the sample components.
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/virya cargo run --bin ds_setup --features cli
//! ```

use anyhow::{bail, Context};
use clap::Parser;

use virya_ds::config::AppConfig;
use virya_ds::database::{seed::seed_samples, ComponentStore, DatabaseManager};

/// Create the catalog schema and seed sample components
#[derive(Parser, Debug)]
#[command(name = "ds_setup")]
#[command(about = "Create the ds_components table and seed sample components")]
struct Args {
    /// Only create the schema
    #[arg(long)]
    skip_seed: bool,

    /// Re-apply the schema even if the table already exists
    #[arg(long)]
    force_schema: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "virya_ds=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = AppConfig::from_env().context("invalid configuration")?;
    let Some(db_config) = config.database else {
        bail!("DATABASE_URL must be set to run setup");
    };

    let db = DatabaseManager::new(&db_config)
        .await
        .context("database connection failed")?;
    db.test_connection().await.context("database is not reachable")?;

    if args.force_schema || !db.schema_exists().await? {
        db.apply_schema().await.context("applying schema failed")?;
    } else {
        tracing::info!("ds_components already exists; skipping schema");
    }

    if !args.skip_seed {
        let repository = db.component_repository();
        let seeded = seed_samples(&repository).await?;
        for component in &seeded {
            tracing::info!("Seeded {} ({})", component.name, component.slug);
        }
        tracing::info!("{} components in catalog", repository.count().await?);
    }

    db.close().await;
    Ok(())
}
