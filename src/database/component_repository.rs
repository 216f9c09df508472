//! Component store - persistence for catalog entries
//!
//! `ComponentStore` is the seam between the catalog service and whatever
//! holds the rows. The Postgres implementation runs every write inside a
//! transaction that identifies the caller to the row-level-security policies
//! on `ds_components`; reads go through the public read policy.

use async_trait::async_trait;
use ds_types::Category;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DsError, Result};
use crate::models::{DsComponent, DsComponentPatch, NewDsComponent};

/// Storage operations for the component catalog
#[async_trait]
pub trait ComponentStore: Send + Sync {
    /// False when no backing database has been configured
    fn is_configured(&self) -> bool {
        true
    }

    /// All entries ordered by name
    async fn list_by_name(&self) -> Result<Vec<DsComponent>>;

    /// All entries ordered by category, then name
    async fn list_by_category(&self) -> Result<Vec<DsComponent>>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<DsComponent>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<DsComponent>>;

    async fn insert(&self, actor: &str, component: NewDsComponent) -> Result<DsComponent>;

    /// Apply `patch` to an existing entry; `NotFound` when `id` is unknown
    async fn update(&self, actor: &str, id: Uuid, patch: DsComponentPatch)
        -> Result<DsComponent>;

    /// Remove an entry; `NotFound` when `id` is unknown
    async fn delete(&self, actor: &str, id: Uuid) -> Result<()>;

    /// Insert, or overwrite the entry that already holds the same slug
    async fn upsert_by_slug(&self, actor: &str, component: NewDsComponent)
        -> Result<DsComponent>;

    async fn count(&self) -> Result<usize>;
}

const COLUMNS: &str = "id, name, slug, category, description, usage_markdown, code, \
                       thumbnail_url, image_urls, created_at, updated_at";

/// Postgres-backed component store
#[derive(Clone, Debug)]
pub struct PgComponentRepository {
    pool: PgPool,
}

impl PgComponentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Open a transaction that the write policy admits
    async fn begin_authenticated(&self, actor: &str) -> Result<Transaction<'static, Postgres>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "SELECT set_config('ds.role', 'authenticated', true), set_config('ds.actor', $1, true)",
        )
        .bind(actor)
        .execute(&mut *tx)
        .await?;
        debug!("Opened authenticated transaction for {}", actor);
        Ok(tx)
    }

    async fn fetch_ordered(&self, order_by: &str) -> Result<Vec<DsComponent>> {
        let sql = format!("SELECT {} FROM ds_components ORDER BY {}", COLUMNS, order_by);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(component_from_row).collect()
    }
}

fn component_from_row(row: &PgRow) -> Result<DsComponent> {
    let category: String = row.try_get("category")?;
    let category = category
        .parse::<Category>()
        .map_err(|e| DsError::Database(sqlx::Error::Decode(Box::new(e))))?;

    Ok(DsComponent {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        slug: row.try_get("slug")?,
        category,
        description: row.try_get("description")?,
        usage_markdown: row.try_get("usage_markdown")?,
        code: row.try_get("code")?,
        thumbnail_url: row.try_get("thumbnail_url")?,
        image_urls: row.try_get("image_urls")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl ComponentStore for PgComponentRepository {
    async fn list_by_name(&self) -> Result<Vec<DsComponent>> {
        self.fetch_ordered("name").await
    }

    async fn list_by_category(&self) -> Result<Vec<DsComponent>> {
        self.fetch_ordered("category, name").await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<DsComponent>> {
        let sql = format!("SELECT {} FROM ds_components WHERE slug = $1", COLUMNS);
        let row = sqlx::query(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(component_from_row).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<DsComponent>> {
        let sql = format!("SELECT {} FROM ds_components WHERE id = $1", COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(component_from_row).transpose()
    }

    async fn insert(&self, actor: &str, component: NewDsComponent) -> Result<DsComponent> {
        let mut tx = self.begin_authenticated(actor).await?;
        let sql = format!(
            r#"INSERT INTO ds_components
                   (id, name, slug, category, description, usage_markdown, code,
                    thumbnail_url, image_urls)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               RETURNING {}"#,
            COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(Uuid::new_v4())
            .bind(&component.name)
            .bind(&component.slug)
            .bind(component.category.as_str())
            .bind(&component.description)
            .bind(&component.usage_markdown)
            .bind(&component.code)
            .bind(&component.thumbnail_url)
            .bind(&component.image_urls)
            .fetch_one(&mut *tx)
            .await?;
        let created = component_from_row(&row)?;
        tx.commit().await?;

        info!(
            "Created component {} '{}' ({}) by {}",
            created.id, created.name, created.slug, actor
        );
        Ok(created)
    }

    async fn update(
        &self,
        actor: &str,
        id: Uuid,
        patch: DsComponentPatch,
    ) -> Result<DsComponent> {
        let mut tx = self.begin_authenticated(actor).await?;
        let sql = format!(
            r#"UPDATE ds_components SET
                   name = COALESCE($2, name),
                   slug = COALESCE($3, slug),
                   category = COALESCE($4, category),
                   description = COALESCE($5, description),
                   usage_markdown = COALESCE($6, usage_markdown),
                   code = COALESCE($7, code),
                   thumbnail_url = CASE WHEN $8 THEN $9 ELSE thumbnail_url END,
                   image_urls = CASE WHEN $10 THEN $11 ELSE image_urls END
               WHERE id = $1
               RETURNING {}"#,
            COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(&patch.name)
            .bind(&patch.slug)
            .bind(patch.category.map(|c| c.as_str()))
            .bind(&patch.description)
            .bind(&patch.usage_markdown)
            .bind(&patch.code)
            .bind(patch.thumbnail_url.is_some())
            .bind(patch.thumbnail_url.clone().flatten())
            .bind(patch.image_urls.is_some())
            .bind(patch.image_urls.clone().flatten())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            return Err(DsError::NotFound(format!("component {}", id)));
        };
        let updated = component_from_row(&row)?;
        tx.commit().await?;

        info!("Updated component {} '{}' by {}", id, updated.name, actor);
        Ok(updated)
    }

    async fn delete(&self, actor: &str, id: Uuid) -> Result<()> {
        let mut tx = self.begin_authenticated(actor).await?;
        let result = sqlx::query("DELETE FROM ds_components WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DsError::NotFound(format!("component {}", id)));
        }
        tx.commit().await?;

        info!("Deleted component {} by {}", id, actor);
        Ok(())
    }

    async fn upsert_by_slug(&self, actor: &str, component: NewDsComponent) -> Result<DsComponent> {
        let mut tx = self.begin_authenticated(actor).await?;
        let sql = format!(
            r#"INSERT INTO ds_components
                   (id, name, slug, category, description, usage_markdown, code,
                    thumbnail_url, image_urls)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               ON CONFLICT (slug) DO UPDATE SET
                   name = EXCLUDED.name,
                   category = EXCLUDED.category,
                   description = EXCLUDED.description,
                   usage_markdown = EXCLUDED.usage_markdown,
                   code = EXCLUDED.code,
                   thumbnail_url = EXCLUDED.thumbnail_url,
                   image_urls = EXCLUDED.image_urls
               RETURNING {}"#,
            COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(Uuid::new_v4())
            .bind(&component.name)
            .bind(&component.slug)
            .bind(component.category.as_str())
            .bind(&component.description)
            .bind(&component.usage_markdown)
            .bind(&component.code)
            .bind(&component.thumbnail_url)
            .bind(&component.image_urls)
            .fetch_one(&mut *tx)
            .await?;
        let saved = component_from_row(&row)?;
        tx.commit().await?;

        info!("Upserted component '{}' ({}) by {}", saved.name, saved.slug, actor);
        Ok(saved)
    }

    async fn count(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ds_components")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as usize)
    }
}
