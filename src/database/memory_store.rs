//! Non-Postgres component stores
//!
//! `InMemoryComponentStore` backs tests and database-less demos.
//! `UnconfiguredStore` stands in when `DATABASE_URL` is absent: the public
//! pages render empty and every write is refused.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use super::ComponentStore;
use crate::error::{DsError, Result};
use crate::models::{DsComponent, DsComponentPatch, NewDsComponent};

const DUPLICATE_SLUG: &str = "A component with this slug already exists";

/// Component store held entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryComponentStore {
    rows: RwLock<Vec<DsComponent>>,
}

impl InMemoryComponentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `rows` as-is
    pub fn with_rows(rows: Vec<DsComponent>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }
}

#[async_trait]
impl ComponentStore for InMemoryComponentStore {
    async fn list_by_name(&self) -> Result<Vec<DsComponent>> {
        let mut rows = self.rows.read().await.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn list_by_category(&self) -> Result<Vec<DsComponent>> {
        let mut rows = self.rows.read().await.clone();
        rows.sort_by(|a, b| {
            a.category
                .as_str()
                .cmp(b.category.as_str())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(rows)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<DsComponent>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|c| c.slug == slug).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<DsComponent>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, actor: &str, component: NewDsComponent) -> Result<DsComponent> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|c| c.slug == component.slug) {
            return Err(DsError::Conflict(DUPLICATE_SLUG.to_string()));
        }
        let created = component.into_component(Uuid::new_v4(), Utc::now());
        rows.push(created.clone());
        info!("Created component {} '{}' by {}", created.id, created.name, actor);
        Ok(created)
    }

    async fn update(
        &self,
        actor: &str,
        id: Uuid,
        patch: DsComponentPatch,
    ) -> Result<DsComponent> {
        let mut rows = self.rows.write().await;
        if let Some(slug) = &patch.slug {
            if rows.iter().any(|c| &c.slug == slug && c.id != id) {
                return Err(DsError::Conflict(DUPLICATE_SLUG.to_string()));
            }
        }
        let row = rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| DsError::NotFound(format!("component {}", id)))?;
        row.apply(&patch);
        row.updated_at = Utc::now();
        info!("Updated component {} '{}' by {}", id, row.name, actor);
        Ok(row.clone())
    }

    async fn delete(&self, actor: &str, id: Uuid) -> Result<()> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|c| c.id != id);
        if rows.len() == before {
            return Err(DsError::NotFound(format!("component {}", id)));
        }
        info!("Deleted component {} by {}", id, actor);
        Ok(())
    }

    async fn upsert_by_slug(&self, actor: &str, component: NewDsComponent) -> Result<DsComponent> {
        let existing = {
            let rows = self.rows.read().await;
            rows.iter().find(|c| c.slug == component.slug).map(|c| c.id)
        };
        match existing {
            Some(id) => self.update(actor, id, component.into()).await,
            None => self.insert(actor, component).await,
        }
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.rows.read().await.len())
    }
}

/// Placeholder store used when no database is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredStore;

impl UnconfiguredStore {
    fn refuse<T>() -> Result<T> {
        Err(DsError::NotConfigured(
            "set DATABASE_URL to enable editing".to_string(),
        ))
    }
}

#[async_trait]
impl ComponentStore for UnconfiguredStore {
    fn is_configured(&self) -> bool {
        false
    }

    async fn list_by_name(&self) -> Result<Vec<DsComponent>> {
        Ok(Vec::new())
    }

    async fn list_by_category(&self) -> Result<Vec<DsComponent>> {
        Ok(Vec::new())
    }

    async fn find_by_slug(&self, _slug: &str) -> Result<Option<DsComponent>> {
        Ok(None)
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<DsComponent>> {
        Ok(None)
    }

    async fn insert(&self, _actor: &str, _component: NewDsComponent) -> Result<DsComponent> {
        Self::refuse()
    }

    async fn update(
        &self,
        _actor: &str,
        _id: Uuid,
        _patch: DsComponentPatch,
    ) -> Result<DsComponent> {
        Self::refuse()
    }

    async fn delete(&self, _actor: &str, _id: Uuid) -> Result<()> {
        Self::refuse()
    }

    async fn upsert_by_slug(&self, _actor: &str, _component: NewDsComponent) -> Result<DsComponent> {
        Self::refuse()
    }

    async fn count(&self) -> Result<usize> {
        Ok(0)
    }
}
