//! Catalog Service - cached reads and validated writes for catalog entries

use std::sync::Arc;
use std::time::Duration;

use ds_types::Category;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::cache::{CacheStats, TaggedCache};
use crate::database::ComponentStore;
use crate::error::{DsError, Result};
use crate::models::{CategoryCount, DsComponent, NewDsComponent};
use crate::slug::{is_valid_slug, slugify};

/// Cache tag shared by every catalog read
pub const CACHE_TAG: &str = "ds-components";

const REQUIRED_FIELDS: &str = "Name, slug, and code are required.";
const INVALID_SLUG: &str = "Slug may only contain lowercase letters, numbers and hyphens.";

/// Values of the admin create/edit form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentInput {
    pub name: String,
    pub slug: String,
    pub category: Category,
    pub description: String,
    pub usage_markdown: String,
    pub code: String,
    pub thumbnail_url: String,
    pub image_urls: Vec<String>,
}

impl ComponentInput {
    /// Pre-fill the form from a stored entry
    pub fn from_component(component: &DsComponent) -> Self {
        Self {
            name: component.name.clone(),
            slug: component.slug.clone(),
            category: component.category,
            description: component.description.clone(),
            usage_markdown: component.usage_markdown.clone(),
            code: component.code.clone(),
            thumbnail_url: component.thumbnail_url.clone().unwrap_or_default(),
            image_urls: component.image_urls.clone().unwrap_or_default(),
        }
    }

    /// Append uploaded images; the first one becomes the thumbnail if none is set
    pub fn add_images(&mut self, urls: Vec<String>) {
        if self.thumbnail_url.trim().is_empty() {
            if let Some(first) = urls.first() {
                self.thumbnail_url = first.clone();
            }
        }
        self.image_urls.extend(urls);
    }

    /// Remove the image at `index`. When it was the thumbnail, the next
    /// remaining image takes its place, or the thumbnail is cleared.
    pub fn remove_image(&mut self, index: usize) {
        if index >= self.image_urls.len() {
            return;
        }
        let removed = self.image_urls.remove(index);
        if self.thumbnail_url == removed {
            self.thumbnail_url = self.image_urls.first().cloned().unwrap_or_default();
        }
    }

    /// Make the image at `index` the thumbnail
    pub fn select_thumbnail(&mut self, index: usize) {
        if let Some(url) = self.image_urls.get(index) {
            self.thumbnail_url = url.clone();
        }
    }

    /// Trim and check the input, producing the row to store
    pub fn validate(&self) -> Result<NewDsComponent> {
        let name = self.name.trim().to_string();
        let slug = match self.slug.trim() {
            "" => slugify(&name),
            given => given.to_string(),
        };
        let code = self.code.trim().to_string();

        if name.is_empty() || slug.is_empty() || code.is_empty() {
            return Err(DsError::Validation(REQUIRED_FIELDS.to_string()));
        }
        if !is_valid_slug(&slug) {
            return Err(DsError::Validation(INVALID_SLUG.to_string()));
        }

        let image_urls: Vec<String> = self
            .image_urls
            .iter()
            .map(|u| u.trim())
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .collect();
        let thumbnail_url = match self.thumbnail_url.trim() {
            "" => image_urls.first().cloned(),
            given => Some(given.to_string()),
        };

        Ok(NewDsComponent {
            name,
            slug,
            category: self.category,
            description: self.description.trim().to_string(),
            usage_markdown: self.usage_markdown.trim().to_string(),
            code,
            thumbnail_url,
            image_urls: if image_urls.is_empty() {
                None
            } else {
                Some(image_urls)
            },
        })
    }
}

/// Count entries per category, in order of first appearance
pub fn category_stats(items: &[DsComponent]) -> Vec<CategoryCount> {
    let mut stats: Vec<CategoryCount> = Vec::new();
    for item in items {
        match stats.iter_mut().find(|s| s.category == item.category) {
            Some(stat) => stat.count += 1,
            None => stats.push(CategoryCount {
                category: item.category,
                count: 1,
            }),
        }
    }
    stats
}

/// Catalog reads and writes over a `ComponentStore`
pub struct CatalogService {
    store: Arc<dyn ComponentStore>,
    lists: TaggedCache<Vec<DsComponent>>,
    entries: TaggedCache<Option<DsComponent>>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ComponentStore>, cache_ttl: Duration) -> Self {
        Self {
            store,
            lists: TaggedCache::new(cache_ttl),
            entries: TaggedCache::new(cache_ttl),
        }
    }

    pub fn store(&self) -> &Arc<dyn ComponentStore> {
        &self.store
    }

    pub fn is_configured(&self) -> bool {
        self.store.is_configured()
    }

    /// Combined hit/miss counters of the list and entry caches
    pub fn cache_stats(&self) -> CacheStats {
        let lists = self.lists.stats();
        let entries = self.entries.stats();
        CacheStats {
            hits: lists.hits + entries.hits,
            misses: lists.misses + entries.misses,
        }
    }

    /// Entries for the navigation sidebar, by name
    pub async fn sidebar_components(&self) -> Result<Vec<DsComponent>> {
        let store = Arc::clone(&self.store);
        self.lists
            .get_or_load("list:name", &[CACHE_TAG], || async move {
                store.list_by_name().await
            })
            .await
    }

    /// Entries for the public gallery, by category then name
    pub async fn gallery_components(&self) -> Result<Vec<DsComponent>> {
        let store = Arc::clone(&self.store);
        self.lists
            .get_or_load("list:category", &[CACHE_TAG], || async move {
                store.list_by_category().await
            })
            .await
    }

    pub async fn component_by_slug(&self, slug: &str) -> Result<Option<DsComponent>> {
        let store = Arc::clone(&self.store);
        let key = format!("slug:{}", slug);
        let slug = slug.to_string();
        self.entries
            .get_or_load(&key, &[CACHE_TAG], || async move {
                store.find_by_slug(&slug).await
            })
            .await
    }

    /// Dashboard listing; always read fresh
    pub async fn dashboard_components(&self) -> Result<Vec<DsComponent>> {
        self.store.list_by_category().await
    }

    pub async fn component_by_id(&self, id: Uuid) -> Result<Option<DsComponent>> {
        self.store.find_by_id(id).await
    }

    pub async fn create(&self, actor: &str, input: &ComponentInput) -> Result<DsComponent> {
        let row = input.validate()?;
        let created = self.store.insert(actor, row).await?;
        self.invalidate();
        Ok(created)
    }

    pub async fn update(&self, actor: &str, id: Uuid, input: &ComponentInput) -> Result<DsComponent> {
        let row = input.validate()?;
        let updated = self.store.update(actor, id, row.into()).await?;
        self.invalidate();
        Ok(updated)
    }

    pub async fn delete(&self, actor: &str, id: Uuid) -> Result<()> {
        self.store.delete(actor, id).await?;
        self.invalidate();
        Ok(())
    }

    fn invalidate(&self) {
        self.lists.invalidate_tag(CACHE_TAG);
        self.entries.invalidate_tag(CACHE_TAG);
        debug!("Revalidated catalog cache");
    }
}
