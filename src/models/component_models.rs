//! Catalog entry models

use chrono::{DateTime, Utc};
use ds_types::Category;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of the component catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DsComponent {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub category: Category,
    pub description: String,
    pub usage_markdown: String,
    pub code: String,
    pub thumbnail_url: Option<String>,
    pub image_urls: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DsComponent {
    /// Images for the detail page: thumbnail first, then the remaining images
    pub fn gallery_urls(&self) -> Vec<String> {
        let mut urls = Vec::new();
        if let Some(thumb) = &self.thumbnail_url {
            urls.push(thumb.clone());
        }
        for url in self.image_urls.iter().flatten() {
            if Some(url) != self.thumbnail_url.as_ref() {
                urls.push(url.clone());
            }
        }
        urls
    }

    /// Apply a patch in place; used by the in-memory store
    pub fn apply(&mut self, patch: &DsComponentPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(slug) = &patch.slug {
            self.slug = slug.clone();
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(usage) = &patch.usage_markdown {
            self.usage_markdown = usage.clone();
        }
        if let Some(code) = &patch.code {
            self.code = code.clone();
        }
        if let Some(thumbnail) = &patch.thumbnail_url {
            self.thumbnail_url = thumbnail.clone();
        }
        if let Some(images) = &patch.image_urls {
            self.image_urls = images.clone();
        }
    }
}

/// Insert shape for a catalog row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDsComponent {
    pub name: String,
    pub slug: String,
    pub category: Category,
    pub description: String,
    pub usage_markdown: String,
    pub code: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub image_urls: Option<Vec<String>>,
}

impl NewDsComponent {
    pub fn into_component(self, id: Uuid, now: DateTime<Utc>) -> DsComponent {
        DsComponent {
            id,
            name: self.name,
            slug: self.slug,
            category: self.category,
            description: self.description,
            usage_markdown: self.usage_markdown,
            code: self.code,
            thumbnail_url: self.thumbnail_url,
            image_urls: self.image_urls,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. `None` leaves a column unchanged; for the nullable
/// columns `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DsComponentPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub usage_markdown: Option<String>,
    pub code: Option<String>,
    pub thumbnail_url: Option<Option<String>>,
    pub image_urls: Option<Option<Vec<String>>>,
}

impl From<NewDsComponent> for DsComponentPatch {
    fn from(full: NewDsComponent) -> Self {
        Self {
            name: Some(full.name),
            slug: Some(full.slug),
            category: Some(full.category),
            description: Some(full.description),
            usage_markdown: Some(full.usage_markdown),
            code: Some(full.code),
            thumbnail_url: Some(full.thumbnail_url),
            image_urls: Some(full.image_urls),
        }
    }
}

/// Number of catalog entries in one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}
