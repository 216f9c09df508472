//! Gallery search and category filtering

use ds_types::Category;
use serde::Deserialize;

use crate::models::{CategoryCount, DsComponent};

/// Query-string filter for the public gallery
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GalleryFilter {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl GalleryFilter {
    /// Trimmed search text, `None` when blank
    pub fn query(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    /// Selected category; unknown names select nothing
    pub fn category(&self) -> Option<Category> {
        self.category.as_deref().and_then(|c| c.parse().ok())
    }

    pub fn matches(&self, component: &DsComponent) -> bool {
        let matches_query = match self.query() {
            None => true,
            Some(q) => {
                let needle = q.to_lowercase();
                component.name.to_lowercase().contains(&needle)
                    || component.description.to_lowercase().contains(&needle)
            }
        };
        let matches_category = self
            .category()
            .map_or(true, |category| component.category == category);
        matches_query && matches_category
    }

    pub fn apply<'a>(&self, components: &'a [DsComponent]) -> Vec<&'a DsComponent> {
        components.iter().filter(|c| self.matches(c)).collect()
    }
}

/// Per-category counts in `Category::ALL` order, omitting empty categories
pub fn category_counts(components: &[DsComponent]) -> Vec<CategoryCount> {
    Category::ALL
        .iter()
        .map(|&category| CategoryCount {
            category,
            count: components.iter().filter(|c| c.category == category).count(),
        })
        .filter(|stat| stat.count > 0)
        .collect()
}

/// Entries grouped by category in `Category::ALL` order, empty groups omitted.
/// Input order is kept within each group.
pub fn group_by_category(components: &[DsComponent]) -> Vec<(Category, Vec<&DsComponent>)> {
    Category::ALL
        .iter()
        .map(|&category| {
            (
                category,
                components
                    .iter()
                    .filter(|c| c.category == category)
                    .collect::<Vec<_>>(),
            )
        })
        .filter(|(_, items)| !items.is_empty())
        .collect()
}
