use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::ResourceKind;
use crate::repository::Singleton;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub updated_at: NaiveDateTime,
}

/// Custom pages keyed by URL slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct PageContents(pub BTreeMap<String, PageContent>);

impl PageContents {
    pub fn get(&self, slug: &str) -> Option<&PageContent> {
        self.0.get(slug)
    }

    /// Insert or replace the page at `slug`.
    pub fn upsert(&mut self, slug: String, title: String, content: String) -> &PageContent {
        let page = PageContent {
            title,
            content,
            updated_at: chrono::Utc::now().naive_utc(),
        };
        self.0.insert(slug.clone(), page);
        &self.0[&slug]
    }
}

impl Singleton for PageContents {
    const KIND: ResourceKind = ResourceKind::PageContents;
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageForm {
    pub title: String,
    /// Falls back to the slugified title.
    pub slug: Option<String>,
    #[serde(default)]
    pub content: String,
}

impl PageForm {
    /// Normalized slug, or `None` when nothing usable is left.
    pub fn resolved_slug(&self) -> Option<String> {
        let raw = self
            .slug
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.title);
        let s = slug::slugify(raw);
        if s.is_empty() {
            None
        } else {
            Some(s)
        }
    }
}
