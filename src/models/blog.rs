use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ResourceKind;
use crate::repository::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub published_at: NaiveDate,
    /// Minutes
    #[serde(default)]
    pub read_time: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_published")]
    pub published: bool,
}

fn default_published() -> bool {
    true
}

/// Reading time at ~200 words per minute, never less than one minute.
pub fn estimate_read_time(content: &str) -> u32 {
    let words = content.split_whitespace().count() as u32;
    words.div_ceil(200).max(1)
}

fn post(id: &str, title: &str, date: (i32, u32, u32), excerpt: &str) -> BlogPost {
    BlogPost {
        id: id.to_string(),
        title: title.to_string(),
        slug: slug::slugify(title),
        excerpt: excerpt.to_string(),
        content: excerpt.to_string(),
        cover_image: None,
        published_at: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap_or(NaiveDate::MIN),
        read_time: estimate_read_time(excerpt),
        tags: Vec::new(),
        published: true,
    }
}

impl Resource for BlogPost {
    const KIND: ResourceKind = ResourceKind::BlogPosts;
    const ID_PREFIX: &'static str = "post";

    fn id(&self) -> &str {
        &self.id
    }

    fn defaults() -> Vec<Self> {
        vec![
            post(
                "post-1",
                "Building a 3D Portfolio Hero",
                (2024, 3, 12),
                "Notes on lighting, performance budgets, and fallbacks for low-end devices.",
            ),
            post(
                "post-2",
                "Designing an Editable Content Panel",
                (2024, 5, 2),
                "How the admin forms keep every section of the site editable without a deploy.",
            ),
        ]
    }
}
