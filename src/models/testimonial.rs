use serde::{Deserialize, Serialize};

use super::ResourceKind;
use crate::repository::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub company: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// 1..=5 stars
    #[serde(default = "default_rating")]
    pub rating: u8,
}

fn default_rating() -> u8 {
    5
}

impl Resource for Testimonial {
    const KIND: ResourceKind = ResourceKind::Testimonials;
    const ID_PREFIX: &'static str = "testimonial";
    const PERSIST_DEFAULTS: bool = true;

    fn id(&self) -> &str {
        &self.id
    }

    fn defaults() -> Vec<Self> {
        vec![
            Testimonial {
                id: "testimonial-1".to_string(),
                name: "Sarah Chen".to_string(),
                role: "Product Manager".to_string(),
                company: "Brightline".to_string(),
                content: "Delivered ahead of schedule and communicated clearly throughout."
                    .to_string(),
                avatar: None,
                rating: 5,
            },
            Testimonial {
                id: "testimonial-2".to_string(),
                name: "Marcus Webb".to_string(),
                role: "CTO".to_string(),
                company: "Northwind Labs".to_string(),
                content: "A rare mix of design sense and solid engineering.".to_string(),
                avatar: None,
                rating: 5,
            },
        ]
    }
}
