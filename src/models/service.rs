use serde::{Deserialize, Serialize};

use super::ResourceKind;
use crate::repository::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

fn service(id: &str, title: &str, description: &str, icon: &str, features: &[&str]) -> Service {
    Service {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
        price: None,
    }
}

impl Resource for Service {
    const KIND: ResourceKind = ResourceKind::Services;
    const ID_PREFIX: &'static str = "service";

    fn id(&self) -> &str {
        &self.id
    }

    fn defaults() -> Vec<Self> {
        vec![
            service(
                "service-1",
                "Web Development",
                "Fast, accessible sites and web apps.",
                "code",
                &["Responsive layouts", "SEO basics", "CMS integration"],
            ),
            service(
                "service-2",
                "UI/UX Design",
                "Interfaces designed around real user flows.",
                "palette",
                &["Wireframes", "Prototypes", "Design systems"],
            ),
            service(
                "service-3",
                "3D & Motion",
                "Interactive scenes and motion for the web.",
                "cube",
                &["Three.js scenes", "Model optimization"],
            ),
        ]
    }
}
