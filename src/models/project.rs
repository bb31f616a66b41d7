use serde::{Deserialize, Serialize};

use super::ResourceKind;
use crate::repository::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub image: String,
    pub tags: Option<Vec<String>>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub featured: Option<bool>,
    pub category: Option<String>,
}

impl ProjectForm {
    pub fn into_project(self, id: String) -> Project {
        Project {
            id,
            title: self.title.trim().to_string(),
            description: self.description,
            image: self.image,
            tags: self.tags.unwrap_or_default(),
            live_url: self.live_url.filter(|u| !u.is_empty()),
            github_url: self.github_url.filter(|u| !u.is_empty()),
            featured: self.featured.unwrap_or(false),
            category: self.category.unwrap_or_default(),
        }
    }
}

impl Resource for Project {
    const KIND: ResourceKind = ResourceKind::Projects;
    const ID_PREFIX: &'static str = "project";

    fn id(&self) -> &str {
        &self.id
    }

    fn defaults() -> Vec<Self> {
        vec![
            Project {
                id: "project-1".to_string(),
                title: "Interactive Portfolio".to_string(),
                description: "A personal site with a 3D hero scene and an editable content panel."
                    .to_string(),
                image: "/uploads/images/portfolio.png".to_string(),
                tags: vec!["Next.js".to_string(), "Three.js".to_string()],
                live_url: Some("https://example.com".to_string()),
                github_url: None,
                featured: true,
                category: "web".to_string(),
            },
            Project {
                id: "project-2".to_string(),
                title: "Task Board".to_string(),
                description: "Kanban board with drag and drop and offline support.".to_string(),
                image: "/uploads/images/taskboard.png".to_string(),
                tags: vec!["React".to_string(), "IndexedDB".to_string()],
                live_url: None,
                github_url: Some("https://github.com/example/task-board".to_string()),
                featured: false,
                category: "web".to_string(),
            },
            Project {
                id: "project-3".to_string(),
                title: "Fitness Tracker".to_string(),
                description: "Mobile app for logging workouts and tracking progress.".to_string(),
                image: "/uploads/images/fitness.png".to_string(),
                tags: vec!["React Native".to_string()],
                live_url: None,
                github_url: None,
                featured: true,
                category: "mobile".to_string(),
            },
        ]
    }
}
