use serde::{Deserialize, Serialize};

use super::ResourceKind;
use crate::repository::Resource;

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IconType {
    #[default]
    Predefined,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub icon_type: IconType,
    pub level: u8,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Fields the new/edit skill form submits.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillForm {
    pub name: String,
    pub icon: Option<String>,
    pub icon_type: Option<IconType>,
    pub level: u8,
    pub category: String,
    pub description: Option<String>,
}

impl SkillForm {
    pub fn into_skill(self, id: String) -> Skill {
        Skill {
            id,
            name: self.name.trim().to_string(),
            icon: self.icon.filter(|i| !i.is_empty()),
            icon_type: self.icon_type.unwrap_or_default(),
            level: clamp_level(self.level),
            category: self.category.trim().to_string(),
            description: self.description.filter(|d| !d.is_empty()),
        }
    }
}

pub fn clamp_level(level: u8) -> u8 {
    level.clamp(MIN_LEVEL, MAX_LEVEL)
}

fn skill(id: &str, name: &str, icon: &str, level: u8, category: &str) -> Skill {
    Skill {
        id: id.to_string(),
        name: name.to_string(),
        icon: Some(icon.to_string()),
        icon_type: IconType::Predefined,
        level,
        category: category.to_string(),
        description: None,
    }
}

impl Resource for Skill {
    const KIND: ResourceKind = ResourceKind::Skills;
    const ID_PREFIX: &'static str = "skill";

    fn id(&self) -> &str {
        &self.id
    }

    fn defaults() -> Vec<Self> {
        vec![
            skill("skill-1", "TypeScript", "typescript", 5, "development"),
            skill("skill-2", "React", "react", 5, "development"),
            skill("skill-3", "Node.js", "nodejs", 4, "development"),
            skill("skill-4", "Three.js", "threejs", 3, "development"),
            skill("skill-5", "Figma", "figma", 4, "design"),
            skill("skill-6", "Docker", "docker", 3, "devops"),
        ]
    }
}
