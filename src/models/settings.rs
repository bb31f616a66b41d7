use serde::{Deserialize, Serialize};

use super::ResourceKind;
use crate::repository::Singleton;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    pub site_name: String,
    pub tagline: String,
    pub owner_name: String,
    pub contact_email: String,
    pub logo: String,
    pub resume_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            site_name: "Portfolio".to_string(),
            tagline: "Developer & Designer".to_string(),
            owner_name: "Alex Morgan".to_string(),
            contact_email: "hello@example.com".to_string(),
            logo: String::new(),
            resume_url: String::new(),
        }
    }
}

impl Singleton for SiteConfig {
    const KIND: ResourceKind = ResourceKind::SiteConfig;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterConfig {
    pub copyright: String,
    pub description: String,
    pub social_links: Vec<SocialLink>,
    pub show_newsletter: bool,
}

impl Default for FooterConfig {
    fn default() -> Self {
        FooterConfig {
            copyright: "All rights reserved.".to_string(),
            description: "Building thoughtful products for the web.".to_string(),
            social_links: vec![
                SocialLink {
                    platform: "github".to_string(),
                    url: "https://github.com/".to_string(),
                },
                SocialLink {
                    platform: "linkedin".to_string(),
                    url: "https://linkedin.com/".to_string(),
                },
            ],
            show_newsletter: false,
        }
    }
}

impl Singleton for FooterConfig {
    const KIND: ResourceKind = ResourceKind::FooterConfig;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroSettings {
    pub headline: String,
    pub subheadline: String,
    pub cta_label: String,
    pub cta_href: String,
    pub show_model: bool,
}

impl Default for HeroSettings {
    fn default() -> Self {
        HeroSettings {
            headline: "Hi, I build things for the web".to_string(),
            subheadline: "Full-stack developer focused on interactive experiences.".to_string(),
            cta_label: "View my work".to_string(),
            cta_href: "/projects".to_string(),
            show_model: true,
        }
    }
}

impl Singleton for HeroSettings {
    const KIND: ResourceKind = ResourceKind::HeroSettings;
}

/// Settings for the hero's 3D model. Only stored and served here; nothing in
/// this crate renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelSettings {
    pub model_path: String,
    pub scale: f32,
    pub rotation_speed: f32,
    pub auto_rotate: bool,
}

impl Default for ModelSettings {
    fn default() -> Self {
        ModelSettings {
            model_path: "/uploads/models/default.glb".to_string(),
            scale: 1.0,
            rotation_speed: 0.5,
            auto_rotate: true,
        }
    }
}

impl Singleton for ModelSettings {
    const KIND: ResourceKind = ResourceKind::ModelSettings;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LegalPages {
    pub privacy_policy: String,
    pub terms_of_service: String,
    pub cookie_policy: String,
}

impl Singleton for LegalPages {
    const KIND: ResourceKind = ResourceKind::LegalPages;
}
