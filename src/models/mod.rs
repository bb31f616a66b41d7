use serde::{Deserialize, Serialize};

pub mod audit;
pub mod blog;
pub mod navigation;
pub mod page;
pub mod project;
pub mod service;
pub mod settings;
pub mod skill;
pub mod testimonial;
pub mod timeline;
pub mod user;

/// Every logical resource held in the keyed store. Each maps to exactly one
/// canonical storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    NavItems,
    Skills,
    Projects,
    Testimonials,
    BlogPosts,
    Timeline,
    Services,
    FooterConfig,
    SiteConfig,
    PageContents,
    Users,
    ModelSettings,
    HeroSettings,
    LegalPages,
    AuditLog,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 15] = [
        ResourceKind::NavItems,
        ResourceKind::Skills,
        ResourceKind::Projects,
        ResourceKind::Testimonials,
        ResourceKind::BlogPosts,
        ResourceKind::Timeline,
        ResourceKind::Services,
        ResourceKind::FooterConfig,
        ResourceKind::SiteConfig,
        ResourceKind::PageContents,
        ResourceKind::Users,
        ResourceKind::ModelSettings,
        ResourceKind::HeroSettings,
        ResourceKind::LegalPages,
        ResourceKind::AuditLog,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ResourceKind::NavItems => "navItems",
            ResourceKind::Skills => "skills",
            ResourceKind::Projects => "projects",
            ResourceKind::Testimonials => "testimonials",
            ResourceKind::BlogPosts => "blogPosts",
            ResourceKind::Timeline => "timeline",
            ResourceKind::Services => "services",
            ResourceKind::FooterConfig => "footerConfig",
            ResourceKind::SiteConfig => "siteConfig",
            ResourceKind::PageContents => "pageContents",
            ResourceKind::Users => "portfolioUsers",
            ResourceKind::ModelSettings => "modelSettings",
            ResourceKind::HeroSettings => "heroSettings",
            ResourceKind::LegalPages => "legalPagesContent",
            ResourceKind::AuditLog => "auditLog",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.key() == key)
    }
}

/// Caller-generated record id: `<prefix>-<unix millis>`.
pub fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, chrono::Utc::now().timestamp_millis())
}
