use serde::{Deserialize, Serialize};

use super::ResourceKind;
use crate::repository::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Moderator,
    ContentWriter,
}

impl Role {
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "admin" => Some(Role::Admin),
            "moderator" => Some(Role::Moderator),
            "content_writer" => Some(Role::ContentWriter),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Moderator => "moderator",
            Role::ContentWriter => "content_writer",
        }
    }

    pub fn permissions(self) -> Permissions {
        match self {
            Role::Admin => Permissions {
                can_manage_users: true,
                can_manage_settings: true,
                can_manage_navigation: true,
                can_manage_projects: true,
                can_manage_skills: true,
                can_manage_blog: true,
                can_manage_testimonials: true,
                can_manage_timeline: true,
                can_manage_services: true,
                can_manage_pages: true,
                can_upload_media: true,
            },
            Role::Moderator => Permissions {
                can_manage_users: false,
                can_manage_settings: false,
                can_manage_navigation: true,
                can_manage_projects: true,
                can_manage_skills: true,
                can_manage_blog: true,
                can_manage_testimonials: true,
                can_manage_timeline: true,
                can_manage_services: true,
                can_manage_pages: true,
                can_upload_media: true,
            },
            Role::ContentWriter => Permissions {
                can_manage_users: false,
                can_manage_settings: false,
                can_manage_navigation: false,
                can_manage_projects: true,
                can_manage_skills: false,
                can_manage_blog: true,
                can_manage_testimonials: false,
                can_manage_timeline: false,
                can_manage_services: false,
                can_manage_pages: false,
                can_upload_media: true,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    pub can_manage_users: bool,
    pub can_manage_settings: bool,
    pub can_manage_navigation: bool,
    pub can_manage_projects: bool,
    pub can_manage_skills: bool,
    pub can_manage_blog: bool,
    pub can_manage_testimonials: bool,
    pub can_manage_timeline: bool,
    pub can_manage_services: bool,
    pub can_manage_pages: bool,
    pub can_upload_media: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: String,
    #[serde(default)]
    pub last_login_at: Option<String>,
}

fn default_active() -> bool {
    true
}

impl User {
    pub fn permissions(&self) -> Permissions {
        self.role.permissions()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Emails compare case-insensitively after trimming.
    pub fn matches_email(&self, email: &str) -> bool {
        self.email.trim().eq_ignore_ascii_case(email.trim())
    }
}

impl Resource for User {
    const KIND: ResourceKind = ResourceKind::Users;
    const ID_PREFIX: &'static str = "user";

    fn id(&self) -> &str {
        &self.id
    }

    /// No bundled users: every binding goes through `IdentityBinder`.
    fn defaults() -> Vec<Self> {
        Vec::new()
    }
}
