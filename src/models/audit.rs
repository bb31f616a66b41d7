use serde::{Deserialize, Serialize};

use super::ResourceKind;
use crate::repository::Resource;

/// One identity/role binding change. Appended, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: String,
    pub action: String,
    /// Email of whoever made the change; `None` for startup bootstrap.
    pub actor: Option<String>,
    pub subject: String,
    pub role: Option<String>,
    pub created_at: String,
}

impl Resource for AuditEntry {
    const KIND: ResourceKind = ResourceKind::AuditLog;
    const ID_PREFIX: &'static str = "audit";

    fn id(&self) -> &str {
        &self.id
    }

    fn defaults() -> Vec<Self> {
        Vec::new()
    }
}
