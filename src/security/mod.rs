pub mod auth;

use std::fmt;

use log::{info, warn};

use crate::models::audit::AuditEntry;
use crate::models::user::{Role, User};
use crate::origin::Document;
use crate::repository::{CollectionRepository, RepositoryError};

#[derive(Debug)]
pub enum AccessError {
    /// The actor lacks `can_manage_users`.
    Forbidden,
    /// Bootstrap refused: an admin exists, or the email is not the configured one.
    BootstrapRefused,
    /// The change would leave no active admin.
    LastAdmin,
    Repository(RepositoryError),
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessError::Forbidden => write!(f, "not allowed to manage users"),
            AccessError::BootstrapRefused => write!(f, "admin bootstrap refused"),
            AccessError::LastAdmin => write!(f, "cannot remove the last active admin"),
            AccessError::Repository(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AccessError {}

impl From<RepositoryError> for AccessError {
    fn from(e: RepositoryError) -> Self {
        AccessError::Repository(e)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Bound(User),
    /// No active user carries this email. Never promoted implicitly.
    Unbound,
}

/// Maps identities verified upstream (by email) to local users and roles.
/// Every change to that mapping is written to the audit log.
#[derive(Clone)]
pub struct IdentityBinder {
    users: CollectionRepository<User>,
    audit: CollectionRepository<AuditEntry>,
    bootstrap_email: Option<String>,
}

impl IdentityBinder {
    pub fn new(doc: &Document, bootstrap_email: Option<String>) -> Self {
        IdentityBinder {
            users: CollectionRepository::new(doc),
            audit: CollectionRepository::new(doc),
            bootstrap_email: bootstrap_email.filter(|e| !e.trim().is_empty()),
        }
    }

    pub fn resolve(&self, email: &str) -> Binding {
        match self
            .users
            .read_all()
            .into_iter()
            .find(|u| u.is_active && u.matches_email(email))
        {
            Some(user) => Binding::Bound(user),
            None => Binding::Unbound,
        }
    }

    /// Resolve and stamp `lastLoginAt`.
    pub fn sign_in(&self, email: &str) -> Result<Binding, AccessError> {
        match self.resolve(email) {
            Binding::Bound(mut user) => {
                user.last_login_at = Some(now());
                let user = self.users.update(user)?;
                Ok(Binding::Bound(user))
            }
            Binding::Unbound => {
                warn!("sign-in by unbound identity {}", email);
                Ok(Binding::Unbound)
            }
        }
    }

    /// First admin. Only allowed while no admin exists, and only for the
    /// email configured as `bootstrap_admin_email`.
    pub fn bootstrap_admin(&self, email: &str, name: &str) -> Result<User, AccessError> {
        let configured = self
            .bootstrap_email
            .as_deref()
            .map(|e| e.trim().eq_ignore_ascii_case(email.trim()))
            .unwrap_or(false);
        if !configured || self.active_admins().next().is_some() {
            warn!("refused admin bootstrap for {}", email);
            return Err(AccessError::BootstrapRefused);
        }

        let user = self.upsert(email, name, Role::Admin)?;
        self.record("bootstrap_admin", None, email, Some(Role::Admin))?;
        info!("bootstrapped admin {}", email);
        Ok(user)
    }

    /// Bind `email` to `role`, creating the user when needed.
    pub fn grant(&self, actor: &User, email: &str, name: &str, role: Role) -> Result<User, AccessError> {
        if !actor.permissions().can_manage_users {
            return Err(AccessError::Forbidden);
        }
        if role != Role::Admin && self.is_last_admin(email) {
            return Err(AccessError::LastAdmin);
        }
        let user = self.upsert(email, name, role)?;
        self.record("grant_role", Some(&actor.email), email, Some(role))?;
        info!("{} granted {} to {}", actor.email, role.as_str(), email);
        Ok(user)
    }

    /// Deactivate a user. The record stays so the audit trail still resolves.
    pub fn revoke(&self, actor: &User, email: &str) -> Result<(), AccessError> {
        if !actor.permissions().can_manage_users {
            return Err(AccessError::Forbidden);
        }
        let mut user = match self.users.read_all().into_iter().find(|u| u.matches_email(email)) {
            Some(u) => u,
            None => return Err(RepositoryError::NotFound(email.to_string()).into()),
        };
        if self.is_last_admin(email) {
            warn!("{} tried to revoke the last active admin", actor.email);
            return Err(AccessError::LastAdmin);
        }
        user.is_active = false;
        self.users.update(user)?;
        self.record("revoke", Some(&actor.email), email, None)?;
        Ok(())
    }

    pub fn audit_log(&self) -> Vec<AuditEntry> {
        self.audit.read_all()
    }

    fn active_admins(&self) -> impl Iterator<Item = User> {
        self.users
            .read_all()
            .into_iter()
            .filter(|u| u.is_active && u.is_admin())
    }

    /// `email` is an active admin and no other active admin exists.
    fn is_last_admin(&self, email: &str) -> bool {
        let admins: Vec<User> = self.active_admins().collect();
        admins.len() == 1 && admins[0].matches_email(email)
    }

    fn upsert(&self, email: &str, name: &str, role: Role) -> Result<User, AccessError> {
        let existing = self.users.read_all().into_iter().find(|u| u.matches_email(email));
        let user = match existing {
            Some(mut user) => {
                user.role = role;
                user.is_active = true;
                if !name.is_empty() {
                    user.name = name.to_string();
                }
                self.users.update(user)?
            }
            None => self.users.insert(User {
                id: format!("user-{}", uuid::Uuid::new_v4()),
                email: email.trim().to_string(),
                name: name.to_string(),
                role,
                is_active: true,
                created_at: now(),
                last_login_at: None,
            })?,
        };
        Ok(user)
    }

    fn record(
        &self,
        action: &str,
        actor: Option<&str>,
        subject: &str,
        role: Option<Role>,
    ) -> Result<(), AccessError> {
        let mut entries = self.audit.read_all();
        entries.push(AuditEntry {
            id: format!("audit-{}", uuid::Uuid::new_v4()),
            action: action.to_string(),
            actor: actor.map(|a| a.to_string()),
            subject: subject.trim().to_string(),
            role: role.map(|r| r.as_str().to_string()),
            created_at: now(),
        });
        self.audit.write_all(&entries)?;
        Ok(())
    }
}

fn now() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
