use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};
use rocket::State;

use super::{Binding, IdentityBinder};
use crate::models::user::{Permissions, User};

/// Header carrying the email the upstream auth provider verified.
pub const IDENTITY_HEADER: &str = "X-Auth-Email";

// ── Authenticated user guard ──

/// Guard: a verified identity bound to an active local user.
/// Unbound identities get 403; a missing header gets 401.
pub struct AuthenticatedUser {
    pub user: User,
}

impl AuthenticatedUser {
    pub fn permissions(&self) -> Permissions {
        self.user.permissions()
    }

    /// `Err(Status::Forbidden)` unless `allowed` picks a granted capability.
    pub fn require(&self, allowed: impl Fn(&Permissions) -> bool) -> Result<(), Status> {
        if allowed(&self.permissions()) {
            Ok(())
        } else {
            Err(Status::Forbidden)
        }
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let email = match request.headers().get_one(IDENTITY_HEADER) {
            Some(e) if !e.trim().is_empty() => e.trim().to_string(),
            _ => return Outcome::Error((Status::Unauthorized, ())),
        };
        let binder = match request.guard::<&State<IdentityBinder>>().await.succeeded() {
            Some(b) => b,
            None => return Outcome::Error((Status::InternalServerError, ())),
        };
        match binder.resolve(&email) {
            Binding::Bound(user) => Outcome::Success(AuthenticatedUser { user }),
            Binding::Unbound => Outcome::Error((Status::Forbidden, ())),
        }
    }
}
