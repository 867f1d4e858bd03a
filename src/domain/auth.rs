use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::dev::Payload;
use actix_web::error::ErrorUnauthorized;
use actix_web::{Error, FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

/// Signed-in user as vouched for by the external auth provider.
///
/// The provider stores these claims as JSON in the session identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Stable user identifier.
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    /// Decode the claims stored as the session identity.
    pub fn from_identity(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|value| value == role)
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let payload = match req.get_identity().and_then(|identity| identity.id()) {
            Ok(payload) => payload,
            Err(_) => return ready(Err(ErrorUnauthorized("User not authenticated"))),
        };

        match AuthenticatedUser::from_identity(&payload) {
            Ok(user) => ready(Ok(user)),
            Err(err) => {
                log::warn!("Discarding malformed session identity: {err}");
                ready(Err(ErrorUnauthorized("User not authenticated")))
            }
        }
    }
}
