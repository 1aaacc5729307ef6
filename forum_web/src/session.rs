//! Who is making the request.
//!
//! There is no real sign-in. `/auth/fake` stores the identity it is
//! given in the `forum_session` cookie, form-urlencoded as
//! `role=..&userId=..&email=..`, and every later request reads it back.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use forum::models::Role;
use url::form_urlencoded;

use crate::error::AppError;

pub const SESSION_COOKIE: &str = "forum_session";

/// The signed-in user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub role: Role,
    pub email: String,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// The cookie value. Always ASCII with no `;` or `,`.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("role", &self.role.to_string())
            .append_pair("userId", &self.user_id.to_string())
            .append_pair("email", &self.email)
            .finish()
    }

    pub fn decode(value: &str) -> Option<Identity> {
        let (mut role, mut user_id, mut email): (Option<Role>, Option<i64>, Option<String>) =
            (None, None, None);
        for (key, val) in form_urlencoded::parse(value.as_bytes()) {
            match &*key {
                "role" => role = Some(val.parse().ok()?),
                "userId" => user_id = Some(val.parse().ok()?),
                "email" => email = Some(val.into_owned()),
                _ => {}
            }
        }
        Some(Identity {
            user_id: user_id?,
            role: role?,
            email: email.unwrap_or_default(),
        })
    }

    /// A `Set-Cookie` value storing this identity.
    pub fn set_cookie(&self) -> String {
        format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
            self.encode()
        )
    }

    /// A `Set-Cookie` value removing any stored identity.
    pub fn clear_cookie() -> String {
        format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0")
    }

    fn from_parts(parts: &Parts) -> Option<Identity> {
        for header in parts.headers.get_all(COOKIE) {
            let header = String::from_utf8_lossy(header.as_bytes());
            for pair in header.split(';') {
                if let Some((SESSION_COOKIE, value)) = pair.trim().split_once('=') {
                    return Identity::decode(value);
                }
            }
        }
        None
    }
}

/// Rejects with 401 when nobody is signed in.
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Identity::from_parts(parts).ok_or(AppError::Unauthorized)
    }
}

/// The signed-in user, if any.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub Option<Identity>);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentUser(Identity::from_parts(parts)))
    }
}
