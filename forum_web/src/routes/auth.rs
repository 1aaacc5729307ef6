use axum::extract::Query;
use axum::http::header::SET_COOKIE;
use axum::response::{Html, IntoResponse, Redirect};
use axum::Form;
use forum::models::Role;
use log::info;
use serde::Deserialize;

use crate::session::{CurrentUser, Identity};
use crate::views;

pub async fn home(CurrentUser(identity): CurrentUser) -> Html<String> {
    views::home(identity.as_ref())
}

/// Fields accepted by `/auth/fake`. Without a `userId` the session is
/// cleared.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FakeAuth {
    pub role: Role,
    pub user_id: Option<i64>,
    pub email: String,
}

fn sign_in(auth: FakeAuth) -> impl IntoResponse {
    let cookie = match auth.user_id {
        Some(user_id) => {
            let identity = Identity {
                user_id,
                role: auth.role,
                email: auth.email,
            };
            info!("signed in as user {user_id} ({})", identity.role);
            identity.set_cookie()
        }
        None => Identity::clear_cookie(),
    };
    ([(SET_COOKIE, cookie)], Redirect::to("/"))
}

pub async fn fake_get(Query(auth): Query<FakeAuth>) -> impl IntoResponse {
    sign_in(auth)
}

pub async fn fake_post(Form(auth): Form<FakeAuth>) -> impl IntoResponse {
    sign_in(auth)
}
