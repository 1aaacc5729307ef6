//! Route table.

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

mod advertisements;
mod auth;
mod comments;
mod favorites;
mod posts;
mod topics;
mod votes;

/// Every route. `/auth/fake` is only mounted when `fake_auth` is set.
pub fn router(fake_auth: bool) -> Router<AppState> {
    let router = Router::new()
        .route("/", get(auth::home))
        .route("/topics", get(topics::index))
        .route("/topics/new", get(topics::new))
        .route("/topics/create", post(topics::create))
        .route("/topics/{id}", get(topics::show))
        .route("/topics/{id}/edit", get(topics::edit))
        .route("/topics/{id}/update", post(topics::update))
        .route("/topics/{id}/destroy", post(topics::destroy))
        .route("/advertisements", get(advertisements::index))
        .route("/advertisements/new", get(advertisements::new))
        .route("/advertisements/create", post(advertisements::create))
        .route("/advertisements/{id}", get(advertisements::show))
        .route("/advertisements/{id}/edit", get(advertisements::edit))
        .route("/advertisements/{id}/update", post(advertisements::update))
        .route("/advertisements/{id}/destroy", post(advertisements::destroy))
        .route("/topics/{topic_id}/posts/new", get(posts::new))
        .route("/topics/{topic_id}/posts/create", post(posts::create))
        .route("/topics/{topic_id}/posts/{id}", get(posts::show))
        .route("/topics/{topic_id}/posts/{id}/edit", get(posts::edit))
        .route("/topics/{topic_id}/posts/{id}/update", post(posts::update))
        .route("/topics/{topic_id}/posts/{id}/destroy", post(posts::destroy))
        .route(
            "/topics/{topic_id}/posts/{post_id}/votes/upvote",
            post(votes::upvote),
        )
        .route(
            "/topics/{topic_id}/posts/{post_id}/votes/downvote",
            post(votes::downvote),
        )
        .route(
            "/topics/{topic_id}/posts/{post_id}/favorites/create",
            post(favorites::create),
        )
        .route(
            "/topics/{topic_id}/posts/{post_id}/favorites/{id}/destroy",
            post(favorites::destroy),
        )
        .route(
            "/topics/{topic_id}/posts/{post_id}/comments/create",
            post(comments::create),
        )
        .route(
            "/topics/{topic_id}/posts/{post_id}/comments/{id}/destroy",
            post(comments::destroy),
        );
    if fake_auth {
        router.route("/auth/fake", get(auth::fake_get).post(auth::fake_post))
    } else {
        router
    }
}

/// Location of a post's page.
fn post_path(topic_id: i64, post_id: i64) -> String {
    format!("/topics/{topic_id}/posts/{post_id}")
}
