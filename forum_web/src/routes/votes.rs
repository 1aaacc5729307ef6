use axum::extract::{Path, State};
use axum::response::Redirect;
use forum::models::{Vote, VoteValue};

use super::post_path;
use super::posts::find_post;
use crate::error::AppError;
use crate::session::Identity;
use crate::state::AppState;

async fn cast(
    state: AppState,
    topic_id: i64,
    post_id: i64,
    identity: Identity,
    value: VoteValue,
) -> Result<Redirect, AppError> {
    state
        .run(move |conn| {
            find_post(conn, topic_id, post_id)?;
            Ok(Vote::cast(conn, post_id, identity.user_id, value)?)
        })
        .await?;
    Ok(Redirect::to(&post_path(topic_id, post_id)))
}

pub async fn upvote(
    State(state): State<AppState>,
    Path((topic_id, post_id)): Path<(i64, i64)>,
    identity: Identity,
) -> Result<Redirect, AppError> {
    cast(state, topic_id, post_id, identity, VoteValue::Up).await
}

pub async fn downvote(
    State(state): State<AppState>,
    Path((topic_id, post_id)): Path<(i64, i64)>,
    identity: Identity,
) -> Result<Redirect, AppError> {
    cast(state, topic_id, post_id, identity, VoteValue::Down).await
}
