use axum::extract::{Path, State};
use axum::response::Redirect;
use forum::models::{Favorite, NewFavorite};
use log::debug;

use super::post_path;
use super::posts::find_post;
use crate::error::AppError;
use crate::session::Identity;
use crate::state::AppState;

/// Favorite the post. Favoriting it again changes nothing.
pub async fn create(
    State(state): State<AppState>,
    Path((topic_id, post_id)): Path<(i64, i64)>,
    identity: Identity,
) -> Result<Redirect, AppError> {
    state
        .run(move |conn| {
            let post = find_post(conn, topic_id, post_id)?;
            if post.favorite_for(conn, identity.user_id)?.is_none() {
                let new_favorite = NewFavorite {
                    user_id: Some(identity.user_id),
                    post_id: Some(post_id),
                };
                let favorite = Favorite::create(conn, &new_favorite)?;
                debug!("user {} favorited post {post_id}", favorite.user_id());
            }
            Ok(())
        })
        .await?;
    Ok(Redirect::to(&post_path(topic_id, post_id)))
}

/// Remove one of the signed-in user's favorites.
pub async fn destroy(
    State(state): State<AppState>,
    Path((topic_id, post_id, id)): Path<(i64, i64, i64)>,
    identity: Identity,
) -> Result<Redirect, AppError> {
    state
        .run(move |conn| {
            find_post(conn, topic_id, post_id)?;
            let favorite = Favorite::find(conn, id)?
                .filter(|f| f.post_id() == post_id && f.user_id() == identity.user_id)
                .ok_or(AppError::NotFound)?;
            Ok(favorite.destroy(conn)?)
        })
        .await?;
    Ok(Redirect::to(&post_path(topic_id, post_id)))
}
