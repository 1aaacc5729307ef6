use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Form;
use forum::models::{Comment, NewComment};
use serde::Deserialize;

use super::post_path;
use super::posts::{find_post, load_page};
use crate::error::AppError;
use crate::session::Identity;
use crate::state::AppState;
use crate::views;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CommentForm {
    pub body: String,
}

pub async fn create(
    State(state): State<AppState>,
    Path((topic_id, post_id)): Path<(i64, i64)>,
    identity: Identity,
    Form(form): Form<CommentForm>,
) -> Result<Redirect, AppError> {
    state
        .run(move |conn| {
            find_post(conn, topic_id, post_id)?;
            let new_comment = NewComment {
                body: form.body.clone(),
                post_id: Some(post_id),
                user_id: Some(identity.user_id),
            };
            match Comment::create(conn, &new_comment) {
                Ok(_) => Ok(()),
                Err(forum::Error::Validation(errors)) => {
                    let page = load_page(conn, topic_id, post_id, Some(identity.user_id))?;
                    Err(AppError::Invalid(views::posts::show(
                        &page,
                        Some(&identity),
                        Some(&errors),
                        &form.body,
                    )))
                }
                Err(e) => Err(e.into()),
            }
        })
        .await?;
    Ok(Redirect::to(&post_path(topic_id, post_id)))
}

pub async fn destroy(
    State(state): State<AppState>,
    Path((topic_id, post_id, id)): Path<(i64, i64, i64)>,
    _identity: Identity,
) -> Result<Redirect, AppError> {
    state
        .run(move |conn| {
            find_post(conn, topic_id, post_id)?;
            let comment = Comment::find(conn, id)?
                .filter(|c| c.post_id() == post_id)
                .ok_or(AppError::NotFound)?;
            Ok(comment.destroy(conn)?)
        })
        .await?;
    Ok(Redirect::to(&post_path(topic_id, post_id)))
}
