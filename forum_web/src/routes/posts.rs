use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::Form;
use forum::db::Connection;
use forum::models::{Post, PostForm, Topic};
use forum::prelude::*;
use log::info;

use super::post_path;
use crate::error::{or_invalid, AppError};
use crate::session::{CurrentUser, Identity};
use crate::state::AppState;
use crate::views;
use crate::views::posts::PostPage;

/// The post `id` in topic `topic_id`, or 404.
pub(crate) fn find_post(conn: &Connection, topic_id: i64, id: i64) -> Result<Post, AppError> {
    Post::find_in_topic(conn, topic_id, id)?.ok_or(AppError::NotFound)
}

/// Load everything the post page shows. `user_id` is the viewer.
pub(crate) fn load_page(
    conn: &Connection,
    topic_id: i64,
    id: i64,
    user_id: Option<i64>,
) -> Result<PostPage, AppError> {
    let post = find_post(conn, topic_id, id)?;
    let topic = Topic::find(conn, topic_id)?.ok_or(AppError::NotFound)?;
    let favorite = match user_id {
        Some(user_id) => post.favorite_for(conn, user_id)?,
        None => None,
    };
    Ok(PostPage {
        points: post.points(conn)?,
        comments: post.comments(conn)?,
        flairs: post.flairs(conn)?,
        favorite,
        topic,
        post,
    })
}

pub async fn new(
    State(state): State<AppState>,
    Path(topic_id): Path<i64>,
    _identity: Identity,
) -> Result<Html<String>, AppError> {
    let topic = state
        .run(move |conn| Topic::find(conn, topic_id)?.ok_or(AppError::NotFound))
        .await?;
    Ok(views::posts::new(&topic, &PostForm::default(), None))
}

pub async fn create(
    State(state): State<AppState>,
    Path(topic_id): Path<i64>,
    identity: Identity,
    Form(form): Form<PostForm>,
) -> Result<Redirect, AppError> {
    let id = state
        .run(move |conn| {
            let topic = Topic::find(conn, topic_id)?.ok_or(AppError::NotFound)?;
            let new_post = form.clone().into_new_post(topic_id, identity.user_id);
            let post = or_invalid(Post::create(conn, &new_post), |e| {
                views::posts::new(&topic, &form, Some(e))
            })?;
            Ok(post.id()?)
        })
        .await?;
    info!("created post {id} in topic {topic_id}");
    Ok(Redirect::to(&post_path(topic_id, id)))
}

pub async fn show(
    State(state): State<AppState>,
    Path((topic_id, id)): Path<(i64, i64)>,
    CurrentUser(identity): CurrentUser,
) -> Result<Html<String>, AppError> {
    state
        .run(move |conn| {
            let page = load_page(conn, topic_id, id, identity.as_ref().map(|i| i.user_id))?;
            Ok(views::posts::show(&page, identity.as_ref(), None, ""))
        })
        .await
}

pub async fn edit(
    State(state): State<AppState>,
    Path((topic_id, id)): Path<(i64, i64)>,
    _identity: Identity,
) -> Result<Html<String>, AppError> {
    let post = state
        .run(move |conn| find_post(conn, topic_id, id))
        .await?;
    Ok(views::posts::edit(&post, &PostForm::from(&post), None))
}

pub async fn update(
    State(state): State<AppState>,
    Path((topic_id, id)): Path<(i64, i64)>,
    _identity: Identity,
    Form(form): Form<PostForm>,
) -> Result<Redirect, AppError> {
    state
        .run(move |conn| {
            let mut post = find_post(conn, topic_id, id)?;
            let result = post.update(conn, &form);
            or_invalid(result, |e| views::posts::edit(&post, &form, Some(e)))
        })
        .await?;
    Ok(Redirect::to(&post_path(topic_id, id)))
}

pub async fn destroy(
    State(state): State<AppState>,
    Path((topic_id, id)): Path<(i64, i64)>,
    _identity: Identity,
) -> Result<Redirect, AppError> {
    state
        .run(move |conn| {
            let post = find_post(conn, topic_id, id)?;
            Ok(post.delete(conn)?)
        })
        .await?;
    info!("deleted post {id}");
    Ok(Redirect::to(&format!("/topics/{topic_id}")))
}
