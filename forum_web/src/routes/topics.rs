use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::Form;
use forum::models::{Topic, TopicForm};
use forum::prelude::*;
use log::info;

use crate::error::{or_invalid, AppError};
use crate::state::AppState;
use crate::views;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let topics = state.run(|conn| Ok(Topic::all(conn)?)).await?;
    Ok(views::topics::index(&topics))
}

pub async fn new() -> Html<String> {
    views::topics::new(&TopicForm::default(), None)
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<TopicForm>,
) -> Result<Redirect, AppError> {
    let id = state
        .run(move |conn| {
            let topic = or_invalid(Topic::create(conn, &form), |e| {
                views::topics::new(&form, Some(e))
            })?;
            Ok(topic.id()?)
        })
        .await?;
    info!("created topic {id}");
    Ok(Redirect::to(&format!("/topics/{id}")))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    state
        .run(move |conn| {
            let topic = Topic::find(conn, id)?.ok_or(AppError::NotFound)?;
            let posts = topic.posts(conn)?;
            Ok(views::topics::show(&topic, &posts))
        })
        .await
}

pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let topic = state
        .run(move |conn| Topic::find(conn, id)?.ok_or(AppError::NotFound))
        .await?;
    Ok(views::topics::edit(id, &TopicForm::from(&topic), None))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<TopicForm>,
) -> Result<Redirect, AppError> {
    state
        .run(move |conn| {
            let mut topic = Topic::find(conn, id)?.ok_or(AppError::NotFound)?;
            or_invalid(topic.update(conn, &form), |e| {
                views::topics::edit(id, &form, Some(e))
            })
        })
        .await?;
    Ok(Redirect::to(&format!("/topics/{id}")))
}

pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    state
        .run(move |conn| {
            let topic = Topic::find(conn, id)?.ok_or(AppError::NotFound)?;
            Ok(topic.delete(conn)?)
        })
        .await?;
    info!("deleted topic {id}");
    Ok(Redirect::to("/topics"))
}
