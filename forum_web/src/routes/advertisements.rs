use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::Form;
use forum::models::{Advertisement, AdvertisementForm};
use forum::prelude::*;
use log::info;

use crate::error::{or_invalid, AppError};
use crate::state::AppState;
use crate::views;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let ads = state.run(|conn| Ok(Advertisement::all(conn)?)).await?;
    Ok(views::advertisements::index(&ads))
}

pub async fn new() -> Html<String> {
    views::advertisements::new(&AdvertisementForm::default(), None)
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<AdvertisementForm>,
) -> Result<Redirect, AppError> {
    let id = state
        .run(move |conn| {
            let ad = or_invalid(Advertisement::create(conn, &form), |e| {
                views::advertisements::new(&form, Some(e))
            })?;
            Ok(ad.id()?)
        })
        .await?;
    info!("created advertisement {id}");
    Ok(Redirect::to(&format!("/advertisements/{id}")))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let ad = state
        .run(move |conn| Advertisement::find(conn, id)?.ok_or(AppError::NotFound))
        .await?;
    Ok(views::advertisements::show(&ad))
}

pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let ad = state
        .run(move |conn| Advertisement::find(conn, id)?.ok_or(AppError::NotFound))
        .await?;
    Ok(views::advertisements::edit(id, &AdvertisementForm::from(&ad), None))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<AdvertisementForm>,
) -> Result<Redirect, AppError> {
    state
        .run(move |conn| {
            let mut ad = Advertisement::find(conn, id)?.ok_or(AppError::NotFound)?;
            or_invalid(ad.update(conn, &form), |e| {
                views::advertisements::edit(id, &form, Some(e))
            })
        })
        .await?;
    Ok(Redirect::to(&format!("/advertisements/{id}")))
}

pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    state
        .run(move |conn| {
            let ad = Advertisement::find(conn, id)?.ok_or(AppError::NotFound)?;
            Ok(ad.delete(conn)?)
        })
        .await?;
    info!("deleted advertisement {id}");
    Ok(Redirect::to("/advertisements"))
}
