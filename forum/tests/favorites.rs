use forum::models::{Favorite, NewFavorite};
use forum::prelude::*;
use pretty_assertions::assert_eq;
use test_log::test;

mod common;
use common::*;

fn favorite_messages(new_favorite: NewFavorite) -> String {
    let conn = sqlite_connection();
    let err = Favorite::create(&conn, &new_favorite).unwrap_err();
    assert_eq!(Favorite::query().count(&conn).unwrap(), 0);
    err.to_string()
}

#[test]
fn create_requires_user_and_post() {
    assert_eq!(
        favorite_messages(NewFavorite {
            user_id: None,
            post_id: Some(1),
        }),
        "Validation error: Favorite.userId cannot be null"
    );
    assert_eq!(
        favorite_messages(NewFavorite {
            user_id: Some(1),
            post_id: None,
        }),
        "Validation error: Favorite.postId cannot be null"
    );
}

#[test]
fn both_missing_ids_are_reported() {
    let message = favorite_messages(NewFavorite::default());
    assert!(message.contains("Favorite.userId cannot be null"));
    assert!(message.contains("Favorite.postId cannot be null"));
}

#[test]
fn create_and_resolve_associations() {
    let mut conn = sqlite_connection();
    let scene = Scene::build(&mut conn);

    let favorite = Favorite::create(
        &conn,
        &NewFavorite {
            user_id: Some(scene.user.id().unwrap()),
            post_id: Some(scene.post.id().unwrap()),
        },
    )
    .unwrap();

    assert_eq!(favorite.get_user(&conn).unwrap().email, "starman@tesla.com");
    assert_eq!(
        favorite.get_post(&conn).unwrap().title,
        "My first visit to Proxima Centauri b"
    );
    let found = scene
        .post
        .favorite_for(&conn, scene.user.id().unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(found.id, favorite.id);
    assert_eq!(scene.user.favorites(&conn).unwrap().len(), 1);
}

#[test]
fn set_user_replaces_owner() {
    let mut conn = sqlite_connection();
    let scene = Scene::build(&mut conn);
    let favorite = Favorite::create(
        &conn,
        &NewFavorite {
            user_id: Some(scene.user.id().unwrap()),
            post_id: Some(scene.post.id().unwrap()),
        },
    )
    .unwrap();
    let other = create_user(&conn, "ada@example.com");

    let favorite = favorite.set_user(&conn, &other).unwrap();
    assert_eq!(favorite.user_id(), other.id().unwrap());
    assert_eq!(favorite.get_user(&conn).unwrap().email, "ada@example.com");

    let stored = Favorite::find(&conn, favorite.id().unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(stored.user_id(), other.id().unwrap());
    assert!(scene.user.favorites(&conn).unwrap().is_empty());
}

#[test]
fn set_post_replaces_post() {
    let mut conn = sqlite_connection();
    let scene = Scene::build(&mut conn);
    let favorite = Favorite::create(
        &conn,
        &NewFavorite {
            user_id: Some(scene.user.id().unwrap()),
            post_id: Some(scene.post.id().unwrap()),
        },
    )
    .unwrap();
    let second = create_post(&mut conn, &scene.topic, &scene.user, "Back from Barnard's Star");

    let favorite = favorite.set_post(&conn, &second).unwrap();
    assert_eq!(favorite.post_id(), second.id().unwrap());

    let stored = Favorite::find(&conn, favorite.id().unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(stored.get_post(&conn).unwrap().title, "Back from Barnard's Star");
    assert!(scene
        .post
        .favorite_for(&conn, scene.user.id().unwrap())
        .unwrap()
        .is_none());
}

#[test]
fn destroy_removes_favorite() {
    let mut conn = sqlite_connection();
    let scene = Scene::build(&mut conn);
    let favorite = Favorite::create(
        &conn,
        &NewFavorite {
            user_id: Some(scene.user.id().unwrap()),
            post_id: Some(scene.post.id().unwrap()),
        },
    )
    .unwrap();

    favorite.destroy(&conn).unwrap();
    assert!(Favorite::find(&conn, favorite.id().unwrap())
        .unwrap()
        .is_none());
}
