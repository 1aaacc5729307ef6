use forum::models::{Comment, Flair, FlairForm, NewComment, NewFlair};
use forum::prelude::*;
use pretty_assertions::assert_eq;
use test_log::test;

mod common;
use common::*;

#[test]
fn comment_on_post() {
    let mut conn = sqlite_connection();
    let scene = Scene::build(&mut conn);
    let reader = create_user(&conn, "reader@example.com");

    let comment = Comment::create(
        &conn,
        &NewComment {
            body: "What was the weather like?".to_string(),
            post_id: Some(scene.post.id().unwrap()),
            user_id: Some(reader.id().unwrap()),
        },
    )
    .unwrap();

    assert_eq!(comment.get_user(&conn).unwrap().email, "reader@example.com");
    assert_eq!(comment.get_post(&conn).unwrap().id, scene.post.id);
    let comments = scene.post.comments(&conn).unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].body, "What was the weather like?");

    comment.destroy(&conn).unwrap();
    assert!(scene.post.comments(&conn).unwrap().is_empty());
}

#[test]
fn comment_validation() {
    let mut conn = sqlite_connection();
    let scene = Scene::build(&mut conn);
    let err = Comment::create(
        &conn,
        &NewComment {
            body: "Hi".to_string(),
            post_id: Some(scene.post.id().unwrap()),
            user_id: None,
        },
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Validation error: Comment.body must be at least 5 characters,\n\
         Validation error: Comment.userId cannot be null"
    );
}

#[test]
fn flair_lifecycle() {
    let mut conn = sqlite_connection();
    let scene = Scene::build(&mut conn);
    let post_id = scene.post.id().unwrap();

    let mut flair = Flair::create(
        &conn,
        &NewFlair {
            name: "travel".to_string(),
            color: "blue".to_string(),
            post_id: Some(post_id),
        },
    )
    .unwrap();
    flair
        .update(
            &conn,
            &FlairForm {
                name: "exploration".to_string(),
                color: "red".to_string(),
            },
        )
        .unwrap();

    let flairs = scene.post.flairs(&conn).unwrap();
    assert_eq!(flairs.len(), 1);
    assert_eq!(flairs[0].name, "exploration");
    assert_eq!(flairs[0].color, "red");

    let err = Flair::create(
        &conn,
        &NewFlair {
            name: "x".to_string(),
            color: String::new(),
            post_id: Some(post_id),
        },
    )
    .unwrap_err();
    assert_eq!(
        err.validation().unwrap().messages().collect::<Vec<_>>(),
        vec![
            "Flair.color cannot be empty",
            "Flair.name must be at least 2 characters",
        ]
    );

    flair.destroy(&conn).unwrap();
    assert!(Flair::for_post(&conn, post_id).unwrap().is_empty());
}
