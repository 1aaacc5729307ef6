use forum::models::{Comment, Favorite, Flair, NewComment, NewFavorite, NewFlair, Topic, User};
use forum::prelude::*;
use pretty_assertions::assert_eq;
use test_log::test;

mod common;
use common::*;

/// Attach a comment, a flair and a favorite to every post of `topic`.
fn decorate(conn: &forum::db::Connection, topic: &Topic, user: &User) {
    for post in topic.posts(conn).unwrap() {
        let post_id = post.id().unwrap();
        Comment::create(
            conn,
            &NewComment {
                body: "Great write-up!".to_string(),
                post_id: Some(post_id),
                user_id: Some(user.id().unwrap()),
            },
        )
        .unwrap();
        Flair::create(
            conn,
            &NewFlair {
                name: "travel".to_string(),
                color: "blue".to_string(),
                post_id: Some(post_id),
            },
        )
        .unwrap();
        Favorite::create(
            conn,
            &NewFavorite {
                user_id: Some(user.id().unwrap()),
                post_id: Some(post_id),
            },
        )
        .unwrap();
    }
}

#[test]
fn deleting_topic_removes_its_posts_and_their_children() {
    let mut conn = sqlite_connection();
    let scene = Scene::build(&mut conn);
    create_post(&mut conn, &scene.topic, &scene.user, "Second visit");
    let other_topic = create_topic(&conn, "Martian weather", "Dust storms and what to do about them.");
    create_post(&mut conn, &other_topic, &scene.user, "Storm season");
    decorate(&conn, &scene.topic, &scene.user);
    decorate(&conn, &other_topic, &scene.user);

    let before = counts(&conn);
    assert_eq!(
        before,
        Counts {
            posts: 3,
            comments: 3,
            votes: 3,
            flairs: 3,
            favorites: 3,
        }
    );

    let n = scene.topic.posts(&conn).unwrap().len() as i64;
    scene.topic.delete(&conn).unwrap();

    assert_eq!(
        counts(&conn),
        Counts {
            posts: before.posts - n,
            comments: 1,
            votes: 1,
            flairs: 1,
            favorites: 1,
        }
    );
    assert!(Topic::find(&conn, scene.topic.id().unwrap()).unwrap().is_none());
    assert_eq!(other_topic.posts(&conn).unwrap().len(), 1);
}

#[test]
fn deleting_user_removes_everything_they_own() {
    let mut conn = sqlite_connection();
    let scene = Scene::build(&mut conn);
    let reader = create_user(&conn, &random_email());
    let readers_post = create_post(&mut conn, &scene.topic, &reader, "A reader's reply");
    decorate(&conn, &scene.topic, &reader);

    scene.user.delete(&conn).unwrap();

    // only the reader's post survives, with the reader's own upvote,
    // comment, flair and favorite
    assert_eq!(
        counts(&conn),
        Counts {
            posts: 1,
            comments: 1,
            votes: 1,
            flairs: 1,
            favorites: 1,
        }
    );
    let remaining = scene.topic.posts(&conn).unwrap();
    assert_eq!(remaining[0].id, readers_post.id);
    assert!(User::find(&conn, scene.user.id().unwrap()).unwrap().is_none());
    assert!(Topic::find(&conn, scene.topic.id().unwrap()).unwrap().is_some());
}

#[test]
fn deleting_post_removes_its_children() {
    let mut conn = sqlite_connection();
    let scene = Scene::build(&mut conn);
    decorate(&conn, &scene.topic, &scene.user);

    scene.post.delete(&conn).unwrap();
    assert_eq!(
        counts(&conn),
        Counts {
            posts: 0,
            comments: 0,
            votes: 0,
            flairs: 0,
            favorites: 0,
        }
    );
}
