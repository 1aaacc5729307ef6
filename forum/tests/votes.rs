use forum::models::{vote, NewPost, Post, Vote, VoteValue};
use forum::prelude::*;
use pretty_assertions::assert_eq;
use test_log::test;

mod common;
use common::*;

#[test]
fn new_post_has_author_upvote() {
    let mut conn = sqlite_connection();
    let scene = Scene::build(&mut conn);

    let votes = scene.post.votes(&conn).unwrap();
    assert_eq!(votes.len(), 1);
    assert_eq!(votes[0].value, VoteValue::Up);
    assert_eq!(votes[0].user_id(), scene.user.id().unwrap());
    assert_eq!(votes[0].post_id(), scene.post.id().unwrap());
    assert_eq!(scene.post.points(&conn).unwrap(), 1);
}

#[test]
fn points_sum_all_votes() {
    let mut conn = sqlite_connection();
    let scene = Scene::build(&mut conn);
    let post_id = scene.post.id().unwrap();

    for _ in 0..3 {
        let voter = create_user(&conn, &random_email());
        Vote::new(post_id, voter.id().unwrap(), VoteValue::Down)
            .save(&conn)
            .unwrap();
    }
    let voter = create_user(&conn, &random_email());
    Vote::new(post_id, voter.id().unwrap(), VoteValue::Up)
        .save(&conn)
        .unwrap();

    // author +1, three -1, one +1
    assert_eq!(scene.post.points(&conn).unwrap(), -1);
    let votes = scene.post.votes(&conn).unwrap();
    assert_eq!(vote::tally(&votes), -1);
}

#[test]
fn points_are_zero_without_votes() {
    let mut conn = sqlite_connection();
    let scene = Scene::build(&mut conn);
    for v in scene.post.votes(&conn).unwrap() {
        v.delete(&conn).unwrap();
    }
    assert_eq!(scene.post.points(&conn).unwrap(), 0);
}

#[test]
fn upvote_and_downvote_lookups() {
    let mut conn = sqlite_connection();
    let scene = Scene::build(&mut conn);
    let author_id = scene.user.id().unwrap();
    let critic = create_user(&conn, &random_email());
    let critic_id = critic.id().unwrap();
    Vote::new(scene.post.id().unwrap(), critic_id, VoteValue::Down)
        .save(&conn)
        .unwrap();

    assert_eq!(scene.post.has_upvote_for(&conn, author_id).unwrap().len(), 1);
    assert!(scene.post.has_downvote_for(&conn, author_id).unwrap().is_empty());
    assert!(scene.post.has_upvote_for(&conn, critic_id).unwrap().is_empty());
    let downvotes = scene.post.has_downvote_for(&conn, critic_id).unwrap();
    assert_eq!(downvotes.len(), 1);
    assert_eq!(downvotes[0].user_id(), critic_id);
}

#[test]
fn casting_again_replaces_the_vote() {
    let mut conn = sqlite_connection();
    let scene = Scene::build(&mut conn);
    let post_id = scene.post.id().unwrap();
    let author_id = scene.user.id().unwrap();

    let vote = Vote::cast(&conn, post_id, author_id, VoteValue::Down).unwrap();
    assert_eq!(vote.value, VoteValue::Down);
    assert_eq!(scene.post.votes(&conn).unwrap().len(), 1);
    assert_eq!(scene.post.points(&conn).unwrap(), -1);

    let reader = create_user(&conn, &random_email());
    Vote::cast(&conn, post_id, reader.id().unwrap(), VoteValue::Up).unwrap();
    Vote::cast(&conn, post_id, reader.id().unwrap(), VoteValue::Up).unwrap();
    assert_eq!(scene.post.votes(&conn).unwrap().len(), 2);
    assert_eq!(scene.post.points(&conn).unwrap(), 0);
}

#[test]
fn post_and_upvote_are_written_together() {
    let mut conn = sqlite_connection();
    let scene = Scene::build(&mut conn);
    let before = Post::count(&conn).unwrap();

    conn.execute("DROP TABLE votes").unwrap();
    let new_post = NewPost {
        title: "Second visit".to_string(),
        body: "The surface was even colder this time.".to_string(),
        topic_id: Some(scene.topic.id().unwrap()),
        user_id: Some(scene.user.id().unwrap()),
    };
    assert!(Post::create(&mut conn, &new_post).is_err());
    assert_eq!(Post::count(&conn).unwrap(), before);
}

#[test]
fn invalid_post_is_not_written() {
    let mut conn = sqlite_connection();
    let scene = Scene::build(&mut conn);

    let new_post = NewPost {
        title: "X".to_string(),
        body: "short".to_string(),
        topic_id: None,
        user_id: Some(scene.user.id().unwrap()),
    };
    let err = Post::create(&mut conn, &new_post).unwrap_err();
    let messages: Vec<&str> = err.validation().unwrap().messages().collect();
    assert_eq!(
        messages,
        vec![
            "Post.body must be at least 10 characters",
            "Post.title must be at least 2 characters",
            "Post.topicId cannot be null",
        ]
    );
    assert_eq!(Post::count(&conn).unwrap(), 1);
    assert_eq!(Vote::query().count(&conn).unwrap(), 1);
}

#[test]
fn missing_author_is_a_validation_error() {
    let mut conn = sqlite_connection();
    let scene = Scene::build(&mut conn);

    let new_post = NewPost {
        title: "Ghost story".to_string(),
        body: "Nobody wrote this one.".to_string(),
        topic_id: Some(scene.topic.id().unwrap()),
        user_id: Some(999),
    };
    let err = Post::create(&mut conn, &new_post).unwrap_err();
    assert_eq!(
        err.validation().unwrap().for_field("user_id"),
        Some("Post.userId must refer to an existing user")
    );

    let err = Vote::cast(&conn, scene.post.id().unwrap(), 999, VoteValue::Down).unwrap_err();
    assert_eq!(
        err.validation().unwrap().for_field("user_id"),
        Some("Vote.userId must refer to an existing user")
    );
    assert_eq!(Post::count(&conn).unwrap(), 1);
    assert_eq!(Vote::query().count(&conn).unwrap(), 1);
}
