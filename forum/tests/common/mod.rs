#![allow(dead_code)] // each test file uses a different subset
use forum::db::Connection;
use forum::models::{Comment, Favorite, Flair, Post, Vote};
use forum::prelude::*;

pub use forum_test_helper::*;

/// Row counts of every table hanging off a post.
#[derive(Debug, PartialEq, Eq)]
pub struct Counts {
    pub posts: i64,
    pub comments: i64,
    pub votes: i64,
    pub flairs: i64,
    pub favorites: i64,
}

pub fn counts(conn: &Connection) -> Counts {
    Counts {
        posts: Post::query().count(conn).unwrap(),
        comments: Comment::query().count(conn).unwrap(),
        votes: Vote::query().count(conn).unwrap(),
        flairs: Flair::query().count(conn).unwrap(),
        favorites: Favorite::query().count(conn).unwrap(),
    }
}
