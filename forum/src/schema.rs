//! The forum schema as embedded SQL migrations.
//!
//! Foreign keys carry `ON DELETE CASCADE`, so removing a topic or a
//! user removes its posts and, through them, their comments, votes,
//! flairs and favorites. SQLite only enforces this with
//! `PRAGMA foreign_keys = ON`, which every `forum_core` connection sets.

use forum_core::migrations::{Migration, Migrations};

const USERS_TOPICS_ADVERTISEMENTS: Migration = Migration::new(
    "0001_users_topics_advertisements",
    r#"
CREATE TABLE users (
    id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    role TEXT NOT NULL DEFAULT 'member' CHECK (role IN ('member', 'admin')),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE TABLE topics (
    id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE TABLE advertisements (
    id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#,
    r#"
DROP TABLE advertisements;
DROP TABLE topics;
DROP TABLE users;
"#,
);

const POSTS_COMMENTS_FLAIRS: Migration = Migration::new(
    "0002_posts_comments_flairs",
    r#"
CREATE TABLE posts (
    id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    body TEXT NOT NULL,
    topic_id INTEGER NOT NULL REFERENCES topics(id) ON DELETE CASCADE,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX posts_topic_id ON posts(topic_id);
CREATE TABLE comments (
    id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    body TEXT NOT NULL,
    post_id INTEGER NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX comments_post_id ON comments(post_id);
CREATE TABLE flairs (
    id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    color TEXT NOT NULL,
    post_id INTEGER NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#,
    r#"
DROP TABLE flairs;
DROP TABLE comments;
DROP TABLE posts;
"#,
);

const VOTES_FAVORITES: Migration = Migration::new(
    "0003_votes_favorites",
    r#"
CREATE TABLE votes (
    id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    value INTEGER NOT NULL CHECK (value IN (-1, 1)),
    post_id INTEGER NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX votes_post_id ON votes(post_id);
CREATE TABLE favorites (
    id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    post_id INTEGER NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#,
    r#"
DROP TABLE favorites;
DROP TABLE votes;
"#,
);

/// Every forum migration, oldest first.
pub fn migrations() -> Migrations {
    Migrations::new(vec![
        USERS_TOPICS_ADVERTISEMENTS,
        POSTS_COMMENTS_FLAIRS,
        VOTES_FAVORITES,
    ])
}

/// Tables holding forum data, parents before children.
pub const DATA_TABLES: &[&str] = &[
    "users",
    "topics",
    "advertisements",
    "posts",
    "comments",
    "flairs",
    "votes",
    "favorites",
];
