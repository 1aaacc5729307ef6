//! Forum models.

use chrono::{NaiveDateTime, Utc};
use forum_core::db::ConnectionMethods;

use crate::{DataObject, DataObjectOps, Result, ValidationError};

mod advertisement;
mod comment;
mod favorite;
mod flair;
mod post;
mod topic;
mod user;
pub mod vote;

pub use advertisement::{Advertisement, AdvertisementForm};
pub use comment::{Comment, NewComment};
pub use favorite::{Favorite, NewFavorite};
pub use flair::{Flair, FlairForm, NewFlair};
pub use post::{NewPost, Post, PostForm};
pub use topic::{Topic, TopicForm};
pub use user::{NewUser, ParseRoleError, Role, User};
pub use vote::{Vote, VoteValue};

/// Timestamps are stored in UTC without an offset.
fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Fail validation with `message` unless a `T` with primary key `id`
/// exists. Checked before inserting rows that reference `T`.
fn require_existing<T: DataObject>(
    conn: &impl ConnectionMethods,
    id: i64,
    field: &str,
    message: &str,
) -> Result<()> {
    match T::try_get(conn, id)? {
        Some(_) => Ok(()),
        None => Err(ValidationError::new(field, message).into()),
    }
}
