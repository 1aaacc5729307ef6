use chrono::NaiveDateTime;
use forum_core::db::ConnectionMethods;
use forum_core::impl_model;
use forum_core::query::FieldExpr;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{now, require_existing, Post, User};
use crate::{AutoPk, DataObjectOps, DataResult, ForeignKey, Result, ValidationError};

/// A reply to a post.
#[derive(Clone, Debug)]
pub struct Comment {
    pub id: AutoPk<i64>,
    pub body: String,
    pub post: ForeignKey<Post>,
    pub user: ForeignKey<User>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
impl_model!(Comment, table = "comments", fields {
    body: String => "body",
    post: ForeignKey<Post> => "post_id",
    user: ForeignKey<User> => "user_id",
    created_at: NaiveDateTime => "created_at",
    updated_at: NaiveDateTime => "updated_at",
});

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
pub struct NewComment {
    #[validate(length(min = 5, message = "Comment.body must be at least 5 characters"))]
    pub body: String,
    #[serde(default)]
    #[validate(required(message = "Comment.postId cannot be null"))]
    pub post_id: Option<i64>,
    #[serde(default)]
    #[validate(required(message = "Comment.userId cannot be null"))]
    pub user_id: Option<i64>,
}

impl Comment {
    pub const POST_ID: FieldExpr<i64> = FieldExpr::new("post_id");

    pub fn create(conn: &impl ConnectionMethods, new_comment: &NewComment) -> Result<Comment> {
        new_comment.validate()?;
        let (Some(post_id), Some(user_id)) = (new_comment.post_id, new_comment.user_id) else {
            return Err(ValidationError::new("post_id", "Comment.postId cannot be null").into());
        };
        require_existing::<Post>(
            conn,
            post_id,
            "post_id",
            "Comment.postId must refer to an existing post",
        )?;
        require_existing::<User>(
            conn,
            user_id,
            "user_id",
            "Comment.userId must refer to an existing user",
        )?;
        let now = now();
        let mut comment = Comment {
            id: AutoPk::uninitialized(),
            body: new_comment.body.clone(),
            post: ForeignKey::from_pk(post_id),
            user: ForeignKey::from_pk(user_id),
            created_at: now,
            updated_at: now,
        };
        comment.save(conn)?;
        Ok(comment)
    }

    pub fn find(conn: &impl ConnectionMethods, id: i64) -> Result<Option<Comment>> {
        Ok(Comment::try_get(conn, id)?)
    }

    pub fn for_post(conn: &impl ConnectionMethods, post_id: i64) -> Result<Vec<Comment>> {
        Ok(Comment::query()
            .filter(Comment::POST_ID.eq(post_id))
            .order_asc("id")
            .load(conn)?)
    }

    pub fn post_id(&self) -> i64 {
        self.post.pk()
    }

    pub fn user_id(&self) -> i64 {
        self.user.pk()
    }

    pub fn get_post(&self, conn: &impl ConnectionMethods) -> Result<&Post> {
        Ok(self.post.load(conn)?)
    }

    pub fn get_user(&self, conn: &impl ConnectionMethods) -> Result<&User> {
        Ok(self.user.load(conn)?)
    }

    pub fn destroy(&self, conn: &impl ConnectionMethods) -> Result<()> {
        self.delete(conn)?;
        Ok(())
    }
}
