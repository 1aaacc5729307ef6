//! Votes and the post score derived from them.
//!
//! A post's points are the sum of its vote values. Every post starts
//! with one upvote from its author, written alongside the post by
//! [`Post::create`](crate::models::Post::create).

use std::fmt;

use chrono::NaiveDateTime;
use forum_core::db::ConnectionMethods;
use forum_core::query::FieldExpr;
use forum_core::{impl_model, FieldType, FromSql, SqlType, SqlVal, ToSql};
use log::debug;
use serde::{Deserialize, Serialize};

use super::{now, require_existing, Post, User};
use crate::{AutoPk, DataObjectOps, DataResult, ForeignKey, Result};

/// Direction of a vote. Stored as `1` or `-1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteValue {
    Up,
    Down,
}

impl VoteValue {
    pub fn as_i32(self) -> i32 {
        match self {
            VoteValue::Up => 1,
            VoteValue::Down => -1,
        }
    }
}

impl fmt::Display for VoteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteValue::Up => f.write_str("upvote"),
            VoteValue::Down => f.write_str("downvote"),
        }
    }
}

impl TryFrom<i64> for VoteValue {
    type Error = forum_core::Error;
    fn try_from(value: i64) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(VoteValue::Up),
            -1 => Ok(VoteValue::Down),
            _ => Err(forum_core::Error::OutOfRange),
        }
    }
}

impl ToSql for VoteValue {
    fn to_sql(&self) -> SqlVal {
        SqlVal::Int(self.as_i32())
    }
}

impl FromSql for VoteValue {
    fn from_sql(val: SqlVal) -> forum_core::Result<Self> {
        VoteValue::try_from(val.integer()?)
    }
}

impl FieldType for VoteValue {
    const SQLTYPE: SqlType = SqlType::Int;
}

/// One user's vote on one post.
#[derive(Clone, Debug)]
pub struct Vote {
    pub id: AutoPk<i64>,
    pub value: VoteValue,
    pub post: ForeignKey<Post>,
    pub user: ForeignKey<User>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
impl_model!(Vote, table = "votes", fields {
    value: VoteValue => "value",
    post: ForeignKey<Post> => "post_id",
    user: ForeignKey<User> => "user_id",
    created_at: NaiveDateTime => "created_at",
    updated_at: NaiveDateTime => "updated_at",
});

impl Vote {
    pub const POST_ID: FieldExpr<i64> = FieldExpr::new("post_id");
    pub const USER_ID: FieldExpr<i64> = FieldExpr::new("user_id");
    pub const VALUE: FieldExpr<VoteValue> = FieldExpr::new("value");

    /// An unsaved vote.
    pub fn new(post_id: i64, user_id: i64, value: VoteValue) -> Vote {
        let now = now();
        Vote {
            id: AutoPk::uninitialized(),
            value,
            post: ForeignKey::from_pk(post_id),
            user: ForeignKey::from_pk(user_id),
            created_at: now,
            updated_at: now,
        }
    }

    /// Record `user_id`'s vote on `post_id`.
    ///
    /// An existing vote by the same user on the same post has its value
    /// replaced; otherwise a new vote is stored.
    pub fn cast(
        conn: &impl ConnectionMethods,
        post_id: i64,
        user_id: i64,
        value: VoteValue,
    ) -> Result<Vote> {
        require_existing::<Post>(
            conn,
            post_id,
            "post_id",
            "Vote.postId must refer to an existing post",
        )?;
        require_existing::<User>(
            conn,
            user_id,
            "user_id",
            "Vote.userId must refer to an existing user",
        )?;
        let existing = Vote::query()
            .filter(Vote::POST_ID.eq(post_id))
            .filter(Vote::USER_ID.eq(user_id))
            .order_asc("id")
            .load_first(conn)?;
        let mut vote = match existing {
            Some(mut vote) => {
                vote.value = value;
                vote.updated_at = now();
                vote
            }
            None => Vote::new(post_id, user_id, value),
        };
        vote.save(conn)?;
        debug!("user {user_id} cast {value} on post {post_id}");
        Ok(vote)
    }

    /// Every vote on `post_id`, oldest first.
    pub fn for_post(conn: &impl ConnectionMethods, post_id: i64) -> Result<Vec<Vote>> {
        Ok(Vote::query()
            .filter(Vote::POST_ID.eq(post_id))
            .order_asc("id")
            .load(conn)?)
    }

    /// Votes on `post_id` by `user_id` with the given `value`.
    pub fn find_for(
        conn: &impl ConnectionMethods,
        post_id: i64,
        user_id: i64,
        value: VoteValue,
    ) -> Result<Vec<Vote>> {
        Ok(Vote::query()
            .filter(Vote::POST_ID.eq(post_id))
            .filter(Vote::USER_ID.eq(user_id))
            .filter(Vote::VALUE.eq(value))
            .order_asc("id")
            .load(conn)?)
    }

    pub fn post_id(&self) -> i64 {
        self.post.pk()
    }

    pub fn user_id(&self) -> i64 {
        self.user.pk()
    }
}

/// Sum of the values of `votes`.
pub fn tally(votes: &[Vote]) -> i64 {
    votes.iter().map(|v| i64::from(v.value.as_i32())).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_sums_values() {
        let votes = vec![
            Vote::new(1, 1, VoteValue::Up),
            Vote::new(1, 2, VoteValue::Up),
            Vote::new(1, 3, VoteValue::Down),
        ];
        assert_eq!(tally(&votes), 1);
        assert_eq!(tally(&[]), 0);
    }

    #[test]
    fn value_from_sql() {
        assert_eq!(VoteValue::from_sql(SqlVal::BigInt(-1)).unwrap(), VoteValue::Down);
        assert_eq!(VoteValue::from_sql(SqlVal::Int(1)).unwrap(), VoteValue::Up);
        assert!(VoteValue::from_sql(SqlVal::BigInt(2)).is_err());
        assert_eq!(VoteValue::Down.to_sql(), SqlVal::Int(-1));
    }
}
