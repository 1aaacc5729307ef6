use chrono::NaiveDateTime;
use forum_core::db::{BackendConnection, ConnectionMethods};
use forum_core::impl_model;
use forum_core::query::FieldExpr;
use log::debug;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::vote::{self, Vote, VoteValue};
use super::{now, require_existing, Comment, Favorite, Flair, Topic, User};
use crate::{AutoPk, DataObject, DataObjectOps, DataResult, ForeignKey, Result, ValidationError};

/// A post in a topic, written by a user.
#[derive(Clone, Debug)]
pub struct Post {
    pub id: AutoPk<i64>,
    pub title: String,
    pub body: String,
    pub topic: ForeignKey<Topic>,
    pub user: ForeignKey<User>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
impl_model!(Post, table = "posts", fields {
    title: String => "title",
    body: String => "body",
    topic: ForeignKey<Topic> => "topic_id",
    user: ForeignKey<User> => "user_id",
    created_at: NaiveDateTime => "created_at",
    updated_at: NaiveDateTime => "updated_at",
});

/// Input for [`Post::create`].
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct NewPost {
    #[validate(length(min = 2, message = "Post.title must be at least 2 characters"))]
    pub title: String,
    #[validate(length(min = 10, message = "Post.body must be at least 10 characters"))]
    pub body: String,
    #[validate(required(message = "Post.topicId cannot be null"))]
    pub topic_id: Option<i64>,
    #[validate(required(message = "Post.userId cannot be null"))]
    pub user_id: Option<i64>,
}

/// Submitted title and body, used to build a [`NewPost`] and to edit.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct PostForm {
    #[validate(length(min = 2, message = "Post.title must be at least 2 characters"))]
    pub title: String,
    #[validate(length(min = 10, message = "Post.body must be at least 10 characters"))]
    pub body: String,
}

impl PostForm {
    /// A [`NewPost`] in `topic_id` by `user_id`.
    pub fn into_new_post(self, topic_id: i64, user_id: i64) -> NewPost {
        NewPost {
            title: self.title,
            body: self.body,
            topic_id: Some(topic_id),
            user_id: Some(user_id),
        }
    }
}

impl From<&Post> for PostForm {
    fn from(post: &Post) -> Self {
        PostForm {
            title: post.title.clone(),
            body: post.body.clone(),
        }
    }
}

impl Post {
    pub const TOPIC_ID: FieldExpr<i64> = FieldExpr::new("topic_id");
    pub const USER_ID: FieldExpr<i64> = FieldExpr::new("user_id");

    /// Create a post along with its author's upvote.
    ///
    /// Both rows are written in one transaction: if the vote cannot be
    /// stored the post is not stored either.
    pub fn create(conn: &mut impl BackendConnection, new_post: &NewPost) -> Result<Post> {
        new_post.validate()?;
        let topic_id = new_post
            .topic_id
            .ok_or_else(|| ValidationError::new("topic_id", "Post.topicId cannot be null"))?;
        let user_id = new_post
            .user_id
            .ok_or_else(|| ValidationError::new("user_id", "Post.userId cannot be null"))?;

        let tx = conn.transaction()?;
        require_existing::<Topic>(
            &tx,
            topic_id,
            "topic_id",
            "Post.topicId must refer to an existing topic",
        )?;
        require_existing::<User>(
            &tx,
            user_id,
            "user_id",
            "Post.userId must refer to an existing user",
        )?;
        let now = now();
        let mut post = Post {
            id: AutoPk::uninitialized(),
            title: new_post.title.clone(),
            body: new_post.body.clone(),
            topic: ForeignKey::from_pk(topic_id),
            user: ForeignKey::from_pk(user_id),
            created_at: now,
            updated_at: now,
        };
        post.save(&tx)?;
        let mut upvote = Vote::new(post.id()?, user_id, VoteValue::Up);
        upvote.save(&tx)?;
        tx.commit()?;
        debug!("created post {} in topic {topic_id}", post.id()?);
        Ok(post)
    }

    pub fn find(conn: &impl ConnectionMethods, id: i64) -> Result<Option<Post>> {
        Ok(Post::try_get(conn, id)?)
    }

    /// The post with `id`, provided it belongs to topic `topic_id`.
    pub fn find_in_topic(
        conn: &impl ConnectionMethods,
        topic_id: i64,
        id: i64,
    ) -> Result<Option<Post>> {
        Ok(Post::find(conn, id)?.filter(|post| post.topic_id() == topic_id))
    }

    /// Posts in topic `topic_id`, oldest first.
    pub fn for_topic(conn: &impl ConnectionMethods, topic_id: i64) -> Result<Vec<Post>> {
        Ok(Post::query()
            .filter(Post::TOPIC_ID.eq(topic_id))
            .order_asc("id")
            .load(conn)?)
    }

    pub fn count(conn: &impl ConnectionMethods) -> Result<i64> {
        Ok(Post::query().count(conn)?)
    }

    pub fn update(&mut self, conn: &impl ConnectionMethods, form: &PostForm) -> Result<()> {
        form.validate()?;
        self.title = form.title.clone();
        self.body = form.body.clone();
        self.updated_at = now();
        self.save(conn)?;
        Ok(())
    }

    pub fn topic_id(&self) -> i64 {
        self.topic.pk()
    }

    /// Id of the author.
    pub fn user_id(&self) -> i64 {
        self.user.pk()
    }

    pub fn votes(&self, conn: &impl ConnectionMethods) -> Result<Vec<Vote>> {
        Vote::for_post(conn, self.id()?)
    }

    /// Sum of all vote values; 0 when there are no votes.
    pub fn points(&self, conn: &impl ConnectionMethods) -> Result<i64> {
        Ok(vote::tally(&self.votes(conn)?))
    }

    /// This user's upvotes on the post.
    pub fn has_upvote_for(&self, conn: &impl ConnectionMethods, user_id: i64) -> Result<Vec<Vote>> {
        Vote::find_for(conn, self.id()?, user_id, VoteValue::Up)
    }

    /// This user's downvotes on the post.
    pub fn has_downvote_for(
        &self,
        conn: &impl ConnectionMethods,
        user_id: i64,
    ) -> Result<Vec<Vote>> {
        Vote::find_for(conn, self.id()?, user_id, VoteValue::Down)
    }

    /// The user's favorite of this post, if they have one.
    pub fn favorite_for(&self, conn: &impl ConnectionMethods, user_id: i64) -> Result<Option<Favorite>> {
        Favorite::for_post_and_user(conn, self.id()?, user_id)
    }

    pub fn favorites(&self, conn: &impl ConnectionMethods) -> Result<Vec<Favorite>> {
        Ok(Favorite::query()
            .filter(Favorite::POST_ID.eq(self.id()?))
            .order_asc("id")
            .load(conn)?)
    }

    /// Comments on this post, oldest first.
    pub fn comments(&self, conn: &impl ConnectionMethods) -> Result<Vec<Comment>> {
        Comment::for_post(conn, self.id()?)
    }

    pub fn flairs(&self, conn: &impl ConnectionMethods) -> Result<Vec<Flair>> {
        Flair::for_post(conn, self.id()?)
    }

    /// The topic the post belongs to, loaded on first use.
    pub fn get_topic(&self, conn: &impl ConnectionMethods) -> Result<&Topic> {
        Ok(self.topic.load(conn)?)
    }

    /// The author, loaded on first use.
    pub fn get_user(&self, conn: &impl ConnectionMethods) -> Result<&User> {
        Ok(self.user.load(conn)?)
    }
}
