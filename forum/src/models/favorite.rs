use chrono::NaiveDateTime;
use forum_core::db::ConnectionMethods;
use forum_core::impl_model;
use forum_core::query::FieldExpr;
use serde::Deserialize;
use validator::Validate;

use super::{now, require_existing, Post, User};
use crate::{AutoPk, DataObjectOps, DataResult, ForeignKey, Result, ValidationError};

/// A user's bookmark of a post.
///
/// A favorite always refers to exactly one post and one user. Either
/// side can be swapped with [`Favorite::set_user`] and
/// [`Favorite::set_post`].
#[derive(Clone, Debug)]
pub struct Favorite {
    pub id: AutoPk<i64>,
    pub post: ForeignKey<Post>,
    pub user: ForeignKey<User>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
impl_model!(Favorite, table = "favorites", fields {
    post: ForeignKey<Post> => "post_id",
    user: ForeignKey<User> => "user_id",
    created_at: NaiveDateTime => "created_at",
    updated_at: NaiveDateTime => "updated_at",
});

/// Input for [`Favorite::create`].
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct NewFavorite {
    #[validate(required(message = "Favorite.userId cannot be null"))]
    pub user_id: Option<i64>,
    #[validate(required(message = "Favorite.postId cannot be null"))]
    pub post_id: Option<i64>,
}

impl Favorite {
    pub const POST_ID: FieldExpr<i64> = FieldExpr::new("post_id");
    pub const USER_ID: FieldExpr<i64> = FieldExpr::new("user_id");

    /// Store a favorite. Fails validation, naming every missing id,
    /// before anything is written.
    pub fn create(conn: &impl ConnectionMethods, new_favorite: &NewFavorite) -> Result<Favorite> {
        new_favorite.validate()?;
        let (Some(user_id), Some(post_id)) = (new_favorite.user_id, new_favorite.post_id) else {
            return Err(ValidationError::new("user_id", "Favorite.userId cannot be null").into());
        };
        require_existing::<Post>(
            conn,
            post_id,
            "post_id",
            "Favorite.postId must refer to an existing post",
        )?;
        require_existing::<User>(
            conn,
            user_id,
            "user_id",
            "Favorite.userId must refer to an existing user",
        )?;
        let now = now();
        let mut favorite = Favorite {
            id: AutoPk::uninitialized(),
            post: ForeignKey::from_pk(post_id),
            user: ForeignKey::from_pk(user_id),
            created_at: now,
            updated_at: now,
        };
        favorite.save(conn)?;
        Ok(favorite)
    }

    pub fn find(conn: &impl ConnectionMethods, id: i64) -> Result<Option<Favorite>> {
        Ok(Favorite::try_get(conn, id)?)
    }

    /// The favorite `user_id` holds on `post_id`, if any.
    pub fn for_post_and_user(
        conn: &impl ConnectionMethods,
        post_id: i64,
        user_id: i64,
    ) -> Result<Option<Favorite>> {
        Ok(Favorite::query()
            .filter(Favorite::POST_ID.eq(post_id))
            .filter(Favorite::USER_ID.eq(user_id))
            .order_asc("id")
            .load_first(conn)?)
    }

    /// Point the favorite at `user` and persist the change.
    pub fn set_user(mut self, conn: &impl ConnectionMethods, user: &User) -> Result<Favorite> {
        self.user = ForeignKey::loaded(user.clone())?;
        self.updated_at = now();
        self.save(conn)?;
        Ok(self)
    }

    /// Point the favorite at `post` and persist the change.
    pub fn set_post(mut self, conn: &impl ConnectionMethods, post: &Post) -> Result<Favorite> {
        self.post = ForeignKey::loaded(post.clone())?;
        self.updated_at = now();
        self.save(conn)?;
        Ok(self)
    }

    pub fn get_user(&self, conn: &impl ConnectionMethods) -> Result<&User> {
        Ok(self.user.load(conn)?)
    }

    pub fn get_post(&self, conn: &impl ConnectionMethods) -> Result<&Post> {
        Ok(self.post.load(conn)?)
    }

    pub fn user_id(&self) -> i64 {
        self.user.pk()
    }

    pub fn post_id(&self) -> i64 {
        self.post.pk()
    }

    pub fn destroy(&self, conn: &impl ConnectionMethods) -> Result<()> {
        self.delete(conn)?;
        Ok(())
    }
}
