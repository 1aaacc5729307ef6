use chrono::NaiveDateTime;
use forum_core::db::ConnectionMethods;
use forum_core::impl_model;
use forum_core::query::FieldExpr;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{now, Post};
use crate::{AutoPk, DataObjectOps, DataResult, ForeignKey, Result, ValidationError};

/// A coloured label on a post.
#[derive(Clone, Debug)]
pub struct Flair {
    pub id: AutoPk<i64>,
    pub name: String,
    pub color: String,
    pub post: ForeignKey<Post>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
impl_model!(Flair, table = "flairs", fields {
    name: String => "name",
    color: String => "color",
    post: ForeignKey<Post> => "post_id",
    created_at: NaiveDateTime => "created_at",
    updated_at: NaiveDateTime => "updated_at",
});

#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct NewFlair {
    #[validate(length(min = 2, message = "Flair.name must be at least 2 characters"))]
    pub name: String,
    #[validate(length(min = 1, message = "Flair.color cannot be empty"))]
    pub color: String,
    #[validate(required(message = "Flair.postId cannot be null"))]
    pub post_id: Option<i64>,
}

/// Editable fields of a [`Flair`].
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct FlairForm {
    #[validate(length(min = 2, message = "Flair.name must be at least 2 characters"))]
    pub name: String,
    #[validate(length(min = 1, message = "Flair.color cannot be empty"))]
    pub color: String,
}

impl Flair {
    pub const POST_ID: FieldExpr<i64> = FieldExpr::new("post_id");

    pub fn create(conn: &impl ConnectionMethods, new_flair: &NewFlair) -> Result<Flair> {
        new_flair.validate()?;
        let post_id = new_flair
            .post_id
            .ok_or_else(|| ValidationError::new("post_id", "Flair.postId cannot be null"))?;
        let now = now();
        let mut flair = Flair {
            id: AutoPk::uninitialized(),
            name: new_flair.name.clone(),
            color: new_flair.color.clone(),
            post: ForeignKey::from_pk(post_id),
            created_at: now,
            updated_at: now,
        };
        flair.save(conn)?;
        Ok(flair)
    }

    pub fn find(conn: &impl ConnectionMethods, id: i64) -> Result<Option<Flair>> {
        Ok(Flair::try_get(conn, id)?)
    }

    pub fn for_post(conn: &impl ConnectionMethods, post_id: i64) -> Result<Vec<Flair>> {
        Ok(Flair::query()
            .filter(Flair::POST_ID.eq(post_id))
            .order_asc("id")
            .load(conn)?)
    }

    pub fn update(&mut self, conn: &impl ConnectionMethods, form: &FlairForm) -> Result<()> {
        form.validate()?;
        self.name = form.name.clone();
        self.color = form.color.clone();
        self.updated_at = now();
        self.save(conn)?;
        Ok(())
    }

    pub fn destroy(&self, conn: &impl ConnectionMethods) -> Result<()> {
        self.delete(conn)?;
        Ok(())
    }
}
