use chrono::NaiveDateTime;
use forum_core::db::ConnectionMethods;
use forum_core::impl_model;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{now, Post};
use crate::{AutoPk, DataObject, DataObjectOps, DataResult, Result};

/// A category of posts.
#[derive(Clone, Debug, PartialEq)]
pub struct Topic {
    pub id: AutoPk<i64>,
    pub title: String,
    pub description: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
impl_model!(Topic, table = "topics", fields {
    title: String => "title",
    description: String => "description",
    created_at: NaiveDateTime => "created_at",
    updated_at: NaiveDateTime => "updated_at",
});

/// Submitted fields for creating or editing a [`Topic`].
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct TopicForm {
    #[validate(length(min = 5, message = "Topic.title must be at least 5 characters"))]
    pub title: String,
    #[validate(length(min = 10, message = "Topic.description must be at least 10 characters"))]
    pub description: String,
}

impl From<&Topic> for TopicForm {
    fn from(topic: &Topic) -> Self {
        TopicForm {
            title: topic.title.clone(),
            description: topic.description.clone(),
        }
    }
}

impl Topic {
    pub fn create(conn: &impl ConnectionMethods, form: &TopicForm) -> Result<Topic> {
        form.validate()?;
        let now = now();
        let mut topic = Topic {
            id: AutoPk::uninitialized(),
            title: form.title.clone(),
            description: form.description.clone(),
            created_at: now,
            updated_at: now,
        };
        topic.save(conn)?;
        Ok(topic)
    }

    /// Every topic, oldest first.
    pub fn all(conn: &impl ConnectionMethods) -> Result<Vec<Topic>> {
        Ok(Topic::query().order_asc("id").load(conn)?)
    }

    pub fn find(conn: &impl ConnectionMethods, id: i64) -> Result<Option<Topic>> {
        Ok(Topic::try_get(conn, id)?)
    }

    pub fn count(conn: &impl ConnectionMethods) -> Result<i64> {
        Ok(Topic::query().count(conn)?)
    }

    /// Replace the title and description. Nothing is written if the
    /// form is invalid.
    pub fn update(&mut self, conn: &impl ConnectionMethods, form: &TopicForm) -> Result<()> {
        form.validate()?;
        self.title = form.title.clone();
        self.description = form.description.clone();
        self.updated_at = now();
        self.save(conn)?;
        Ok(())
    }

    /// Posts in this topic, oldest first.
    pub fn posts(&self, conn: &impl ConnectionMethods) -> Result<Vec<Post>> {
        Post::for_topic(conn, self.id()?)
    }
}
