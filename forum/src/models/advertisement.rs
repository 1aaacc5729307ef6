use chrono::NaiveDateTime;
use forum_core::db::ConnectionMethods;
use forum_core::impl_model;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::now;
use crate::{AutoPk, DataObjectOps, DataResult, Result};

/// Sponsored content shown alongside the forum. Not related to any
/// other model.
#[derive(Clone, Debug, PartialEq)]
pub struct Advertisement {
    pub id: AutoPk<i64>,
    pub title: String,
    pub description: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
impl_model!(Advertisement, table = "advertisements", fields {
    title: String => "title",
    description: String => "description",
    created_at: NaiveDateTime => "created_at",
    updated_at: NaiveDateTime => "updated_at",
});

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct AdvertisementForm {
    #[validate(length(min = 2, message = "Advertisement.title must be at least 2 characters"))]
    pub title: String,
    #[validate(length(
        min = 10,
        message = "Advertisement.description must be at least 10 characters"
    ))]
    pub description: String,
}

impl From<&Advertisement> for AdvertisementForm {
    fn from(ad: &Advertisement) -> Self {
        AdvertisementForm {
            title: ad.title.clone(),
            description: ad.description.clone(),
        }
    }
}

impl Advertisement {
    pub fn create(conn: &impl ConnectionMethods, form: &AdvertisementForm) -> Result<Advertisement> {
        form.validate()?;
        let now = now();
        let mut ad = Advertisement {
            id: AutoPk::uninitialized(),
            title: form.title.clone(),
            description: form.description.clone(),
            created_at: now,
            updated_at: now,
        };
        ad.save(conn)?;
        Ok(ad)
    }

    pub fn all(conn: &impl ConnectionMethods) -> Result<Vec<Advertisement>> {
        Ok(Advertisement::query().order_asc("id").load(conn)?)
    }

    pub fn find(conn: &impl ConnectionMethods, id: i64) -> Result<Option<Advertisement>> {
        Ok(Advertisement::try_get(conn, id)?)
    }

    pub fn count(conn: &impl ConnectionMethods) -> Result<i64> {
        Ok(Advertisement::query().count(conn)?)
    }

    pub fn update(&mut self, conn: &impl ConnectionMethods, form: &AdvertisementForm) -> Result<()> {
        form.validate()?;
        self.title = form.title.clone();
        self.description = form.description.clone();
        self.updated_at = now();
        self.save(conn)?;
        Ok(())
    }
}
