//! A discussion forum: topics hold posts, posts collect comments,
//! votes, flairs and favorites, and advertisements live on their own.
//!
//! Each model is a plain struct persisted through the `forum_core`
//! data layer. Parent/child relationships are enforced by the schema
//! in [`schema`]: deleting a topic or a user removes everything that
//! belongs to it.

pub use forum_core::fkey::ForeignKey;
pub use forum_core::query;
pub use forum_core::{AutoPk, DataObject, DataObjectOps, DataResult, SqlVal};

pub mod db {
    //! Database helpers
    pub use forum_core::db::*;
}

pub mod error;
pub mod models;
pub mod schema;
pub mod validation;

pub use error::{Error, Result};
pub use validation::{FieldError, ValidationError};

pub mod prelude {
    //! Prelude module to improve ergonomics.
    #[doc(no_inline)]
    pub use crate::DataObject;
    #[doc(no_inline)]
    pub use crate::DataObjectOps;
    #[doc(no_inline)]
    pub use crate::DataResult;
    pub use forum_core::db::{BackendConnection, ConnectionMethods};
}
