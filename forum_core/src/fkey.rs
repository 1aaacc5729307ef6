//! Implementation of foreign key relationships between models.
use std::fmt::Debug;
use std::sync::OnceLock;

use serde::{Serialize, Serializer};

use crate::db::ConnectionMethods;
use crate::util::get_or_init_once_lock;
use crate::{DataObject, DataObjectOps, Error, FieldType, FromSql, Result, SqlType, SqlVal, ToSql};

/// Used to implement a relationship between models.
///
/// Holds the primary key of the referenced object and caches the
/// object itself the first time it is loaded.
///
/// # Examples
/// ```ignore
/// struct Post {
///   topic: ForeignKey<Topic>,
///   ...
/// }
/// let topic = post.topic.load(&conn)?;
/// ```
#[derive(Clone, Debug)]
pub struct ForeignKey<T>
where
    T: DataObject,
{
    pk: i64,
    val: OnceLock<Box<T>>,
}

impl<T: DataObject> ForeignKey<T> {
    /// Create a value from the primary key of the referenced object.
    pub fn from_pk(pk: i64) -> Self {
        ForeignKey {
            pk,
            val: OnceLock::new(),
        }
    }

    /// Create a value referencing a saved object, without caching it.
    ///
    /// Returns `Error::ValueNotSaved` if the object has no primary key yet.
    pub fn for_object(obj: &T) -> Result<Self> {
        Ok(Self::from_pk(obj.id()?))
    }

    /// Create a value referencing a saved object and cache the object.
    pub fn loaded(obj: T) -> Result<Self> {
        let ret = Self::from_pk(obj.id()?);
        let _ = ret.val.set(Box::new(obj));
        Ok(ret)
    }

    /// The primary key of the referenced object.
    pub fn pk(&self) -> i64 {
        self.pk
    }

    /// Return a reference to the value, that must have already been loaded.
    ///
    /// If not already loaded, returns Error::ValueNotLoaded.
    pub fn get(&self) -> Result<&T> {
        self.val
            .get()
            .map(|v| v.as_ref())
            .ok_or(Error::ValueNotLoaded)
    }

    /// Loads the value referred to by this foreign key from the
    /// database if necessary and returns a reference to it.
    pub fn load<'a>(&'a self, conn: &impl ConnectionMethods) -> Result<&'a T> {
        get_or_init_once_lock(&self.val, || T::get(conn, self.pk).map(Box::new)).map(|v| v.as_ref())
    }
}

impl<T: DataObject> PartialEq for ForeignKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.pk == other.pk
    }
}

impl<T: DataObject> Eq for ForeignKey<T> {}

impl<T: DataObject> ToSql for ForeignKey<T> {
    fn to_sql(&self) -> SqlVal {
        SqlVal::BigInt(self.pk)
    }
}

impl<T: DataObject> FromSql for ForeignKey<T> {
    fn from_sql(val: SqlVal) -> Result<Self> {
        Ok(Self::from_pk(i64::from_sql(val)?))
    }
}

impl<T: DataObject> FieldType for ForeignKey<T> {
    const SQLTYPE: SqlType = SqlType::BigInt;
}

impl<T: DataObject> Serialize for ForeignKey<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.pk)
    }
}
