//! Contains the [AutoPk] type for autoincrementing primary keys.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use super::{Error, FieldType, FromSql, PrimaryKeyType, Result, SqlType, SqlVal, ToSql};

/// Wrapper around a [PrimaryKeyType] to indicate the the primary key
/// will be initialized automatically when the object is created in
/// the database.
/// Dereferences to an `Option<T>`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AutoPk<T: PrimaryKeyType> {
    inner: Option<T>,
}

impl<T: PrimaryKeyType> AutoPk<T> {
    /// Create an uninitialized value for an object which has not yet been saved.
    pub fn uninitialized() -> Self {
        AutoPk { inner: None }
    }

    /// Create an initialized primary key value for a previously saved
    /// object. Loading from the database does this implicitly.
    pub fn with_value(val: T) -> Self {
        AutoPk { inner: Some(val) }
    }

    /// True once the database has assigned a value.
    pub fn is_valid(&self) -> bool {
        self.inner.is_some()
    }

    /// Record the value generated by the database on insert.
    pub(crate) fn initialize(&mut self, val: SqlVal) -> Result<()> {
        if self.inner.is_some() {
            return Err(Error::AlreadyInitialized);
        }
        self.inner = Some(T::from_sql(val)?);
        Ok(())
    }
}

impl<T: PrimaryKeyType> Default for AutoPk<T> {
    fn default() -> Self {
        Self::uninitialized()
    }
}

impl<T: PrimaryKeyType> Deref for AutoPk<T> {
    type Target = Option<T>;
    fn deref(&self) -> &Option<T> {
        &self.inner
    }
}

impl<T: PrimaryKeyType> FromSql for AutoPk<T> {
    fn from_sql(val: SqlVal) -> Result<Self> {
        Ok(AutoPk::with_value(T::from_sql(val)?))
    }
}

impl<T: PrimaryKeyType> ToSql for AutoPk<T> {
    /// An uninitialized key converts to `NULL`.
    fn to_sql(&self) -> SqlVal {
        self.inner.to_sql()
    }
}

impl<T: PrimaryKeyType> PartialEq for AutoPk<T> {
    fn eq(&self, other: &AutoPk<T>) -> bool {
        if !self.is_valid() || !other.is_valid() {
            false
        } else {
            self.inner.eq(&other.inner)
        }
    }
}

impl<T: PrimaryKeyType> FieldType for AutoPk<T> {
    const SQLTYPE: SqlType = T::SQLTYPE;
}

impl<T: PrimaryKeyType + std::fmt::Display> std::fmt::Display for AutoPk<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        match &self.inner {
            Some(val) => std::fmt::Display::fmt(val, f),
            None => write!(f, "UNINITIALIZED"),
        }
    }
}

impl<T: PrimaryKeyType + Copy> Copy for AutoPk<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use test_log::test;

    #[test]
    fn initialize_once() {
        let mut pk = AutoPk::<i64>::uninitialized();
        assert!(!pk.is_valid());
        assert_eq!(pk.to_sql(), SqlVal::Null);
        pk.initialize(SqlVal::BigInt(3)).unwrap();
        assert_eq!(*pk, Some(3));
        assert_eq!(pk.to_string(), "3");
        assert_matches!(
            pk.initialize(SqlVal::BigInt(4)),
            Err(Error::AlreadyInitialized)
        );
    }

    #[test]
    fn unsaved_keys_never_compare_equal() {
        let a = AutoPk::<i64>::uninitialized();
        let b = AutoPk::<i64>::uninitialized();
        assert_ne!(a, b);
        assert_eq!(AutoPk::with_value(1i64), AutoPk::with_value(1i64));
    }

    #[test]
    fn display_forwards_to_value() {
        assert_eq!(format!("{:>4}", AutoPk::with_value(42i64)), "  42");
        assert_eq!(AutoPk::<i64>::uninitialized().to_string(), "UNINITIALIZED");
    }
}
