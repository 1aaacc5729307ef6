//! Values which may be stored in or read from the database.
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{Error::CannotConvertSqlVal, Result};

/// Column types understood by the data layer.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum SqlType {
    /// 4-byte signed integer.
    Int,
    /// 8-byte signed integer.
    BigInt,
    /// String.
    Text,
    /// Date and time without a timezone, stored as UTC.
    Timestamp,
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SqlType::Int => "int",
            SqlType::BigInt => "big int",
            SqlType::Text => "string",
            SqlType::Timestamp => "timestamp",
        };
        f.write_str(name)
    }
}

/// A database value.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum SqlVal {
    /// SQL `NULL`.
    Null,
    /// 4-byte signed integer.
    Int(i32),
    /// 8-byte signed integer.
    BigInt(i64),
    /// String.
    Text(String),
    /// Date and time without a timezone.
    Timestamp(NaiveDateTime),
}

impl SqlVal {
    /// Returns true if the value is `NULL`.
    pub fn is_null(&self) -> bool {
        matches!(self, SqlVal::Null)
    }

    /// Interpret the value as an integer of either width.
    pub fn integer(&self) -> Result<i64> {
        match self {
            SqlVal::Int(i) => Ok(i64::from(*i)),
            SqlVal::BigInt(i) => Ok(*i),
            _ => Err(CannotConvertSqlVal(SqlType::BigInt, self.clone())),
        }
    }

    /// Interpret the value as a string slice.
    pub fn text(&self) -> Result<&str> {
        match self {
            SqlVal::Text(s) => Ok(s),
            _ => Err(CannotConvertSqlVal(SqlType::Text, self.clone())),
        }
    }
}

impl fmt::Display for SqlVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlVal::Null => f.write_str("NULL"),
            SqlVal::Int(v) => v.fmt(f),
            SqlVal::BigInt(v) => v.fmt(f),
            SqlVal::Text(v) => f.write_str(v),
            SqlVal::Timestamp(v) => v.fmt(f),
        }
    }
}

/// Used to convert another type to a `SqlVal`.
pub trait ToSql {
    /// Convert the value, leaving the original in place.
    fn to_sql(&self) -> SqlVal;

    /// Convert the value, consuming it.
    fn into_sql(self) -> SqlVal
    where
        Self: Sized,
    {
        self.to_sql()
    }
}

/// Used to convert a `SqlVal` into another type.
pub trait FromSql: Sized {
    /// Convert the value. The `SqlVal` is consumed.
    fn from_sql(val: SqlVal) -> Result<Self>;
}

/// Type suitable for being a database column.
pub trait FieldType: ToSql + FromSql {
    /// The column type this value is stored as.
    const SQLTYPE: SqlType;
}

/// Marker trait for a type suitable for being a primary key.
pub trait PrimaryKeyType: FieldType + Clone + fmt::Debug + PartialEq + Send + Sync + 'static {}

macro_rules! impl_prim_sql {
    ($prim:ty, $variant:ident, $sqltype:ident) => {
        impl ToSql for $prim {
            fn to_sql(&self) -> SqlVal {
                SqlVal::$variant(self.clone())
            }
            fn into_sql(self) -> SqlVal {
                SqlVal::$variant(self)
            }
        }
        impl FieldType for $prim {
            const SQLTYPE: SqlType = SqlType::$sqltype;
        }
    };
}

impl_prim_sql!(i32, Int, Int);
impl_prim_sql!(i64, BigInt, BigInt);
impl_prim_sql!(String, Text, Text);
impl_prim_sql!(NaiveDateTime, Timestamp, Timestamp);

impl PrimaryKeyType for i32 {}
impl PrimaryKeyType for i64 {}

impl FromSql for i32 {
    fn from_sql(val: SqlVal) -> Result<Self> {
        match val {
            SqlVal::Int(i) => Ok(i),
            SqlVal::BigInt(i) => i32::try_from(i).map_err(|_| crate::Error::OutOfRange),
            _ => Err(CannotConvertSqlVal(SqlType::Int, val)),
        }
    }
}

impl FromSql for i64 {
    fn from_sql(val: SqlVal) -> Result<Self> {
        val.integer()
    }
}

impl FromSql for String {
    fn from_sql(val: SqlVal) -> Result<Self> {
        match val {
            SqlVal::Text(s) => Ok(s),
            _ => Err(CannotConvertSqlVal(SqlType::Text, val)),
        }
    }
}

impl FromSql for NaiveDateTime {
    fn from_sql(val: SqlVal) -> Result<Self> {
        match val {
            SqlVal::Timestamp(ts) => Ok(ts),
            _ => Err(CannotConvertSqlVal(SqlType::Timestamp, val)),
        }
    }
}

impl ToSql for str {
    fn to_sql(&self) -> SqlVal {
        SqlVal::Text(self.to_string())
    }
}

impl<T> ToSql for &T
where
    T: ToSql + ?Sized,
{
    fn to_sql(&self) -> SqlVal {
        (**self).to_sql()
    }
}

impl<T> ToSql for Option<T>
where
    T: ToSql,
{
    fn to_sql(&self) -> SqlVal {
        match self {
            None => SqlVal::Null,
            Some(v) => v.to_sql(),
        }
    }
}

impl<T> FromSql for Option<T>
where
    T: FromSql,
{
    fn from_sql(val: SqlVal) -> Result<Self> {
        Ok(match val {
            SqlVal::Null => None,
            _ => Some(T::from_sql(val)?),
        })
    }
}

impl<T> FieldType for Option<T>
where
    T: FieldType,
{
    const SQLTYPE: SqlType = T::SQLTYPE;
}
