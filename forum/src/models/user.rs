use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use forum_core::db::ConnectionMethods;
use forum_core::query::FieldExpr;
use forum_core::{impl_model, FieldType, FromSql, SqlType, SqlVal, ToSql};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use validator::Validate;

use super::{now, Favorite, Post};
use crate::{AutoPk, DataObject, DataObjectOps, DataResult, Result, ValidationError};

/// What a user may do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Member,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, ThisError, PartialEq, Eq)]
#[error("No role named '{0}'")]
pub struct ParseRoleError(String);

impl FromStr for Role {
    type Err = ParseRoleError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "member" => Ok(Role::Member),
            "admin" => Ok(Role::Admin),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

impl ToSql for Role {
    fn to_sql(&self) -> SqlVal {
        SqlVal::Text(self.as_str().to_string())
    }
}

impl FromSql for Role {
    fn from_sql(val: SqlVal) -> forum_core::Result<Self> {
        val.text()?
            .parse()
            .map_err(|_| forum_core::Error::CannotConvertSqlVal(SqlType::Text, val.clone()))
    }
}

impl FieldType for Role {
    const SQLTYPE: SqlType = SqlType::Text;
}

/// A forum account. The password is only ever stored as a bcrypt hash.
#[derive(Clone, Debug)]
pub struct User {
    pub id: AutoPk<i64>,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
impl_model!(User, table = "users", fields {
    email: String => "email",
    password_hash: String => "password_hash",
    role: Role => "role",
    created_at: NaiveDateTime => "created_at",
    updated_at: NaiveDateTime => "updated_at",
});

/// Input for [`User::create`].
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct NewUser {
    #[validate(email(message = "User.email must be a valid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "User.password must be at least 6 characters"))]
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

impl User {
    pub const EMAIL: FieldExpr<String> = FieldExpr::new("email");

    /// Create a user, hashing the password with the default bcrypt cost.
    pub fn create(conn: &impl ConnectionMethods, new_user: &NewUser) -> Result<User> {
        Self::create_with_cost(conn, new_user, bcrypt::DEFAULT_COST)
    }

    /// Create a user, hashing the password with bcrypt at `cost`.
    pub fn create_with_cost(
        conn: &impl ConnectionMethods,
        new_user: &NewUser,
        cost: u32,
    ) -> Result<User> {
        new_user.validate()?;
        let now = now();
        let mut user = User {
            id: AutoPk::uninitialized(),
            email: new_user.email.clone(),
            password_hash: bcrypt::hash(&new_user.password, cost)?,
            role: new_user.role,
            created_at: now,
            updated_at: now,
        };
        match user.save(conn) {
            Ok(()) => {}
            Err(e) if e.is_constraint_violation() => {
                return Err(ValidationError::new("email", "User.email must be unique").into())
            }
            Err(e) => return Err(e.into()),
        }
        debug!("created user {} as {}", user.email, user.role);
        Ok(user)
    }

    pub fn find(conn: &impl ConnectionMethods, id: i64) -> Result<Option<User>> {
        Ok(User::try_get(conn, id)?)
    }

    pub fn find_by_email(conn: &impl ConnectionMethods, email: &str) -> Result<Option<User>> {
        Ok(User::query()
            .filter(User::EMAIL.eq(email))
            .load_first(conn)?)
    }

    /// Check `password` against the stored hash.
    pub fn verify_password(&self, password: &str) -> Result<bool> {
        Ok(bcrypt::verify(password, &self.password_hash)?)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Posts written by this user, oldest first.
    pub fn posts(&self, conn: &impl ConnectionMethods) -> Result<Vec<Post>> {
        Ok(Post::query()
            .filter(Post::USER_ID.eq(self.id()?))
            .order_asc("id")
            .load(conn)?)
    }

    /// Posts this user has favorited.
    pub fn favorites(&self, conn: &impl ConnectionMethods) -> Result<Vec<Favorite>> {
        Ok(Favorite::query()
            .filter(Favorite::USER_ID.eq(self.id()?))
            .order_asc("id")
            .load(conn)?)
    }
}
