//! Typed column references used to build filters.
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;

use crate::query::{BoolExpr, Expr};
use crate::ToSql;

/// Used to implement the filters on a model's columns.
///
/// `T` is the rust type of the values compared against the column.
pub struct FieldExpr<T> {
    name: &'static str,
    phantom: PhantomData<T>,
}

macro_rules! binary_op {
    ($func_name:ident, $bool_expr:ident) => {
        /// Compare the column against `val`.
        pub fn $func_name(&self, val: impl Into<T>) -> BoolExpr {
            BoolExpr::$bool_expr(self.name, Expr::Val(val.into().into_sql()))
        }
    };
}

impl<T> FieldExpr<T>
where
    T: ToSql,
{
    /// Reference the column `name`.
    pub const fn new(name: &'static str) -> Self {
        FieldExpr {
            name,
            phantom: PhantomData,
        }
    }

    /// The column name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    binary_op!(eq, Eq);
    binary_op!(ne, Ne);
    binary_op!(lt, Lt);
    binary_op!(gt, Gt);
    binary_op!(le, Le);
    binary_op!(ge, Ge);

    /// True when the column holds one of `vals`.
    pub fn is_in(&self, vals: impl IntoIterator<Item = T>) -> BoolExpr {
        BoolExpr::In(
            self.name,
            vals.into_iter().map(ToSql::into_sql).collect(),
        )
    }
}

impl FieldExpr<String> {
    /// SQL `LIKE` against `pattern`.
    pub fn like(&self, pattern: impl Into<String>) -> BoolExpr {
        BoolExpr::Like(self.name, Expr::Val(pattern.into().into_sql()))
    }
}

impl<T> Debug for FieldExpr<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldExpr")
            .field("name", &self.name)
            .finish()
    }
}
