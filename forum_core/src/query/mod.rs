//! Types to support database queries. Models expose [`FieldExpr`]
//! constants for their filterable columns; most callers combine those
//! rather than building [`BoolExpr`] values by hand.

#![allow(missing_docs)]

use std::marker::PhantomData;

use crate::db::ConnectionMethods;
use crate::{DataObject, DataResult, Result, SqlVal};

mod fieldexpr;

pub use fieldexpr::FieldExpr;

/// Abstract representation of a database expression.
#[derive(Clone, Debug)]
pub enum Expr {
    /// A column, referenced by name.
    Column(&'static str),
    /// A value.
    Val(SqlVal),
    /// A boolean condition.
    Condition(Box<BoolExpr>),
}

/// Abstract representation of a boolean expression.
#[derive(Clone, Debug)]
pub enum BoolExpr {
    True,
    Eq(&'static str, Expr),
    Ne(&'static str, Expr),
    Lt(&'static str, Expr),
    Gt(&'static str, Expr),
    Le(&'static str, Expr),
    Ge(&'static str, Expr),
    Like(&'static str, Expr),
    AllOf(Vec<BoolExpr>),
    And(Box<BoolExpr>, Box<BoolExpr>),
    Or(Box<BoolExpr>, Box<BoolExpr>),
    Not(Box<BoolExpr>),
    In(&'static str, Vec<SqlVal>),
}

impl BoolExpr {
    /// Conjunction of `self` and `other`.
    pub fn and(self, other: BoolExpr) -> BoolExpr {
        BoolExpr::And(Box::new(self), Box::new(other))
    }

    /// Disjunction of `self` and `other`.
    pub fn or(self, other: BoolExpr) -> BoolExpr {
        BoolExpr::Or(Box::new(self), Box::new(other))
    }
}

/// Represents the direction of a sort.
#[derive(Clone, Debug)]
pub enum OrderDirection {
    Ascending,
    Descending,
}

/// Represents a sorting term (ORDER BY in SQL).
#[derive(Clone, Debug)]
pub struct Order {
    pub direction: OrderDirection,
    pub column: &'static str,
}

/// Representation of a database query.
#[derive(Clone, Debug)]
pub struct Query<T: DataResult> {
    table: &'static str,
    filter: Option<BoolExpr>,
    limit: Option<i32>,
    offset: Option<i32>,
    sort: Vec<Order>,
    phantom: PhantomData<T>,
}

impl<T: DataResult> Query<T> {
    /// Creates a query which matches all objects in `table`. The set
    /// of matched objects can be restricted with `filter` and
    /// `limit`.
    pub fn new(table: &'static str) -> Query<T> {
        Query {
            table,
            filter: None,
            limit: None,
            offset: None,
            sort: Vec::new(),
            phantom: PhantomData,
        }
    }

    /// Add a filter to the query. Any objects which do not match the
    /// filter will not be returned by the query. If the query already
    /// has a filter, both must match.
    pub fn filter(mut self, expr: BoolExpr) -> Query<T> {
        self.filter = Some(match self.filter {
            Some(existing) => existing.and(expr),
            None => expr,
        });
        self
    }

    /// Limit the query to returning at most `lim` objects.
    pub fn limit(mut self, lim: i32) -> Query<T> {
        self.limit = Some(lim);
        self
    }

    /// Skip the first `off` objects.
    pub fn offset(mut self, off: i32) -> Query<T> {
        self.offset = Some(off);
        self
    }

    /// Order the query results by the given column. Multiple calls to
    /// this method may be made, with earlier calls taking precedence.
    pub fn order(mut self, column: &'static str, direction: OrderDirection) -> Query<T> {
        self.sort.push(Order { direction, column });
        self
    }

    /// Order the query results by the given column ascending.
    pub fn order_asc(self, column: &'static str) -> Query<T> {
        self.order(column, OrderDirection::Ascending)
    }

    /// Order the query results by the given column descending.
    pub fn order_desc(self, column: &'static str) -> Query<T> {
        self.order(column, OrderDirection::Descending)
    }

    /// Executes the query against `conn` and returns all matching objects.
    pub fn load(self, conn: &impl ConnectionMethods) -> Result<Vec<T>> {
        let sort = if self.sort.is_empty() {
            None
        } else {
            Some(self.sort.as_slice())
        };
        conn.query(
            self.table,
            T::COLUMNS,
            self.filter,
            self.limit,
            self.offset,
            sort,
        )?
        .iter()
        .map(T::from_row)
        .collect()
    }

    /// Executes the query against `conn` and returns the first
    /// matching object, if any.
    pub fn load_first(self, conn: &impl ConnectionMethods) -> Result<Option<T>> {
        Ok(self.limit(1).load(conn)?.into_iter().next())
    }

    /// Number of objects matching the query.
    pub fn count(self, conn: &impl ConnectionMethods) -> Result<i64> {
        conn.count(self.table, self.filter)
    }

    /// Executes the query against `conn` and deletes all matching objects.
    pub fn delete(self, conn: &impl ConnectionMethods) -> Result<usize>
    where
        T: DataObject,
    {
        conn.delete_where(self.table, self.filter.unwrap_or(BoolExpr::True))
    }
}
