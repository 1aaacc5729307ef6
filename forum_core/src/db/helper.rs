//! SQL text generation shared by the backend.
//!
//! Values never appear in the generated text: each one becomes a `?`
//! placeholder and is pushed onto the `values` list in order.

use super::Column;
use crate::query::{BoolExpr, Expr, Order, OrderDirection};
use crate::SqlVal;

/// Quotes an identifier so reserved words and mixed case survive.
pub fn quote(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Writes to `w` the SQL for `expr`, pushing its values onto `values`.
pub fn sql_for_expr(expr: Expr, values: &mut Vec<SqlVal>, w: &mut String) {
    match expr {
        Expr::Column(name) => w.push_str(&quote(name)),
        Expr::Val(v) => {
            values.push(v);
            w.push('?');
        }
        Expr::Condition(c) => sql_for_bool_expr(*c, values, w),
    }
}

fn comparison(col: &str, op: &str, ex: Expr, values: &mut Vec<SqlVal>, w: &mut String) {
    w.push_str(&quote(col));
    w.push_str(op);
    sql_for_expr(ex, values, w);
}

fn sql_for_bool_expr(expr: BoolExpr, values: &mut Vec<SqlVal>, w: &mut String) {
    match expr {
        BoolExpr::True => w.push_str("1"),
        BoolExpr::Eq(col, Expr::Val(SqlVal::Null)) => {
            w.push_str(&format!("{} IS NULL", quote(col)))
        }
        BoolExpr::Eq(col, ex) => comparison(col, " = ", ex, values, w),
        BoolExpr::Ne(col, Expr::Val(SqlVal::Null)) => {
            w.push_str(&format!("{} IS NOT NULL", quote(col)))
        }
        BoolExpr::Ne(col, ex) => comparison(col, " <> ", ex, values, w),
        BoolExpr::Lt(col, ex) => comparison(col, " < ", ex, values, w),
        BoolExpr::Gt(col, ex) => comparison(col, " > ", ex, values, w),
        BoolExpr::Le(col, ex) => comparison(col, " <= ", ex, values, w),
        BoolExpr::Ge(col, ex) => comparison(col, " >= ", ex, values, w),
        BoolExpr::Like(col, ex) => comparison(col, " LIKE ", ex, values, w),
        BoolExpr::AllOf(conds) => {
            if conds.is_empty() {
                w.push('1');
                return;
            }
            for (idx, cond) in conds.into_iter().enumerate() {
                if idx > 0 {
                    w.push_str(" AND ");
                }
                w.push('(');
                sql_for_bool_expr(cond, values, w);
                w.push(')');
            }
        }
        BoolExpr::And(a, b) => {
            w.push('(');
            sql_for_bool_expr(*a, values, w);
            w.push_str(") AND (");
            sql_for_bool_expr(*b, values, w);
            w.push(')');
        }
        BoolExpr::Or(a, b) => {
            w.push('(');
            sql_for_bool_expr(*a, values, w);
            w.push_str(") OR (");
            sql_for_bool_expr(*b, values, w);
            w.push(')');
        }
        BoolExpr::Not(a) => {
            w.push_str("NOT (");
            sql_for_bool_expr(*a, values, w);
            w.push(')');
        }
        BoolExpr::In(col, vals) => {
            if vals.is_empty() {
                // An empty IN list matches nothing.
                w.push('0');
                return;
            }
            w.push_str(&quote(col));
            w.push_str(" IN (");
            let placeholders = vec!["?"; vals.len()].join(", ");
            w.push_str(&placeholders);
            w.push(')');
            values.extend(vals);
        }
    }
}

/// Writes to `w` a SELECT of `columns` from `table`.
pub fn sql_select(columns: &[Column], table: &str, w: &mut String) {
    w.push_str("SELECT ");
    list_columns(columns, w);
    w.push_str(" FROM ");
    w.push_str(&quote(table));
}

/// Writes the WHERE clause for `expr`, if any.
pub fn sql_where(expr: Option<BoolExpr>, values: &mut Vec<SqlVal>, w: &mut String) {
    if let Some(expr) = expr {
        w.push_str(" WHERE ");
        sql_for_bool_expr(expr, values, w);
    }
}

/// Writes the ORDER BY clause for `order`.
pub fn sql_order(order: &[Order], w: &mut String) {
    w.push_str(" ORDER BY ");
    let terms: Vec<String> = order
        .iter()
        .map(|o| {
            let direction = match o.direction {
                OrderDirection::Ascending => "ASC",
                OrderDirection::Descending => "DESC",
            };
            format!("{} {}", quote(o.column), direction)
        })
        .collect();
    w.push_str(&terms.join(", "));
}

/// Writes the LIMIT/OFFSET clause. SQLite only accepts OFFSET after a
/// LIMIT, so an offset without a limit uses `LIMIT -1`.
pub fn sql_limit_offset(limit: Option<i32>, offset: Option<i32>, w: &mut String) {
    match (limit, offset) {
        (Some(limit), Some(offset)) => w.push_str(&format!(" LIMIT {limit} OFFSET {offset}")),
        (Some(limit), None) => w.push_str(&format!(" LIMIT {limit}")),
        (None, Some(offset)) => w.push_str(&format!(" LIMIT -1 OFFSET {offset}")),
        (None, None) => (),
    }
}

/// Writes to `w` an INSERT of `columns` into `table`.
pub fn sql_insert_with_placeholders(table: &str, columns: &[Column], w: &mut String) {
    w.push_str("INSERT INTO ");
    w.push_str(&quote(table));
    if columns.is_empty() {
        w.push_str(" DEFAULT VALUES");
        return;
    }
    w.push_str(" (");
    list_columns(columns, w);
    w.push_str(") VALUES (");
    w.push_str(&vec!["?"; columns.len()].join(", "));
    w.push(')');
}

/// Writes to `w` the SQL of an UPDATE to `table` of `columns`,
/// for the row uniquely identified by `pkcol`. The primary key value is
/// the last placeholder.
pub fn sql_update_with_placeholders(table: &str, pkcol: &str, columns: &[Column], w: &mut String) {
    w.push_str("UPDATE ");
    w.push_str(&quote(table));
    w.push_str(" SET ");
    let assignments: Vec<String> = columns
        .iter()
        .map(|c| format!("{} = ?", quote(c.name())))
        .collect();
    w.push_str(&assignments.join(", "));
    w.push_str(&format!(" WHERE {} = ?", quote(pkcol)));
}

/// Writes the comma-separated, quoted names of `columns`.
pub fn list_columns(columns: &[Column], w: &mut String) {
    let names: Vec<String> = columns.iter().map(|c| quote(c.name())).collect();
    w.push_str(&names.join(", "));
}
