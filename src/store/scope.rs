// src/store/scope.rs
//
// Composable query scopes. Each scope is a small tagged value; an ordered
// list of them is folded left-to-right into a single SELECT statement by
// `ScopedQuery`. Filters are pure WHERE additions and therefore
// order-independent in effect; `Load` never touches the WHERE clause (it
// only asks the caller to preload a relation), so it can never restrict
// the row count of the primary query.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, SqlitePool};

/// Comparison operators supported by `Scope::Filter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
  Eq,
  Gt,
  /// SQL `LIKE`; the bound argument is wrapped in `%…%` at build time.
  Like,
}

/// A bindable filter argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
  Int(i64),
  Real(f64),
  Text(String),
}

/// Named relations the services know how to eager-load with a follow-up
/// grouped query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
  CartItems,
  CategoryProducts,
  UserCarts,
  ItemProduct,
}

/// One composable query fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Scope {
  /// Restrict to rows whose soft-delete timestamp is unset.
  Active,
  Filter { column: &'static str, op: Op, arg: Arg },
  /// Inclusive numeric range (SQL `BETWEEN`).
  Between { column: &'static str, min: f64, max: f64 },
  /// Eager-load marker; payload shape only, never row count.
  Load(Relation),
}

/// Builder that folds an ordered scope list into one statement.
#[derive(Debug)]
pub struct ScopedQuery {
  table: &'static str,
  columns: &'static str,
  order_by: &'static str,
  scopes: Vec<Scope>,
}

impl ScopedQuery {
  pub fn new(table: &'static str, columns: &'static str) -> Self {
    Self {
      table,
      columns,
      order_by: "id",
      scopes: Vec::new(),
    }
  }

  pub fn scope(mut self, scope: Scope) -> Self {
    self.scopes.push(scope);
    self
  }

  pub fn order_by(mut self, column: &'static str) -> Self {
    self.order_by = column;
    self
  }

  /// Whether the scope list asks for `relation` to be preloaded.
  pub fn wants(&self, relation: Relation) -> bool {
    self
      .scopes
      .iter()
      .any(|s| matches!(s, Scope::Load(r) if *r == relation))
  }

  /// Fold the scopes into SQL plus the positional bind arguments.
  fn build(&self) -> (String, Vec<Arg>) {
    let mut sql = format!("SELECT {} FROM {}", self.columns, self.table);
    let mut args = Vec::new();
    let mut clauses = Vec::new();

    for scope in &self.scopes {
      match scope {
        Scope::Active => clauses.push("deleted_at IS NULL".to_string()),
        Scope::Filter { column, op, arg } => {
          let operator = match op {
            Op::Eq => "=",
            Op::Gt => ">",
            Op::Like => "LIKE",
          };
          clauses.push(format!("{} {} ?", column, operator));
          match (op, arg) {
            (Op::Like, Arg::Text(s)) => args.push(Arg::Text(format!("%{}%", s))),
            (_, other) => args.push(other.clone()),
          }
        }
        Scope::Between { column, min, max } => {
          clauses.push(format!("{} BETWEEN ? AND ?", column));
          args.push(Arg::Real(*min));
          args.push(Arg::Real(*max));
        }
        Scope::Load(_) => {} // handled by the caller after the primary query
      }
    }

    if !clauses.is_empty() {
      sql.push_str(" WHERE ");
      sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY ");
    sql.push_str(self.order_by);
    sql.push_str(" ASC");

    (sql, args)
  }

  /// Execute the folded statement and map every row to `T`.
  pub async fn fetch_all<T>(&self, pool: &SqlitePool) -> sqlx::Result<Vec<T>>
  where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
  {
    let (sql, args) = self.build();
    tracing::debug!(query = %sql, "Executing scoped query");

    let mut query = sqlx::query_as::<_, T>(&sql);
    for arg in args {
      query = match arg {
        Arg::Int(v) => query.bind(v),
        Arg::Real(v) => query.bind(v),
        Arg::Text(v) => query.bind(v),
      };
    }
    query.fetch_all(pool).await
  }
}
