//! Select-query builder and pagination window math
//!
//! Endpoints build a [`SelectQuery`] from their recognized query
//! parameters; the store adapter translates it to the wire. Filters are a
//! fixed set of equality predicates per endpoint, never an expression
//! language, and ordering is declared by the endpoint, not the client.

use serde_json::Value;

/// Value of an equality predicate
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Int(i64),
    Text(String),
}

impl FilterValue {
    /// Render the value the way the store's query string expects it
    pub fn to_wire(&self) -> String {
        match self {
            Self::Int(v) => v.to_string(),
            Self::Text(v) => v.clone(),
        }
    }

    /// Check a JSON cell against this predicate
    pub fn matches(&self, cell: &Value) -> bool {
        match self {
            Self::Int(v) => cell.as_i64() == Some(*v),
            Self::Text(v) => cell.as_str() == Some(v.as_str()),
        }
    }
}

/// Equality predicate on a store column
///
/// The column may be a dotted path into an embedded relation
/// (e.g. `dim_locais.nome_local`) for join-based selects.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: FilterValue,
}

/// Fixed ordering declared by an endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub column: String,
    pub descending: bool,
}

/// Compute the zero-indexed inclusive `[start, end]` row window for a page.
///
/// `page` and `per_page` are clamped to a minimum of 1; `per_page` has no
/// upper bound (known permissiveness, kept on purpose), so the window math
/// saturates instead of overflowing on absurd inputs.
pub fn compute_range(page: u64, per_page: u64) -> (u64, u64) {
    let page = page.max(1);
    let per_page = per_page.max(1);
    let start = (page - 1).saturating_mul(per_page);
    (start, start.saturating_add(per_page - 1))
}

/// Builder for a filtered, ordered, ranged select against one table
#[derive(Debug, Clone)]
pub struct SelectQuery {
    table: String,
    columns: String,
    filters: Vec<Filter>,
    order: Vec<OrderBy>,
    range: Option<(u64, u64)>,
    exact_count: bool,
}

impl SelectQuery {
    /// Start a select over all columns of a table
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: "*".to_string(),
            filters: Vec::new(),
            order: Vec::new(),
            range: None,
            exact_count: false,
        }
    }

    /// Override the selected columns (including embedded-relation syntax
    /// such as `*, dim_locais!inner(*)`)
    pub fn columns(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        self
    }

    /// Add an integer equality filter.
    ///
    /// `None` and `Some(0)` are both treated as "not supplied". Zero is a
    /// quirk carried over from the deployed system, where an intended
    /// filter value of 0 is silently dropped; callers rely on it.
    pub fn filter_int(mut self, column: &str, value: Option<i64>) -> Self {
        if let Some(v) = value {
            if v != 0 {
                self.filters.push(Filter {
                    column: column.to_string(),
                    value: FilterValue::Int(v),
                });
            }
        }
        self
    }

    /// Add a string equality filter. `None` and empty strings are "not supplied".
    pub fn filter_text(mut self, column: &str, value: Option<&str>) -> Self {
        if let Some(v) = value {
            if !v.is_empty() {
                self.filters.push(Filter {
                    column: column.to_string(),
                    value: FilterValue::Text(v.to_string()),
                });
            }
        }
        self
    }

    /// Append an ascending order column
    pub fn order_by(mut self, column: &str) -> Self {
        self.order.push(OrderBy {
            column: column.to_string(),
            descending: false,
        });
        self
    }

    /// Restrict to a zero-indexed inclusive row window
    pub fn range(mut self, start: u64, end: u64) -> Self {
        self.range = Some((start, end));
        self
    }

    /// Request an exact count of the filtered, pre-pagination result set
    pub fn count_exact(mut self) -> Self {
        self.exact_count = true;
        self
    }

    // Accessors for store adapters

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn selected_columns(&self) -> &str {
        &self.columns
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn ordering(&self) -> &[OrderBy] {
        &self.order
    }

    pub fn row_range(&self) -> Option<(u64, u64)> {
        self.range
    }

    pub fn wants_exact_count(&self) -> bool {
        self.exact_count
    }
}
