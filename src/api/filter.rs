//! Query construction for the table-query surface.
//!
//! Filters render to the backend's query-parameter syntax (`col=eq.v`,
//! `or=(a.ilike.*x*,b.ilike.*x*)`, `order=col.asc`, `limit=n`). Only the
//! operators the console actually uses are modeled; this is deliberately
//! not a general query DSL.

/// A single predicate on a column, or a disjunction of predicates.
#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    Eq(String, String),
    Neq(String, String),
    Gt(String, String),
    Gte(String, String),
    Lt(String, String),
    Lte(String, String),
    /// Case-insensitive substring match; the term is wrapped in wildcards.
    Ilike(String, String),
    In(String, Vec<String>),
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(column: &str, value: impl ToString) -> Self {
        Self::Eq(column.to_string(), value.to_string())
    }

    pub fn ilike(column: &str, term: &str) -> Self {
        Self::Ilike(column.to_string(), term.to_string())
    }

    /// Render as a top-level query pair.
    pub fn to_query_pair(&self) -> (String, String) {
        match self {
            Self::Eq(col, v) => (col.clone(), format!("eq.{}", sanitize(v))),
            Self::Neq(col, v) => (col.clone(), format!("neq.{}", sanitize(v))),
            Self::Gt(col, v) => (col.clone(), format!("gt.{}", sanitize(v))),
            Self::Gte(col, v) => (col.clone(), format!("gte.{}", sanitize(v))),
            Self::Lt(col, v) => (col.clone(), format!("lt.{}", sanitize(v))),
            Self::Lte(col, v) => (col.clone(), format!("lte.{}", sanitize(v))),
            Self::Ilike(col, term) => (col.clone(), format!("ilike.*{}*", sanitize(term))),
            Self::In(col, vals) => {
                let list: Vec<String> = vals.iter().map(|v| sanitize(v)).collect();
                (col.clone(), format!("in.({})", list.join(",")))
            }
            Self::Or(parts) => {
                let inner: Vec<String> = parts.iter().map(Self::render_inner).collect();
                ("or".to_string(), format!("({})", inner.join(",")))
            }
        }
    }

    /// Render in the dotted form used inside `or=(...)` lists.
    fn render_inner(&self) -> String {
        match self {
            Self::Eq(col, v) => format!("{}.eq.{}", col, sanitize(v)),
            Self::Neq(col, v) => format!("{}.neq.{}", col, sanitize(v)),
            Self::Gt(col, v) => format!("{}.gt.{}", col, sanitize(v)),
            Self::Gte(col, v) => format!("{}.gte.{}", col, sanitize(v)),
            Self::Lt(col, v) => format!("{}.lt.{}", col, sanitize(v)),
            Self::Lte(col, v) => format!("{}.lte.{}", col, sanitize(v)),
            Self::Ilike(col, term) => format!("{}.ilike.*{}*", col, sanitize(term)),
            Self::In(col, vals) => {
                let list: Vec<String> = vals.iter().map(|v| sanitize(v)).collect();
                format!("{}.in.({})", col, list.join(","))
            }
            Self::Or(parts) => {
                let inner: Vec<String> = parts.iter().map(Self::render_inner).collect();
                format!("or({})", inner.join(","))
            }
        }
    }
}

/// Commas and parentheses would break the filter list syntax, so they are
/// stripped from values before rendering.
fn sanitize(value: &str) -> String {
    value.chars().filter(|c| !matches!(c, ',' | '(' | ')')).collect()
}

/// Sort direction for an ordered select.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderBy {
    pub column: String,
    pub descending: bool,
}

/// A select against one table or view: projection, predicates, order, limit.
#[derive(Clone, Debug, Default)]
pub struct SelectQuery {
    pub columns: String,
    pub filters: Vec<Filter>,
    pub order: Option<OrderBy>,
    pub limit: Option<u32>,
}

impl SelectQuery {
    pub fn new(columns: &str) -> Self {
        Self {
            columns: columns.to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    #[must_use]
    pub fn filters(mut self, filters: impl IntoIterator<Item = Filter>) -> Self {
        self.filters.extend(filters);
        self
    }

    #[must_use]
    pub fn order_asc(mut self, column: &str) -> Self {
        self.order = Some(OrderBy {
            column: column.to_string(),
            descending: false,
        });
        self
    }

    #[must_use]
    pub fn order_desc(mut self, column: &str) -> Self {
        self.order = Some(OrderBy {
            column: column.to_string(),
            descending: true,
        });
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Render the full query-pair list for the HTTP request.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.filters.len() + 3);
        pairs.push(("select".to_string(), self.columns.clone()));
        for filter in &self.filters {
            pairs.push(filter.to_query_pair());
        }
        if let Some(ref order) = self.order {
            let dir = if order.descending { "desc" } else { "asc" };
            pairs.push(("order".to_string(), format!("{}.{}", order.column, dir)));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

/// Render a bare filter list, used by updates and deletes.
pub fn filters_to_pairs(filters: &[Filter]) -> Vec<(String, String)> {
    filters.iter().map(Filter::to_query_pair).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq_renders_dotted_operator() {
        let (key, value) = Filter::eq("status", "published").to_query_pair();
        assert_eq!(key, "status");
        assert_eq!(value, "eq.published");
    }

    #[test]
    fn test_ilike_wraps_term_in_wildcards() {
        let (key, value) = Filter::ilike("name", "daft").to_query_pair();
        assert_eq!(key, "name");
        assert_eq!(value, "ilike.*daft*");
    }

    #[test]
    fn test_or_renders_inner_dotted_form() {
        let filter = Filter::Or(vec![Filter::ilike("title", "gala"), Filter::ilike("venue_name", "gala")]);
        let (key, value) = filter.to_query_pair();
        assert_eq!(key, "or");
        assert_eq!(value, "(title.ilike.*gala*,venue_name.ilike.*gala*)");
    }

    #[test]
    fn test_sanitize_strips_list_breaking_chars() {
        let (_, value) = Filter::ilike("name", "a,b(c)").to_query_pair();
        assert_eq!(value, "ilike.*abc*");
    }

    #[test]
    fn test_select_query_pairs_in_order() {
        let query = SelectQuery::new("id,name")
            .filter(Filter::eq("city", "Berlin"))
            .order_asc("name")
            .limit(10);
        let pairs = query.to_query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("select".to_string(), "id,name".to_string()),
                ("city".to_string(), "eq.Berlin".to_string()),
                ("order".to_string(), "name.asc".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }
}
