/// Row filter understood by PostgREST.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq(String, String),
    In(String, Vec<String>),
}

/// Query-string builder for table reads and filtered writes.
///
/// ```rust,ignore
/// let q = Query::new().eq("status", "pending").order("published_at", false).limit(50);
/// assert_eq!(q.to_query_string(), "select=*&status=eq.pending&order=published_at.desc&limit=50");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    select: Option<String>,
    filters: Vec<Filter>,
    order: Option<(String, bool)>,
    limit: Option<u32>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.select = Some(columns.to_string());
        self
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters
            .push(Filter::Eq(column.to_string(), value.to_string()));
        self
    }

    pub fn in_list<S: ToString>(mut self, column: &str, values: &[S]) -> Self {
        self.filters.push(Filter::In(
            column.to_string(),
            values.iter().map(ToString::to_string).collect(),
        ));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        self.order = Some((column.to_string(), ascending));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// `(column, ascending)`
    pub fn ordering(&self) -> Option<(&str, bool)> {
        self.order.as_ref().map(|(c, asc)| (c.as_str(), *asc))
    }

    pub fn row_limit(&self) -> Option<u32> {
        self.limit
    }

    /// Render for reads: always carries a `select`.
    pub fn to_query_string(&self) -> String {
        let mut parts = vec![format!("select={}", self.select.as_deref().unwrap_or("*"))];
        parts.extend(self.filter_parts());
        parts.join("&")
    }

    /// Render for writes: filters only.
    pub fn to_filter_string(&self) -> String {
        self.filter_parts().join("&")
    }

    fn filter_parts(&self) -> Vec<String> {
        let mut parts: Vec<String> = self
            .filters
            .iter()
            .map(|f| match f {
                Filter::Eq(col, value) => format!("{}=eq.{}", col, urlencoding::encode(value)),
                Filter::In(col, values) => {
                    let joined = values
                        .iter()
                        .map(|v| urlencoding::encode(v).into_owned())
                        .collect::<Vec<_>>()
                        .join(",");
                    format!("{}=in.({})", col, joined)
                }
            })
            .collect();

        if let Some((col, asc)) = &self.order {
            parts.push(format!("order={}.{}", col, if *asc { "asc" } else { "desc" }));
        }
        if let Some(limit) = self.limit {
            parts.push(format!("limit={}", limit));
        }
        parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_query_string() {
        let q = Query::new()
            .eq("status", "pending")
            .order("published_at", false)
            .limit(50);
        assert_eq!(
            q.to_query_string(),
            "select=*&status=eq.pending&order=published_at.desc&limit=50"
        );
    }

    #[test]
    fn test_in_filter_and_custom_select() {
        let q = Query::new()
            .select("id")
            .in_list("status", &["draft", "in_review"]);
        assert_eq!(q.to_query_string(), "select=id&status=in.(draft,in_review)");
    }

    #[test]
    fn test_filter_string_encodes_values() {
        let q = Query::new().eq("url", "https://x.com/a b");
        assert_eq!(q.to_filter_string(), "url=eq.https%3A%2F%2Fx.com%2Fa%20b");
    }

    #[test]
    fn test_accessors() {
        let q = Query::new().eq("id", 5).order("created_at", true).limit(3);
        assert_eq!(q.filters(), &[Filter::Eq("id".into(), "5".into())]);
        assert_eq!(q.ordering(), Some(("created_at", true)));
        assert_eq!(q.row_limit(), Some(3));
    }
}
