//! Structured read queries against the table store.
//!
//! A [`Select`] names the table, the columns, any embedded related rows
//! (`table!fk(columns)`), equality / membership filters and ordering. The
//! REST backend renders it as PostgREST query parameters; the in-memory
//! backend evaluates it directly.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `column = value`
    Eq(&'static str, Value),
    /// `column IN (values)`
    In(&'static str, Vec<Value>),
}

impl Filter {
    pub fn eq(column: &'static str, value: impl Into<Value>) -> Self {
        Filter::Eq(column, value.into())
    }

    pub fn column(&self) -> &'static str {
        match self {
            Filter::Eq(column, _) | Filter::In(column, _) => column,
        }
    }

    pub fn matches(&self, row: &serde_json::Map<String, Value>) -> bool {
        let actual = row.get(self.column()).unwrap_or(&Value::Null);
        match self {
            Filter::Eq(_, expected) => actual == expected,
            Filter::In(_, values) => values.contains(actual),
        }
    }

    /// PostgREST query parameter, e.g. `("assignee_id", "eq.<uuid>")`.
    pub fn to_query_pair(&self) -> (String, String) {
        match self {
            Filter::Eq(column, value) => (column.to_string(), format!("eq.{}", render_value(value))),
            Filter::In(column, values) => {
                let items: Vec<String> = values.iter().map(render_list_item).collect();
                (column.to_string(), format!("in.({})", items.join(",")))
            }
        }
    }
}

/// A related row pulled in through a foreign key (`projects!project_id(id,title)`).
///
/// The embedded object appears in each result row under the key `table`.
#[derive(Debug, Clone, PartialEq)]
pub struct Embed {
    pub table: &'static str,
    pub foreign_key: &'static str,
    pub columns: &'static [&'static str],
}

impl Embed {
    fn render(&self) -> String {
        format!("{}!{}({})", self.table, self.foreign_key, self.columns.join(","))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub column: &'static str,
    pub ascending: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: &'static str,
    /// Empty means every column (`*`).
    pub columns: &'static [&'static str],
    pub embeds: Vec<Embed>,
    pub filters: Vec<Filter>,
    pub order: Vec<Order>,
}

impl Select {
    pub fn from(table: &'static str) -> Self {
        Self {
            table,
            columns: &[],
            embeds: Vec::new(),
            filters: Vec::new(),
            order: Vec::new(),
        }
    }

    pub fn columns(mut self, columns: &'static [&'static str]) -> Self {
        self.columns = columns;
        self
    }

    pub fn embed(
        mut self,
        table: &'static str,
        foreign_key: &'static str,
        columns: &'static [&'static str],
    ) -> Self {
        self.embeds.push(Embed {
            table,
            foreign_key,
            columns,
        });
        self
    }

    pub fn eq(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::eq(column, value));
        self
    }

    pub fn in_list(mut self, column: &'static str, values: Vec<Value>) -> Self {
        self.filters.push(Filter::In(column, values));
        self
    }

    pub fn order_asc(mut self, column: &'static str) -> Self {
        self.order.push(Order {
            column,
            ascending: true,
        });
        self
    }

    pub fn order_desc(mut self, column: &'static str) -> Self {
        self.order.push(Order {
            column,
            ascending: false,
        });
        self
    }

    /// Value of the PostgREST `select` parameter.
    pub fn select_param(&self) -> String {
        let mut parts: Vec<String> = if self.columns.is_empty() {
            vec!["*".to_string()]
        } else {
            self.columns.iter().map(|c| c.to_string()).collect()
        };
        parts.extend(self.embeds.iter().map(Embed::render));
        parts.join(",")
    }

    /// All PostgREST query parameters for this select.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), self.select_param())];
        pairs.extend(self.filters.iter().map(Filter::to_query_pair));
        if !self.order.is_empty() {
            let order: Vec<String> = self
                .order
                .iter()
                .map(|o| format!("{}.{}", o.column, if o.ascending { "asc" } else { "desc" }))
                .collect();
            pairs.push(("order".to_string(), order.join(",")));
        }
        pairs
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Values inside `in.(...)` are double-quoted when they contain reserved
/// characters.
fn render_list_item(value: &Value) -> String {
    let raw = render_value(value);
    if raw.contains([',', '(', ')', '"', ' ']) {
        format!("\"{}\"", raw.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        raw
    }
}
