use crate::value::Value;
use std::fmt;

/// One `column = ?` pair of a SET clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    column: String,
}

impl Assignment {
    pub(super) fn new(column: &str) -> Self {
        Self {
            column: column.to_string(),
        }
    }

    /// Column name, in the casing the record declared.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Placeholder bound to this column.
    pub fn placeholder(&self) -> &'static str {
        "?"
    }
}

/// A compiled UPDATE statement and its positional arguments.
///
/// `args` holds one value per assignment followed by the identifier value,
/// which binds the placeholder of the WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePlan {
    pub(super) table: String,
    pub(super) id_column: String,
    pub(super) assignments: Vec<Assignment>,
    pub(super) args: Vec<Value>,
    pub(super) extra_filter: Option<String>,
}

impl UpdatePlan {
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Normalized value of the row identifier.
    pub fn id_value(&self) -> &Value {
        &self.args[self.assignments.len()]
    }

    pub fn extra_filter(&self) -> Option<&str> {
        self.extra_filter.as_deref()
    }

    /// Positional arguments, identifier last.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// `a = ?, b = ?`
    pub fn set_clause(&self) -> String {
        self.assignments
            .iter()
            .map(|a| format!("{} = {}", a.column(), a.placeholder()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Render the full statement text.
    pub fn sql(&self) -> String {
        let mut sql = format!(
            "UPDATE {} SET {} WHERE {} = ?",
            self.table,
            self.set_clause(),
            self.id_column
        );
        if let Some(filter) = &self.extra_filter {
            sql.push_str(" AND ");
            sql.push_str(filter);
        }
        sql
    }

    /// Consume the plan into statement text and arguments.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        let sql = self.sql();
        (sql, self.args)
    }
}

impl fmt::Display for UpdatePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql())
    }
}
